pub mod spend_source;
