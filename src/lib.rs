//! Analytics core for a pharmacy invoice dashboard.
//!
//! Consumes already-aggregated spend and demand series from a persistence
//! collaborator (the [`external::spend_source::SpendDataSource`] trait) and
//! produces spend projections, demand-spike alerts, and reorder
//! recommendations. All computation is synchronous, stateless, and pure;
//! the only async surface is the collaborator seam.

pub mod config;
pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod services;
