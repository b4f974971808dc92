pub mod anomaly_service;
pub mod periods;
pub mod projection_service;
pub mod reorder_service;
pub mod statistics;
