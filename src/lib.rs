// src/lib.rs

pub mod aggregator;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod panel;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;

pub use aggregator::AdminDataAggregator;
pub use panel::{AdminPanel, PanelSnapshot};
pub use routes::create_router;
