pub mod chart;
pub mod compare;
pub mod config;
pub mod export;
pub mod format;
pub mod insights;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod season;
pub mod series;
pub mod state;
pub mod stats;
pub mod ui;
