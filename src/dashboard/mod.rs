pub mod config;
pub mod controller;

pub use config::DashboardConfig;
pub use controller::{Dashboard, DashboardStats, DashboardView};
