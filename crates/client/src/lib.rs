//! Kesfolio Client - Backend access for the Kesfolio dashboard.
//!
//! This crate talks to the Kesfolio REST backend, keeps the signed-in user's
//! session and assembles the dashboard from `kesfolio-core` aggregations.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod session;
pub mod traits;

// Re-export commonly used types
pub use client::{ApiClient, RegisterRequest};
pub use config::Config;
pub use dashboard::{build_snapshot, DashboardInputs, DashboardService, DashboardSnapshot};
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore};
pub use traits::{Parsed, PortfolioApi};
