//! garrison-api: Staking orchestrator and HTTP API layer
//!
//! Hosts the dashboard session (snapshots, per-operation lifecycle tracking,
//! confirmation-driven refresh) and exposes it to a presentation layer over
//! HTTP.

pub mod dto;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod tracker;
mod watcher;

pub use server::{create_app, start_server};
pub use session::DashboardSession;
pub use state::AppState;
pub use tracker::{OpKind, OpPhase, OpStatus};
