//! Booklog server library
//!
//! Exports the server components so integration tests can drive the
//! router and store without spawning a process.

pub mod config;
pub mod covers;
pub mod handlers;
pub mod models;
pub mod storage;
pub mod views;

use std::sync::Arc;

use storage::Store;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}
