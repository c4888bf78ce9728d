//! Board crate for the job board.
//!
//! This crate contains the orchestrator that composes a job provider, a
//! query session and the saved-jobs tracker into decorated pages.

pub mod board;
pub mod provider;

pub use board::{BoardConfig, BoardPage, JobBoard, JobView, SavedListing};
pub use provider::{JobProvider, JsonFileProvider, StaticProvider};
