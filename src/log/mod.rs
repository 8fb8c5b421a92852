//! Logging and observability
//!
//! This module provides the JSONL activity journal recording every change
//! made to the tracker.

pub mod jsonl;

pub use jsonl::{Journal, JournalAction, JournalEvent};
