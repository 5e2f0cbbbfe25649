#![doc(test(attr(deny(warnings))))]

//! Expense Core offers the ledger, budgeting, and recurrence primitives
//! that power a personal expense and income tracker.

pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod services;
pub mod storage;
pub mod tracker;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
