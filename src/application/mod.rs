//! Application layer containing the trading logic and its orchestration.
//!
//! `TransactionEngine` is the synchronous core that mutates traders and
//! products. `TraderService` loads entities through the domain ports, runs
//! engine operations on them and persists the results.

pub mod engine;
pub mod service;
