//! # Coinfolio Ledger Crate
//!
//! This crate provides the authoritative cash-and-holdings state for a single
//! account. It is the unit of atomicity for the whole system: every mutation
//! either fully commits or leaves the ledger untouched.
//!
//! ## Architectural Principles
//!
//! - **State vs. Orchestration Decoupling:** The `AccountLedger` is a plain,
//!   single-threaded state machine with no IO and no locking of its own. The
//!   engine crate wraps each ledger in `Arc<Mutex<...>>` and owns the
//!   per-account mutual exclusion, so this crate stays trivially testable.
//! - **Invariants Over Convenience:** Cash can never go negative and a
//!   holding can never go negative or linger at zero. Every mutating method
//!   guards its inputs before touching state.
//!
//! ## Public API
//!
//! - `AccountLedger`: the in-memory state manager for one account.
//! - `LedgerError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod account;
pub mod error;

// Re-export the key components to provide a clean, public-facing API.
pub use account::AccountLedger;
pub use error::LedgerError;
