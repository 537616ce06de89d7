//! # arenawallet-settlement
//!
//! **Settlement plane**: applies admin approve/reject decisions to pending
//! fund requests, mutating the ledger atomically with the request's status
//! transition.
//!
//! ## Guarantees
//!
//! - A request settles at most once: terminal requests refuse further
//!   decisions with `AlreadyProcessed`
//! - Withdrawal approvals re-validate the balance at settlement time; a
//!   failed re-check leaves the request pending and the ledger untouched
//! - The account commit and the request transition succeed or fail together
//! - Conflicted commits are retried a bounded number of times
//! - A notification event naming the new status and balance is emitted to
//!   the sink after every settlement; delivery failure never rolls back

pub mod engine;

pub use engine::{SettlementEngine, SettlementOutcome};
