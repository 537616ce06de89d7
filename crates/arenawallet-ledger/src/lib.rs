//! # arenawallet-ledger
//!
//! **Ledger plane**: account store, fund-request log, daily-limit guard,
//! and the read-side queries built on top of them.
//!
//! ## Architecture
//!
//! 1. **LedgerStore**: versioned account slots; snapshot/commit cycles make
//!    every balance check-then-mutate atomic per account
//! 2. **RequestLog**: append-then-update deposit/withdrawal requests with
//!    creation-time validation (no balance movement at creation)
//! 3. **DailyLimitGuard**: same-local-day withdrawal frequency cap
//! 4. **Queries**: request listings joined with account figures, and
//!    dashboard statistics
//!
//! ## Request Flow
//!
//! ```text
//! API → RequestLog.create_*() → Pending FundRequest
//!     → SettlementEngine.settle() → LedgerStore.commit() + finalize()
//! ```
//!
//! Balance mutation happens only through snapshot/commit — never here at
//! request creation.

pub mod daily_limit;
pub mod queries;
pub mod request_log;
pub mod store;

pub use daily_limit::DailyLimitGuard;
pub use queries::{request_stats, requests_with_accounts, KindStats, RequestRow, RequestStats};
pub use request_log::RequestLog;
pub use store::{with_conflict_retry, LedgerStore};
