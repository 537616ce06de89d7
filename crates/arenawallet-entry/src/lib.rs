//! # arenawallet-entry
//!
//! **Entry plane**: paid tournament joins against the ledger and the
//! external tournament catalog.
//!
//! ## Join Flow
//!
//! ```text
//! API → MatchJoinEngine.join()
//!     → catalog.find_match() + fee/duplicate/balance checks
//!     → LedgerStore snapshot/commit (entry-fee debit)
//!     → EntryBook.insert()
//!     → NotificationSink.notify(MatchJoined)
//! ```
//!
//! Duplicate joins are rejected by the entry book's deterministic
//! (account, match) key before any money moves. Entries are never
//! reversed; the only later mutations are room-credential fill-in and
//! one-shot result settlement.

pub mod book;
pub mod catalog;
pub mod engine;

pub use book::EntryBook;
pub use catalog::{InMemoryCatalog, MatchInfo, TournamentCatalog};
pub use engine::{JoinOutcome, MatchJoinEngine, MatchOutcome};
