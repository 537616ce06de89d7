//! # arenawallet-types
//!
//! Shared types, errors, and configuration for the **ArenaWallet** ledger
//! and settlement core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`RequestId`], [`MatchId`], [`EntryId`]
//! - **Account model**: [`Account`], [`AccountSummary`]
//! - **Fund request model**: [`FundRequest`], [`FundKind`], [`RequestStatus`], [`Decision`]
//! - **Match entry model**: [`MatchEntry`], [`EntryStatus`]
//! - **Identity capability**: [`Identity`], [`Role`]
//! - **Notification events**: [`WalletEvent`], [`NotificationSink`]
//! - **Configuration**: [`WalletConfig`]
//! - **Errors**: [`WalletError`] with `AW_ERR_` prefix codes

pub mod account;
pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod event;
pub mod identity;
pub mod ids;
pub mod request;

// Re-export all primary types at crate root for ergonomic imports:
//   use arenawallet_types::{Account, FundRequest, WalletError, ...};

pub use account::*;
pub use config::*;
pub use entry::*;
pub use error::*;
pub use event::*;
pub use identity::*;
pub use ids::*;
pub use request::*;

// Constants are accessed via `arenawallet_types::constants::FOO`
// (not re-exported to avoid name collisions).
