//! Match entry types: the record of a paid tournament entry.
//!
//! A `MatchEntry` is created atomically with the entry-fee debit and is
//! never reversed — there is no cancellation or refund path in this core.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, EntryId, MatchId};

/// Lifecycle of a match entry. `Joined` until the match result is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    Joined,
    Won,
    Lost,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Joined => write!(f, "JOINED"),
            Self::Won => write!(f, "WON"),
            Self::Lost => write!(f, "LOST"),
        }
    }
}

/// Record of a user's paid entry into a tournament match.
///
/// Room credentials start empty and are filled in by an admin shortly
/// before the match starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub id: EntryId,
    pub match_id: MatchId,
    pub account_id: AccountId,
    pub entry_fee: Decimal,
    pub joined_at: DateTime<Utc>,
    pub scheduled_start: DateTime<Utc>,
    pub room_id: Option<String>,
    pub room_password: Option<String>,
    pub status: EntryStatus,
}

impl MatchEntry {
    /// Create a fresh entry in the `Joined` state with empty room
    /// credentials.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        match_id: MatchId,
        entry_fee: Decimal,
        scheduled_start: DateTime<Utc>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::for_entry(account_id, match_id),
            match_id,
            account_id,
            entry_fee,
            joined_at,
            scheduled_start,
            room_id: None,
            room_password: None,
            status: EntryStatus::Joined,
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.status != EntryStatus::Joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_id_matches_pair() {
        let account = AccountId::new();
        let m = MatchId::new();
        let entry = MatchEntry::new(account, m, Decimal::new(50, 0), Utc::now(), Utc::now());
        assert_eq!(entry.id, EntryId::for_entry(account, m));
        assert_eq!(entry.status, EntryStatus::Joined);
        assert!(entry.room_id.is_none());
        assert!(entry.room_password.is_none());
        assert!(!entry.is_settled());
    }

    #[test]
    fn serde_roundtrip() {
        let entry = MatchEntry::new(
            AccountId::new(),
            MatchId::new(),
            Decimal::new(25, 0),
            Utc::now(),
            Utc::now(),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: MatchEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, entry.id);
        assert_eq!(back.entry_fee, entry.entry_fee);
    }
}
