//! Tournament catalog interface.
//!
//! The catalog is an external collaborator: this core only needs the
//! entry fee and the scheduled start of a match. Scheduling, capacity,
//! and prize-pool math live outside.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use arenawallet_types::MatchId;

/// What the join engine needs to know about a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    pub match_id: MatchId,
    pub entry_fee: Decimal,
    pub scheduled_start: DateTime<Utc>,
}

/// External tournament catalog lookup.
pub trait TournamentCatalog {
    /// Look up a match; `None` means the match does not exist.
    fn find_match(&self, match_id: MatchId) -> Option<MatchInfo>;
}

/// Catalog backed by a plain map. Used by tests and embeddings that manage
/// their tournament listings in-process.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    matches: HashMap<MatchId, MatchInfo>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a match, returning its id.
    pub fn insert(&mut self, entry_fee: Decimal, scheduled_start: DateTime<Utc>) -> MatchId {
        let match_id = MatchId::new();
        self.matches.insert(
            match_id,
            MatchInfo {
                match_id,
                entry_fee,
                scheduled_start,
            },
        );
        match_id
    }

    /// All registered matches, soonest first.
    #[must_use]
    pub fn all(&self) -> Vec<&MatchInfo> {
        let mut matches: Vec<&MatchInfo> = self.matches.values().collect();
        matches.sort_by_key(|m| m.scheduled_start);
        matches
    }
}

impl TournamentCatalog for InMemoryCatalog {
    fn find_match(&self, match_id: MatchId) -> Option<MatchInfo> {
        self.matches.get(&match_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn find_match_hits_and_misses() {
        let mut catalog = InMemoryCatalog::new();
        let m = catalog.insert(Decimal::new(50, 0), Utc::now());
        assert_eq!(catalog.find_match(m).unwrap().entry_fee, Decimal::new(50, 0));
        assert!(catalog.find_match(MatchId::new()).is_none());
    }

    #[test]
    fn all_sorts_by_start_time() {
        let mut catalog = InMemoryCatalog::new();
        let now = Utc::now();
        let later = catalog.insert(Decimal::new(20, 0), now + Duration::hours(2));
        let sooner = catalog.insert(Decimal::new(10, 0), now + Duration::hours(1));

        let all = catalog.all();
        assert_eq!(all[0].match_id, sooner);
        assert_eq!(all[1].match_id, later);
    }
}
