//! The entry book: every paid match entry, keyed by its deterministic id.
//!
//! Because an [`EntryId`] is derived from the (account, match) pair, a
//! duplicate join resolves to an existing key — that is the whole
//! idempotency story for joins.

use std::collections::HashMap;

use arenawallet_types::{AccountId, EntryId, MatchEntry, MatchId};

/// All match entries, indexed by deterministic entry id.
#[derive(Debug, Default)]
pub struct EntryBook {
    entries: HashMap<EntryId, MatchEntry>,
}

impl EntryBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the account already holds an entry for this match.
    #[must_use]
    pub fn has_joined(&self, account_id: AccountId, match_id: MatchId) -> bool {
        self.entries
            .contains_key(&EntryId::for_entry(account_id, match_id))
    }

    /// Insert a fresh entry. Callers check [`Self::has_joined`] first; a
    /// duplicate insert replaces nothing because the engine never gets
    /// that far.
    pub fn insert(&mut self, entry: MatchEntry) {
        self.entries.insert(entry.id, entry);
    }

    #[must_use]
    pub fn get(&self, account_id: AccountId, match_id: MatchId) -> Option<&MatchEntry> {
        self.entries.get(&EntryId::for_entry(account_id, match_id))
    }

    pub(crate) fn get_mut(
        &mut self,
        account_id: AccountId,
        match_id: MatchId,
    ) -> Option<&mut MatchEntry> {
        self.entries
            .get_mut(&EntryId::for_entry(account_id, match_id))
    }

    /// All entries for an account, oldest join first.
    #[must_use]
    pub fn for_account(&self, account_id: AccountId) -> Vec<&MatchEntry> {
        let mut entries: Vec<&MatchEntry> = self
            .entries
            .values()
            .filter(|e| e.account_id == account_id)
            .collect();
        entries.sort_by_key(|e| e.joined_at);
        entries
    }

    /// Ids of the matches an account has entered.
    #[must_use]
    pub fn matches_for_account(&self, account_id: AccountId) -> Vec<MatchId> {
        self.for_account(account_id)
            .into_iter()
            .map(|e| e.match_id)
            .collect()
    }

    /// Mutable iteration over every entry of one match.
    pub(crate) fn for_match_mut(
        &mut self,
        match_id: MatchId,
    ) -> impl Iterator<Item = &mut MatchEntry> {
        self.entries
            .values_mut()
            .filter(move |e| e.match_id == match_id)
    }

    /// Number of entries in the book.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    #[test]
    fn join_is_visible_by_pair() {
        let mut book = EntryBook::new();
        let account = AccountId::new();
        let m = MatchId::new();
        assert!(!book.has_joined(account, m));

        book.insert(MatchEntry::new(account, m, Decimal::new(50, 0), Utc::now(), Utc::now()));
        assert!(book.has_joined(account, m));
        assert!(!book.has_joined(account, MatchId::new()));
        assert_eq!(book.get(account, m).unwrap().entry_fee, Decimal::new(50, 0));
    }

    #[test]
    fn for_account_sorted_by_join_time() {
        let mut book = EntryBook::new();
        let account = AccountId::new();
        let now = Utc::now();
        let m1 = MatchId::new();
        let m2 = MatchId::new();

        book.insert(MatchEntry::new(account, m2, Decimal::ONE, now, now + Duration::minutes(5)));
        book.insert(MatchEntry::new(account, m1, Decimal::ONE, now, now));
        // A different account's entry stays out of the listing.
        book.insert(MatchEntry::new(AccountId::new(), m1, Decimal::ONE, now, now));

        assert_eq!(book.matches_for_account(account), vec![m1, m2]);
        assert_eq!(book.len(), 3);
    }
}
