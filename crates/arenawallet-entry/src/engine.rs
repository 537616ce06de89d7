//! The match-join engine.
//!
//! Joining a match debits the entry fee and records the entry as one
//! atomic unit: the entry is written only after the ledger commit lands,
//! and the write itself cannot fail at that point. Entries are never
//! reversed — there is no cancellation or refund path.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use arenawallet_ledger::{with_conflict_retry, LedgerStore};
use arenawallet_types::{
    AccountId, AccountSummary, EntryStatus, Identity, MatchEntry, MatchId, NotificationSink,
    Result, WalletConfig, WalletError, WalletEvent,
};

use crate::book::EntryBook;
use crate::catalog::{MatchInfo, TournamentCatalog};

/// What a successful join hands back to the caller.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub entry: MatchEntry,
    pub new_balance: Decimal,
}

/// How a settled match went for one entrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The entrant won; credit this prize.
    Won { prize: Decimal },
    Lost,
}

/// Validates and executes paid match entries against the ledger and the
/// tournament catalog, and owns the entry book.
pub struct MatchJoinEngine {
    book: EntryBook,
    max_retries: u32,
}

impl MatchJoinEngine {
    #[must_use]
    pub fn new(config: &WalletConfig) -> Self {
        Self {
            book: EntryBook::new(),
            max_retries: config.max_conflict_retries,
        }
    }

    /// Read access to the entry book.
    #[must_use]
    pub fn book(&self) -> &EntryBook {
        &self.book
    }

    /// Join a match, debiting the entry fee.
    ///
    /// # Errors
    /// - `AccountNotFound` / `MatchNotFound` for unknown parties
    /// - `InvalidAmount` if `entry_fee <= 0`
    /// - `EntryFeeMismatch` if it differs from the catalog's configured fee
    /// - `AlreadyJoined` for a duplicate (account, match) pair — the first
    ///   join's debit is never repeated
    /// - `InsufficientBalance` if the balance can't cover the fee
    #[allow(clippy::too_many_arguments)]
    pub fn join(
        &mut self,
        store: &mut LedgerStore,
        catalog: &dyn TournamentCatalog,
        sink: &dyn NotificationSink,
        account_id: AccountId,
        match_id: MatchId,
        entry_fee: Decimal,
        now: DateTime<Utc>,
    ) -> Result<JoinOutcome> {
        store.account(account_id)?;
        let info = catalog
            .find_match(match_id)
            .ok_or(WalletError::MatchNotFound(match_id))?;

        if entry_fee <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount { amount: entry_fee });
        }
        if entry_fee != info.entry_fee {
            return Err(WalletError::EntryFeeMismatch {
                expected: info.entry_fee,
                submitted: entry_fee,
            });
        }
        if self.book.has_joined(account_id, match_id) {
            return Err(WalletError::AlreadyJoined {
                account_id,
                match_id,
            });
        }

        let new_balance = with_conflict_retry(account_id, self.max_retries, || {
            let (mut account, version) = store.snapshot(account_id)?;
            account.apply_entry_fee(entry_fee)?;
            let new_balance = account.balance;
            store.commit(account_id, version, account)?;
            Ok(new_balance)
        })?;

        // Debit landed; recording the entry is infallible from here.
        let entry = MatchEntry::new(account_id, match_id, entry_fee, info.scheduled_start, now);
        self.book.insert(entry.clone());

        tracing::info!(
            %account_id,
            %match_id,
            %entry_fee,
            %new_balance,
            "match joined"
        );

        sink.notify(&WalletEvent::MatchJoined {
            account_id,
            match_id,
            entry_fee,
            new_balance,
        });

        Ok(JoinOutcome { entry, new_balance })
    }

    /// Fill in the room credentials on every entry of a match, shortly
    /// before it starts. Admin action.
    ///
    /// Returns the number of entries updated.
    ///
    /// # Errors
    /// Returns `Unauthorized` for non-admin identities.
    pub fn set_room_credentials(
        &mut self,
        identity: &Identity,
        match_id: MatchId,
        room_id: &str,
        room_password: &str,
    ) -> Result<usize> {
        identity.require_admin()?;
        let mut updated = 0;
        for entry in self.book.for_match_mut(match_id) {
            entry.room_id = Some(room_id.to_string());
            entry.room_password = Some(room_password.to_string());
            updated += 1;
        }
        Ok(updated)
    }

    /// Settle one entrant's result after the match completes: credit the
    /// prize on a win, or book the wagered fee as a loss. Admin action;
    /// applies to each entry at most once.
    ///
    /// # Errors
    /// - `Unauthorized` for non-admin identities
    /// - `InvalidAmount` if a winning prize is not strictly positive
    /// - `EntryNotSettleable` if no entry exists or it was already settled
    pub fn settle_result(
        &mut self,
        store: &mut LedgerStore,
        identity: &Identity,
        account_id: AccountId,
        match_id: MatchId,
        outcome: MatchOutcome,
    ) -> Result<()> {
        identity.require_admin()?;
        if let MatchOutcome::Won { prize } = outcome {
            if prize <= Decimal::ZERO {
                return Err(WalletError::InvalidAmount { amount: prize });
            }
        }

        let entry = self.book.get(account_id, match_id).ok_or_else(|| {
            WalletError::EntryNotSettleable {
                reason: format!("no entry for {account_id} in {match_id}"),
            }
        })?;
        if entry.is_settled() {
            return Err(WalletError::EntryNotSettleable {
                reason: format!("entry {} already settled as {}", entry.id, entry.status),
            });
        }
        let entry_fee = entry.entry_fee;

        with_conflict_retry(account_id, self.max_retries, || {
            let (mut account, version) = store.snapshot(account_id)?;
            match outcome {
                MatchOutcome::Won { prize } => account.apply_prize(prize),
                MatchOutcome::Lost => account.apply_loss(entry_fee),
            }
            store.commit(account_id, version, account)
        })?;

        let entry = self
            .book
            .get_mut(account_id, match_id)
            .expect("entry checked above");
        entry.status = match outcome {
            MatchOutcome::Won { .. } => EntryStatus::Won,
            MatchOutcome::Lost => EntryStatus::Lost,
        };

        tracing::info!(%account_id, %match_id, status = %entry.status, "match result settled");
        Ok(())
    }

    /// Account summary with joined matches merged in from the entry book.
    ///
    /// # Errors
    /// Returns `AccountNotFound` if the account is unknown.
    pub fn account_summary(
        &self,
        store: &LedgerStore,
        account_id: AccountId,
    ) -> Result<AccountSummary> {
        store.summary(account_id, self.book.matches_for_account(account_id))
    }

    /// Pair each catalog match with whether the account has joined it.
    #[must_use]
    pub fn matches_with_joined<'a>(
        &self,
        matches: impl IntoIterator<Item = &'a MatchInfo>,
        account_id: AccountId,
    ) -> Vec<(MatchInfo, bool)> {
        matches
            .into_iter()
            .map(|info| {
                let joined = self.book.has_joined(account_id, info.match_id);
                (info.clone(), joined)
            })
            .collect()
    }
}
