//! The ledger store: durable record of account balances and statistics.
//!
//! Each account lives in a versioned slot. Balance-mutating operations
//! follow a snapshot → mutate-clone → commit cycle: [`LedgerStore::snapshot`]
//! hands out a copy of the account plus its current version, and
//! [`LedgerStore::commit`] applies the mutated copy only if the version is
//! unchanged. A stale commit fails with `StorageConflict`, which the engines
//! retry a bounded number of times. This is what makes a check-then-mutate
//! against an account atomic: two settlements racing on the same account
//! cannot both pass a balance check on stale data and commit.

use std::collections::HashMap;

use arenawallet_types::{
    Account, AccountId, AccountSummary, MatchId, Result, WalletError,
};
use rust_decimal::Decimal;

/// An account plus the version counter guarding it.
#[derive(Debug, Clone)]
struct AccountSlot {
    account: Account,
    version: u64,
}

/// Source of truth for all account state.
#[derive(Debug, Default)]
pub struct LedgerStore {
    accounts: HashMap<AccountId, AccountSlot>,
}

impl LedgerStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Open a fresh zero-balance account and return its id.
    pub fn open_account(&mut self) -> AccountId {
        let id = AccountId::new();
        self.accounts.insert(
            id,
            AccountSlot {
                account: Account::new(id),
                version: 0,
            },
        );
        id
    }

    /// Read-only access to an account.
    ///
    /// # Errors
    /// Returns `AccountNotFound` if the account is unknown.
    pub fn account(&self, id: AccountId) -> Result<&Account> {
        self.accounts
            .get(&id)
            .map(|slot| &slot.account)
            .ok_or(WalletError::AccountNotFound(id))
    }

    /// Copy out an account together with its slot version, for a
    /// read-modify-commit cycle.
    ///
    /// # Errors
    /// Returns `AccountNotFound` if the account is unknown.
    pub fn snapshot(&self, id: AccountId) -> Result<(Account, u64)> {
        self.accounts
            .get(&id)
            .map(|slot| (slot.account.clone(), slot.version))
            .ok_or(WalletError::AccountNotFound(id))
    }

    /// Commit a mutated account copy taken via [`Self::snapshot`].
    ///
    /// # Errors
    /// - `AccountNotFound` if the account vanished.
    /// - `StorageConflict` if the slot moved on since the snapshot.
    /// - `BalanceUnderflow` if the copy carries a negative balance — the
    ///   commit is refused and the stored account is untouched.
    pub fn commit(&mut self, id: AccountId, expected_version: u64, account: Account) -> Result<()> {
        let slot = self
            .accounts
            .get_mut(&id)
            .ok_or(WalletError::AccountNotFound(id))?;

        if slot.version != expected_version {
            return Err(WalletError::StorageConflict(id));
        }
        if account.balance < Decimal::ZERO {
            return Err(WalletError::BalanceUnderflow(id));
        }

        slot.account = account;
        slot.version += 1;
        Ok(())
    }

    /// Build the read-side account summary. Joined matches come from the
    /// entry book and are merged in here at query time.
    ///
    /// # Errors
    /// Returns `AccountNotFound` if the account is unknown.
    pub fn summary(&self, id: AccountId, joined_matches: Vec<MatchId>) -> Result<AccountSummary> {
        let account = self.account(id)?;
        Ok(AccountSummary::from_account(account, joined_matches))
    }

    /// Sum of all balances. Money enters through approved deposits and
    /// prizes and leaves through approved withdrawals and entry fees;
    /// nothing else moves the float.
    #[must_use]
    pub fn total_float(&self) -> Decimal {
        self.accounts
            .values()
            .map(|slot| slot.account.balance)
            .sum()
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Run a snapshot/commit cycle against one account, retrying on
/// `StorageConflict` up to `max_retries` times. Any other error aborts
/// immediately.
pub fn with_conflict_retry<T>(
    account_id: AccountId,
    max_retries: u32,
    mut cycle: impl FnMut() -> Result<T>,
) -> Result<T> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match cycle() {
            Err(WalletError::StorageConflict(_)) if attempts <= max_retries => {
                tracing::warn!(%account_id, attempts, "ledger commit conflicted, retrying");
            }
            Err(WalletError::StorageConflict(_)) => {
                return Err(WalletError::ConflictRetriesExhausted {
                    account_id,
                    attempts,
                });
            }
            other => return other,
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl LedgerStore {
    /// Open an account pre-funded with `balance`, bypassing the deposit
    /// flow.
    pub fn open_funded_account(&mut self, balance: Decimal) -> AccountId {
        let id = self.open_account();
        let (mut account, version) = self.snapshot(id).expect("account just opened");
        account.balance = balance;
        self.commit(id, version, account).expect("fresh slot");
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_account_starts_empty() {
        let mut store = LedgerStore::new();
        let id = store.open_account();
        let account = store.account(id).unwrap();
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn unknown_account_errors() {
        let store = LedgerStore::new();
        let err = store.account(AccountId::new()).unwrap_err();
        assert!(matches!(err, WalletError::AccountNotFound(_)));
    }

    #[test]
    fn snapshot_commit_applies_mutation() {
        let mut store = LedgerStore::new();
        let id = store.open_account();

        let (mut account, version) = store.snapshot(id).unwrap();
        account.apply_deposit(Decimal::new(500, 0));
        store.commit(id, version, account).unwrap();

        assert_eq!(store.account(id).unwrap().balance, Decimal::new(500, 0));
    }

    #[test]
    fn stale_commit_conflicts() {
        let mut store = LedgerStore::new();
        let id = store.open_funded_account(Decimal::new(100, 0));

        let (mut first, version) = store.snapshot(id).unwrap();
        let (mut second, same_version) = store.snapshot(id).unwrap();
        assert_eq!(version, same_version);

        first.apply_withdrawal(Decimal::new(60, 0)).unwrap();
        store.commit(id, version, first).unwrap();

        // The second writer's snapshot is now stale.
        second.apply_withdrawal(Decimal::new(60, 0)).unwrap();
        let err = store.commit(id, same_version, second).unwrap_err();
        assert!(matches!(err, WalletError::StorageConflict(conflicted) if conflicted == id));

        // Only the first debit landed.
        assert_eq!(store.account(id).unwrap().balance, Decimal::new(40, 0));
    }

    #[test]
    fn negative_balance_commit_refused() {
        let mut store = LedgerStore::new();
        let id = store.open_account();

        let (mut account, version) = store.snapshot(id).unwrap();
        account.balance = Decimal::new(-1, 0);
        let err = store.commit(id, version, account).unwrap_err();
        assert!(matches!(err, WalletError::BalanceUnderflow(_)));
        assert_eq!(store.account(id).unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn total_float_sums_accounts() {
        let mut store = LedgerStore::new();
        store.open_funded_account(Decimal::new(100, 0));
        store.open_funded_account(Decimal::new(250, 0));
        assert_eq!(store.total_float(), Decimal::new(350, 0));
    }

    #[test]
    fn conflict_retry_recovers() {
        let account_id = AccountId::new();
        let mut failures = 2;
        let result = with_conflict_retry(account_id, 3, || {
            if failures > 0 {
                failures -= 1;
                Err(WalletError::StorageConflict(account_id))
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn conflict_retry_exhausts() {
        let account_id = AccountId::new();
        let err = with_conflict_retry(account_id, 3, || -> Result<()> {
            Err(WalletError::StorageConflict(account_id))
        })
        .unwrap_err();
        assert!(matches!(
            err,
            WalletError::ConflictRetriesExhausted { attempts: 4, .. }
        ));
    }

    #[test]
    fn non_conflict_error_aborts_retry_loop() {
        let account_id = AccountId::new();
        let mut calls = 0;
        let err = with_conflict_retry(account_id, 3, || -> Result<()> {
            calls += 1;
            Err(WalletError::InsufficientBalance {
                needed: Decimal::ONE,
                available: Decimal::ZERO,
            })
        })
        .unwrap_err();
        assert!(matches!(err, WalletError::InsufficientBalance { .. }));
        assert_eq!(calls, 1);
    }

    #[test]
    fn summary_merges_joined_matches() {
        let mut store = LedgerStore::new();
        let id = store.open_funded_account(Decimal::new(80, 0));
        let m = MatchId::new();
        let summary = store.summary(id, vec![m]).unwrap();
        assert_eq!(summary.balance, Decimal::new(80, 0));
        assert_eq!(summary.joined_matches, vec![m]);
    }
}
