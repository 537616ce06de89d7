//! The fund-request log: append-then-update records of deposit and
//! withdrawal requests.
//!
//! Requests are appended in `Pending` state and updated exactly once when
//! an admin decision is applied. Creation validates input and business
//! rules but never moves money — the withdrawal debit is deferred to
//! approval time, so pending requests never double-book funds.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;

use arenawallet_types::{
    AccountId, Decision, FundKind, FundRequest, RequestId, RequestStatus, Result, WalletConfig,
    WalletError,
};

use crate::daily_limit::DailyLimitGuard;
use crate::store::LedgerStore;

/// Append-then-update log of all fund requests.
#[derive(Debug)]
pub struct RequestLog {
    requests: HashMap<RequestId, FundRequest>,
    /// Insertion order, oldest first. Listings walk this in reverse.
    order: Vec<RequestId>,
    guard: DailyLimitGuard,
    min_withdrawal: Decimal,
}

impl RequestLog {
    #[must_use]
    pub fn new(config: &WalletConfig) -> Self {
        Self {
            requests: HashMap::new(),
            order: Vec::new(),
            guard: DailyLimitGuard::new(config.max_withdrawals_per_day, config.local_offset()),
            min_withdrawal: config.min_withdrawal,
        }
    }

    /// Record a deposit request for admin review. No balance movement.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0`
    /// - `Validation` if method or external reference is blank
    /// - `AccountNotFound` if the account is unknown
    pub fn create_deposit(
        &mut self,
        store: &LedgerStore,
        account_id: AccountId,
        amount: Decimal,
        method: &str,
        external_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<FundRequest> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount { amount });
        }
        if method.trim().is_empty() || external_ref.trim().is_empty() {
            return Err(WalletError::Validation {
                reason: "deposit method and external reference are required".to_string(),
            });
        }
        store.account(account_id)?;

        let request = FundRequest::new(
            account_id,
            FundKind::Deposit {
                method: method.to_string(),
                external_ref: external_ref.to_string(),
            },
            amount,
            now,
        );
        tracing::debug!(request_id = %request.id, %account_id, %amount, "deposit request created");
        Ok(self.append(request))
    }

    /// Record a withdrawal request for admin review.
    ///
    /// The balance check here is read-only: funds stay spendable until an
    /// admin approves, at which point the balance is re-validated.
    ///
    /// # Errors
    /// - `InvalidAmount` if `amount <= 0`
    /// - `BelowMinimum` if `amount` is under the configured minimum
    /// - `Validation` if the payout details are blank
    /// - `AccountNotFound` if the account is unknown
    /// - `InsufficientBalance` if the current balance can't cover `amount`
    /// - `DailyLimitExceeded` if the account already hit today's cap
    pub fn create_withdraw(
        &mut self,
        store: &LedgerStore,
        account_id: AccountId,
        amount: Decimal,
        payout: &str,
        now: DateTime<Utc>,
    ) -> Result<FundRequest> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount { amount });
        }
        if amount < self.min_withdrawal {
            return Err(WalletError::BelowMinimum {
                amount,
                minimum: self.min_withdrawal,
            });
        }
        if payout.trim().is_empty() {
            return Err(WalletError::Validation {
                reason: "payout details are required".to_string(),
            });
        }

        let account = store.account(account_id)?;
        if !account.can_cover(amount) {
            return Err(WalletError::InsufficientBalance {
                needed: amount,
                available: account.balance,
            });
        }

        self.guard.check(self.withdrawals_today(account_id, now))?;

        let request = FundRequest::new(
            account_id,
            FundKind::Withdraw {
                payout: payout.to_string(),
            },
            amount,
            now,
        );
        tracing::debug!(request_id = %request.id, %account_id, %amount, "withdrawal request created");
        Ok(self.append(request))
    }

    /// Count the account's withdrawal requests created today, any status.
    #[must_use]
    pub fn withdrawals_today(&self, account_id: AccountId, now: DateTime<Utc>) -> usize {
        self.requests
            .values()
            .filter(|r| {
                r.account_id == account_id
                    && r.kind.is_withdraw()
                    && self.guard.is_same_day(r.created_at, now)
            })
            .count()
    }

    /// Look up a request.
    ///
    /// # Errors
    /// Returns `RequestNotFound` if the id is unknown.
    pub fn get(&self, id: RequestId) -> Result<&FundRequest> {
        self.requests
            .get(&id)
            .ok_or(WalletError::RequestNotFound(id))
    }

    /// Apply an admin decision to a pending request. Called by the
    /// settlement engine after the ledger commit has succeeded.
    ///
    /// # Errors
    /// - `RequestNotFound` if the id is unknown
    /// - `AlreadyProcessed` if the request already reached a terminal state
    pub fn finalize(
        &mut self,
        id: RequestId,
        decision: Decision,
        admin_id: AccountId,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&FundRequest> {
        let request = self
            .requests
            .get_mut(&id)
            .ok_or(WalletError::RequestNotFound(id))?;
        request.finalize(decision, admin_id, note, now)?;
        Ok(request)
    }

    /// All requests for an account, newest first.
    #[must_use]
    pub fn for_account(&self, account_id: AccountId) -> Vec<&FundRequest> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.requests.get(id))
            .filter(|r| r.account_id == account_id)
            .collect()
    }

    /// All requests, newest first, optionally filtered by status.
    #[must_use]
    pub fn list(&self, status: Option<RequestStatus>) -> Vec<&FundRequest> {
        self.order
            .iter()
            .rev()
            .filter_map(|id| self.requests.get(id))
            .filter(|r| status.is_none_or(|s| r.status == s))
            .collect()
    }

    /// Number of requests in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn append(&mut self, request: FundRequest) -> FundRequest {
        let id = request.id;
        self.order.push(id);
        self.requests.insert(id, request.clone());
        request
    }
}
