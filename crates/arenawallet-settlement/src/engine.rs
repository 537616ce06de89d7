//! The settlement engine.
//!
//! Applies an admin's approve/reject decision to a pending fund request:
//! 1. Check the admin capability
//! 2. Load the request; refuse anything not pending
//! 3. For approvals, run the balance mutation as a snapshot/commit cycle
//!    with bounded conflict retries
//! 4. Mark the request terminal — only after the ledger commit landed,
//!    and infallibly at that point, so the pair is all-or-nothing
//! 5. Emit the notification event (fire-and-forget)
//!
//! An approval that fails the settlement-time balance re-check leaves the
//! request pending and the ledger untouched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use arenawallet_ledger::{with_conflict_retry, LedgerStore, RequestLog};
use arenawallet_types::{
    AccountId, Decision, FundRequest, Identity, NotificationSink, RequestId, Result, WalletConfig,
    WalletError, WalletEvent,
};

/// What a successful settlement hands back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementOutcome {
    pub request: FundRequest,
    pub new_balance: Decimal,
}

/// Applies admin decisions to pending fund requests.
pub struct SettlementEngine {
    max_retries: u32,
}

impl SettlementEngine {
    #[must_use]
    pub fn new(config: &WalletConfig) -> Self {
        Self {
            max_retries: config.max_conflict_retries,
        }
    }

    /// Settle a pending request with the given decision.
    ///
    /// # Errors
    /// - `Unauthorized` if `identity` lacks the admin role
    /// - `RequestNotFound` / `AlreadyProcessed` for unknown or terminal requests
    /// - `InsufficientBalance` if a withdrawal approval fails the
    ///   settlement-time balance re-check (request stays pending)
    /// - `ConflictRetriesExhausted` if the ledger commit kept conflicting
    #[allow(clippy::too_many_arguments)]
    pub fn settle(
        &self,
        store: &mut LedgerStore,
        log: &mut RequestLog,
        sink: &dyn NotificationSink,
        identity: &Identity,
        request_id: RequestId,
        decision: Decision,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<SettlementOutcome> {
        let admin_id = identity.require_admin()?;

        let request = log.get(request_id)?;
        if !request.is_pending() {
            return Err(WalletError::AlreadyProcessed(request_id));
        }
        let account_id = request.account_id;
        let amount = request.amount;
        let is_withdraw = request.kind.is_withdraw();

        let new_balance = match decision {
            Decision::Approve => {
                self.apply_approval(store, account_id, amount, is_withdraw)?
            }
            // Rejection never touches the ledger.
            Decision::Reject => store.account(account_id)?.balance,
        };

        // The ledger commit has landed; the request was verified pending
        // above and nothing else mutates it, so this transition cannot fail.
        let request = log
            .finalize(request_id, decision, admin_id, note, now)?
            .clone();

        tracing::info!(
            %request_id,
            %account_id,
            %admin_id,
            kind = %request.kind,
            status = %request.status,
            %amount,
            %new_balance,
            "fund request settled"
        );

        let event = if is_withdraw {
            WalletEvent::WithdrawalSettled {
                request_id,
                account_id,
                status: request.status,
                amount,
                new_balance,
            }
        } else {
            WalletEvent::DepositSettled {
                request_id,
                account_id,
                status: request.status,
                amount,
                new_balance,
            }
        };
        sink.notify(&event);

        Ok(SettlementOutcome {
            request,
            new_balance,
        })
    }

    fn apply_approval(
        &self,
        store: &mut LedgerStore,
        account_id: AccountId,
        amount: Decimal,
        is_withdraw: bool,
    ) -> Result<Decimal> {
        with_conflict_retry(account_id, self.max_retries, || {
            let (mut account, version) = store.snapshot(account_id)?;
            if is_withdraw {
                // Balance may have moved since the request was created.
                account.apply_withdrawal(amount)?;
            } else {
                account.apply_deposit(amount);
            }
            let new_balance = account.balance;
            store.commit(account_id, version, account)?;
            Ok(new_balance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arenawallet_types::{NullSink, RecordingSink, RequestStatus};

    struct Fixture {
        store: LedgerStore,
        log: RequestLog,
        engine: SettlementEngine,
        admin: Identity,
        account: AccountId,
    }

    fn fixture(balance: Decimal) -> Fixture {
        let config = WalletConfig::default();
        let mut store = LedgerStore::new();
        let account = store.open_funded_account(balance);
        Fixture {
            store,
            log: RequestLog::new(&config),
            engine: SettlementEngine::new(&config),
            admin: Identity::admin(AccountId::new()),
            account,
        }
    }

    #[test]
    fn approved_deposit_credits_exactly() {
        let mut f = fixture(Decimal::ZERO);
        let req = f
            .log
            .create_deposit(&f.store, f.account, Decimal::new(150, 0), "upi", "UTR1", Utc::now())
            .unwrap();

        let outcome = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                req.id,
                Decision::Approve,
                Some("verified against bank statement".into()),
                Utc::now(),
            )
            .unwrap();

        assert_eq!(outcome.new_balance, Decimal::new(150, 0));
        assert_eq!(outcome.request.status, RequestStatus::Approved);
        let account = f.store.account(f.account).unwrap();
        assert_eq!(account.balance, Decimal::new(150, 0));
        assert_eq!(account.total_deposits, Decimal::new(150, 0));
    }

    #[test]
    fn rejected_deposit_changes_nothing_but_status() {
        let mut f = fixture(Decimal::new(20, 0));
        let req = f
            .log
            .create_deposit(&f.store, f.account, Decimal::new(150, 0), "upi", "UTR1", Utc::now())
            .unwrap();

        let outcome = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                req.id,
                Decision::Reject,
                None,
                Utc::now(),
            )
            .unwrap();

        assert_eq!(outcome.request.status, RequestStatus::Rejected);
        assert_eq!(outcome.new_balance, Decimal::new(20, 0));
        let account = f.store.account(f.account).unwrap();
        assert_eq!(account.balance, Decimal::new(20, 0));
        assert_eq!(account.total_deposits, Decimal::ZERO);
    }

    #[test]
    fn approved_withdrawal_debits_and_stamps_audit_fields() {
        let mut f = fixture(Decimal::new(100, 0));
        let req = f
            .log
            .create_withdraw(&f.store, f.account, Decimal::new(60, 0), "player@upi", Utc::now())
            .unwrap();

        let outcome = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                req.id,
                Decision::Approve,
                None,
                Utc::now(),
            )
            .unwrap();

        assert_eq!(outcome.new_balance, Decimal::new(40, 0));
        assert_eq!(outcome.request.processed_by, Some(f.admin.account_id));
        assert!(outcome.request.processed_at.is_some());
        let account = f.store.account(f.account).unwrap();
        assert_eq!(account.total_withdrawals, Decimal::new(60, 0));
    }

    #[test]
    fn withdrawal_recheck_leaves_request_pending() {
        let mut f = fixture(Decimal::new(100, 0));
        let now = Utc::now();
        let first = f
            .log
            .create_withdraw(&f.store, f.account, Decimal::new(60, 0), "player@upi", now)
            .unwrap();
        let second = f
            .log
            .create_withdraw(&f.store, f.account, Decimal::new(60, 0), "player@upi", now)
            .unwrap();

        f.engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                first.id,
                Decision::Approve,
                None,
                now,
            )
            .unwrap();

        // Balance is now 40; the second 60 can no longer be covered.
        let err = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                second.id,
                Decision::Approve,
                None,
                now,
            )
            .unwrap_err();
        assert!(matches!(err, WalletError::InsufficientBalance { .. }));

        // Decision not applied: still pending, ledger untouched.
        assert_eq!(f.log.get(second.id).unwrap().status, RequestStatus::Pending);
        assert_eq!(f.store.account(f.account).unwrap().balance, Decimal::new(40, 0));
    }

    #[test]
    fn second_decision_fails_already_processed() {
        let mut f = fixture(Decimal::new(100, 0));
        let req = f
            .log
            .create_withdraw(&f.store, f.account, Decimal::new(50, 0), "player@upi", Utc::now())
            .unwrap();

        f.engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                req.id,
                Decision::Approve,
                None,
                Utc::now(),
            )
            .unwrap();

        let err = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                req.id,
                Decision::Reject,
                None,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, WalletError::AlreadyProcessed(id) if id == req.id));

        // The debit was not repeated or reversed.
        assert_eq!(f.store.account(f.account).unwrap().balance, Decimal::new(50, 0));
    }

    #[test]
    fn non_admin_is_unauthorized() {
        let mut f = fixture(Decimal::new(100, 0));
        let req = f
            .log
            .create_deposit(&f.store, f.account, Decimal::new(10, 0), "upi", "UTR1", Utc::now())
            .unwrap();

        let user = Identity::user(f.account);
        let err = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &user,
                req.id,
                Decision::Approve,
                None,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, WalletError::Unauthorized { .. }));
        assert!(f.log.get(req.id).unwrap().is_pending());
    }

    #[test]
    fn unknown_request_not_found() {
        let mut f = fixture(Decimal::ZERO);
        let err = f
            .engine
            .settle(
                &mut f.store,
                &mut f.log,
                &NullSink,
                &f.admin,
                RequestId::new(),
                Decision::Approve,
                None,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, WalletError::RequestNotFound(_)));
    }

    #[test]
    fn settlement_emits_notification_with_new_balance() {
        let mut f = fixture(Decimal::ZERO);
        let sink = RecordingSink::new();
        let req = f
            .log
            .create_deposit(&f.store, f.account, Decimal::new(75, 0), "upi", "UTR9", Utc::now())
            .unwrap();

        f.engine
            .settle(
                &mut f.store,
                &mut f.log,
                &sink,
                &f.admin,
                req.id,
                Decision::Approve,
                None,
                Utc::now(),
            )
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            WalletEvent::DepositSettled {
                status,
                new_balance,
                ..
            } => {
                assert_eq!(*status, RequestStatus::Approved);
                assert_eq!(*new_balance, Decimal::new(75, 0));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

}
