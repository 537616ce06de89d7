//! Fund request types: admin-reviewable deposits and withdrawals.
//!
//! A request is created `Pending` and transitions exactly once to
//! `Approved` or `Rejected`. Terminal requests are immutable — a second
//! decision fails [`WalletError::AlreadyProcessed`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, RequestId, Result, WalletError};

/// What kind of fund movement this request asks for, with the
/// kind-specific reference data the admin needs to verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundKind {
    /// Money in: the user paid externally and submits the payment reference.
    Deposit {
        /// Payment method (e.g. "upi", "bank-transfer").
        method: String,
        /// External payment reference the admin verifies against.
        external_ref: String,
    },
    /// Money out: the user asks to be paid at the given destination.
    Withdraw {
        /// Payout destination details (e.g. a UPI id).
        payout: String,
    },
}

impl FundKind {
    #[must_use]
    pub fn is_withdraw(&self) -> bool {
        matches!(self, Self::Withdraw { .. })
    }
}

impl std::fmt::Display for FundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit { .. } => write!(f, "DEPOSIT"),
            Self::Withdraw { .. } => write!(f, "WITHDRAW"),
        }
    }
}

/// Lifecycle status of a fund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// An admin's verdict on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    Reject,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "APPROVE"),
            Self::Reject => write!(f, "REJECT"),
        }
    }
}

/// A pending admin-reviewable deposit or withdrawal.
///
/// References its account by identity only — it never embeds a writable
/// copy of the balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundRequest {
    pub id: RequestId,
    pub account_id: AccountId,
    pub kind: FundKind,
    pub amount: Decimal,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<AccountId>,
    pub admin_notes: Option<String>,
}

impl FundRequest {
    /// Create a new pending request.
    #[must_use]
    pub fn new(account_id: AccountId, kind: FundKind, amount: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            id: RequestId::new(),
            account_id,
            kind,
            amount,
            status: RequestStatus::Pending,
            created_at: now,
            processed_at: None,
            processed_by: None,
            admin_notes: None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Apply an admin decision, transitioning to the terminal state.
    ///
    /// # Errors
    /// Returns `AlreadyProcessed` if the request is not pending; the
    /// request is unchanged in that case.
    pub fn finalize(
        &mut self,
        decision: Decision,
        admin_id: AccountId,
        note: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !self.is_pending() {
            return Err(WalletError::AlreadyProcessed(self.id));
        }
        self.status = match decision {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        };
        self.processed_at = Some(now);
        self.processed_by = Some(admin_id);
        self.admin_notes = note;
        Ok(())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl FundRequest {
    pub fn dummy_deposit(account_id: AccountId, amount: Decimal) -> Self {
        Self::new(
            account_id,
            FundKind::Deposit {
                method: "upi".to_string(),
                external_ref: format!("UTR{}", rand_ref()),
            },
            amount,
            Utc::now(),
        )
    }

    pub fn dummy_withdraw(account_id: AccountId, amount: Decimal) -> Self {
        Self::new(
            account_id,
            FundKind::Withdraw {
                payout: "player@upi".to_string(),
            },
            amount,
            Utc::now(),
        )
    }
}

#[cfg(any(test, feature = "test-helpers"))]
fn rand_ref() -> u64 {
    use rand::Rng;
    rand::thread_rng().gen_range(100_000..999_999)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_is_pending() {
        let req = FundRequest::dummy_deposit(AccountId::new(), Decimal::new(100, 0));
        assert!(req.is_pending());
        assert!(req.processed_at.is_none());
        assert!(req.processed_by.is_none());
    }

    #[test]
    fn approve_is_terminal() {
        let mut req = FundRequest::dummy_deposit(AccountId::new(), Decimal::new(100, 0));
        let admin = AccountId::new();
        req.finalize(Decision::Approve, admin, Some("verified".into()), Utc::now())
            .unwrap();

        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.processed_by, Some(admin));
        assert!(req.processed_at.is_some());
        assert_eq!(req.admin_notes.as_deref(), Some("verified"));

        let err = req
            .finalize(Decision::Reject, admin, None, Utc::now())
            .unwrap_err();
        assert!(matches!(err, WalletError::AlreadyProcessed(id) if id == req.id));
        // Still approved, untouched.
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(req.admin_notes.as_deref(), Some("verified"));
    }

    #[test]
    fn reject_is_terminal() {
        let mut req = FundRequest::dummy_withdraw(AccountId::new(), Decimal::new(50, 0));
        req.finalize(Decision::Reject, AccountId::new(), None, Utc::now())
            .unwrap();
        assert_eq!(req.status, RequestStatus::Rejected);

        let err = req
            .finalize(Decision::Approve, AccountId::new(), None, Utc::now())
            .unwrap_err();
        assert!(matches!(err, WalletError::AlreadyProcessed(_)));
    }

    #[test]
    fn kind_display() {
        let dep = FundRequest::dummy_deposit(AccountId::new(), Decimal::ONE);
        let wd = FundRequest::dummy_withdraw(AccountId::new(), Decimal::ONE);
        assert_eq!(dep.kind.to_string(), "DEPOSIT");
        assert_eq!(wd.kind.to_string(), "WITHDRAW");
        assert!(wd.kind.is_withdraw());
        assert!(!dep.kind.is_withdraw());
    }

    #[test]
    fn serde_roundtrip() {
        let req = FundRequest::dummy_withdraw(AccountId::new(), Decimal::new(75, 0));
        let json = serde_json::to_string(&req).unwrap();
        let back: FundRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, req.id);
        assert_eq!(back.amount, req.amount);
        assert_eq!(back.status, RequestStatus::Pending);
    }
}
