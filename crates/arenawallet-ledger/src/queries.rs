//! Read-side queries over the request log and ledger store.
//!
//! Account details shown next to a request are joined here at query time,
//! never denormalized into the stored request.

use rust_decimal::Decimal;
use serde::Serialize;

use arenawallet_types::{FundRequest, RequestStatus};

use crate::request_log::RequestLog;
use crate::store::LedgerStore;

/// A fund request joined with the owning account's wallet figures, for
/// admin review listings.
#[derive(Debug, Clone, Serialize)]
pub struct RequestRow {
    pub request: FundRequest,
    pub account_balance: Decimal,
    pub account_total_deposits: Decimal,
    pub account_total_withdrawals: Decimal,
}

/// List requests (newest first, optionally filtered by status) joined with
/// their accounts. Requests whose account has vanished are skipped.
#[must_use]
pub fn requests_with_accounts(
    log: &RequestLog,
    store: &LedgerStore,
    status: Option<RequestStatus>,
) -> Vec<RequestRow> {
    log.list(status)
        .into_iter()
        .filter_map(|request| {
            let account = store.account(request.account_id).ok()?;
            Some(RequestRow {
                request: request.clone(),
                account_balance: account.balance,
                account_total_deposits: account.total_deposits,
                account_total_withdrawals: account.total_withdrawals,
            })
        })
        .collect()
}

/// Per-status counts and approved volume for one request kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindStats {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub approved_total: Decimal,
}

/// Dashboard statistics across the whole request log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestStats {
    pub deposits: KindStats,
    pub withdrawals: KindStats,
}

/// Aggregate the request log into dashboard statistics.
#[must_use]
pub fn request_stats(log: &RequestLog) -> RequestStats {
    let mut stats = RequestStats::default();
    for request in log.list(None) {
        let kind = if request.kind.is_withdraw() {
            &mut stats.withdrawals
        } else {
            &mut stats.deposits
        };
        match request.status {
            RequestStatus::Pending => kind.pending += 1,
            RequestStatus::Approved => {
                kind.approved += 1;
                kind.approved_total += request.amount;
            }
            RequestStatus::Rejected => kind.rejected += 1,
        }
    }
    stats
}
