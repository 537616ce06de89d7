//! Outbound notification events.
//!
//! Emitted after a settlement or join completes, consumed by an external
//! real-time delivery collaborator. Delivery is fire-and-forget: a failed
//! notification never rolls back the operation that produced it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, MatchId, RequestId, RequestStatus};

/// Events published to the notification sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalletEvent {
    /// A deposit request reached a terminal state.
    DepositSettled {
        request_id: RequestId,
        account_id: AccountId,
        status: RequestStatus,
        amount: Decimal,
        new_balance: Decimal,
    },
    /// A withdrawal request reached a terminal state.
    WithdrawalSettled {
        request_id: RequestId,
        account_id: AccountId,
        status: RequestStatus,
        amount: Decimal,
        new_balance: Decimal,
    },
    /// The account entered a match and paid the entry fee.
    MatchJoined {
        account_id: AccountId,
        match_id: MatchId,
        entry_fee: Decimal,
        new_balance: Decimal,
    },
}

impl WalletEvent {
    /// The account this event should be delivered to.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::DepositSettled { account_id, .. }
            | Self::WithdrawalSettled { account_id, .. }
            | Self::MatchJoined { account_id, .. } => *account_id,
        }
    }
}

/// Fire-and-forget delivery interface to the real-time collaborator.
pub trait NotificationSink {
    /// Deliver an event to the affected account. Implementations must not
    /// propagate failure to the caller.
    fn notify(&self, event: &WalletEvent);
}

/// Sink that drops every event. Useful for embeddings without a
/// real-time channel, and for tests that don't assert on notifications.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _event: &WalletEvent) {}
}

/// Sink that records every event in memory, for tests and audits.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<WalletEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    #[must_use]
    pub fn events(&self) -> Vec<WalletEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, event: &WalletEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
