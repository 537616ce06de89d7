//! Verified identity capability.
//!
//! The ledger core never reads ambient request state. Callers obtain an
//! `Identity` from the authentication layer and pass it explicitly into
//! each privileged operation; the core trusts the `account_id` as given.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Result, WalletError};

/// Role carried by a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
}

/// A verified (account, role) pair, as yielded by the identity capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub account_id: AccountId,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn user(account_id: AccountId) -> Self {
        Self {
            account_id,
            role: Role::User,
        }
    }

    #[must_use]
    pub fn admin(account_id: AccountId) -> Self {
        Self {
            account_id,
            role: Role::Admin,
        }
    }

    /// Require the admin capability, yielding the admin's account id.
    ///
    /// # Errors
    /// Returns `Unauthorized` for non-admin identities.
    pub fn require_admin(&self) -> Result<AccountId> {
        if self.role == Role::Admin {
            Ok(self.account_id)
        } else {
            Err(WalletError::Unauthorized {
                reason: "admin role required".to_string(),
            })
        }
    }
}
