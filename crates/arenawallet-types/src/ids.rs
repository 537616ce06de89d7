//! Globally unique identifiers used throughout ArenaWallet.
//!
//! All entity IDs use UUIDv7 for time-ordered lexicographic sorting,
//! except `EntryId` which is derived deterministically from the
//! (account, match) pair it belongs to.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Unique identifier for a user's wallet account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RequestId
// ---------------------------------------------------------------------------

/// Unique identifier for a deposit/withdraw fund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// MatchId
// ---------------------------------------------------------------------------

/// Unique identifier for a tournament match in the external catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "match:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EntryId
// ---------------------------------------------------------------------------

/// Unique identifier for a paid match entry.
///
/// Derived deterministically from the (account, match) pair, so the same
/// pair always maps to the same entry. This is what makes duplicate joins
/// a cheap key collision rather than a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    #[must_use]
    pub fn for_entry(account_id: AccountId, match_id: MatchId) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"arenawallet:entry_id:v1:");
        hasher.update(account_id.0.as_bytes());
        hasher.update(match_id.0.as_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_uniqueness() {
        let a = AccountId::new();
        let b = AccountId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn request_id_ordering() {
        let a = RequestId::new();
        let b = RequestId::new();
        assert!(a < b);
    }

    #[test]
    fn entry_id_deterministic() {
        let acct = AccountId::new();
        let m = MatchId::new();
        let a = EntryId::for_entry(acct, m);
        let b = EntryId::for_entry(acct, m);
        assert_eq!(a, b);

        let other = EntryId::for_entry(AccountId::new(), m);
        assert_ne!(a, other);
    }

    #[test]
    fn serde_roundtrips() {
        let aid = AccountId::new();
        let json = serde_json::to_string(&aid).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(aid, back);

        let rid = RequestId::new();
        let json = serde_json::to_string(&rid).unwrap();
        let back: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(rid, back);
    }
}
