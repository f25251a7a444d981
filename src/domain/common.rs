use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Millisecond-timestamp identifier for ledger entries.
///
/// Besides uniqueness, the id doubles as a recency key: entries minted later
/// carry a numerically larger id. Two entries minted within the same
/// millisecond collide; the store never guards against that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Mints an id from the instant's millisecond timestamp.
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric view of the id, for recency comparisons.
    pub fn as_millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &EntryId;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn id_reflects_millisecond_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let id = EntryId::from_timestamp(at);
        assert_eq!(id.as_millis(), Some(at.timestamp_millis()));
    }

    #[test]
    fn later_instants_mint_larger_ids() {
        let earlier = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let later = earlier + chrono::Duration::milliseconds(7);
        let a = EntryId::from_timestamp(earlier);
        let b = EntryId::from_timestamp(later);
        assert!(b.as_millis() > a.as_millis());
    }
}
