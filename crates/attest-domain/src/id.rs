//! Aggregate identifiers
//!
//! One newtype per aggregate, wrapping a UUIDv7. UUIDv7 keeps identifiers
//! chronologically sortable without any coordination between writers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Get the inner UUID.
            pub fn into_inner(self) -> Uuid {
                self.0
            }

            /// Parse an identifier from its string form.
            pub fn parse(s: &str) -> Result<Self, String> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| format!("Invalid identifier: {}", e))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a compliance framework.
    FrameworkId
}

define_id! {
    /// Unique identifier for a control.
    ControlId
}

define_id! {
    /// Unique identifier for an evidence record.
    EvidenceId
}

define_id! {
    /// Unique identifier for a risk.
    RiskId
}

define_id! {
    /// Unique identifier for a risk treatment.
    TreatmentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_uuid_roundtrip() {
        let id = ControlId::new();
        let uuid: Uuid = id.into();
        let back: ControlId = uuid.into();
        assert_eq!(id, back);
    }

    #[test]
    fn test_id_string_roundtrip() {
        let id = RiskId::new();
        let parsed = RiskId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_invalid_string() {
        assert!(FrameworkId::parse("not-a-uuid").is_err());
        assert!(FrameworkId::parse("").is_err());
    }

    #[test]
    fn test_ids_sort_chronologically() {
        // UUIDv7 carries a millisecond timestamp in its top bits
        let id1 = EvidenceId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = EvidenceId::new();
        assert!(id1 < id2);
    }
}
