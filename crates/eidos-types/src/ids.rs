//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Knowledge units, kernels, swarms and participants each get their own
//! newtype so identifiers cannot be mixed up at compile time. All IDs use
//! UUID v7 (time-ordered), which keeps freshly created units sortable by
//! creation order when printed or persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// First `n` hex characters of the simple (hyphen-free) form.
            ///
            /// Used for short human-readable labels in logs and default names.
            pub fn short(&self, n: usize) -> String {
                self.0.simple().to_string().chars().take(n).collect()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
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
    /// Unique identifier for a knowledge unit in an evolutionary store.
    UnitId
}

define_id! {
    /// Unique identifier for an evolutionary store (memetic kernel) instance.
    KernelId
}

define_id! {
    /// Unique identifier for a swarm participant.
    ParticipantId
}

define_id! {
    /// Unique identifier for a consensus record.
    RecordId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let unit = UnitId::new();
        let participant = ParticipantId::new();
        // Different types -- the compiler enforces no mixing.
        assert_ne!(unit.into_inner(), Uuid::nil());
        assert_ne!(participant.into_inner(), Uuid::nil());
    }

    #[test]
    fn ids_are_time_ordered() {
        let first = UnitId::new();
        let second = UnitId::new();
        assert!(first < second);
    }

    #[test]
    fn short_label_takes_prefix() {
        let id = ParticipantId::from(Uuid::nil());
        assert_eq!(id.short(4), "0000");
        assert_eq!(ParticipantId::new().short(8).len(), 8);
    }

    #[test]
    fn id_serializes_as_plain_uuid() {
        let id = KernelId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{}\"", id.0));
    }
}
