//! Typed ID wrappers for compile-time type safety.
//!
//! Every table uses a `BIGSERIAL` primary key, so ids are only unique within
//! their own table. Wrapping them keeps a hardware id from being passed where
//! a network device id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            sqlx::Type, utoipa::ToSchema,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database id.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw database id.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(HardwareId, "Identifier of a hardware row.");
typed_id!(NetworkDeviceId, "Identifier of a network device row.");
typed_id!(GeneralInventoryId, "Identifier of a general inventory row.");
typed_id!(VlanId, "Identifier of a VLAN row.");
typed_id!(CredentialId, "Identifier of a credential row.");
typed_id!(AssignmentId, "Identifier of an assignment ledger row.");
typed_id!(ActivityLogId, "Identifier of an activity log entry.");
