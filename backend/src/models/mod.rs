//! Data models shared across database access and API handlers.

use serde::{Deserialize, Deserializer};

/// Error returned when a stored or submitted enum value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a string-backed enum stored as `TEXT` (guarded by a `CHECK`
/// constraint) and exchanged as the same snake_case string over JSON.
macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::models::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(crate::models::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <&str as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let raw = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(raw.parse::<$name>()?)
            }
        }
    };
}

/// Implements [`InventoryItem`] for a registry model with the usual field names.
macro_rules! inventory_item {
    ($model:ty, $create:ty, $update:ty, $variant:ident) => {
        impl crate::models::item::InventoryItem for $model {
            type Create = $create;
            type Update = $update;

            fn item_ref(&self) -> crate::models::item::ItemRef {
                crate::models::item::ItemRef::$variant(self.id)
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn status(&self) -> crate::models::item::ItemStatus {
                self.status
            }

            fn set_status(&mut self, status: crate::models::item::ItemStatus) {
                self.status = status;
            }

            fn apply_patch(&mut self, patch: $update) {
                self.apply(patch);
            }

            fn normalize(payload: $create) -> $create {
                payload.normalized()
            }

            fn create_status(payload: &$create) -> Option<crate::models::item::ItemStatus> {
                payload.status
            }

            fn patch_status(patch: &$update) -> Option<crate::models::item::ItemStatus> {
                patch.status
            }
        }
    };
}

pub mod activity_log;
pub mod actor;
pub mod assignment;
pub mod credential;
pub mod dashboard;
pub mod general_inventory;
pub mod hardware;
pub mod item;
pub mod network_device;
pub mod vlan;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Trims free text and turns blank values into `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Applies a nullable text patch: absent keeps, `null` or blank clears.
pub fn patch_text(target: &mut Option<String>, patch: Option<Option<String>>) {
    if let Some(value) = patch {
        *target = normalize_text(value);
    }
}

/// Applies a nullable non-text patch: absent keeps, `null` clears.
pub fn patch_value<T>(target: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *target = value;
    }
}
