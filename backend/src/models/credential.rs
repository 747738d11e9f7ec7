use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{deserialize_some, normalize_text, patch_text};
use crate::types::CredentialId;
use crate::validation::rules::validate_not_blank;

text_enum! {
    /// Credential categories accepted by the `credentials.credential_type` check constraint.
    pub enum CredentialType {
        Password => "password",
        ApiKey => "api_key",
        SshKey => "ssh_key",
        Certificate => "certificate",
        Other => "other",
    }
}

/// Stored credential. The secret is kept in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Credential {
    pub id: CredentialId,
    pub name: String,
    pub credential_type: CredentialType,
    pub username: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// List view of a credential without the secret.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CredentialSummary {
    pub id: CredentialId,
    pub name: String,
    pub credential_type: CredentialType,
    pub username: Option<String>,
    pub has_password: bool,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

impl From<Credential> for CredentialSummary {
    fn from(value: Credential) -> Self {
        Self {
            id: value.id,
            name: value.name,
            credential_type: value.credential_type,
            username: value.username,
            has_password: value.password.is_some(),
            url: value.url,
            notes: value.notes,
            last_updated: value.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCredential {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    pub credential_type: CredentialType,
    #[validate(length(max = 255))]
    pub username: Option<String>,
    pub password: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl CreateCredential {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            username: normalize_text(self.username),
            // secrets are stored as given; only an empty value is dropped
            password: self.password.filter(|p| !p.is_empty()),
            url: normalize_text(self.url),
            notes: normalize_text(self.notes),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCredential {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    pub credential_type: Option<CredentialType>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 255))]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub password: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    #[validate(url)]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl Credential {
    pub fn apply(&mut self, patch: UpdateCredential) {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(credential_type) = patch.credential_type {
            self.credential_type = credential_type;
        }
        patch_text(&mut self.username, patch.username);
        if let Some(password) = patch.password {
            self.password = password.filter(|p| !p.is_empty());
        }
        patch_text(&mut self.url, patch.url);
        patch_text(&mut self.notes, patch.notes);
    }
}
