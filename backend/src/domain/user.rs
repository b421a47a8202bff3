//! User record model.
//!
//! A [`User`] is a numeric [`UserId`] plus a mutable [`UserProfile`]. The
//! serialised shape is flat camelCase JSON matching the seed source:
//!
//! ```json
//! {"id": 1, "name": "Leanne Graham", "company": {"catchPhrase": "..."}}
//! ```
//!
//! Every profile field except `name` is optional and omitted when absent.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors raised for user profiles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The name is empty or whitespace only.
    #[error("Name is required")]
    BlankName,
}

/// Numeric user identifier assigned by storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = u32, example = 1)]
pub struct UserId(u32);

impl UserId {
    /// Identifier handed out when storage holds no users.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The identifier following this one, or `None` once `u32` is exhausted.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for UserId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Geographic coordinates attached to an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "-37.3159")]
    pub lat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "81.1496")]
    pub lng: Option<String>,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Kulas Light")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Apt. 556")]
    pub suite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Gwenborough")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "92998-3874")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

/// Employer details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Romaguera-Crona")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Multi-layered client-server neural-net")]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "harness real-time e-markets")]
    pub bs: Option<String>,
}

/// Every user field except the identifier.
///
/// Updates replace the whole profile, so an omitted optional field clears the
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    #[schema(example = "Leanne Graham")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Bret")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Sincere@april.biz")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "1-770-736-8031 x56442")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "hildegard.org")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

impl UserProfile {
    /// Profile carrying only a name.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::UserProfile;
    ///
    /// let profile = UserProfile::named("Ann");
    /// assert_eq!(profile.name, "Ann");
    /// assert!(profile.email.is_none());
    /// ```
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Reject profiles whose name is empty once trimmed.
    ///
    /// # Errors
    /// Returns [`UserValidationError::BlankName`] for blank names.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        Ok(())
    }
}

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(flatten)]
    profile: UserProfile,
}

impl User {
    /// Build a user from an identifier and profile.
    #[must_use]
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Storage-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Mutable user details.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.profile.name.as_str()
    }

    /// Overwrite every field except the identifier.
    pub fn replace_profile(&mut self, profile: UserProfile) {
        self.profile = profile;
    }
}
