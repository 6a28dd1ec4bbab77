//! User data model.
//!
//! Users are plain records: the backend assigns `id`, and no field carries
//! validation rules.

use serde::{Deserialize, Serialize};

/// Backend-assigned user identifier.
pub type UserId = i64;

/// Application user as stored by the persistence backend.
///
/// # Examples
/// ```
/// use crud_backend::domain::User;
///
/// let user = User::new(1, "Alice", "alice@example.com");
/// assert_eq!(user.name, "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier assigned on insert.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

impl User {
    /// Build a user record from its parts.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Insert payload for a user whose identifier is not yet known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
}

impl NewUser {
    /// Build an insert payload.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attach a backend-assigned identifier, producing the stored record.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn user_serialises_with_plain_field_names() {
        let user = User::new(7, "Alice", "alice@example.com");
        let value = serde_json::to_value(&user).expect("user serialises");
        assert_eq!(
            value,
            json!({ "id": 7, "name": "Alice", "email": "alice@example.com" })
        );
    }

    #[test]
    fn empty_fields_are_accepted() {
        let user: User =
            serde_json::from_value(json!({ "id": 1, "name": "", "email": "" })).expect("decodes");
        assert!(user.name.is_empty());
        assert_eq!(serde_json::to_value(&user).expect("encodes")["id"], Value::from(1));
    }

    #[test]
    fn into_user_keeps_payload_fields() {
        let user = NewUser::new("Bob", "bob@example.com").into_user(2);
        assert_eq!(user, User::new(2, "Bob", "bob@example.com"));
    }
}
