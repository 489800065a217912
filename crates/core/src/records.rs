//! Reviews, contact messages and admin accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AdminUserId, ContactId, Email, ReviewId};

/// A guest review shown on the home page when visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub name: String,
    pub dish: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub text: String,
    pub image: Option<String>,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

/// A message left through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_subject")]
    pub subject: String,
    pub message: String,
}

fn default_subject() -> String {
    "General Inquiry".to_owned()
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,
    #[error("message is required")]
    MissingMessage,
}

impl NewContact {
    /// Trim the submission and fill the default subject.
    ///
    /// # Errors
    ///
    /// Fails when the name or message is blank.
    pub fn validated(mut self) -> Result<Self, ContactError> {
        self.name = self.name.trim().to_owned();
        self.message = self.message.trim().to_owned();
        self.subject = self.subject.trim().to_owned();
        self.phone = self
            .phone
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        if self.name.is_empty() {
            return Err(ContactError::MissingName);
        }
        if self.message.is_empty() {
            return Err(ContactError::MissingMessage);
        }
        if self.subject.is_empty() {
            self.subject = default_subject();
        }
        Ok(self)
    }

    /// Stored record, unread.
    #[must_use]
    pub fn into_contact(self, id: ContactId, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            is_read: false,
            created_at,
        }
    }
}

/// An admin login. The hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminAccount {
    pub id: AdminUserId,
    pub email: Email,
    pub name: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for an admin account; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub email: Email,
    pub name: String,
    pub password_hash: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_defaults_and_unread() {
        let form: NewContact = serde_json::from_str(
            r#"{"name":"Rui","email":"rui@example.pt","phone":" ","message":"Do you cater?"}"#,
        )
        .unwrap();
        let contact = form
            .validated()
            .unwrap()
            .into_contact(ContactId::new(1), Utc::now());

        assert_eq!(contact.subject, "General Inquiry");
        assert_eq!(contact.phone, None);
        assert!(!contact.is_read);
    }

    #[test]
    fn test_contact_requires_message() {
        let form = NewContact {
            name: "Rui".to_owned(),
            email: Email::parse("rui@example.pt").unwrap(),
            phone: None,
            subject: "Events".to_owned(),
            message: "   ".to_owned(),
        };
        assert_eq!(form.validated(), Err(ContactError::MissingMessage));
    }

    #[test]
    fn test_admin_hash_is_not_serialized() {
        let admin = AdminAccount {
            id: AdminUserId::new(1),
            email: Email::parse("chef@nossosushi.pt").unwrap(),
            name: "Chef".to_owned(),
            password_hash: "$argon2id$secret".to_owned(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&admin).unwrap();
        assert!(!json.contains("argon2"));
    }
}
