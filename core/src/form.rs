//! Two-field user form: name and email.
//!
//! The form owns its field values. The view tells it which user is being
//! edited through `sync`, which only refills the fields when the edited
//! user's identity changes, so typing survives unrelated re-renders.

use std::fmt;

use thiserror::Error;

use crate::types::{CreateUser, User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "Name"),
            Field::Email => write!(f, "Email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(Field),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    name: String,
    email: String,
    identity: Option<UserId>,
    error: Option<FormError>,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the form at `user` (edit mode) or at nothing (create mode).
    ///
    /// Fields are refilled or cleared only when the identity differs from the
    /// last one synced; returns whether that happened.
    pub fn sync(&mut self, user: Option<&User>) -> bool {
        let identity = user.map(|u| u.id);
        if identity == self.identity {
            return false;
        }
        self.identity = identity;
        self.error = None;
        match user {
            Some(user) => {
                self.name = user.name.clone();
                self.email = user.email.clone();
            }
            None => {
                self.name.clear();
                self.email.clear();
            }
        }
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
        }
        if self.error == Some(FormError::Required(field)) {
            self.error = None;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_editing(&self) -> bool {
        self.identity.is_some()
    }

    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    /// Capture the current values. Both fields must be non-blank; the email
    /// format is left to the server.
    pub fn submit(&mut self) -> Result<CreateUser, FormError> {
        let missing = [(Field::Name, &self.name), (Field::Email, &self.email)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field);
        if let Some(field) = missing {
            let error = FormError::Required(field);
            self.error = Some(error.clone());
            return Err(error);
        }
        self.error = None;
        Ok(CreateUser {
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }

    pub fn render(&self, loading: bool) -> FormView {
        let submit_label = if loading {
            "Saving..."
        } else if self.is_editing() {
            "Update"
        } else {
            "Create"
        };
        FormView {
            title: if self.is_editing() { "Edit User" } else { "New User" }.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            submit_label: submit_label.to_string(),
            submit_enabled: !loading,
            cancel_enabled: !loading,
            error: self.error.as_ref().map(ToString::to_string),
        }
    }
}

/// Render model of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub name: String,
    pub email: String,
    pub submit_label: String,
    pub submit_enabled: bool,
    pub cancel_enabled: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn sync_prefills_and_clears() {
        let mut form = UserForm::new();
        assert!(form.sync(Some(&ana())));
        assert_eq!(form.name(), "Ana");
        assert_eq!(form.email(), "ana@x.com");
        assert!(form.is_editing());

        assert!(form.sync(None));
        assert_eq!(form.name(), "");
        assert_eq!(form.email(), "");
        assert!(!form.is_editing());
    }

    #[test]
    fn sync_with_same_identity_keeps_edits() {
        let mut form = UserForm::new();
        form.sync(Some(&ana()));
        form.set(Field::Name, "Ana Maria");

        let mut refreshed = ana();
        refreshed.updated_at = Some("2024-05-01 10:00:00".to_string());
        assert!(!form.sync(Some(&refreshed)));
        assert_eq!(form.name(), "Ana Maria");
    }

    #[test]
    fn sync_to_another_user_refills() {
        let mut form = UserForm::new();
        form.sync(Some(&ana()));
        form.set(Field::Email, "typo@");
        let mut bo = ana();
        bo.id = 2;
        bo.name = "Bo".to_string();
        bo.email = "bo@x.com".to_string();
        assert!(form.sync(Some(&bo)));
        assert_eq!(form.email(), "bo@x.com");
    }

    #[test]
    fn submit_requires_both_fields() {
        let mut form = UserForm::new();
        assert_eq!(form.submit(), Err(FormError::Required(Field::Name)));
        form.set(Field::Name, "Bob");
        form.set(Field::Email, "   ");
        assert_eq!(form.submit(), Err(FormError::Required(Field::Email)));
        assert_eq!(form.render(false).error.as_deref(), Some("Email is required"));

        form.set(Field::Email, "not-an-email");
        let out = form.submit().unwrap();
        assert_eq!(out.name, "Bob");
        assert_eq!(out.email, "not-an-email");
        assert!(form.error().is_none());
    }

    #[test]
    fn render_labels_follow_mode_and_loading() {
        let mut form = UserForm::new();
        let view = form.render(false);
        assert_eq!(view.title, "New User");
        assert_eq!(view.submit_label, "Create");
        assert!(view.submit_enabled);

        form.sync(Some(&ana()));
        let view = form.render(false);
        assert_eq!(view.title, "Edit User");
        assert_eq!(view.submit_label, "Update");

        let view = form.render(true);
        assert_eq!(view.submit_label, "Saving...");
        assert!(!view.submit_enabled);
        assert!(!view.cancel_enabled);
    }
}
