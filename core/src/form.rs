//! The comment compose form.
//!
//! Validation runs only on submit. A valid submit hands the draft out and
//! clears the fields straight away; `sending` stays set until the host reports
//! that the create call settled.

use crate::types::CommentData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Body,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Body];

    pub fn error_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::Body => "Enter some text",
        }
    }
}

/// The fields that failed validation on the last submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: bool,
    pub email: bool,
    pub body: bool,
}

impl FieldErrors {
    pub fn any(&self) -> bool {
        self.name || self.email || self.body
    }

    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Body => self.body,
        }
    }

    fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name = false,
            Field::Email => self.email = false,
            Field::Body => self.body = false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    name: String,
    email: String,
    body: String,
    errors: FieldErrors,
    sending: bool,
    send_failed: bool,
}

impl CommentForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Body => &self.body,
        }
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn send_failed(&self) -> bool {
        self.send_failed
    }

    /// Editing a field clears that field's error flag only.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Body => self.body = value,
        }
        self.errors.clear(field);
        self.send_failed = false;
    }

    /// On success the form is already empty when this returns.
    pub fn submit(&mut self) -> Result<CommentData, FieldErrors> {
        self.send_failed = false;
        self.errors = FieldErrors {
            name: self.name.trim().is_empty(),
            email: self.email.trim().is_empty(),
            body: self.body.trim().is_empty(),
        };
        if self.errors.any() {
            return Err(self.errors);
        }

        let draft = CommentData {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            body: self.body.trim().to_string(),
        };
        self.sending = true;
        self.clear();
        Ok(draft)
    }

    /// The create call resolved. The draft is not restored on failure.
    pub fn settle(&mut self, succeeded: bool) {
        self.sending = false;
        self.send_failed = !succeeded;
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.body.clear();
        self.errors = FieldErrors::default();
    }
}
