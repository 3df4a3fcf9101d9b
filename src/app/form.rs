//! Create/edit form state.
//!
//! The form keeps its own working copy of the record. Validation runs only on
//! submit; failing fields keep their message until the next submit.
use crate::model::UserRecord;
use crate::validate::{self, FieldPath, ValidationErrors};

/// Rows of the form, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Username,
    Street,
    City,
    Company,
    Website,
    Submit,
}

pub const FORM_FIELDS: [FormField; 9] = [
    FormField::Name,
    FormField::Email,
    FormField::Phone,
    FormField::Username,
    FormField::Street,
    FormField::City,
    FormField::Company,
    FormField::Website,
    FormField::Submit,
];

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Username => "Username",
            FormField::Street => "Street",
            FormField::City => "City",
            FormField::Company => "Company Name (Optional)",
            FormField::Website => "Website (Optional)",
            FormField::Submit => "Submit",
        }
    }

    /// Username is derived and Submit is a button.
    pub fn is_editable(self) -> bool {
        !matches!(self, FormField::Username | FormField::Submit)
    }

    pub fn path(self) -> Option<FieldPath> {
        match self {
            FormField::Name => Some(FieldPath::Name),
            FormField::Email => Some(FieldPath::Email),
            FormField::Phone => Some(FieldPath::Phone),
            FormField::Street => Some(FieldPath::Street),
            FormField::City => Some(FieldPath::City),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FormState {
    /// The record being edited; `None` in create mode.
    pub prefilled: Option<UserRecord>,
    pub draft: UserRecord,
    pub errors: ValidationErrors,
    pub focus: usize,
}

impl FormState {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(record: UserRecord) -> Self {
        let mut form = Self::default();
        form.set_prefilled(Some(record));
        form
    }

    /// Overwrite the working copy wholesale when a record is supplied.
    /// `None` leaves the current working copy untouched.
    pub fn set_prefilled(&mut self, record: Option<UserRecord>) {
        if let Some(record) = record {
            self.draft = record.clone();
            self.prefilled = Some(record);
        }
    }

    pub fn is_edit(&self) -> bool {
        self.prefilled.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() { "Edit User" } else { "Add User" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() { "Update User" } else { "Create User" }
    }

    /// Existing username when editing, otherwise `USER-<first word of name>`.
    pub fn display_username(&self) -> String {
        match &self.prefilled {
            Some(p) if !p.username.is_empty() => p.username.clone(),
            _ => UserRecord::synthesized_username(&self.draft.name),
        }
    }

    pub fn focused(&self) -> FormField {
        FORM_FIELDS[self.focus.min(FORM_FIELDS.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FORM_FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FORM_FIELDS.len() - 1) % FORM_FIELDS.len();
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.draft.name.clone(),
            FormField::Email => self.draft.email.clone(),
            FormField::Phone => self.draft.phone.clone(),
            FormField::Username => self.display_username(),
            FormField::Street => self.draft.address.street.clone(),
            FormField::City => self.draft.address.city.clone(),
            FormField::Company => self.draft.company.name.clone(),
            FormField::Website => self.draft.website.clone(),
            FormField::Submit => String::new(),
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Phone => Some(&mut self.draft.phone),
            FormField::Street => Some(&mut self.draft.address.street),
            FormField::City => Some(&mut self.draft.address.city),
            FormField::Company => Some(&mut self.draft.company.name),
            FormField::Website => Some(&mut self.draft.website),
            FormField::Username | FormField::Submit => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        let field = self.focused();
        if let Some(v) = self.value_mut(field) {
            v.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(v) = self.value_mut(field) {
            v.pop();
        }
    }

    pub fn error_for(&self, field: FormField) -> Option<&'static str> {
        field.path().and_then(|p| self.errors.get(p))
    }

    /// Validate the working copy. On success returns the record to send, with
    /// `username` resolved; on failure stores the messages and returns `None`.
    pub fn submit(&mut self) -> Option<UserRecord> {
        self.errors = validate::validate(&self.draft);
        if !self.errors.is_empty() {
            return None;
        }
        let mut record = self.draft.clone();
        record.username = self.display_username();
        Some(record)
    }
}
