//! Form controller shared by Passbook front ends.
//!
//! The controller holds the four form fields and the list of records on
//! display. Each user action validates the form, runs at most one store
//! mutation, re-queries, and answers with a [`Notice`] for the view to show.
//! Nothing here depends on a particular UI toolkit; the system clipboard is
//! reached through the [`Clipboard`] trait.

use crate::database::CredentialRecord;
use crate::password::{
    generate_password, parse_record_id, validate_credential, PasswordGeneratorConfig,
};
use crate::store::CredentialStore;
use crate::Result;
use tracing::{error, info};

/// Destination for "copy password"
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Message produced by a controller action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.level {
            NoticeLevel::Success => "Success",
            NoticeLevel::Info => "Info",
            NoticeLevel::Error => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// One of the four input fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Id,
    Website,
    Username,
    Password,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Id,
        FormField::Website,
        FormField::Username,
        FormField::Password,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::Website => "Website",
            FormField::Username => "Username",
            FormField::Password => "Password",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Id => FormField::Website,
            FormField::Website => FormField::Username,
            FormField::Username => FormField::Password,
            FormField::Password => FormField::Id,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Id => FormField::Password,
            FormField::Website => FormField::Id,
            FormField::Username => FormField::Website,
            FormField::Password => FormField::Username,
        }
    }
}

/// Whether the form describes a new record or an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Editing(i64),
}

/// Raw text of the four form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: String,
}

impl Form {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Website => &self.website,
            FormField::Username => &self.username,
            FormField::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Id => &mut self.id,
            FormField::Website => &mut self.website,
            FormField::Username => &mut self.username,
            FormField::Password => &mut self.password,
        }
    }

    /// `Editing` once the id field holds a number; `New` otherwise.
    ///
    /// Save stays available in both modes and always inserts.
    pub fn mode(&self) -> FormMode {
        match self.id.trim().parse::<i64>() {
            Ok(id) => FormMode::Editing(id),
            Err(_) => FormMode::New,
        }
    }

    pub fn fill_from(&mut self, record: &CredentialRecord) {
        self.id = record.id.to_string();
        self.website = record.website.clone();
        self.username = record.username.clone();
        self.password = record.password.clone();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Drives the credential form against a [`CredentialStore`]
pub struct Controller<C> {
    store: CredentialStore,
    clipboard: C,
    generator: PasswordGeneratorConfig,
    form: Form,
    records: Vec<CredentialRecord>,
    search_term: Option<String>,
}

impl<C: Clipboard> Controller<C> {
    /// Ensure the schema exists and load every record
    pub fn new(
        store: CredentialStore,
        clipboard: C,
        generator: PasswordGeneratorConfig,
    ) -> Result<Self> {
        store.ensure_schema()?;
        let records = store.list_all()?;

        Ok(Self {
            store,
            clipboard,
            generator,
            form: Form::default(),
            records,
            search_term: None,
        })
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// Records currently on display: everything, or the last search result
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    /// The search whose results are on display, if any
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Reload every record, dropping any search filter
    pub fn refresh(&mut self) -> Result<()> {
        self.records = self.store.list_all()?;
        self.search_term = None;
        Ok(())
    }

    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    /// Copy record `index` of the displayed list into the form
    pub fn select(&mut self, index: usize) -> bool {
        match self.records.get(index) {
            Some(record) => {
                self.form.fill_from(record);
                true
            }
            None => false,
        }
    }

    /// Validate the form and insert it as a new record
    pub fn save(&mut self) -> Notice {
        let credential = match validate_credential(
            &self.form.website,
            &self.form.username,
            &self.form.password,
        ) {
            Ok(credential) => credential,
            Err(e) => return Notice::error(e.to_string()),
        };

        match self.store.insert(&credential) {
            Ok(id) => {
                info!("Saved credential {}", id);
                self.form.clear();
                self.reload_then(Notice::success("Record saved successfully"))
            }
            Err(e) => {
                error!("Failed to save record: {}", e);
                Notice::error(format!("Failed to save record: {}", e))
            }
        }
    }

    /// Validate the form and overwrite the record named by its id field
    pub fn update(&mut self) -> Notice {
        let id = match parse_record_id(&self.form.id, "update") {
            Ok(id) => id,
            Err(e) => return Notice::error(e.to_string()),
        };

        let credential = match validate_credential(
            &self.form.website,
            &self.form.username,
            &self.form.password,
        ) {
            Ok(credential) => credential,
            Err(e) => return Notice::error(e.to_string()),
        };

        match self.store.update(id, &credential) {
            Ok(true) => {
                info!("Updated credential {}", id);
                self.reload_then(Notice::success("Record updated successfully"))
            }
            Ok(false) => self.reload_then(Notice::info(format!("No record with id {}", id))),
            Err(e) => {
                error!("Failed to update record {}: {}", id, e);
                Notice::error(format!("Failed to update record: {}", e))
            }
        }
    }

    /// First half of delete: the id to ask the user about
    ///
    /// An empty or non-numeric id field is reported without prompting.
    pub fn begin_delete(&self) -> std::result::Result<i64, Notice> {
        parse_record_id(&self.form.id, "delete").map_err(|e| Notice::error(e.to_string()))
    }

    /// Second half of delete, after the user confirmed
    pub fn confirm_delete(&mut self, id: i64) -> Notice {
        match self.store.delete(id) {
            Ok(deleted) => {
                let outcome = if deleted {
                    info!("Deleted credential {}", id);
                    Notice::success("Record deleted successfully")
                } else {
                    Notice::info(format!("No record with id {}", id))
                };
                self.form.clear();
                self.reload_then(outcome)
            }
            Err(e) => {
                error!("Failed to delete record {}: {}", id, e);
                Notice::error(format!("Failed to delete record: {}", e))
            }
        }
    }

    /// Replace the displayed list with records matching `term`
    pub fn search(&mut self, term: &str) -> Notice {
        let term = term.trim();
        if term.is_empty() {
            return Notice::error(crate::ValidationError::EmptySearchTerm.to_string());
        }

        match self.store.search(term) {
            Ok(results) => {
                let count = results.len();
                self.records = results;
                self.search_term = Some(term.to_string());
                if count == 0 {
                    Notice::info("No matching records found.")
                } else {
                    Notice::success(format!("Found {} matching records", count))
                }
            }
            Err(e) => {
                error!("Search failed: {}", e);
                Notice::error(format!("Search failed: {}", e))
            }
        }
    }

    /// Drop the search filter and show every record
    pub fn show_all(&mut self) -> Notice {
        if let Err(notice) = self.reload() {
            return notice;
        }
        Notice::info(format!("Showing all {} records", self.records.len()))
    }

    /// Put the password field's text on the clipboard
    pub fn copy_password(&mut self) -> Notice {
        if self.form.password.is_empty() {
            return Notice::error("Password field is empty");
        }

        match self.clipboard.set_text(&self.form.password) {
            Ok(()) => Notice::success("Password copied"),
            Err(e) => {
                error!("Clipboard copy failed: {}", e);
                Notice::error(format!("Failed to copy password: {}", e))
            }
        }
    }

    /// Fill the password field with a fresh generated password
    ///
    /// Nothing is saved until the user saves or updates.
    pub fn generate_password(&mut self) -> Notice {
        match generate_password(&self.generator) {
            Ok(password) => {
                self.form.password = password;
                Notice::success("Generated new password")
            }
            Err(e) => Notice::error(e.to_string()),
        }
    }

    fn reload(&mut self) -> std::result::Result<(), Notice> {
        self.refresh().map_err(|e| {
            error!("Failed to load records: {}", e);
            Notice::error(format!("Failed to load records: {}", e))
        })
    }

    /// `outcome` if the list reloads, the load failure otherwise
    fn reload_then(&mut self, outcome: Notice) -> Notice {
        match self.reload() {
            Ok(()) => outcome,
            Err(notice) => notice,
        }
    }
}
