use bobiare_common::Secret;

use crate::helpers::is_valid_email;

#[derive(Debug, Clone, Default)]
pub struct NewUserAccount {
    pub email: String,
    pub password: Secret<String>,
    pub is_admin: bool,
}

impl NewUserAccount {
    pub fn new<S: Into<String>>(email: S, password: Secret<String>) -> Self {
        Self { email: email.into(), password, is_admin: false }
    }

    pub fn admin<S: Into<String>>(email: S, password: Secret<String>) -> Self {
        Self { email: email.into(), password, is_admin: true }
    }

    /// Lower-cased, trimmed email. Accounts are keyed on this.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Returns a description of the first problem with these details, if any.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_email(self.email.trim()) {
            return Err(format!("'{}' is not a valid email address", self.email));
        }
        if self.password.is_empty() {
            return Err("The password cannot be empty".into());
        }
        Ok(())
    }
}

/// An image attached to the add-product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// The name of the file on the admin's machine. Only its extension is kept.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn extension(&self) -> Option<&str> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        (!ext.is_empty()).then_some(ext)
    }
}
