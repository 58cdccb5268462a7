use serde::Deserialize;
use serde::Serialize;

/// The editable part of a user, as typed into the add/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub username: Option<&'static str>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.username.is_none()
    }
}

impl UserFormValues {
    /// Checks the required fields and returns the trimmed values.
    ///
    /// A field holding only whitespace counts as empty.
    pub fn validate(self) -> Result<Self, FormErrors> {
        let values = Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            username: self.username.trim().to_owned(),
        };

        let errors = FormErrors {
            name: values.name.is_empty().then_some("Name is required"),
            email: values.email.is_empty().then_some("Email is required"),
            username: values.username.is_empty().then_some("Username is required"),
        };

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(errors)
        }
    }
}
