pub mod form;
pub mod search;
pub mod store;

pub use form::FormErrors;
pub use form::UserFormValues;
pub use search::filter_users;
pub use store::RecordStore;

use nutype::nutype;
use serde::Deserialize;
use serde::Serialize;

/// Identity of a user record. Always positive, whether the remote API assigned
/// it or the cache synthesized it ahead of confirmation.
#[nutype(
    validate(greater = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        Hash,
        Display,
        Serialize,
        Deserialize,
        TryFrom,
        Into
    )
)]
pub struct UserId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl User {
    pub fn from_form(id: UserId, values: UserFormValues) -> Self {
        Self {
            id,
            name: values.name,
            email: values.email,
            username: values.username,
        }
    }

    pub fn form_values(&self) -> UserFormValues {
        UserFormValues {
            name: self.name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }
}
