use crate::known_errors::KnownErrors;
use crate::user::User;
use crate::user::UserId;
use serde::Deserialize;

/// The add/edit dialog. Editing always carries the user being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormDialog {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit(User),
}

impl FormDialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormDialog::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormDialog::OpenForEdit(_) => "Edit User",
            _ => "Add New User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormDialog::OpenForEdit(_) => "Save Changes",
            _ => "Add User",
        }
    }

    /// Where the dialog's form posts to.
    pub fn action(&self) -> String {
        match self {
            FormDialog::OpenForEdit(user) => format!("/users/{}", user.id),
            _ => "/users".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteDialog {
    #[default]
    Closed,
    Confirming(User),
}

impl DeleteDialog {
    /// The name shown in the confirmation, falling back to the id.
    pub fn display_name(user: &User) -> String {
        if user.name.is_empty() {
            format!("User ID: {}", user.id)
        } else {
            user.name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Add,
    Edit,
    Delete,
}

/// Dialog part of the dashboard query string, e.g. `?dialog=edit&id=3`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DialogQuery {
    pub dialog: Option<DialogKind>,
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub form: FormDialog,
    pub delete: DeleteDialog,
}

impl Dialogs {
    /// Opens the dialog named in the query. Edit and delete need the id of a
    /// user that `lookup` can find.
    pub fn from_query(
        query: &DialogQuery,
        lookup: impl Fn(UserId) -> Option<User>,
    ) -> Result<Self, KnownErrors> {
        let target = || -> Result<User, KnownErrors> {
            let raw = query.id.ok_or(KnownErrors::InvalidId)?;
            let id = UserId::try_new(raw)?;
            lookup(id).ok_or(KnownErrors::UserDoesntExist { id: raw })
        };

        Ok(match query.dialog {
            None => Self::default(),
            Some(DialogKind::Add) => Self {
                form: FormDialog::OpenForCreate,
                ..Self::default()
            },
            Some(DialogKind::Edit) => Self {
                form: FormDialog::OpenForEdit(target()?),
                ..Self::default()
            },
            Some(DialogKind::Delete) => Self {
                delete: DeleteDialog::Confirming(target()?),
                ..Self::default()
            },
        })
    }
}

/// Link that opens a dialog while keeping the current search.
pub fn dialog_url(kind: DialogKind, id: Option<UserId>, search: &str) -> String {
    let kind = match kind {
        DialogKind::Add => "add",
        DialogKind::Edit => "edit",
        DialogKind::Delete => "delete",
    };

    let mut url = format!("/?dialog={kind}");
    if let Some(id) = id {
        url.push_str(&format!("&id={id}"));
    }
    if !search.is_empty() {
        url.push_str(&format!("&q={}", urlencoding::encode(search)));
    }
    url
}

/// The dashboard with every dialog closed.
pub fn closed_url(search: &str) -> String {
    if search.is_empty() {
        "/".to_owned()
    } else {
        format!("/?q={}", urlencoding::encode(search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User {
            id: UserId::try_new(1).expect("positive id"),
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            username: "alice".to_owned(),
        }
    }

    fn lookup(id: UserId) -> Option<User> {
        (id.into_inner() == 1).then(alice)
    }

    fn query(dialog: Option<DialogKind>, id: Option<u64>) -> DialogQuery {
        DialogQuery { dialog, id }
    }

    #[test]
    fn test_no_dialog_means_closed() {
        let dialogs = Dialogs::from_query(&query(None, Some(1)), lookup).expect("closed");
        assert_eq!(dialogs, Dialogs::default());
    }

    #[test]
    fn test_add_opens_empty_form() {
        let dialogs = Dialogs::from_query(&query(Some(DialogKind::Add), None), lookup)
            .expect("add dialog");

        assert_eq!(dialogs.form, FormDialog::OpenForCreate);
        assert_eq!(dialogs.form.title(), "Add New User");
        assert_eq!(dialogs.form.action(), "/users");
        assert_eq!(dialogs.delete, DeleteDialog::Closed);
    }

    #[test]
    fn test_edit_carries_user() {
        let dialogs = Dialogs::from_query(&query(Some(DialogKind::Edit), Some(1)), lookup)
            .expect("edit dialog");

        assert_eq!(dialogs.form, FormDialog::OpenForEdit(alice()));
        assert_eq!(dialogs.form.submit_label(), "Save Changes");
        assert_eq!(dialogs.form.action(), "/users/1");
    }

    #[test]
    fn test_edit_of_unknown_user_is_an_error() {
        let err = Dialogs::from_query(&query(Some(DialogKind::Edit), Some(5)), lookup)
            .expect_err("unknown user");
        assert_eq!(err, KnownErrors::UserDoesntExist { id: 5 });

        let err = Dialogs::from_query(&query(Some(DialogKind::Delete), Some(0)), lookup)
            .expect_err("zero id");
        assert_eq!(err, KnownErrors::InvalidId);

        let err = Dialogs::from_query(&query(Some(DialogKind::Delete), None), lookup)
            .expect_err("missing id");
        assert_eq!(err, KnownErrors::InvalidId);
    }

    #[test]
    fn test_delete_confirms_user() {
        let dialogs = Dialogs::from_query(&query(Some(DialogKind::Delete), Some(1)), lookup)
            .expect("delete dialog");

        assert_eq!(dialogs.delete, DeleteDialog::Confirming(alice()));
        assert!(!dialogs.form.is_open());
    }

    #[test]
    fn test_urls_keep_search() {
        let id = UserId::try_new(3).expect("positive id");

        assert_eq!(
            dialog_url(DialogKind::Edit, Some(id), "ali ce"),
            "/?dialog=edit&id=3&q=ali%20ce"
        );
        assert_eq!(dialog_url(DialogKind::Add, None, ""), "/?dialog=add");
        assert_eq!(closed_url(""), "/");
        assert_eq!(closed_url("bob"), "/?q=bob");
    }
}
