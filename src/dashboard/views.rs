use super::layout::layout;
use crate::cache::LoadState;
use crate::dialog::DeleteDialog;
use crate::dialog::DialogKind;
use crate::dialog::DialogQuery;
use crate::dialog::Dialogs;
use crate::dialog::FormDialog;
use crate::dialog::closed_url;
use crate::dialog::dialog_url;
use crate::gateway::GatewayError;
use crate::gateway::UserGateway;
use crate::known_errors::KnownErrors;
use crate::known_errors::RedirectOnError;
use crate::known_errors::UrlError;
use crate::notification::Notification;
use crate::notification::Severity;
use crate::service::Service;
use crate::user::FormErrors;
use crate::user::User;
use crate::user::UserFormValues;
use axum::extract::Query;
use axum::extract::State;
use axum::response::Redirect;
use maud::Markup;
use maud::html;
use serde::Deserialize;
use std::time::Duration;

const INPUT_CLASS: &str = "block w-full rounded-md bg-white px-3 py-1.5 text-base text-gray-900 outline-1 -outline-offset-1 outline-gray-300 placeholder:text-gray-400 focus:outline-2 focus:-outline-offset-2 focus:outline-indigo-600 sm:text-sm/6 dark:bg-white/5 dark:text-white dark:outline-white/10 dark:placeholder:text-gray-500 dark:focus:outline-indigo-500";

const INVALID_INPUT_CLASS: &str = "block w-full rounded-md bg-white px-3 py-1.5 text-base text-gray-900 outline-2 -outline-offset-1 outline-red-500 placeholder:text-gray-400 focus:outline-2 focus:-outline-offset-2 focus:outline-red-600 sm:text-sm/6 dark:bg-white/5 dark:text-white dark:outline-red-400";

const PRIMARY_BUTTON_CLASS: &str = "rounded-md bg-indigo-600 px-3 py-1.5 text-sm/6 font-semibold text-white shadow-xs hover:bg-indigo-500 focus-visible:outline-2 focus-visible:outline-offset-2 focus-visible:outline-indigo-600 dark:bg-indigo-500 dark:shadow-none dark:hover:bg-indigo-400 dark:focus-visible:outline-indigo-500";

const DANGER_BUTTON_CLASS: &str = "rounded-md bg-red-600 px-3 py-1.5 text-sm/6 font-semibold text-white shadow-xs hover:bg-red-500 dark:bg-red-500 dark:hover:bg-red-400";

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// What the add/edit dialog shows in its fields.
#[derive(Debug, Clone, Default)]
pub(crate) struct FormState {
    pub values: UserFormValues,
    pub errors: FormErrors,
}

impl FormState {
    pub fn prefilled(dialog: &FormDialog) -> Self {
        match dialog {
            FormDialog::OpenForEdit(user) => Self {
                values: user.form_values(),
                errors: FormErrors::default(),
            },
            _ => Self::default(),
        }
    }
}

pub async fn dashboard_page<G>(
    State(state): State<Service<G>>,
    Query(search): Query<SearchQuery>,
    Query(dialog): Query<DialogQuery>,
    Query(err): Query<UrlError>,
) -> Result<Markup, Redirect>
where
    G: UserGateway,
{
    let load_state = state.users_load().await;

    let dialogs = Dialogs::from_query(&dialog, |id| state.user_get(id))
        .or_redirect(&closed_url(&search.q))?;

    let form = FormState::prefilled(&dialogs.form);

    Ok(render_dashboard(
        &state,
        &load_state,
        &search.q,
        &dialogs,
        &form,
        err.known().as_ref(),
    ))
}

pub(crate) fn render_dashboard<G>(
    state: &Service<G>,
    load_state: &LoadState,
    search: &str,
    dialogs: &Dialogs,
    form: &FormState,
    error: Option<&KnownErrors>,
) -> Markup
where
    G: UserGateway,
{
    let users = state.users_matching(search);
    let notification = state.notification_current();

    let content = html! {
        div class="flex justify-between items-center" {
            h1 class="text-2xl font-bold tracking-tight text-gray-900 dark:text-white" {
                "User Management Dashboard"
            }
            a href=(dialog_url(DialogKind::Add, None, search)) class=(PRIMARY_BUTTON_CLASS) {
                "Add User"
            }
        }

        form action="/" method="get" {
            label for="q" class="block text-sm/6 font-medium text-gray-900 dark:text-gray-100" {
                "Search users by Name, Username, or Email"
            }
            div class="mt-2" {
                input id="q" type="search" name="q" value=(search) class=(INPUT_CLASS);
            }
        }

        @if let Some(e) = error {
            p class="text-sm/6 text-red-600 dark:text-red-400" {
                (format!("An error occurred: {}", e))
            }
        }

        (user_table(&users, load_state, search))

        @if dialogs.form.is_open() {
            (form_dialog(&dialogs.form, form, search))
        }

        @if let DeleteDialog::Confirming(user) = &dialogs.delete {
            (delete_dialog(user, search))
        }

        @if let Some(notification) = &notification {
            (toast(notification, state.notification_ttl(), search))
        }
    };

    layout(content)
}

fn load_error_message(err: &GatewayError) -> String {
    match err {
        GatewayError::HttpStatus { status } => format!("Error: {}", status),
        _ => "An unknown error occurred.".to_owned(),
    }
}

fn user_table(users: &[User], load_state: &LoadState, search: &str) -> Markup {
    html! {
        @match load_state {
            LoadState::Failed(e) => {
                p class="text-red-600 dark:text-red-400" {
                    "Failed to fetch users: " (load_error_message(e))
                }
            }
            // pages render after the load has settled
            LoadState::NotLoaded | LoadState::Loaded => {
                @if users.is_empty() {
                    p class="p-4 text-gray-500 dark:text-gray-400" {
                        "No users found or list is empty."
                    }
                } @else {
                    div class="overflow-x-auto bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-xl" {
                        table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700" aria-label="user management table" {
                            thead {
                                tr class="text-left text-sm font-semibold text-gray-900 dark:text-white" {
                                    th class="px-4 py-3" { "Name" }
                                    th class="px-4 py-3" { "Email" }
                                    th class="px-4 py-3" { "Username" }
                                    th class="px-4 py-3 text-right" { "Actions" }
                                }
                            }
                            tbody class="divide-y divide-gray-200 dark:divide-gray-700 text-sm" {
                                @for user in users {
                                    tr id=(format!("user-{}", user.id)) {
                                        th scope="row" class="px-4 py-3 font-medium text-gray-900 dark:text-white" { (user.name) }
                                        td class="px-4 py-3 text-gray-600 dark:text-gray-300" { (user.email) }
                                        td class="px-4 py-3 text-gray-600 dark:text-gray-300" { (user.username) }
                                        td class="px-4 py-3 text-right whitespace-nowrap" {
                                            a
                                            href=(dialog_url(DialogKind::Edit, Some(user.id), search))
                                            class="mr-3 font-medium text-indigo-600 hover:text-indigo-500 dark:text-indigo-400" {
                                                "Edit"
                                            }
                                            a
                                            href=(dialog_url(DialogKind::Delete, Some(user.id), search))
                                            class="font-medium text-red-600 hover:text-red-500 dark:text-red-400" {
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn form_field(
    id: &str,
    label: &str,
    value: &str,
    error: Option<&'static str>,
) -> Markup {
    html! {
        div {
            label for=(id) class="block text-sm/6 font-medium text-gray-900 dark:text-gray-100" {
                (label) " *"
            }
            div class="mt-2" {
                input
                id=(id)
                type="text"
                name=(id)
                value=(value)
                aria-invalid=[error.map(|_| "true")]
                class=(if error.is_some() { INVALID_INPUT_CLASS } else { INPUT_CLASS })
                ;
            }
            @if let Some(message) = error {
                p class="mt-1 text-sm text-red-600 dark:text-red-400" { (message) }
            }
        }
    }
}

fn modal(content: Markup) -> Markup {
    html! {
        div class="fixed inset-0 z-10 flex items-center justify-center bg-gray-900/50 p-4" role="dialog" aria-modal="true" {
            div class="w-full max-w-lg rounded-xl bg-white dark:bg-gray-800 p-6 shadow-xl" {
                (content)
            }
        }
    }
}

fn form_dialog(dialog: &FormDialog, form: &FormState, search: &str) -> Markup {
    modal(html! {
        h2 class="text-lg font-semibold text-gray-900 dark:text-white mb-6" {
            (dialog.title())
        }

        // browser-side required checks are left off so the server decides
        form action=(dialog.action()) method="post" class="space-y-4" novalidate {
            input type="hidden" name="q" value=(search);

            (form_field("name", "Name", &form.values.name, form.errors.name))
            (form_field("email", "Email", &form.values.email, form.errors.email))
            (form_field("username", "Username", &form.values.username, form.errors.username))

            div class="flex justify-end gap-3 pt-4" {
                a href=(closed_url(search)) class="px-3 py-1.5 text-sm/6 font-semibold text-red-600 hover:text-red-500 dark:text-red-400" {
                    "Cancel"
                }
                button type="submit" class=(PRIMARY_BUTTON_CLASS) {
                    (dialog.submit_label())
                }
            }
        }
    })
}

fn delete_dialog(user: &User, search: &str) -> Markup {
    modal(html! {
        h2 class="text-lg font-semibold text-gray-900 dark:text-white mb-4" {
            "Confirm Deletion"
        }
        p class="text-sm text-gray-600 dark:text-gray-300" {
            "Are you sure you want to delete user "
            strong { (DeleteDialog::display_name(user)) }
            "? This action cannot be undone."
        }
        form action=(format!("/users/{}/delete", user.id)) method="post" class="flex justify-end gap-3 pt-6" {
            input type="hidden" name="q" value=(search);
            a href=(closed_url(search)) class="px-3 py-1.5 text-sm/6 font-semibold text-gray-700 hover:text-gray-900 dark:text-gray-300" {
                "Cancel"
            }
            button type="submit" class=(DANGER_BUTTON_CLASS) {
                "Delete"
            }
        }
    })
}

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "bg-green-50 text-green-800 border-green-300 dark:bg-green-900 dark:text-green-100",
        Severity::Info => "bg-blue-50 text-blue-800 border-blue-300 dark:bg-blue-900 dark:text-blue-100",
        Severity::Warning => "bg-yellow-50 text-yellow-800 border-yellow-300 dark:bg-yellow-900 dark:text-yellow-100",
        Severity::Error => "bg-red-50 text-red-800 border-red-300 dark:bg-red-900 dark:text-red-100",
    }
}

fn toast(notification: &Notification, ttl: Duration, search: &str) -> Markup {
    let remaining = notification.remaining(ttl).as_millis();

    html! {
        div
        role="alert"
        class=(format!("fixed bottom-4 left-4 z-20 flex items-center gap-4 rounded-lg border px-4 py-3 shadow-lg {}", severity_class(notification.severity)))
        style=(format!("animation: toast-hide 0s linear {}ms forwards", remaining)) {
            span class="text-sm font-medium" { (notification.message) }
            form action="/notification/dismiss" method="post" {
                input type="hidden" name="q" value=(search);
                button type="submit" aria-label="Close" class="text-sm font-semibold opacity-70 hover:opacity-100" {
                    "×"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_toast_is_styled_by_severity() {
        let classes = [
            Severity::Success,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
        ]
        .map(severity_class);

        for (i, class) in classes.iter().enumerate() {
            assert!(!classes[i + 1..].contains(class));
        }

        let notification = Notification {
            message: "Heads up".to_owned(),
            severity: Severity::Warning,
            shown_at: Instant::now(),
        };
        let markup = toast(&notification, Duration::from_millis(4000), "").into_string();

        assert!(markup.contains("Heads up"));
        assert!(markup.contains("bg-yellow-50"));
        assert!(markup.contains(r#"action="/notification/dismiss""#));
    }
}
