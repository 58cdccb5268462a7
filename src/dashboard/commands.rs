use super::views::FormState;
use super::views::render_dashboard;
use crate::dialog::DeleteDialog;
use crate::dialog::Dialogs;
use crate::dialog::FormDialog;
use crate::dialog::closed_url;
use crate::gateway::UserGateway;
use crate::known_errors::KnownErrors;
use crate::known_errors::RedirectOnError;
use crate::service::Service;
use crate::user::FormErrors;
use crate::user::User;
use crate::user::UserFormValues;
use crate::user::UserId;
use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct UserForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    q: String,
}

impl UserForm {
    fn split(self) -> (UserFormValues, String) {
        (
            UserFormValues {
                name: self.name,
                email: self.email,
                username: self.username,
            },
            self.q,
        )
    }
}

#[derive(Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    q: String,
}

/// Re-renders the dashboard with the dialog still open and the bad fields
/// marked. Nothing is sent to the remote api.
async fn invalid_form<G>(
    state: &Service<G>,
    dialog: FormDialog,
    values: UserFormValues,
    errors: FormErrors,
    search: &str,
) -> Response
where
    G: UserGateway,
{
    let load_state = state.users_load().await;
    let dialogs = Dialogs {
        form: dialog,
        ..Dialogs::default()
    };
    let form = FormState { values, errors };

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        render_dashboard(state, &load_state, search, &dialogs, &form, None),
    )
        .into_response()
}

pub async fn create_user<G>(State(state): State<Service<G>>, Form(form): Form<UserForm>) -> Response
where
    G: UserGateway,
{
    let (values, search) = form.split();

    match values.clone().validate() {
        Ok(values) => {
            // the server call finishes on its own task
            state.user_create(values);
            Redirect::to(&closed_url(&search)).into_response()
        }
        Err(errors) => {
            invalid_form(&state, FormDialog::OpenForCreate, values, errors, &search).await
        }
    }
}

pub async fn update_user<G>(
    State(state): State<Service<G>>,
    Path(id): Path<u64>,
    Form(form): Form<UserForm>,
) -> Result<Response, Redirect>
where
    G: UserGateway,
{
    let (values, search) = form.split();
    let callback_url = closed_url(&search);

    let id = UserId::try_new(id).or_redirect(&callback_url)?;

    match values.clone().validate() {
        Ok(values) => {
            state.user_update(User::from_form(id, values));
            Ok(Redirect::to(&callback_url).into_response())
        }
        Err(errors) => {
            let editing = state
                .user_get(id)
                .unwrap_or_else(|| User::from_form(id, values.clone()));

            Ok(invalid_form(
                &state,
                FormDialog::OpenForEdit(editing),
                values,
                errors,
                &search,
            )
            .await)
        }
    }
}

pub async fn delete_user<G>(
    State(state): State<Service<G>>,
    Path(id): Path<u64>,
    Form(form): Form<SearchForm>,
) -> Result<Redirect, Redirect>
where
    G: UserGateway,
{
    let callback_url = closed_url(&form.q);

    let id = UserId::try_new(id).or_redirect(&callback_url)?;

    let user = state
        .user_get(id)
        .ok_or(KnownErrors::UserDoesntExist {
            id: id.into_inner(),
        })
        .or_redirect(&callback_url)?;

    state.user_delete(id, &DeleteDialog::display_name(&user));

    Ok(Redirect::to(&callback_url))
}

pub async fn dismiss_notification<G>(
    State(state): State<Service<G>>,
    Form(form): Form<SearchForm>,
) -> Redirect
where
    G: UserGateway,
{
    state.notification_dismiss();
    Redirect::to(&closed_url(&form.q))
}
