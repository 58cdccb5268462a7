use crate::user::UserIdError;
use axum::response::Redirect;
use serde::Deserialize;
use serde::Serialize;

/// Errors that travel back to the dashboard through a redirect, encoded in the
/// `err` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum KnownErrors {
    #[error("no user with id {id}")]
    UserDoesntExist { id: u64 },

    #[error("invalid user id")]
    InvalidId,
}

impl From<UserIdError> for KnownErrors {
    fn from(_: UserIdError) -> Self {
        KnownErrors::InvalidId
    }
}

impl KnownErrors {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(urlencoding::encode(&serde_json::to_string(self)?).into_owned())
    }

    /// Reads back an already url-decoded `err` parameter.
    pub fn decode(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok()
    }

    pub fn redirect(&self, url: &str) -> Redirect {
        match self.encode() {
            Ok(encoded) => {
                let separator = if url.contains('?') { '&' } else { '?' };
                Redirect::to(&format!("{url}{separator}err={encoded}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to encode error for redirect");
                Redirect::to(url)
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UrlError {
    pub err: Option<String>,
}

impl UrlError {
    pub fn known(&self) -> Option<KnownErrors> {
        self.err.as_deref().and_then(KnownErrors::decode)
    }
}

pub trait RedirectOnError<T> {
    fn or_redirect(self, url: &str) -> Result<T, Redirect>;
}

impl<T, E> RedirectOnError<T> for Result<T, E>
where
    E: Into<KnownErrors>,
{
    fn or_redirect(self, url: &str) -> Result<T, Redirect> {
        self.map_err(|e| {
            let err: KnownErrors = e.into();
            err.redirect(url)
        })
    }
}
