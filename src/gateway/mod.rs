pub mod http;
#[cfg(test)]
pub mod scripted;

pub use http::HttpUserGateway;

use crate::user::User;
use crate::user::UserFormValues;
use crate::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("remote api responded with status {status}")]
    HttpStatus { status: u16 },

    #[error("failed to parse remote api response: {0}")]
    Parse(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// The remote users API. One attempt per call, no retries.
pub trait UserGateway: Clone + Send + Sync + 'static {
    fn list_users(&self) -> impl Future<Output = GatewayResult<Vec<User>>> + Send;

    /// Sends the form values together with the id the cache already gave the
    /// record; the returned user carries whatever id the server settled on.
    fn create_user(
        &self,
        values: UserFormValues,
        id: UserId,
    ) -> impl Future<Output = GatewayResult<User>> + Send;

    /// Full replacement keyed by `user.id`.
    fn update_user(&self, user: User) -> impl Future<Output = GatewayResult<User>> + Send;

    fn delete_user(&self, id: UserId) -> impl Future<Output = GatewayResult<()>> + Send;
}
