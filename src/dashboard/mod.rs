pub mod commands;
pub mod layout;
pub mod views;

use crate::gateway::UserGateway;
use crate::service::Service;
use axum::Router;
use axum::routing::get;
use axum::routing::post;

pub fn router<G>() -> Router<Service<G>>
where
    G: UserGateway,
{
    Router::new()
        .route("/", get(views::dashboard_page::<G>))
        .route("/users", post(commands::create_user::<G>))
        .route("/users/{id}", post(commands::update_user::<G>))
        .route("/users/{id}/delete", post(commands::delete_user::<G>))
        .route(
            "/notification/dismiss",
            post(commands::dismiss_notification::<G>),
        )
}
