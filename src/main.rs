mod cache;
mod config;
mod dashboard;
mod dialog;
mod gateway;
mod known_errors;
mod notfoundpage;
mod notification;
mod service;
mod theme;
mod user;

use crate::config::Config;
use crate::gateway::HttpUserGateway;
use crate::notification::DISPLAY_DURATION;
use crate::service::Service;
use dotenvy::dotenv;
use std::env;
use tower_http::trace::TraceLayer;

type StateType = Service<HttpUserGateway>;

#[tokio::main]
async fn main() {
    dotenv().ok();

    if env::var("RUST_LOG").is_err() {
        unsafe {
            // Concurrent writing of set_var is not permitted,
            // but we're in main, so that shouldn't be a problem.
            env::set_var("RUST_LOG", "INFO");
        }
    }
    tracing_subscriber::fmt::init();

    let config = Config::from_env().expect("invalid configuration");

    let mut client = reqwest::Client::builder();
    if let Some(timeout) = config.api_timeout {
        client = client.timeout(timeout);
    }
    let client = client.build().expect("failed to build the http client");

    let gateway = HttpUserGateway::new(client, config.api_base_url.clone());
    tracing::info!(api = %gateway.base_url(), "using remote users api");

    let app_state: StateType = Service::new(gateway, DISPLAY_DURATION);

    let app = dashboard::router::<HttpUserGateway>()
        .fallback(notfoundpage::not_found_page)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    tracing::info!("listening on http://{}", &config.site_addr);
    let listener = tokio::net::TcpListener::bind(&config.site_addr)
        .await
        .expect("failed to bind the tcp address");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("failed to serve on the address");
}
