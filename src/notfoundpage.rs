use axum::http::StatusCode;
use maud::Markup;
use maud::html;

use crate::theme;

pub async fn not_found_page() -> (StatusCode, Markup) {
    (
        StatusCode::NOT_FOUND,
        theme::theme(html! {
            div class="p-6" {
                p { "Page not found" }
                a href="/" class="text-sm text-indigo-600 hover:text-indigo-500" { "Back to the dashboard" }
            }
        }),
    )
}
