//! Directory table for any logged-in session

use axum::{Extension, extract::State, response::Html};

use super::views;
use crate::auth::SessionIdentity;
use crate::core::ServerState;

pub async fn list(
    State(state): State<ServerState>,
    Extension(identity): Extension<SessionIdentity>,
) -> Html<String> {
    let directory = state.store.load().await;
    let name = if identity.name.is_empty() {
        "User"
    } else {
        identity.name.as_str()
    };
    Html(views::directory_page(name, &directory.employees))
}
