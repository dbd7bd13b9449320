use axum::{extract::State, response::Html};

use crate::state::AppState;

pub async fn homepage(State(state): State<AppState>) -> Html<String> {
    Html(state.views.home())
}
