use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::oauth::CallbackParams;
use crate::services::{complete_authorization, remember_state, take_state};
use crate::state::AppState;

pub async fn authorize(State(state): State<AppState>, jar: PrivateCookieJar) -> impl IntoResponse {
    let (auth_url, csrf_token) = state.graph.authorize_url(&state.config.scopes);
    let jar = remember_state(jar, csrf_token.secret());

    (jar, Redirect::to(auth_url.as_str()))
}

// Failures are rendered as a page with status 200, same as success.
pub async fn callback(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(params): Query<CallbackParams>,
) -> impl IntoResponse {
    let (jar, expected_state) = take_state(jar);

    let page = match complete_authorization(&state.graph, &params, expected_state.as_deref()).await
    {
        Ok(account) => state.views.connected(&account),
        Err(e) => state.views.failed(&e.to_string()),
    };

    (jar, Html(page))
}
