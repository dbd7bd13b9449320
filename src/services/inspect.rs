use serde_json::Value;

use crate::errors::GraphError;
use crate::oauth::TokenInspection;
use crate::services::graph::GraphClient;

/// Verifies a bare access token. Both the identity fetch and the introspection must succeed.
pub async fn inspect_token(graph: &GraphClient, token: &str) -> Result<TokenInspection, GraphError> {
    let (user, token_info) = tokio::try_join!(graph.fetch_profile(token), graph.debug_token(token))?;

    let scopes = token_info
        .get("scopes")
        .and_then(Value::as_array)
        .map(|scopes| {
            scopes
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    Ok(TokenInspection {
        user,
        token_info,
        scopes,
    })
}
