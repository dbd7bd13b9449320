use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::errors::{CallbackError, GraphError};
use crate::oauth::{AdAccountSummary, CallbackParams, ConnectedAccount};
use crate::services::graph::GraphClient;

/// Finishes the authorization code flow for one callback request.
///
/// A provider error or a state mismatch stops before any outbound call. After the token
/// exchange the identity and page fetches must succeed; the ad account fetch may fail
/// and then yields an empty list.
pub async fn complete_authorization(
    graph: &GraphClient,
    params: &CallbackParams,
    expected_state: Option<&str>,
) -> Result<ConnectedAccount, CallbackError> {
    if let Some(error) = non_empty(&params.error) {
        info!(error, "authorization was not granted");
        let reason = non_empty(&params.error_description).unwrap_or(error);
        return Err(CallbackError::Denied(reason.to_owned()));
    }

    match (expected_state, non_empty(&params.state)) {
        (Some(expected), Some(returned)) if expected == returned => {}
        _ => {
            warn!("callback state does not match the issued state");
            return Err(CallbackError::StateMismatch);
        }
    }

    let code = non_empty(&params.code).ok_or(CallbackError::MissingCode)?;

    exchange_and_fetch(graph, code).await.map_err(|e| {
        error!("OAuth error: {}", e);
        CallbackError::Graph(e)
    })
}

async fn exchange_and_fetch(
    graph: &GraphClient,
    code: &str,
) -> Result<ConnectedAccount, GraphError> {
    let token = graph.exchange_code(code).await?;
    debug!(token_type = %token.token_type, expires_in = ?token.expires_in, "exchanged authorization code");

    let user = graph.fetch_profile(&token.access_token).await?;

    let (pages, ad_accounts) = tokio::join!(
        graph.fetch_pages(&token.access_token),
        ad_accounts_or_empty(graph, &token.access_token),
    );
    let pages = pages?;

    info!(
        user_id = ?user.id(),
        pages = pages.len(),
        ad_accounts = ad_accounts.len(),
        "account connected"
    );

    Ok(ConnectedAccount {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        user,
        pages,
        ad_accounts,
        timestamp: Utc::now(),
    })
}

// Needs ads_read/ads_management, which many users decline.
async fn ad_accounts_or_empty(graph: &GraphClient, access_token: &str) -> Vec<AdAccountSummary> {
    match graph.fetch_ad_accounts(access_token).await {
        Ok(accounts) => accounts,
        Err(e) => {
            warn!("Could not fetch ad accounts: {}", e);
            Vec::new()
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
