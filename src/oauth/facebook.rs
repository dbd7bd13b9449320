use oauth2::{
    basic::BasicClient, url::Url, AuthType, AuthUrl, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, Scope, TokenUrl,
};

use crate::config::{ConfigError, OAuthConfig, ProviderConfig};

pub fn build_facebook_oauth_client(
    oauth: &OAuthConfig,
    provider: &ProviderConfig,
) -> Result<BasicClient, ConfigError> {
    let auth_url = AuthUrl::new(provider.authorize_url()).map_err(|e| ConfigError::Invalid {
        name: "META_DIALOG_URL",
        reason: e.to_string(),
    })?;
    let token_url = TokenUrl::new(provider.token_url()).map_err(|e| ConfigError::Invalid {
        name: "META_GRAPH_URL",
        reason: e.to_string(),
    })?;
    let redirect_url =
        RedirectUrl::new(oauth.redirect_uri.clone()).map_err(|e| ConfigError::Invalid {
            name: "REDIRECT_URI",
            reason: e.to_string(),
        })?;

    // The Graph token endpoint reads the app credentials from the request, not basic auth.
    Ok(BasicClient::new(
        ClientId::new(oauth.client_id.clone()),
        Some(ClientSecret::new(oauth.client_secret.clone())),
        auth_url,
        Some(token_url),
    )
    .set_auth_type(AuthType::RequestBody)
    .set_redirect_uri(redirect_url))
}

/// Dialog URL with a fresh state token. Meta expects the scope list comma-joined.
pub fn authorization_url(client: &BasicClient, scopes: &[String]) -> (Url, CsrfToken) {
    client
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new(scopes.join(",")))
        .url()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn authorization_url_carries_the_expected_query() {
        let settings = Settings::for_tests("https://graph.facebook.com");
        let client = build_facebook_oauth_client(&settings.oauth, &settings.provider).unwrap();

        let (url, state) = authorization_url(&client, &settings.oauth.scopes);
        let query = url.query().unwrap_or_default();

        assert_eq!(url.host_str(), Some("www.facebook.com"));
        assert_eq!(url.path(), "/v23.0/dialog/oauth");
        assert!(query.contains("client_id=123"));
        assert!(query.contains("redirect_uri=https%3A%2F%2Fx%2Fcb"));
        assert!(query.contains("scope=email%2Cpages_show_list"));
        assert!(query.contains("response_type=code"));
        assert!(!state.secret().is_empty());
        assert!(query.contains(&format!("state={}", state.secret())));
    }

    #[test]
    fn every_call_issues_a_new_state() {
        let settings = Settings::for_tests("https://graph.facebook.com");
        let client = build_facebook_oauth_client(&settings.oauth, &settings.provider).unwrap();

        let (_, first) = authorization_url(&client, &settings.oauth.scopes);
        let (_, second) = authorization_url(&client, &settings.oauth.scopes);
        assert_ne!(first.secret(), second.secret());
    }

    #[test]
    fn relative_redirect_uri_is_rejected() {
        let mut settings = Settings::for_tests("https://graph.facebook.com");
        settings.oauth.redirect_uri = "/api/callback".to_string();

        let err = build_facebook_oauth_client(&settings.oauth, &settings.provider).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "REDIRECT_URI", .. }));
    }
}
