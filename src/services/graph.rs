use oauth2::{
    basic::BasicClient, url::Url, AuthorizationCode, CsrfToken, HttpRequest, HttpResponse,
    TokenResponse,
};
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ProviderConfig, Settings};
use crate::errors::GraphError;
use crate::oauth::{
    authorization_url, build_facebook_oauth_client, AdAccountSummary, DebugTokenEnvelope,
    GraphList, PageSummary, TokenExchangeResult, UserProfile,
};

const PROFILE_FIELDS: &str = "id,name,email,picture";
const AD_ACCOUNT_FIELDS: &str = "id,name,account_status";

/// Graph API client. Every call goes through one pooled HTTP client with a fixed deadline.
#[derive(Clone)]
pub struct GraphClient {
    http: ReqwestClient,
    oauth: BasicClient,
    provider: ProviderConfig,
    app_access_token: String,
}

impl GraphClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(settings.provider.timeout)
            .build()?;
        let oauth = build_facebook_oauth_client(&settings.oauth, &settings.provider)?;

        Ok(Self {
            http,
            oauth,
            provider: settings.provider.clone(),
            app_access_token: settings.oauth.app_access_token(),
        })
    }

    pub fn authorize_url(&self, scopes: &[String]) -> (Url, CsrfToken) {
        authorization_url(&self.oauth, scopes)
    }

    pub async fn exchange_code(&self, code: &str) -> Result<TokenExchangeResult, GraphError> {
        let http = self.http.clone();
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code.to_owned()))
            .request_async(move |request| send_oauth_request(http, request))
            .await
            .map_err(GraphError::from_token_error)?;

        Ok(TokenExchangeResult {
            access_token: token.access_token().secret().to_owned(),
            token_type: token.token_type().as_ref().to_owned(),
            expires_in: token.expires_in().map(|d| d.as_secs()),
        })
    }

    pub async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, GraphError> {
        self.get_json("me", Some(access_token), &[("fields", PROFILE_FIELDS)])
            .await
    }

    pub async fn fetch_pages(&self, access_token: &str) -> Result<Vec<PageSummary>, GraphError> {
        let pages: GraphList<PageSummary> =
            self.get_json("me/accounts", Some(access_token), &[]).await?;
        Ok(pages.data)
    }

    pub async fn fetch_ad_accounts(
        &self,
        access_token: &str,
    ) -> Result<Vec<AdAccountSummary>, GraphError> {
        let accounts: GraphList<AdAccountSummary> = self
            .get_json(
                "me/adaccounts",
                Some(access_token),
                &[("fields", AD_ACCOUNT_FIELDS)],
            )
            .await?;
        Ok(accounts.data)
    }

    /// Introspects `input_token` with the app credential and returns the `data` object.
    pub async fn debug_token(&self, input_token: &str) -> Result<Value, GraphError> {
        let envelope: DebugTokenEnvelope = self
            .get_json(
                "debug_token",
                None,
                &[
                    ("input_token", input_token),
                    ("access_token", self.app_access_token.as_str()),
                ],
            )
            .await?;

        envelope
            .data
            .ok_or_else(|| GraphError::Decode("debug_token response has no data".to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        access_token: Option<&str>,
        query: &[(&str, &str)],
    ) -> Result<T, GraphError> {
        let mut request = self.http.get(self.provider.graph_endpoint(path)).query(query);
        if let Some(token) = access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(GraphError::from_error_body(status.as_u16(), &body));
        }

        Ok(response.json::<T>().await?)
    }
}

async fn send_oauth_request(
    http: ReqwestClient,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let response = http
        .request(request.method, request.url.as_str())
        .headers(request.headers)
        .body(request.body)
        .send()
        .await?;

    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GraphClient {
        GraphClient::from_settings(&Settings::for_tests(&server.uri())).unwrap()
    }

    #[tokio::test]
    async fn exchange_code_posts_credentials_and_reads_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v23.0/oauth/access_token"))
            .and(body_string_contains("code=abc"))
            .and(body_string_contains("client_id=123"))
            .and(body_string_contains("client_secret=shh"))
            .and(body_string_contains("redirect_uri=https%3A%2F%2Fx%2Fcb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "T",
                "token_type": "bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = client_for(&server).await.exchange_code("abc").await.unwrap();
        assert_eq!(
            token,
            TokenExchangeResult {
                access_token: "T".to_string(),
                token_type: "bearer".to_string(),
                expires_in: Some(3600),
            }
        );
    }

    #[tokio::test]
    async fn exchange_code_normalizes_token_type_case() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v23.0/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "T",
                "token_type": "Bearer"
            })))
            .mount(&server)
            .await;

        let token = client_for(&server).await.exchange_code("abc").await.unwrap();
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, None);
    }

    #[tokio::test]
    async fn exchange_code_reports_the_graph_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v23.0/oauth/access_token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "message": "This authorization code has expired.",
                    "type": "OAuthException",
                    "code": 100
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.exchange_code("old").await.unwrap_err();
        assert!(matches!(err, GraphError::Api(_)));
        assert_eq!(err.to_string(), "This authorization code has expired.");
    }

    #[tokio::test]
    async fn profile_is_fetched_with_bearer_token_and_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(query_param("fields", "id,name,email,picture"))
            .and(header("authorization", "Bearer T"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "1", "name": "Ann"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server).await.fetch_profile("T").await.unwrap();
        assert_eq!(profile.id().as_deref(), Some("1"));
        assert_eq!(profile.name().as_deref(), Some("Ann"));
    }

    #[tokio::test]
    async fn ad_accounts_request_status_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me/adaccounts"))
            .and(query_param("fields", "id,name,account_status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "act_1", "name": "Main", "account_status": 1}]
            })))
            .mount(&server)
            .await;

        let accounts = client_for(&server)
            .await
            .fetch_ad_accounts("T")
            .await
            .unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].id().as_deref(), Some("act_1"));
        assert_eq!(accounts[0].0["account_status"], json!(1));
    }

    #[tokio::test]
    async fn debug_token_uses_app_credential() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/debug_token"))
            .and(query_param("input_token", "T"))
            .and(query_param("access_token", "123|shh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"app_id": "123", "is_valid": true, "scopes": ["email"]}
            })))
            .mount(&server)
            .await;

        let info = client_for(&server).await.debug_token("T").await.unwrap();
        assert_eq!(info["is_valid"], json!(true));
    }

    #[tokio::test]
    async fn debug_token_without_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/debug_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client_for(&server).await.debug_token("T").await.unwrap_err();
        assert!(matches!(err, GraphError::Decode(_)));
    }
}
