use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Permissions requested on the consent dialog, in request order.
pub const META_SCOPES: [&str; 8] = [
    "public_profile",
    "email",
    "pages_show_list",
    "pages_manage_ads",
    "pages_read_engagement",
    "business_management",
    "ads_management",
    "ads_read",
];

const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/api/callback";
const DEFAULT_DIALOG_URL: &str = "https://www.facebook.com";
const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
const DEFAULT_GRAPH_VERSION: &str = "v23.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;
const MIN_COOKIE_KEY_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// App credentials and the scopes requested for them.
#[derive(Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthConfig {
    /// Credential used for app-level calls such as `debug_token`.
    pub fn app_access_token(&self) -> String {
        format!("{}|{}", self.client_id, self.client_secret)
    }
}

impl fmt::Debug for OAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("redirect_uri", &self.redirect_uri)
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Where the provider lives and how long we wait for it.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub dialog_url: String,
    pub graph_url: String,
    pub graph_version: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn authorize_url(&self) -> String {
        format!(
            "{}/{}/dialog/oauth",
            self.dialog_url.trim_end_matches('/'),
            self.graph_version
        )
    }

    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth/access_token",
            self.graph_url.trim_end_matches('/'),
            self.graph_version
        )
    }

    pub fn graph_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.graph_url.trim_end_matches('/'), path)
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub cookie_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub oauth: OAuthConfig,
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let oauth = OAuthConfig {
            client_id: required("META_APP_ID")?,
            client_secret: required("META_APP_SECRET")?,
            redirect_uri: var("REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            scopes: META_SCOPES.iter().map(|scope| scope.to_string()).collect(),
        };

        let timeout_secs = match var("HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("HTTP_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "HTTP_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let provider = ProviderConfig {
            dialog_url: var("META_DIALOG_URL").unwrap_or_else(|| DEFAULT_DIALOG_URL.to_string()),
            graph_url: var("META_GRAPH_URL").unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
            graph_version: var("META_GRAPH_VERSION")
                .unwrap_or_else(|| DEFAULT_GRAPH_VERSION.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let port = match var("PORT") {
            Some(raw) => parse_number::<u16>("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let cookie_key = var("COOKIE_KEY");
        if let Some(key) = &cookie_key {
            if key.len() < MIN_COOKIE_KEY_LEN {
                return Err(ConfigError::Invalid {
                    name: "COOKIE_KEY",
                    reason: format!("must be at least {MIN_COOKIE_KEY_LEN} bytes"),
                });
            }
        }

        Ok(Self {
            oauth,
            provider,
            server: ServerConfig { port, cookie_key },
        })
    }

    #[cfg(test)]
    pub fn for_tests(graph_url: &str) -> Self {
        Self {
            oauth: OAuthConfig {
                client_id: "123".to_string(),
                client_secret: "shh".to_string(),
                redirect_uri: "https://x/cb".to_string(),
                scopes: vec!["email".to_string(), "pages_show_list".to_string()],
            },
            provider: ProviderConfig {
                dialog_url: "https://www.facebook.com".to_string(),
                graph_url: graph_url.to_string(),
                graph_version: "v23.0".to_string(),
                timeout: Duration::from_secs(5),
            },
            server: ServerConfig {
                port: 0,
                cookie_key: None,
            },
        }
    }
}

fn parse_number<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}
