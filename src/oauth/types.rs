use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query string the dialog sends back to the redirect URI.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenExchangeResult {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// One Graph object, kept exactly as the provider sent it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GraphRecord(pub Map<String, Value>);

impl GraphRecord {
    /// Display text for a field: strings as-is, other scalars in JSON form, null as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn id(&self) -> Option<String> {
        self.text("id")
    }

    pub fn name(&self) -> Option<String> {
        self.text("name")
    }
}

pub type UserProfile = GraphRecord;
pub type PageSummary = GraphRecord;
pub type AdAccountSummary = GraphRecord;

/// Graph list envelope; a missing `data` field reads as an empty list.
#[derive(Debug, Deserialize)]
pub struct GraphList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct DebugTokenEnvelope {
    pub data: Option<Value>,
}

/// Everything gathered by a successful callback.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectedAccount {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    pub user: UserProfile,
    pub pages: Vec<PageSummary>,
    pub ad_accounts: Vec<AdAccountSummary>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenInspection {
    pub user: UserProfile,
    pub token_info: Value,
    pub scopes: Vec<String>,
}
