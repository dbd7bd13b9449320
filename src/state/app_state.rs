use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::OAuthConfig;
use crate::services::GraphClient;
use crate::views::PageRenderer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OAuthConfig>,
    pub graph: GraphClient,
    pub views: Arc<dyn PageRenderer>,
    pub key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(graph_url: &str) -> Self {
        let settings = crate::config::Settings::for_tests(graph_url);
        let graph = GraphClient::from_settings(&settings).expect("test settings are valid");

        Self {
            config: Arc::new(settings.oauth),
            graph,
            views: Arc::new(crate::views::HtmlRenderer),
            key: Key::generate(),
        }
    }
}
