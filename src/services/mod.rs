pub mod callback;
pub mod graph;
pub mod inspect;
pub mod oauth_state;

pub use callback::complete_authorization;
pub use graph::GraphClient;
pub use inspect::inspect_token;
pub use oauth_state::{remember_state, take_state};
