pub mod html;

pub use html::HtmlRenderer;

use crate::oauth::ConnectedAccount;

/// Turns handler results into page bodies.
pub trait PageRenderer: Send + Sync {
    fn home(&self) -> String;
    fn connected(&self, account: &ConnectedAccount) -> String;
    fn failed(&self, message: &str) -> String;
}

pub(crate) fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
