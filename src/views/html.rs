use crate::oauth::{ConnectedAccount, GraphRecord};
use crate::views::{escape, PageRenderer};

const BASE_STYLE: &str = r#"
                body {
                    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
                    background: #f0f2f5;
                    margin: 0;
                    padding: 40px;
                }
                .container {
                    background: white;
                    padding: 30px;
                    border-radius: 12px;
                    box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
                    max-width: 800px;
                    margin: 0 auto;
                }
                h1 {
                    color: #1877f2;
                }
                .btn {
                    display: inline-block;
                    padding: 12px 24px;
                    background: #1877f2;
                    color: white;
                    text-decoration: none;
                    border-radius: 6px;
                    margin-top: 20px;
                }
                .btn:hover {
                    background: #166fe5;
                }
                .section {
                    background: #f8f9fa;
                    padding: 15px 20px;
                    border-radius: 8px;
                    margin: 20px 0;
                }
                .success {
                    background: #d4edda;
                    color: #155724;
                    padding: 15px;
                    border-radius: 6px;
                }
                .error {
                    background: #f8d7da;
                    color: #721c24;
                    padding: 15px;
                    border-radius: 6px;
                }
                .token-box {
                    font-family: monospace;
                    word-break: break-all;
                }
"#;

/// Inline HTML pages for the browser side of the flow.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html>
        <head>
            <title>{title}</title>
            <style>{BASE_STYLE}</style>
        </head>
        <body>
            <div class="container">
{body}
            </div>
        </body>
        </html>
        "#
    )
}

fn record_label(record: &GraphRecord) -> (String, String) {
    (
        record.name().unwrap_or_default(),
        record.id().unwrap_or_default(),
    )
}

fn list_section(heading: &str, items: impl ExactSizeIterator<Item = (String, String)>) -> String {
    let count = items.len();
    if count == 0 {
        return String::new();
    }

    let entries: String = items
        .map(|(name, id)| format!("<li>{} ({})</li>", escape(&name), escape(&id)))
        .collect();

    format!(
        r#"
                <div class="section">
                    <h3>{heading} ({count})</h3>
                    <ul>{entries}</ul>
                </div>"#
    )
}

impl PageRenderer for HtmlRenderer {
    fn home(&self) -> String {
        page(
            "Meta OAuth Integration",
            r#"
                <h1>📘 Meta OAuth Integration</h1>
                <p>Connect your Meta/Facebook account to grant access to your business assets.</p>

                <div class="section">
                    <h3>This app will request access to:</h3>
                    <ul>
                        <li>Your name and profile picture</li>
                        <li>Manage ads for ad accounts you have access to</li>
                        <li>Manage your business pages</li>
                        <li>Show a list of the Pages you manage</li>
                        <li>Read engagement data from your pages</li>
                    </ul>
                </div>

                <a href="/api/auth" class="btn">Connect with Facebook</a>

                <p style="color: #666; font-size: 14px; margin-top: 30px;">
                    <strong>API Endpoints:</strong><br>
                    <code>GET /api/auth</code> - Start OAuth flow<br>
                    <code>GET /api/callback</code> - OAuth callback<br>
                    <code>GET /api/token/:token</code> - Verify an access token
                </p>"#,
        )
    }

    fn connected(&self, account: &ConnectedAccount) -> String {
        let user = &account.user;
        let email = user
            .text("email")
            .map(|email| format!("<p><strong>Email:</strong> {}</p>", escape(&email)))
            .unwrap_or_default();
        let expires = account
            .expires_in
            .map(|secs| format!("<p><small>Expires in: {secs} seconds</small></p>"))
            .unwrap_or_default();
        let pages = list_section(
            "Pages",
            account.pages.iter().map(record_label),
        );
        let ad_accounts = list_section(
            "Ad Accounts",
            account.ad_accounts.iter().map(record_label),
        );

        let body = format!(
            r#"
                <div class="success">
                    <h2>✅ Successfully Connected!</h2>
                </div>

                <div class="section">
                    <h3>User Information</h3>
                    <p><strong>Name:</strong> {name}</p>
                    <p><strong>ID:</strong> {id}</p>
                    {email}
                </div>

                <div class="section">
                    <h3>Access Token</h3>
                    <div class="token-box">{token}</div>
                    {expires}
                    <p><small>Connected at {timestamp}</small></p>
                </div>
                {pages}
                {ad_accounts}

                <a href="/" class="btn">Back to Home</a>"#,
            name = escape(&user.name().unwrap_or_default()),
            id = escape(&user.id().unwrap_or_default()),
            token = escape(&account.access_token),
            timestamp = account.timestamp.to_rfc3339(),
        );

        page("Success - Meta OAuth", &body)
    }

    fn failed(&self, message: &str) -> String {
        let body = format!(
            r#"
                <div class="error">
                    <h2>❌ Authentication Failed</h2>
                    <p>{}</p>
                </div>
                <a href="/" class="btn">Try Again</a>"#,
            escape(message)
        );

        page("Error - Meta OAuth", &body)
    }
}
