//! Static stand-in for the registry login page. It exposes the element ids
//! the probe relies on and never sends the form anywhere.

use std::net::SocketAddr;

use axum::{Router, extract::State, response::Html, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::error::Result;

const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Login</title>
</head>
<body>
  <form id="login-form">
    <h2 id="form-title">User Login</h2>
    <label for="username">Username:</label>
    <input type="text" id="username" name="username">
    <label for="password">Password:</label>
    <input type="password" id="password" name="password">
    {{ADMIN_TOGGLE}}
    <button type="submit">Log In</button>
    <p id="login-status"></p>
  </form>
  <script>
    const form = document.getElementById("login-form");
    const toggle = document.getElementById("admin-toggle");
    if (toggle) {
      toggle.addEventListener("change", () => {
        document.getElementById("form-title").textContent =
          toggle.checked ? "Admin Login" : "User Login";
      });
    }
    form.addEventListener("submit", (event) => {
      event.preventDefault();
      const username = document.getElementById("username").value;
      const password = document.getElementById("password").value;
      const status = document.getElementById("login-status");
      if (!username || !password) {
        status.textContent = "Please enter both username and password.";
        return;
      }
      const mode = toggle && toggle.checked ? "admin" : "user";
      status.textContent = "Logging in...";
      // The registry answers the login asynchronously; the page does not navigate.
      setTimeout(() => {
        status.textContent = "Login submitted";
        document.title = "Login submitted (" + mode + ")";
      }, RESPONSE_DELAY_MS);
    });
  </script>
</body>
</html>
"#;

const ADMIN_TOGGLE_MARKUP: &str = r#"<label for="admin-toggle">Admin Login:</label>
    <input type="checkbox" id="admin-toggle">"#;

/// Delay before the page reacts to a submit.
pub const RESPONSE_DELAY_MS: u64 = 300;

/// Which login page the stub serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StubPage {
    #[default]
    Full,
    /// The same page with `#admin-toggle` left out.
    WithoutAdminToggle,
}

impl StubPage {
    pub fn render(self) -> String {
        let toggle = match self {
            StubPage::Full => ADMIN_TOGGLE_MARKUP,
            StubPage::WithoutAdminToggle => "",
        };
        LOGIN_PAGE
            .replace("{{ADMIN_TOGGLE}}", toggle)
            .replace("RESPONSE_DELAY_MS", &RESPONSE_DELAY_MS.to_string())
    }
}

async fn login_page(State(page): State<StubPage>) -> Html<String> {
    Html(page.render())
}

pub fn router(page: StubPage) -> Router {
    Router::new()
        .route("/login", get(login_page))
        .layer(TraceLayer::new_for_http())
        .with_state(page)
}

/// Serve the stub page until the task is cancelled.
pub async fn serve(addr: SocketAddr, page: StubPage) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener, page).await
}

/// Serve on an already bound listener, e.g. one bound to port 0.
pub async fn serve_on(listener: TcpListener, page: StubPage) -> Result<()> {
    tracing::info!(
        "Stub login page ({:?}) listening on http://{}/login",
        page,
        listener.local_addr()?
    );
    axum::serve(listener, router(page)).await?;
    Ok(())
}
