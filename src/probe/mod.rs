//! Login-flow probe against the registry's `/login` page.
//!
//! The probe toggles admin mode, submits the configured credentials and
//! reports where the browser ended up. It has no notion of success: the
//! operator reads the report.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;

use crate::config::{Browser, Config};
use crate::error::{AppError, Result};

pub mod session;

pub use session::{BrowserSession, Target, WebDriverSession};

pub const ADMIN_TOGGLE: Target = Target::Id("admin-toggle");
pub const USERNAME_FIELD: Target = Target::Id("username");
pub const PASSWORD_FIELD: Target = Target::Id("password");
pub const SUBMIT_BUTTON: Target = Target::ButtonText("Log In");

/// Appended by [`Credentials::with_injection_suffix`]: closes single, double
/// and backtick quoting, then tries a second statement.
pub const INJECTION_SUFFIX: &str = "'\"`;DROP TABLE packages;";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn with_injection_suffix(mut self) -> Self {
        self.password.push_str(INJECTION_SUFFIX);
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub webdriver_url: String,
    pub browser: Browser,
    pub headless: bool,
    /// Upper bound for the login form to become interactive.
    pub ready_timeout: Duration,
    /// Upper bound for the page to react to the submit.
    pub settle_timeout: Duration,
    pub poll_interval: Duration,
    /// Click "Log In" once before the fields are filled.
    pub pre_fill_submit: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            browser: Browser::Chrome,
            headless: true,
            ready_timeout: Duration::from_secs(10),
            settle_timeout: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
            pre_fill_submit: false,
        }
    }
}

impl From<&Config> for ProbeOptions {
    fn from(config: &Config) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            browser: config.browser,
            headless: config.headless,
            ready_timeout: Duration::from_secs(config.ready_timeout_secs),
            settle_timeout: Duration::from_secs(config.settle_timeout_secs),
            pre_fill_submit: config.pre_fill_submit,
            ..Self::default()
        }
    }
}

/// What the browser showed after the submit.
///
/// `settled` is false when the page showed no reaction to the submit within
/// the settle timeout; `title` and `url` are then whatever was on screen at
/// that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub login_url: String,
    pub username: String,
    pub title: String,
    pub url: String,
    pub settled: bool,
    pub pre_fill_submit: bool,
}

pub fn login_url(base_url: &str) -> String {
    format!("{}/login", base_url.trim_end_matches('/'))
}

/// Start a WebDriver session and run the login probe in it. The session is
/// closed whether or not the probe succeeds.
pub async fn probe_login(
    base_url: &str,
    credentials: &Credentials,
    options: &ProbeOptions,
) -> Result<ProbeReport> {
    let session =
        WebDriverSession::connect(&options.webdriver_url, options.browser, options.headless).await?;
    probe_with_session(session, base_url, credentials, options).await
}

/// Run the probe in `session`, then close it. A close failure is logged and
/// never replaces the probe's own result.
pub async fn probe_with_session<S: BrowserSession>(
    mut session: S,
    base_url: &str,
    credentials: &Credentials,
    options: &ProbeOptions,
) -> Result<ProbeReport> {
    let outcome = run_probe(&mut session, base_url, credentials, options).await;

    tracing::info!("Closing the browser session");
    if let Err(e) = session.close().await {
        tracing::warn!("Failed to close browser session: {}", e);
    }

    if let Err(e) = &outcome {
        tracing::error!("Login probe aborted: {}", e);
    }
    outcome
}

/// The click path itself. Any missing element aborts immediately.
pub async fn run_probe<S: BrowserSession + ?Sized>(
    session: &mut S,
    base_url: &str,
    credentials: &Credentials,
    options: &ProbeOptions,
) -> Result<ProbeReport> {
    let login_url = login_url(base_url);
    tracing::info!("Opening {}", login_url);
    session.goto(&login_url).await?;

    wait_for_element(session, USERNAME_FIELD, options).await?;

    session.activate(ADMIN_TOGGLE).await?;
    tracing::debug!("Admin mode toggled");

    if options.pre_fill_submit {
        tracing::warn!("Submitting the login form before any field is filled");
        session.click(SUBMIT_BUTTON).await?;
    }

    session.send_keys(USERNAME_FIELD, &credentials.username).await?;
    session.send_keys(PASSWORD_FIELD, credentials.password()).await?;

    let before = PageMark {
        title: session.title().await?,
        url: session.current_url().await?,
    };
    session.click(SUBMIT_BUTTON).await?;
    tracing::info!("Attempted login as {}", credentials.username);

    let settled = wait_for_submit_outcome(session, &before, options).await?;

    let title = session.title().await?;
    let url = session.current_url().await?;
    tracing::info!("Landed on '{}' at {}", title, url);

    Ok(ProbeReport {
        login_url,
        username: credentials.username.clone(),
        title,
        url,
        settled,
        pre_fill_submit: options.pre_fill_submit,
    })
}

/// Title and URL seen right before the final submit.
struct PageMark {
    title: String,
    url: String,
}

async fn wait_for_element<S: BrowserSession + ?Sized>(
    session: &mut S,
    target: Target,
    options: &ProbeOptions,
) -> Result<()> {
    let polled = timeout(options.ready_timeout, async {
        loop {
            if session.is_present(target).await? {
                return Ok::<(), AppError>(());
            }
            tokio::time::sleep(options.poll_interval).await;
        }
    })
    .await;

    match polled {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout {
            what: format!("{} to appear", target),
            waited: options.ready_timeout,
        }),
    }
}

/// Poll until the page reacts to the submit: it has finished loading and
/// either the login form is gone or the title or URL changed. Returns false
/// when the settle timeout runs out first.
async fn wait_for_submit_outcome<S: BrowserSession + ?Sized>(
    session: &mut S,
    before: &PageMark,
    options: &ProbeOptions,
) -> Result<bool> {
    let polled = timeout(options.settle_timeout, async {
        loop {
            if submit_settled(session, before).await? {
                return Ok::<(), AppError>(());
            }
            tokio::time::sleep(options.poll_interval).await;
        }
    })
    .await;

    match polled {
        Ok(result) => result.map(|()| true),
        Err(_) => {
            tracing::warn!(
                "No reaction to the submit within {:?}, reporting the current page",
                options.settle_timeout
            );
            Ok(false)
        }
    }
}

async fn submit_settled<S: BrowserSession + ?Sized>(session: &mut S, before: &PageMark) -> Result<bool> {
    if session.ready_state().await? != "complete" {
        return Ok(false);
    }
    if !session.is_present(USERNAME_FIELD).await? {
        return Ok(true);
    }
    if session.title().await? != before.title {
        return Ok(true);
    }
    Ok(session.current_url().await? != before.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_tolerates_trailing_slash() {
        assert_eq!(login_url("http://127.0.0.1:8000"), "http://127.0.0.1:8000/login");
        assert_eq!(login_url("http://127.0.0.1:8000/"), "http://127.0.0.1:8000/login");
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials::new("admin", "hunter2").with_injection_suffix();
        let shown = format!("{:?}", creds);
        assert!(shown.contains("admin"));
        assert!(!shown.contains("hunter2"));
        assert!(creds.password().ends_with("DROP TABLE packages;"));
    }
}
