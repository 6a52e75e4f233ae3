use std::fmt;

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator, elements::Element};
use serde_json::{Map, Value, json};

use crate::config::Browser;
use crate::error::{AppError, Result};

/// How a page element is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Element with the given `id` attribute.
    Id(&'static str),
    /// `<button>` whose text contains the given string.
    ButtonText(&'static str),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Id(id) => write!(f, "#{}", id),
            Target::ButtonText(text) => write!(f, "button containing '{}'", text),
        }
    }
}

impl Target {
    pub(crate) fn not_found(&self) -> AppError {
        AppError::ElementNotFound {
            target: self.to_string(),
        }
    }
}

/// The browser operations the login probe needs. Every lookup that finds
/// nothing fails with `AppError::ElementNotFound`.
#[async_trait]
pub trait BrowserSession: Send {
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Non-failing presence check, used for readiness polling.
    async fn is_present(&mut self, target: Target) -> Result<bool>;

    /// Fire the element's click handler from script instead of the pointer.
    async fn activate(&mut self, target: Target) -> Result<()>;

    async fn click(&mut self, target: Target) -> Result<()>;

    async fn send_keys(&mut self, target: Target, text: &str) -> Result<()>;

    /// Value of `document.readyState`.
    async fn ready_state(&mut self) -> Result<String>;

    async fn title(&mut self) -> Result<String>;

    async fn current_url(&mut self) -> Result<String>;

    /// End the session. Called exactly once, on every exit path.
    async fn close(&mut self) -> Result<()>;
}

/// WebDriver capabilities for the chosen engine.
pub fn capabilities(browser: Browser, headless: bool) -> Map<String, Value> {
    let mut caps = Map::new();
    match browser {
        Browser::Chrome => {
            let mut args = vec!["--no-sandbox", "--disable-dev-shm-usage"];
            if headless {
                args.push("--headless=new");
            }
            caps.insert("browserName".into(), json!("chrome"));
            caps.insert("goog:chromeOptions".into(), json!({ "args": args }));
        }
        Browser::Firefox => {
            let args: Vec<&str> = if headless { vec!["-headless"] } else { Vec::new() };
            caps.insert("browserName".into(), json!("firefox"));
            caps.insert("moz:firefoxOptions".into(), json!({ "args": args }));
        }
    }
    caps
}

const READY_STATE_SCRIPT: &str = "return document.readyState;";

/// `document.readyState` is always a string; anything else means the script
/// ran somewhere unexpected and must not pass for a loading page.
fn ready_state_from(value: Value) -> Result<String> {
    match value {
        Value::String(state) => Ok(state),
        other => Err(AppError::UnexpectedScriptResult {
            script: READY_STATE_SCRIPT,
            value: other.to_string(),
        }),
    }
}

/// A live WebDriver session.
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    pub async fn connect(webdriver_url: &str, browser: Browser, headless: bool) -> Result<Self> {
        tracing::info!(
            "Starting {:?} session via {} (headless: {})",
            browser,
            webdriver_url,
            headless
        );

        let client = ClientBuilder::native()
            .capabilities(capabilities(browser, headless))
            .connect(webdriver_url)
            .await?;

        Ok(Self { client })
    }

    async fn find(&self, target: Target) -> Result<Element> {
        let found = match target {
            Target::Id(id) => self.client.find_all(Locator::Id(id)).await?,
            Target::ButtonText(text) => {
                let xpath = format!("//button[contains(text(), '{}')]", text);
                self.client.find_all(Locator::XPath(&xpath)).await?
            }
        };

        found.into_iter().next().ok_or_else(|| target.not_found())
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn is_present(&mut self, target: Target) -> Result<bool> {
        match self.find(target).await {
            Ok(_) => Ok(true),
            Err(AppError::ElementNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn activate(&mut self, target: Target) -> Result<()> {
        let element = self.find(target).await?;
        let handle = serde_json::to_value(&element)?;
        self.client
            .execute("arguments[0].click();", vec![handle])
            .await?;
        Ok(())
    }

    async fn click(&mut self, target: Target) -> Result<()> {
        self.find(target).await?.click().await?;
        Ok(())
    }

    async fn send_keys(&mut self, target: Target, text: &str) -> Result<()> {
        self.find(target).await?.send_keys(text).await?;
        Ok(())
    }

    async fn ready_state(&mut self) -> Result<String> {
        let state = self.client.execute(READY_STATE_SCRIPT, Vec::new()).await?;
        ready_state_from(state)
    }

    async fn title(&mut self) -> Result<String> {
        Ok(self.client.title().await?)
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.client.current_url().await?.to_string())
    }

    async fn close(&mut self) -> Result<()> {
        self.client.clone().close().await?;
        Ok(())
    }
}
