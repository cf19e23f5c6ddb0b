//! Headless Chrome backend over the DevTools protocol.

use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::error::CdpError;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;

use super::{DomDriver, DomError, DomNode, Launcher};
use crate::config::StealthConfig;

/// Launches one Chrome process per session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeLauncher;

impl Launcher for ChromeLauncher {
    type Driver = ChromeDriver;

    async fn launch(&self, stealth: &StealthConfig) -> Result<ChromeDriver, DomError> {
        let config = browser_config(stealth)?;
        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DomError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    tracing::debug!(error = %err, "chrome handler event error");
                }
            }
        });

        match prepare_page(&browser, stealth).await {
            Ok(page) => {
                tracing::info!(headless = stealth.headless, "chrome session started");
                Ok(ChromeDriver {
                    browser: Some(browser),
                    page,
                    handler_task: Some(handler_task),
                })
            }
            Err(err) => {
                if let Err(close_err) = browser.close().await {
                    tracing::warn!(error = %close_err, "failed to close chrome after setup error");
                    let _ = browser.kill().await;
                }
                let _ = browser.wait().await;
                handler_task.abort();
                Err(err)
            }
        }
    }
}

fn browser_config(stealth: &StealthConfig) -> Result<BrowserConfig, DomError> {
    let mut builder = BrowserConfig::builder()
        .disable_default_args()
        .no_sandbox()
        .window_size(stealth.viewport_width, stealth.viewport_height)
        .viewport(Viewport {
            width: stealth.viewport_width,
            height: stealth.viewport_height,
            ..Viewport::default()
        })
        .args(stealth.launch_args());

    if !stealth.headless {
        builder = builder.with_head();
    }
    if let Some(path) = &stealth.chrome_executable {
        builder = builder.chrome_executable(path);
    }

    builder.build().map_err(DomError::Launch)
}

async fn prepare_page(browser: &Browser, stealth: &StealthConfig) -> Result<Page, DomError> {
    let page = browser.new_page("about:blank").await.map_err(from_cdp)?;
    page.set_user_agent(stealth.user_agent.as_str())
        .await
        .map_err(from_cdp)?;
    page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
        stealth.patch_script.clone(),
    ))
    .await
    .map_err(from_cdp)?;
    Ok(page)
}

fn from_cdp(err: CdpError) -> DomError {
    let message = err.to_string();
    if message.contains("No node with given id") || message.contains("Could not find node") {
        DomError::Detached
    } else {
        DomError::Backend(message)
    }
}

/// A live Chrome process with a single working tab.
pub struct ChromeDriver {
    browser: Option<Browser>,
    page: Page,
    handler_task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ChromeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChromeDriver")
            .field("open", &self.browser.is_some())
            .finish_non_exhaustive()
    }
}

impl DomDriver for ChromeDriver {
    type Node = ChromeNode;

    async fn navigate(&self, url: &str) -> Result<(), DomError> {
        self.page.goto(url).await.map_err(from_cdp)?;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ChromeNode>, DomError> {
        let elements = self.page.find_elements(selector).await.map_err(from_cdp)?;
        Ok(elements.into_iter().map(ChromeNode).collect())
    }

    async fn shutdown(&mut self) -> Result<(), DomError> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        let closed = browser.close().await;
        if closed.is_err() {
            let _ = browser.kill().await;
        }
        let _ = browser.wait().await;
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }

        closed.map(|_| ()).map_err(from_cdp)
    }
}

impl Drop for ChromeDriver {
    fn drop(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            tracing::warn!("chrome session dropped without shutdown; killing browser process");
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                runtime.spawn(async move {
                    let _ = browser.kill().await;
                    let _ = browser.wait().await;
                });
            }
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
    }
}

/// One element of the Chrome render.
#[derive(Debug)]
pub struct ChromeNode(Element);

impl DomNode for ChromeNode {
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>, DomError> {
        let elements = self.0.find_elements(selector).await.map_err(from_cdp)?;
        Ok(elements.into_iter().map(ChromeNode).collect())
    }

    async fn text(&self) -> Result<String, DomError> {
        let text = self.0.inner_text().await.map_err(from_cdp)?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>, DomError> {
        self.0.attribute(name).await.map_err(from_cdp)
    }

    async fn call_function(&self, function: &str) -> Result<serde_json::Value, DomError> {
        let returns = self
            .0
            .call_js_fn(function, false)
            .await
            .map_err(from_cdp)?;
        if let Some(details) = returns.exception_details {
            return Err(DomError::Script(details.text));
        }
        Ok(returns.result.value.unwrap_or(serde_json::Value::Null))
    }
}
