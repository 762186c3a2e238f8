//! Browser session lifecycle over chromiumoxide.
//!
//! One [`Session`] owns one browser process, bound to a single provider and
//! proxy configuration for its whole life. Changing provider or proxy means
//! closing the session and opening a new one; nothing is reconfigured in
//! place.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, Headers, SetExtraHttpHeadersParams,
};
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::browser::LaunchSpec;
use crate::config::Config;
use crate::driver::BrowserDriver;
use crate::error::{Error, Result};
use crate::providers::ProviderDescriptor;

/// Poll interval for readiness and element waits.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// One live browser-automation connection bound to a single provider.
///
/// Not `Clone`: the browser process is exclusively owned, and all driver
/// operations take `&mut self`, so two in-flight translations against the
/// same session cannot exist.
pub struct Session {
    descriptor: ProviderDescriptor,
    browser: Option<Browser>,
    page: Page,
    handler: JoinHandle<()>,
}

impl Session {
    /// Launch a browser and bind it to a provider.
    ///
    /// Fails with [`Error::DriverInit`] when the binary is missing at the
    /// configured path or the browser process cannot be started. That is a
    /// broken local environment, surfaced immediately with no retry.
    pub async fn open(descriptor: ProviderDescriptor, config: &Config) -> Result<Self> {
        let spec = LaunchSpec::for_provider(config, descriptor.kind.name());
        spec.validate()?;

        std::fs::create_dir_all(&spec.user_data_dir).map_err(|e| {
            Error::DriverInit(format!(
                "failed to create profile dir {}: {}",
                spec.user_data_dir.display(),
                e
            ))
        })?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(&spec.executable)
            .user_data_dir(&spec.user_data_dir)
            .viewport(Viewport {
                width: spec.window_width,
                height: spec.window_height,
                device_scale_factor: None,
                emulating_mobile: false,
                is_landscape: false,
                has_touch: false,
            });

        if !spec.headless {
            builder = builder.with_head();
        }
        for arg in spec.to_args() {
            builder = builder.arg(arg);
        }

        let browser_config = builder
            .build()
            .map_err(Error::DriverInit)?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::DriverInit(format!("failed to launch browser: {}", e)))?;

        // Drain CDP events for the life of the session.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::warn!("browser handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                browser.close().await.ok();
                browser.wait().await.ok();
                handler.abort();
                return Err(Error::DriverInit(format!("failed to create page: {}", e)));
            }
        };

        let mut session = Self {
            descriptor,
            browser: Some(browser),
            page,
            handler,
        };

        if let Err(e) = session.install_headers(config).await {
            session.close().await.ok();
            return Err(Error::DriverInit(format!(
                "failed to install session headers: {}",
                e
            )));
        }

        tracing::info!(provider = %session.descriptor.kind, "browser session created");
        Ok(session)
    }

    /// The descriptor this session is bound to.
    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// Set the custom header set once, at session creation.
    async fn install_headers(&mut self, config: &Config) -> Result<()> {
        self.page
            .execute(EnableParams::default())
            .await
            .map_err(|e| Error::Automation(format!("network enable failed: {}", e)))?;

        let headers = Headers::new(serde_json::json!({
            "User-Agent": config.headers.user_agent,
            "Accept-Language": config.headers.accept_language,
        }));
        self.page
            .execute(SetExtraHttpHeadersParams::new(headers))
            .await
            .map_err(|e| Error::Automation(format!("header injection failed: {}", e)))?;

        Ok(())
    }

    async fn find_element(&self, selector: &str) -> Result<chromiumoxide::Element> {
        self.page
            .find_element(selector)
            .await
            .map_err(|e| Error::Automation(format!("element lookup ({}): {}", selector, e)))
    }
}

#[async_trait]
impl BrowserDriver for Session {
    async fn goto(&mut self, url: &str) -> Result<()> {
        tracing::debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| Error::Automation(format!("navigation failed: {}", e)))?;
        Ok(())
    }

    async fn wait_ready_state(&mut self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            let state: String = self
                .page
                .evaluate("document.readyState")
                .await
                .map_err(|e| Error::Automation(format!("readyState query failed: {}", e)))?
                .into_value()
                .map_err(|e| Error::Automation(format!("readyState conversion failed: {}", e)))?;
            if state == "complete" {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        Err(Error::Timeout(timeout.as_millis() as u64))
    }

    async fn wait_for_element(&mut self, selector: &str, timeout: Duration) -> Result<()> {
        tracing::debug!(selector, "waiting for element");
        let start = Instant::now();
        while start.elapsed() < timeout {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
        Err(Error::Timeout(timeout.as_millis() as u64))
    }

    async fn type_keys(&mut self, selector: &str, text: &str) -> Result<()> {
        tracing::debug!(selector, "typing text");
        let element = self.find_element(selector).await?;

        // Click to focus, then send real keystrokes so the page's input
        // handlers fire.
        element
            .click()
            .await
            .map_err(|e| Error::Automation(format!("click to focus failed: {}", e)))?;
        element
            .type_str(text)
            .await
            .map_err(|e| Error::Automation(format!("typing failed: {}", e)))?;
        Ok(())
    }

    async fn element_text(&mut self, selector: &str) -> Result<String> {
        let element = self.find_element(selector).await?;
        let text = element
            .inner_text()
            .await
            .map_err(|e| Error::Automation(format!("text extraction failed: {}", e)))?;
        Ok(text.unwrap_or_default())
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        tracing::debug!(selector, "clicking element");
        let element = self.find_element(selector).await?;
        element
            .click()
            .await
            .map_err(|e| Error::Automation(format!("click failed: {}", e)))?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // Idempotent: the browser handle is taken exactly once; later calls
        // find nothing to release.
        if let Some(mut browser) = self.browser.take() {
            tracing::info!(provider = %self.descriptor.kind, "closing browser session");
            browser.close().await.ok();
            browser.wait().await.ok();
            self.handler.abort();
        }
        Ok(())
    }
}
