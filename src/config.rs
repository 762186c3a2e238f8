//! Configuration for webfanyi browser automation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::providers::ProviderKind;

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Browser/driver configuration.
    pub browser: BrowserConfig,
    /// Outbound proxy configuration.
    pub proxy: ProxyConfig,
    /// Extra HTTP headers installed once per session.
    pub headers: HeaderConfig,
    /// Provider used when a requested name is unknown.
    pub default_provider: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            proxy: ProxyConfig::default(),
            headers: HeaderConfig::default(),
            default_provider: ProviderKind::Baidu.name().into(),
        }
    }
}

/// Browser-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Path to the browser binary driven over CDP. Absence is a
    /// startup-class error surfaced at session open, not per call.
    pub driver_path: PathBuf,
    /// Run the browser in headless mode.
    pub headless: bool,
    /// Browser window width.
    pub window_width: u32,
    /// Browser window height.
    pub window_height: u32,
    /// Bounded wait applied to each page-load and element-locate step.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Additional browser arguments.
    pub args: Vec<String>,
    /// Sandbox mode (disable for containers).
    pub sandbox: bool,
    /// Directory for per-provider browser profiles. Defaults to the
    /// platform data dir when unset.
    pub user_data_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            driver_path: PathBuf::from("./browser_driver/chrome"),
            headless: true,
            window_width: 1280,
            window_height: 900,
            request_timeout: Duration::from_secs(5),
            args: Vec::new(),
            sandbox: true,
            user_data_dir: None,
        }
    }
}

/// Proxy protocol for outbound browser traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    /// Plain HTTP proxy.
    #[default]
    Http,
    /// SOCKS5 proxy.
    Socks5,
}

impl ProxyProtocol {
    /// URL scheme used in the `--proxy-server` argument.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Socks5 => "socks5",
        }
    }
}

/// Outbound proxy settings.
///
/// Read-only after session construction; changing the proxy requires
/// tearing down the session and opening a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Whether the proxy is applied at all.
    pub enabled: bool,
    /// Proxy protocol.
    pub protocol: ProxyProtocol,
    /// Proxy host.
    pub host: String,
    /// Proxy port.
    pub port: u16,
    /// Optional proxy username.
    pub username: Option<String>,
    /// Optional proxy password.
    pub password: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            protocol: ProxyProtocol::Http,
            host: "127.0.0.1".into(),
            port: 7890,
            username: None,
            password: None,
        }
    }
}

impl ProxyConfig {
    /// The `--proxy-server` launch argument, when the proxy is enabled.
    pub fn server_arg(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        Some(format!(
            "--proxy-server={}://{}:{}",
            self.protocol.scheme(),
            self.host,
            self.port
        ))
    }

    /// The `--proxy-auth` launch argument, when credentials are set.
    ///
    /// Credentials ride in plaintext on the process command line, and
    /// whether Chromium honors this argument at all is unverified; callers
    /// should validate against a real authenticated proxy before relying
    /// on it.
    pub fn auth_arg(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() => {
                Some(format!("--proxy-auth={}:{}", user, pass))
            }
            _ => None,
        }
    }
}

/// Extra HTTP headers set once per session via CDP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// User-Agent header value.
    pub user_agent: String,
    /// Accept-Language header value.
    pub accept_language: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36 Edg/91.0.864.59"
                .into(),
            accept_language: "zh-CN,zh;q=0.9".into(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Create a builder for configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The provider used when a requested name is unknown.
    ///
    /// An unparseable `default_provider` value degrades to Baidu, matching
    /// the registry fallback chain.
    pub fn default_provider_kind(&self) -> ProviderKind {
        ProviderKind::from_string(&self.default_provider).unwrap_or(ProviderKind::Baidu)
    }

    /// Directory holding per-provider browser profiles.
    pub fn storage_dir(&self) -> PathBuf {
        self.browser.user_data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("webfanyi")
        })
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the browser binary path.
    pub fn driver_path(mut self, path: PathBuf) -> Self {
        self.config.browser.driver_path = path;
        self
    }

    /// Set headless mode.
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.browser.headless = headless;
        self
    }

    /// Set the per-step request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.browser.request_timeout = timeout;
        self
    }

    /// Set the proxy configuration.
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.config.proxy = proxy;
        self
    }

    /// Set the fallback provider for unknown names.
    pub fn default_provider(mut self, kind: ProviderKind) -> Self {
        self.config.default_provider = kind.name().into();
        self
    }

    /// Disable the browser sandbox (for containers).
    pub fn no_sandbox(mut self) -> Self {
        self.config.browser.sandbox = false;
        self
    }

    /// Set the profile storage directory.
    pub fn user_data_dir(mut self, path: PathBuf) -> Self {
        self.config.browser.user_data_dir = Some(path);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_disabled_emits_no_args() {
        let proxy = ProxyConfig::default();
        assert!(proxy.server_arg().is_none());
        assert!(proxy.auth_arg().is_none());
    }

    #[test]
    fn proxy_server_arg_format() {
        let proxy = ProxyConfig {
            enabled: true,
            protocol: ProxyProtocol::Socks5,
            host: "10.0.0.2".into(),
            port: 1080,
            ..Default::default()
        };
        assert_eq!(
            proxy.server_arg().unwrap(),
            "--proxy-server=socks5://10.0.0.2:1080"
        );
        // No credentials, no auth arg.
        assert!(proxy.auth_arg().is_none());
    }

    #[test]
    fn proxy_auth_requires_nonempty_username() {
        let mut proxy = ProxyConfig {
            enabled: true,
            username: Some("".into()),
            password: Some("secret".into()),
            ..Default::default()
        };
        assert!(proxy.auth_arg().is_none());

        proxy.username = Some("user".into());
        assert_eq!(proxy.auth_arg().unwrap(), "--proxy-auth=user:secret");
    }

    #[test]
    fn default_provider_falls_back_to_baidu() {
        let config = Config::default();
        assert_eq!(config.default_provider_kind(), ProviderKind::Baidu);

        let config = Config::builder()
            .default_provider(ProviderKind::Google)
            .build();
        assert_eq!(config.default_provider_kind(), ProviderKind::Google);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::builder()
            .headless(false)
            .request_timeout(Duration::from_secs(8))
            .default_provider(ProviderKind::DeepL)
            .build();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert!(!parsed.browser.headless);
        assert_eq!(parsed.browser.request_timeout, Duration::from_secs(8));
        assert_eq!(parsed.default_provider_kind(), ProviderKind::DeepL);
    }
}
