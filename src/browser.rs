//! Browser launch configuration.
//!
//! The browser binary is fixed configuration, not something the library
//! hunts for: a missing binary is a broken local environment and is
//! surfaced once as [`Error::DriverInit`] when a session opens.

use std::path::PathBuf;

use crate::config::{Config, ProxyConfig};
use crate::error::{Error, Result};

/// Assembled launch parameters for one browser process.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    /// Browser executable to spawn.
    pub executable: PathBuf,
    /// Run without a visible window.
    pub headless: bool,
    /// Viewport/window width.
    pub window_width: u32,
    /// Viewport/window height.
    pub window_height: u32,
    /// Profile directory for this session.
    pub user_data_dir: PathBuf,
    /// Proxy settings baked into the launch arguments.
    pub proxy: ProxyConfig,
    /// Disable the sandbox (containers, CI).
    pub no_sandbox: bool,
    /// Caller-supplied extra arguments.
    pub extra_args: Vec<String>,
}

impl LaunchSpec {
    /// Build a launch spec for one provider session from the configuration.
    ///
    /// Each provider gets its own profile directory so accumulated page
    /// state never bleeds across providers.
    pub fn for_provider(config: &Config, provider_name: &str) -> Self {
        Self {
            executable: config.browser.driver_path.clone(),
            headless: config.browser.headless,
            window_width: config.browser.window_width,
            window_height: config.browser.window_height,
            user_data_dir: config.storage_dir().join(provider_name),
            proxy: config.proxy.clone(),
            no_sandbox: !config.browser.sandbox,
            extra_args: config.browser.args.clone(),
        }
    }

    /// Verify the spec points at a launchable browser.
    pub fn validate(&self) -> Result<()> {
        if !self.executable.exists() {
            return Err(Error::DriverInit(format!(
                "browser binary not found at {}",
                self.executable.display()
            )));
        }
        Ok(())
    }

    /// Generate the Chromium command-line arguments for this spec.
    ///
    /// Headless mode and the executable path are handled by the CDP
    /// launcher itself; everything else rides through here.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-gpu".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-extensions".to_string(),
            "--disable-background-networking".to_string(),
            "--no-first-run".to_string(),
        ];

        if self.no_sandbox {
            args.push("--no-sandbox".into());
            args.push("--disable-setuid-sandbox".into());
        }

        if let Some(server) = self.proxy.server_arg() {
            args.push(server);
        }
        if let Some(auth) = self.proxy.auth_arg() {
            args.push(auth);
        }

        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyProtocol;

    fn spec() -> LaunchSpec {
        LaunchSpec::for_provider(&Config::default(), "baidu")
    }

    #[test]
    fn profile_dir_is_per_provider() {
        let config = Config::default();
        let a = LaunchSpec::for_provider(&config, "baidu");
        let b = LaunchSpec::for_provider(&config, "deepl");
        assert_ne!(a.user_data_dir, b.user_data_dir);
        assert!(a.user_data_dir.ends_with("baidu"));
    }

    #[test]
    fn validate_rejects_missing_binary() {
        let mut s = spec();
        s.executable = PathBuf::from("/nonexistent/browser/binary");
        let err = s.validate().unwrap_err();
        assert!(matches!(err, Error::DriverInit(_)));
    }

    #[test]
    fn proxy_args_present_when_enabled() {
        let mut s = spec();
        s.proxy = ProxyConfig {
            enabled: true,
            protocol: ProxyProtocol::Http,
            host: "127.0.0.1".into(),
            port: 7890,
            username: Some("u".into()),
            password: Some("p".into()),
        };
        let args = s.to_args();
        assert!(args.contains(&"--proxy-server=http://127.0.0.1:7890".to_string()));
        assert!(args.contains(&"--proxy-auth=u:p".to_string()));
    }

    #[test]
    fn sandbox_flags_only_when_disabled() {
        let s = spec();
        assert!(!s.to_args().contains(&"--no-sandbox".to_string()));

        let mut s = spec();
        s.no_sandbox = true;
        assert!(s.to_args().contains(&"--no-sandbox".to_string()));
    }
}
