//! # webfanyi
//!
//! Browser-automation core for public web translation services.
//!
//! This crate drives a real Chromium-based browser against the web UIs of
//! public translation services (Baidu, Youdao, Caiyun, Ali, Tencent
//! TranSmart, Google, DeepL), injects source text as keystrokes, scrapes
//! the rendered result, and delivers it back over an async job boundary.
//! It is the engine half of a desktop translation utility; window chrome,
//! theming, and clipboard plumbing live in the GUI that calls into it.
//!
//! ## Design
//!
//! Providers are uncontrolled third-party pages whose markup changes
//! without notice, so resilience comes from isolation: each provider is
//! pure data (a [`providers::ProviderDescriptor`] with a URL, three CSS
//! locators, and a settle delay) and a single generic algorithm in
//! [`engine`] drives all of them. When a provider redesigns, only its
//! table entry changes.
//!
//! All browser work runs on one dedicated worker task behind
//! [`Translator`]: at most one live session, one job at a time, with
//! results delivered in submission order.
//!
//! ## Example
//!
//! ```rust,ignore
//! use webfanyi::{Config, ProxyConfig, Translator};
//!
//! #[tokio::main]
//! async fn main() -> webfanyi::Result<()> {
//!     let translator = Translator::spawn(Config::default());
//!
//!     translator.switch_provider("google", ProxyConfig::default()).await?;
//!     let result = translator.translate("Hello, world!").await?;
//!     println!("{}", result.text);
//!
//!     translator.shutdown().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod browser;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod providers;
pub mod session;
pub mod translator;

pub use browser::LaunchSpec;
pub use config::{Config, HeaderConfig, ProxyConfig, ProxyProtocol};
pub use driver::BrowserDriver;
pub use error::{ElementRole, Error, Result};
pub use providers::{ProviderDescriptor, ProviderKind};
pub use session::Session;
pub use translator::{EngineState, Translation, Translator};
