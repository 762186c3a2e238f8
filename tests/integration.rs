//! Integration tests for webfanyi.
//!
//! Everything here runs without a browser; tests that need a live page are
//! driver-level unit tests with a scripted driver. The one boundary that
//! does reach the real session path is driver-binary validation, which
//! fails fast before any process is spawned.

use std::time::Duration;

use webfanyi::{
    engine, providers, Config, EngineState, Error, LaunchSpec, ProviderKind, ProxyConfig,
    ProxyProtocol, Translator,
};

// ============================================================================
// Registry / Descriptor Table
// ============================================================================

#[test]
fn test_registry_binds_exact_descriptors() {
    for kind in ProviderKind::all() {
        let descriptor = providers::resolve(kind.name(), ProviderKind::Baidu);
        assert_eq!(descriptor.kind, *kind, "resolve({}) bound wrong provider", kind);
        assert_eq!(descriptor.url, kind.descriptor().url);
        assert_eq!(descriptor.input_selector, kind.descriptor().input_selector);
    }
}

#[test]
fn test_google_translator_resolves_to_google_url() {
    let descriptor = providers::resolve("GoogleTranslator", ProviderKind::Baidu);
    assert_eq!(descriptor.url, "https://translate.google.com/");
}

#[test]
fn test_unknown_provider_falls_back_deterministically() {
    for _ in 0..3 {
        let descriptor = providers::resolve("not-a-translator", ProviderKind::Youdao);
        assert_eq!(descriptor.kind, ProviderKind::Youdao);
    }
}

#[test]
fn test_seven_providers_in_the_table() {
    assert_eq!(ProviderKind::all().len(), 7);
}

// ============================================================================
// Settle Delay Heuristic
// ============================================================================

#[test]
fn test_settle_delay_monotone_over_input_length() {
    let base = Duration::from_secs(1);
    let mut previous = Duration::ZERO;
    for len in (0..500).step_by(7) {
        let delay = engine::settle_delay(base, &"a".repeat(len));
        assert!(delay >= previous);
        previous = delay;
    }
}

#[test]
fn test_settle_delay_includes_provider_base() {
    let deepl = ProviderKind::DeepL.descriptor();
    assert_eq!(
        engine::settle_delay(deepl.settle_delay, "short"),
        Duration::from_secs(2)
    );
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_toml_roundtrip() {
    let config = Config::builder()
        .headless(true)
        .request_timeout(Duration::from_secs(5))
        .default_provider(ProviderKind::Google)
        .build();

    let dir = std::env::temp_dir().join("webfanyi_test_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");

    config.save(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert!(loaded.browser.headless);
    assert_eq!(loaded.browser.request_timeout, Duration::from_secs(5));
    assert_eq!(loaded.default_provider_kind(), ProviderKind::Google);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_proxy_launch_arguments() {
    let proxy = ProxyConfig {
        enabled: true,
        protocol: ProxyProtocol::Http,
        host: "127.0.0.1".into(),
        port: 7890,
        username: None,
        password: None,
    };
    assert_eq!(
        proxy.server_arg().as_deref(),
        Some("--proxy-server=http://127.0.0.1:7890")
    );

    let disabled = ProxyConfig::default();
    assert!(disabled.server_arg().is_none());
}

#[test]
fn test_launch_spec_rejects_missing_driver_binary() {
    let config = Config::builder()
        .driver_path("/nonexistent/browser/binary".into())
        .build();
    let spec = LaunchSpec::for_provider(&config, "baidu");

    let err = spec.validate().unwrap_err();
    assert!(matches!(err, Error::DriverInit(_)));
}

// ============================================================================
// Translator Boundary
// ============================================================================

#[tokio::test]
async fn test_missing_driver_binary_is_a_startup_error() {
    let config = Config::builder()
        .driver_path("/nonexistent/browser/binary".into())
        .build();
    let translator = Translator::spawn(config);

    // Initialization fails once, up front.
    let err = translator
        .switch_provider("baidu", ProxyConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DriverInit(_)));
    assert_eq!(translator.state(), EngineState::Failed);

    // Later calls are rejected, not retried per-translation.
    let err = translator.translate("hello").await.unwrap_err();
    assert!(matches!(err, Error::SessionClosed));

    translator.shutdown().await;
}

#[tokio::test]
async fn test_translate_without_initialization_is_rejected() {
    let translator = Translator::spawn(Config::default());

    let err = translator.translate("hello").await.unwrap_err();
    assert!(matches!(err, Error::SessionClosed));
    assert_eq!(translator.state(), EngineState::Uninitialized);

    translator.shutdown().await;
}

#[tokio::test]
async fn test_blank_input_is_invalid() {
    let translator = Translator::spawn(Config::default());

    let err = translator.translate("  \n\t ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));

    translator.shutdown().await;
}
