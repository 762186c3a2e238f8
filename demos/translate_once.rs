//! Walk the translators end to end against real provider pages.
//!
//! Requires a Chromium-based browser binary; point `WEBFANYI_BROWSER` at it
//! (defaults to `/usr/bin/chromium`). Run with:
//!
//! ```sh
//! cargo run --example translate_once
//! ```

use std::time::Duration;

use webfanyi::{Config, ProviderKind, ProxyConfig, Translator};

#[tokio::main]
async fn main() -> webfanyi::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("webfanyi=debug")),
        )
        .init();

    let driver_path = std::env::var("WEBFANYI_BROWSER")
        .unwrap_or_else(|_| "/usr/bin/chromium".into());

    let config = Config::builder()
        .driver_path(driver_path.into())
        .headless(true)
        .request_timeout(Duration::from_secs(5))
        .build();

    let translator = Translator::spawn(config);

    for provider in ProviderKind::all() {
        println!("=== {} ===", provider);

        if let Err(e) = translator
            .switch_provider(provider.name(), ProxyConfig::default())
            .await
        {
            eprintln!("initialization failed: {}", e);
            continue;
        }

        for text in ["Hello, world!", "Rust 自动化测试"] {
            match translator.translate(text).await {
                Ok(result) => println!("{:?} -> {:?}", text, result.text),
                Err(e) => eprintln!("translation failed: {}", e),
            }
        }
    }

    translator.shutdown().await;
    Ok(())
}
