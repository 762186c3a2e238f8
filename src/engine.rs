//! The generic translation algorithm driven by a provider descriptor.
//!
//! One sequence of steps serves every provider; everything
//! provider-specific lives in the [`ProviderDescriptor`]. Each step has a
//! bounded wait and a distinct failure mode so a broken provider page shows
//! up in logs as *which* step died, not just "translation failed".

use std::time::Duration;

use crate::driver::BrowserDriver;
use crate::error::{ElementRole, Error, Result};
use crate::providers::ProviderDescriptor;

/// Wait applied before reading the output element.
///
/// Longer inputs need proportionally more time for the provider's
/// asynchronous translation to land: one extra second per 50 characters on
/// top of the provider's base delay. A heuristic, not a guarantee: very
/// long inputs on slow networks can still read back empty.
pub fn settle_delay(base: Duration, text: &str) -> Duration {
    base + Duration::from_secs((text.chars().count() / 50) as u64)
}

/// Run one translation end-to-end against a live driver.
///
/// No retry happens here; per-call failures are surfaced to the caller,
/// who decides whether to resubmit. A failure to reset the page afterwards
/// is logged but does not fail the call; it degrades future calls, not
/// this one.
pub async fn translate<D>(
    driver: &mut D,
    descriptor: &ProviderDescriptor,
    text: &str,
    request_timeout: Duration,
) -> Result<String>
where
    D: BrowserDriver + ?Sized,
{
    tracing::debug!(provider = %descriptor.kind, chars = text.chars().count(), "starting translation");

    // Fresh navigation each call; stale page state is the enemy here.
    driver
        .goto(descriptor.url)
        .await
        .map_err(|e| unexpected("navigate", e))?;
    match driver.wait_ready_state(request_timeout).await {
        Ok(()) => {}
        Err(Error::Timeout(ms)) => return Err(Error::PageLoadTimeout(ms)),
        Err(e) => return Err(unexpected("ready-state wait", e)),
    }

    // The most volatile step: provider markup changes without notice.
    locate(driver, descriptor.input_selector, ElementRole::Input, request_timeout).await?;

    // Keystrokes, so the provider's input-triggered translation fires.
    driver
        .type_keys(descriptor.input_selector, text)
        .await
        .map_err(|e| unexpected("keystroke injection", e))?;

    locate(driver, descriptor.output_selector, ElementRole::Output, request_timeout).await?;

    let wait = settle_delay(descriptor.settle_delay, text);
    tracing::debug!(provider = %descriptor.kind, ?wait, "settling before extraction");
    tokio::time::sleep(wait).await;

    let result = driver
        .element_text(descriptor.output_selector)
        .await
        .map_err(|e| unexpected("output extraction", e))?;
    if result.trim().is_empty() {
        return Err(Error::EmptyResult);
    }

    // Reset provider-side state so the session can be reused.
    if let Err(e) = reset_page(driver, descriptor, request_timeout).await {
        tracing::warn!(
            provider = %descriptor.kind,
            error = %e,
            "failed to clear provider input; next call may see stale state"
        );
    }

    Ok(result)
}

async fn locate<D>(
    driver: &mut D,
    selector: &str,
    role: ElementRole,
    timeout: Duration,
) -> Result<()>
where
    D: BrowserDriver + ?Sized,
{
    match driver.wait_for_element(selector, timeout).await {
        Ok(()) => Ok(()),
        Err(Error::Timeout(_)) => Err(Error::ElementNotFound {
            role,
            selector: selector.to_string(),
        }),
        Err(e) => Err(unexpected("element wait", e)),
    }
}

async fn reset_page<D>(
    driver: &mut D,
    descriptor: &ProviderDescriptor,
    timeout: Duration,
) -> Result<()>
where
    D: BrowserDriver + ?Sized,
{
    match driver
        .wait_for_element(descriptor.clear_selector, timeout)
        .await
    {
        Ok(()) => driver.click(descriptor.clear_selector).await,
        Err(Error::Timeout(_)) => Err(Error::ElementNotFound {
            role: ElementRole::Clear,
            selector: descriptor.clear_selector.to_string(),
        }),
        Err(e) => Err(e),
    }
}

/// Wrap an unanticipated driver error, preserving the cause in the logs.
fn unexpected(step: &str, err: Error) -> Error {
    tracing::error!(step, error = %err, "unexpected automation failure");
    match err {
        Error::Automation(_) => err,
        other => Error::Automation(format!("{}: {}", step, other)),
    }
}
