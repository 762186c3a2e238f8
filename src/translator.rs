//! Public facade: a single-worker job queue in front of the engine.
//!
//! All browser work, session initialization included, happens on one
//! dedicated worker task, never on the caller's thread. The worker holds at
//! most one live session and processes one job at a time: results come back
//! in submission order, two translations can never race on a session's DOM,
//! and a provider switch can never tear a session down underneath an
//! in-flight call.

use std::fmt;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::{Config, ProxyConfig};
use crate::driver::BrowserDriver;
use crate::engine;
use crate::error::{Error, Result};
use crate::providers::{self, ProviderDescriptor, ProviderKind};
use crate::session::Session;

/// Lifecycle of the engine behind the facade.
///
/// Transitions happen only inside the worker, so they are atomic with
/// respect to queued jobs: a request submitted while `Initializing` simply
/// waits its turn instead of racing a half-constructed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No session has been requested yet.
    #[default]
    Uninitialized,
    /// A session is being torn down and/or constructed.
    Initializing,
    /// A session is live and accepting translations.
    Ready,
    /// The last initialization failed. Recoverable only by another
    /// explicit switch; never auto-retried.
    Failed,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Uninitialized => write!(f, "uninitialized"),
            EngineState::Initializing => write!(f, "initializing"),
            EngineState::Ready => write!(f, "ready"),
            EngineState::Failed => write!(f, "failed"),
        }
    }
}

/// A completed translation.
#[derive(Debug, Clone)]
pub struct Translation {
    /// The scraped translation text.
    pub text: String,
    /// Provider that produced it.
    pub provider: ProviderKind,
    /// When the result was extracted.
    pub timestamp: DateTime<Utc>,
}

type BoxedDriver = Box<dyn BrowserDriver>;

/// Seam for constructing sessions, so worker behavior is testable with
/// scripted drivers.
type SessionOpener =
    Box<dyn Fn(ProviderDescriptor, Config) -> BoxFuture<'static, Result<BoxedDriver>> + Send>;

enum Job {
    Switch {
        name: String,
        proxy: ProxyConfig,
        reply: oneshot::Sender<Result<ProviderKind>>,
    },
    Translate {
        text: String,
        reply: oneshot::Sender<Result<Translation>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Handle to the translation worker.
///
/// Cheap to share by reference from a GUI event loop; every method queues a
/// job and resolves when the worker gets to it.
pub struct Translator {
    jobs: mpsc::UnboundedSender<Job>,
    state: watch::Receiver<EngineState>,
    worker: Option<JoinHandle<()>>,
}

impl Translator {
    /// Spawn the worker with real browser sessions.
    ///
    /// Must be called from within a tokio runtime. No session is opened
    /// until the first [`switch_provider`](Self::switch_provider) call.
    pub fn spawn(config: Config) -> Self {
        Self::spawn_with_opener(
            config,
            Box::new(|descriptor, config| {
                Box::pin(async move {
                    let session = Session::open(descriptor, &config).await?;
                    Ok(Box::new(session) as BoxedDriver)
                })
            }),
        )
    }

    pub(crate) fn spawn_with_opener(config: Config, opener: SessionOpener) -> Self {
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(EngineState::Uninitialized);

        let worker = Worker {
            config,
            opener,
            state: state_tx,
            current: None,
        };
        let handle = tokio::spawn(worker.run(jobs_rx));

        Self {
            jobs: jobs_tx,
            state: state_rx,
            worker: Some(handle),
        }
    }

    /// Switch to (or first initialize) a provider.
    ///
    /// Queued behind any in-flight work. The previous session is closed
    /// before the new one opens; on [`Error::DriverInit`] the engine lands
    /// in [`EngineState::Failed`] and stays there until the caller retries
    /// explicitly.
    ///
    /// Unknown provider names resolve to the configured default. Returns
    /// the provider actually selected.
    pub async fn switch_provider(&self, name: &str, proxy: ProxyConfig) -> Result<ProviderKind> {
        let (reply, response) = oneshot::channel();
        self.jobs
            .send(Job::Switch {
                name: name.to_string(),
                proxy,
                reply,
            })
            .map_err(|_| Error::SessionClosed)?;
        response.await.map_err(|_| Error::SessionClosed)?
    }

    /// Translate one line of text against the current session.
    ///
    /// Rejected with [`Error::SessionClosed`] unless a session is live.
    /// Blank input is rejected up front without touching the queue.
    pub async fn translate(&self, text: &str) -> Result<Translation> {
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("nothing to translate".into()));
        }

        let (reply, response) = oneshot::channel();
        self.jobs
            .send(Job::Translate {
                text: text.to_string(),
                reply,
            })
            .map_err(|_| Error::SessionClosed)?;
        response.await.map_err(|_| Error::SessionClosed)?
    }

    /// Current engine state.
    pub fn state(&self) -> EngineState {
        *self.state.borrow()
    }

    /// Watch channel for observing state transitions (e.g. to enable a
    /// translate button only when `Ready`).
    pub fn state_watch(&self) -> watch::Receiver<EngineState> {
        self.state.clone()
    }

    /// Close the session and stop the worker.
    ///
    /// Queued behind in-flight work like everything else, so an active
    /// translation finishes (or fails on its own terms) first.
    pub async fn shutdown(mut self) {
        let (reply, done) = oneshot::channel();
        if self.jobs.send(Job::Shutdown { reply }).is_ok() {
            done.await.ok();
        }
        if let Some(handle) = self.worker.take() {
            handle.await.ok();
        }
    }
}

struct Worker {
    config: Config,
    opener: SessionOpener,
    state: watch::Sender<EngineState>,
    current: Option<(ProviderDescriptor, BoxedDriver)>,
}

impl Worker {
    async fn run(mut self, mut jobs: mpsc::UnboundedReceiver<Job>) {
        while let Some(job) = jobs.recv().await {
            match job {
                Job::Switch { name, proxy, reply } => {
                    let result = self.switch(&name, proxy).await;
                    reply.send(result).ok();
                }
                Job::Translate { text, reply } => {
                    let result = self.translate(&text).await;
                    reply.send(result).ok();
                }
                Job::Shutdown { reply } => {
                    self.close_current().await;
                    self.state.send_replace(EngineState::Uninitialized);
                    reply.send(()).ok();
                    return;
                }
            }
        }

        // All handles dropped without an explicit shutdown; still release
        // the browser process.
        self.close_current().await;
    }

    async fn switch(&mut self, name: &str, proxy: ProxyConfig) -> Result<ProviderKind> {
        self.state.send_replace(EngineState::Initializing);
        self.close_current().await;

        let descriptor = providers::resolve(name, self.config.default_provider_kind());
        let kind = descriptor.kind;
        tracing::info!(provider = %kind, "initializing session");

        let mut config = self.config.clone();
        config.proxy = proxy;

        match (self.opener)(descriptor.clone(), config).await {
            Ok(driver) => {
                self.current = Some((descriptor, driver));
                self.state.send_replace(EngineState::Ready);
                Ok(kind)
            }
            Err(e) => {
                tracing::error!(provider = %kind, error = %e, "session initialization failed");
                self.state.send_replace(EngineState::Failed);
                Err(e)
            }
        }
    }

    async fn translate(&mut self, text: &str) -> Result<Translation> {
        let timeout = self.config.browser.request_timeout;
        match self.current.as_mut() {
            None => Err(Error::SessionClosed),
            Some((descriptor, driver)) => {
                let result = engine::translate(driver.as_mut(), descriptor, text, timeout).await?;
                Ok(Translation {
                    text: result,
                    provider: descriptor.kind,
                    timestamp: Utc::now(),
                })
            }
        }
    }

    async fn close_current(&mut self) {
        if let Some((descriptor, mut driver)) = self.current.take() {
            tracing::info!(provider = %descriptor.kind, "releasing session");
            driver.close().await.ok();
        }
    }
}
