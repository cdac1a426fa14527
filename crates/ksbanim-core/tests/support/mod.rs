#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use ksbanim_core::action::PackageSpec;
use ksbanim_core::dependency::PackageManager;
use ksbanim_core::error::ActionError;
use ksbanim_core::extension::ExtensionHost;
use ksbanim_core::fetch::FileFetcher;
use ksbanim_core::host::{Host, Notice, ProgressHandle, ProgressSink};
use ksbanim_core::log::Logger;
use ksbanim_core::runner::ActionRunner;

/// Everything a host observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    ProgressOpened(String),
    ProgressReport(String),
    ProgressClosed,
    Notice(Notice),
}

#[derive(Default)]
pub struct RecordingHost {
    roots: Vec<PathBuf>,
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl RecordingHost {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            events: Arc::default(),
        }
    }

    pub fn without_workspace() -> Self {
        Self::new(Vec::new())
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&HostEvent) -> bool) -> usize {
        self.events().iter().filter(|event| pred(event)).count()
    }

    pub fn progress_opened(&self) -> usize {
        self.count(|e| matches!(e, HostEvent::ProgressOpened(_)))
    }

    pub fn progress_closed(&self) -> usize {
        self.count(|e| matches!(e, HostEvent::ProgressClosed))
    }

    pub fn progress_reports(&self) -> usize {
        self.count(|e| matches!(e, HostEvent::ProgressReport(_)))
    }
}

struct RecordingSink {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl ProgressSink for RecordingSink {
    fn report(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::ProgressReport(message.to_string()));
    }

    fn finish(&self) {
        self.events.lock().unwrap().push(HostEvent::ProgressClosed);
    }
}

impl Host for RecordingHost {
    fn workspace_roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }

    fn notify(&self, notice: Notice) {
        self.events.lock().unwrap().push(HostEvent::Notice(notice));
    }

    fn begin_progress(&self, title: &str) -> ProgressHandle {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::ProgressOpened(title.to_string()));
        ProgressHandle::new(Arc::new(RecordingSink {
            events: Arc::clone(&self.events),
        }))
    }
}

/// Package manager with a scripted presence answer and install result.
pub struct FakePackageManager {
    present: Result<bool, ActionError>,
    install_result: Result<(), ActionError>,
    install_delay: Duration,
    pub checks: AtomicUsize,
    pub installs: AtomicUsize,
}

impl FakePackageManager {
    pub fn new(present: bool, install_result: Result<(), ActionError>) -> Self {
        Self {
            present: Ok(present),
            install_result,
            install_delay: Duration::ZERO,
            checks: AtomicUsize::new(0),
            installs: AtomicUsize::new(0),
        }
    }

    pub fn with_check_error(mut self, err: ActionError) -> Self {
        self.present = Err(err);
        self
    }

    pub fn with_install_delay(mut self, delay: Duration) -> Self {
        self.install_delay = delay;
        self
    }

    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PackageManager for FakePackageManager {
    async fn is_installed(&self, _package: &PackageSpec) -> Result<bool, ActionError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        self.present.clone()
    }

    async fn install(&self, _package: &PackageSpec) -> Result<(), ActionError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        if !self.install_delay.is_zero() {
            tokio::time::sleep(self.install_delay).await;
        }
        self.install_result.clone()
    }
}

/// Extension host with a scripted presence answer and install result.
pub struct FakeExtensionHost {
    present: bool,
    install_result: Result<(), ActionError>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeExtensionHost {
    pub fn new(present: bool, install_result: Result<(), ActionError>) -> Self {
        Self {
            present,
            install_result,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtensionHost for FakeExtensionHost {
    async fn is_installed(&self, _id: &str) -> Result<bool, ActionError> {
        Ok(self.present)
    }

    async fn install(&self, id: &str) -> Result<(), ActionError> {
        self.requested.lock().unwrap().push(id.to_string());
        self.install_result.clone()
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub lines: Mutex<Vec<String>>,
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

/// Fetcher that talks to local mock servers directly, whatever the proxy env.
pub fn no_proxy_fetcher() -> FileFetcher {
    FileFetcher::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

pub struct Fixture {
    pub host: Arc<RecordingHost>,
    pub packages: Arc<FakePackageManager>,
    pub extensions: Arc<FakeExtensionHost>,
    pub logger: Arc<RecordingLogger>,
    pub runner: ActionRunner,
}

impl Fixture {
    pub fn new(
        host: RecordingHost,
        packages: FakePackageManager,
        extensions: FakeExtensionHost,
    ) -> Self {
        let host = Arc::new(host);
        let packages = Arc::new(packages);
        let extensions = Arc::new(extensions);
        let logger = Arc::new(RecordingLogger::default());
        let runner = ActionRunner::new(
            host.clone(),
            logger.clone(),
            no_proxy_fetcher(),
            packages.clone(),
            extensions.clone(),
        );
        Self {
            host,
            packages,
            extensions,
            logger,
            runner,
        }
    }

    /// Host with the given roots; installs succeed and nothing is present.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self::new(
            RecordingHost::new(roots),
            FakePackageManager::new(false, Ok(())),
            FakeExtensionHost::new(false, Ok(())),
        )
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.runner = self.runner.with_tick_interval(interval);
        self
    }
}
