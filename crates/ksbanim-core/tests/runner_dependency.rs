//! Install-dependency action: presence check, exit codes and ticker lifetime.

mod support;

use std::sync::Arc;
use std::time::Duration;

use ksbanim_core::action::{Action, ActionOutcome};
use ksbanim_core::config::KsbConfig;
use ksbanim_core::dependency::PipPackageManager;
use ksbanim_core::error::ActionError;
use ksbanim_core::extension::EditorCli;
use ksbanim_core::host::Notice;
use ksbanim_core::runner::{ActionRunner, INSTALL_TICK_MESSAGE};

use support::{FakeExtensionHost, FakePackageManager, Fixture, HostEvent, RecordingHost};

fn dependency_action() -> Action {
    Action::install_dependency(&KsbConfig::default())
}

fn fixture(packages: FakePackageManager) -> Fixture {
    Fixture::new(
        RecordingHost::without_workspace(),
        packages,
        FakeExtensionHost::new(false, Ok(())),
    )
}

#[tokio::test]
async fn already_present_skips_install_and_progress() {
    let fx = fixture(FakePackageManager::new(true, Ok(())));

    let outcome = fx.runner.run(&dependency_action()).await;

    assert_eq!(outcome, ActionOutcome::Success);
    assert_eq!(fx.packages.installs(), 0);
    assert_eq!(fx.host.progress_opened(), 0);
    assert_eq!(
        fx.host.notices(),
        vec![Notice::Info("PyQt5 is already installed.".to_string())]
    );
}

#[tokio::test]
async fn absent_and_exit_zero_succeeds() {
    let fx = fixture(FakePackageManager::new(false, Ok(())));

    let outcome = fx.runner.run(&dependency_action()).await;

    assert_eq!(outcome, ActionOutcome::Success);
    assert_eq!(fx.packages.installs(), 1);
    assert_eq!(fx.host.progress_opened(), 1);
    assert_eq!(fx.host.progress_closed(), 1);
    assert_eq!(
        fx.host.notices(),
        vec![Notice::Info(
            "PyQt5 downloaded and installed successfully.".to_string()
        )]
    );
}

#[tokio::test]
async fn exit_one_fails_with_code() {
    let fx = fixture(FakePackageManager::new(
        false,
        Err(ActionError::ProcessExit(Some(1))),
    ));

    let outcome = fx.runner.run(&dependency_action()).await;

    assert_eq!(
        outcome,
        ActionOutcome::Failure(ActionError::ProcessExit(Some(1)))
    );
    assert_eq!(fx.host.progress_closed(), 1);
    let notices = fx.host.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert_eq!(notices[0].message(), "Installer exited with code 1");
}

#[tokio::test]
async fn failed_presence_check_still_installs() {
    let fx = fixture(
        FakePackageManager::new(false, Ok(()))
            .with_check_error(ActionError::Spawn("pip: not found".to_string())),
    );

    let outcome = fx.runner.run(&dependency_action()).await;

    assert!(outcome.is_success());
    assert_eq!(fx.packages.installs(), 1);
}

#[tokio::test]
async fn ticker_posts_while_running_and_stops_after_exit() {
    let tick = Duration::from_millis(20);
    let fx = fixture(
        FakePackageManager::new(false, Ok(())).with_install_delay(Duration::from_millis(150)),
    )
    .with_tick_interval(tick);

    let outcome = fx.runner.run(&dependency_action()).await;
    assert!(outcome.is_success());

    let posted = fx.host.progress_reports();
    assert!(posted >= 1, "expected ticks while installing, got {posted}");
    assert!(fx.host.events().iter().all(|event| match event {
        HostEvent::ProgressReport(message) => message == INSTALL_TICK_MESSAGE,
        _ => true,
    }));

    tokio::time::sleep(tick * 5).await;
    assert_eq!(fx.host.progress_reports(), posted);

    // Every report lands between open and close.
    let events = fx.host.events();
    let closed_at = events
        .iter()
        .position(|e| matches!(e, HostEvent::ProgressClosed))
        .unwrap();
    assert!(
        events[closed_at..]
            .iter()
            .all(|e| !matches!(e, HostEvent::ProgressReport(_)))
    );
}

#[tokio::test]
async fn ticker_stops_after_failure() {
    let tick = Duration::from_millis(20);
    let fx = fixture(
        FakePackageManager::new(false, Err(ActionError::ProcessExit(Some(2))))
            .with_install_delay(Duration::from_millis(80)),
    )
    .with_tick_interval(tick);

    let outcome = fx.runner.run(&dependency_action()).await;
    assert!(!outcome.is_success());

    let posted = fx.host.progress_reports();
    tokio::time::sleep(tick * 5).await;
    assert_eq!(fx.host.progress_reports(), posted);
}

#[cfg(unix)]
#[tokio::test]
async fn real_subprocess_exit_codes_map_to_outcomes() {
    let host = Arc::new(RecordingHost::without_workspace());

    let runner_for = |script: &str| {
        let packages = PipPackageManager::new("sh", vec![])
            .with_program_args(vec!["-c".to_string(), script.to_string()]);
        ActionRunner::new(
            host.clone(),
            Arc::new(support::RecordingLogger::default()),
            support::no_proxy_fetcher(),
            Arc::new(AbsentThen(packages)),
            Arc::new(EditorCli::new("ksbanim-no-such-editor")),
        )
    };

    let ok = runner_for("exit 0").run(&dependency_action()).await;
    assert_eq!(ok, ActionOutcome::Success);

    let failed = runner_for("exit 1").run(&dependency_action()).await;
    assert_eq!(
        failed,
        ActionOutcome::Failure(ActionError::ProcessExit(Some(1)))
    );
    assert_eq!(host.progress_opened(), 2);
    assert_eq!(host.progress_closed(), 2);
}

#[tokio::test]
async fn spawn_failure_is_reported() {
    let host = Arc::new(RecordingHost::without_workspace());
    let runner = ActionRunner::new(
        host.clone(),
        Arc::new(support::RecordingLogger::default()),
        support::no_proxy_fetcher(),
        Arc::new(PipPackageManager::new("ksbanim-no-such-pip", vec![])),
        Arc::new(EditorCli::new("ksbanim-no-such-editor")),
    );

    let outcome = runner.run(&dependency_action()).await;

    assert!(
        matches!(outcome, ActionOutcome::Failure(ActionError::Spawn(_))),
        "got {outcome:?}"
    );
    assert_eq!(host.progress_opened(), 1);
    assert_eq!(host.progress_closed(), 1);
}

/// Reports "absent" so the real install path always runs.
struct AbsentThen(PipPackageManager);

#[async_trait::async_trait]
impl ksbanim_core::dependency::PackageManager for AbsentThen {
    async fn is_installed(
        &self,
        _package: &ksbanim_core::action::PackageSpec,
    ) -> Result<bool, ActionError> {
        Ok(false)
    }

    async fn install(&self, package: &ksbanim_core::action::PackageSpec) -> Result<(), ActionError> {
        self.0.install(package).await
    }
}
