//! End-to-end pipeline scenarios through the library API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use devstack_cli::application::services::pipeline::run_pipeline;
use devstack_cli::domain::{
    ActivationOutcome, Profile, ProvisionError, ServiceState, StepStatus,
};

use crate::mocks::{Files, Recorder, Scripted};

const THREE_SERVICES: &str = r"
name: three
steps:
  - name: Update system
    severity: fatal
    action:
      kind: commands
      tasks:
        - run: sudo apt update
          required: true
  - name: Install base packages
    severity: fatal
    action:
      kind: packages
      packages: [pkg-a, pkg-b]
  - name: Start services
    severity: advisory
    action:
      kind: services
      services:
        - name: svc-a
        - name: svc-b
        - name: svc-c
";

fn three() -> Profile {
    Profile::from_yaml(THREE_SERVICES).unwrap()
}

fn is_service_command(cmd: &str) -> bool {
    cmd.starts_with("sudo systemctl")
}

#[tokio::test]
async fn privilege_failure_happens_before_any_other_command() {
    let runner = Scripted::new().on("sudo -n true", 1, "sudo: a password is required\n");
    let files = Files::default();

    let err = run_pipeline(&three(), &runner, &files, &Recorder::new())
        .await
        .expect_err("expected Err");

    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::PrivilegeRequired)
    ));
    assert_eq!(runner.log(), vec!["sudo -n true"]);
    assert!(files.written.borrow().is_empty());
}

#[tokio::test]
async fn package_failure_halts_and_no_service_step_runs() {
    let runner = Scripted::new().on(
        "sudo apt install -y pkg-a pkg-b",
        1,
        "E: Unable to locate package pkg-b\n",
    );
    let reporter = Recorder::new();

    let err = run_pipeline(&three(), &runner, &Files::default(), &reporter)
        .await
        .expect_err("expected Err");

    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::StepFailed { status: 1, .. })
    ));
    assert!(runner.ran("sudo apt update"));
    assert!(!runner.log().iter().any(|c| is_service_command(c)));
    assert_eq!(reporter.echoed(), vec!["E: Unable to locate package pkg-b"]);
}

#[tokio::test]
async fn all_steps_succeed_and_three_services_report_active() {
    let runner = Scripted::new()
        .on("sudo systemctl is-active svc-a 2>/dev/null", 0, "active\n")
        .on("sudo systemctl is-active svc-b 2>/dev/null", 0, "active\n")
        .on("sudo systemctl is-active svc-c 2>/dev/null", 0, "active\n");

    let report = run_pipeline(&three(), &runner, &Files::default(), &Recorder::new())
        .await
        .unwrap();

    assert!(report.steps.iter().all(|s| s.status == StepStatus::Succeeded));
    assert!(report.services.iter().all(|s| s.outcome == ActivationOutcome::Active));
    let summary: Vec<_> = report
        .summary
        .services
        .iter()
        .map(|s| (s.name.as_str(), s.state))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("svc-a", ServiceState::Active),
            ("svc-b", ServiceState::Active),
            ("svc-c", ServiceState::Active),
        ]
    );
    assert!(report.failed_services().is_empty());
}

#[tokio::test]
async fn recovered_service_is_not_failed() {
    let runner = Scripted::new()
        .on("sudo systemctl is-active --quiet svc-b", 3, "")
        .on("sudo systemctl is-active --quiet svc-b", 0, "");

    let report = run_pipeline(&three(), &runner, &Files::default(), &Recorder::new())
        .await
        .unwrap();

    let svc_b = report.services.iter().find(|s| s.name == "svc-b").unwrap();
    assert_eq!(svc_b.outcome, ActivationOutcome::Recovered);
    assert_eq!(report.steps[2].status, StepStatus::Succeeded);
}

#[tokio::test]
async fn twice_failed_service_is_recorded_and_summary_still_collected() {
    let runner = Scripted::new()
        .on("sudo systemctl is-active --quiet svc-c", 3, "")
        .on("sudo systemctl is-active svc-c 2>/dev/null", 3, "failed\n");
    let reporter = Recorder::new();

    let report = run_pipeline(&three(), &runner, &Files::default(), &reporter)
        .await
        .unwrap();

    assert_eq!(report.failed_services(), vec!["svc-c"]);
    let state = report.summary.services.iter().find(|s| s.name == "svc-c").unwrap();
    assert_eq!(state.state, ServiceState::Failed);
    assert!(reporter.lines().contains(&"error: Could not start svc-c".to_string()));
}

#[tokio::test(start_paused = true)]
async fn builtin_debian12_runs_every_step_in_order() {
    let profile = Profile::builtin("debian12").unwrap();
    let runner = Scripted::new();
    let files = Files::default();
    let reporter = Recorder::new();

    let report = run_pipeline(&profile, &runner, &files, &reporter).await.unwrap();

    let log = runner.log();
    let pos = |needle: &str| {
        log.iter()
            .position(|c| c.starts_with(needle))
            .unwrap_or_else(|| panic!("missing {needle}"))
    };
    assert_eq!(log[0], "sudo -n true");
    assert!(pos("sudo apt update") < pos("sudo apt install -y apache2"));
    assert!(pos("sudo apt install -y apache2") < pos("curl -sS https://getcomposer.org"));
    assert!(pos("sudo a2enconf adminer") < pos("sudo systemctl enable apache2"));
    assert!(pos("sudo systemctl is-active --quiet postgresql") < pos("tty: sudo mysql_secure_installation"));

    let written = files.written.borrow();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].0, std::path::PathBuf::from("/tmp/adminer.conf"));
    assert!(written[0].1.contains("Alias /adminer /usr/share/adminer"));

    assert_eq!(report.services.len(), 3);
    assert_eq!(report.steps.len(), profile.steps.len());
    assert!(reporter.lines().iter().any(|l| l.starts_with("tty: ")));
}
