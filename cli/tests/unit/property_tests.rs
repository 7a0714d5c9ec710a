//! Property-based tests for runner echo and service verification.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use devstack_cli::application::services::runner::StepRunner;
use devstack_cli::application::services::service_activation::activate_services;
use devstack_cli::domain::{ActivationOutcome, ServiceSpec};

use crate::mocks::{Recorder, Scripted};

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime")
        .block_on(fut)
}

proptest! {
    /// A failing command echoes every captured line exactly once, in order.
    #[test]
    fn prop_failure_echoes_all_lines_in_order(
        lines in proptest::collection::vec("[a-zA-Z0-9 :._/-]{1,40}", 0..20),
        code in 1i32..255,
    ) {
        let text: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let runner = Scripted::new().on("cmd", code, &text);
        let reporter = Recorder::new();

        let inv = block_on(async {
            StepRunner::new(&runner, &reporter, "systemctl").run("cmd").await
        })
        .unwrap();

        prop_assert_eq!(inv.exit_status, code);
        prop_assert_eq!(reporter.echoed(), lines);
    }

    /// A successful command never echoes, whatever it printed.
    #[test]
    fn prop_success_never_echoes(
        lines in proptest::collection::vec("[a-zA-Z0-9 ]{0,40}", 0..20),
    ) {
        let text = lines.join("\n");
        let runner = Scripted::new().on("cmd", 0, &text);
        let reporter = Recorder::new();

        let inv = block_on(async {
            StepRunner::new(&runner, &reporter, "systemctl").run("cmd").await
        })
        .unwrap();

        prop_assert_eq!(inv.exit_status, 0);
        prop_assert!(reporter.lines().is_empty());
    }

    /// Verification outcome is decided by the two checks alone.
    #[test]
    fn prop_outcome_follows_two_checks(
        first_ok in proptest::bool::ANY,
        second_ok in proptest::bool::ANY,
        enable_code in 0i32..3,
    ) {
        let check = "systemctl is-active --quiet svc";
        let runner = Scripted::new()
            .on("systemctl enable svc", enable_code, "")
            .on(check, if first_ok { 0 } else { 3 }, "")
            .on(check, if second_ok { 0 } else { 3 }, "");
        let reporter = Recorder::new();
        let specs = vec![ServiceSpec { name: "svc".into(), settle_secs: 0 }];

        let reports = block_on(async {
            let step = StepRunner::new(&runner, &reporter, "systemctl");
            activate_services(&step, &specs).await
        });

        let expected = match (first_ok, second_ok) {
            (true, _) => ActivationOutcome::Active,
            (false, true) => ActivationOutcome::Recovered,
            (false, false) => ActivationOutcome::Failed,
        };
        prop_assert_eq!(reports[0].outcome, expected);
        let checks = runner.log().iter().filter(|c| *c == check).count();
        prop_assert_eq!(checks, if first_ok { 1 } else { 2 });
    }
}
