use std::time::Duration;

use smokehost::{host::Host, suite};

#[test]
fn full_suite_passes() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    suite::load(&ctx).unwrap();
    let report = suite::run(&ctx, 25, 10).unwrap();

    assert!(report.gc_churn);
    assert!(report.call_n_times);
    assert!(report.passed());
}

#[test]
fn ticker_schedules_and_fires() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    suite::load(&ctx).unwrap();
    suite::start_ticker(&ctx, 10).unwrap();

    assert_eq!(host.timers().len(), 1);

    std::thread::sleep(Duration::from_millis(25));

    assert_eq!(host.pump_timers(&ctx), 1);
}

#[test]
fn suite_without_host_surface_reports_a_script_error() {
    let host = Host::new();
    let ctx = host.runtime().new_context();

    // Loading only defines functions; driving them needs the capabilities.
    suite::load(&ctx).unwrap();

    let err = suite::run(&ctx, 25, 10).unwrap_err();

    assert!(matches!(err, suite::SuiteError::Script(_)));
}
