use std::time::{Duration, Instant};

use anyhow::anyhow;
use smokehost::{describe_exception, host::Host, suite};

const TICKER_INTERVAL_MS: i32 = 1000;
const PUMP_WINDOW: Duration = Duration::from_millis(3500);
const PUMP_STEP: Duration = Duration::from_millis(25);

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = Host::new();
    let ctx = host.runtime().new_context();

    host.install(&ctx)
        .map_err(|err| anyhow!("install capability surface: {}", describe_exception(&ctx, &err)))?;

    suite::load(&ctx)?;
    let report = suite::run(&ctx, suite::DEFAULT_GC_BUDGET_MS, suite::DEFAULT_SLEEP_MS)?;

    println!();
    println!("gc churn: {}", if report.gc_churn { "ok" } else { "failed" });
    println!("callNTimes: {}", if report.call_n_times { "ok" } else { "failed" });

    // The ticker outlives the suite; pump it for a few intervals, then leave.
    suite::start_ticker(&ctx, TICKER_INTERVAL_MS)?;

    let deadline = Instant::now() + PUMP_WINDOW;
    while Instant::now() < deadline {
        host.pump_timers(&ctx);
        std::thread::sleep(PUMP_STEP);
    }

    if !report.passed() {
        std::process::exit(1);
    }

    Ok(())
}
