use std::time::Duration;

use smokehost::{Context, EvalFlags, Value, host::Host};

fn eval<'rt>(ctx: &Context<'rt>, code: &str) -> Value<'rt> {
    ctx.eval_global(None, code, "test.js", EvalFlags::empty()).unwrap()
}

#[test]
fn schedule_registers_a_timer() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    eval(&ctx, "TimedThread(10, function () {})");

    assert_eq!(host.timers().len(), 1);
}

#[test]
fn does_not_fire_before_the_interval_elapses() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    eval(&ctx, "TimedThread(10000, function () {})");

    assert_eq!(host.pump_timers(&ctx), 0);
}

#[test]
fn fires_once_the_interval_has_elapsed() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    eval(&ctx, "var hits = 0; TimedThread(10, function () { hits++; })");

    std::thread::sleep(Duration::from_millis(30));

    assert_eq!(host.pump_timers(&ctx), 1);
    assert_eq!(eval(&ctx, "hits"), Value::Int32(1));
}

#[test]
fn fires_at_most_once_per_pump() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    eval(&ctx, "var hits = 0; TimedThread(10, function () { hits++; })");

    // Several intervals pass; missed deadlines are skipped, not replayed.
    std::thread::sleep(Duration::from_millis(50));

    assert_eq!(host.pump_timers(&ctx), 1);
    assert_eq!(eval(&ctx, "hits"), Value::Int32(1));
}

#[test]
fn fires_repeatedly_across_pumps() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    eval(&ctx, "var hits = 0; TimedThread(10, function () { hits++; })");

    let mut fired = 0;
    for _ in 0..3 {
        std::thread::sleep(Duration::from_millis(15));
        fired += host.pump_timers(&ctx);
    }

    assert_eq!(fired, 3);
    assert_eq!(eval(&ctx, "hits"), Value::Int32(3));
}

#[test]
fn throwing_callback_stays_scheduled() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    eval(&ctx, "TimedThread(5, function () { throw new Error('boom'); })");

    std::thread::sleep(Duration::from_millis(10));
    assert_eq!(host.pump_timers(&ctx), 1);
    assert_eq!(host.timers().len(), 1);

    std::thread::sleep(Duration::from_millis(10));
    assert_eq!(host.pump_timers(&ctx), 1);
}

#[test]
fn rejects_bad_arguments() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert!(ctx.eval_global(None, "TimedThread(10)", "test.js", EvalFlags::empty()).is_err());
    assert!(
        ctx.eval_global(None, "TimedThread('soon', function () {})", "test.js", EvalFlags::empty())
            .is_err()
    );
    assert!(
        ctx.eval_global(None, "TimedThread(-5, function () {})", "test.js", EvalFlags::empty())
            .is_err()
    );
}
