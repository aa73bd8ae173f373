use smokehost::{Context, EvalFlags, Value, host::Host};

fn eval<'rt>(ctx: &Context<'rt>, code: &str) -> Value<'rt> {
    ctx.eval_global(None, code, "test.js", EvalFlags::empty()).unwrap()
}

fn as_ms(value: &Value) -> f64 {
    match value {
        Value::Int32(v) => *v as f64,
        Value::Float64(f) => *f,
        _ => panic!("not a number: {:?}", value),
    }
}

#[test]
fn tick_count_is_monotonic() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let first = as_ms(&eval(&ctx, "GetTickCount()"));
    let second = as_ms(&eval(&ctx, "GetTickCount()"));

    assert!(first >= 0.0);
    assert!(second >= first);
}

#[test]
fn sleep_advances_tick_count() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let elapsed = as_ms(&eval(&ctx, "var before = GetTickCount(); sleep(30); GetTickCount() - before"));

    assert!(elapsed >= 25.0, "slept only {} ms", elapsed);
}

#[test]
fn sleep_rejects_bad_arguments() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert!(ctx.eval_global(None, "sleep()", "test.js", EvalFlags::empty()).is_err());
    assert!(ctx.eval_global(None, "sleep('soon')", "test.js", EvalFlags::empty()).is_err());
}

#[test]
fn print_accepts_mixed_arguments() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    // Non-string arguments are skipped, not an error.
    let ret = eval(&ctx, "print('tick ', 42, ' tock'); true");

    assert_eq!(ret, Value::Bool(true));
}

#[test]
fn gc_pass_is_requestable_from_script() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let ret = eval(&ctx, "gc(); true");

    assert_eq!(ret, Value::Bool(true));
}

#[test]
fn capabilities_are_replaceable() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let ret = eval(&ctx, "globalThis.print = function () { return 7; }; print()");

    assert_eq!(ret, Value::Int32(7));
}
