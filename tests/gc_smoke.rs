use smokehost::{Context, EvalFlags, Value, host::Host, suite};

fn eval<'rt>(ctx: &Context<'rt>, code: &str) -> Value<'rt> {
    ctx.eval_global(None, code, "test.js", EvalFlags::empty()).unwrap()
}

#[test]
fn churn_within_budget_returns_true() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();
    suite::load(&ctx).unwrap();

    assert_eq!(eval(&ctx, "testGarbageCollector(25)"), Value::Bool(true));
}

#[test]
fn non_numeric_duration_returns_false() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();
    suite::load(&ctx).unwrap();

    assert_eq!(eval(&ctx, "testGarbageCollector('5')"), Value::Bool(false));
}

#[test]
fn non_numeric_duration_touches_no_capability() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();
    suite::load(&ctx).unwrap();

    // Sabotage every capability the loop would reach; the early type check
    // must return before any of them is called.
    let ret = eval(
        &ctx,
        "globalThis.GetTickCount = function () { throw new Error('tick'); };
         globalThis.CreateTestObject = function () { throw new Error('create'); };
         testGarbageCollector('5')",
    );

    assert_eq!(ret, Value::Bool(false));
}

#[test]
fn repeated_create_delete_cycles_survive_a_collection() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    for _ in 0..64 {
        eval(&ctx, "var o = new CreateTestObject(2, 3); o.y = 9; o.sum(); DeleteTestObject(o); o = null");
    }

    host.runtime().run_gc();

    assert_eq!(eval(&ctx, "gc(); true"), Value::Bool(true));
}
