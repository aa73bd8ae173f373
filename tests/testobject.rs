use smokehost::{Context, EvalFlags, Value, host::Host};

fn eval<'rt>(ctx: &Context<'rt>, code: &str) -> Value<'rt> {
    ctx.eval_global(None, code, "test.js", EvalFlags::empty()).unwrap()
}

fn eval_err(ctx: &Context, code: &str) -> bool {
    ctx.eval_global(None, code, "test.js", EvalFlags::empty()).is_err()
}

#[test]
fn construct_and_sum() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert_eq!(eval(&ctx, "new CreateTestObject(5, 7).sum()"), Value::Int32(12));
}

#[test]
fn field_writes_reach_the_native_payload() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let ret = eval(&ctx, "var o = new CreateTestObject(5, 5); o.x = 12; o.sum()");

    assert_eq!(ret, Value::Int32(17));
}

#[test]
fn field_reads_come_from_the_native_payload() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert_eq!(eval(&ctx, "var o = new CreateTestObject(3, 4); o.x + o.y"), Value::Int32(7));
}

#[test]
fn non_numeric_field_write_is_ignored() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let ret = eval(&ctx, "var o = new CreateTestObject(1, 2); o.x = 'nope'; o.sum()");

    assert_eq!(ret, Value::Int32(3));
}

#[test]
fn sum_after_delete_throws() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert!(eval_err(
        &ctx,
        "var o = new CreateTestObject(1, 2); DeleteTestObject(o); o.sum()"
    ));
}

#[test]
fn field_read_after_delete_throws() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert!(eval_err(&ctx, "var o = new CreateTestObject(1, 2); DeleteTestObject(o); o.x"));
}

#[test]
fn double_delete_is_a_noop() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    let ret = eval(
        &ctx,
        "var o = new CreateTestObject(1, 2); DeleteTestObject(o); DeleteTestObject(o); true",
    );

    assert_eq!(ret, Value::Bool(true));
}

#[test]
fn constructor_rejects_bad_arguments() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert!(eval_err(&ctx, "new CreateTestObject(1)"));
    assert!(eval_err(&ctx, "new CreateTestObject('a', 'b')"));
}

#[test]
fn delete_rejects_non_objects() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert!(eval_err(&ctx, "DeleteTestObject(42)"));
}

#[test]
fn delete_of_a_plain_object_is_a_noop() {
    let host = Host::new();
    let ctx = host.runtime().new_context();
    host.install(&ctx).unwrap();

    assert_eq!(eval(&ctx, "DeleteTestObject({}); true"), Value::Bool(true));
}
