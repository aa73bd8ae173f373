use smokehost::{EvalFlags, Runtime, Value};

#[test]
fn eval_returns_int() {
    let rt = Runtime::new();
    let ctx = rt.new_context();

    let ret = ctx.eval_global(None, "40 + 2", "script.js", EvalFlags::empty()).unwrap();

    match ret {
        Value::Int32(v) => {
            assert_eq!(v, 42);
        }
        _ => panic!("unexpected return type: {:?}", ret),
    }
}

#[test]
fn eval_returns_string() {
    let rt = Runtime::new();
    let ctx = rt.new_context();

    let ret = ctx
        .eval_global(None, r#""smoke" + "host""#, "script.js", EvalFlags::empty())
        .unwrap();

    match ret {
        Value::String(v) => {
            let s = ctx.get_string(&v).unwrap();
            assert_eq!(&*s, "smokehost");
        }
        _ => panic!("unexpected return type: {:?}", ret),
    }
}

#[test]
fn eval_propagates_thrown_value() {
    let rt = Runtime::new();
    let ctx = rt.new_context();

    let ret = ctx.eval_global(None, "undefinedCapability()", "script.js", EvalFlags::empty());

    assert!(ret.is_err());
}
