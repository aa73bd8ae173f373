use smokehost::Runtime;

#[test]
fn global_value_round_trips_to_its_runtime() {
    let rt = Runtime::new();
    let ctx = rt.new_context();

    let obj = ctx.new_object(None).unwrap();
    let global = rt.new_global_value(&obj).unwrap();

    let local = global.to_local(&rt).unwrap();

    assert_eq!(local, obj);
}

#[test]
fn global_value_rejects_a_foreign_runtime() {
    let rt = Runtime::new();
    let ctx = rt.new_context();

    let obj = ctx.new_object(None).unwrap();
    let global = rt.new_global_value(&obj).unwrap();

    let other = Runtime::new();

    assert!(global.to_local(&other).is_err());
}

#[test]
fn cloned_global_value_outlives_the_original_handle() {
    let rt = Runtime::new();
    let ctx = rt.new_context();

    let obj = ctx.new_object(None).unwrap();
    let global = rt.new_global_value(&obj).unwrap();

    let clone = global.clone();
    drop(global);

    assert!(clone.to_local(&rt).is_ok());
}
