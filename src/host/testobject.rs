use std::cell::Cell;

use crate::{Class, Context, NativeFunction, NativeFunctionExt, NativeProperty, NativePropertyExt, Value};

/// Native payload behind `CreateTestObject`. Purely allocation fodder for
/// collector churn: two numeric fields and a summing method.
pub struct TestObject {
    x: Cell<i32>,
    y: Cell<i32>,
}

impl Class for TestObject {
    const NAME: &'static str = "TestObject";
}

impl TestObject {
    pub fn sum(&self) -> i32 {
        self.x.get().wrapping_add(self.y.get())
    }
}

fn payload<'c, 'rt>(ctx: &'c Context<'rt>, this: &Value) -> Result<&'c TestObject, Value<'rt>> {
    match ctx.get_class_opaque::<TestObject>(this) {
        Some(obj) => Ok(obj),
        None => Err(ctx.new_string("test object already deleted")?),
    }
}

fn numeric(value: Option<&Value>) -> Option<i32> {
    match value {
        Some(Value::Int32(v)) => Some(*v),
        Some(Value::Float64(f)) => Some(*f as i32),
        _ => None,
    }
}

/// Wraps a fresh payload in a JS object with intercepted `x`/`y` fields and a
/// `sum()` method. Reads go through the native payload; non-numeric writes
/// are silently ignored.
pub fn create<'rt>(ctx: &Context<'rt>, w: i32, h: i32) -> Result<Value<'rt>, Value<'rt>> {
    let obj = ctx.new_object_class(
        TestObject {
            x: Cell::new(w),
            y: Cell::new(h),
        },
        None,
    )?;

    ctx.define_native_property(
        &obj,
        "x",
        NativeProperty {
            getter: Some(NativeFunction::new(|ctx, _, this, _, _| {
                Ok(Value::Int32(payload(ctx, this)?.x.get()))
            })),
            setter: Some(NativeFunction::new(|ctx, _, this, args, _| {
                if let Some(v) = numeric(args.first()) {
                    payload(ctx, this)?.x.set(v);
                }

                Ok(Value::Undefined)
            })),
            ..Default::default()
        },
    )?;

    ctx.define_native_property(
        &obj,
        "y",
        NativeProperty {
            getter: Some(NativeFunction::new(|ctx, _, this, _, _| {
                Ok(Value::Int32(payload(ctx, this)?.y.get()))
            })),
            setter: Some(NativeFunction::new(|ctx, _, this, args, _| {
                if let Some(v) = numeric(args.first()) {
                    payload(ctx, this)?.y.set(v);
                }

                Ok(Value::Undefined)
            })),
            ..Default::default()
        },
    )?;

    ctx.define_native_function(&obj, "sum", |ctx, _, this, _, _| Ok(Value::Int32(payload(ctx, this)?.sum())))?;

    Ok(obj)
}

/// Drops the native payload immediately; the JS wrapper stays alive but any
/// further field or `sum()` access throws. Deleting twice is a no-op.
pub fn delete(ctx: &Context, value: &Value) -> bool {
    ctx.take_class_opaque::<TestObject>(value).is_some()
}
