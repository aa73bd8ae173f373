use std::{sync::Arc, time::Duration};

use crate::{CallOptions, Context, NativeFunction, PropertyDescriptorFlags, Runtime, Value};

mod clock;
mod testobject;
mod timers;

pub use clock::TickClock;
pub use testobject::TestObject;
pub use timers::TimerQueue;

/// The embedding host: owns the engine runtime, the tick source, and the
/// timer registry, and installs the capability surface scripts consume.
pub struct Host {
    rt: Runtime,
    clock: Arc<TickClock>,
    timers: Arc<TimerQueue>,
}

impl Host {
    pub fn new() -> Self {
        Self {
            rt: Runtime::new(),
            clock: Arc::new(TickClock::new()),
            timers: Arc::new(TimerQueue::new()),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Defines the full capability surface on the context's global object,
    /// under the exact names the smoke script consumes.
    pub fn install<'rt>(&self, ctx: &Context<'rt>) -> Result<(), Value<'rt>> {
        let global = ctx.get_global_object();

        define_capability(ctx, &global, "print", |ctx, _, _, args, _| {
            let mut line = String::new();
            for arg in args {
                if let Value::String(_) = arg {
                    line.push_str(&ctx.get_string(arg)?);
                }
            }

            println!("{}", line);

            Ok(Value::Undefined)
        })?;

        let clock = self.clock.clone();
        define_capability(ctx, &global, "GetTickCount", move |ctx, _, _, _, _| {
            Ok(ctx.new_number(clock.now_ms() as f64))
        })?;

        define_capability(ctx, &global, "sleep", |ctx, _, _, args, _| {
            if args.len() != 1 {
                return Err(ctx.new_string("wrong argument count")?);
            }

            let ms = match &args[0] {
                Value::Int32(v) => *v as i64,
                Value::Float64(f) => *f as i64,
                _ => return Err(ctx.new_string("wrong argument types")?),
            };

            std::thread::sleep(Duration::from_millis(ms.max(0) as u64));

            Ok(Value::Undefined)
        })?;

        define_capability(ctx, &global, "callNTimes", |ctx, _, _, args, _| {
            if args.len() != 2 {
                return Err(ctx.new_string("wrong argument count")?);
            }

            let times = match &args[0] {
                Value::Int32(v) => *v,
                _ => return Err(ctx.new_string("wrong argument types")?),
            };

            if !ctx.is_function(&args[1]) {
                return Err(ctx.new_string("wrong argument types")?);
            }

            let this = ctx.get_global_object();
            for _ in 0..times.max(0) {
                ctx.call(&args[1], &this, &[])?;
            }

            Ok(Value::Undefined)
        })?;

        define_capability(ctx, &global, "gc", |ctx, _, _, _, _| {
            ctx.get_runtime().run_gc();

            Ok(Value::Undefined)
        })?;

        let create = ctx.new_object_class(
            NativeFunction::new(|ctx, _, _, args, _| {
                if args.len() != 2 {
                    return Err(ctx.new_string("wrong argument count")?);
                }

                let (w, h) = match (&args[0], &args[1]) {
                    (Value::Int32(w), Value::Int32(h)) => (*w, *h),
                    _ => return Err(ctx.new_string("wrong argument types")?),
                };

                testobject::create(ctx, w, h)
            }),
            None,
        )?;
        ctx.set_constructor_bit(&create, true);
        ctx.define_property_value_str(&global, "CreateTestObject", create, capability_flags())?;

        define_capability(ctx, &global, "DeleteTestObject", |ctx, _, _, args, _| {
            if args.len() != 1 {
                return Err(ctx.new_string("wrong argument count")?);
            }

            match &args[0] {
                Value::Object(_) => {
                    testobject::delete(ctx, &args[0]);

                    Ok(Value::Undefined)
                }
                _ => Err(ctx.new_string("wrong argument types")?),
            }
        })?;

        let clock = self.clock.clone();
        let timers = self.timers.clone();
        define_capability(ctx, &global, "TimedThread", move |ctx, _, _, args, _| {
            if args.len() != 2 {
                return Err(ctx.new_string("wrong argument count")?);
            }

            let interval = match &args[0] {
                Value::Int32(v) => *v as i64,
                Value::Float64(f) => *f as i64,
                _ => return Err(ctx.new_string("wrong argument types")?),
            };

            if interval < 0 || !ctx.is_function(&args[1]) {
                return Err(ctx.new_string("wrong argument types")?);
            }

            let callback = match ctx.get_runtime().new_global_value(&args[1]) {
                Ok(v) => v,
                Err(_) => return Err(ctx.new_string("callback not owned by this runtime")?),
            };

            timers.schedule(clock.now_ms(), interval as u64, callback);

            Ok(Value::Undefined)
        })?;

        Ok(())
    }

    /// Fires every due timer against the given context. Returns the number of
    /// callbacks invoked.
    pub fn pump_timers(&self, ctx: &Context) -> usize {
        self.timers.fire_due(ctx, self.clock.now_ms())
    }
}

fn capability_flags() -> PropertyDescriptorFlags {
    PropertyDescriptorFlags::CONFIGURABLE | PropertyDescriptorFlags::WRITABLE | PropertyDescriptorFlags::ENUMERABLE
}

fn define_capability<'rt, F>(ctx: &Context<'rt>, global: &Value, name: &str, func: F) -> Result<(), Value<'rt>>
where
    F: for<'r> Fn(&Context<'r>, &Value, &Value, &[Value], CallOptions) -> Result<Value<'r>, Value<'r>> + Send + 'static,
{
    let func = ctx.new_object_class(NativeFunction::new(func), None)?;

    ctx.define_property_value_str(global, name, func, capability_flags())?;

    Ok(())
}
