use thiserror::Error;

use crate::{Context, EvalFlags, Value, describe_exception};

/// The smoke script itself. Everything interesting it touches lives behind
/// the host capability surface; the script is deliberately plain glue.
pub const SMOKE_SCRIPT: &str = include_str!("smoke.js");

pub const DEFAULT_GC_BUDGET_MS: i32 = 50;
pub const DEFAULT_SLEEP_MS: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteReport {
    pub gc_churn: bool,
    pub call_n_times: bool,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.gc_churn && self.call_n_times
    }
}

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("script threw: {0}")]
    Script(String),
    #[error("unexpected suite result: {0}")]
    Shape(&'static str),
}

/// Evaluates the smoke script, defining its functions on the global object.
/// The host surface must already be installed.
pub fn load(ctx: &Context) -> Result<(), SuiteError> {
    ctx.eval_global(None, SMOKE_SCRIPT, "smoke.js", EvalFlags::empty())
        .map(|_| ())
        .map_err(|err| SuiteError::Script(describe_exception(ctx, &err)))
}

/// Drives `runSuite` and extracts its verdicts. The script prints its own
/// progress lines; this only folds the result object into a report.
pub fn run(ctx: &Context, gc_budget_ms: i32, sleep_ms: i32) -> Result<SuiteReport, SuiteError> {
    let global = ctx.get_global_object();

    let run_suite = ctx
        .get_property_str(&global, "runSuite")
        .map_err(|err| SuiteError::Script(describe_exception(ctx, &err)))?;
    if !ctx.is_function(&run_suite) {
        return Err(SuiteError::Shape("runSuite is not a function"));
    }

    let result = ctx
        .call(&run_suite, &global, &[Value::Int32(gc_budget_ms), Value::Int32(sleep_ms)])
        .map_err(|err| SuiteError::Script(describe_exception(ctx, &err)))?;

    Ok(SuiteReport {
        gc_churn: read_bool(ctx, &result, "gc")?,
        call_n_times: read_bool(ctx, &result, "calls")?,
    })
}

/// Schedules the repeating ticker the script never waits on.
pub fn start_ticker(ctx: &Context, interval_ms: i32) -> Result<(), SuiteError> {
    let global = ctx.get_global_object();

    let start = ctx
        .get_property_str(&global, "startTicker")
        .map_err(|err| SuiteError::Script(describe_exception(ctx, &err)))?;
    if !ctx.is_function(&start) {
        return Err(SuiteError::Shape("startTicker is not a function"));
    }

    ctx.call(&start, &global, &[Value::Int32(interval_ms)])
        .map(|_| ())
        .map_err(|err| SuiteError::Script(describe_exception(ctx, &err)))
}

fn read_bool(ctx: &Context, obj: &Value, name: &str) -> Result<bool, SuiteError> {
    match ctx.get_property_str(obj, name) {
        Ok(Value::Bool(v)) => Ok(v),
        Ok(_) => Err(SuiteError::Shape("suite verdict is not a boolean")),
        Err(err) => Err(SuiteError::Script(describe_exception(ctx, &err))),
    }
}
