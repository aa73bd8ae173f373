use std::sync::Mutex;

use crate::{Context, GlobalValue, describe_exception};

struct TimerEntry {
    interval_ms: u64,
    next_due_ms: u64,
    callback: GlobalValue,
}

/// Repeating interval timers behind the `TimedThread` capability. The engine
/// runtime is single threaded, so callbacks are held as runtime-lifetime
/// references and fired cooperatively by `fire_due` on the owning thread.
pub struct TimerQueue {
    entries: Mutex<Vec<TimerEntry>>,
}

// Entries hold engine references, but they are only resolved through
// `GlobalValue::to_local` on the thread that owns the runtime. Same contract
// as `Runtime: Send`.
unsafe impl Send for TimerQueue {}
unsafe impl Sync for TimerQueue {}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("timer queue poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a repeating timer. The first fire is due one interval from
    /// `now_ms`; intervals are clamped to at least 1 ms.
    pub fn schedule(&self, now_ms: u64, interval_ms: u64, callback: GlobalValue) {
        let interval_ms = interval_ms.max(1);

        self.entries.lock().expect("timer queue poisoned").push(TimerEntry {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
            callback,
        });

        tracing::debug!(interval_ms, "timer scheduled");
    }

    /// Fires every callback whose deadline has passed, at most once per call,
    /// and advances its deadline past `now_ms` (missed intervals are skipped,
    /// not replayed). A throwing callback stays scheduled. Returns the number
    /// of callbacks fired.
    pub fn fire_due<'rt>(&self, ctx: &Context<'rt>, now_ms: u64) -> usize {
        let due = {
            let mut entries = self.entries.lock().expect("timer queue poisoned");

            let mut due = Vec::new();
            for entry in entries.iter_mut() {
                if entry.next_due_ms <= now_ms {
                    due.push(entry.callback.clone());

                    while entry.next_due_ms <= now_ms {
                        entry.next_due_ms += entry.interval_ms;
                    }
                }
            }
            due
        };

        let global = ctx.get_global_object();
        let mut fired = 0;

        for callback in due {
            let callback = match callback.to_local(ctx.get_runtime()) {
                Ok(v) => v,
                Err(_) => continue,
            };

            fired += 1;

            if let Err(err) = ctx.call(&callback, &global, &[]) {
                tracing::warn!("timer callback threw: {}", describe_exception(ctx, &err));
            }
        }

        fired
    }
}
