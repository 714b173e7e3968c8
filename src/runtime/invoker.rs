//! Single-shot invocation with timing and failure capture.
//!
//! This module contains the hot path for actually *calling* the wrapped
//! function. It wires together:
//! - A process-wide panic hook that records the panic location and a
//!   backtrace for threads currently inside [`guarded`], and stays out of
//!   the way for every other panic.
//! - [`std::panic::catch_unwind`] around exactly the call.
//! - Timestamps taken immediately before and after the call.

use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use chrono::Local;
use tracing::{debug, warn};

use crate::runtime::descriptor::Call;
use crate::runtime::result::{ErrorChain, Execution, Outcome, Produced, Timing};

/// Whether the wrapped call is expected to produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Value,
    Void,
}

thread_local! {
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static CAPTURED_TRACE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Symbol prefixes of frames that belong to the panic machinery or to this module.
const RUNTIME_FRAME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "rust_begin_unwind",
    "rust_panic",
    "__rust",
    "__libc",
    "_start",
    "callscope::runtime::",
];

fn install_panic_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARD_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }
            let mut lines = Vec::new();
            if let Some(location) = info.location() {
                lines.push(format!(
                    "at {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                ));
            }
            lines.extend(user_frames(&Backtrace::force_capture()));
            CAPTURED_TRACE.with(|slot| *slot.borrow_mut() = Some(lines));
        }));
    });
}

/// Symbol names of the backtrace frames that are not panic machinery.
fn user_frames(backtrace: &Backtrace) -> Vec<String> {
    backtrace
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("at "))
        .filter_map(|line| line.split_once(": ").map(|(_, symbol)| symbol))
        .filter(|symbol| !is_runtime_frame(symbol))
        .map(str::to_owned)
        .collect()
}

fn is_runtime_frame(symbol: &str) -> bool {
    symbol == "main"
        || (symbol.starts_with('<') && symbol.contains(" as core::ops::function::Fn"))
        || symbol.contains("<unknown>")
        || RUNTIME_FRAME_PREFIXES
            .iter()
            .any(|prefix| symbol.trim_start_matches('<').starts_with(prefix))
}

/// Run `f`, turning a panic into an [`ErrorChain`].
///
/// Panics raised inside are silenced; their location and user frames become
/// the chain's trace lines.
pub(crate) fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, ErrorChain> {
    install_panic_hook();
    GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    GUARD_DEPTH.with(|depth| depth.set(depth.get() - 1));

    result.map_err(|payload| {
        let trace = CAPTURED_TRACE
            .with(|slot| slot.borrow_mut().take())
            .unwrap_or_default();
        ErrorChain::from_panic(payload, trace)
    })
}

/// Invoke `call` exactly once and time it.
///
/// Failures never escape: a panic or an `Err` becomes [`Outcome::Failure`],
/// and the elapsed time covers the attempt either way.
#[tracing::instrument(skip_all, fields(arity = ?arity))]
pub fn execute<T>(call: Call<'_, T>, arity: Arity) -> Execution<T> {
    let started_at = Local::now();
    let start = Instant::now();
    let result = guarded(call).and_then(std::convert::identity);
    let elapsed = start.elapsed();

    let timing = Timing {
        started_at,
        elapsed,
    };

    let outcome = match result {
        Ok(value) => {
            debug!(elapsed_ms = timing.elapsed_ms(), "Call returned");
            match arity {
                Arity::Value => Outcome::Success(Produced::Value(value)),
                Arity::Void => Outcome::Success(Produced::NoValue),
            }
        }
        Err(chain) => {
            warn!(
                elapsed_ms = timing.elapsed_ms(),
                error = %chain,
                "Call failed"
            );
            Outcome::Failure(chain)
        }
    };

    Execution { outcome, timing }
}
