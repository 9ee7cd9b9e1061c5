//! Verified fallback for tokenizer/stemmer factories.
//!
//! [`with_fallback`] is a higher-order wrapper over a component factory: on
//! every resolution it builds the primary candidate, runs a verification
//! probe against it, and on construction error or probe failure substitutes
//! the always-available baseline instead. The degradation is silent except
//! for exactly one warning per resolution through the [`WarningSink`].
//!
//! The warning message template carries a `{cause}` placeholder that is
//! filled with the construction/probe failure description.

use std::sync::Arc;

use crate::language::profile::ComponentFactory;

/// A factory whose construction may fail with a cause description.
pub type FallibleFactory<T> =
    Arc<dyn Fn() -> std::result::Result<T, String> + Send + Sync>;

/// A verification probe: runs the candidate instance against a known input
/// and reports failure with a cause description.
pub type Probe<T> = Arc<dyn Fn(&T) -> std::result::Result<(), String> + Send + Sync>;

// ─── Warning sink ───────────────────────────────────────────────────────────

/// Receives fallback-degradation warnings.
///
/// The default sink forwards to the `log` facade; tests inject counting
/// sinks to assert the one-warning-per-resolution contract.
pub trait WarningSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `log::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

// ─── Fallback wrapper ───────────────────────────────────────────────────────

/// Wrap `primary` so that a broken candidate is replaced by `baseline`.
///
/// The probe runs on every resolution call, so a factory that starts
/// failing later (or only intermittently) still degrades gracefully; each
/// failed resolution emits exactly one warning.
pub fn with_fallback<T: 'static>(
    primary: FallibleFactory<T>,
    baseline: ComponentFactory<T>,
    probe: Probe<T>,
    sink: Arc<dyn WarningSink>,
    template: &str,
) -> ComponentFactory<T> {
    let template = template.to_string();
    Arc::new(move || {
        let outcome = primary().and_then(|candidate| probe(&candidate).map(|()| candidate));
        match outcome {
            Ok(candidate) => candidate,
            Err(cause) => {
                sink.warn(&template.replace("{cause}", &cause));
                baseline()
            }
        }
    })
}
