use std::sync::Arc;

/// Where the translator reports server side failures
///
/// Implementations must not panic; whatever they do has no effect on the response sent to the caller.
pub trait FailureLog: Send + Sync {
    fn error(&self, url: &str, message: &str);
}

/// Reports failures as `tracing` error events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFailureLog;

impl FailureLog for TracingFailureLog {
    fn error(&self, url: &str, message: &str) {
        tracing::error!(url, "{message}");
    }
}

impl<L> FailureLog for Arc<L>
where
    L: FailureLog + ?Sized,
{
    fn error(&self, url: &str, message: &str) {
        (**self).error(url, message)
    }
}

/// A [FailureLog] backed by a closure, see [log_fn]
#[derive(Clone, Copy)]
pub struct FnLog<F>(F);

/// Turns a `Fn(url, message)` closure into a [FailureLog]
pub fn log_fn<F>(f: F) -> FnLog<F>
where
    F: Fn(&str, &str) + Send + Sync,
{
    FnLog(f)
}

impl<F> FailureLog for FnLog<F>
where
    F: Fn(&str, &str) + Send + Sync,
{
    fn error(&self, url: &str, message: &str) {
        (self.0)(url, message)
    }
}
