//! File-reading capability consumed by trio resolution.

use std::future::Future;

/// Capability that turns a file reference into file contents.
///
/// Implementations never fail: an unresolvable reference yields an empty
/// string. Reporting why a reference could not be resolved (a log line, a
/// message shown to the user) is the implementation's job, not the caller's.
pub trait SourceReader: Send + Sync {
    /// Read the contents behind `reference`, or `""` if it can't be resolved.
    fn read(&self, reference: &str) -> impl Future<Output = String> + Send;
}

impl<T: SourceReader> SourceReader for &T {
    fn read(&self, reference: &str) -> impl Future<Output = String> + Send {
        (**self).read(reference)
    }
}

/// Adapter exposing an async closure as a [`SourceReader`].
///
/// # Example
///
/// ```
/// use penrose_trio::ReadFn;
///
/// let reader = ReadFn::new(|path: String| async move {
///     if path == "sets.domain" { "type Set".to_owned() } else { String::new() }
/// });
/// # let _ = reader;
/// ```
#[derive(Clone, Debug)]
pub struct ReadFn<F>(F);

impl<F> ReadFn<F> {
    /// Wrap a closure taking the reference by value.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, Fut> SourceReader for ReadFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = String> + Send,
{
    fn read(&self, reference: &str) -> impl Future<Output = String> + Send {
        (self.0)(reference.to_owned())
    }
}
