use std::error::Error;
use std::fmt;

/// A wrapper around an error that prints its causes.
///
/// # Example
///
/// ```
/// use costlens_log::LogError;
///
/// if let Err(error) = std::env::var("FOO") {
///     costlens_log::error!("env failed: {}", LogError(&error));
/// }
/// ```
pub struct LogError<'a, E: Error + ?Sized>(pub &'a E);

impl<E: Error + ?Sized> fmt::Display for LogError<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;

        let mut source = self.0.source();
        while let Some(s) = source {
            write!(f, "\n  caused by: {s}")?;
            source = s.source();
        }

        Ok(())
    }
}
