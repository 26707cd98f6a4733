use crate::{Name, Proto};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures raised by objects and combinators.
///
/// Receivers are rendered with `Debug` so that formatting an error never
/// runs user code.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("property `{name}` not found on {receiver:?}")]
    PropertyNotFound { name: Name, receiver: Proto },

    #[error("method `{name}` not understood by {receiver:?}")]
    MethodNotFound { name: Name, receiver: Proto },

    #[error("`{function}` is missing argument `{parameter}` at position {position}")]
    MissingArgument {
        function: Name,
        parameter: Name,
        position: usize,
    },

    #[error("`{function}` needs a receiver but was called unbound")]
    UnboundReceiver { function: Name },

    #[error("`{function}` expects a {expected} argument, got {found}")]
    InvalidArgument {
        function: Name,
        expected: &'static str,
        found: &'static str,
    },

    #[error("singleton `{function}` was re-entered while computing its value")]
    SingletonReentered { function: Name },

    #[error("singleton `{function}` panicked on its first run")]
    SingletonPoisoned { function: Name },
}

impl Error {
    /// Name the error was raised for (property, method, or function).
    pub fn subject(&self) -> &str {
        match self {
            Error::PropertyNotFound { name, .. }
            | Error::MethodNotFound { name, .. } => &**name,
            Error::MissingArgument { function, .. }
            | Error::UnboundReceiver { function }
            | Error::InvalidArgument { function, .. }
            | Error::SingletonReentered { function }
            | Error::SingletonPoisoned { function } => &**function,
        }
    }
}
