use thiserror::Error;

/// The error type for all container operations.
#[derive(Debug, Error)]
pub enum Error {
  /// An identifier with neither a binding nor a descriptor, a parameter that
  /// has no single named type and no override, or a callable method that
  /// does not exist.
  #[error("'{0}' cannot be resolved")]
  NotResolvable(String),

  /// The identifier is described as abstract and has no binding.
  #[error("'{0}' cannot be instantiated")]
  NotInstantiable(String),

  #[error("'{0}' is not a supported callable descriptor, expected 'Type@method'")]
  MalformedDescriptor(String),

  /// Resolution nested deeper than the configured limit, usually a cycle.
  #[error("resolution of '{identifier}' exceeded the maximum depth of {limit}")]
  DepthExceeded { identifier: String, limit: usize },

  #[error("argument '{parameter}' has type {found}, expected {expected}")]
  ArgumentType {
    parameter: String,
    expected: &'static str,
    found: &'static str,
  },

  #[error("no resolved argument at position {index}")]
  MissingArgument { index: usize },

  /// A factory, constructor or method failed with its own error.
  #[error("construction of '{identifier}' failed: {source}")]
  Factory {
    identifier: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  /// Wraps a foreign error raised while constructing `identifier`.
  pub fn factory(
    identifier: impl Into<String>,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    Error::Factory {
      identifier: identifier.into(),
      source: source.into(),
    }
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
