//! Container configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default bound on nested resolutions.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Settings for a [`Container`](crate::Container).
///
/// With the `serde` feature the struct can be embedded in an application's
/// configuration file; missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerConfig {
  /// How many resolutions may be nested on one thread before
  /// [`Error::DepthExceeded`](crate::Error::DepthExceeded) is returned.
  pub max_depth: usize,
}

impl ContainerConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}
