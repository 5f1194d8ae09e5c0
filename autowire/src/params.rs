//! Caller-supplied overrides for a single resolution.

use crate::value::Value;
use std::any::Any;
use std::collections::HashMap;

/// An immutable set of named values that short-circuits resolution of
/// parameters with a matching name.
///
/// A bag is scoped to exactly one `make`/`callable` invocation. Parameters of
/// nested resolutions are never looked up in it.
#[derive(Debug, Clone, Default)]
pub struct ParameterBag {
  parameters: HashMap<String, Value>,
}

impl ParameterBag {
  /// Creates an empty bag.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a value while the bag is being built.
  pub fn with<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
    self.with_value(name, Value::new(value))
  }

  /// Adds an already type-erased value while the bag is being built.
  pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
    self.parameters.insert(name.into(), value);
    self
  }

  /// True iff the bag holds a value for exactly this name.
  pub fn has(&self, name: &str) -> bool {
    self.parameters.contains_key(name)
  }

  /// The value stored under `name`. Check with [`has`](Self::has) first.
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.parameters.get(name)
  }

  pub fn len(&self) -> usize {
    self.parameters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.parameters.is_empty()
  }
}

impl From<HashMap<String, Value>> for ParameterBag {
  fn from(parameters: HashMap<String, Value>) -> Self {
    Self { parameters }
  }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ParameterBag {
  fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
    Self {
      parameters: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookup_is_by_exact_name() {
    let bag = ParameterBag::new().with("timeout", 30_u32);

    assert!(bag.has("timeout"));
    assert!(!bag.has("Timeout"));
    assert!(!bag.has("timeout "));
    assert_eq!(*bag.get("timeout").unwrap().downcast::<u32>().unwrap(), 30);
    assert!(bag.get("missing").is_none());
  }

  #[test]
  fn a_false_value_is_still_present() {
    let bag: ParameterBag = vec![("verbose", Value::new(false))].into_iter().collect();

    assert!(bag.has("verbose"));
    assert_eq!(bag.len(), 1);
    assert_eq!(bag.get("verbose").unwrap().downcast_ref::<bool>(), Some(&false));
  }
}
