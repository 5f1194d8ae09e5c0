//! The type-erased values that flow through resolution.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A shared, type-erased instance produced or consumed by the container.
///
/// Overrides, default values, factory results and constructed instances are
/// all carried as `Value`s. Cloning is cheap: it only bumps the reference count.
#[derive(Clone)]
pub struct Value {
  inner: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Value {
  /// Wraps an owned instance. A `Value` is returned as is, never nested.
  pub fn new<T: Any + Send + Sync>(instance: T) -> Self {
    let boxed: Box<dyn Any + Send + Sync> = Box::new(instance);
    match boxed.downcast::<Value>() {
      Ok(value) => *value,
      Err(boxed) => Self {
        inner: Arc::from(boxed),
        type_name: type_name::<T>(),
      },
    }
  }

  /// Wraps an already shared instance without re-allocating it.
  pub fn from_arc<T: Any + Send + Sync>(instance: Arc<T>) -> Self {
    Self {
      inner: instance,
      type_name: type_name::<T>(),
    }
  }

  /// The Rust type name of the wrapped instance.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn is<T: Any>(&self) -> bool {
    self.inner.is::<T>()
  }

  /// Returns the instance as an `Arc<T>`, or `None` if it holds another type.
  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    Arc::clone(&self.inner).downcast::<T>().ok()
  }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
    self.inner.downcast_ref::<T>()
  }

  /// True if both values point at the same allocation.
  pub fn ptr_eq(&self, other: &Value) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl fmt::Debug for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Value({})", self.type_name)
  }
}
