//! A read-only view over one formal parameter.

use crate::descriptor::Injectable;
use crate::value::Value;
use std::any::Any;

/// The declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
  /// No type was declared.
  Untyped,
  /// Exactly one concrete identifier.
  Named(String),
  /// One of several identifiers.
  Union(Vec<String>),
  /// All of several identifiers at once.
  Intersection(Vec<String>),
}

/// One parameter of a constructor or callable: its name, its type hint and
/// an optional default value.
///
/// Only parameters with a [`TypeHint::Named`] hint can be resolved without an
/// override. A default is tagged present or absent, so a default of `false`
/// or `0` is a real default.
#[derive(Debug, Clone)]
pub struct Dependency {
  name: String,
  hint: TypeHint,
  default: Option<Value>,
}

impl Dependency {
  pub fn new(name: impl Into<String>, hint: TypeHint) -> Self {
    Self {
      name: name.into(),
      hint,
      default: None,
    }
  }

  /// A parameter typed with a single identifier.
  pub fn named(name: impl Into<String>, identifier: impl Into<String>) -> Self {
    Self::new(name, TypeHint::Named(identifier.into()))
  }

  /// A parameter typed with the identifier of an [`Injectable`] type.
  pub fn of<T: Injectable>(name: impl Into<String>) -> Self {
    Self::named(name, T::identifier())
  }

  pub fn untyped(name: impl Into<String>) -> Self {
    Self::new(name, TypeHint::Untyped)
  }

  /// Declares a default value for the parameter.
  pub fn with_default<T: Any + Send + Sync>(self, default: T) -> Self {
    self.with_default_value(Value::new(default))
  }

  pub fn with_default_value(mut self, default: Value) -> Self {
    self.default = Some(default);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn hint(&self) -> &TypeHint {
    &self.hint
  }

  /// True iff the parameter is typed with exactly one concrete identifier.
  pub fn is_named_type(&self) -> bool {
    matches!(self.hint, TypeHint::Named(_))
  }

  /// The identifier to resolve. `None` unless [`is_named_type`](Self::is_named_type).
  pub fn type_hint(&self) -> Option<&str> {
    match &self.hint {
      TypeHint::Named(identifier) => Some(identifier),
      _ => None,
    }
  }

  pub fn has_default_value(&self) -> bool {
    self.default.is_some()
  }

  pub fn default_value(&self) -> Option<&Value> {
    self.default.as_ref()
  }
}
