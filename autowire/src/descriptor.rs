//! Construction metadata: what the container knows about a type without
//! runtime reflection.
//!
//! A [`TypeDescriptor`] lists the parameters of an identifier's constructor
//! and the [`Method`]s that can be dispatched with `Type@method`. A
//! [`Callable`] is a free-standing invocable with its own parameter list.
//! Constructors, methods and callables all receive their resolved arguments
//! as one positional [`Arguments`] list, in declaration order.

use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::value::Value;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ErasedConstructor = Arc<dyn Fn(&Arguments) -> Result<Value> + Send + Sync>;
type ErasedMethod = Arc<dyn Fn(&Value, &Arguments) -> Result<Value> + Send + Sync>;

/// The resolved arguments for one constructor or callable invocation.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
  entries: Vec<(String, Value)>,
}

impl Arguments {
  pub(crate) fn new(entries: Vec<(String, Value)>) -> Self {
    Self { entries }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The type-erased argument at `index`.
  pub fn value(&self, index: usize) -> Result<&Value> {
    self
      .entries
      .get(index)
      .map(|(_, value)| value)
      .ok_or(Error::MissingArgument { index })
  }

  /// The argument at `index`, downcast to `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let (name, value) = self
      .entries
      .get(index)
      .ok_or(Error::MissingArgument { index })?;
    value.downcast::<T>().ok_or_else(|| Error::ArgumentType {
      parameter: name.clone(),
      expected: type_name::<T>(),
      found: value.type_name(),
    })
  }

  /// Like [`get`](Self::get), but clones the instance out of its `Arc`.
  pub fn cloned<T: Any + Send + Sync + Clone>(&self, index: usize) -> Result<T> {
    self.get::<T>(index).map(|arc| (*arc).clone())
  }

  /// Parameter names and values in declaration order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.entries.iter().map(|(name, value)| (name.as_str(), value))
  }
}

/// An invocable value together with the parameters it expects.
///
/// Passing a `Callable` to [`Container::make`](crate::Container::make)
/// resolves its parameters and invokes it, skipping the registries.
#[derive(Clone)]
pub struct Callable {
  label: String,
  parameters: Vec<Dependency>,
  body: ErasedConstructor,
}

impl Callable {
  pub fn new<T, F>(parameters: Vec<Dependency>, body: F) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      label: String::from("{callable}"),
      parameters,
      body: Arc::new(move |args: &Arguments| body(args).map(Value::new)),
    }
  }

  /// Names the callable in logs and depth errors.
  pub fn with_label(mut self, label: impl Into<String>) -> Self {
    self.label = label.into();
    self
  }

  pub fn label(&self) -> &str {
    &self.label
  }

  pub fn parameters(&self) -> &[Dependency] {
    &self.parameters
  }

  pub(crate) fn invoke(&self, args: &Arguments) -> Result<Value> {
    (self.body)(args)
  }
}

impl fmt::Debug for Callable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Callable")
      .field("label", &self.label)
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

/// A method of a described type, dispatched through `Type@method`.
#[derive(Clone)]
pub struct Method {
  parameters: Vec<Dependency>,
  body: ErasedMethod,
}

impl Method {
  /// Wraps `body`, which receives the resolved instance as `&S`.
  pub fn new<S, T, F>(parameters: Vec<Dependency>, body: F) -> Self
  where
    S: Any + Send + Sync,
    T: Any + Send + Sync,
    F: Fn(&S, &Arguments) -> Result<T> + Send + Sync + 'static,
  {
    let body = move |receiver: &Value, args: &Arguments| {
      let this = receiver
        .downcast_ref::<S>()
        .ok_or_else(|| Error::ArgumentType {
          parameter: String::from("self"),
          expected: type_name::<S>(),
          found: receiver.type_name(),
        })?;
      body(this, args).map(Value::new)
    };
    Self {
      parameters,
      body: Arc::new(body),
    }
  }

  pub fn parameters(&self) -> &[Dependency] {
    &self.parameters
  }

  /// Binds the method to `receiver`, producing a callable value.
  pub(crate) fn bind(&self, receiver: Value, label: &str) -> Callable {
    let body = Arc::clone(&self.body);
    Callable {
      label: label.to_owned(),
      parameters: self.parameters.clone(),
      body: Arc::new(move |args: &Arguments| body(&receiver, args)),
    }
  }
}

impl fmt::Debug for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Method")
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

#[derive(Clone)]
enum Kind {
  Concrete {
    parameters: Vec<Dependency>,
    constructor: ErasedConstructor,
  },
  Abstract,
}

/// Everything the container needs to build an identifier without a binding.
#[derive(Clone)]
pub struct TypeDescriptor {
  identifier: String,
  kind: Kind,
  methods: HashMap<String, Method>,
}

impl TypeDescriptor {
  /// A constructible type. `constructor` receives one argument per entry of
  /// `parameters`, in the same order.
  pub fn concrete<T, F>(
    identifier: impl Into<String>,
    parameters: Vec<Dependency>,
    constructor: F,
  ) -> Self
  where
    T: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    Self {
      identifier: identifier.into(),
      kind: Kind::Concrete {
        parameters,
        constructor: Arc::new(move |args: &Arguments| constructor(args).map(Value::new)),
      },
      methods: HashMap::new(),
    }
  }

  /// A capability that can only be provided through a binding.
  pub fn abstract_type(identifier: impl Into<String>) -> Self {
    Self {
      identifier: identifier.into(),
      kind: Kind::Abstract,
      methods: HashMap::new(),
    }
  }

  /// The descriptor an [`Injectable`] type gives of itself.
  pub fn of<T: Injectable>() -> Self {
    let descriptor = Self::concrete(T::identifier(), T::dependencies(), T::construct);
    T::methods()
      .into_iter()
      .fold(descriptor, |descriptor, (name, method)| descriptor.with_method(name, method))
  }

  pub fn with_method(mut self, name: impl Into<String>, method: Method) -> Self {
    self.methods.insert(name.into(), method);
    self
  }

  pub fn identifier(&self) -> &str {
    &self.identifier
  }

  pub fn is_instantiable(&self) -> bool {
    matches!(self.kind, Kind::Concrete { .. })
  }

  /// Constructor parameters in declaration order. Empty for abstract types.
  pub fn parameters(&self) -> &[Dependency] {
    match &self.kind {
      Kind::Concrete { parameters, .. } => parameters,
      Kind::Abstract => &[],
    }
  }

  pub fn method(&self, name: &str) -> Option<&Method> {
    self.methods.get(name)
  }

  pub(crate) fn construct(&self, args: &Arguments) -> Result<Value> {
    match &self.kind {
      Kind::Concrete { constructor, .. } => constructor(args),
      Kind::Abstract => Err(Error::NotInstantiable(self.identifier.clone())),
    }
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeDescriptor")
      .field("identifier", &self.identifier)
      .field("instantiable", &self.is_instantiable())
      .field("parameters", &self.parameters())
      .field("methods", &self.methods.keys().collect::<Vec<_>>())
      .finish()
  }
}

/// A type that describes its own construction.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{Arguments, Container, Dependency, Injectable, ParameterBag, Result};
///
/// struct Clock;
/// impl Injectable for Clock {
///   fn construct(_: &Arguments) -> Result<Self> {
///     Ok(Clock)
///   }
/// }
///
/// struct Scheduler {
///   _clock: std::sync::Arc<Clock>,
/// }
/// impl Injectable for Scheduler {
///   fn dependencies() -> Vec<Dependency> {
///     vec![Dependency::of::<Clock>("clock")]
///   }
///   fn construct(args: &Arguments) -> Result<Self> {
///     Ok(Scheduler { _clock: args.get(0)? })
///   }
/// }
///
/// let container = Container::new();
/// container.register_type::<Clock>();
/// container.register_type::<Scheduler>();
///
/// let scheduler = container.make_as::<Scheduler>(Scheduler::identifier(), ParameterBag::new());
/// assert!(scheduler.is_ok());
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
  /// The identifier the type is registered and resolved under.
  fn identifier() -> &'static str {
    type_name::<Self>()
  }

  /// Constructor parameters in declaration order.
  fn dependencies() -> Vec<Dependency> {
    Vec::new()
  }

  fn construct(args: &Arguments) -> Result<Self>;

  /// Methods that can be dispatched with `Type@method`.
  fn methods() -> Vec<(&'static str, Method)> {
    Vec::new()
  }
}
