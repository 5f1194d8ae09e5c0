//! The main `Container` struct: the binding registry, the type registry and
//! the resolution algorithm.

use crate::config::ContainerConfig;
use crate::core::ResolutionGuard;
use crate::dependency::Dependency;
use crate::descriptor::{Arguments, Callable, Injectable, TypeDescriptor};
use crate::error::{Error, Result};
use crate::params::ParameterBag;
use crate::value::Value;
use dashmap::DashMap;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// A registered construction strategy. It receives the container it is
/// resolved from.
pub type Factory = Arc<dyn Fn(&Container) -> Result<Value> + Send + Sync>;

/// What [`Container::make`] is asked to produce.
#[derive(Debug, Clone)]
pub enum Target {
  /// A bound or described identifier.
  Identifier(String),
  /// An invocable whose parameters are resolved before it is called.
  Callable(Callable),
}

impl Target {
  fn label(&self) -> &str {
    match self {
      Target::Identifier(identifier) => identifier,
      Target::Callable(callable) => callable.label(),
    }
  }
}

impl From<&str> for Target {
  fn from(identifier: &str) -> Self {
    Target::Identifier(identifier.to_owned())
  }
}

impl From<String> for Target {
  fn from(identifier: String) -> Self {
    Target::Identifier(identifier)
  }
}

impl From<Callable> for Target {
  fn from(callable: Callable) -> Self {
    Target::Callable(callable)
  }
}

/// The Inversion of Control (IoC) container.
///
/// It holds two registries keyed by identifier: bindings (factories that
/// always win) and type descriptors (used to build an identifier by
/// resolving its constructor parameters). Both are thread-safe and can be
/// changed at any point during the application's lifecycle.
///
/// Nothing is cached: an unbound identifier is constructed afresh on every
/// [`make`](Self::make).
#[derive(Default)]
pub struct Container {
  bindings: DashMap<String, Factory>,
  types: DashMap<String, Arc<TypeDescriptor>>,
  config: ContainerConfig,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  // --- Bindings ---

  /// Binds `identifier` to a factory, replacing any previous binding.
  ///
  /// The factory's result is wrapped as is, so a factory returning `Arc<T>`
  /// resolves as `Arc<T>`. Use [`bind_shared`](Self::bind_shared) to hand out
  /// one shared instance as `T`.
  pub fn bind<T, F>(&self, identifier: impl Into<String>, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.bind_factory(
      identifier,
      Arc::new(move |container: &Container| factory(container).map(Value::new)),
    );
  }

  /// Binds `identifier` to a factory returning a shared instance. The
  /// instance resolves as `T` and is not re-allocated.
  pub fn bind_shared<T, F>(&self, identifier: impl Into<String>, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<Arc<T>> + Send + Sync + 'static,
  {
    self.bind_factory(
      identifier,
      Arc::new(move |container: &Container| factory(container).map(Value::from_arc)),
    );
  }

  /// Binds an already type-erased factory, e.g. one obtained from [`get`](Self::get).
  pub fn bind_factory(&self, identifier: impl Into<String>, factory: Factory) {
    let identifier = identifier.into();
    debug!(identifier = %identifier, "binding registered");
    self.bindings.insert(identifier, factory);
  }

  pub fn has(&self, identifier: &str) -> bool {
    self.bindings.contains_key(identifier)
  }

  /// Removes the binding for `identifier`. Returns whether one existed.
  pub fn remove(&self, identifier: &str) -> bool {
    let removed = self.bindings.remove(identifier).is_some();
    if removed {
      debug!(identifier, "binding removed");
    }
    removed
  }

  pub fn get(&self, identifier: &str) -> Option<Factory> {
    self.bindings.get(identifier).map(|entry| Arc::clone(entry.value()))
  }

  /// A snapshot of every binding.
  pub fn all_bindings(&self) -> HashMap<String, Factory> {
    self
      .bindings
      .iter()
      .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
      .collect()
  }

  // --- Type descriptors ---

  /// Registers a descriptor under its identifier, replacing any previous one.
  pub fn register(&self, descriptor: TypeDescriptor) {
    debug!(identifier = descriptor.identifier(), "type registered");
    self
      .types
      .insert(descriptor.identifier().to_owned(), Arc::new(descriptor));
  }

  pub fn register_type<T: Injectable>(&self) {
    self.register(TypeDescriptor::of::<T>());
  }

  pub fn is_registered(&self, identifier: &str) -> bool {
    self.types.contains_key(identifier)
  }

  pub fn unregister(&self, identifier: &str) -> bool {
    self.types.remove(identifier).is_some()
  }

  pub fn descriptor(&self, identifier: &str) -> Option<Arc<TypeDescriptor>> {
    self.types.get(identifier).map(|entry| Arc::clone(entry.value()))
  }

  // --- Resolution ---

  /// Produces an instance of `target`.
  ///
  /// `overrides` apply to the parameters of `target` itself, never to the
  /// parameters of anything resolved on its behalf.
  pub fn make(&self, target: impl Into<Target>, overrides: ParameterBag) -> Result<Value> {
    let target = target.into();
    let _guard = ResolutionGuard::enter(self.address(), target.label(), self.config.max_depth)?;

    match &target {
      Target::Callable(callable) => self.resolve_callable(callable, &overrides),
      Target::Identifier(identifier) => self.resolve_identifier(identifier, &overrides),
    }
  }

  /// Like [`make`](Self::make), downcasting the result to `T`.
  pub fn make_as<T: Any + Send + Sync>(
    &self,
    target: impl Into<Target>,
    overrides: ParameterBag,
  ) -> Result<Arc<T>> {
    let target = target.into();
    let label = target.label().to_owned();
    let value = self.make(target, overrides)?;
    downcast_result(label, value)
  }

  /// Resolves an instance of `Type` and invokes its `method`, given a
  /// `Type@method` descriptor. `overrides` apply to the method's parameters.
  pub fn callable(&self, descriptor: &str, overrides: ParameterBag) -> Result<Value> {
    let (identifier, method_name) = split_descriptor(descriptor)?;
    let instance = self.make(identifier, ParameterBag::new())?;

    let method = self
      .descriptor(identifier)
      .and_then(|described| described.method(method_name).cloned())
      .ok_or_else(|| Error::NotResolvable(descriptor.to_owned()))?;

    self.make(method.bind(instance, descriptor), overrides)
  }

  pub fn callable_as<T: Any + Send + Sync>(
    &self,
    descriptor: &str,
    overrides: ParameterBag,
  ) -> Result<Arc<T>> {
    let value = self.callable(descriptor, overrides)?;
    downcast_result(descriptor.to_owned(), value)
  }

  /// Decides the value of a single parameter.
  ///
  /// In order: an override with the parameter's name, a failure if the
  /// parameter has no single named type, its default value, and finally a
  /// nested `make` of its type with no overrides.
  pub fn resolve_dependency(
    &self,
    dependency: &Dependency,
    params: &ParameterBag,
  ) -> Result<Value> {
    let name = dependency.name();
    if let Some(value) = params.get(name) {
      trace!(parameter = name, "using override");
      return Ok(value.clone());
    }

    let Some(identifier) = dependency.type_hint() else {
      return Err(Error::NotResolvable(name.to_owned()));
    };

    if let Some(default) = dependency.default_value() {
      trace!(parameter = name, "using default value");
      return Ok(default.clone());
    }

    trace!(parameter = name, identifier, "resolving nested dependency");
    self.make(identifier, ParameterBag::new())
  }

  // --- PRIVATE HELPERS ---

  // Identifies this container's frames on the thread-local resolution stack.
  fn address(&self) -> usize {
    self as *const Container as usize
  }

  fn resolve_identifier(&self, identifier: &str, params: &ParameterBag) -> Result<Value> {
    if let Some(factory) = self.get(identifier) {
      trace!(identifier, "resolving from binding");
      return factory(self);
    }

    let descriptor = self
      .descriptor(identifier)
      .ok_or_else(|| Error::NotResolvable(identifier.to_owned()))?;

    if !descriptor.is_instantiable() {
      return Err(Error::NotInstantiable(identifier.to_owned()));
    }

    if descriptor.parameters().is_empty() {
      trace!(identifier, "constructing without arguments");
      return descriptor.construct(&Arguments::default());
    }

    trace!(identifier, "resolving constructor parameters");
    let args = self.resolve_dependencies(descriptor.parameters(), params)?;
    descriptor.construct(&args)
  }

  fn resolve_callable(&self, callable: &Callable, params: &ParameterBag) -> Result<Value> {
    trace!(callable = callable.label(), "resolving callable parameters");
    let args = self.resolve_dependencies(callable.parameters(), params)?;
    callable.invoke(&args)
  }

  fn resolve_dependencies(
    &self,
    dependencies: &[Dependency],
    params: &ParameterBag,
  ) -> Result<Arguments> {
    dependencies
      .iter()
      .map(|dependency| {
        self
          .resolve_dependency(dependency, params)
          .map(|value| (dependency.name().to_owned(), value))
      })
      .collect::<Result<Vec<_>>>()
      .map(Arguments::new)
  }
}

fn split_descriptor(descriptor: &str) -> Result<(&str, &str)> {
  let mut parts = descriptor.split('@');
  match (parts.next(), parts.next(), parts.next()) {
    (Some(identifier), Some(method), None) => Ok((identifier, method)),
    _ => Err(Error::MalformedDescriptor(descriptor.to_owned())),
  }
}

fn downcast_result<T: Any + Send + Sync>(label: String, value: Value) -> Result<Arc<T>> {
  value.downcast::<T>().ok_or_else(|| Error::ArgumentType {
    parameter: label,
    expected: type_name::<T>(),
    found: value.type_name(),
  })
}
