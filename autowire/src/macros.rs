//! Public macros for building overrides and resolving services.

/// Builds a [`ParameterBag`](crate::ParameterBag) from `name => value` pairs.
///
/// # Examples
///
/// ```
/// use fibre_autowire::params;
///
/// let bag = params! { "host" => String::from("localhost"), "port" => 5432_u16 };
/// assert!(bag.has("host"));
/// assert!(bag.has("port"));
/// assert!(params!().is_empty());
/// ```
#[macro_export]
macro_rules! params {
  () => {
    $crate::ParameterBag::new()
  };
  ($($name:expr => $value:expr),+ $(,)?) => {
    $crate::ParameterBag::new()$(.with($name, $value))+
  };
}

/// Resolves an [`Injectable`](crate::Injectable) type from the given container,
/// panicking if it cannot be resolved.
///
/// For a non-panicking version, use `Container::make_as` directly.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, $type:ty) => {
    $crate::resolve_from!($container, $type, $crate::ParameterBag::new())
  };
  ($container:expr, $type:ty, $params:expr) => {
    $container
      .make_as::<$type>(<$type as $crate::Injectable>::identifier(), $params)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service {}: {}",
          std::any::type_name::<$type>(),
          err
        )
      })
  };
}

/// Resolves an [`Injectable`](crate::Injectable) type from the global container.
///
/// # Panics
///
/// This macro will panic if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{global, params, resolve, Arguments, Dependency, Injectable, Result};
///
/// struct Greeter {
///   name: String,
/// }
///
/// impl Injectable for Greeter {
///   fn dependencies() -> Vec<Dependency> {
///     vec![Dependency::named("name", "String")]
///   }
///   fn construct(args: &Arguments) -> Result<Self> {
///     Ok(Greeter { name: args.cloned(0)? })
///   }
/// }
///
/// global().register_type::<Greeter>();
///
/// let greeter = resolve!(Greeter, params! { "name" => String::from("World") });
/// assert_eq!(greeter.name, "World");
/// ```
#[macro_export]
macro_rules! resolve {
  ($type:ty) => {
    $crate::resolve_from!($crate::global(), $type)
  };
  ($type:ty, $params:expr) => {
    $crate::resolve_from!($crate::global(), $type, $params)
  };
}
