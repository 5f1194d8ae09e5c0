//! The global IoC container instance and access functions.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access, in a thread-safe manner, and never reset.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the process-wide container.
///
/// Every call returns the same instance. Prefer passing an explicit
/// [`Container`] where the caller controls its lifetime; the global instance
/// is for registrations that genuinely span the whole application.
///
/// # Examples
///
/// ```
/// use fibre_autowire::{global, ParameterBag};
///
/// global().bind("greeting", |_| Ok(String::from("Hello from global!")));
///
/// let greeting = global().make_as::<String>("greeting", ParameterBag::new()).unwrap();
/// assert_eq!(*greeting, "Hello from global!");
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
