//! # Fibre Autowire
//!
//! A small, thread-safe autowiring Inversion of Control (IoC) container for Rust.
//!
//! Instead of wiring every service by hand, you describe how each type is
//! constructed (its constructor parameters, their types and defaults) and
//! the container builds whole object graphs on demand, recursively resolving
//! every parameter.
//!
//! ## Core Concepts
//!
//! - **Container**: holds bindings and type descriptors, keyed by identifier.
//! - **Binding**: a factory bound to an identifier. A binding always wins over
//!   building the identifier from its descriptor.
//! - **TypeDescriptor / Injectable**: the constructor parameters and methods of
//!   a type, registered up front in place of runtime reflection.
//! - **ParameterBag**: named overrides for a single resolution.
//! - **Global Container**: a static, lazily-created container, accessible via `global()`.
//!
//! Each parameter is resolved in order from: an override with its name, its
//! default value, or a nested resolution of its named type. A parameter with
//! no single named type must be covered by an override.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_autowire::{params, Arguments, Container, Dependency, Injectable, Method, Result};
//! use std::sync::Arc;
//!
//! struct Database {
//!   url: String,
//! }
//!
//! struct UserService {
//!   db: Arc<Database>,
//! }
//!
//! impl Injectable for UserService {
//!   fn identifier() -> &'static str {
//!     "UserService"
//!   }
//!   fn dependencies() -> Vec<Dependency> {
//!     vec![Dependency::named("db", "Database")]
//!   }
//!   fn construct(args: &Arguments) -> Result<Self> {
//!     Ok(UserService { db: args.get(0)? })
//!   }
//!   fn methods() -> Vec<(&'static str, Method)> {
//!     vec![(
//!       "describe",
//!       Method::new(vec![Dependency::untyped("user")], |svc: &UserService, args: &Arguments| {
//!         Ok(format!("{} from {}", args.get::<&str>(0)?, svc.db.url))
//!       }),
//!     )]
//!   }
//! }
//!
//! let container = Container::new();
//! container.bind("Database", |_| Ok(Database { url: "postgres://localhost".into() }));
//! container.register_type::<UserService>();
//!
//! let description = container
//!   .callable_as::<String>("UserService@describe", params! { "user" => "alice" })
//!   .unwrap();
//! assert_eq!(*description, "alice from postgres://localhost");
//! ```

mod config;
mod container;
mod core;
mod dependency;
mod descriptor;
mod error;
mod global;
mod macros;
mod params;
mod value;

pub use config::{ContainerConfig, DEFAULT_MAX_DEPTH};
pub use container::{Container, Factory, Target};
pub use dependency::{Dependency, TypeHint};
pub use descriptor::{Arguments, Callable, Injectable, Method, TypeDescriptor};
pub use error::{Error, Result};
pub use global::global;
pub use params::ParameterBag;
pub use value::Value;
