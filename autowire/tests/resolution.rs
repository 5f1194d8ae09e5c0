use fibre_autowire::{
  params, Arguments, Container, ContainerConfig, Dependency, Error, Injectable, ParameterBag,
  TypeDescriptor, TypeHint,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

#[derive(Debug, PartialEq, Eq)]
struct Foo {
  first: String,
  second: String,
}

impl Injectable for Foo {
  fn identifier() -> &'static str {
    "Foo"
  }
  fn dependencies() -> Vec<Dependency> {
    vec![Dependency::untyped("first"), Dependency::untyped("second")]
  }
  fn construct(args: &Arguments) -> fibre_autowire::Result<Self> {
    Ok(Foo {
      first: args.cloned(0)?,
      second: args.cloned(1)?,
    })
  }
}

struct Bar {
  foo: Arc<Foo>,
}

impl Injectable for Bar {
  fn identifier() -> &'static str {
    "Bar"
  }
  fn dependencies() -> Vec<Dependency> {
    vec![Dependency::of::<Foo>("foo")]
  }
  fn construct(args: &Arguments) -> fibre_autowire::Result<Self> {
    Ok(Bar { foo: args.get(0)? })
  }
}

struct Clock;

impl Injectable for Clock {
  fn construct(_: &Arguments) -> fibre_autowire::Result<Self> {
    Ok(Clock)
  }
}

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::new("fibre_autowire=trace"))
    .with_test_writer()
    .try_init();
}

// --- Tests ---

#[test]
fn test_bound_factory_is_injected_into_dependents() {
  // Arrange
  init_tracing();
  let container = Container::new();
  container.register_type::<Foo>();
  container.register_type::<Bar>();
  container.bind(Foo::identifier(), |_| {
    Ok(Foo {
      first: "a".to_string(),
      second: "b".to_string(),
    })
  });

  // Act
  let foo = container.make_as::<Foo>("Foo", ParameterBag::new()).unwrap();
  let bar = container.make_as::<Bar>("Bar", ParameterBag::new()).unwrap();

  // Assert
  assert_eq!(
    *foo,
    Foo {
      first: "a".to_string(),
      second: "b".to_string()
    }
  );
  assert_eq!(*bar.foo, *foo);
}

#[test]
fn test_zero_parameter_types_are_rebuilt_on_every_make() {
  let container = Container::new();
  container.register_type::<Clock>();

  let first = container.make(Clock::identifier(), ParameterBag::new()).unwrap();
  let second = container.make(Clock::identifier(), ParameterBag::new()).unwrap();

  assert!(first.is::<Clock>());
  assert!(!first.ptr_eq(&second));
}

#[test]
fn test_binding_shadows_a_satisfiable_descriptor() {
  static DESCRIPTOR_CALLS: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container.register(TypeDescriptor::concrete("Counter", vec![], |_| {
    DESCRIPTOR_CALLS.fetch_add(1, Ordering::SeqCst);
    Ok(0_u32)
  }));
  container.bind("Counter", |_| Ok(99_u32));

  let counter = container.make_as::<u32>("Counter", ParameterBag::new()).unwrap();

  assert_eq!(*counter, 99);
  assert_eq!(DESCRIPTOR_CALLS.load(Ordering::SeqCst), 0);

  // Once the binding is gone, the descriptor is used again.
  assert!(container.remove("Counter"));
  assert_eq!(*container.make_as::<u32>("Counter", ParameterBag::new()).unwrap(), 0);
  assert_eq!(DESCRIPTOR_CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_override_wins_over_type_and_default() {
  let container = Container::new();
  container.register_type::<Clock>();
  container.register(TypeDescriptor::concrete(
    "Job",
    vec![
      Dependency::of::<Clock>("clock"),
      Dependency::named("retries", "u8").with_default(3_u8),
    ],
    |args| Ok((args.value(0)?.type_name(), *args.get::<u8>(1)?)),
  ));

  let job = container
    .make_as::<(&'static str, u8)>("Job", params! { "clock" => "frozen", "retries" => 7_u8 })
    .unwrap();

  assert_eq!(*job, (std::any::type_name::<&str>(), 7));
}

#[test]
fn test_default_beats_nested_construction() {
  static CLOCKS_BUILT: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container.bind("Clock", |_| {
    CLOCKS_BUILT.fetch_add(1, Ordering::SeqCst);
    Ok(String::from("built"))
  });
  container.register(TypeDescriptor::concrete(
    "Timer",
    vec![Dependency::named("clock", "Clock").with_default(String::from("default"))],
    |args| args.cloned::<String>(0),
  ));

  let timer = container.make_as::<String>("Timer", ParameterBag::new()).unwrap();

  assert_eq!(*timer, "default");
  assert_eq!(CLOCKS_BUILT.load(Ordering::SeqCst), 0);
}

#[test]
fn test_false_is_a_usable_default() {
  let container = Container::new();
  container.register(TypeDescriptor::concrete(
    "Flags",
    vec![Dependency::named("verbose", "bool").with_default(false)],
    |args| args.cloned::<bool>(0),
  ));

  let verbose = container.make_as::<bool>("Flags", ParameterBag::new()).unwrap();

  assert!(!*verbose);
}

#[test]
fn test_untyped_union_and_intersection_parameters_need_overrides() {
  let container = Container::new();
  let hints = [
    TypeHint::Untyped,
    TypeHint::Union(vec!["Clock".into(), "String".into()]),
    TypeHint::Intersection(vec!["Read".into(), "Write".into()]),
  ];

  for hint in hints {
    // A default does not help: the type check comes first.
    container.register(TypeDescriptor::concrete(
      "Loose",
      vec![Dependency::new("input", hint).with_default(1_i32)],
      |args| args.cloned::<i32>(0),
    ));

    let err = container.make("Loose", ParameterBag::new()).unwrap_err();
    assert!(matches!(err, Error::NotResolvable(ref name) if name == "input"), "{err}");

    let value = container.make_as::<i32>("Loose", params! { "input" => 5_i32 }).unwrap();
    assert_eq!(*value, 5);
  }
}

#[test]
fn test_unknown_identifier_is_not_resolvable() {
  let container = Container::new();

  let err = container.make("Nowhere", ParameterBag::new()).unwrap_err();

  assert!(matches!(err, Error::NotResolvable(ref id) if id == "Nowhere"));
  assert_eq!(err.to_string(), "'Nowhere' cannot be resolved");
}

#[test]
fn test_abstract_type_without_binding_is_not_instantiable() {
  let container = Container::new();
  container.register(TypeDescriptor::abstract_type("Storage"));

  let err = container.make("Storage", ParameterBag::new()).unwrap_err();
  assert!(matches!(err, Error::NotInstantiable(ref id) if id == "Storage"));

  // Binding the capability makes it resolvable.
  container.bind("Storage", |_| Ok(String::from("memory")));
  let storage = container.make_as::<String>("Storage", ParameterBag::new()).unwrap();
  assert_eq!(*storage, "memory");
}

#[test]
fn test_overrides_are_not_inherited_by_nested_resolutions() {
  let container = Container::new();
  container.register_type::<Foo>();
  container.register_type::<Bar>();

  // `first` and `second` are meant for Foo, but Bar is what is being made.
  let err = container
    .make("Bar", params! { "first" => "x".to_string(), "second" => "y".to_string() })
    .unwrap_err();
  assert!(matches!(err, Error::NotResolvable(ref name) if name == "first"));

  // Overriding Bar's own parameter bypasses Foo entirely.
  let foo = Foo {
    first: "x".to_string(),
    second: "y".to_string(),
  };
  let bar = container.make_as::<Bar>("Bar", params! { "foo" => foo }).unwrap();
  assert_eq!(bar.foo.first, "x");
}

#[test]
fn test_constructor_is_not_called_when_an_argument_fails() {
  static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

  let container = Container::new();
  container.register(TypeDescriptor::concrete(
    "Pair",
    vec![Dependency::named("left", "Left"), Dependency::named("right", "Missing")],
    |_| {
      CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
      Ok(())
    },
  ));
  container.bind("Left", |_| Ok(1_u8));

  let err = container.make("Pair", ParameterBag::new()).unwrap_err();

  assert!(matches!(err, Error::NotResolvable(ref id) if id == "Missing"));
  assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 0);
}

#[test]
fn test_self_referential_type_fails_with_depth_error() {
  let container = Container::with_config(ContainerConfig::new().max_depth(16));
  container.register(TypeDescriptor::concrete(
    "Node",
    vec![Dependency::named("next", "Node")],
    |_| Ok(()),
  ));

  let err = container.make("Node", ParameterBag::new()).unwrap_err();

  assert!(matches!(
    err,
    Error::DepthExceeded { ref identifier, limit: 16 } if identifier == "Node"
  ));
}

#[test]
fn test_mutual_cycle_through_factories_fails_with_depth_error() {
  let container = Container::new();
  container.bind("Ping", |c: &Container| c.make("Pong", ParameterBag::new()).map(|_| ()));
  container.bind("Pong", |c: &Container| c.make("Ping", ParameterBag::new()).map(|_| ()));

  let err = container.make("Ping", ParameterBag::new()).unwrap_err();

  let max_depth = container.config().max_depth;
  assert!(matches!(err, Error::DepthExceeded { limit, .. } if limit == max_depth));
}

#[test]
fn test_factories_can_resolve_from_their_container() {
  let container = Container::new();
  container.register_type::<Clock>();
  container.bind("Uptime", |c: &Container| {
    let clock = c.make_as::<Clock>(Clock::identifier(), ParameterBag::new())?;
    // Binding from inside a factory must not deadlock.
    c.bind("SeenClock", |_| Ok(true));
    Ok(Arc::strong_count(&clock))
  });

  let uptime = container.make_as::<usize>("Uptime", ParameterBag::new()).unwrap();

  assert_eq!(*uptime, 1);
  assert!(container.has("SeenClock"));
}

#[test]
fn test_make_as_reports_wrong_requested_type() {
  let container = Container::new();
  container.bind("Port", |_| Ok(8080_u16));

  let err = container.make_as::<String>("Port", ParameterBag::new()).unwrap_err();

  match err {
    Error::ArgumentType {
      parameter,
      expected,
      found,
    } => {
      assert_eq!(parameter, "Port");
      assert_eq!(expected, std::any::type_name::<String>());
      assert_eq!(found, std::any::type_name::<u16>());
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_factory_errors_propagate_unchanged() {
  let container = Container::new();
  container.bind("Config", |_| -> fibre_autowire::Result<String> {
    Err(Error::factory("Config", "file not found"))
  });
  container.register(TypeDescriptor::concrete(
    "App",
    vec![Dependency::named("config", "Config")],
    |_| Ok(()),
  ));

  let err = container.make("App", ParameterBag::new()).unwrap_err();

  assert_eq!(
    err.to_string(),
    "construction of 'Config' failed: file not found"
  );
}
