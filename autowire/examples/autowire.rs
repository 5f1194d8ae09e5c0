use fibre_autowire::{params, Arguments, Container, Dependency, Injectable, Method, Result};
use std::sync::Arc;

// A type that cannot be autowired: its parameters are plain strings.
struct Credentials {
  user: String,
  password: String,
}

// A type whose only dependency is another described type.
struct Session {
  credentials: Arc<Credentials>,
}

impl Injectable for Session {
  fn identifier() -> &'static str {
    "Session"
  }

  fn dependencies() -> Vec<Dependency> {
    vec![Dependency::named("credentials", "Credentials")]
  }

  fn construct(args: &Arguments) -> Result<Self> {
    Ok(Session {
      credentials: args.get(0)?,
    })
  }

  fn methods() -> Vec<(&'static str, Method)> {
    vec![(
      "login",
      Method::new(
        vec![Dependency::named("retries", "u32").with_default(3_u32)],
        |session: &Session, args: &Arguments| {
          let retries = args.get::<u32>(0)?;
          Ok(format!(
            "{} logged in (password of {} chars, {} retries)",
            session.credentials.user,
            session.credentials.password.len(),
            retries
          ))
        },
      ),
    )]
  }
}

fn main() {
  let container = Container::new();

  // Bind the type that needs hand-picked values to a factory.
  container.bind("Credentials", |_| {
    Ok(Credentials {
      user: "admin".to_string(),
      password: "hunter2".to_string(),
    })
  });
  container.register_type::<Session>();

  // Session is built by resolving its `credentials` parameter from the binding.
  let session = container
    .make_as::<Session>("Session", params!())
    .expect("Session should be resolvable");
  println!("Session for {}", session.credentials.user);

  // Methods are dispatched with `Type@method`; overrides go to the method.
  let first = container.callable_as::<String>("Session@login", params!()).unwrap();
  let second = container
    .callable_as::<String>("Session@login", params! { "retries" => 5_u32 })
    .unwrap();

  println!("{}", first);
  println!("{}", second);
  assert!(second.ends_with("5 retries)"));
}
