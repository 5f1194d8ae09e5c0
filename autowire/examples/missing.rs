use fibre_autowire::{
  global, resolve, Arguments, Dependency, Error, Injectable, ParameterBag, Result,
};
use std::panic;

// Depends on a capability nobody bound.
struct Notifier;

impl Injectable for Notifier {
  fn dependencies() -> Vec<Dependency> {
    vec![Dependency::named("transport", "Transport")]
  }

  fn construct(_: &Arguments) -> Result<Self> {
    Ok(Notifier)
  }
}

fn main() {
  global().register_type::<Notifier>();

  // --- Using the fallible API ---
  match global().make(Notifier::identifier(), ParameterBag::new()) {
    Err(Error::NotResolvable(identifier)) => {
      println!("Correctly failed: '{}' is unknown.", identifier)
    }
    Err(other) => panic!("Unexpected error: {}", other),
    Ok(_) => panic!("Should not have resolved the notifier!"),
  }

  // --- Using the panicking `resolve!` macro ---
  let result = panic::catch_unwind(|| {
    let _notifier = resolve!(Notifier);
  });
  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // Once the capability is bound, the same call succeeds.
  global().bind("Transport", |_| Ok("smtp"));
  let _notifier = resolve!(Notifier);
  println!("Resolved the notifier after binding a transport.");
}
