//! Core, non-public bookkeeping for nested resolutions.

use crate::error::{Error, Result};
use std::cell::RefCell;

thread_local! {
  // The resolutions in progress on this thread, outermost first, tagged with
  // the address of the container performing them.
  static RESOLVING_STACK: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard bounding how deeply one container's resolutions may nest.
///
/// Entering pushes the identifier on the thread-local stack and fails once
/// `owner` already has `limit` entries on it. Frames of other containers,
/// e.g. one calling into `owner` from a factory, do not count. Dropping the
/// guard pops it again, including when a resolution unwinds.
pub(crate) struct ResolutionGuard {
  _private: (),
}

impl ResolutionGuard {
  pub(crate) fn enter(owner: usize, identifier: &str, limit: usize) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let depth = stack.iter().filter(|(id, _)| *id == owner).count();
      if depth >= limit {
        let path = stack
          .iter()
          .filter(|(id, _)| *id == owner)
          .map(|(_, identifier)| identifier.as_str())
          .collect::<Vec<_>>()
          .join(" -> ");
        tracing::debug!(identifier, limit, path = %path, "resolution depth exceeded");
        return Err(Error::DepthExceeded {
          identifier: identifier.to_owned(),
          limit,
        });
      }
      stack.push((owner, identifier.to_owned()));
      Ok(Self { _private: () })
    })
  }

  #[cfg(test)]
  pub(crate) fn depth() -> usize {
    RESOLVING_STACK.with(|stack| stack.borrow().len())
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().pop();
    });
  }
}
