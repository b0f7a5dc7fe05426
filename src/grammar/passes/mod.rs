//! A pass is a type of query over the grammar that may be depended on by other passes.
//! This allows us to build each different type of pass in isolation, and then combine them
//! with automatic dependency resolution.
//!
//! The set-valued passes (`Productive`, `Reachable` and `Nullable`) are also
//! available as plain functions, which do not cache anything.

pub mod firsts;
pub mod follows;
pub mod nullable;
pub mod productive;
pub mod reachable;

use std::{
  any::{Any, TypeId},
  cell::RefCell,
  collections::BTreeMap,
  rc::Rc,
};

use super::Grammar;

pub use firsts::{first_of_word, FirstSet, Firsts};
pub use follows::{Follows, StreamTerminal};
pub use nullable::{is_word_nullable, nullable, Nullable};
pub use productive::{productive, Productive};
pub use reachable::{reachable, Reachable};

/// A unique placeholder type to represent the value of a pass that hasn't completed.
///
/// This helps us avoid accidental infinite recursion in the case where a pass depends on itself (directly or indirectly).
struct NoCurrentValue;

/// A query over a grammar whose result can be cached in a `PassContext`.
pub trait Pass<T, NT>: 'static {
  type Value: 'static;

  fn run_pass(pass_map: &PassContext<T, NT>) -> Self::Value;
}

/// A map from passes to their associated results.
pub struct PassContext<'a, T, NT> {
  grammar: &'a Grammar<T, NT>,
  passes: RefCell<BTreeMap<TypeId, Rc<dyn Any + 'static>>>,
}

impl<'a, T, NT> PassContext<'a, T, NT> {
  // Create a new pass map, where passes derive from the given grammar and other passes.
  pub fn new(grammar: &'a Grammar<T, NT>) -> Self {
    PassContext {
      grammar,
      passes: RefCell::new(BTreeMap::new()),
    }
  }

  /// Returns the underlying grammar.
  pub fn grammar(&self) -> &'a Grammar<T, NT> {
    self.grammar
  }

  /// Returns the result of the given pass. Computes it if it hasn't been computed yet. Passes can
  /// depend on other passes.
  ///
  /// Panics if a pass depends on itself, directly or indirectly.
  pub fn get_pass<P>(&self) -> Rc<P::Value>
  where
    P: Pass<T, NT>,
  {
    let pass_type = TypeId::of::<P>();

    let contains_key = {
      let guard = self.passes.borrow();
      match guard.get(&pass_type) {
        // Check if we already have the result.
        Some(pass) => {
          if pass.is::<NoCurrentValue>() {
            panic!("Detected recursive loop in pass dependencies.")
          } else {
            true
          }
        }
        None => false,
      }
    };

    if !contains_key {
      {
        // Insert a NoCurrentValue as the current value to mark it as in process. This
        // helps us avoid infinite recursion.
        let mut guard = self.passes.borrow_mut();
        guard.insert(pass_type, Rc::new(NoCurrentValue));
      }
      let value = P::run_pass(self);
      let mut guard = self.passes.borrow_mut();
      guard.insert(pass_type, Rc::new(value));
    };

    let any_pass_ref = {
      let guard = self.passes.borrow();
      guard
        .get(&pass_type)
        .expect("existence already checked")
        .clone()
    };

    any_pass_ref
      .downcast::<P::Value>()
      .ok()
      .expect("type already verified")
  }
}
