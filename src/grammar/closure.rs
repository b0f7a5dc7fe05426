//! Least fixed points of monotone steps over sets of nonterminals.
//!
//! Every set-valued analysis of a grammar (productive, reachable and
//! nullable nonterminals) is the least fixed point of some step function
//! that only ever grows its input set. `closure` applies such a step until
//! a pass adds nothing. Since the set is drawn from the finite set of
//! nonterminals the grammar mentions, this takes at most one growing pass
//! per nonterminal.

use crate::grammar::{Grammar, NonTermSet};
use crate::utils::OrdKey;

/// A single pass of a set-growing analysis.
///
/// Implementations must be monotone: the returned set must contain every
/// element of `current`. This is not verified.
pub trait ClosureStep<T, NT> {
  fn step(
    &self,
    current: NonTermSet<NT>,
    grammar: &Grammar<T, NT>,
  ) -> NonTermSet<NT>;
}

impl<T, NT, F> ClosureStep<T, NT> for F
where
  F: Fn(NonTermSet<NT>, &Grammar<T, NT>) -> NonTermSet<NT>,
{
  fn step(
    &self,
    current: NonTermSet<NT>,
    grammar: &Grammar<T, NT>,
  ) -> NonTermSet<NT> {
    self(current, grammar)
  }
}

/// Counters describing how a closure converged.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ClosureStats {
  /// The number of times the step was applied, including the final pass
  /// that added nothing.
  pub passes: usize,
  /// The number of passes that grew the set.
  pub growing_passes: usize,
}

/// Computes the least fixed point of `step` above `initial`.
pub fn closure<T, NT, S>(
  step: &S,
  initial: NonTermSet<NT>,
  grammar: &Grammar<T, NT>,
) -> NonTermSet<NT>
where
  T: OrdKey,
  NT: OrdKey,
  S: ClosureStep<T, NT> + ?Sized,
{
  closure_with_stats(step, initial, grammar).0
}

/// Computes the least fixed point of `step` above `initial`, and reports
/// the number of passes it took.
pub fn closure_with_stats<T, NT, S>(
  step: &S,
  initial: NonTermSet<NT>,
  grammar: &Grammar<T, NT>,
) -> (NonTermSet<NT>, ClosureStats)
where
  T: OrdKey,
  NT: OrdKey,
  S: ClosureStep<T, NT> + ?Sized,
{
  let universe = grammar.all_nonterms().union(initial.clone()).len();
  let mut stats = ClosureStats::default();
  let mut curr = initial;

  loop {
    let size = curr.len();
    curr = step.step(curr, grammar);
    stats.passes += 1;
    log::trace!(
      "Closure pass {}: {} -> {} nonterminals.",
      stats.passes,
      size,
      curr.len()
    );

    if curr.len() <= size {
      break;
    }

    stats.growing_passes += 1;
    debug_assert!(
      stats.growing_passes <= universe,
      "closure step grew past the {} nonterminals of the grammar",
      universe
    );
  }

  log::debug!(
    "Closure converged to {} nonterminals after {} passes.",
    curr.len(),
    stats.passes
  );
  (curr, stats)
}
