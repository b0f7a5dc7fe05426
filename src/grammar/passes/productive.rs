use crate::grammar::{closure, ClosureStep, Grammar, NonTermSet};
use crate::utils::OrdKey;

use super::{Pass, PassContext};

/// The nonterminals that derive at least one finite string of terminals.
///
/// A production is productive once every nonterminal in it is. Terminals
/// are always acceptable, so an empty production makes its head productive
/// right away.
pub struct Productive;

impl<T, NT> ClosureStep<T, NT> for Productive
where
  T: OrdKey,
  NT: OrdKey,
{
  fn step(
    &self,
    mut current: NonTermSet<NT>,
    grammar: &Grammar<T, NT>,
  ) -> NonTermSet<NT> {
    for rule in grammar.rules() {
      if current.contains(rule.head()) {
        continue;
      }

      if rule.prods().any(|prod| prod.refs_within(&current)) {
        current.insert(rule.head().clone());
      }
    }

    current
  }
}

impl<T, NT> Pass<T, NT> for Productive
where
  T: OrdKey,
  NT: OrdKey,
{
  type Value = NonTermSet<NT>;

  fn run_pass(pass_map: &PassContext<T, NT>) -> NonTermSet<NT> {
    productive(pass_map.grammar())
  }
}

/// Returns the productive nonterminals of `grammar`.
pub fn productive<T, NT>(grammar: &Grammar<T, NT>) -> NonTermSet<NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  closure(&Productive, NonTermSet::new(), grammar)
}
