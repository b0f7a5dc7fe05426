use crate::grammar::{closure, ClosureStep, Grammar, NonTermSet};
use crate::utils::OrdKey;

use super::{Pass, PassContext};

/// The nonterminals that appear in some derivation from the start
/// nonterminal.
///
/// The start nonterminal is always reachable, even without a rule. A
/// referenced nonterminal is reachable whether or not it has a rule.
pub struct Reachable;

impl<T, NT> ClosureStep<T, NT> for Reachable
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
      if !current.contains(rule.head()) {
        continue;
      }

      for nt in rule.prods().flat_map(|prod| prod.nonterms()) {
        current.insert(nt.clone());
      }
    }

    current
  }
}

impl<T, NT> Pass<T, NT> for Reachable
where
  T: OrdKey,
  NT: OrdKey,
{
  type Value = NonTermSet<NT>;

  fn run_pass(pass_map: &PassContext<T, NT>) -> NonTermSet<NT> {
    reachable(pass_map.grammar())
  }
}

/// Returns the nonterminals reachable from the start nonterminal of
/// `grammar`.
pub fn reachable<T, NT>(grammar: &Grammar<T, NT>) -> NonTermSet<NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  closure(&Reachable, NonTermSet::unit(grammar.start_nt().clone()), grammar)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{build, examples, BaseGrammar, NonTerminal};

  fn nts(names: &[&str]) -> NonTermSet<NonTerminal> {
    names.iter().map(|n| NonTerminal::new(n)).collect()
  }

  #[test]
  fn test_start_without_references() {
    let g = examples::make_unreachable();
    assert_eq!(reachable(&g), nts(&["A"]));
  }

  #[test]
  fn test_references_are_followed() {
    let g = examples::make_epsilon_loop();
    assert_eq!(reachable(&g), nts(&["S", "A", "B"]));

    let g = examples::make_paren();
    assert_eq!(
      reachable(&g),
      nts(&["start", "expr", "expr_list", "expr_tail"])
    );
  }

  #[test]
  fn test_start_without_rule() {
    assert_eq!(reachable(&examples::make_empty()), nts(&["X"]));
  }

  #[test]
  fn test_dangling_reference_is_reachable() {
    let g: BaseGrammar = build("S", |gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_nonterm("Missing");
        });
      });
    });
    assert_eq!(reachable(&g), nts(&["S", "Missing"]));
  }

  #[test]
  fn test_step_at_fixpoint() {
    for g in examples::all() {
      let fixpoint = reachable(&g);
      assert_eq!(Reachable.step(fixpoint.clone(), &g), fixpoint);
    }
  }
}
