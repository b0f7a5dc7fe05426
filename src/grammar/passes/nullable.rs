use crate::grammar::{closure, ClosureStep, Elem, Grammar, NonTermSet};
use crate::utils::OrdKey;

use super::{Pass, PassContext};

/// The nonterminals that derive the empty string.
///
/// Unlike productivity, a terminal anywhere in a production rules that
/// production out.
pub struct Nullable;

impl<T, NT> ClosureStep<T, NT> for Nullable
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

      if rule
        .prods()
        .any(|prod| is_word_nullable(prod.elements(), &current))
      {
        current.insert(rule.head().clone());
      }
    }

    current
  }
}

impl<T, NT> Pass<T, NT> for Nullable
where
  T: OrdKey,
  NT: OrdKey,
{
  type Value = NonTermSet<NT>;

  fn run_pass(pass_map: &PassContext<T, NT>) -> NonTermSet<NT> {
    nullable(pass_map.grammar())
  }
}

/// Returns the nullable nonterminals of `grammar`.
pub fn nullable<T, NT>(grammar: &Grammar<T, NT>) -> NonTermSet<NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  closure(&Nullable, NonTermSet::new(), grammar)
}

/// Returns true if every element of `word` is a nullable nonterminal.
pub fn is_word_nullable<'a, T, NT>(
  word: impl IntoIterator<Item = &'a Elem<T, NT>>,
  nullables: &NonTermSet<NT>,
) -> bool
where
  T: 'a,
  NT: OrdKey,
{
  word.into_iter().all(|elem| match elem {
    Elem::Term(_) => false,
    Elem::NonTerm(nt) => nullables.contains(nt),
  })
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{examples, NonTerminal};

  fn nts(names: &[&str]) -> NonTermSet<NonTerminal> {
    names.iter().map(|n| NonTerminal::new(n)).collect()
  }

  #[test]
  fn test_no_nullable_alternatives() {
    assert!(nullable(&examples::make_unreachable()).is_empty());
    assert!(nullable(&examples::make_repetitions()).is_empty());
  }

  #[test]
  fn test_terminal_disqualifies() {
    let g = examples::make_epsilon_loop();
    assert_eq!(nullable(&g), nts(&["S"]));
  }

  #[test]
  fn test_simple_nullable_grammar() {
    let g = examples::make_simple_nullable();
    assert_eq!(nullable(&g), nts(&["start", "a", "b", "c"]));
  }

  #[test]
  fn test_paren_grammar() {
    let g = examples::make_paren();
    assert_eq!(nullable(&g), nts(&["expr_list", "expr_tail"]));
  }

  #[test]
  fn test_no_rules() {
    assert!(nullable(&examples::make_empty()).is_empty());
  }

  #[test]
  fn test_word_nullable() {
    let g = examples::make_paren();
    let nullables = nullable(&g);
    let prods = g.prods_of(&NonTerminal::new("expr_list")).collect::<Vec<_>>();

    assert!(!is_word_nullable(prods[0].elements(), &nullables));
    assert!(is_word_nullable(prods[0].elements().skip(1), &nullables));
    assert!(is_word_nullable(prods[1].elements(), &nullables));
  }

  #[test]
  fn test_step_at_fixpoint() {
    for g in examples::all() {
      let fixpoint = nullable(&g);
      assert_eq!(Nullable.step(fixpoint.clone(), &g), fixpoint);
    }
  }
}
