// Copyright 2018 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Grammar transforms that remove useless nonterminals.
//!
//! `filter` projects a grammar onto a set of nonterminals. Rules whose head
//! is outside the set are dropped, along with every production that
//! references a nonterminal outside the set.
//!
//! Example: For the grammar:
//!
//! ```text
//! S => <S> <S> | ε | <A> <B> | a
//! A => a <A>
//! B => b
//! ```
//!
//! Filtering with `{S}` gives:
//!
//! ```text
//! S => <S> <S> | ε | a
//! ```
//!
//! `reduce` removes unproductive nonterminals, then unreachable ones. The
//! result derives the same strings as the input, and every nonterminal left
//! in it is both productive and reachable.

use crate::{
  grammar::{
    passes::{productive, reachable},
    Grammar, NonTermSet,
  },
  utils::OrdKey,
};

/// Returns the grammar `g` restricted to the nonterminals in `keep`.
///
/// The start nonterminal is kept as is, even if it is not in `keep`.
/// Production order within each kept rule is preserved.
pub fn filter<T, NT>(
  keep: &NonTermSet<NT>,
  g: &Grammar<T, NT>,
) -> Grammar<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  let filtered =
    g.retain(|nt| keep.contains(nt), |prod| prod.refs_within(keep));

  log::debug!(
    "Filtered grammar from {} to {} rules, {} to {} productions.",
    g.num_rules(),
    filtered.num_rules(),
    g.num_prods(),
    filtered.num_prods()
  );
  filtered
}

/// Removes every unproductive or unreachable nonterminal from `g`.
///
/// Productivity is applied first: removing an unproductive production can
/// make further nonterminals unreachable, but removing unreachable rules never
/// changes what is productive.
pub fn reduce<T, NT>(g: &Grammar<T, NT>) -> Grammar<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  let productive_only = filter(&productive(g), g);
  filter(&reachable(&productive_only), &productive_only)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{
    examples, passes::nullable, BaseGrammar, Elem, Named, NonTerminal, Prod,
    Terminal,
  };

  fn nts(names: &[&str]) -> NonTermSet<NonTerminal> {
    names.iter().map(|n| NonTerminal::new(n)).collect()
  }

  fn heads(g: &BaseGrammar) -> Vec<&str> {
    g.nonterminals().map(|nt| nt.name().str()).collect()
  }

  #[test]
  fn test_filter_drops_excluded_rules() {
    let g = examples::make_unreachable();
    let filtered = filter(&nts(&["A", "C"]), &g);

    assert_eq!(heads(&filtered), vec!["A", "C"]);
    assert_eq!(filtered.start_nt(), g.start_nt());

    let a = NonTerminal::new("A");
    assert!(filtered.prods_of(&a).eq(g.prods_of(&a)));

    // C => <B> references a dropped nonterminal.
    let c_prods = filtered
      .prods_of(&NonTerminal::new("C"))
      .cloned()
      .collect::<Vec<_>>();
    assert_eq!(c_prods, vec![Prod::new(vec![Elem::Term(Terminal::new("R"))])]);
  }

  #[test]
  fn test_filter_productive_and_reachable() {
    let g = examples::make_epsilon_loop();
    let keep = productive(&g).intersection(reachable(&g));
    assert_eq!(keep, nts(&["S", "B"]));

    let filtered = filter(&keep, &g);
    assert_eq!(heads(&filtered), vec!["B", "S"]);

    // <A> <B> references A, which is unproductive.
    let s = NonTerminal::new("S");
    let expected = g
      .prods_of(&s)
      .filter(|prod| prod.refs_within(&keep))
      .cloned()
      .collect::<Vec<_>>();
    assert_eq!(expected.len(), 3);
    assert_eq!(filtered.prods_of(&s).cloned().collect::<Vec<_>>(), expected);

    let b = NonTerminal::new("B");
    assert!(filtered.prods_of(&b).eq(g.prods_of(&b)));
    assert_eq!(nullable(&filtered), nts(&["S"]));

    // B is only reachable through <A> <B>, so reduce drops it as well.
    let reduced = reduce(&g);
    assert_eq!(heads(&reduced), vec!["S"]);
    assert_eq!(reduced.prods_of(&s).cloned().collect::<Vec<_>>(), expected);
  }

  #[test]
  fn test_filter_keeps_unlisted_start() {
    let g = examples::make_expr();
    let filtered = filter(&NonTermSet::new(), &g);

    assert_eq!(filtered.start_nt(), &NonTerminal::new("E"));
    assert_eq!(filtered.num_rules(), 0);
  }

  #[test]
  fn test_filter_is_idempotent() {
    for g in examples::all() {
      for keep in vec![productive(&g), reachable(&g), g.all_nonterms()] {
        let once = filter(&keep, &g);
        assert_eq!(filter(&keep, &once), once);
      }
    }
  }

  #[test]
  fn test_reduce_removes_hidden_unreachable() {
    let g = examples::make_hidden_unreachable();

    // D is productive and reachable, but only through <D> <U>, which can
    // never finish.
    let naive = filter(&productive(&g).intersection(reachable(&g)), &g);
    assert_eq!(heads(&naive), vec!["D", "S"]);

    let reduced = reduce(&g);
    assert_eq!(heads(&reduced), vec!["S"]);
    assert_eq!(reduced.num_prods(), 1);
  }

  #[test]
  fn test_reduce_unproductive_start() {
    let g = examples::make_unproductive_start();
    let reduced = reduce(&g);

    assert_eq!(reduced.start_nt(), &NonTerminal::new("S"));
    assert_eq!(reduced.num_rules(), 0);
  }

  #[test]
  fn test_reduce_is_fixpoint() {
    for g in examples::all() {
      let reduced = reduce(&g);
      assert_eq!(reduce(&reduced), reduced);
      for nt in reduced.nonterminals() {
        assert!(productive(&reduced).contains(nt));
        assert!(reachable(&reduced).contains(nt));
      }
    }
  }
}
