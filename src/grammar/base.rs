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

pub mod builder;
mod element_types;

use {
  crate::utils::{Name, OrdKey, ToDoc},
  im::{OrdMap, OrdSet},
  std::collections::{BTreeMap, BTreeSet},
};

use std::fmt::Debug;

pub use element_types::{Named, NonTerminal, Terminal};

/// A set of nonterminals, as produced by the grammar analyses.
pub type NonTermSet<NT> = OrdSet<NT>;

/// A grammar over the stock element types.
pub type BaseGrammar = Grammar<Terminal, NonTerminal>;

/// A single element (terminal or non-terminal).
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Elem<T, NT> {
  Term(T),
  NonTerm(NT),
}

impl<T, NT> Elem<T, NT> {
  /// If this element is a terminal, returns a `Some` value containing a
  /// terminal datum. Returns `None` otherwise.
  pub fn as_term(&self) -> Option<&T> {
    match self {
      Elem::NonTerm(_) => None,
      Elem::Term(t) => Some(t),
    }
  }

  /// Gets an element as a nonterm. Returns a `None` value otherwise.
  pub fn as_nonterm(&self) -> Option<&NT> {
    match self {
      Elem::NonTerm(nt) => Some(nt),
      Elem::Term(_) => None,
    }
  }

  pub fn is_term(&self) -> bool {
    matches!(self, Elem::Term(_))
  }

  pub fn is_nonterm(&self) -> bool {
    matches!(self, Elem::NonTerm(_))
  }
}

impl<T, NT> Elem<T, NT>
where
  T: Named,
  NT: Named,
{
  /// Returns the name of this element, whichever kind it is.
  pub fn name(&self) -> &Name {
    match self {
      Elem::Term(t) => t.name(),
      Elem::NonTerm(nt) => nt.name(),
    }
  }
}

impl<T, NT> ToDoc for Elem<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    match self {
      Elem::NonTerm(nt) => {
        da.text("<").append(nt.to_doc(da)).append(da.text(">"))
      }
      Elem::Term(t) => t.to_doc(da),
    }
  }
}

impl<T, NT> std::fmt::Debug for Elem<T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Elem::Term(term) => fmt.write_str(&format!("{:?}", term)),
      Elem::NonTerm(nt) => fmt.write_str(&format!("<{:?}>", nt)),
    }
  }
}

/// A single alternative of a rule: an ordered, possibly empty, sequence of
/// elements.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prod<T, NT> {
  elements: Vec<Elem<T, NT>>,
}

impl<T, NT> Prod<T, NT> {
  pub fn new(elements: Vec<Elem<T, NT>>) -> Self {
    Prod { elements }
  }

  /// Returns the empty (epsilon) production.
  pub fn epsilon() -> Self {
    Prod {
      elements: Vec::new(),
    }
  }

  /// Returns an iterator over the elements of this production.
  pub fn elements(&self) -> impl Iterator<Item = &Elem<T, NT>> + Clone {
    self.elements.iter()
  }

  /// Returns the number of elements in this production.
  pub fn len(&self) -> usize {
    self.elements.len()
  }

  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  /// Returns the nonterminals of this production, in order.
  pub fn nonterms(&self) -> impl Iterator<Item = &NT> + Clone {
    self.elements.iter().filter_map(|e| e.as_nonterm())
  }
}

impl<T, NT> Prod<T, NT>
where
  NT: OrdKey,
{
  /// Returns true if every nonterminal this production references is in
  /// `set`. Terminals place no constraint, and an empty production is
  /// trivially within any set.
  pub fn refs_within(&self, set: &NonTermSet<NT>) -> bool {
    self.nonterms().all(|nt| set.contains(nt))
  }
}

impl<T, NT> std::iter::FromIterator<Elem<T, NT>> for Prod<T, NT> {
  fn from_iter<I: IntoIterator<Item = Elem<T, NT>>>(iter: I) -> Self {
    Prod::new(iter.into_iter().collect())
  }
}

impl<T, NT> ToDoc for Prod<T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    if self.elements.is_empty() {
      da.text("ε")
    } else {
      da.intersperse(self.elements.iter().map(|e| e.to_doc(da)), da.softline())
    }
  }
}

impl<T, NT> std::fmt::Debug for Prod<T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    fmt.debug_list().entries(self.elements.iter()).finish()
  }
}

/// A concrete raw rule value as stored inside a Grammar struct.
#[derive(Clone, PartialEq, Eq, Debug)]
struct RuleInner<T, NT> {
  head: NT,
  prods: Vec<Prod<T, NT>>,
}

// ------------

/// A rule within a grammar.
///
/// A rule consists of a head nonterminal, and zero or more alternative
/// productions. This is a borrowed view into the grammar that owns it.
#[derive(Derivative)]
#[derivative(Copy(bound = ""), Clone(bound = ""))]
pub struct Rule<'a, T, NT> {
  rule: &'a RuleInner<T, NT>,
}

impl<'a, T, NT> Rule<'a, T, NT> {
  fn new(rule: &'a RuleInner<T, NT>) -> Self {
    Rule { rule }
  }

  /// Returns the head nonterminal.
  pub fn head(&self) -> &'a NT {
    &self.rule.head
  }

  /// Returns an iterator over the productions of this rule.
  pub fn prods(&self) -> std::slice::Iter<'a, Prod<T, NT>> {
    self.rule.prods.iter()
  }

  pub fn num_prods(&self) -> usize {
    self.rule.prods.len()
  }
}

impl<'a, T, NT> ToDoc for Rule<'a, T, NT>
where
  T: ToDoc,
  NT: ToDoc,
{
  fn to_doc<'b, DA: pretty::DocAllocator<'b>>(
    &self,
    da: &'b DA,
  ) -> pretty::DocBuilder<'b, DA>
  where
    DA::Doc: Clone,
  {
    self
      .head()
      .to_doc(da)
      .append(da.text(" =>"))
      .append(da.softline())
      .append(da.intersperse(
        self.prods().map(|prod| prod.to_doc(da)),
        da.text(" |").append(da.softline()),
      ))
  }
}

impl<'a, T, NT> std::fmt::Debug for Rule<'a, T, NT>
where
  T: Debug,
  NT: Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = fmt.debug_struct("Rule");
    dbg_struct.field("head", self.head());
    dbg_struct.field("prods", &self.rule.prods);
    dbg_struct.finish()
  }
}

// ------------

/// A context-free language grammar.
///
/// This is a context-free grammar consisting of
///
/// - A start nonterminal
/// - A map from head nonterminals to their alternatives, where each
///   alternative is a (possibly empty) list of elements, each either a
///   terminal or a nonterminal.
///
/// Grammars are read-only values. They are not validated on construction:
/// a nonterminal may be referenced without having a rule, and the start
/// nonterminal may have no rule. The analyses treat such nonterminals as
/// having no alternatives. Use `check` to reject them explicitly.
///
/// The rule map is a persistent map, so clones and filtered copies of a
/// grammar share structure with the original.
#[derive(Derivative)]
#[derivative(
  Clone(bound = "T: OrdKey, NT: OrdKey"),
  PartialEq(bound = "T: OrdKey, NT: OrdKey"),
  Eq(bound = "T: OrdKey, NT: OrdKey")
)]
pub struct Grammar<T, NT> {
  start_symbol: NT,
  rule_set: OrdMap<NT, RuleInner<T, NT>>,
}

impl<T, NT> std::fmt::Debug for Grammar<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = f.debug_struct("Grammar");
    dbg_struct.field("Start", &self.start_symbol);
    dbg_struct.field("Rules", &self.rules().collect::<Vec<_>>());
    dbg_struct.finish()
  }
}

impl<T, NT> Grammar<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  /// Creates a grammar from a start nonterminal and a list of rules.
  ///
  /// Rules that share a head are merged, keeping the order in which their
  /// alternatives were given.
  pub fn new(
    start: NT,
    rule_set: impl IntoIterator<Item = (NT, Vec<Prod<T, NT>>)>,
  ) -> Self {
    let mut merged: BTreeMap<NT, Vec<Prod<T, NT>>> = BTreeMap::new();
    for (head, prods) in rule_set {
      merged.entry(head).or_insert_with(Vec::new).extend(prods);
    }

    Grammar {
      start_symbol: start,
      rule_set: merged
        .into_iter()
        .map(|(head, prods)| (head.clone(), RuleInner { head, prods }))
        .collect(),
    }
  }

  /// Returns the start nonterminal for this grammar.
  pub fn start_nt(&self) -> &NT {
    &self.start_symbol
  }

  /// Returns an iterator over all of the rules for this grammar, ordered by
  /// head.
  pub fn rules(&self) -> impl Iterator<Item = Rule<'_, T, NT>> {
    self.rule_set.values().map(Rule::new)
  }

  /// Gets the rule that has the given nonterminal as a head.
  pub fn get_rule(&self, nt: &NT) -> Option<Rule<'_, T, NT>> {
    self.rule_set.get(nt).map(Rule::new)
  }

  /// Returns the alternatives of the given nonterminal. A nonterminal
  /// without a rule has no alternatives.
  pub fn prods_of(&self, nt: &NT) -> impl Iterator<Item = &Prod<T, NT>> {
    self.rule_set.get(nt).into_iter().flat_map(|rule| rule.prods.iter())
  }

  /// Gets an iterator over all productions in the grammar, with their heads.
  pub fn prods(&self) -> impl Iterator<Item = (&NT, &Prod<T, NT>)> {
    self.rule_set.values().flat_map(|rule| {
      let head = &rule.head;
      rule.prods.iter().map(move |prod| (head, prod))
    })
  }

  /// Returns the nonterminals that have a rule in this grammar.
  pub fn nonterminals(&self) -> impl Iterator<Item = &NT> {
    self.rule_set.keys()
  }

  pub fn contains_rule(&self, nt: &NT) -> bool {
    self.rule_set.contains_key(nt)
  }

  pub fn num_rules(&self) -> usize {
    self.rule_set.len()
  }

  pub fn num_prods(&self) -> usize {
    self.rule_set.values().map(|rule| rule.prods.len()).sum()
  }

  /// Returns every nonterminal referenced from within some production.
  pub fn referenced_nonterms(&self) -> NonTermSet<NT> {
    self
      .prods()
      .flat_map(|(_, prod)| prod.nonterms())
      .cloned()
      .collect()
  }

  /// Returns every nonterminal this grammar mentions: rule heads,
  /// referenced nonterminals, and the start nonterminal.
  pub fn all_nonterms(&self) -> NonTermSet<NT> {
    let mut all = self.referenced_nonterms();
    for nt in self.nonterminals() {
      all.insert(nt.clone());
    }
    all.insert(self.start_symbol.clone());
    all
  }

  /// Checks that the start nonterminal and every referenced nonterminal
  /// have a rule.
  pub fn check(&self) -> Result<(), GrammarErrors<NT>> {
    GrammarErrors {
      missing_start: if self.contains_rule(&self.start_symbol) {
        None
      } else {
        Some(self.start_symbol.clone())
      },
      nonterms_without_rules: self
        .referenced_nonterms()
        .into_iter()
        .filter(|nt| !self.contains_rule(nt))
        .collect(),
    }
    .into_result()
  }

  /// Returns a grammar with the same start nonterminal that keeps only the
  /// rules whose heads satisfy `keep_rule`, and within those only the
  /// productions that satisfy `keep_prod`. Production order is preserved.
  pub(crate) fn retain(
    &self,
    keep_rule: impl Fn(&NT) -> bool,
    keep_prod: impl Fn(&Prod<T, NT>) -> bool,
  ) -> Self {
    Grammar {
      start_symbol: self.start_symbol.clone(),
      rule_set: self
        .rule_set
        .iter()
        .filter(|(head, _)| keep_rule(*head))
        .map(|(head, rule)| {
          let prods =
            rule.prods.iter().filter(|p| keep_prod(*p)).cloned().collect();
          (
            head.clone(),
            RuleInner {
              head: head.clone(),
              prods,
            },
          )
        })
        .collect(),
    }
  }
}

impl<T, NT> Grammar<T, NT>
where
  T: OrdKey + ToDoc,
  NT: OrdKey + ToDoc,
{
  pub fn to_pretty(&self) -> String {
    self.to_pretty_width(80)
  }

  pub fn to_pretty_width(&self, width: usize) -> String {
    let arena = pretty::Arena::new();
    format!("{}", self.to_doc(&arena).into_doc().pretty(width))
  }
}

impl<T, NT> ToDoc for Grammar<T, NT>
where
  T: OrdKey + ToDoc,
  NT: OrdKey + ToDoc,
{
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    let start_entry = da
      .text("Start =")
      .group()
      .append(da.softline())
      .append(self.start_nt().to_doc(da));
    let rules_entry = da.text("Rules ").append(
      da.softline()
        .append(
          da.concat(self.rules().map(|rule| {
            rule.to_doc(da).append(da.text(";")).append(da.softline())
          }))
          .nest(2),
        )
        .braces(),
    );

    da.intersperse(
      vec![start_entry, rules_entry],
      da.text(",").append(da.softline()),
    )
  }
}

/// The problems found by `Grammar::check`.
#[derive(Clone, Debug, thiserror::Error)]
#[error(
  "malformed grammar (start without rule: {missing_start:?}, \
   nonterminals without rules: {nonterms_without_rules:?})"
)]
pub struct GrammarErrors<NT: Debug> {
  missing_start: Option<NT>,
  nonterms_without_rules: BTreeSet<NT>,
}

impl<NT: Debug> GrammarErrors<NT> {
  fn into_result(self) -> Result<(), Self> {
    if self.missing_start.is_none() && self.nonterms_without_rules.is_empty()
    {
      Ok(())
    } else {
      Err(self)
    }
  }

  /// The start nonterminal, if it has no rule.
  pub fn missing_start(&self) -> Option<&NT> {
    self.missing_start.as_ref()
  }

  /// Nonterminals referenced in a production that have no rule.
  pub fn nonterms_without_rules(&self) -> &BTreeSet<NT> {
    &self.nonterms_without_rules
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples;

  fn nt(s: &str) -> NonTerminal {
    NonTerminal::new(s)
  }

  fn t(s: &str) -> Terminal {
    Terminal::new(s)
  }

  #[test]
  fn test_elem_accessors() {
    let term: Elem<Terminal, NonTerminal> = Elem::Term(t("a"));
    let nonterm: Elem<Terminal, NonTerminal> = Elem::NonTerm(nt("A"));

    assert!(term.is_term());
    assert!(!term.is_nonterm());
    assert!(nonterm.is_nonterm());
    assert_eq!(term.name().str(), "a");
    assert_eq!(nonterm.name().str(), "A");
    assert_eq!(term.as_term(), Some(&t("a")));
    assert_eq!(nonterm.as_term(), None);
    assert_eq!(nonterm.as_nonterm(), Some(&nt("A")));

    // Same name, different kind.
    assert_ne!(Elem::<_, NonTerminal>::Term(t("x")), Elem::NonTerm(nt("x")));
  }

  #[test]
  fn test_prod_nonterms_keep_order() {
    let prod: Prod<Terminal, NonTerminal> = vec![
      Elem::NonTerm(nt("B")),
      Elem::Term(t("x")),
      Elem::NonTerm(nt("A")),
      Elem::NonTerm(nt("B")),
    ]
    .into_iter()
    .collect();

    assert_eq!(
      prod.nonterms().cloned().collect::<Vec<_>>(),
      vec![nt("B"), nt("A"), nt("B")]
    );
    assert_eq!(prod.len(), 4);
    assert!(Prod::<Terminal, NonTerminal>::epsilon().is_empty());
  }

  #[test]
  fn test_refs_within() {
    let prod: Prod<Terminal, NonTerminal> =
      Prod::new(vec![Elem::Term(t("x")), Elem::NonTerm(nt("A"))]);
    let with_a: NonTermSet<NonTerminal> = vec![nt("A")].into_iter().collect();

    assert!(prod.refs_within(&with_a));
    assert!(!prod.refs_within(&NonTermSet::new()));
    assert!(Prod::<Terminal, NonTerminal>::epsilon()
      .refs_within(&NonTermSet::new()));
  }

  #[test]
  fn test_new_merges_rules_with_same_head() {
    let g: BaseGrammar = Grammar::new(
      nt("S"),
      vec![
        (nt("S"), vec![Prod::new(vec![Elem::Term(t("a"))])]),
        (nt("S"), vec![Prod::epsilon()]),
      ],
    );

    assert_eq!(g.num_rules(), 1);
    let prods = g.prods_of(&nt("S")).collect::<Vec<_>>();
    assert_eq!(prods.len(), 2);
    assert!(prods[1].is_empty());
  }

  #[test]
  fn test_missing_rule_has_no_prods() {
    let g = examples::make_unreachable();
    assert!(g.get_rule(&nt("Q")).is_none());
    assert_eq!(g.prods_of(&nt("Q")).count(), 0);
    assert_eq!(g.get_rule(&nt("C")).unwrap().num_prods(), 2);
  }

  #[test]
  fn test_all_nonterms() {
    let g = examples::make_unreachable();
    let expected: NonTermSet<NonTerminal> =
      vec![nt("A"), nt("B"), nt("C"), nt("Q")].into_iter().collect();
    assert_eq!(g.all_nonterms(), expected);

    let empty = examples::make_empty();
    assert_eq!(empty.all_nonterms().len(), 1);
  }

  #[test]
  fn test_check_reports_dangling_nonterms() {
    let g = examples::make_unreachable();
    let err = g.check().unwrap_err();
    assert!(err.missing_start().is_none());
    assert_eq!(
      err.nonterms_without_rules().iter().collect::<Vec<_>>(),
      vec![&nt("Q")]
    );
    assert!(err.to_string().contains("Q"));

    let empty = examples::make_empty();
    let err = empty.check().unwrap_err();
    assert_eq!(err.missing_start(), Some(&nt("X")));

    assert!(examples::make_epsilon_loop().check().is_ok());
  }

  #[test]
  fn test_grammar_print() {
    let g: BaseGrammar = builder::build("S", |gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_nonterm("S").add_nonterm("S");
        })
        .add_empty_prod()
        .add_prod(|pb| {
          pb.add_term("a");
        });
      });
    });
    assert_eq!(g.to_pretty(), "Start = S, Rules { S => <S> <S> | ε | a; }");

    let text = examples::make_epsilon_loop().to_pretty_width(200);
    assert!(text.starts_with("Start = S, Rules { A => a <A>; B => b;"));
    assert!(text.contains("<A> <B>"));
  }
}
