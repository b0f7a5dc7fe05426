// Copyright 2019 Google LLC
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

use crate::utils::OrdKey;

use super::{Elem, Grammar, GrammarErrors, NonTerminal, Prod, Terminal};

/// A helper trait to allow builder methods to either take a type `T`, or a
/// reference to `T` if it is clonable.
pub trait BuilderInto<T> {
  /// Consumes self and produces a value of type `T`.
  fn builder_into(self) -> T;
}

impl<T> BuilderInto<T> for T {
  fn builder_into(self) -> T {
    self
  }
}

impl<'a, T> BuilderInto<T> for &'a T
where
  T: Clone,
{
  fn builder_into(self) -> T {
    self.clone()
  }
}

impl BuilderInto<Terminal> for &'_ str {
  fn builder_into(self) -> Terminal {
    Terminal::new(self)
  }
}

impl BuilderInto<NonTerminal> for &'_ str {
  fn builder_into(self) -> NonTerminal {
    NonTerminal::new(self)
  }
}

pub struct ProductionBuilder<T, NT> {
  elems: Vec<Elem<T, NT>>,
}

impl<T, NT> ProductionBuilder<T, NT> {
  fn new() -> Self {
    ProductionBuilder { elems: Vec::new() }
  }

  fn build(self) -> Prod<T, NT> {
    Prod::new(self.elems)
  }

  pub fn add_term(&mut self, term: impl BuilderInto<T>) -> &mut Self {
    self.elems.push(Elem::Term(term.builder_into()));
    self
  }

  pub fn add_nonterm(&mut self, nonterm: impl BuilderInto<NT>) -> &mut Self {
    self.elems.push(Elem::NonTerm(nonterm.builder_into()));
    self
  }
}

// ----------------

pub struct RuleBuilder<T, NT> {
  head: NT,
  prods: Vec<Prod<T, NT>>,
}

impl<T, NT> RuleBuilder<T, NT> {
  fn new(head: NT) -> Self {
    RuleBuilder {
      head,
      prods: Vec::new(),
    }
  }

  fn build(self) -> (NT, Vec<Prod<T, NT>>) {
    let RuleBuilder { head, prods } = self;
    (head, prods)
  }

  pub fn add_prod(
    &mut self,
    build_fn: impl FnOnce(&mut ProductionBuilder<T, NT>),
  ) -> &mut Self {
    let mut builder = ProductionBuilder::new();
    build_fn(&mut builder);
    self.prods.push(builder.build());
    self
  }

  pub fn add_prod_with_elems(
    &mut self,
    elems: impl BuilderInto<Vec<Elem<T, NT>>>,
  ) -> &mut Self {
    self.prods.push(Prod::new(elems.builder_into()));
    self
  }

  /// Adds an empty (epsilon) production.
  pub fn add_empty_prod(&mut self) -> &mut Self {
    self.prods.push(Prod::epsilon());
    self
  }
}

// ----------------

pub struct GrammarBuilder<T, NT> {
  start: NT,
  rules: Vec<(NT, Vec<Prod<T, NT>>)>,
}

impl<T, NT> GrammarBuilder<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  fn new(start: NT) -> Self {
    GrammarBuilder {
      start,
      rules: Vec::new(),
    }
  }

  fn build(self) -> Grammar<T, NT> {
    let GrammarBuilder { start, rules } = self;
    Grammar::new(start, rules)
  }

  /// Adds a rule. Adding a second rule with the same head appends its
  /// productions to the first.
  pub fn add_rule<F>(
    &mut self,
    head: impl BuilderInto<NT>,
    build_fn: F,
  ) -> &mut Self
  where
    F: FnOnce(&mut RuleBuilder<T, NT>),
  {
    let mut rule_builder = RuleBuilder::new(head.builder_into());
    build_fn(&mut rule_builder);
    self.rules.push(rule_builder.build());
    self
  }
}

/// Builds a grammar using a builder function.
///
/// Example:
///
/// ```rust
/// # use gll_grammar::grammar::{BaseGrammar, Terminal, NonTerminal};
/// let t_a = Terminal::new("A");
/// let nt_x = NonTerminal::new("x");
/// let g: BaseGrammar = gll_grammar::grammar::build(&nt_x, |gb| {
///   gb.add_rule(&nt_x, |rb| {
///     rb.add_prod(|pb| {
///       pb.add_term(&t_a).add_nonterm(&nt_x).add_term(&t_a);
///     })
///     .add_empty_prod();
///   });
/// });
/// assert_eq!(g.num_prods(), 2);
/// ```
///
/// Note that arguments that take `T` or `NT` can either take a non-reference
/// value, or a cloneable reference value. For the stock `Terminal` and
/// `NonTerminal` types, a `&str` naming the element also works.
///
/// The grammar is not validated. See `build_checked`.
pub fn build<T, NT>(
  start: impl BuilderInto<NT>,
  build_fn: impl FnOnce(&mut GrammarBuilder<T, NT>),
) -> Grammar<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  let mut builder = GrammarBuilder::new(start.builder_into());
  build_fn(&mut builder);
  builder.build()
}

/// Builds a grammar as `build` does, then validates it with `Grammar::check`.
pub fn build_checked<T, NT>(
  start: impl BuilderInto<NT>,
  build_fn: impl FnOnce(&mut GrammarBuilder<T, NT>),
) -> Result<Grammar<T, NT>, GrammarErrors<NT>>
where
  T: OrdKey,
  NT: OrdKey,
{
  let g = build(start, build_fn);
  g.check().map(|_| g)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::BaseGrammar;

  #[test]
  fn test_build_with_str_names() {
    let g: BaseGrammar = build("S", |gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("a").add_nonterm("S");
        })
        .add_empty_prod();
      });
    });

    assert_eq!(g.start_nt(), &NonTerminal::new("S"));
    let prods = g.prods_of(&NonTerminal::new("S")).collect::<Vec<_>>();
    assert_eq!(prods.len(), 2);
    assert_eq!(
      prods[0].elements().cloned().collect::<Vec<_>>(),
      vec![
        Elem::Term(Terminal::new("a")),
        Elem::NonTerm(NonTerminal::new("S"))
      ]
    );
    assert!(prods[1].is_empty());
  }

  #[test]
  fn test_repeated_rule_appends() {
    let g: BaseGrammar = build("S", |gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("a");
        });
      })
      .add_rule("S", |rb| {
        rb.add_prod_with_elems(vec![Elem::Term(Terminal::new("b"))]);
      });
    });

    assert_eq!(g.num_rules(), 1);
    assert_eq!(g.num_prods(), 2);
  }

  #[test]
  fn test_build_checked() {
    let ok: Result<BaseGrammar, _> = build_checked("S", |gb| {
      gb.add_rule("S", |rb| {
        rb.add_empty_prod();
      });
    });
    assert!(ok.is_ok());

    let err: Result<BaseGrammar, _> = build_checked("S", |gb| {
      gb.add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_nonterm("Missing");
        });
      });
    });
    let err = err.unwrap_err();
    assert!(err
      .nonterms_without_rules()
      .contains(&NonTerminal::new("Missing")));
  }
}
