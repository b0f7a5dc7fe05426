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

//! Lookahead tests for a generalized LL parse engine.
//!
//! A `Predictor` owns a reduced copy of a grammar along with its nullable,
//! first and follow sets, and answers whether a production (or the rest of
//! one) should be tried on a given lookahead terminal.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::bail;

use crate::{
  grammar::{
    passes::{
      first_of_word, productive, Firsts, Follows, Nullable, PassContext,
      StreamTerminal,
    },
    transform::reduce,
    Elem, Grammar, NonTermSet,
  },
  utils::OrdKey,
};

#[derive(Derivative)]
#[derivative(
  Clone(bound = "T: OrdKey, NT: OrdKey"),
  Debug(bound = "T: OrdKey, NT: OrdKey")
)]
pub struct Predictor<T, NT> {
  grammar: Grammar<T, NT>,
  nullables: NonTermSet<NT>,
  firsts: BTreeMap<NT, BTreeSet<T>>,
  follows: BTreeMap<NT, BTreeSet<StreamTerminal<T>>>,
}

impl<T, NT> Predictor<T, NT>
where
  T: OrdKey,
  NT: OrdKey,
{
  /// Reduces `grammar` and computes the sets used for prediction.
  ///
  /// Fails if the start nonterminal derives no strings.
  pub fn new(grammar: &Grammar<T, NT>) -> anyhow::Result<Self> {
    if !productive(grammar).contains(grammar.start_nt()) {
      bail!(
        "Start nonterminal {:?} does not derive any string of terminals.",
        grammar.start_nt()
      );
    }

    let grammar = reduce(grammar);

    let (nullables, firsts, follows) = {
      let pass_map = PassContext::new(&grammar);
      (
        (*pass_map.get_pass::<Nullable>()).clone(),
        (*pass_map.get_pass::<Firsts>()).clone(),
        (*pass_map.get_pass::<Follows>()).clone(),
      )
    };

    log::debug!(
      "Built predictor over {} rules, {} nullable.",
      grammar.num_rules(),
      nullables.len()
    );

    Ok(Predictor {
      grammar,
      nullables,
      firsts,
      follows,
    })
  }

  /// The reduced grammar that predictions are made for.
  pub fn grammar(&self) -> &Grammar<T, NT> {
    &self.grammar
  }

  pub fn nullables(&self) -> &NonTermSet<NT> {
    &self.nullables
  }

  pub fn firsts(&self, nt: &NT) -> Option<&BTreeSet<T>> {
    self.firsts.get(nt)
  }

  pub fn follows(&self, nt: &NT) -> Option<&BTreeSet<StreamTerminal<T>>> {
    self.follows.get(nt)
  }

  /// Returns true if a parse of `nt` can continue with `word` when the next
  /// input is `lookahead`: either `word` can begin with `lookahead`, or
  /// `word` is nullable and `lookahead` can follow `nt`.
  pub fn test_select<'a>(
    &self,
    lookahead: &StreamTerminal<T>,
    nt: &NT,
    word: impl IntoIterator<Item = &'a Elem<T, NT>>,
  ) -> bool
  where
    T: 'a,
    NT: 'a,
  {
    let first_set = first_of_word(&self.firsts, &self.nullables, word);
    if let Some(term) = lookahead.as_term() {
      if first_set.contains(term) {
        return true;
      }
    }

    first_set.is_nullable() && self.can_follow(lookahead, nt)
  }

  /// Returns true if `lookahead` can come right after a complete `nt`.
  pub fn can_follow(&self, lookahead: &StreamTerminal<T>, nt: &NT) -> bool {
    self
      .follows
      .get(nt)
      .map_or(false, |follow_set| follow_set.contains(lookahead))
  }
}
