use std::collections::{BTreeMap, BTreeSet};

use crate::utils::{change_iter, change_loop, WasChanged};
use crate::{
  grammar::Elem,
  utils::{CollectMap, OrdKey},
};

use super::firsts::{first_of_word, Firsts};
use super::nullable::Nullable;
use super::{Pass, PassContext};

/// A terminal, or the end of the input.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum StreamTerminal<T> {
  Term(T),
  EndOfStream,
}

impl<T> StreamTerminal<T> {
  pub fn as_term(&self) -> Option<&T> {
    match self {
      StreamTerminal::Term(t) => Some(t),
      StreamTerminal::EndOfStream => None,
    }
  }
}

/// The terminals that can immediately follow each nonterminal in some
/// derivation from the start nonterminal. The start nonterminal is always
/// followed by the end of the input.
///
/// Every rule head has an entry, possibly empty.
pub struct Follows;

impl<T, NT> Pass<T, NT> for Follows
where
  T: OrdKey,
  NT: OrdKey,
{
  type Value = BTreeMap<NT, BTreeSet<StreamTerminal<T>>>;

  fn run_pass(pass_map: &PassContext<T, NT>) -> Self::Value {
    let gram = pass_map.grammar();

    let firsts = pass_map.get_pass::<Firsts>();
    let nullables = pass_map.get_pass::<Nullable>();

    let mut follows = CollectMap::new();
    follows.insert(gram.start_nt().clone(), StreamTerminal::EndOfStream);

    change_loop(|| {
      change_iter(gram.prods(), |(head, prod)| {
        let mut changed = WasChanged::Unchanged;
        for (i, elem) in prod.elements().enumerate() {
          if let Elem::NonTerm(nt) = elem {
            let rest =
              first_of_word(&firsts, &nullables, prod.elements().skip(i + 1));
            if rest.is_nullable() {
              changed.merge(follows.insert_from_key_set(nt.clone(), head));
            }
            changed.merge(follows.insert_iter(
              nt.clone(),
              rest.into_terms().into_iter().map(StreamTerminal::Term),
            ));
          }
        }

        changed
      })
    });

    let mut result: BTreeMap<NT, BTreeSet<StreamTerminal<T>>> = gram
      .nonterminals()
      .map(|nt| (nt.clone(), BTreeSet::new()))
      .collect();
    result.extend(follows.into_inner());

    log::debug!("Computed follow sets for {} nonterminals.", result.len());
    result
  }
}
