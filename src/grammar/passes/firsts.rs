use std::collections::{BTreeMap, BTreeSet};

use crate::utils::{change_iter, change_loop, WasChanged};
use crate::{
  grammar::{Elem, NonTermSet},
  utils::{CollectMap, OrdKey},
};

use super::nullable::Nullable;
use super::{Pass, PassContext};

/// The terminals that can begin a string derived from each nonterminal.
///
/// Every rule head has an entry, possibly empty.
pub struct Firsts;

impl<T, NT> Pass<T, NT> for Firsts
where
  T: OrdKey,
  NT: OrdKey,
{
  type Value = BTreeMap<NT, BTreeSet<T>>;

  fn run_pass(pass_map: &PassContext<T, NT>) -> Self::Value {
    let gram = pass_map.grammar();

    let nullables = pass_map.get_pass::<Nullable>();

    let mut firsts = CollectMap::new();

    change_loop(|| {
      change_iter(gram.prods(), |(head, prod)| {
        let mut changed = WasChanged::Unchanged;
        for elem in prod.elements() {
          match elem {
            Elem::Term(t) => {
              changed.merge(firsts.insert(head, t));
              break;
            }
            Elem::NonTerm(nt) => {
              changed.merge(firsts.insert_from_key_set(head, &nt));
              if !nullables.contains(nt) {
                break;
              }
            }
          }
        }

        changed
      })
    });

    let mut result: BTreeMap<NT, BTreeSet<T>> = gram
      .nonterminals()
      .map(|nt| (nt.clone(), BTreeSet::new()))
      .collect();
    for (k, v) in firsts.into_inner() {
      result.insert(k.clone(), v.into_iter().cloned().collect());
    }

    log::debug!("Computed first sets for {} nonterminals.", result.len());
    result
  }
}

/// The first set of a sequence of elements.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FirstSet<T> {
  terms: BTreeSet<T>,
  nullable: bool,
}

impl<T: Ord> FirstSet<T> {
  /// The terminals that can begin a string derived from the sequence.
  pub fn terms(&self) -> &BTreeSet<T> {
    &self.terms
  }

  /// Returns true if the sequence can derive the empty string.
  pub fn is_nullable(&self) -> bool {
    self.nullable
  }

  pub fn contains(&self, term: &T) -> bool {
    self.terms.contains(term)
  }

  pub fn into_terms(self) -> BTreeSet<T> {
    self.terms
  }
}

/// Computes the first set of `word` from the first sets and nullable set of
/// the grammar it is drawn from.
///
/// Nonterminals without an entry in `firsts` contribute no terminals.
pub fn first_of_word<'a, T, NT>(
  firsts: &BTreeMap<NT, BTreeSet<T>>,
  nullables: &NonTermSet<NT>,
  word: impl IntoIterator<Item = &'a Elem<T, NT>>,
) -> FirstSet<T>
where
  T: OrdKey,
  NT: OrdKey,
{
  let mut terms = BTreeSet::new();
  for elem in word {
    match elem {
      Elem::Term(t) => {
        terms.insert(t.clone());
        return FirstSet {
          terms,
          nullable: false,
        };
      }
      Elem::NonTerm(nt) => {
        if let Some(nt_firsts) = firsts.get(nt) {
          terms.extend(nt_firsts.iter().cloned());
        }
        if !nullables.contains(nt) {
          return FirstSet {
            terms,
            nullable: false,
          };
        }
      }
    }
  }

  FirstSet {
    terms,
    nullable: true,
  }
}
