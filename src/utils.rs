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

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::sync::Arc;

/// The bounds required of terminal and nonterminal types so that they can be
/// used as keys of ordered (and persistent) maps and sets.
pub trait OrdKey:
  Clone + PartialEq + Eq + PartialOrd + Ord + std::fmt::Debug + 'static
{
}

impl<
    T: Clone + PartialEq + Eq + PartialOrd + Ord + std::fmt::Debug + 'static,
  > OrdKey for T
{
}

pub trait ToDoc {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA, ()>
  where
    DA::Doc: Clone;
}

/// A shared, immutable name type, used to avoid duplicating common string
/// values throughout a grammar.
///
/// Names are cheap to clone and can be sent between threads.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Arc<str>);

impl Name {
  /// Creates a new Name containing the given string.
  pub fn new(s: &(impl AsRef<str> + ?Sized)) -> Self {
    Name(Arc::from(s.as_ref()))
  }

  /// Returns a reference to the underlying string.
  pub fn str(&self) -> &str {
    &self.0
  }
}

impl AsRef<str> for Name {
  fn as_ref(&self) -> &str {
    self.str()
  }
}

impl std::fmt::Debug for Name {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    fmt.write_str(&self.0)
  }
}

impl std::fmt::Display for Name {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    fmt.write_str(&self.0)
  }
}

impl ToDoc for Name {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA> {
    da.text(self.str().to_string())
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum WasChanged {
  Changed,
  Unchanged,
}

impl WasChanged {
  pub fn from_changed(changed: bool) -> Self {
    if changed {
      WasChanged::Changed
    } else {
      WasChanged::Unchanged
    }
  }

  pub fn join(self, other: Self) -> Self {
    match (self, other) {
      (WasChanged::Changed, _) | (_, WasChanged::Changed) => {
        WasChanged::Changed
      }
      _ => WasChanged::Unchanged,
    }
  }

  pub fn merge(&mut self, other: Self) {
    *self = self.join(other);
  }
}

/// Calls `func` repeatedly until it reports that nothing changed.
pub fn change_loop<F>(mut func: F)
where
  F: FnMut() -> WasChanged,
{
  while let WasChanged::Changed = func() {}
}

/// Calls `func` on every item, and reports whether any call changed anything.
pub fn change_iter<I, F>(iter: I, mut func: F) -> WasChanged
where
  I: Iterator,
  F: FnMut(I::Item) -> WasChanged,
{
  let mut changed = WasChanged::Unchanged;
  for item in iter {
    changed = changed.join(func(item));
  }

  changed
}

/// A map from keys to sets of values that reports whether each insertion
/// grew the map.
pub struct CollectMap<K, V>(BTreeMap<K, BTreeSet<V>>);

impl<K, V> CollectMap<K, V>
where
  K: Ord,
  V: Ord,
{
  pub fn new() -> Self {
    CollectMap(BTreeMap::new())
  }

  pub fn get(&self, key: &K) -> Option<&BTreeSet<V>> {
    self.0.get(key)
  }

  pub fn insert(&mut self, key: K, value: V) -> WasChanged {
    match self.0.entry(key) {
      btree_map::Entry::Occupied(mut occ) => {
        WasChanged::from_changed(occ.get_mut().insert(value))
      }
      btree_map::Entry::Vacant(vac) => {
        let mut new_set = BTreeSet::new();
        new_set.insert(value);
        vac.insert(new_set);
        WasChanged::Changed
      }
    }
  }

  pub fn insert_iter(
    &mut self,
    key: K,
    values: impl IntoIterator<Item = V>,
  ) -> WasChanged {
    match self.0.entry(key) {
      btree_map::Entry::Occupied(mut occ) => {
        let set = occ.get_mut();
        change_iter(values.into_iter(), |val| {
          WasChanged::from_changed(set.insert(val))
        })
      }
      btree_map::Entry::Vacant(vac) => {
        let mut val_iter = values.into_iter();
        match val_iter.next() {
          Some(init) => {
            let mut new_set = BTreeSet::new();
            new_set.insert(init);
            new_set.extend(val_iter);
            vac.insert(new_set);
            WasChanged::Changed
          }

          None => WasChanged::Unchanged,
        }
      }
    }
  }

  /// Adds every value stored under `src_key` to the set stored under `key`.
  pub fn insert_from_key_set(&mut self, key: K, src_key: &K) -> WasChanged
  where
    V: Clone,
  {
    if &key == src_key {
      return WasChanged::Unchanged;
    }

    let src_values: Vec<V> = match self.0.get(src_key) {
      Some(src_set) => src_set.iter().cloned().collect(),
      None => return WasChanged::Unchanged,
    };

    self.insert_iter(key, src_values)
  }

  pub fn into_inner(self) -> BTreeMap<K, BTreeSet<V>> {
    self.0
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_name_is_shared_text() {
    let a = Name::new("expr");
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(b.str(), "expr");
    assert_eq!(format!("{}", a), "expr");
    assert!(Name::new("a") < Name::new("b"));
  }

  #[test]
  fn test_was_changed_join() {
    use WasChanged::*;
    assert_eq!(Changed.join(Unchanged), Changed);
    assert_eq!(Unchanged.join(Changed), Changed);
    assert_eq!(Unchanged.join(Unchanged), Unchanged);

    let mut changed = Unchanged;
    changed.merge(Changed);
    assert_eq!(changed, Changed);
  }

  #[test]
  fn test_change_loop_runs_until_stable() {
    let mut count = 0;
    change_loop(|| {
      count += 1;
      WasChanged::from_changed(count < 3)
    });
    assert_eq!(count, 3);
  }

  #[test]
  fn test_collect_map_reports_growth() {
    let mut map = CollectMap::new();
    assert_eq!(map.insert("a", 1), WasChanged::Changed);
    assert_eq!(map.insert("a", 1), WasChanged::Unchanged);
    assert_eq!(map.insert_iter("b", vec![]), WasChanged::Unchanged);
    assert!(map.get(&"b").is_none());
    assert_eq!(map.insert_iter("b", vec![2, 3]), WasChanged::Changed);

    assert_eq!(map.insert_from_key_set("a", &"b"), WasChanged::Changed);
    assert_eq!(map.insert_from_key_set("a", &"b"), WasChanged::Unchanged);
    assert_eq!(map.insert_from_key_set("a", &"a"), WasChanged::Unchanged);
    assert_eq!(map.insert_from_key_set("c", &"missing"), WasChanged::Unchanged);

    let inner = map.into_inner();
    assert_eq!(
      inner.get("a").unwrap().iter().cloned().collect::<Vec<_>>(),
      vec![1, 2, 3]
    );
  }
}
