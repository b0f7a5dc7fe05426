use crate::utils::{Name, ToDoc};

/// An element type that carries a name.
///
/// Implemented by the stock `Terminal` and `NonTerminal` types, so that the
/// name of any element built from them can be retrieved regardless of its
/// kind.
pub trait Named {
  fn name(&self) -> &Name;
}

/// A terminal element.
///
/// This is a simple terminal type identified only by its name.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Terminal(Name);

impl Terminal {
  pub fn new(s: &str) -> Self {
    Terminal(Name::new(s))
  }
}

impl Named for Terminal {
  fn name(&self) -> &Name {
    &self.0
  }
}

impl ToDoc for Terminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA> {
    da.text(self.0.str().to_string())
  }
}

/// A nonterminal element.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NonTerminal(Name);

impl NonTerminal {
  pub fn new(s: &str) -> Self {
    NonTerminal(Name::new(s))
  }
}

impl Named for NonTerminal {
  fn name(&self) -> &Name {
    &self.0
  }
}

impl ToDoc for NonTerminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA> {
    da.text(self.0.str().to_string())
  }
}
