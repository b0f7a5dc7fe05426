//! Small grammars used throughout the tests and documentation.

use crate::grammar::{build, BaseGrammar, Grammar, NonTerminal};

/// Builds a grammar with an unreachable, partially productive tail:
///
/// ```text
/// A => P
/// B => <Q>
/// C => R | <B>
/// ```
///
/// `Q` is referenced but has no rule.
pub fn make_unreachable() -> BaseGrammar {
  build("A", |gb| {
    gb.add_rule("A", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("P");
      });
    })
    .add_rule("B", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("Q");
      });
    })
    .add_rule("C", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("R");
      })
      .add_prod(|pb| {
        pb.add_nonterm("B");
      });
    });
  })
}

/// Builds a grammar with an epsilon alternative and an unproductive
/// self-recursive nonterminal:
///
/// ```text
/// S => <S> <S> | ε | <A> <B> | a
/// A => a <A>
/// B => b
/// ```
pub fn make_epsilon_loop() -> BaseGrammar {
  build("S", |gb| {
    gb.add_rule("S", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("S").add_nonterm("S");
      })
      .add_empty_prod()
      .add_prod(|pb| {
        pb.add_nonterm("A").add_nonterm("B");
      })
      .add_prod(|pb| {
        pb.add_term("a");
      });
    })
    .add_rule("A", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("a").add_nonterm("A");
      });
    })
    .add_rule("B", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("b");
      });
    });
  })
}

/// Builds a grammar where every nonterminal is productive and reachable:
///
/// ```text
/// S => <A> <C> a <B> | <A> <B> a a
/// A => a <A> | a
/// B => b <B> | b
/// C => b <C> | b
/// ```
pub fn make_repetitions() -> BaseGrammar {
  build("S", |gb| {
    gb.add_rule("S", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("A")
          .add_nonterm("C")
          .add_term("a")
          .add_nonterm("B");
      })
      .add_prod(|pb| {
        pb.add_nonterm("A").add_nonterm("B").add_term("a").add_term("a");
      });
    });
    for (nt, t) in &[("A", "a"), ("B", "b"), ("C", "b")] {
      gb.add_rule(*nt, |rb| {
        rb.add_prod(|pb| {
          pb.add_term(*t).add_nonterm(*nt);
        })
        .add_prod(|pb| {
          pb.add_term(*t);
        });
      });
    }
  })
}

/// Builds a left-recursive expression grammar:
///
/// ```text
/// E => <E> + <E> | 1
/// ```
pub fn make_expr() -> BaseGrammar {
  build("E", |gb| {
    gb.add_rule("E", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("E").add_term("+").add_nonterm("E");
      })
      .add_prod(|pb| {
        pb.add_term("1");
      });
    });
  })
}

/// Builds a grammar of parenthesized, comma separated lists:
///
/// ```text
/// start     => <expr>
/// expr      => LPAREN <expr_list> RPAREN | VALUE
/// expr_list => <expr> <expr_tail> | ε
/// expr_tail => COMMA <expr> <expr_tail> | ε
/// ```
pub fn make_paren() -> BaseGrammar {
  build("start", |gb| {
    gb.add_rule("start", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("expr");
      });
    })
    .add_rule("expr", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("LPAREN")
          .add_nonterm("expr_list")
          .add_term("RPAREN");
      })
      .add_prod(|pb| {
        pb.add_term("VALUE");
      });
    })
    .add_rule("expr_list", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("expr").add_nonterm("expr_tail");
      })
      .add_empty_prod();
    })
    .add_rule("expr_tail", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("COMMA")
          .add_nonterm("expr")
          .add_nonterm("expr_tail");
      })
      .add_empty_prod();
    });
  })
}

/// Builds a grammar where nullability flows through chains of nonterminals:
///
/// ```text
/// start => <a> <b> <c>
/// a     => <b> | A
/// b     => <c> | B
/// c     => ε | C
/// ```
pub fn make_simple_nullable() -> BaseGrammar {
  build("start", |gb| {
    gb.add_rule("start", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("a").add_nonterm("b").add_nonterm("c");
      });
    })
    .add_rule("a", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("b");
      })
      .add_prod(|pb| {
        pb.add_term("A");
      });
    })
    .add_rule("b", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("c");
      })
      .add_prod(|pb| {
        pb.add_term("B");
      });
    })
    .add_rule("c", |rb| {
      rb.add_empty_prod().add_prod(|pb| {
        pb.add_term("C");
      });
    });
  })
}

/// Builds a grammar whose start nonterminal can only derive itself, next to
/// an otherwise healthy, unreachable rule:
///
/// ```text
/// S => x <S>
/// T => t
/// ```
pub fn make_unproductive_start() -> BaseGrammar {
  build("S", |gb| {
    gb.add_rule("S", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("x").add_nonterm("S");
      });
    })
    .add_rule("T", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("t");
      });
    });
  })
}

/// Builds a grammar where a nonterminal (`D`) is reachable only through an
/// alternative that is not productive:
///
/// ```text
/// S => <D> <U> | s
/// D => d
/// U => u <U>
/// ```
pub fn make_hidden_unreachable() -> BaseGrammar {
  build("S", |gb| {
    gb.add_rule("S", |rb| {
      rb.add_prod(|pb| {
        pb.add_nonterm("D").add_nonterm("U");
      })
      .add_prod(|pb| {
        pb.add_term("s");
      });
    })
    .add_rule("D", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("d");
      });
    })
    .add_rule("U", |rb| {
      rb.add_prod(|pb| {
        pb.add_term("u").add_nonterm("U");
      });
    });
  })
}

/// Builds a grammar with no rules at all, and start nonterminal `X`.
pub fn make_empty() -> BaseGrammar {
  Grammar::new(NonTerminal::new("X"), Vec::new())
}

/// Returns every example grammar.
pub fn all() -> Vec<BaseGrammar> {
  vec![
    make_unreachable(),
    make_epsilon_loop(),
    make_repetitions(),
    make_expr(),
    make_paren(),
    make_simple_nullable(),
    make_unproductive_start(),
    make_hidden_unreachable(),
    make_empty(),
  ]
}
