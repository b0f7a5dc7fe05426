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

//! Static analysis of context-free grammars for a GLL parse engine.
//!
//! Productive, reachable and nullable nonterminals are each computed as the
//! least fixed point of a monotone step over sets of nonterminals (see
//! `grammar::closure`). Those sets drive `grammar::filter` and
//! `grammar::reduce`, which remove useless rules, and the first and follow
//! sets behind `predict::Predictor`.

#[macro_use]
extern crate derivative;

pub mod grammar;
pub mod predict;
pub mod utils;
