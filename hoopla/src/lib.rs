// Hoopla - lexical and semantic checking for the Hoop teaching language.
// Copyright (C) 2025 The Hoopla Authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Lexical classification and line-oriented semantic checking for Hoop, a
//! small C-like teaching language.
//!
//! Two independent pipelines re-scan the same text:
//!
//! - [lex] turns source text into a sequence of classified, line-numbered
//!   [Token](lex::Token)s.
//!
//! - [semantic] walks the source one line at a time, classifies each line's
//!   statement shape, and reports naming, typing, redeclaration, scoping,
//!   inheritance, and control-structure problems as
//!   [Diagnostic](message::Diagnostic)s.

pub mod identifier;
pub mod lex;
pub mod message;
pub mod output;
pub mod semantic;
pub mod settings;
pub mod source;
pub mod syntax;
