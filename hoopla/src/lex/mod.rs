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

//! Hoop lexical analysis.
//!
//! Lexical analysis happens in two phases.  [mod segment] divides the input
//! into labeled segments by trying a fixed list of patterns in priority order
//! at each position.  [mod scan] turns segments into [Token]s, dropping
//! spaces, newlines, and comments and tracking the line on which each token
//! starts.

pub mod scan;
pub mod segment;
mod token;

pub use scan::{ScanError, StringScanner, scan, tokenize};
pub use token::{Token, TokenClass};
