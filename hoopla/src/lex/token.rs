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

use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_iterator::Sequence;
use serde::Serialize;

/// The class of a [Token].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
#[serde(into = "&'static str")]
pub enum TokenClass {
    Keyword,
    AccessModifier,
    Annotation,

    /// `fix`.
    Constant,

    DataType,
    RelationalOperator,
    ArithmeticAssignmentOperator,
    AssignmentOperator,
    IncrementDecrementOperator,
    LogicalOperator,
    ArithmeticOperator,
    Float,
    Int,
    Char,
    String,
    Bool,
    EscapeSequence,

    /// `…`.
    RangeOperator,

    Punctuator,
    Identifier,
}

impl TokenClass {
    /// The label used for this class in token reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::AccessModifier => "access modifier",
            Self::Annotation => "annotation",
            Self::Constant => "constant",
            Self::DataType => "data type",
            Self::RelationalOperator => "relational operator",
            Self::ArithmeticAssignmentOperator => "arithmetic assignment operator",
            Self::AssignmentOperator => "assignment operator",
            Self::IncrementDecrementOperator => "increment decrement operator",
            Self::LogicalOperator => "logical operator",
            Self::ArithmeticOperator => "arithmetic operator",
            Self::Float => "float",
            Self::Int => "int",
            Self::Char => "char",
            Self::String => "string",
            Self::Bool => "bool",
            Self::EscapeSequence => "escape sequence",
            Self::RangeOperator => "range operator",
            Self::Punctuator => "punctuator",
            Self::Identifier => "identifier",
        }
    }
}

impl From<TokenClass> for &'static str {
    fn from(value: TokenClass) -> Self {
        value.as_str()
    }
}

impl Display for TokenClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A classified lexical unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub class: TokenClass,

    /// The token's text.  Keywords are lowercased and escape sequences in
    /// strings are decoded; everything else is as written.
    pub value: String,

    /// 1-based line on which the token starts.
    pub line: usize,
}

impl Token {
    pub fn new(class: TokenClass, value: impl Into<String>, line: usize) -> Self {
        Self {
            class,
            value: value.into(),
            line,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {:?} (line {})", self.class, self.value, self.line)
    }
}
