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

//! Vocabulary of the Hoop language shared by the lexical and semantic passes.

use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_iterator::{Sequence, all};

/// A value type that a variable, constant, array element, or function result
/// may have.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence)]
pub enum DataType {
    /// `int`.
    Int,

    /// `double`.
    Double,

    /// `bool`.
    Bool,

    /// `string`.
    String,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }

    /// Returns the data type spelled `s`, if any.
    pub fn from_keyword(s: &str) -> Option<Self> {
        all::<Self>().find(|data_type| data_type.as_str() == s)
    }

    /// The noun used for this type in diagnostics, as in "not a valid
    /// integer".
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Double => "double",
            Self::Bool => "boolean",
            Self::String => "string",
        }
    }

    /// Returns true if literal `value` is syntactically acceptable for this
    /// type:
    ///
    /// - `int`: one or more decimal digits.
    /// - `double`: digits, `.`, digits.
    /// - `bool`: exactly `true` or `false`.
    /// - `string`: enclosed in double quotes.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Int => is_digits(value),
            Self::Double => value
                .split_once('.')
                .is_some_and(|(whole, fraction)| is_digits(whole) && is_digits(fraction)),
            Self::Bool => value == "true" || value == "false",
            Self::String => is_quoted(value),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A function's declared result.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Value(DataType),
    Void,
}

impl ReturnType {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "void" => Some(Self::Void),
            _ => DataType::from_keyword(s).map(Self::Value),
        }
    }

    pub fn is_void(&self) -> bool {
        *self == Self::Void
    }
}

impl Display for ReturnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Value(data_type) => data_type.fmt(f),
            Self::Void => write!(f, "void"),
        }
    }
}

/// Visibility keyword that may prefix a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence)]
pub enum AccessModifier {
    Only,
    All,
    Family,
    Package,
}

impl AccessModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Only => "only",
            Self::All => "all",
            Self::Family => "family",
            Self::Package => "package",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        all::<Self>().find(|modifier| modifier.as_str() == s)
    }
}

impl Display for AccessModifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Reserved words that the tokenizer classifies as `keyword`.
pub const KEYWORDS: [&str; 18] = [
    "when", "otherwise", "then", "hoop", "while", "continue", "break", "match", "select",
    "default", "func", "yield", "inherit", "override", "abstract", "current", "super", "static",
];

/// The range operator, U+2026 HORIZONTAL ELLIPSIS.
pub const RANGE_OPERATOR: char = '…';

/// Returns true if `s` is one or more ASCII decimal digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `s` begins and ends with a double quote.
pub fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Returns true if `s` has the shape of a literal value: a run of digits and
/// dots, `true`, `false`, or a double-quoted string.
pub fn is_literal(s: &str) -> bool {
    (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b'.'))
        || s == "true"
        || s == "false"
        || is_quoted(s)
}

#[cfg(test)]
mod tests {
    use super::{AccessModifier, DataType, ReturnType, is_literal};

    #[test]
    fn accepts() {
        assert!(DataType::Int.accepts("42"));
        assert!(!DataType::Int.accepts("4.2"));
        assert!(!DataType::Int.accepts(""));
        assert!(DataType::Double.accepts("2.5"));
        assert!(!DataType::Double.accepts("100"));
        assert!(!DataType::Double.accepts("1."));
        assert!(!DataType::Double.accepts("1.2.3"));
        assert!(DataType::Bool.accepts("false"));
        assert!(!DataType::Bool.accepts("1"));
        assert!(DataType::String.accepts("\"ss\""));
        assert!(!DataType::String.accepts("\""));
        assert!(!DataType::String.accepts("ss"));
    }

    #[test]
    fn keywords() {
        assert_eq!(DataType::from_keyword("double"), Some(DataType::Double));
        assert_eq!(DataType::from_keyword("void"), None);
        assert_eq!(ReturnType::from_keyword("void"), Some(ReturnType::Void));
        assert_eq!(
            AccessModifier::from_keyword("family"),
            Some(AccessModifier::Family)
        );
        assert_eq!(AccessModifier::from_keyword("public"), None);
    }

    #[test]
    fn literals() {
        assert!(is_literal("1.2.3"));
        assert!(is_literal("\"a \" b\""));
        assert!(is_literal("true"));
        assert!(!is_literal("truth"));
        assert!(!is_literal("x"));
        assert!(!is_literal("-5"));
    }
}
