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

//! Source segmentation.
//!
//! Segmentation labels each contiguous run of characters in the input with a
//! [Segment] type.  At each position, the segmenter tries a fixed list of
//! patterns in priority order and the first one that matches wins, even if a
//! later pattern would match a longer span.  That is how `int` becomes
//! [Segment::DataType] instead of [Segment::Identifier] and how `+=` beats
//! `+`.
//!
//! Most segment types correspond directly to tokens.  [Segment::Spaces],
//! [Segment::Newline], and [Segment::Comment] are dropped later in lexical
//! analysis, and [Segment::UnexpectedChar] labels a single character that no
//! pattern matches.

#[cfg(doc)]
use super::token::Token;

use crate::syntax::{KEYWORDS, RANGE_OPERATOR};

/// The type of a segment, in priority order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Keyword,
    AccessModifier,
    Annotation,
    Constant,
    DataType,
    Comment,
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
    RangeOperator,

    /// A single punctuator, or `::`.
    Punct,

    /// White space other than a new-line.
    Spaces,

    Newline,
    Identifier,
    UnexpectedChar,
}

const ACCESS_MODIFIERS: [&str; 4] = ["only", "all", "family", "package"];
const DATA_TYPES: [&str; 5] = ["int", "double", "bool", "string", "void"];
const BOOLS: [&str; 2] = ["true", "false"];
const ASSIGNMENT_OPERATORS: [&str; 1] = ["="];

const RELATIONAL_OPERATORS: [&str; 6] = ["==", "!=", "<=", ">=", "<", ">"];
const ARITHMETIC_ASSIGNMENT_OPERATORS: [&str; 5] = ["+=", "-=", "*=", "/=", "%="];
const INCREMENT_DECREMENT_OPERATORS: [&str; 2] = ["++", "--"];
const LOGICAL_OPERATORS: [&str; 2] = ["&&", "||"];
const ARITHMETIC_OPERATORS: [&str; 5] = ["+", "-", "*", "/", "%"];
const PUNCTUATORS: [&str; 10] = ["::", "[", "]", "{", "}", "(", ")", ";", ":", ","];

/// Returns true if `c` counts as part of a word for whole-word matching.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns the remainder of `input` after skipping all leading characters
/// for which `f` returns true.
fn skip_matching<F>(f: F, input: &str) -> &str
where
    F: Fn(char) -> bool,
{
    input.trim_start_matches(f)
}

/// If the first character of `input` satisfies `f`, returns the rest of
/// `input`.
fn match_char<F>(f: F, input: &str) -> Option<&str>
where
    F: Fn(char) -> bool,
{
    let mut chars = input.chars();
    chars.next().filter(|&c| f(c)).map(|_| chars.as_str())
}

fn skip_digits(input: &str) -> Option<&str> {
    let rest = skip_matching(|c| c.is_ascii_digit(), input);
    (rest.len() < input.len()).then_some(rest)
}

fn ends_word(rest: &str) -> bool {
    !rest.chars().next().is_some_and(is_word_char)
}

/// Returns the length of the first of `words` that `input` starts with as a
/// whole word.
fn match_word(input: &str, words: &[&str]) -> Option<usize> {
    words
        .iter()
        .find(|word| input.strip_prefix(**word).is_some_and(ends_word))
        .map(|word| word.len())
}

/// Returns the length of the first of `operators` that `input` starts with.
fn match_operator(input: &str, operators: &[&str]) -> Option<usize> {
    operators
        .iter()
        .find(|operator| input.starts_with(**operator))
        .map(|operator| operator.len())
}

fn consumed(input: &str, rest: &str) -> usize {
    input.len() - rest.len()
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Segmenter {
    /// The last character of the previous segment, for word boundaries.
    prev: Option<char>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Divides off a segment at the start of `input`.  Returns `None` if
    /// `input` is empty, otherwise the length in bytes of the segment and its
    /// type.  The caller should then advance `input` past the segment and
    /// call again.
    pub fn push(&mut self, input: &str) -> Option<(usize, Segment)> {
        let c = input.chars().next()?;
        let (len, segment) = self
            .parse(input)
            .unwrap_or((c.len_utf8(), Segment::UnexpectedChar));
        self.prev = input[..len].chars().next_back();
        Some((len, segment))
    }

    fn at_word_start(&self) -> bool {
        !self.prev.is_some_and(is_word_char)
    }

    fn parse(&self, input: &str) -> Option<(usize, Segment)> {
        let at_word_start = self.at_word_start();
        let word = |words: &[&str]| match_word(input, words).filter(|_| at_word_start);

        if let Some(len) = word(&KEYWORDS[..]) {
            return Some((len, Segment::Keyword));
        }
        if let Some(len) = word(&ACCESS_MODIFIERS[..]) {
            return Some((len, Segment::AccessModifier));
        }
        if let Some(len) = match_word(input, &["@override"]) {
            return Some((len, Segment::Annotation));
        }
        if let Some(len) = word(&["fix"][..]) {
            return Some((len, Segment::Constant));
        }
        if let Some(len) = word(&DATA_TYPES[..]) {
            return Some((len, Segment::DataType));
        }
        if let Some(rest) = input.strip_prefix("//") {
            let rest = skip_matching(|c| c != '\n', rest);
            return Some((consumed(input, rest), Segment::Comment));
        }

        let operators = [
            (&RELATIONAL_OPERATORS[..], Segment::RelationalOperator),
            (
                &ARITHMETIC_ASSIGNMENT_OPERATORS[..],
                Segment::ArithmeticAssignmentOperator,
            ),
            (&ASSIGNMENT_OPERATORS[..], Segment::AssignmentOperator),
            (
                &INCREMENT_DECREMENT_OPERATORS[..],
                Segment::IncrementDecrementOperator,
            ),
            (&LOGICAL_OPERATORS[..], Segment::LogicalOperator),
            (&ARITHMETIC_OPERATORS[..], Segment::ArithmeticOperator),
        ];
        for (operators, segment) in operators {
            if let Some(len) = match_operator(input, operators) {
                return Some((len, segment));
            }
        }

        if let Some((len, segment)) = parse_number(input) {
            return Some((len, segment));
        }
        if let Some(len) = parse_char(input) {
            return Some((len, Segment::Char));
        }
        if let Some(len) = parse_string(input) {
            return Some((len, Segment::String));
        }
        if let Some(len) = word(&BOOLS[..]) {
            return Some((len, Segment::Bool));
        }
        if let Some(rest) = input
            .strip_prefix('\\')
            .and_then(|rest| match_char(|c| "'\"\\bfnrt".contains(c), rest))
        {
            return Some((consumed(input, rest), Segment::EscapeSequence));
        }
        if let Some(rest) = input.strip_prefix(RANGE_OPERATOR) {
            return Some((consumed(input, rest), Segment::RangeOperator));
        }
        if let Some(len) = match_operator(input, &PUNCTUATORS) {
            return Some((len, Segment::Punct));
        }

        let rest = skip_matching(|c| c.is_whitespace() && c != '\n', input);
        if rest.len() < input.len() {
            return Some((consumed(input, rest), Segment::Spaces));
        }
        if input.starts_with('\n') {
            return Some((1, Segment::Newline));
        }
        if let Some(rest) = match_char(|c| c.is_ascii_alphabetic() || c == '_', input) {
            let rest = skip_matching(|c| c.is_ascii_alphanumeric() || c == '_', rest);
            return Some((consumed(input, rest), Segment::Identifier));
        }
        None
    }
}

/// Parses `digits.digits` as [Segment::Float] or `digits` as [Segment::Int].
fn parse_number(input: &str) -> Option<(usize, Segment)> {
    let rest = skip_digits(input)?;
    if let Some(rest) = rest.strip_prefix('.').and_then(skip_digits) {
        Some((consumed(input, rest), Segment::Float))
    } else {
        Some((consumed(input, rest), Segment::Int))
    }
}

/// Parses a character literal: a single character or backslash escape
/// between single quotes.
fn parse_char(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('\'')?;
    let rest = match rest.strip_prefix('\\') {
        Some(rest) => match_char(|c| c != '\n', rest)?,
        None => match_char(|c| c != '\\' && c != '\'', rest)?,
    };
    let rest = rest.strip_prefix('\'')?;
    Some(consumed(input, rest))
}

/// Parses a double-quoted string with backslash escapes.  A string that is
/// unterminated, or whose backslash is followed by a new-line or the end of
/// input, does not match.
fn parse_string(input: &str) -> Option<usize> {
    let mut rest = input.strip_prefix('"')?;
    loop {
        let mut chars = rest.chars();
        match chars.next()? {
            '"' => return Some(consumed(input, chars.as_str())),
            '\\' => rest = match_char(|c| c != '\n', chars.as_str())?,
            _ => rest = chars.as_str(),
        }
    }
}
