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

//! Hoop scanning.
//!
//! Scanning accepts a stream of segments from [super::segment] and outputs a
//! stream of [Token]s, each tagged with the 1-based line on which it starts.
//! Spaces, new-lines, and comments produce no tokens.  Characters that no
//! pattern matches produce a [ScanError], which the default tolerant callers
//! simply drop.  `\r\n` and lone `\r` count as line ends just like `\n`.

use std::borrow::Cow;

use log::{info, trace};
use thiserror::Error as ThisError;

use crate::source::normalize_newlines;

use super::{
    segment::{Segment, Segmenter},
    token::{Token, TokenClass},
};

#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum ScanError {
    /// Unexpected character.
    #[error("Unexpected character {c:?} in input.")]
    UnexpectedChar { c: char, line: usize },
}

impl ScanError {
    /// The 1-based line on which the error occurred.
    pub fn line(&self) -> usize {
        match self {
            Self::UnexpectedChar { line, .. } => *line,
        }
    }
}

impl TokenClass {
    /// Returns the token class for `segment`, or `None` for segments that do
    /// not become tokens.
    pub fn from_segment(segment: Segment) -> Option<Self> {
        match segment {
            Segment::Keyword => Some(Self::Keyword),
            Segment::AccessModifier => Some(Self::AccessModifier),
            Segment::Annotation => Some(Self::Annotation),
            Segment::Constant => Some(Self::Constant),
            Segment::DataType => Some(Self::DataType),
            Segment::RelationalOperator => Some(Self::RelationalOperator),
            Segment::ArithmeticAssignmentOperator => Some(Self::ArithmeticAssignmentOperator),
            Segment::AssignmentOperator => Some(Self::AssignmentOperator),
            Segment::IncrementDecrementOperator => Some(Self::IncrementDecrementOperator),
            Segment::LogicalOperator => Some(Self::LogicalOperator),
            Segment::ArithmeticOperator => Some(Self::ArithmeticOperator),
            Segment::Float => Some(Self::Float),
            Segment::Int => Some(Self::Int),
            Segment::Char => Some(Self::Char),
            Segment::String => Some(Self::String),
            Segment::Bool => Some(Self::Bool),
            Segment::EscapeSequence => Some(Self::EscapeSequence),
            Segment::RangeOperator => Some(Self::RangeOperator),
            Segment::Punct => Some(Self::Punctuator),
            Segment::Identifier => Some(Self::Identifier),
            Segment::Comment | Segment::Spaces | Segment::Newline | Segment::UnexpectedChar => None,
        }
    }
}

/// Decodes backslash escapes inside string literal `s`, keeping the
/// surrounding quotes.  Unknown escapes are kept as written.
fn decode_escapes(s: &str) -> String {
    let mut output = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            output.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => output.push('\n'),
            Some('t') => output.push('\t'),
            Some('r') => output.push('\r'),
            Some('b') => output.push('\u{8}'),
            Some('f') => output.push('\u{c}'),
            Some('0') => output.push('\0'),
            Some(c @ ('\\' | '\'' | '"')) => output.push(c),
            Some(c) => {
                output.push('\\');
                output.push(c);
            }
            None => output.push('\\'),
        }
    }
    output
}

/// An iterator over the tokens in a string.
///
/// Cloning a scanner, or constructing a new one over the same input,
/// restarts scanning from that point with identical results.
#[derive(Clone)]
pub struct StringScanner<'a> {
    input: Cow<'a, str>,

    /// Byte offset in `input` of the next segment.
    offset: usize,

    segmenter: Segmenter,
    line: usize,

    /// The second `:` of a `::` pair.
    pending: Option<Token>,
}

impl<'a> StringScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: normalize_newlines(input),
            offset: 0,
            segmenter: Segmenter::new(),
            line: 1,
            pending: None,
        }
    }

    /// Returns an iterator over just the tokens, dropping errors.
    pub fn tokens(self) -> impl Iterator<Item = Token> + use<'a> {
        self.filter_map(Result::ok)
    }
}

impl Iterator for StringScanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(token) = self.pending.take() {
            return Some(Ok(token));
        }
        loop {
            let rest = &self.input[self.offset..];
            let (seg_len, segment) = self.segmenter.push(rest)?;
            let s = &rest[..seg_len];
            self.offset += seg_len;

            let line = self.line;
            self.line += s.matches('\n').count();
            trace!("line {line}: {segment:?} {s:?}");

            if segment == Segment::UnexpectedChar {
                return s
                    .chars()
                    .next()
                    .map(|c| Err(ScanError::UnexpectedChar { c, line }));
            }
            let Some(class) = TokenClass::from_segment(segment) else {
                continue;
            };
            let token = match class {
                TokenClass::Keyword => Token::new(class, s.to_lowercase(), line),
                TokenClass::String => Token::new(class, decode_escapes(s), line),
                TokenClass::Punctuator if s == "::" => {
                    self.pending = Some(Token::new(class, ":", line));
                    Token::new(class, ":", line)
                }
                _ => Token::new(class, s, line),
            };
            return Some(Ok(token));
        }
    }
}

/// Tokenizes `input`, silently dropping characters that no pattern matches.
pub fn tokenize(input: &str) -> Vec<Token> {
    let tokens = StringScanner::new(input).tokens().collect::<Vec<_>>();
    info!("scanned {} tokens", tokens.len());
    tokens
}

/// Tokenizes `input`, returning the tokens along with an error for each
/// character that no pattern matches.  The tokens are the same as those
/// returned by [tokenize].
pub fn scan(input: &str) -> (Vec<Token>, Vec<ScanError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for result in StringScanner::new(input) {
        match result {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }
    info!(
        "scanned {} tokens with {} unexpected characters",
        tokens.len(),
        errors.len()
    );
    (tokens, errors)
}
