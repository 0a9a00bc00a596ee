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

//! Recognizing the shape of a single line.
//!
//! Each line is classified on its own, with no lookahead and no parse tree.
//! A "name" here is any run of characters other than white space and the
//! delimiters in [DELIMITERS], so that declarations with badly formed names
//! are still recognized and can be reported.

use crate::syntax::{AccessModifier, DataType, ReturnType, is_literal};

/// Characters that end a name.
pub const DELIMITERS: &str = "=()[]{},:;…<>!";

fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !DELIMITERS.contains(c)
}

/// The statement shape of a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `// ...`
    Comment,

    /// `type name = literal`
    Variable {
        data_type: DataType,
        name: &'a str,
        value: &'a str,
    },

    /// `fix type name = literal`
    Constant {
        data_type: DataType,
        name: &'a str,
        value: &'a str,
    },

    /// `type name = [elements]`
    Array {
        data_type: DataType,
        name: &'a str,
        elements: &'a str,
    },

    /// `when name relop integer {`
    When { variable: &'a str },

    /// `then name relop integer {`
    Then { variable: &'a str },

    /// `otherwise {`
    Otherwise,

    /// `func name(params) [type] {`
    Function {
        name: &'a str,
        parameters: &'a str,
        return_type: ReturnType,
    },

    /// `yield [value]` or `return [value]`
    Return { value: Option<&'a str> },

    /// `}`
    BlockEnd,

    /// `hoop (name … integer, steps: integer) {`
    Hoop {
        variable: &'a str,
        end: &'a str,
        step: &'a str,
    },

    /// `while (name … integer) {`
    While { variable: &'a str, end: &'a str },

    /// `class Name [inherit Parent] {`
    Class {
        name: &'a str,
        parent: Option<&'a str>,
    },

    /// `abstract class Name {`
    AbstractClass { name: &'a str },

    /// `abstract [modifier] name(...) {`
    AbstractMethod { name: &'a str, signature: &'a str },

    /// `switch (name) {`
    Switch { variable: &'a str },

    /// `case literal:`
    Case { value: &'a str },

    /// Anything else.
    Other,
}

impl Statement<'_> {
    /// Returns true if this shape may be preceded by an access modifier.
    pub fn accepts_modifier(&self) -> bool {
        matches!(
            self,
            Self::Variable { .. }
                | Self::Constant { .. }
                | Self::Array { .. }
                | Self::Function { .. }
                | Self::Class { .. }
                | Self::AbstractMethod { .. }
        )
    }
}

/// A classified line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Line<'a> {
    /// Leading access modifier, if any.  [Line::statement] describes the
    /// rest of the line.
    pub modifier: Option<AccessModifier>,
    pub statement: Statement<'a>,
}

/// Classifies `line`, ignoring leading and trailing white space.
pub fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.starts_with("//") {
        return Line {
            modifier: None,
            statement: Statement::Comment,
        };
    }

    let mut cursor = Cursor(line);
    let modifier = cursor.keyword(AccessModifier::from_keyword);
    let statement = parse_statement(cursor.rest()).unwrap_or(Statement::Other);
    Line {
        modifier,
        statement,
    }
}

fn parse_statement(s: &str) -> Option<Statement<'_>> {
    if s == "}" {
        return Some(Statement::BlockEnd);
    }
    parse_declaration(s)
        .or_else(|| parse_conditional(s))
        .or_else(|| parse_function(s))
        .or_else(|| parse_return(s))
        .or_else(|| parse_loop(s))
        .or_else(|| parse_class(s))
        .or_else(|| parse_abstract(s))
        .or_else(|| parse_switch(s))
}

fn parse_declaration(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    let constant = cursor.word("fix");
    let data_type = cursor.keyword(DataType::from_keyword)?;
    let name = cursor.name()?;
    if !cursor.punct('=') {
        return None;
    }
    let value = cursor.rest().trim_end();
    if let Some(elements) = value.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        (!constant).then_some(Statement::Array {
            data_type,
            name,
            elements,
        })
    } else if !is_literal(value) {
        None
    } else if constant {
        Some(Statement::Constant {
            data_type,
            name,
            value,
        })
    } else {
        Some(Statement::Variable {
            data_type,
            name,
            value,
        })
    }
}

fn parse_conditional(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    if cursor.word("otherwise") {
        return (cursor.punct('{') && cursor.at_end()).then_some(Statement::Otherwise);
    }

    let is_when = cursor.word("when") || cursor.word("When");
    if !is_when && !cursor.word("then") {
        return None;
    }
    let variable = cursor.name()?;
    if !(cursor.relop() && cursor.digits().is_some() && cursor.punct('{') && cursor.at_end()) {
        return None;
    }
    Some(if is_when {
        Statement::When { variable }
    } else {
        Statement::Then { variable }
    })
}

/// Parses `(...)` followed by `{` at the start of `s`, with at most one
/// word between `)` and `{`.  The parenthesized text ends at the first `)`
/// for which that holds, so later parentheses on the line, as in a trailing
/// comment, do not matter.
///
/// Returns the text between the parentheses, the word (or `""`), and the
/// text that follows `{`.
fn parenthesized(s: &str) -> Option<(&str, &str, &str)> {
    let rest = s.trim_start().strip_prefix('(')?;
    rest.match_indices(')').find_map(|(close, _)| {
        let (between, after) = rest[close + 1..].split_once('{')?;
        let between = between.trim();
        between
            .chars()
            .all(is_name_char)
            .then_some((&rest[..close], between, after))
    })
}

fn is_parameter(parameter: &str) -> bool {
    let mut cursor = Cursor(parameter);
    if cursor.keyword(DataType::from_keyword).is_none() || cursor.name().is_none() {
        return false;
    }
    cursor.at_end() || (cursor.punct('=') && is_literal(cursor.rest().trim_end()))
}

fn parse_function(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    if !(cursor.word("func") || cursor.word("Func")) {
        return None;
    }
    let name = cursor.name()?;
    let (parameters, between, _) = parenthesized(cursor.rest())?;
    let parameters = parameters.trim();
    let valid_parameters = parameters
        .split(',')
        .map(str::trim)
        .enumerate()
        .all(|(index, parameter)| {
            is_parameter(parameter)
                || (parameter.is_empty() && (index == 0 || parameters.ends_with(',')))
        });
    if !valid_parameters {
        return None;
    }
    let return_type = match between {
        "" => ReturnType::Void,
        keyword => ReturnType::from_keyword(keyword)?,
    };
    Some(Statement::Function {
        name,
        parameters,
        return_type,
    })
}

fn parse_return(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    if !(cursor.word("yield") || cursor.word("return")) {
        return None;
    }
    let value = cursor.rest().trim_end();
    Some(Statement::Return {
        value: (!value.is_empty()).then_some(value),
    })
}

fn parse_loop(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    let is_hoop = cursor.word("hoop");
    if !is_hoop && !cursor.word("while") {
        return None;
    }
    if !cursor.punct('(') {
        return None;
    }
    let variable = cursor.name()?;
    if !cursor.punct('…') {
        return None;
    }
    let end = cursor.digits()?;
    let statement = if is_hoop {
        if !(cursor.punct(',') && cursor.word("steps") && cursor.punct(':')) {
            return None;
        }
        let step = cursor.digits()?;
        Statement::Hoop {
            variable,
            end,
            step,
        }
    } else {
        Statement::While { variable, end }
    };
    (cursor.punct(')') && cursor.punct('{')).then_some(statement)
}

fn parse_class(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    if !cursor.word("class") {
        return None;
    }
    let name = cursor.name()?;
    let parent = if cursor.word("inherit") {
        Some(cursor.name()?)
    } else {
        None
    };
    cursor.punct('{').then_some(Statement::Class { name, parent })
}

fn parse_abstract(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    if !cursor.word("abstract") {
        return None;
    }
    if cursor.word("class") {
        let name = cursor.name()?;
        return cursor
            .punct('{')
            .then_some(Statement::AbstractClass { name });
    }

    let _ = cursor.keyword(AccessModifier::from_keyword);
    let name = cursor.name()?;
    let (_, between, after) = parenthesized(cursor.rest())?;
    if !between.is_empty() {
        return None;
    }
    Some(Statement::AbstractMethod {
        name,
        signature: &s[..s.len() - after.len()],
    })
}

fn parse_switch(s: &str) -> Option<Statement<'_>> {
    let mut cursor = Cursor(s);
    if cursor.word("switch") {
        if !cursor.punct('(') {
            return None;
        }
        let variable = cursor.name()?;
        return (cursor.punct(')') && cursor.punct('{')).then_some(Statement::Switch { variable });
    }
    if cursor.word("case") {
        let value = cursor.rest().trim_end().strip_suffix(':')?.trim();
        return is_literal(value).then_some(Statement::Case { value });
    }
    None
}

/// A position within a line.  Every method skips leading white space before
/// looking at the input.
#[derive(Copy, Clone, Debug)]
struct Cursor<'a>(&'a str);

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        self.0.trim_start()
    }

    fn at_end(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn advance(&mut self, rest: &'a str) -> bool {
        self.0 = rest;
        true
    }

    /// Consumes `word` if it is the next whole word.
    fn word(&mut self, word: &str) -> bool {
        match self.rest().strip_prefix(word) {
            Some(rest) if !rest.starts_with(is_name_char) => self.advance(rest),
            _ => false,
        }
    }

    /// Consumes the next name if `f` maps it to a value.
    fn keyword<T>(&mut self, f: impl FnOnce(&'a str) -> Option<T>) -> Option<T> {
        let mut cursor = *self;
        let value = f(cursor.name()?)?;
        *self = cursor;
        Some(value)
    }

    fn name(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(|c| !is_name_char(c)).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        self.0 = &rest[end..];
        Some(&rest[..end])
    }

    fn punct(&mut self, c: char) -> bool {
        match self.rest().strip_prefix(c) {
            Some(rest) => self.advance(rest),
            None => false,
        }
    }

    fn digits(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        self.0 = &rest[end..];
        Some(&rest[..end])
    }

    /// Consumes a relational operator, loosely defined as any run of `<`,
    /// `>`, `=`, and `!`.
    fn relop(&mut self) -> bool {
        let rest = self.rest();
        let after = rest.trim_start_matches(['<', '>', '=', '!']);
        after.len() < rest.len() && self.advance(after)
    }
}
