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

//! Report sinks for tokens and diagnostics.

use std::{
    borrow::Cow,
    io::{Result as IoResult, Write},
};

use serde::Serialize;

use crate::{
    lex::{Token, TokenClass},
    message::{Category, Diagnostic, Severity},
    settings::OutputFormat,
};

pub mod csv;
pub mod json;
pub mod text;

pub use self::{csv::CsvDriver, json::JsonDriver, text::TextDriver};

pub trait Driver {
    fn name(&self) -> Cow<'static, str>;

    /// Writes a numbered table of `tokens`.
    fn write_tokens(&mut self, tokens: &[Token]) -> IoResult<()>;

    /// Writes `diagnostics` in the order given.
    fn write_diagnostics(&mut self, diagnostics: &[Diagnostic]) -> IoResult<()>;

    /// Ensures that anything written so far has reached the underlying
    /// writer.
    fn flush(&mut self) -> IoResult<()>;
}

/// Returns a driver for `format` that writes to `writer`.
pub fn new_driver(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn Driver> {
    match format {
        OutputFormat::Text => Box::new(TextDriver::new(writer)),
        OutputFormat::Csv => Box::new(CsvDriver::new(writer)),
        OutputFormat::Json => Box::new(JsonDriver::new(writer)),
    }
}

/// One row of a token report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenRecord<'a> {
    /// 1-based position of the token in the stream.
    pub token_no: usize,
    pub class_part: TokenClass,
    pub value_part: &'a str,
    pub line_no: usize,
}

impl<'a> TokenRecord<'a> {
    /// Numbers `tokens` from 1.
    pub fn from_tokens(tokens: &'a [Token]) -> impl Iterator<Item = TokenRecord<'a>> + use<'a> {
        tokens.iter().enumerate().map(|(index, token)| TokenRecord {
            token_no: index + 1,
            class_part: token.class,
            value_part: &token.value,
            line_no: token.line,
        })
    }
}

/// One row of a diagnostic report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    pub line_no: usize,
    pub category: Category,
    pub severity: Severity,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticRecord {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            line_no: diagnostic.line,
            category: diagnostic.category(),
            severity: diagnostic.severity,
            message: diagnostic.text(),
        }
    }
}

#[cfg(test)]
mod testing {
    use std::{cell::RefCell, io::Write, rc::Rc};

    /// A writer whose contents remain readable after a driver takes
    /// ownership of it.
    #[derive(Clone, Default)]
    pub struct SharedBuffer(pub Rc<RefCell<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
