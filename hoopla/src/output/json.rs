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

use std::{
    borrow::Cow,
    io::{Result as IoResult, Write},
};

use crate::{lex::Token, message::Diagnostic};

use super::{DiagnosticRecord, Driver, TokenRecord};

/// Writes tokens or diagnostics as a pretty-printed JSON array of objects.
pub struct JsonDriver {
    writer: Box<dyn Write>,
}

impl JsonDriver {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl Driver for JsonDriver {
    fn name(&self) -> Cow<'static, str> {
        Cow::from("json")
    }

    fn write_tokens(&mut self, tokens: &[Token]) -> IoResult<()> {
        let records = TokenRecord::from_tokens(tokens).collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut self.writer, &records)?;
        writeln!(self.writer)
    }

    fn write_diagnostics(&mut self, diagnostics: &[Diagnostic]) -> IoResult<()> {
        let records = diagnostics
            .iter()
            .map(DiagnosticRecord::from)
            .collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut self.writer, &records)?;
        writeln!(self.writer)
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{
        lex::{Token, TokenClass},
        message::Diagnostic,
        output::{Driver, testing::SharedBuffer},
        semantic::SemanticError,
    };

    use super::JsonDriver;

    #[test]
    fn tokens() {
        let buffer = SharedBuffer::default();
        let mut driver = JsonDriver::new(Box::new(buffer.clone()));
        driver
            .write_tokens(&[Token::new(TokenClass::RangeOperator, "…", 7)])
            .unwrap();
        let value: Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(
            value,
            json!([{
                "token_no": 1,
                "class_part": "range operator",
                "value_part": "…",
                "line_no": 7,
            }])
        );
    }

    #[test]
    fn diagnostics() {
        let buffer = SharedBuffer::default();
        let mut driver = JsonDriver::new(Box::new(buffer.clone()));
        driver
            .write_diagnostics(&[Diagnostic::semantic(
                5,
                SemanticError::DuplicateCase { value: "1".into() },
            )])
            .unwrap();
        let value: Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(
            value,
            json!([{
                "line_no": 5,
                "category": "semantic",
                "severity": "error",
                "message": "Duplicate case value '1'.",
            }])
        );
    }
}
