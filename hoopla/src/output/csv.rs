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

use ::csv::{Writer, WriterBuilder};

use crate::{lex::Token, message::Diagnostic};

use super::{DiagnosticRecord, Driver, TokenRecord};

const TOKEN_FIELDS: [&str; 4] = ["token_no", "class_part", "value_part", "line_no"];
const DIAGNOSTIC_FIELDS: [&str; 4] = ["line_no", "category", "severity", "message"];

/// Writes each token or diagnostic as a CSV record, after a header record
/// naming the fields.  The header is written even if there are no records.
pub struct CsvDriver {
    writer: Writer<Box<dyn Write>>,
}

impl CsvDriver {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer: WriterBuilder::new().has_headers(false).from_writer(writer),
        }
    }
}

impl Driver for CsvDriver {
    fn name(&self) -> Cow<'static, str> {
        Cow::from("csv")
    }

    fn write_tokens(&mut self, tokens: &[Token]) -> IoResult<()> {
        self.writer.write_record(TOKEN_FIELDS)?;
        for record in TokenRecord::from_tokens(tokens) {
            self.writer.serialize(record)?;
        }
        Ok(())
    }

    fn write_diagnostics(&mut self, diagnostics: &[Diagnostic]) -> IoResult<()> {
        self.writer.write_record(DIAGNOSTIC_FIELDS)?;
        for diagnostic in diagnostics {
            self.writer.serialize(DiagnosticRecord::from(diagnostic))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()
    }
}
