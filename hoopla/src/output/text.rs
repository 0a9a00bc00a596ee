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

use unicode_width::UnicodeWidthStr;

use crate::{lex::Token, message::Diagnostic};

use super::{Driver, TokenRecord};

const HEADINGS: [&str; 4] = ["Token No", "Class Part", "Value Part", "Line No"];

/// Columns never get narrower than this.
const MIN_WIDTHS: [usize; 4] = [8, 15, 12, 8];

/// Writes tokens as a fixed-width table and diagnostics one per line.
pub struct TextDriver {
    writer: Box<dyn Write>,
}

impl TextDriver {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }

    fn write_separator(&mut self, widths: &[usize; 4]) -> IoResult<()> {
        write!(self.writer, "+")?;
        for width in widths {
            write!(self.writer, "{}+", "-".repeat(width + 2))?;
        }
        writeln!(self.writer)
    }

    fn write_row(&mut self, cells: &[Cow<'_, str>; 4], widths: &[usize; 4]) -> IoResult<()> {
        write!(self.writer, "|")?;
        for (cell, width) in cells.iter().zip(widths) {
            let padding = width.saturating_sub(cell.width());
            write!(self.writer, " {cell}{} |", " ".repeat(padding))?;
        }
        writeln!(self.writer)
    }
}

/// Renders the cells of `record`.  Line breaks inside multiline strings
/// would break the table, so they are shown escaped.
fn cells<'a>(record: &TokenRecord<'a>) -> [Cow<'a, str>; 4] {
    let value = if record.value_part.contains(['\n', '\t']) {
        Cow::from(record.value_part.replace('\n', "\\n").replace('\t', "\\t"))
    } else {
        Cow::from(record.value_part)
    };
    [
        Cow::from(record.token_no.to_string()),
        Cow::from(record.class_part.as_str()),
        value,
        Cow::from(record.line_no.to_string()),
    ]
}

impl Driver for TextDriver {
    fn name(&self) -> Cow<'static, str> {
        Cow::from("text")
    }

    fn write_tokens(&mut self, tokens: &[Token]) -> IoResult<()> {
        let rows = TokenRecord::from_tokens(tokens)
            .map(|record| cells(&record))
            .collect::<Vec<_>>();
        let mut widths = MIN_WIDTHS;
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        self.write_separator(&widths)?;
        self.write_row(&HEADINGS.map(Cow::from), &widths)?;
        self.write_separator(&widths)?;
        for row in &rows {
            self.write_row(row, &widths)?;
            self.write_separator(&widths)?;
        }
        Ok(())
    }

    fn write_diagnostics(&mut self, diagnostics: &[Diagnostic]) -> IoResult<()> {
        for diagnostic in diagnostics {
            writeln!(self.writer, "{diagnostic}")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        lex::{Token, TokenClass},
        message::Diagnostic,
        output::{Driver, testing::SharedBuffer},
        semantic::SemanticError,
    };

    use super::TextDriver;

    #[test]
    fn token_table() {
        let buffer = SharedBuffer::default();
        let mut driver = TextDriver::new(Box::new(buffer.clone()));
        driver
            .write_tokens(&[
                Token::new(TokenClass::DataType, "int", 1),
                Token::new(TokenClass::Identifier, "x", 1),
            ])
            .unwrap();
        driver.flush().unwrap();
        assert_eq!(
            buffer.contents(),
            "\
+----------+-----------------+--------------+----------+
| Token No | Class Part      | Value Part   | Line No  |
+----------+-----------------+--------------+----------+
| 1        | data type       | int          | 1        |
+----------+-----------------+--------------+----------+
| 2        | identifier      | x            | 1        |
+----------+-----------------+--------------+----------+
"
        );
    }

    #[test]
    fn wide_values() {
        let buffer = SharedBuffer::default();
        let mut driver = TextDriver::new(Box::new(buffer.clone()));
        driver
            .write_tokens(&[
                Token::new(TokenClass::String, "\"a\nb\"", 1),
                Token::new(TokenClass::ArithmeticAssignmentOperator, "+=", 2),
            ])
            .unwrap();
        assert_eq!(
            buffer.contents(),
            "\
+----------+--------------------------------+--------------+----------+
| Token No | Class Part                     | Value Part   | Line No  |
+----------+--------------------------------+--------------+----------+
| 1        | string                         | \"a\\nb\"       | 1        |
+----------+--------------------------------+--------------+----------+
| 2        | arithmetic assignment operator | +=           | 2        |
+----------+--------------------------------+--------------+----------+
"
        );
    }

    #[test]
    fn diagnostics() {
        let buffer = SharedBuffer::default();
        let mut driver = TextDriver::new(Box::new(buffer.clone()));
        driver
            .write_diagnostics(&[Diagnostic::semantic(
                3,
                SemanticError::Undeclared { name: "y".into() },
            )])
            .unwrap();
        assert_eq!(
            buffer.contents(),
            "Semantic Error: Line 3 - Variable 'y' is undeclared.\n"
        );
    }
}
