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

//! Line-oriented semantic checking.
//!
//! The [Checker] walks the source one trimmed line at a time.  Each line is
//! classified into a [Statement] shape, which selects a rule that consults
//! and updates the [Registry].  Two scans then run over every non-comment
//! line regardless of its shape: one for assignments to constants and one for
//! out-of-bounds array indexes.
//!
//! There is no parse tree.  Blocks are approximated: every line that is just
//! `}` closes "the" open conditional, class, and function bodies at once,
//! without matching it to any particular opening line.

use log::{debug, info};

use crate::{
    identifier::Identifier,
    message::{Diagnostic, Diagnostics},
    source::normalize_newlines,
    syntax::{DataType, ReturnType},
};

mod error;
pub mod registry;
pub mod statement;

pub use error::SemanticError;
pub use registry::Registry;
pub use statement::{Line, Statement, classify};

/// Where the checker is within a `when`/`then`/`otherwise` sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConditionalState {
    /// No sequence is open.
    #[default]
    Idle,
    SawWhen,
    SawThen,

    /// The sequence was closed by `otherwise`.
    SawOtherwise,
}

impl ConditionalState {
    fn is_open(&self) -> bool {
        matches!(self, Self::SawWhen | Self::SawThen)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Checker {
    registry: Registry,
    conditional: ConditionalState,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn conditional_state(&self) -> ConditionalState {
        self.conditional
    }

    /// Checks `text` and returns all of the diagnostics, in the order found.
    pub fn check(&mut self, text: &str) -> Diagnostics {
        let mut diagnostics = Diagnostics::default();
        self.check_with(text, &mut |diagnostic| diagnostics.push(diagnostic));
        diagnostics
    }

    /// Checks `text`, passing each diagnostic to `sink` as it is found.
    ///
    /// Each call starts from empty symbol tables, so checking the same text
    /// twice yields the same diagnostics.  `\r\n`, `\r`, and `\n` all end a
    /// line.
    pub fn check_with(&mut self, text: &str, sink: &mut dyn FnMut(Diagnostic)) {
        *self = Self::new();
        let text = normalize_newlines(text);
        let mut n_diagnostics = 0;
        let mut lines = 0;
        for (index, line) in text.lines().enumerate() {
            lines += 1;
            self.check_line(line, &mut |error| {
                n_diagnostics += 1;
                sink(Diagnostic::semantic(index + 1, error))
            });
        }
        info!("checked {lines} lines with {n_diagnostics} diagnostics");
    }

    fn check_line(&mut self, line: &str, emit: &mut dyn FnMut(SemanticError)) {
        let Line {
            modifier,
            statement,
        } = classify(line);
        if statement == Statement::Comment {
            return;
        }
        debug!("{statement:?}");

        let statement = match modifier {
            Some(modifier) if !statement.accepts_modifier() => {
                emit(SemanticError::MisusedModifier { modifier });
                Statement::Other
            }
            _ => statement,
        };

        match statement {
            Statement::Comment | Statement::Other => (),
            Statement::Variable {
                data_type,
                name,
                value,
            } => self.declare(data_type, name, value, false, emit),
            Statement::Constant {
                data_type,
                name,
                value,
            } => self.declare(data_type, name, value, true, emit),
            Statement::Array {
                data_type,
                name,
                elements,
            } => self.declare_array(data_type, name, elements, emit),
            Statement::When { variable } => {
                if self.conditional.is_open() {
                    emit(SemanticError::WhenInOpenConditional);
                }
                self.conditional = ConditionalState::SawWhen;
                self.require_declared(variable, emit);
            }
            Statement::Then { .. } => {
                if self.conditional.is_open() {
                    self.conditional = ConditionalState::SawThen;
                } else {
                    emit(SemanticError::ThenWithoutWhen);
                    self.conditional = ConditionalState::Idle;
                }
            }
            Statement::Otherwise => {
                if self.conditional.is_open() {
                    self.conditional = ConditionalState::SawOtherwise;
                } else {
                    emit(SemanticError::OtherwiseWithoutWhen);
                    self.conditional = ConditionalState::Idle;
                }
            }
            Statement::Function {
                name,
                parameters,
                return_type,
            } => {
                check_name(name, emit);
                if let Err(error) = self.registry.declare_function(name, return_type, parameters) {
                    emit(error);
                }
            }
            Statement::Return { value } => self.check_return(value, emit),
            Statement::BlockEnd => self.close_block(emit),
            Statement::Hoop { variable, .. } | Statement::While { variable, .. } => {
                self.require_declared(variable, emit)
            }
            Statement::Class { name, parent } => {
                check_name(name, emit);
                if let Err(error) = self.registry.declare_class(name, parent) {
                    emit(error);
                }
            }
            Statement::AbstractClass { name } => {
                check_name(name, emit);
                if let Err(error) = self.registry.declare_abstract_class(name) {
                    emit(error);
                }
            }
            Statement::AbstractMethod { name, signature } => {
                check_name(name, emit);
                self.registry.add_obligation(signature);
            }
            Statement::Switch { variable } => {
                if let Err(error) = self.registry.open_switch(variable) {
                    emit(error);
                }
            }
            Statement::Case { value } => {
                if let Err(error) = self.registry.record_case(value) {
                    emit(error);
                }
            }
        }

        self.check_constant_reassignment(line, emit);
        self.check_array_accesses(line, emit);
    }

    fn declare(
        &mut self,
        data_type: DataType,
        name: &str,
        value: &str,
        is_constant: bool,
        emit: &mut dyn FnMut(SemanticError),
    ) {
        check_name(name, emit);
        if let Err(error) = self.registry.declare(name, data_type, is_constant) {
            emit(error);
        }
        check_value(data_type, value, emit);
    }

    fn declare_array(
        &mut self,
        data_type: DataType,
        name: &str,
        elements: &str,
        emit: &mut dyn FnMut(SemanticError),
    ) {
        check_name(name, emit);
        let elements = elements
            .split(',')
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        if let Err(error) = self.registry.declare_array(name, data_type, elements) {
            emit(error);
        }
        if let Some(array) = self.registry.array(name) {
            for element in &array.elements {
                check_value(data_type, element, emit);
            }
        }
    }

    fn require_declared(&self, name: &str, emit: &mut dyn FnMut(SemanticError)) {
        if !self.registry.is_declared(name) {
            emit(SemanticError::Undeclared { name: name.into() });
        }
    }

    /// Attributes a return to the first function that has not yet returned.
    /// Only a return that suits the function's type counts as its return.
    fn check_return(&mut self, value: Option<&str>, emit: &mut dyn FnMut(SemanticError)) {
        let Some((name, function)) = self.registry.current_function() else {
            return;
        };
        let result = match (function.return_type, value) {
            (ReturnType::Void, None) => Ok(()),
            (ReturnType::Void, Some(_)) => Err(SemanticError::VoidReturn),
            (ReturnType::Value(return_type), None) => Err(SemanticError::MissingReturnValue {
                function: name.into(),
                return_type,
            }),
            (ReturnType::Value(data_type), Some(value)) if !data_type.accepts(value) => {
                Err(SemanticError::InvalidReturnValue {
                    value: value.into(),
                    data_type,
                })
            }
            (ReturnType::Value(_), Some(_)) => Ok(()),
        };
        match result {
            Ok(()) => {
                let name = String::from(name);
                self.registry.record_return(&name);
            }
            Err(error) => emit(error),
        }
    }

    fn close_block(&mut self, emit: &mut dyn FnMut(SemanticError)) {
        if self.conditional.is_open() {
            emit(SemanticError::MissingOtherwise);
        }
        self.conditional = ConditionalState::Idle;

        for (function, _) in self.registry.missing_returns() {
            emit(SemanticError::MissingReturn {
                function: function.into(),
            });
        }

        if let Some((class, methods)) = self.registry.close_class() {
            for method in methods {
                emit(SemanticError::UnimplementedAbstractMethod {
                    class: class.clone(),
                    method: method.clone(),
                });
            }
        }
    }

    /// Flags `name = ...` when `name` is a constant.
    fn check_constant_reassignment(&self, line: &str, emit: &mut dyn FnMut(SemanticError)) {
        let words = line.split_whitespace().collect::<Vec<_>>();
        if let [name, "=", _, ..] = words.as_slice()
            && self.registry.is_constant(name)
        {
            emit(SemanticError::ConstantReassigned {
                name: String::from(*name),
            });
        }
    }

    /// Bounds-checks every `name[index]` on `line`.
    fn check_array_accesses(&self, line: &str, emit: &mut dyn FnMut(SemanticError)) {
        for (name, index) in array_accesses(line) {
            if let Err(error) = self.registry.bounds_check(name, index) {
                emit(error);
            }
        }
    }
}

/// Checks `text` with a fresh [Checker].
pub fn check(text: &str) -> Diagnostics {
    Checker::new().check(text)
}

fn check_name(name: &str, emit: &mut dyn FnMut(SemanticError)) {
    if let Err(reason) = Identifier::check(name) {
        emit(SemanticError::InvalidIdentifier {
            name: name.into(),
            reason,
        });
    }
}

fn check_value(data_type: DataType, value: &str, emit: &mut dyn FnMut(SemanticError)) {
    if !data_type.accepts(value) {
        emit(SemanticError::InvalidValue {
            value: value.into(),
            data_type,
        });
    }
}

/// Returns each `(name, index)` for array element references `name[index]`
/// in `line`, where `name` is a letter followed by letters and digits,
/// `index` is decimal digits, and white space may separate the name from
/// `[`.
fn array_accesses(line: &str) -> impl Iterator<Item = (&str, &str)> {
    line.match_indices('[').filter_map(move |(bracket, _)| {
        let after = &line[bracket + 1..];
        let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || !after[digits..].starts_with(']') {
            return None;
        }
        let index = &after[..digits];

        let before = line[..bracket].trim_end();
        let run = before.len()
            - before
                .trim_end_matches(|c: char| c.is_ascii_alphanumeric())
                .len();
        let run = &before[before.len() - run..];
        let start = run.find(|c: char| c.is_ascii_alphabetic())?;
        Some((&run[start..], index))
    })
}

#[cfg(test)]
mod tests;
