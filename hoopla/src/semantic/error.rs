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

use thiserror::Error as ThisError;

use crate::{
    identifier::Error as IdError,
    syntax::{AccessModifier, DataType},
};

/// A problem found by the semantic pass.  Each variant's message is the text
/// shown after `Semantic Error: Line <n> - `.
#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Invalid identifier name '{name}'.")]
    InvalidIdentifier {
        name: String,
        #[source]
        reason: IdError,
    },

    #[error("Variable '{name}' redeclared in the current scope.")]
    Redeclared { name: String },

    #[error("Value '{value}' is not a valid {}.", .data_type.noun())]
    InvalidValue { value: String, data_type: DataType },

    #[error("'{modifier}' access modifier used incorrectly.")]
    MisusedModifier { modifier: AccessModifier },

    #[error("'When' statement found before closing previous conditional block.")]
    WhenInOpenConditional,

    #[error("'then' statement must follow a 'When' condition.")]
    ThenWithoutWhen,

    #[error("'otherwise' must follow a 'When' or 'then' condition.")]
    OtherwiseWithoutWhen,

    #[error("Conditional block missing 'otherwise' clause.")]
    MissingOtherwise,

    #[error("Function '{name}' redeclared.")]
    FunctionRedeclared { name: String },

    #[error("Return value '{value}' is not a valid {}.", .data_type.noun())]
    InvalidReturnValue { value: String, data_type: DataType },

    #[error("Void function should not return a value.")]
    VoidReturn,

    #[error("Function '{function}' must return a value of type '{return_type}'.")]
    MissingReturnValue {
        function: String,
        return_type: DataType,
    },

    #[error("Function '{function}' missing return statement.")]
    MissingReturn { function: String },

    #[error("Variable '{name}' is undeclared.")]
    Undeclared { name: String },

    #[error("Class '{name}' redeclared.")]
    ClassRedeclared { name: String },

    #[error("Abstract class '{name}' redeclared.")]
    AbstractClassRedeclared { name: String },

    #[error("Class '{class}' does not implement abstract method '{method}'.")]
    UnimplementedAbstractMethod { class: String, method: String },

    #[error("Cannot reassign constant '{name}'.")]
    ConstantReassigned { name: String },

    /// `index` is the decimal index with leading zeros removed.
    #[error("Index '{index}' out of bounds for array '{array}'.")]
    IndexOutOfBounds { array: String, index: String },

    #[error("Switch variable '{name}' is undeclared.")]
    SwitchUndeclared { name: String },

    #[error("Duplicate case value '{value}'.")]
    DuplicateCase { value: String },

    #[error("Case '{value}' without a valid switch.")]
    CaseWithoutSwitch { value: String },
}
