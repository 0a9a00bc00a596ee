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

//! Symbol tables for one semantic analysis run.
//!
//! Scoping is flat: variables, constants, and arrays all live in a single
//! scope for the whole run, and nothing is ever removed from it.  Functions
//! and classes have their own tables.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::syntax::{DataType, ReturnType};

use super::SemanticError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub return_type: ReturnType,

    /// Parameter list as written.
    pub parameters: String,

    /// Whether a valid return has been seen for this function.
    pub has_return: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub parent: Option<String>,
    pub is_abstract: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Array {
    pub element_type: DataType,
    pub elements: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwitchContext {
    /// The variable named in the `switch` header.
    pub variable: String,

    /// Case values seen since the header.
    pub cases: IndexSet<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    scope: IndexMap<String, DataType>,
    constants: IndexSet<String>,
    arrays: IndexMap<String, Array>,
    functions: IndexMap<String, Function>,
    classes: IndexMap<String, Class>,

    /// Abstract method signatures declared by each abstract class.
    obligations: IndexMap<String, Vec<String>>,

    current_class: Option<String>,
    switch: Option<SwitchContext>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with `data_type` in the current scope.  If `name` is
    /// already declared, the new declaration replaces the old one and this
    /// returns an error.
    pub fn declare(
        &mut self,
        name: &str,
        data_type: DataType,
        is_constant: bool,
    ) -> Result<(), SemanticError> {
        debug!("declare {data_type} {name} (constant: {is_constant})");
        if is_constant {
            self.constants.insert(name.into());
        }
        match self.scope.insert(name.into(), data_type) {
            Some(_) => Err(SemanticError::Redeclared { name: name.into() }),
            None => Ok(()),
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.scope.contains_key(name)
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains(name)
    }

    pub fn type_of(&self, name: &str) -> Option<DataType> {
        self.scope.get(name).copied()
    }

    /// Declares function `name`.  A redeclaration is an error and leaves the
    /// first declaration in place.
    pub fn declare_function(
        &mut self,
        name: &str,
        return_type: ReturnType,
        parameters: &str,
    ) -> Result<(), SemanticError> {
        if self.functions.contains_key(name) {
            return Err(SemanticError::FunctionRedeclared { name: name.into() });
        }
        debug!("declare function {name}({parameters}) {return_type}");
        self.functions.insert(
            name.into(),
            Function {
                return_type,
                parameters: parameters.into(),
                has_return: false,
            },
        );
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Returns the function that a return statement belongs to: the first
    /// declared function that has not yet returned.
    pub fn current_function(&self) -> Option<(&str, &Function)> {
        self.functions
            .iter()
            .find(|(_, function)| !function.has_return)
            .map(|(name, function)| (name.as_str(), function))
    }

    pub fn record_return(&mut self, name: &str) {
        if let Some(function) = self.functions.get_mut(name) {
            debug!("function {name} returned");
            function.has_return = true;
        }
    }

    /// Returns the name and type of each non-void function that has not
    /// returned.
    pub fn missing_returns(&self) -> impl Iterator<Item = (&str, DataType)> {
        self.functions
            .iter()
            .filter(|(_, function)| !function.has_return)
            .filter_map(|(name, function)| match function.return_type {
                ReturnType::Value(data_type) => Some((name.as_str(), data_type)),
                ReturnType::Void => None,
            })
    }

    /// Declares class `name` and makes it the open class.
    pub fn declare_class(&mut self, name: &str, parent: Option<&str>) -> Result<(), SemanticError> {
        debug!("declare class {name} (parent: {parent:?})");
        self.current_class = Some(name.into());
        let class = Class {
            parent: parent.map(String::from),
            is_abstract: false,
        };
        match self.classes.insert(name.into(), class) {
            Some(_) => Err(SemanticError::ClassRedeclared { name: name.into() }),
            None => Ok(()),
        }
    }

    /// Declares abstract class `name` with no abstract methods yet, and makes
    /// it the open class.
    pub fn declare_abstract_class(&mut self, name: &str) -> Result<(), SemanticError> {
        debug!("declare abstract class {name}");
        self.current_class = Some(name.into());
        self.obligations.insert(name.into(), Vec::new());
        let class = Class {
            parent: None,
            is_abstract: true,
        };
        match self.classes.insert(name.into(), class) {
            Some(_) => Err(SemanticError::AbstractClassRedeclared { name: name.into() }),
            None => Ok(()),
        }
    }

    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn current_class(&self) -> Option<&str> {
        self.current_class.as_deref()
    }

    /// Adds abstract method `signature` to the open class, if it is
    /// abstract.  Returns true if it was added.
    pub fn add_obligation(&mut self, signature: &str) -> bool {
        let Some(obligations) = self
            .current_class
            .as_ref()
            .and_then(|class| self.obligations.get_mut(class))
        else {
            return false;
        };
        debug!("abstract method {signature}");
        obligations.push(signature.into());
        true
    }

    pub fn obligations(&self, class: &str) -> &[String] {
        self.obligations
            .get(class)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Closes the open class, if any, and returns its name and its abstract
    /// methods.
    pub fn close_class(&mut self) -> Option<(String, &[String])> {
        let class = self.current_class.take()?;
        debug!("close class {class}");
        let obligations = self.obligations(&class);
        Some((class, obligations))
    }

    /// Declares array `name`.  Redeclaration is handled as for
    /// [Registry::declare].
    pub fn declare_array(
        &mut self,
        name: &str,
        element_type: DataType,
        elements: Vec<String>,
    ) -> Result<(), SemanticError> {
        let result = self.declare(name, element_type, false);
        self.arrays.insert(
            name.into(),
            Array {
                element_type,
                elements,
            },
        );
        result
    }

    pub fn array(&self, name: &str) -> Option<&Array> {
        self.arrays.get(name)
    }

    /// Checks `index`, a string of decimal digits, against the bounds of
    /// array `name`.  Names that are not arrays always pass.
    pub fn bounds_check(&self, name: &str, index: &str) -> Result<(), SemanticError> {
        let Some(array) = self.arrays.get(name) else {
            return Ok(());
        };
        match index.parse::<usize>() {
            Ok(i) if i < array.elements.len() => Ok(()),
            _ => {
                let index = match index.trim_start_matches('0') {
                    "" => "0",
                    trimmed => trimmed,
                };
                Err(SemanticError::IndexOutOfBounds {
                    array: name.into(),
                    index: index.into(),
                })
            }
        }
    }

    /// Opens a new switch on `variable`, forgetting the cases of any previous
    /// switch.  The switch is opened even if `variable` is undeclared.
    pub fn open_switch(&mut self, variable: &str) -> Result<(), SemanticError> {
        debug!("switch on {variable}");
        self.switch = Some(SwitchContext {
            variable: variable.into(),
            cases: IndexSet::new(),
        });
        if self.is_declared(variable) {
            Ok(())
        } else {
            Err(SemanticError::SwitchUndeclared {
                name: variable.into(),
            })
        }
    }

    pub fn switch(&self) -> Option<&SwitchContext> {
        self.switch.as_ref()
    }

    /// Records case `value` in the open switch.
    pub fn record_case(&mut self, value: &str) -> Result<(), SemanticError> {
        let Some(switch) = &mut self.switch else {
            return Err(SemanticError::CaseWithoutSwitch {
                value: value.into(),
            });
        };
        if switch.cases.insert(value.into()) {
            Ok(())
        } else {
            Err(SemanticError::DuplicateCase {
                value: value.into(),
            })
        }
    }
}
