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

//! Diagnostics produced by analysis.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use enum_iterator::{Sequence, all};
use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

use crate::{lex::ScanError, semantic::SemanticError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Enum, Sequence, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }

    pub fn as_title_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Note => "Note",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Which pass produced a diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lexical,
    Semantic,
}

impl Category {
    pub fn as_title_str(&self) -> &'static str {
        match self {
            Category::Lexical => "Lexical",
            Category::Semantic => "Semantic",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical(ScanError),
    Semantic(SemanticError),
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DiagnosticKind::Lexical(error) => write!(f, "{error}"),
            DiagnosticKind::Semantic(error) => write!(f, "{error}"),
        }
    }
}

/// A line-tagged, non-fatal problem found in the input.
#[derive(Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// 1-based line that triggered the diagnostic.
    pub line: usize,

    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn semantic(line: usize, error: SemanticError) -> Self {
        Self {
            severity: Severity::Error,
            line,
            kind: DiagnosticKind::Semantic(error),
        }
    }

    pub fn lexical(error: ScanError) -> Self {
        Self {
            severity: Severity::Warning,
            line: error.line(),
            kind: DiagnosticKind::Lexical(error),
        }
    }

    pub fn category(&self) -> Category {
        match self.kind {
            DiagnosticKind::Lexical(_) => Category::Lexical,
            DiagnosticKind::Semantic(_) => Category::Semantic,
        }
    }

    /// The message text, without the category and line prefix.
    pub fn text(&self) -> String {
        self.kind.to_string()
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {}: Line {} - {}",
            self.category().as_title_str(),
            self.severity.as_title_str(),
            self.line,
            self.kind
        )
    }
}

impl Debug for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self, f)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.0
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Returns the semantic errors with their line numbers, in the order they
    /// were found.
    pub fn semantic_errors(&self) -> Vec<(usize, SemanticError)> {
        self.0
            .iter()
            .filter_map(|diagnostic| match &diagnostic.kind {
                DiagnosticKind::Semantic(error) => Some((diagnostic.line, error.clone())),
                DiagnosticKind::Lexical(_) => None,
            })
            .collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(value: Diagnostic) -> Self {
        Self(vec![value])
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Decides which diagnostics to display, capping the number shown for each
/// severity.  Diagnostics beyond the cap are counted but not shown.
#[derive(Clone, Debug)]
pub struct Emitter {
    max_messages: EnumMap<Severity, usize>,
    counts: EnumMap<Severity, usize>,
}

impl Emitter {
    pub fn new(max_messages: EnumMap<Severity, usize>) -> Self {
        Self {
            max_messages,
            counts: EnumMap::default(),
        }
    }

    /// Counts `diagnostic` and returns true if it should be displayed.
    pub fn admit(&mut self, diagnostic: &Diagnostic) -> bool {
        let count = &mut self.counts[diagnostic.severity];
        *count += 1;
        *count <= self.max_messages[diagnostic.severity]
    }

    /// Returns the number of diagnostics with `severity` seen so far,
    /// including suppressed ones.
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity]
    }

    /// Returns the number of diagnostics with `severity` that were not
    /// displayed.
    pub fn suppressed(&self, severity: Severity) -> usize {
        self.counts[severity].saturating_sub(self.max_messages[severity])
    }

    /// Returns a note for each severity that had diagnostics suppressed.
    pub fn notes(&self) -> Vec<String> {
        all::<Severity>()
            .filter_map(|severity| match self.suppressed(severity) {
                0 => None,
                1 => Some(format!("Note: 1 more {severity} was not shown.")),
                n => Some(format!("Note: {n} more {severity}s were not shown.")),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use enum_map::enum_map;

    use crate::{lex::ScanError, semantic::SemanticError};

    use super::{Diagnostic, Diagnostics, Emitter, Severity};

    #[test]
    fn display() {
        assert_eq!(
            Diagnostic::semantic(4, SemanticError::ConstantReassigned { name: "a".into() })
                .to_string(),
            "Semantic Error: Line 4 - Cannot reassign constant 'a'."
        );
        assert_eq!(
            Diagnostic::lexical(ScanError::UnexpectedChar { c: '$', line: 7 }).to_string(),
            "Lexical Warning: Line 7 - Unexpected character '$' in input."
        );
    }

    #[test]
    fn has_errors() {
        let mut diagnostics = Diagnostics::default();
        assert!(!diagnostics.has_errors());
        diagnostics.push(Diagnostic::lexical(ScanError::UnexpectedChar {
            c: '#',
            line: 1,
        }));
        assert!(!diagnostics.has_errors());
        diagnostics.push(Diagnostic::semantic(2, SemanticError::VoidReturn));
        assert!(diagnostics.has_errors());
        assert_eq!(
            diagnostics.semantic_errors(),
            vec![(2, SemanticError::VoidReturn)]
        );
    }

    #[test]
    fn emitter_caps_per_severity() {
        let mut emitter = Emitter::new(enum_map! {
            Severity::Error => 2,
            Severity::Warning => 0,
            Severity::Note => 100,
        });
        let error = Diagnostic::semantic(1, SemanticError::VoidReturn);
        let warning = Diagnostic::lexical(ScanError::UnexpectedChar { c: '#', line: 1 });
        let admitted = [&error, &warning, &error, &error, &error]
            .into_iter()
            .filter(|diagnostic| emitter.admit(diagnostic))
            .count();
        assert_eq!(admitted, 2);
        assert_eq!(emitter.count(Severity::Error), 4);
        assert_eq!(emitter.suppressed(Severity::Error), 2);
        assert_eq!(
            emitter.notes(),
            vec![
                String::from("Note: 2 more errors were not shown."),
                String::from("Note: 1 more warning was not shown."),
            ]
        );
    }
}
