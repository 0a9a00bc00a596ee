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

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use hoopla::{
    lex::scan,
    message::{Diagnostic, Emitter, Severity},
    semantic::Checker,
};
use log::info;

use crate::Common;

#[derive(Args, Clone, Debug)]
pub struct Check {
    #[command(flatten)]
    common: Common,

    /// Also report characters that are not part of any token, as warnings.
    #[arg(long)]
    strict: bool,

    /// Maximum number of errors to display.  All of them still count toward
    /// the exit status.
    #[arg(long)]
    max_errors: Option<usize>,
}

impl Check {
    pub fn run(self) -> Result<ExitCode> {
        let mut settings = self.common.settings()?;
        if self.strict {
            settings.strict_lexing = true;
        }
        if let Some(max_errors) = self.max_errors {
            settings.max_messages[Severity::Error] = max_errors;
        }

        let text = self.common.read_input()?;
        let mut emitter = Emitter::new(settings.max_messages);
        let mut shown = Vec::new();
        let mut emit = |diagnostic: Diagnostic| {
            if emitter.admit(&diagnostic) {
                shown.push(diagnostic);
            }
        };
        if settings.strict_lexing {
            for error in scan(&text).1 {
                emit(Diagnostic::lexical(error));
            }
        }
        Checker::new().check_with(&text, &mut emit);

        let mut driver = self.common.driver(&settings)?;
        driver.write_diagnostics(&shown)?;
        driver.flush()?;
        for note in emitter.notes() {
            eprintln!("{note}");
        }

        let n_errors = emitter.count(Severity::Error);
        info!(
            "{n_errors} errors and {} warnings",
            emitter.count(Severity::Warning)
        );
        Ok(if n_errors > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }
}
