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
    message::{Diagnostic, Emitter},
};
use log::info;

use crate::Common;

#[derive(Args, Clone, Debug)]
pub struct Tokens {
    #[command(flatten)]
    common: Common,

    /// Report characters that are not part of any token as warnings.
    #[arg(long)]
    strict: bool,
}

impl Tokens {
    pub fn run(self) -> Result<ExitCode> {
        let mut settings = self.common.settings()?;
        if self.strict {
            settings.strict_lexing = true;
        }

        let text = self.common.read_input()?;
        let (tokens, errors) = scan(&text);
        if settings.strict_lexing {
            let mut emitter = Emitter::new(settings.max_messages);
            for error in errors {
                let diagnostic = Diagnostic::lexical(error);
                if emitter.admit(&diagnostic) {
                    eprintln!("{diagnostic}");
                }
            }
            for note in emitter.notes() {
                eprintln!("{note}");
            }
        }

        let mut driver = self.common.driver(&settings)?;
        info!("writing {} tokens as {}", tokens.len(), driver.name());
        driver.write_tokens(&tokens)?;
        driver.flush()?;
        Ok(ExitCode::SUCCESS)
    }
}
