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
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use encoding_rs::Encoding;
use hoopla::{
    output::{Driver, new_driver},
    settings::{OutputFormat, Settings},
    source::read_source,
};
use log::LevelFilter;
use thiserror::Error as ThisError;

use crate::{check::Check, tokens::Tokens};

mod check;
mod tokens;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (may be repeated).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    /// Lists the tokens in a Hoop source file.
    Tokens(Tokens),

    /// Checks a Hoop source file for semantic errors.
    Check(Check),
}

impl Command {
    fn run(self) -> Result<ExitCode> {
        match self {
            Command::Tokens(tokens) => tokens.run(),
            Command::Check(check) => check.run(),
        }
    }
}

/// Input and output options shared by the subcommands.
#[derive(Args, Clone, Debug)]
struct Common {
    /// Input file name.
    input: PathBuf,

    /// Output file name (if omitted, output is written to stdout).
    output: Option<PathBuf>,

    /// Format for output file (if omitted, the intended format is inferred
    /// based on file extension).
    #[arg(short = 'O', value_enum)]
    output_format: Option<OutputFormat>,

    /// The encoding to use for reading the input file.
    #[arg(short = 'e', long, value_parser = parse_encoding)]
    encoding: Option<&'static Encoding>,

    /// Settings file (by default, `hoopla.toml` in the working directory is
    /// read if it exists).
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Common {
    fn settings(&self) -> Result<Settings> {
        Ok(Settings::load(self.config.as_deref())?)
    }

    fn read_input(&self) -> Result<String> {
        Ok(read_source(&self.input, self.encoding)?)
    }

    fn output_format(&self, settings: &Settings) -> OutputFormat {
        self.output_format
            .or_else(|| self.output.as_deref().map(OutputFormat::from))
            .or(settings.output_format)
            .unwrap_or_default()
    }

    fn driver(&self, settings: &Settings) -> Result<Box<dyn Driver>> {
        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("{}", path.display()))?,
            )),
            None => Box::new(stdout()),
        };
        Ok(new_driver(self.output_format(settings), writer))
    }
}

#[derive(ThisError, Debug)]
#[error("{0}: unknown encoding")]
struct UnknownEncodingError(String);

fn parse_encoding(arg: &str) -> Result<&'static Encoding, UnknownEncodingError> {
    match Encoding::for_label_no_replacement(arg.as_bytes()) {
        Some(encoding) => Ok(encoding),
        None => Err(UnknownEncodingError(arg.to_string())),
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    cli.command.run()
}
