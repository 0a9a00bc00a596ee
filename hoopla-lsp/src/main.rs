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

//! Language server that publishes Hoop diagnostics to editors.

use hoopla::{
    lex::scan,
    message::{Diagnostic, Severity},
    semantic::Checker,
    settings::Settings,
    source::normalize_newlines,
};
use log::{info, warn};
use tower_lsp::{
    jsonrpc::Result,
    lsp_types::{
        Diagnostic as LspDiagnostic, DiagnosticSeverity, DidChangeTextDocumentParams,
        DidCloseTextDocumentParams, DidOpenTextDocumentParams, InitializeParams,
        InitializeResult, InitializedParams, MessageType, Position, Range, ServerCapabilities,
        ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind, Url,
    },
    Client, LanguageServer, LspService, Server,
};

struct Backend {
    client: Client,
    settings: Settings,
}

impl Backend {
    fn new(client: Client, settings: Settings) -> Self {
        Self { client, settings }
    }

    async fn publish(&self, uri: Url, text: &str, version: Option<i32>) {
        let diagnostics = diagnose(text, &self.settings);
        info!("{uri}: {} diagnostics", diagnostics.len());
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }
}

/// Checks `text` and converts what it finds into LSP diagnostics.
fn diagnose(text: &str, settings: &Settings) -> Vec<LspDiagnostic> {
    let text = normalize_newlines(text);
    let text = &*text;
    let mut diagnostics = Vec::new();
    if settings.strict_lexing {
        diagnostics.extend(scan(text).1.into_iter().map(Diagnostic::lexical));
    }
    diagnostics.extend(Checker::new().check(text));
    diagnostics
        .iter()
        .map(|diagnostic| to_lsp(diagnostic, text))
        .collect()
}

/// Returns a range that covers all of 1-based `line` in `text`, whose line
/// ends must already be normalized to `\n`.
fn line_range(text: &str, line: usize) -> Range {
    let index = line.saturating_sub(1);
    let length = text
        .lines()
        .nth(index)
        .map_or(0, |line| line.encode_utf16().count());
    let index = u32::try_from(index).unwrap_or(u32::MAX);
    Range {
        start: Position::new(index, 0),
        end: Position::new(index, u32::try_from(length).unwrap_or(u32::MAX)),
    }
}

fn to_lsp(diagnostic: &Diagnostic, text: &str) -> LspDiagnostic {
    LspDiagnostic {
        range: line_range(text, diagnostic.line),
        severity: Some(match diagnostic.severity {
            Severity::Error => DiagnosticSeverity::ERROR,
            Severity::Warning => DiagnosticSeverity::WARNING,
            Severity::Note => DiagnosticSeverity::INFORMATION,
        }),
        source: Some(String::from("hoopla")),
        message: diagnostic.text(),
        ..LspDiagnostic::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: String::from("hoopla-lsp"),
                version: Some(String::from(env!("CARGO_PKG_VERSION"))),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..ServerCapabilities::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "hoopla-lsp initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        self.publish(document.uri, &document.text, Some(document.version))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // With full sync, the last change holds the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.publish(
                params.text_document.uri,
                &change.text,
                Some(params.text_document.version),
            )
            .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .publish_diagnostics(params.text_document.uri, Vec::new(), None)
            .await;
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::load(None).unwrap_or_else(|error| {
        warn!("{error}; using default settings");
        Settings::default()
    });

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) = LspService::new(|client| Backend::new(client, settings));
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    use hoopla::{message::Diagnostic, semantic::SemanticError, settings::Settings};
    use tower_lsp::lsp_types::{DiagnosticSeverity, Position};

    use super::{diagnose, line_range, to_lsp};

    #[test]
    fn ranges_cover_the_line() {
        let text = "int a = 1\nstring é = \"x\"\n";
        let range = line_range(text, 2);
        assert_eq!(range.start, Position::new(1, 0));
        assert_eq!(range.end, Position::new(1, 14));
        assert_eq!(line_range(text, 9).end, Position::new(8, 0));
    }

    #[test]
    fn carriage_returns() {
        let diagnostics = diagnose("int a = 1\rint a = 1", &Settings::default());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range.start, Position::new(1, 0));
        assert_eq!(diagnostics[0].range.end, Position::new(1, 9));
        assert_eq!(
            diagnostics[0].message,
            "Variable 'a' redeclared in the current scope."
        );
    }

    #[test]
    fn conversion() {
        let diagnostic = Diagnostic::semantic(1, SemanticError::VoidReturn);
        let converted = to_lsp(&diagnostic, "yield 1");
        assert_eq!(converted.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(converted.message, "Void function should not return a value.");
        assert_eq!(converted.range.end, Position::new(0, 7));
    }
}
