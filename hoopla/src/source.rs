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

//! Reading Hoop source text.

use std::{
    borrow::Cow,
    fs,
    io::Error as IoError,
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum SourceError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

/// Replaces `\r\n` and lone `\r` line ends in `input` by `\n`.
pub fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            chars.next_if_eq(&'\n');
            output.push('\n');
        } else {
            output.push(c);
        }
    }
    Cow::Owned(output)
}

/// Decodes `bytes` as `encoding` (UTF-8 if `None`), honoring a byte order
/// mark if one is present, and normalizes line ends.
pub fn decode_source(bytes: &[u8], encoding: Option<&'static Encoding>) -> String {
    let (text, actual, malformed) = encoding.unwrap_or(UTF_8).decode(bytes);
    debug!("decoded {} bytes as {}", bytes.len(), actual.name());
    if malformed {
        warn!(
            "input is not valid {}; malformed sequences were replaced",
            actual.name()
        );
    }
    normalize_newlines(&text).into_owned()
}

/// Reads and decodes the source file at `path`.
pub fn read_source(
    path: &Path,
    encoding: Option<&'static Encoding>,
) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_source(&bytes, encoding))
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use encoding_rs::WINDOWS_1252;

    use super::{decode_source, normalize_newlines};

    #[test]
    fn newlines() {
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed("a\nb")));
        assert_eq!(normalize_newlines("a\r\nb\rc\n\r\n"), "a\nb\nc\n\n");
    }

    #[test]
    fn decoding() {
        assert_eq!(decode_source(b"int a = 1\r\n", None), "int a = 1\n");
        assert_eq!(
            decode_source(b"\xef\xbb\xbfstring s = \"\xc3\xa9\"", None),
            "string s = \"é\""
        );
        assert_eq!(
            decode_source(b"string s = \"\xe9\"", Some(WINDOWS_1252)),
            "string s = \"é\""
        );
    }
}
