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

//! Identifiers that name Hoop variables, constants, arrays, functions, and
//! classes.

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
    ops::Deref,
};

use thiserror::Error as ThisError;

pub trait IdentifierChar {
    /// Returns true if `self` may be the first character in an identifier.
    fn may_start_id(self) -> bool;

    /// Returns true if `self` may be a second or subsequent character in an
    /// identifier.
    fn may_continue_id(self) -> bool;
}

impl IdentifierChar for char {
    fn may_start_id(self) -> bool {
        self.is_ascii_alphabetic()
    }

    fn may_continue_id(self) -> bool {
        self.is_ascii_alphanumeric()
    }
}

#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum Error {
    #[error("Identifier cannot be empty string.")]
    Empty,

    #[error("{string:?} may not be used as an identifier because it begins with disallowed character {c:?}.")]
    BadFirstCharacter { string: String, c: char },

    #[error(
        "{string:?} may not be used as an identifier because it contains disallowed character {c:?}."
    )]
    BadLaterCharacter { string: String, c: char },
}

/// A name that follows the naming rule: an ASCII letter followed by any
/// number of ASCII letters and digits.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        Self::check(&s)?;
        Ok(Self(s))
    }

    /// Checks whether `s` follows the naming rule, without allocating.
    pub fn check(s: &str) -> Result<(), Error> {
        let mut chars = s.chars();
        let Some(first) = chars.next() else {
            return Err(Error::Empty);
        };
        if !first.may_start_id() {
            return Err(Error::BadFirstCharacter {
                string: s.into(),
                c: first,
            });
        }
        if let Some(c) = chars.find(|c| !c.may_continue_id()) {
            return Err(Error::BadLaterCharacter {
                string: s.into(),
                c,
            });
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Identifier};

    #[test]
    fn valid() {
        for s in ["a", "aB", "i5", "Animal", "x0y1z2"] {
            assert_eq!(Identifier::new(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn invalid() {
        assert_eq!(Identifier::check(""), Err(Error::Empty));
        assert_eq!(
            Identifier::check("5a"),
            Err(Error::BadFirstCharacter {
                string: "5a".into(),
                c: '5'
            })
        );
        assert_eq!(
            Identifier::check("_a"),
            Err(Error::BadFirstCharacter {
                string: "_a".into(),
                c: '_'
            })
        );
        assert_eq!(
            Identifier::check("my_var"),
            Err(Error::BadLaterCharacter {
                string: "my_var".into(),
                c: '_'
            })
        );
        assert_eq!(
            Identifier::check("café"),
            Err(Error::BadLaterCharacter {
                string: "café".into(),
                c: 'é'
            })
        );
    }
}
