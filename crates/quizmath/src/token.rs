use std::ops::Range;

use strum_macros::IntoStaticStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub(crate) enum Kind {
    /// End of input.
    #[strum(serialize = "EOF")]
    Eof,
    /// A run of digits, possibly with decimal points, e.g. `3.14`.
    Number,
    /// A run of letters, e.g. `xy`.
    Identifier,
    /// A backslash command; the value is the name without the backslash.
    Command,
    /// Any other single character.
    Operator,
    /// The character `(`.
    OpenParen,
    /// The character `)`.
    CloseParen,
    /// The character `{`.
    OpenBrace,
    /// The character `}`.
    CloseBrace,
    /// The cell separator `&`.
    Ampersand,
    /// The row separator `\\`.
    Linefeed,
    /// The character `^`.
    Up,
    /// The character `_`.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'source> {
    pub kind: Kind,
    /// The text of the token. Empty for EOF.
    pub value: &'source str,
}

static_assertions::assert_eq_size!(Token<'_>, [usize; 3]);

impl<'source> Token<'source> {
    #[inline]
    pub(crate) const fn new(kind: Kind, value: &'source str) -> Self {
        Token { kind, value }
    }

    #[inline]
    pub(crate) fn is_command(&self, name: &str) -> bool {
        matches!(self.kind, Kind::Command) && self.value == name
    }

    /// A short description of the token for error messages, e.g. `Operator(+)` or `EOF`.
    pub(crate) fn describe(&self) -> Box<str> {
        let kind = <&str>::from(self.kind);
        if matches!(self.kind, Kind::Eof) {
            kind.into()
        } else {
            format!("{kind}({})", self.value).into_boxed_str()
        }
    }
}

/// A token together with the byte offset at which it starts in the source.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokLoc<'source>(pub usize, pub Token<'source>);

impl<'source> TokLoc<'source> {
    #[inline]
    pub(crate) fn token(&self) -> &Token<'source> {
        &self.1
    }

    /// The range of the source text covered by this token.
    pub(crate) fn span(&self) -> Range<usize> {
        let mut len = self.1.value.len();
        if matches!(self.1.kind, Kind::Command) {
            len += 1; // The backslash.
        }
        self.0..self.0 + len
    }
}
