use crate::token::{Kind, TokLoc, Token};

/// Splits a LaTeX math string into tokens.
///
/// Tokens are produced lazily. The tokenizer never fails: characters without a meaning of their
/// own become single-character operators, and reading past the end yields EOF again.
pub(crate) struct Tokenizer<'source> {
    input: &'source str,
    rest: &'source str,
    peek: Option<TokLoc<'source>>,
}

impl<'source> Tokenizer<'source> {
    pub(crate) fn new(input: &'source str) -> Self {
        Tokenizer {
            input,
            rest: input,
            peek: None,
        }
    }

    /// Return the next token and advance.
    pub(crate) fn next(&mut self) -> TokLoc<'source> {
        match self.peek.take() {
            Some(tok) => tok,
            None => self.read_token(),
        }
    }

    /// Return the next token without advancing.
    pub(crate) fn peek(&mut self) -> Token<'source> {
        if let Some(TokLoc(_, tok)) = self.peek {
            return tok;
        }
        let tokloc = self.read_token();
        self.peek = Some(tokloc);
        tokloc.1
    }

    #[inline]
    fn offset(&self) -> usize {
        self.input.len() - self.rest.len()
    }

    fn read_token(&mut self) -> TokLoc<'source> {
        self.rest = self.rest.trim_start();
        let loc = self.offset();
        let mut chars = self.rest.chars();
        let Some(ch) = chars.next() else {
            return TokLoc(loc, Token::new(Kind::Eof, ""));
        };
        let (kind, len) = match ch {
            '(' => (Kind::OpenParen, 1),
            ')' => (Kind::CloseParen, 1),
            '{' => (Kind::OpenBrace, 1),
            '}' => (Kind::CloseBrace, 1),
            '^' => (Kind::Up, 1),
            '_' => (Kind::Down, 1),
            '&' => (Kind::Ampersand, 1),
            '\\' => match chars.next() {
                Some('\\') => (Kind::Linefeed, 2),
                Some(next) if next.is_alphabetic() => {
                    let name = chars.as_str();
                    let name_len = next.len_utf8() + run_length(name, char::is_alphabetic);
                    (Kind::Command, 1 + name_len)
                }
                // Commands like `\{` or `\,` consist of one non-letter character.
                Some(next) => (Kind::Command, 1 + next.len_utf8()),
                None => (Kind::Command, 1),
            },
            ch if ch.is_numeric() => (
                Kind::Number,
                run_length(self.rest, |c| c.is_numeric() || c == '.'),
            ),
            ch if ch.is_alphabetic() => (Kind::Identifier, run_length(self.rest, char::is_alphabetic)),
            ch => (Kind::Operator, ch.len_utf8()),
        };
        let (text, rest) = self.rest.split_at(len);
        self.rest = rest;
        let value = if matches!(kind, Kind::Command) {
            text.strip_prefix('\\').unwrap_or(text)
        } else {
            text
        };
        TokLoc(loc, Token::new(kind, value))
    }
}

/// The length in bytes of the prefix of `s` whose characters all satisfy `pred`.
#[inline]
fn run_length(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.find(|c| !pred(c)).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<(Kind, &str)> {
        let mut tokenizer = Tokenizer::new(input);
        let mut result = Vec::new();
        loop {
            let TokLoc(_, tok) = tokenizer.next();
            if matches!(tok.kind, Kind::Eof) {
                break;
            }
            result.push((tok.kind, tok.value));
        }
        result
    }

    #[test]
    fn classify() {
        assert_eq!(
            tokens(r"x_{1,2}=-\frac{p}{2}"),
            [
                (Kind::Identifier, "x"),
                (Kind::Down, "_"),
                (Kind::OpenBrace, "{"),
                (Kind::Number, "1"),
                (Kind::Operator, ","),
                (Kind::Number, "2"),
                (Kind::CloseBrace, "}"),
                (Kind::Operator, "="),
                (Kind::Operator, "-"),
                (Kind::Command, "frac"),
                (Kind::OpenBrace, "{"),
                (Kind::Identifier, "p"),
                (Kind::CloseBrace, "}"),
                (Kind::OpenBrace, "{"),
                (Kind::Number, "2"),
                (Kind::CloseBrace, "}"),
            ]
        );
    }

    #[test]
    fn numbers_and_identifiers() {
        assert_eq!(
            tokens("3.14abc 2x"),
            [
                (Kind::Number, "3.14"),
                (Kind::Identifier, "abc"),
                (Kind::Number, "2"),
                (Kind::Identifier, "x"),
            ]
        );
        assert_eq!(tokens("äö ²"), [(Kind::Identifier, "äö"), (Kind::Number, "²")]);
    }

    #[test]
    fn commands() {
        assert_eq!(
            tokens(r"a \\ \alpha\{\,\"),
            [
                (Kind::Identifier, "a"),
                (Kind::Linefeed, r"\\"),
                (Kind::Command, "alpha"),
                (Kind::Command, "{"),
                (Kind::Command, ","),
                (Kind::Command, ""),
            ]
        );
    }

    #[test]
    fn structural_characters() {
        assert_eq!(
            tokens("( ) ^ _ & <"),
            [
                (Kind::OpenParen, "("),
                (Kind::CloseParen, ")"),
                (Kind::Up, "^"),
                (Kind::Down, "_"),
                (Kind::Ampersand, "&"),
                (Kind::Operator, "<"),
            ]
        );
    }

    #[test]
    fn peek_does_not_advance() {
        let mut tokenizer = Tokenizer::new("a b");
        assert_eq!(tokenizer.peek().value, "a");
        assert_eq!(tokenizer.peek().value, "a");
        assert_eq!(tokenizer.next().token().value, "a");
        let TokLoc(loc, tok) = tokenizer.next();
        assert_eq!((loc, tok.value), (2, "b"));
    }

    #[test]
    fn eof_is_repeatable() {
        let mut tokenizer = Tokenizer::new("  ");
        assert_eq!(tokenizer.next().token().kind, Kind::Eof);
        assert_eq!(tokenizer.peek().kind, Kind::Eof);
        let TokLoc(loc, tok) = tokenizer.next();
        assert_eq!((loc, tok.kind), (2, Kind::Eof));
    }
}
