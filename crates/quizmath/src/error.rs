use std::fmt;
use std::ops::Range;

use strum_macros::IntoStaticStr;

use crate::html_utils::escape_html_content;

/// Represents an error that occurred during LaTeX parsing.
///
/// The range is the byte span of the offending token in the LaTeX source.
#[derive(Debug, Clone)]
pub struct LatexError(pub Range<usize>, pub(crate) LatexErrKind);

#[derive(Debug, Clone)]
pub(crate) enum LatexErrKind {
    UnexpectedToken(Box<str>),
    ExpectedArgument(Box<str>),
    UnclosedGroup(&'static str),
    MissingScriptBase(char),
    ExpectedDelimiter(DelimiterModifier, Box<str>),
    ExpectedColSpec(Box<str>),
    ExpectedCommandName,
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
pub enum DelimiterModifier {
    #[strum(serialize = r"\left")]
    Left,
    #[strum(serialize = r"\right")]
    Right,
}

impl LatexErrKind {
    /// Returns the error message as a string.
    pub fn string(&self) -> String {
        match self {
            LatexErrKind::UnexpectedToken(got) => "unexpected token: ".to_string() + got,
            LatexErrKind::ExpectedArgument(got) => "expected {, got ".to_string() + got,
            LatexErrKind::UnclosedGroup(expected) => {
                "expected \"".to_string() + expected + "\", got EOF"
            }
            LatexErrKind::MissingScriptBase(ch) => {
                let mut text = "'".to_string();
                text.push(*ch);
                text += "' without a preceding expression";
                text
            }
            LatexErrKind::ExpectedDelimiter(modifier, got) => {
                "expected a delimiter after \"".to_string()
                    + <&str>::from(*modifier)
                    + "\", got "
                    + got
            }
            LatexErrKind::ExpectedColSpec(got) => {
                "expected column specification, got \"".to_string() + got + "\""
            }
            LatexErrKind::ExpectedCommandName => "expected a command name after \"\\\"".to_string(),
        }
    }
}

impl LatexError {
    /// Format a LaTeX error as the inline HTML snippet that replaces a broken formula.
    ///
    /// Both the message and the offending LaTeX source are escaped.
    pub fn to_html(&self, latex: &str) -> String {
        let mut output = String::new();
        self.write_html(&mut output, latex);
        output
    }

    pub(crate) fn write_html(&self, output: &mut String, latex: &str) {
        output.push_str("<i>Error: ");
        escape_html_content(output, &self.1.string());
        output.push_str(" in: ");
        escape_html_content(output, latex);
        output.push_str("</i>");
    }

    pub fn error_message(&self) -> String {
        self.1.string()
    }
}

#[cfg(feature = "ariadne")]
impl LatexError {
    /// Convert this error into an [`ariadne::Report`] for pretty-printing.
    pub fn to_report<'name>(
        &self,
        source_name: &'name str,
        with_color: bool,
    ) -> ariadne::Report<'static, (&'name str, Range<usize>)> {
        use ariadne::{Label, Report, ReportKind};

        let label_msg = match &self.1 {
            LatexErrKind::UnexpectedToken(_) => "not valid here".into(),
            LatexErrKind::ExpectedArgument(_) => "expected an argument here".into(),
            LatexErrKind::UnclosedGroup(expected) => {
                format!("expected \"{expected}\" to close this group")
            }
            LatexErrKind::MissingScriptBase(_) => "nothing to attach this to".into(),
            LatexErrKind::ExpectedDelimiter(modifier, _) => {
                format!("expected a delimiter after \"{}\"", <&str>::from(*modifier))
            }
            LatexErrKind::ExpectedColSpec(_) => "expected a column spec here".into(),
            LatexErrKind::ExpectedCommandName => "incomplete command".into(),
        };

        let mut config = ariadne::Config::default().with_index_type(ariadne::IndexType::Byte);
        if !with_color {
            config = config.with_color(false);
        }
        Report::build(ReportKind::Error, (source_name, self.0.start..self.0.start))
            .with_config(config)
            .with_message(self.1.string())
            .with_label(Label::new((source_name, self.0.clone())).with_message(label_msg))
            .finish()
    }
}

impl fmt::Display for LatexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.start, self.1.string())
    }
}

impl std::error::Error for LatexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = LatexError(2..2, LatexErrKind::ExpectedArgument("EOF".into()));
        assert_eq!(err.error_message(), "expected {, got EOF");
        assert_eq!(err.to_string(), "2: expected {, got EOF");

        let err = LatexError(
            6..7,
            LatexErrKind::ExpectedDelimiter(DelimiterModifier::Left, "Identifier(x)".into()),
        );
        assert_eq!(
            err.error_message(),
            r#"expected a delimiter after "\left", got Identifier(x)"#
        );
        let err = LatexError(0..1, LatexErrKind::MissingScriptBase('^'));
        assert_eq!(err.error_message(), "'^' without a preceding expression");
    }

    #[test]
    fn html_is_escaped() {
        let err = LatexError(1..2, LatexErrKind::UnexpectedToken("CloseParen())".into()));
        assert_eq!(
            err.to_html("a<b)"),
            "<i>Error: unexpected token: CloseParen()) in: a&lt;b)</i>"
        );
    }
}
