//! Convert the LaTeX math found in quiz texts to MathML.
//!
//! Only a fixed subset of LaTeX is understood: fractions, roots, scripts, `\left`/`\right`
//! groups, simple tables, a handful of styling commands and a table of named symbols. Unknown
//! commands are not errors; `\foo` is rendered as the entity `&foo;`.
//!
//! # Usage
//!
//! Single formulas are converted with [`Converter::convert`]. Texts in which formulas are
//! delimited by `$` are converted with [`Converter::scan`], or with [`scan_and_render`] for the
//! default configuration.
//!
//! ```rust
//! use quizmath::{Config, Converter, MathDisplay};
//!
//! let converter = Converter::new(Config::default());
//! let mathml = converter.convert(r"\frac{a}{2}", MathDisplay::Inline).unwrap();
//! assert_eq!(
//!     mathml,
//!     r#"<math xmlns="&mathml;"><mfrac><mi>a</mi><mn>2</mn></mfrac></math>"#
//! );
//!
//! let html = converter.scan("Solve $x^2=4$ for $$x$$.", MathDisplay::Inline);
//! assert_eq!(
//!     html,
//!     r#"Solve <math xmlns="&mathml;"><mrow><msup><mi>x</mi><mn>2</mn></msup><mo>=</mo><mn>4</mn></mrow></math> for $x$."#
//! );
//! ```
//!
//! # Features
//!
//! - `serde`: With this feature, `Config` implements serde's `Deserialize`.
//! - `ariadne`: With this feature, `LatexError` can be turned into an `ariadne::Report`.
//!
mod commands;
mod error;
mod html_utils;
mod lecture;
mod lexer;
mod parser;
mod scanner;
mod token;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use mathml_renderer::ast::{LeafKind, Node, Scripts};

pub use self::error::{DelimiterModifier, LatexError};
pub use self::lecture::LectureRef;
use self::parser::Parser;

/// Display mode for the LaTeX math equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathDisplay {
    /// For formulas inside running text.
    Inline,
    /// For formulas set apart on their own line.
    Block,
}

/// Configuration for pretty-printing the MathML output.
///
/// Pretty-printing means that newlines and indentation is added to the MathML output, to make it
/// easier to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[non_exhaustive]
pub enum PrettyPrint {
    /// Never pretty print.
    #[default]
    Never,
    /// Always pretty print.
    Always,
    /// Pretty print for block equations only.
    Auto,
}

/// Configuration object for the conversion.
///
/// # Example usage
///
/// ```rust
/// use quizmath::{Config, PrettyPrint};
///
/// // Default values
/// let config = Config::default();
///
/// // Pretty-print block formulas and use the real MathML namespace
/// let config = Config {
///     pretty_print: PrettyPrint::Auto,
///     xml_namespace: Some("http://www.w3.org/1998/Math/MathML".to_string()),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Config {
    /// A configuration for pretty-printing the MathML output. See [`PrettyPrint`] for details.
    pub pretty_print: PrettyPrint,
    /// The value of the `xmlns` attribute of the `<math>` tag, or `None` to leave it out.
    ///
    /// Defaults to the entity `&mathml;`, which the page templates define.
    pub xml_namespace: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pretty_print: PrettyPrint::default(),
            xml_namespace: Some("&mathml;".to_string()),
        }
    }
}

/// A converter that transforms LaTeX math into MathML.
///
/// The converter holds no state besides its configuration, so it can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Converter { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert a single formula to a complete `<math>` element.
    ///
    /// ```rust
    /// use quizmath::{Config, Converter, MathDisplay};
    ///
    /// let converter = Converter::new(Config { xml_namespace: None, ..Default::default() });
    /// let mathml = converter.convert(r"\sqrt{2}", MathDisplay::Block).unwrap();
    /// assert_eq!(mathml, r#"<math display="block"><msqrt><mn>2</mn></msqrt></math>"#);
    /// ```
    pub fn convert(&self, latex: &str, display: MathDisplay) -> Result<String, Box<LatexError>> {
        let node = parse_latex(latex)?;
        let mut output = String::new();
        self.write_math(&mut output, &node, display);
        Ok(output)
    }

    /// Convert all `$`-delimited formulas in `text`, leaving the rest of the text untouched.
    ///
    /// `$$` is replaced by a single `$`. A formula that cannot be parsed is replaced by an error
    /// message (see [`LatexError::to_html`]); the other formulas are not affected.
    pub fn scan(&self, text: &str, display: MathDisplay) -> String {
        scanner::scan_dollars(text, |output, latex| match parse_latex(latex) {
            Ok(node) => self.write_math(output, &node, display),
            Err(err) => err.write_html(output, latex),
        })
    }

    fn write_math(&self, output: &mut String, node: &Node, display: MathDisplay) {
        output.push_str("<math");
        if matches!(display, MathDisplay::Block) {
            output.push_str(" display=\"block\"");
        }
        if let Some(namespace) = &self.config.xml_namespace {
            output.push_str(" xmlns=\"");
            output.push_str(namespace);
            output.push('"');
        }
        output.push('>');

        let pretty_print = matches!(self.config.pretty_print, PrettyPrint::Always)
            || (matches!(self.config.pretty_print, PrettyPrint::Auto)
                && display == MathDisplay::Block);

        let base_indent = if pretty_print { 1 } else { 0 };
        // Writing to a `String` cannot fail.
        let _ = node.emit(output, base_indent);
        if pretty_print {
            output.push('\n');
        }
        output.push_str("</math>");
    }
}

/// Parse a formula, without `$` delimiters, into its MathML tree.
///
/// ```rust
/// use quizmath::{Node, parse_latex};
///
/// assert_eq!(parse_latex("x").unwrap(), Node::identifier("x"));
/// assert!(parse_latex(r"\frac{1}").is_err());
/// ```
pub fn parse_latex(latex: &str) -> Result<Node<'_>, Box<LatexError>> {
    Parser::new(latex).parse()
}

/// Convert a formula to its MathML content, without the enclosing `<math>` element.
pub fn latex_to_mathml_string(latex: &str) -> Result<String, Box<LatexError>> {
    let node = parse_latex(latex)?;
    let mut output = String::new();
    let _ = node.emit(&mut output, 0);
    Ok(output)
}

/// Render the `$`-delimited formulas in a text of the given lecture as inline MathML.
///
/// This uses the default [`Config`].
pub fn scan_and_render(text: &str, _lecture: &LectureRef) -> String {
    Converter::default().scan(text, MathDisplay::Inline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers() {
        let converter = Converter::default();
        assert_eq!(
            converter.convert("x", MathDisplay::Inline).unwrap(),
            r#"<math xmlns="&mathml;"><mi>x</mi></math>"#
        );
        assert_eq!(
            converter.convert("x", MathDisplay::Block).unwrap(),
            r#"<math display="block" xmlns="&mathml;"><mi>x</mi></math>"#
        );
    }

    #[test]
    fn pretty_print_auto() {
        let converter = Converter::new(Config {
            pretty_print: PrettyPrint::Auto,
            ..Default::default()
        });
        assert_eq!(
            converter.convert("x+1", MathDisplay::Inline).unwrap(),
            r#"<math xmlns="&mathml;"><mrow><mi>x</mi><mo>+</mo><mn>1</mn></mrow></math>"#
        );
        assert_eq!(
            converter.convert("x+1", MathDisplay::Block).unwrap(),
            "<math display=\"block\" xmlns=\"&mathml;\">\n    <mrow>\n        <mi>x</mi>\n        <mo>+</mo>\n        <mn>1</mn>\n    </mrow>\n</math>"
        );
    }

    #[test]
    fn fragment() {
        assert_eq!(
            latex_to_mathml_string("1+2").unwrap(),
            "<mrow><mn>1</mn><mo>+</mo><mn>2</mn></mrow>"
        );
    }

    #[test]
    fn scan_isolates_errors() {
        let lecture = LectureRef::new("test");
        assert_eq!(
            scan_and_render("$x^$ and $y$", &lecture),
            r#"<i>Error: expected {, got EOF in: x^</i> and <math xmlns="&mathml;"><mi>y</mi></math>"#
        );
    }
}
