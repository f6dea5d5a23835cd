use std::mem;

use mathml_renderer::{
    ast::{LeafKind, Node, Scripts},
    table::{Borders, ColumnAlignment, ColumnStyle, Table, TableRow},
};

use crate::{
    commands::{Command, get_command},
    error::{DelimiterModifier, LatexErrKind, LatexError},
    html_utils::escape_html_cow,
    lexer::Tokenizer,
    token::{Kind, TokLoc, Token},
};

pub(crate) struct Parser<'source> {
    l: Tokenizer<'source>,
}

/// The token that ends a sequence.
#[derive(Debug, Clone, Copy)]
enum SequenceEnd {
    Token(Kind),
    /// `\right`
    Right,
    /// `&`, `\\` or `}` inside a table.
    Cell,
}

impl SequenceEnd {
    #[inline]
    fn matches(self, other: &Token<'_>) -> bool {
        match self {
            SequenceEnd::Token(kind) => other.kind == kind,
            SequenceEnd::Right => other.is_command("right"),
            SequenceEnd::Cell => matches!(
                other.kind,
                Kind::Ampersand | Kind::Linefeed | Kind::CloseBrace
            ),
        }
    }

    /// The closing text that is missing if the input ends in this sequence.
    fn expected(self) -> &'static str {
        match self {
            SequenceEnd::Token(Kind::CloseParen) => ")",
            SequenceEnd::Token(Kind::CloseBrace) | SequenceEnd::Cell => "}",
            SequenceEnd::Token(_) => "EOF",
            SequenceEnd::Right => r"\right",
        }
    }
}

type ParseResult<T> = Result<T, Box<LatexError>>;

impl<'source> Parser<'source> {
    pub(crate) fn new(latex: &'source str) -> Self {
        Parser {
            l: Tokenizer::new(latex),
        }
    }

    /// Parse the whole input into a single node.
    #[inline]
    pub(crate) fn parse(&mut self) -> ParseResult<Node<'source>> {
        let (nodes, _) = self.parse_sequence(SequenceEnd::Token(Kind::Eof))?;
        Ok(Node::row(nodes))
    }

    /// Parse a sequence of tokens until the given end token is consumed.
    ///
    /// Returns the parsed nodes together with the end token.
    fn parse_sequence(
        &mut self,
        sequence_end: SequenceEnd,
    ) -> ParseResult<(Vec<Node<'source>>, TokLoc<'source>)> {
        let mut nodes = Vec::new();
        loop {
            let cur_tokloc = self.l.next();
            let tok = *cur_tokloc.token();
            if sequence_end.matches(&tok) {
                return Ok((nodes, cur_tokloc));
            }
            match tok.kind {
                Kind::Eof => {
                    return Err(Box::new(LatexError(
                        cur_tokloc.span(),
                        LatexErrKind::UnclosedGroup(sequence_end.expected()),
                    )));
                }
                Kind::Number => nodes.push(Node::number(tok.value)),
                Kind::Identifier => nodes.push(Node::identifier(tok.value)),
                Kind::Operator => nodes.push(Node::operator(escape_html_cow(tok.value))),
                Kind::OpenParen => {
                    let inner = self.parse_group(Kind::CloseParen)?;
                    nodes.push(Node::Row(vec![
                        Node::operator("("),
                        inner,
                        Node::operator(")"),
                    ]));
                }
                Kind::OpenBrace => match self.parse_group(Kind::CloseBrace)? {
                    Node::Empty => {}
                    group => nodes.push(group),
                },
                Kind::Command => match self.parse_command(cur_tokloc)? {
                    Node::Empty => {}
                    node => nodes.push(node),
                },
                Kind::Up | Kind::Down => {
                    let Some(base) = nodes.pop() else {
                        let ch = if matches!(tok.kind, Kind::Up) { '^' } else { '_' };
                        return Err(Box::new(LatexError(
                            cur_tokloc.span(),
                            LatexErrKind::MissingScriptBase(ch),
                        )));
                    };
                    nodes.push(self.parse_scripts(base, tok.kind)?);
                }
                Kind::CloseParen | Kind::CloseBrace | Kind::Ampersand | Kind::Linefeed => {
                    return Err(unexpected(cur_tokloc));
                }
            }
        }
    }

    /// Parse a group whose opening token has already been consumed.
    #[inline]
    fn parse_group(&mut self, close: Kind) -> ParseResult<Node<'source>> {
        let (nodes, _) = self.parse_sequence(SequenceEnd::Token(close))?;
        Ok(Node::row(nodes))
    }

    /// Parse an argument which fills a fixed position of its parent, like a numerator or a
    /// script.
    ///
    /// An empty argument becomes an empty `<mrow>`, so the parent keeps its arity.
    fn parse_argument(&mut self) -> ParseResult<Node<'source>> {
        Ok(match self.parse_optional_argument()? {
            Node::Empty => Node::Row(Vec::new()),
            node => node,
        })
    }

    /// Parse the argument of a command, which may be empty.
    ///
    /// A single number or identifier is taken as is; anything longer must be put in braces.
    fn parse_optional_argument(&mut self) -> ParseResult<Node<'source>> {
        let cur_tokloc = self.l.next();
        let tok = cur_tokloc.token();
        match tok.kind {
            Kind::Number => Ok(Node::number(tok.value)),
            Kind::Identifier => Ok(Node::identifier(tok.value)),
            Kind::OpenBrace => self.parse_group(Kind::CloseBrace),
            _ => Err(Box::new(LatexError(
                cur_tokloc.span(),
                LatexErrKind::ExpectedArgument(tok.describe()),
            ))),
        }
    }

    /// Parse the script after `^` or `_` (given as `first`), and the opposite script if it
    /// follows directly.
    fn parse_scripts(&mut self, base: Node<'source>, first: Kind) -> ParseResult<Node<'source>> {
        let first_script = self.parse_argument()?;
        let opposite = if matches!(first, Kind::Up) {
            Kind::Down
        } else {
            Kind::Up
        };
        let second_script = if self.l.peek().kind == opposite {
            self.l.next(); // Discard the `^` or `_`.
            Some(self.parse_argument()?)
        } else {
            None
        };
        let first_script = Box::new(first_script);
        let scripts = match (first, second_script) {
            (Kind::Up, None) => Scripts::Sup(first_script),
            (Kind::Up, Some(sub)) => Scripts::SubSup {
                sub: Box::new(sub),
                sup: first_script,
            },
            (_, None) => Scripts::Sub(first_script),
            (_, Some(sup)) => Scripts::SubSup {
                sub: first_script,
                sup: Box::new(sup),
            },
        };
        // Operators like `\sum` take their scripts below and above.
        Ok(if base.is_operator_leaf() {
            Node::UnderOver {
                base: Box::new(base),
                scripts,
            }
        } else {
            Node::Index {
                base: Box::new(base),
                scripts,
            }
        })
    }

    fn parse_command(&mut self, cur_tokloc: TokLoc<'source>) -> ParseResult<Node<'source>> {
        let name = cur_tokloc.token().value;
        let Some(command) = get_command(name) else {
            return unknown_command(cur_tokloc);
        };
        let node = match command {
            Command::Frac => {
                let top = self.parse_argument()?;
                let bottom = self.parse_argument()?;
                Node::Fraction {
                    top: Box::new(top),
                    bottom: Box::new(bottom),
                }
            }
            Command::Sqrt => Node::Sqrt(Box::new(self.parse_argument()?)),
            Command::Vec => Node::UnderOver {
                base: Box::new(self.parse_argument()?),
                scripts: Scripts::Sup(Box::new(Node::operator("&rarr;"))),
            },
            Command::Overset => {
                let over = self.parse_argument()?;
                Node::UnderOver {
                    base: Box::new(self.parse_argument()?),
                    scripts: Scripts::Sup(Box::new(over)),
                }
            }
            Command::Underset => {
                let under = self.parse_argument()?;
                Node::UnderOver {
                    base: Box::new(self.parse_argument()?),
                    scripts: Scripts::Sub(Box::new(under)),
                }
            }
            Command::Left => self.parse_left_right()?,
            Command::Right => return Err(unexpected(cur_tokloc)),
            Command::Table => self.parse_table()?,
            Command::Color => {
                let color = self.parse_text_argument()?;
                self.parse_optional_argument()?
                    .with_attribute("mathcolor", color)
            }
            Command::Attribute(attr, value) => {
                self.parse_optional_argument()?.with_attribute(attr, value)
            }
            Command::Symbol(kind, text) => Node::Leaf {
                kind,
                text: text.into(),
            },
            Command::Nothing => Node::Empty,
        };
        Ok(node)
    }

    /// Parse `<delim> ... \right<delim>` after `\left`.
    fn parse_left_right(&mut self) -> ParseResult<Node<'source>> {
        let open = self.parse_delimiter(DelimiterModifier::Left)?;
        let (nodes, _) = self.parse_sequence(SequenceEnd::Right)?;
        let close = self.parse_delimiter(DelimiterModifier::Right)?;
        let row = [open, Node::row(nodes), close]
            .into_iter()
            .filter(|node| !matches!(node, Node::Empty))
            .collect();
        Ok(Node::row(row))
    }

    fn parse_delimiter(&mut self, modifier: DelimiterModifier) -> ParseResult<Node<'source>> {
        let cur_tokloc = self.l.next();
        let tok = cur_tokloc.token();
        match tok.kind {
            Kind::Operator if tok.value == "." => Ok(Node::Empty),
            Kind::OpenParen | Kind::CloseParen | Kind::Operator => {
                Ok(Node::operator(escape_html_cow(tok.value)))
            }
            Kind::Command => match get_command(tok.value) {
                Some(Command::Symbol(LeafKind::Operator, text)) => Ok(Node::operator(text)),
                _ => Err(Box::new(LatexError(
                    cur_tokloc.span(),
                    LatexErrKind::ExpectedDelimiter(modifier, tok.describe()),
                ))),
            },
            _ => Err(Box::new(LatexError(
                cur_tokloc.span(),
                LatexErrKind::ExpectedDelimiter(modifier, tok.describe()),
            ))),
        }
    }

    /// Parse an argument as plain text, e.g. the color name in `\color{red}`.
    fn parse_text_argument(&mut self) -> ParseResult<String> {
        let cur_tokloc = self.l.next();
        let tok = cur_tokloc.token();
        match tok.kind {
            Kind::Identifier | Kind::Number => return Ok(tok.value.to_string()),
            Kind::OpenBrace => {}
            _ => {
                return Err(Box::new(LatexError(
                    cur_tokloc.span(),
                    LatexErrKind::ExpectedArgument(tok.describe()),
                )));
            }
        }
        let mut text = String::new();
        loop {
            let cur_tokloc = self.l.next();
            let tok = cur_tokloc.token();
            match tok.kind {
                Kind::CloseBrace => return Ok(text),
                Kind::Identifier | Kind::Number | Kind::Operator => text.push_str(tok.value),
                Kind::Eof => {
                    return Err(Box::new(LatexError(
                        cur_tokloc.span(),
                        LatexErrKind::UnclosedGroup("}"),
                    )));
                }
                _ => return Err(unexpected(cur_tokloc)),
            }
        }
    }

    /// Parse `[colspec]{ cell & cell \\ ... }` after `\table`.
    fn parse_table(&mut self) -> ParseResult<Node<'source>> {
        let columns = if self.l.peek() == Token::new(Kind::Operator, "[") {
            self.l.next(); // Discard the `[`.
            self.parse_column_spec()?
        } else {
            Vec::new()
        };

        let cur_tokloc = self.l.next();
        if !matches!(cur_tokloc.token().kind, Kind::OpenBrace) {
            return Err(Box::new(LatexError(
                cur_tokloc.span(),
                LatexErrKind::ExpectedArgument(cur_tokloc.token().describe()),
            )));
        }

        let mut rows = Vec::new();
        let mut cells = Vec::new();
        let mut top_border = false;
        loop {
            let (nodes, end) = self.parse_sequence(SequenceEnd::Cell)?;
            cells.push(Node::row(nodes));
            let finished = match end.token().kind {
                Kind::Ampersand => continue,
                Kind::CloseBrace => true,
                _ => false,
            };
            let cells = mem::take(&mut cells);
            if is_rule(&cells) {
                top_border = true;
            } else if !(finished && matches!(cells.as_slice(), [Node::Empty])) {
                rows.push(TableRow { cells, top_border });
                top_border = false;
            }
            if finished {
                break;
            }
        }
        Ok(Node::Table(Box::new(Table { rows, columns })))
    }

    /// Parse a column specification like `|l|cr` up to the closing `]`.
    ///
    /// A `|` before the first column is a left border of that column; any other `|` is a right
    /// border of the column before it.
    fn parse_column_spec(&mut self) -> ParseResult<Vec<ColumnStyle>> {
        let mut columns: Vec<ColumnStyle> = Vec::new();
        let mut leading_border = false;
        loop {
            let cur_tokloc = self.l.next();
            let tok = cur_tokloc.token();
            match tok.kind {
                // A border needs a column to belong to.
                Kind::Operator if tok.value == "]" && leading_border && columns.is_empty() => {
                    return Err(Box::new(LatexError(
                        cur_tokloc.span(),
                        LatexErrKind::ExpectedColSpec(tok.value.into()),
                    )));
                }
                Kind::Operator if tok.value == "]" => return Ok(columns),
                Kind::Operator if tok.value == "|" => match columns.last_mut() {
                    Some(column) => column.borders |= Borders::RIGHT,
                    None if !leading_border => leading_border = true,
                    None => {
                        return Err(Box::new(LatexError(
                            cur_tokloc.span(),
                            LatexErrKind::ExpectedColSpec(tok.value.into()),
                        )));
                    }
                },
                Kind::Identifier => {
                    for ch in tok.value.chars() {
                        let Some(align) = column_alignment(ch) else {
                            return Err(Box::new(LatexError(
                                cur_tokloc.span(),
                                LatexErrKind::ExpectedColSpec(tok.value.into()),
                            )));
                        };
                        let mut column = ColumnStyle::new(align);
                        if leading_border && columns.is_empty() {
                            column.borders = Borders::LEFT;
                        }
                        columns.push(column);
                    }
                }
                Kind::Eof => {
                    return Err(Box::new(LatexError(
                        cur_tokloc.span(),
                        LatexErrKind::UnclosedGroup("]"),
                    )));
                }
                _ => {
                    return Err(Box::new(LatexError(
                        cur_tokloc.span(),
                        LatexErrKind::ExpectedColSpec(tok.value.into()),
                    )));
                }
            }
        }
    }
}

#[inline]
fn column_alignment(ch: char) -> Option<ColumnAlignment> {
    match ch {
        'l' => Some(ColumnAlignment::Left),
        'c' => Some(ColumnAlignment::Center),
        'r' => Some(ColumnAlignment::Right),
        _ => None,
    }
}

/// A row consisting only of a single `-` is a horizontal rule.
fn is_rule(cells: &[Node]) -> bool {
    matches!(
        cells,
        [Node::Leaf { kind: LeafKind::Operator, text }] if text == "-"
    )
}

fn unknown_command<'source>(cur_tokloc: TokLoc<'source>) -> ParseResult<Node<'source>> {
    let name = cur_tokloc.token().value;
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(Box::new(LatexError(
            cur_tokloc.span(),
            LatexErrKind::ExpectedCommandName,
        ))),
        // Unknown names are taken to be entity names, e.g. `\eta` becomes `&eta;`.
        (Some(ch), _) if ch.is_alphabetic() => Ok(Node::identifier(format!("&{name};"))),
        // Escaped characters like `\$` or `\%` stand for themselves.
        _ => Ok(Node::operator(escape_html_cow(name))),
    }
}

fn unexpected(cur_tokloc: TokLoc<'_>) -> Box<LatexError> {
    Box::new(LatexError(
        cur_tokloc.span(),
        LatexErrKind::UnexpectedToken(cur_tokloc.token().describe()),
    ))
}
