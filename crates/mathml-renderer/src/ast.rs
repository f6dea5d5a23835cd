use std::borrow::Cow;
use std::fmt::{self, Write};

#[cfg(feature = "serde")]
use serde::Serialize;
use strum_macros::IntoStaticStr;

use super::attribute::AttrSet;
use super::fmt::new_line_and_indent;
use super::table::Table;

/// The element a [`Node::Leaf`] is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum LeafKind {
    #[strum(serialize = "mn")]
    Number,
    #[strum(serialize = "mi")]
    Identifier,
    #[strum(serialize = "mo")]
    Operator,
}

/// The scripts attached to a base, either in the corners (`Index`) or stacked
/// (`UnderOver`). For `UnderOver`, `sub` is the "under" part and `sup` the "over" part.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Scripts<'a> {
    Sub(Box<Node<'a>>),
    Sup(Box<Node<'a>>),
    SubSup {
        sub: Box<Node<'a>>,
        sup: Box<Node<'a>>,
    },
}

/// AST node
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node<'a> {
    /// `<mn>`, `<mi>` or `<mo>`. The text is inserted verbatim, so it must already be
    /// escaped (or be an entity reference like `&sum;`).
    Leaf { kind: LeafKind, text: Cow<'a, str> },
    /// Renders nothing.
    Empty,
    /// `<mrow>...</mrow>`. Construct this with [`Node::row`]; an empty row is only built
    /// directly, as the placeholder for an empty argument.
    Row(Vec<Node<'a>>),
    /// `<mfrac>...</mfrac>`
    Fraction {
        top: Box<Node<'a>>,
        bottom: Box<Node<'a>>,
    },
    /// `<msub>`, `<msup>` or `<msubsup>`
    Index {
        base: Box<Node<'a>>,
        scripts: Scripts<'a>,
    },
    /// `<munder>`, `<mover>` or `<munderover>`
    UnderOver {
        base: Box<Node<'a>>,
        scripts: Scripts<'a>,
    },
    /// `<msqrt>...</msqrt>`
    Sqrt(Box<Node<'a>>),
    /// `<mtable>...</mtable>`
    Table(Box<Table<'a>>),
    /// Adds attributes to the opening tag of `inner`.
    AddAttribute {
        attrs: AttrSet<'a>,
        inner: Box<Node<'a>>,
    },
}

static_assertions::const_assert!(std::mem::size_of::<Node<'static>>() <= 5 * std::mem::size_of::<usize>());

macro_rules! writeln_indent {
    ($buf:expr, $indent:expr, $($tail:tt)+) => {
        new_line_and_indent($buf, $indent);
        write!($buf, $($tail)+)?
    };
}

impl<'a> Node<'a> {
    #[inline]
    pub fn number(text: impl Into<Cow<'a, str>>) -> Self {
        Node::Leaf {
            kind: LeafKind::Number,
            text: text.into(),
        }
    }

    #[inline]
    pub fn identifier(text: impl Into<Cow<'a, str>>) -> Self {
        Node::Leaf {
            kind: LeafKind::Identifier,
            text: text.into(),
        }
    }

    #[inline]
    pub fn operator(text: impl Into<Cow<'a, str>>) -> Self {
        Node::Leaf {
            kind: LeafKind::Operator,
            text: text.into(),
        }
    }

    /// Build a row from a sequence of nodes.
    ///
    /// A sequence with a single node is that node, and an empty sequence is [`Node::Empty`].
    pub fn row(nodes: Vec<Node<'a>>) -> Self {
        match <[Node<'a>; 1]>::try_from(nodes) {
            Ok([node]) => node,
            Err(nodes) if nodes.is_empty() => Node::Empty,
            Err(nodes) => Node::Row(nodes),
        }
    }

    /// Build a row in which the children of any row among `items` are spliced in directly.
    ///
    /// `Empty` items are dropped.
    pub fn merge_row(items: impl IntoIterator<Item = Node<'a>>) -> Self {
        let mut nodes = Vec::new();
        for item in items {
            match item {
                Node::Row(children) => nodes.extend(children),
                Node::Empty => {}
                item => nodes.push(item),
            }
        }
        Node::row(nodes)
    }

    /// Join two operands with a binary operator.
    ///
    /// Chains of `+` and `-` are flattened into one row: an additive chain on the left of
    /// `+`/`-`, or on the right of `+`, is spliced into the result. An additive chain in any
    /// other position is put in parentheses.
    pub fn binary_op(left: Node<'a>, op: impl Into<Cow<'a, str>>, right: Node<'a>) -> Self {
        let op = op.into();
        let additive = matches!(op.as_ref(), "+" | "-");
        let left = if additive || !left.is_additive_chain() {
            left
        } else {
            left.parenthesized()
        };
        let right = if op == "+" || !right.is_additive_chain() {
            right
        } else {
            right.parenthesized()
        };
        Node::merge_row([left, Node::operator(op), right])
    }

    /// Wrap this node in literal parentheses.
    pub fn parenthesized(self) -> Self {
        Node::Row(vec![Node::operator("("), self, Node::operator(")")])
    }

    /// Add an attribute to this node.
    ///
    /// If this node already is an `AddAttribute`, the attribute is merged into it; a name
    /// that is already set keeps its value. `Empty` stays `Empty`.
    pub fn with_attribute(self, name: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        match self {
            Node::Empty => Node::Empty,
            Node::AddAttribute { mut attrs, inner } => {
                attrs.insert(name, value);
                Node::AddAttribute { attrs, inner }
            }
            node => {
                let mut attrs = AttrSet::new();
                attrs.insert(name, value);
                Node::AddAttribute {
                    attrs,
                    inner: Box::new(node),
                }
            }
        }
    }

    /// Returns `true` for `<mo>` leaves, which take stacked scripts.
    #[inline]
    pub fn is_operator_leaf(&self) -> bool {
        matches!(
            self,
            Node::Leaf {
                kind: LeafKind::Operator,
                ..
            }
        )
    }

    /// Returns `true` if this is a row with a `+` or `-` in an infix position.
    pub fn is_additive_chain(&self) -> bool {
        let Node::Row(nodes) = self else {
            return false;
        };
        nodes.iter().skip(1).any(|node| {
            matches!(
                node,
                Node::Leaf { kind: LeafKind::Operator, text } if matches!(text.as_ref(), "+" | "-")
            )
        })
    }

    /// Append the MathML for this node to `s`.
    ///
    /// With `base_indent == 0`, the output contains no whitespace between tags. Otherwise,
    /// every tag starts on a new line, indented by its depth plus `base_indent`.
    #[inline]
    pub fn emit(&self, s: &mut String, base_indent: usize) -> fmt::Result {
        self.emit_with_attrs(s, None, base_indent)
    }

    fn emit_with_attrs(
        &self,
        s: &mut String,
        attrs: Option<&AttrSet<'a>>,
        base_indent: usize,
    ) -> fmt::Result {
        let child_indent = deeper(base_indent);

        if !matches!(self, Node::Empty | Node::AddAttribute { .. }) {
            // Get the base indent out of the way.
            new_line_and_indent(s, base_indent);
        }

        match self {
            Node::Leaf { kind, text } => {
                let tag = <&str>::from(*kind);
                open_tag(s, tag, attrs)?;
                s.push_str(text);
                write!(s, "</{tag}>")?;
            }
            Node::Empty => {}
            Node::Row(nodes) => {
                open_tag(s, "mrow", attrs)?;
                for node in nodes {
                    node.emit(s, child_indent)?;
                }
                writeln_indent!(s, base_indent, "</mrow>");
            }
            Node::Fraction { top, bottom } => {
                open_tag(s, "mfrac", attrs)?;
                top.emit(s, child_indent)?;
                bottom.emit(s, child_indent)?;
                writeln_indent!(s, base_indent, "</mfrac>");
            }
            Node::Index { base, scripts } => {
                let tags = ["msub", "msup", "msubsup"];
                emit_scripts(s, tags, base, scripts, attrs, base_indent)?;
            }
            Node::UnderOver { base, scripts } => {
                let tags = ["munder", "mover", "munderover"];
                emit_scripts(s, tags, base, scripts, attrs, base_indent)?;
            }
            Node::Sqrt(inner) => {
                open_tag(s, "msqrt", attrs)?;
                inner.emit(s, child_indent)?;
                writeln_indent!(s, base_indent, "</msqrt>");
            }
            Node::Table(table) => {
                open_tag(s, "mtable", attrs)?;
                let cell_indent = deeper(child_indent);
                let content_indent = deeper(cell_indent);
                for row in &table.rows {
                    writeln_indent!(s, child_indent, "<mtr>");
                    for (column_idx, cell) in row.cells.iter().enumerate() {
                        new_line_and_indent(s, cell_indent);
                        table.write_mtd_open(s, column_idx, row.top_border);
                        cell.emit(s, content_indent)?;
                        writeln_indent!(s, cell_indent, "</mtd>");
                    }
                    writeln_indent!(s, child_indent, "</mtr>");
                }
                writeln_indent!(s, base_indent, "</mtable>");
            }
            Node::AddAttribute { attrs: own, inner } => match attrs {
                None => inner.emit_with_attrs(s, Some(own), base_indent)?,
                Some(outer) => {
                    let mut merged = own.clone();
                    merged.merge(outer.clone());
                    inner.emit_with_attrs(s, Some(&merged), base_indent)?;
                }
            },
        }
        Ok(())
    }
}

/// `tags` are the elements for a lone subscript, a lone superscript and both.
fn emit_scripts(
    s: &mut String,
    tags: [&str; 3],
    base: &Node,
    scripts: &Scripts,
    attrs: Option<&AttrSet>,
    base_indent: usize,
) -> fmt::Result {
    let child_indent = deeper(base_indent);
    let tag = match scripts {
        Scripts::Sub(_) => tags[0],
        Scripts::Sup(_) => tags[1],
        Scripts::SubSup { .. } => tags[2],
    };
    open_tag(s, tag, attrs)?;
    base.emit(s, child_indent)?;
    match scripts {
        Scripts::Sub(script) | Scripts::Sup(script) => {
            script.emit(s, child_indent)?;
        }
        Scripts::SubSup { sub, sup } => {
            sub.emit(s, child_indent)?;
            sup.emit(s, child_indent)?;
        }
    }
    writeln_indent!(s, base_indent, "</{tag}>");
    Ok(())
}

#[inline]
fn deeper(indent: usize) -> usize {
    if indent > 0 {
        indent.saturating_add(1)
    } else {
        0
    }
}

fn open_tag(s: &mut String, tag: &str, attrs: Option<&AttrSet>) -> fmt::Result {
    write!(s, "<{tag}")?;
    if let Some(attrs) = attrs {
        attrs.write_to(s)?;
    }
    s.push('>');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::table::{Borders, ColumnAlignment, ColumnStyle, TableRow};
    use super::*;

    pub fn render(node: &Node) -> String {
        let mut output = String::new();
        node.emit(&mut output, 0).unwrap();
        output
    }

    #[test]
    fn render_leaves() {
        assert_eq!(render(&Node::number("3.14")), "<mn>3.14</mn>");
        assert_eq!(render(&Node::identifier("x")), "<mi>x</mi>");
        assert_eq!(render(&Node::operator("&PlusMinus;")), "<mo>&PlusMinus;</mo>");
        assert_eq!(render(&Node::Empty), "");
        assert_eq!(render(&Node::Row(Vec::new())), "<mrow></mrow>");
    }

    #[test]
    fn row_of_one_is_no_row() {
        assert_eq!(Node::row(vec![Node::identifier("x")]), Node::identifier("x"));
        assert_eq!(Node::row(Vec::new()), Node::Empty);
        assert_eq!(
            render(&Node::row(vec![Node::identifier("x"), Node::operator("!")])),
            "<mrow><mi>x</mi><mo>!</mo></mrow>"
        );
    }

    #[test]
    fn render_scripts() {
        let sub = || Box::new(Node::identifier("n"));
        let sup = || Box::new(Node::number("2"));
        let base = || Box::new(Node::identifier("x"));
        assert_eq!(
            render(&Node::Index {
                base: base(),
                scripts: Scripts::Sub(sub()),
            }),
            "<msub><mi>x</mi><mi>n</mi></msub>"
        );
        assert_eq!(
            render(&Node::Index {
                base: base(),
                scripts: Scripts::Sup(sup()),
            }),
            "<msup><mi>x</mi><mn>2</mn></msup>"
        );
        assert_eq!(
            render(&Node::Index {
                base: base(),
                scripts: Scripts::SubSup {
                    sub: sub(),
                    sup: sup()
                },
            }),
            "<msubsup><mi>x</mi><mi>n</mi><mn>2</mn></msubsup>"
        );
        assert_eq!(
            render(&Node::UnderOver {
                base: Box::new(Node::operator("&sum;")),
                scripts: Scripts::SubSup {
                    sub: sub(),
                    sup: sup()
                },
            }),
            "<munderover><mo>&sum;</mo><mi>n</mi><mn>2</mn></munderover>"
        );
        assert_eq!(
            render(&Node::UnderOver {
                base: base(),
                scripts: Scripts::Sup(Box::new(Node::operator("&rarr;"))),
            }),
            "<mover><mi>x</mi><mo>&rarr;</mo></mover>"
        );
    }

    #[test]
    fn render_fraction_and_sqrt() {
        let node = Node::Sqrt(Box::new(Node::Fraction {
            top: Box::new(Node::number("1")),
            bottom: Box::new(Node::identifier("x")),
        }));
        assert_eq!(
            render(&node),
            "<msqrt><mfrac><mn>1</mn><mi>x</mi></mfrac></msqrt>"
        );
    }

    #[test]
    fn attributes_apply_to_wrapped_node_only() {
        let node = Node::row(vec![Node::identifier("a"), Node::identifier("b")])
            .with_attribute("mathcolor", "red")
            .with_attribute("mathvariant", "bold")
            .with_attribute("mathcolor", "blue");
        assert!(matches!(&node, Node::AddAttribute { inner, .. } if matches!(**inner, Node::Row(_))));
        assert_eq!(
            render(&node),
            r#"<mrow mathcolor="red" mathvariant="bold"><mi>a</mi><mi>b</mi></mrow>"#
        );
    }

    #[test]
    fn attributes_on_nothing() {
        assert_eq!(Node::Empty.with_attribute("mathcolor", "red"), Node::Empty);
    }

    #[test]
    fn nested_attribute_wrappers() {
        let inner = Node::identifier("x").with_attribute("mathcolor", "red");
        let node = Node::AddAttribute {
            attrs: [("mathcolor", Cow::Borrowed("blue")), ("displaystyle", Cow::Borrowed("true"))]
                .into_iter()
                .collect(),
            inner: Box::new(inner),
        };
        assert_eq!(
            render(&node),
            r#"<mi mathcolor="red" displaystyle="true">x</mi>"#
        );
    }

    #[test]
    fn flattening_law() {
        let id = |name: &'static str| Node::identifier(name);
        // ((a - b) + c) - d
        let chain = Node::binary_op(
            Node::binary_op(Node::binary_op(id("a"), "-", id("b")), "+", id("c")),
            "-",
            id("d"),
        );
        assert_eq!(
            render(&chain),
            "<mrow><mi>a</mi><mo>-</mo><mi>b</mi><mo>+</mo><mi>c</mi><mo>-</mo><mi>d</mi></mrow>"
        );
        // a + (b - c) needs no parentheses.
        assert_eq!(
            render(&Node::binary_op(
                id("a"),
                "+",
                Node::binary_op(id("b"), "-", id("c"))
            )),
            "<mrow><mi>a</mi><mo>+</mo><mi>b</mi><mo>-</mo><mi>c</mi></mrow>"
        );
    }

    #[test]
    fn chains_keep_parentheses_where_needed() {
        let id = |name: &'static str| Node::identifier(name);
        assert_eq!(
            render(&Node::binary_op(
                id("a"),
                "-",
                Node::binary_op(id("b"), "+", id("c"))
            )),
            "<mrow><mi>a</mi><mo>-</mo><mo>(</mo><mrow><mi>b</mi><mo>+</mo><mi>c</mi></mrow><mo>)</mo></mrow>"
        );
        assert_eq!(
            render(&Node::binary_op(
                Node::binary_op(id("a"), "+", id("b")),
                "*",
                id("c")
            )),
            "<mrow><mo>(</mo><mrow><mi>a</mi><mo>+</mo><mi>b</mi></mrow><mo>)</mo><mo>*</mo><mi>c</mi></mrow>"
        );
        // A leading minus sign does not make a chain.
        let negated = Node::row(vec![Node::operator("-"), id("x")]);
        assert!(!negated.is_additive_chain());
    }

    #[test]
    fn render_table() {
        let table = Table {
            rows: vec![
                TableRow {
                    cells: vec![Node::identifier("a"), Node::identifier("b")],
                    top_border: false,
                },
                TableRow {
                    cells: vec![Node::number("1"), Node::Empty],
                    top_border: true,
                },
            ],
            columns: vec![
                ColumnStyle {
                    align: ColumnAlignment::Left,
                    borders: Borders::RIGHT,
                },
                ColumnStyle::new(ColumnAlignment::Right),
            ],
        };
        assert_eq!(
            render(&Node::Table(Box::new(table))),
            concat!(
                "<mtable><mtr>",
                r#"<mtd style="text-align:left;border-right:1px solid black;"><mi>a</mi></mtd>"#,
                r#"<mtd style="text-align:right;"><mi>b</mi></mtd>"#,
                "</mtr><mtr>",
                r#"<mtd style="text-align:left;border-right:1px solid black;border-top:1px solid black;"><mn>1</mn></mtd>"#,
                r#"<mtd style="text-align:right;border-top:1px solid black;"></mtd>"#,
                "</mtr></mtable>"
            )
        );
    }

    #[test]
    fn pretty_print() {
        let node = Node::Fraction {
            top: Box::new(Node::row(vec![Node::identifier("a"), Node::operator("+")])),
            bottom: Box::new(Node::number("2")),
        };
        let mut output = String::new();
        node.emit(&mut output, 1).unwrap();
        assert_eq!(
            output,
            "\n    <mfrac>\n        <mrow>\n            <mi>a</mi>\n            <mo>+</mo>\n        </mrow>\n        <mn>2</mn>\n    </mfrac>"
        );
    }
}
