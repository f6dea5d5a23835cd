#[cfg(feature = "serde")]
use serde::Serialize;

use bitflags::bitflags;
use strum_macros::IntoStaticStr;

use super::ast::Node;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ColumnAlignment {
    #[strum(serialize = "text-align:left;")]
    Left,
    #[default]
    #[strum(serialize = "text-align:center;")]
    Center,
    #[strum(serialize = "text-align:right;")]
    Right,
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize))]
    pub struct Borders: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
    }
}

const BORDER_LEFT: &str = "border-left:1px solid black;";
const BORDER_RIGHT: &str = "border-right:1px solid black;";
const BORDER_TOP: &str = "border-top:1px solid black;";

/// The style of one table column, as given by a column specification like `|l|cr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ColumnStyle {
    pub align: ColumnAlignment,
    pub borders: Borders,
}

impl ColumnStyle {
    pub const fn new(align: ColumnAlignment) -> Self {
        ColumnStyle {
            align,
            borders: Borders::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TableRow<'a> {
    pub cells: Vec<Node<'a>>,
    /// Set for the first row after a horizontal rule.
    pub top_border: bool,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Table<'a> {
    pub rows: Vec<TableRow<'a>>,
    pub columns: Vec<ColumnStyle>,
}

impl Table<'_> {
    /// Write the opening `<mtd>` tag for the given cell, including its inline style.
    ///
    /// Cells in columns without a column specification get no alignment.
    pub(crate) fn write_mtd_open(&self, s: &mut String, column_idx: usize, top_border: bool) {
        let column = self.columns.get(column_idx);
        if column.is_none() && !top_border {
            s.push_str("<mtd>");
            return;
        }
        s.push_str("<mtd style=\"");
        if let Some(column) = column {
            s.push_str(<&str>::from(column.align));
            if column.borders.contains(Borders::LEFT) {
                s.push_str(BORDER_LEFT);
            }
            if column.borders.contains(Borders::RIGHT) {
                s.push_str(BORDER_RIGHT);
            }
        }
        if top_border {
            s.push_str(BORDER_TOP);
        }
        s.push_str("\">");
    }
}
