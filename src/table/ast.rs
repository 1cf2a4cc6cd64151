use crate::ast::Content;

/// Column alignment declared by the colons of a separator row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Value of the HTML `align` attribute, `None` when no attribute is emitted.
    #[inline]
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Right => Some("right"),
            Alignment::Center => Some("center"),
        }
    }
}

/// A parsed pipe table: one header row and zero or more body rows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableBlock {
    pub head: TableHead,
    pub body: TableBody,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableHead {
    pub row: TableRow,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableBody {
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableCell {
    pub content: Content,
    pub alignment: Alignment,
    pub header: bool,
}

impl TableBlock {
    /// Number of columns, fixed by the separator row.
    #[inline]
    pub fn columns(&self) -> usize {
        self.head.row.cells.len()
    }

    /// Per-column alignments, read back from the header cells.
    pub fn alignments(&self) -> Vec<Alignment> {
        self.head.row.cells.iter().map(|c| c.alignment).collect()
    }

    /// Every cell, header first, in document order.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> + '_ {
        std::iter::once(&self.head.row)
            .chain(self.body.rows.iter())
            .flat_map(|row| row.cells.iter())
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> + '_ {
        std::iter::once(&mut self.head.row)
            .chain(self.body.rows.iter_mut())
            .flat_map(|row| row.cells.iter_mut())
    }
}

impl TableRow {
    /// Builds a row from split spans, padding or truncating to `alignments.len()`.
    pub fn from_spans(spans: Vec<String>, alignments: &[Alignment], header: bool) -> Self {
        let mut spans = spans.into_iter();
        let cells = alignments
            .iter()
            .map(|&alignment| TableCell {
                content: Content::Raw(spans.next().unwrap_or_default()),
                alignment,
                header,
            })
            .collect();
        Self { cells }
    }

    #[inline]
    pub fn is_header(&self) -> bool {
        self.cells.first().is_some_and(|c| c.header)
    }
}

/// Closed set of table node kinds, the unit of dispatch for the renderer.
#[derive(Clone, Copy, Debug)]
pub enum TableNode<'a> {
    Block(&'a TableBlock),
    Head(&'a TableHead),
    Body(&'a TableBody),
    Row(&'a TableRow),
    Cell(&'a TableCell),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn pads_short_rows_with_empty_cells() {
        let row = TableRow::from_spans(spans(&["a"]), &[Alignment::Left, Alignment::Right], false);
        assert_eq!(row.cells.len(), 2);
        assert_eq!(row.cells[1].content, Content::Raw(String::new()));
        assert!(row.cells[1].content.is_empty());
        assert!(!row.cells[0].content.is_empty());
        assert_eq!(row.cells[1].alignment, Alignment::Right);
    }

    #[test]
    fn truncates_long_rows() {
        let row = TableRow::from_spans(spans(&["a", "b", "c"]), &[Alignment::None], true);
        assert_eq!(row.cells.len(), 1);
        assert_eq!(row.cells[0].content, Content::Raw("a".into()));
        assert!(row.is_header());
    }

    #[test]
    fn alignment_attribute_values() {
        assert_eq!(Alignment::None.as_attr(), None);
        assert_eq!(Alignment::Left.as_attr(), Some("left"));
        assert_eq!(Alignment::Right.as_attr(), Some("right"));
        assert_eq!(Alignment::Center.as_attr(), Some("center"));
    }

    #[test]
    fn cells_visit_header_then_body() {
        let aligns = [Alignment::None, Alignment::Center];
        let table = TableBlock {
            head: TableHead {
                row: TableRow::from_spans(spans(&["h1", "h2"]), &aligns, true),
            },
            body: TableBody {
                rows: vec![TableRow::from_spans(spans(&["b1"]), &aligns, false)],
            },
        };
        let raws: Vec<_> = table.cells().map(|c| c.content.raw().unwrap_or("?")).collect();
        assert_eq!(raws, ["h1", "h2", "b1", ""]);
        assert_eq!(table.columns(), 2);
        assert_eq!(table.alignments(), aligns);
    }
}
