use super::ast::{Alignment, TableBlock, TableBody, TableHead, TableRow};
use super::row::{has_unescaped_pipe, split_row};
use super::separator::parse_separator;

/// Where a [`TableBlockParser`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParserState {
    AwaitHeader,
    AwaitSeparator,
    InBody,
    Closed,
}

#[derive(Clone, Debug)]
enum State {
    AwaitHeader,
    AwaitSeparator {
        header: Vec<String>,
    },
    InBody {
        alignments: Vec<Alignment>,
        head: TableRow,
        rows: Vec<TableRow>,
    },
    Closed,
}

/// Incremental builder for one table, owned by the block engine while the
/// table is the innermost open block.
#[derive(Clone, Debug)]
pub struct TableBlockParser {
    state: State,
}

impl Default for TableBlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBlockParser {
    pub fn new() -> Self {
        Self {
            state: State::AwaitHeader,
        }
    }

    /// Decide from a candidate header line and the line after it whether a
    /// table starts here. On success the parser is ready for body rows.
    pub fn try_start(header: &str, separator: &str) -> Option<Self> {
        if !has_unescaped_pipe(header) {
            return None;
        }
        let alignments = parse_separator(separator)?;
        let mut parser = Self::new();
        parser.header(header);
        parser.separator(alignments);
        log::debug!("table started with {} columns", parser.columns());
        Some(parser)
    }

    pub fn state(&self) -> ParserState {
        match self.state {
            State::AwaitHeader => ParserState::AwaitHeader,
            State::AwaitSeparator { .. } => ParserState::AwaitSeparator,
            State::InBody { .. } => ParserState::InBody,
            State::Closed => ParserState::Closed,
        }
    }

    /// Column count, zero until the separator has been accepted.
    pub fn columns(&self) -> usize {
        match &self.state {
            State::InBody { alignments, .. } => alignments.len(),
            _ => 0,
        }
    }

    fn header(&mut self, line: &str) {
        if let State::AwaitHeader = self.state {
            self.state = State::AwaitSeparator {
                header: split_row(line),
            };
        }
    }

    fn separator(&mut self, alignments: Vec<Alignment>) {
        if let State::AwaitSeparator { header } = std::mem::replace(&mut self.state, State::Closed)
        {
            let head = TableRow::from_spans(header, &alignments, true);
            self.state = State::InBody {
                alignments,
                head,
                rows: Vec::new(),
            };
        }
    }

    /// Append a body row. Returns `false` when the parser is not accepting rows.
    pub fn add_row(&mut self, line: &str) -> bool {
        match &mut self.state {
            State::InBody {
                alignments, rows, ..
            } => {
                rows.push(TableRow::from_spans(split_row(line), alignments, false));
                true
            }
            _ => false,
        }
    }

    /// Finish the table. Yields a block only if the separator was accepted.
    pub fn close(&mut self) -> Option<TableBlock> {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::InBody { head, rows, .. } => {
                log::debug!("table closed with {} body rows", rows.len());
                Some(TableBlock {
                    head: TableHead { row: head },
                    body: TableBody { rows },
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Content;

    fn raw_cells(row: &TableRow) -> Vec<&str> {
        row.cells
            .iter()
            .map(|c| c.content.raw().unwrap_or_default())
            .collect()
    }

    #[test]
    fn starts_on_header_and_separator() {
        let parser = TableBlockParser::try_start("Abc|Def", "---|---").unwrap();
        assert_eq!(parser.state(), ParserState::InBody);
        assert_eq!(parser.columns(), 2);
    }

    #[test]
    fn no_start_without_valid_separator() {
        assert!(TableBlockParser::try_start("Abc|Def", "--|--").is_none());
        assert!(TableBlockParser::try_start("Abc|Def", " |---|---").is_none());
        assert!(TableBlockParser::try_start("Abc|Def", "plain text").is_none());
    }

    #[test]
    fn no_start_without_pipe_in_header() {
        assert!(TableBlockParser::try_start("Abc", "|---|").is_none());
        assert!(TableBlockParser::try_start(r"Abc\|Def", "---|---").is_none());
    }

    #[test]
    fn header_reconciled_with_separator() {
        let mut parser = TableBlockParser::try_start("a|b|c", "---|---").unwrap();
        let table = parser.close().unwrap();
        assert_eq!(raw_cells(&table.head.row), ["a", "b"]);

        let mut parser = TableBlockParser::try_start("a|", "---|---|---").unwrap();
        let table = parser.close().unwrap();
        assert_eq!(raw_cells(&table.head.row), ["a", "", ""]);
    }

    #[test]
    fn body_rows_padded_and_truncated() {
        let mut parser = TableBlockParser::try_start("a|b", ":---|---:").unwrap();
        assert!(parser.add_row("1"));
        assert!(parser.add_row("1|2|3"));
        let table = parser.close().unwrap();
        assert_eq!(table.body.rows.len(), 2);
        assert_eq!(raw_cells(&table.body.rows[0]), ["1", ""]);
        assert_eq!(raw_cells(&table.body.rows[1]), ["1", "2"]);
        for row in &table.body.rows {
            assert!(!row.is_header());
            assert_eq!(row.cells[0].alignment, Alignment::Left);
            assert_eq!(row.cells[1].alignment, Alignment::Right);
        }
    }

    #[test]
    fn closed_parser_rejects_rows() {
        let mut parser = TableBlockParser::try_start("a|b", "---|---").unwrap();
        assert!(parser.close().is_some());
        assert_eq!(parser.state(), ParserState::Closed);
        assert!(!parser.add_row("1|2"));
        assert!(parser.close().is_none());
    }

    #[test]
    fn fresh_parser_never_yields_a_table() {
        let mut parser = TableBlockParser::new();
        assert_eq!(parser.state(), ParserState::AwaitHeader);
        assert!(!parser.add_row("a|b"));
        assert!(parser.close().is_none());
    }

    #[test]
    fn header_cells_are_raw_until_inline_pass() {
        let mut parser = TableBlockParser::try_start("*Abc*|Def", "---|---").unwrap();
        let table = parser.close().unwrap();
        assert_eq!(table.head.row.cells[0].content, Content::Raw("*Abc*".into()));
        assert!(table.head.row.is_header());
    }
}
