//! Pipe tables.
//!
//! ```text
//! | Name  | Score |
//! | :---- | ----: |
//! | Alice |    10 |
//! ```
//!
//! A table starts when a single-line paragraph containing `|` is followed by
//! a valid separator row, and runs until a blank line or the start of another
//! block. Rows are padded or truncated to the separator's column count.

mod ast;
mod parser;
mod render;
mod row;
mod separator;

pub use ast::{Alignment, TableBlock, TableBody, TableCell, TableHead, TableNode, TableRow};
pub use parser::{ParserState, TableBlockParser};
pub use row::split_row;
pub use separator::parse_separator;

pub(crate) use render::render_table;
