mod leaf_blocks;
mod parser;

use leaf_blocks::*;

use crate::ast::{Block, Content};
use crate::html::trim_cr;
use crate::inline::{parse_document_inlines, unescape_string};
use crate::render::render_html;
use crate::table::TableBlockParser;
use crate::{Extension, ParseOptions};
use std::borrow::Cow;

/// Parse a Markdown string and return the rendered HTML.
///
/// # Examples
///
/// ```
/// use pipemark::{parse, ParseOptions};
///
/// let html = parse("| a | b |\n|---|:---:|\n| *x* | y |", &ParseOptions::default());
/// assert!(html.contains("<td><em>x</em></td>"));
/// ```
pub fn parse(markdown: &str, options: &ParseOptions) -> String {
    let doc = parse_to_ast(markdown, options);
    render_html(&doc, options)
}

/// Parse a Markdown string and return the block-level AST with inline
/// content already resolved.
///
/// # Examples
///
/// ```
/// use pipemark::{parse_to_ast, Block, ParseOptions};
///
/// let ast = parse_to_ast("a|b\n---|---", &ParseOptions::default());
/// match &ast {
///     Block::Document { children } => assert!(matches!(children[0], Block::Table(_))),
///     _ => panic!("expected Document"),
/// }
/// ```
pub fn parse_to_ast(markdown: &str, options: &ParseOptions) -> Block {
    let mut doc = parse_blocks(markdown, options);
    parse_document_inlines(&mut doc);
    doc
}

/// Block structure only; every span is still [`Content::Raw`].
pub(crate) fn parse_blocks(markdown: &str, options: &ParseOptions) -> Block {
    BlockParser::new(markdown, &options.extensions).parse()
}

/// One input line as seen by the block parser, with a cursor that moves past
/// container markers and indentation. Tabs advance to the next multiple of 4.
#[derive(Clone, Debug)]
struct Line<'a> {
    raw: &'a str,
    col_offset: usize,
    byte_offset: usize,
    partial_spaces: usize,
}

impl<'a> Line<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            col_offset: 0,
            byte_offset: 0,
            partial_spaces: 0,
        }
    }

    fn remainder(&self) -> &'a str {
        self.raw.get(self.byte_offset..).unwrap_or("")
    }

    /// Column, byte offset and value of the first non-space byte (0 at end of line).
    fn peek_nonspace(&self) -> (usize, usize, u8) {
        let bytes = self.raw.as_bytes();
        let mut col = self.col_offset + self.partial_spaces;
        let mut off = self.byte_offset;
        while off < bytes.len() {
            match bytes[off] {
                b' ' => col += 1,
                b'\t' => col += 4 - (col % 4),
                b => return (col, off, b),
            }
            off += 1;
        }
        (col, off, 0)
    }

    #[inline]
    fn indent(&self) -> usize {
        self.peek_nonspace().0 - self.col_offset
    }

    #[inline]
    fn is_blank(&self) -> bool {
        self.peek_nonspace().1 >= self.raw.len()
    }

    /// Text from the first non-space byte on.
    fn rest_of_line(&self) -> &'a str {
        let (_, off, _) = self.peek_nonspace();
        self.raw.get(off..).unwrap_or("")
    }

    fn advance_to_nonspace(&mut self) {
        let (col, off, _) = self.peek_nonspace();
        self.partial_spaces = 0;
        self.col_offset = col;
        self.byte_offset = off;
    }

    /// Consume up to `max` columns of indentation, splitting a tab if needed.
    fn skip_indent(&mut self, max: usize) -> usize {
        let bytes = self.raw.as_bytes();
        let mut cols = 0;
        if self.partial_spaces > 0 {
            let consume = self.partial_spaces.min(max);
            cols += consume;
            self.col_offset += consume;
            self.partial_spaces -= consume;
        }
        while cols < max && self.byte_offset < bytes.len() {
            match bytes[self.byte_offset] {
                b' ' => {
                    cols += 1;
                    self.col_offset += 1;
                    self.byte_offset += 1;
                }
                b'\t' => {
                    let tab_width = 4 - (self.col_offset % 4);
                    self.byte_offset += 1;
                    if cols + tab_width > max {
                        let consume = max - cols;
                        self.partial_spaces = tab_width - consume;
                        self.col_offset += consume;
                        cols += consume;
                        break;
                    }
                    cols += tab_width;
                    self.col_offset += tab_width;
                }
                _ => break,
            }
        }
        cols
    }

    /// Step over `>` and the single optional space after it.
    fn consume_blockquote_marker(&mut self) {
        self.advance_to_nonspace();
        self.byte_offset += 1;
        self.col_offset += 1;
        match self.raw.as_bytes().get(self.byte_offset) {
            Some(b' ') => {
                self.byte_offset += 1;
                self.col_offset += 1;
            }
            Some(b'\t') => {
                let tab_width = 4 - (self.col_offset % 4);
                self.byte_offset += 1;
                self.col_offset += 1;
                self.partial_spaces = tab_width - 1;
            }
            _ => {}
        }
    }

    fn remainder_with_partial(&self) -> Cow<'a, str> {
        if self.partial_spaces == 0 {
            return Cow::Borrowed(self.remainder());
        }
        let rem = self.remainder();
        let mut s = String::with_capacity(self.partial_spaces + rem.len());
        s.extend(std::iter::repeat_n(' ', self.partial_spaces));
        s.push_str(rem);
        Cow::Owned(s)
    }
}

#[derive(Clone, Debug)]
struct FencedCodeData {
    fence_char: u8,
    fence_len: usize,
    fence_indent: usize,
    info: String,
}

#[derive(Clone, Debug)]
enum OpenBlockType {
    Document,
    BlockQuote,
    FencedCode(Box<FencedCodeData>),
    IndentedCode,
    Paragraph,
    Table(Box<TableBlockParser>),
}

impl OpenBlockType {
    #[inline]
    fn is_leaf(&self) -> bool {
        !matches!(self, OpenBlockType::Document | OpenBlockType::BlockQuote)
    }
}

#[derive(Clone, Debug)]
struct OpenBlock {
    block_type: OpenBlockType,
    content: String,
    children: Vec<Block>,
}

impl OpenBlock {
    #[inline]
    fn new(block_type: OpenBlockType) -> Self {
        Self {
            block_type,
            content: String::new(),
            children: Vec::new(),
        }
    }

    #[inline]
    fn with_content(block_type: OpenBlockType, content: &str) -> Self {
        Self {
            content: content.to_string(),
            ..Self::new(block_type)
        }
    }
}

pub(crate) struct BlockParser<'a> {
    input: &'a str,
    open: Vec<OpenBlock>,
    extensions: &'a [Extension],
}

impl<'a> BlockParser<'a> {
    pub fn new(input: &'a str, extensions: &'a [Extension]) -> Self {
        let mut open = Vec::with_capacity(16);
        open.push(OpenBlock::new(OpenBlockType::Document));
        Self {
            input,
            open,
            extensions,
        }
    }

    pub fn parse(mut self) -> Block {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut start = 0;
        while start < bytes.len() {
            let end = memchr_newline(bytes, start);
            self.process_line(Line::new(trim_cr(&input[start..end])));
            start = end + 1;
        }
        while self.open.len() > 1 {
            self.close_top_block();
        }
        let children = self.open.pop().map(|doc| doc.children).unwrap_or_default();
        Block::Document { children }
    }

    /// Ask each configured extension whether `line` turns the single-line
    /// paragraph `paragraph` into one of its blocks.
    fn try_extension_start(&self, paragraph: &str, line: &str) -> Option<OpenBlockType> {
        self.extensions.iter().find_map(|ext| match ext {
            Extension::Tables => TableBlockParser::try_start(paragraph, line)
                .map(|parser| OpenBlockType::Table(Box::new(parser))),
        })
    }

    #[inline]
    fn push_child(&mut self, block: Block) {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(block);
        }
    }

    fn close_top_block(&mut self) {
        let Some(block) = self.open.pop() else {
            return;
        };
        if let Some(block) = finalize_block(block) {
            self.push_child(block);
        }
    }
}

fn finalize_block(block: OpenBlock) -> Option<Block> {
    match block.block_type {
        OpenBlockType::Document => Some(Block::Document {
            children: block.children,
        }),
        OpenBlockType::BlockQuote => Some(Block::BlockQuote {
            children: block.children,
        }),
        OpenBlockType::FencedCode(data) => Some(Block::CodeBlock {
            info: data.info,
            literal: block.content,
        }),
        OpenBlockType::IndentedCode => {
            let mut literal = block.content;
            while literal.ends_with('\n') {
                literal.pop();
            }
            literal.push('\n');
            Some(Block::CodeBlock {
                info: String::new(),
                literal,
            })
        }
        OpenBlockType::Paragraph => {
            let trimmed = block.content.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some(Block::Paragraph {
                content: Content::Raw(trimmed.to_string()),
            })
        }
        OpenBlockType::Table(mut parser) => parser.close().map(|table| Block::Table(Box::new(table))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_indent_expands_tabs() {
        let line = Line::new("\t  x");
        assert_eq!(line.indent(), 6);
        assert_eq!(line.rest_of_line(), "x");
        assert!(!line.is_blank());
        assert!(Line::new(" \t ").is_blank());
    }

    #[test]
    fn skip_indent_splits_tabs() {
        let mut line = Line::new("\tcode");
        assert_eq!(line.skip_indent(2), 2);
        assert_eq!(line.remainder_with_partial(), "  code");
    }

    #[test]
    fn blockquote_marker_consumes_one_space() {
        let mut line = Line::new(" >  x");
        line.consume_blockquote_marker();
        assert_eq!(line.remainder(), " x");
        assert_eq!(line.indent(), 1);
    }

    #[test]
    fn table_reclaims_single_line_paragraph() {
        let doc = parse_blocks("a|b\n---|---\n1|2", &ParseOptions::default());
        let Block::Document { children } = doc else {
            panic!("expected document");
        };
        assert_eq!(children.len(), 1);
        let Block::Table(table) = &children[0] else {
            panic!("expected table, got {:?}", children[0]);
        };
        assert_eq!(table.columns(), 2);
        assert_eq!(table.body.rows.len(), 1);
    }

    #[test]
    fn multi_line_paragraph_is_not_a_header() {
        let doc = parse_blocks("intro\na|b\n---|---", &ParseOptions::default());
        let Block::Document { children } = doc else {
            panic!("expected document");
        };
        assert_eq!(
            children,
            [Block::Paragraph {
                content: Content::Raw("intro\na|b\n---|---".into())
            }]
        );
    }

    #[test]
    fn extensions_are_opt_in() {
        let doc = parse_blocks("a|b\n---|---", &ParseOptions::commonmark());
        let Block::Document { children } = doc else {
            panic!("expected document");
        };
        assert!(matches!(children[0], Block::Paragraph { .. }));
    }
}
