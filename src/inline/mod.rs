mod render;
mod scanner;

pub(crate) use render::render_content;

use crate::ast::{Block, Content, Inline};
use crate::{is_ascii_punctuation, utf8_char_len};

/// Scratch space reused by every inline parse of one document.
pub(crate) struct InlineBuffers {
    items: Vec<InlineItem>,
    delims: Vec<usize>,
}

impl InlineBuffers {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            delims: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
enum InlineItem {
    TextRange(usize, usize),
    TextOwned(String),
    TextStatic(&'static str),
    Code(String),
    HardBreak,
    SoftBreak,
    DelimRun {
        marker: u8,
        count: usize,
        can_open: bool,
        can_close: bool,
        // 1 = em, 2 = strong; innermost first
        open_em: Vec<u8>,
        close_em: Vec<u8>,
    },
}

struct InlineScanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    items: &'a mut Vec<InlineItem>,
    delims: &'a mut Vec<usize>,
}

impl<'a> InlineScanner<'a> {
    fn new_with_bufs(input: &'a str, bufs: &'a mut InlineBuffers) -> Self {
        bufs.items.clear();
        bufs.delims.clear();
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            items: &mut bufs.items,
            delims: &mut bufs.delims,
        }
    }
}

/// Parse one raw span into inline nodes.
pub(crate) fn parse_inlines(raw: &str, bufs: &mut InlineBuffers) -> Vec<Inline> {
    if raw.bytes().all(|b| !scanner::is_special(b)) {
        return if raw.is_empty() {
            Vec::new()
        } else {
            vec![Inline::Text(raw.to_string())]
        };
    }

    let mut p = InlineScanner::new_with_bufs(raw, bufs);
    p.scan_all();
    if !p.delims.is_empty() {
        p.process_emphasis(0);
    }
    p.build_tree()
}

/// Replace every raw span in `doc` (paragraphs, headings, table cells) with
/// parsed inline content.
pub(crate) fn parse_document_inlines(doc: &mut Block) {
    let mut bufs = InlineBuffers::new();
    let mut stack: Vec<&mut Block> = vec![doc];

    while let Some(block) = stack.pop() {
        match block {
            Block::Document { children } | Block::BlockQuote { children } => {
                stack.extend(children.iter_mut());
            }
            Block::Paragraph { content } | Block::Heading { content, .. } => {
                resolve_content(content, &mut bufs);
            }
            Block::Table(table) => {
                for cell in table.cells_mut() {
                    resolve_content(&mut cell.content, &mut bufs);
                }
            }
            Block::CodeBlock { .. } | Block::ThematicBreak => {}
        }
    }
}

fn resolve_content(content: &mut Content, bufs: &mut InlineBuffers) {
    let Content::Raw(raw) = content else {
        return;
    };
    let inlines = parse_inlines(raw, bufs);
    *content = Content::Inlines(inlines);
}

/// Resolve backslash escapes and character references, e.g. in a code fence info string.
pub(crate) fn unescape_string(raw: &str) -> String {
    let mut bufs = InlineBuffers::new();
    let mut p = InlineScanner::new_with_bufs(raw, &mut bufs);
    p.scan_escapes_only();
    let mut out = String::with_capacity(raw.len());
    for item in p.items.iter() {
        match item {
            InlineItem::TextRange(s, e) => out.push_str(&raw[*s..*e]),
            InlineItem::TextOwned(t) => out.push_str(t),
            InlineItem::TextStatic(t) => out.push_str(t),
            _ => {}
        }
    }
    out
}

/// Left/right flanking rules for a delimiter run between `before` and `after`.
fn flanking(marker: u8, before: char, after: char) -> (bool, bool) {
    let left_flanking = !after.is_whitespace()
        && (!is_punctuation_char(after) || before.is_whitespace() || is_punctuation_char(before));
    let right_flanking = !before.is_whitespace()
        && (!is_punctuation_char(before) || after.is_whitespace() || is_punctuation_char(after));

    if marker == b'*' {
        (left_flanking, right_flanking)
    } else {
        (
            left_flanking && (!right_flanking || is_punctuation_char(before)),
            right_flanking && (!left_flanking || is_punctuation_char(after)),
        )
    }
}

#[inline(always)]
fn is_punctuation_char(c: char) -> bool {
    if c.is_ascii() {
        is_ascii_punctuation(c as u8)
    } else {
        matches!(c as u32,
            0x00A1..=0x00BF
            | 0x2010..=0x2027
            | 0x2030..=0x205E
            | 0x20A0..=0x20CF
            | 0x2100..=0x214F
            | 0x2190..=0x23FF
            | 0x2500..=0x27BF
            | 0x2E00..=0x2E7F
            | 0x3001..=0x303F
            | 0xFE30..=0xFE6F
            | 0xFF01..=0xFF0F
            | 0xFF1A..=0xFF20
            | 0xFF3B..=0xFF40
            | 0xFF5B..=0xFF65)
    }
}

#[inline(always)]
fn char_before(s: &str, byte_pos: usize) -> char {
    if byte_pos == 0 {
        return ' ';
    }
    s[..byte_pos].chars().next_back().unwrap_or(' ')
}

#[inline(always)]
fn char_at(s: &str, byte_pos: usize) -> char {
    if byte_pos >= s.len() {
        return ' ';
    }
    let b = s.as_bytes()[byte_pos];
    if b < 0x80 {
        return b as char;
    }
    let end = (byte_pos + utf8_char_len(b)).min(s.len());
    s[byte_pos..end].chars().next().unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inlines(raw: &str) -> Vec<Inline> {
        parse_inlines(raw, &mut InlineBuffers::new())
    }

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_node() {
        assert_eq!(inlines("hello world"), [text("hello world")]);
        assert!(inlines("").is_empty());
    }

    #[test]
    fn emphasis_and_strong() {
        assert_eq!(
            inlines("*a* and **b**"),
            [
                Inline::Emphasis(vec![text("a")]),
                text(" and "),
                Inline::Strong(vec![text("b")]),
            ]
        );
    }

    #[test]
    fn nested_emphasis() {
        assert_eq!(
            inlines("***a** b*"),
            [Inline::Emphasis(vec![
                Inline::Strong(vec![text("a")]),
                text(" b"),
            ])]
        );
    }

    #[test]
    fn unmatched_delimiters_stay_literal() {
        assert_eq!(inlines("**a*"), [text("*"), Inline::Emphasis(vec![text("a")])]);
        assert_eq!(inlines("a * b"), [text("a * b")]);
    }

    #[test]
    fn intraword_underscore_is_literal() {
        assert_eq!(inlines("snake_case_name"), [text("snake_case_name")]);
    }

    #[test]
    fn escapes_and_entities() {
        assert_eq!(inlines(r"\*not\* &amp; &#35; &bogus;"), [text("*not* & # &bogus;")]);
        assert_eq!(inlines(r"1\\"), [text(r"1\")]);
        assert_eq!(inlines(r"a\b"), [text(r"a\b")]);
    }

    #[test]
    fn code_spans() {
        assert_eq!(
            inlines("`a|b` and `` ` ``"),
            [
                Inline::Code("a|b".into()),
                text(" and "),
                Inline::Code("`".into()),
            ]
        );
        assert_eq!(inlines("`open"), [text("`open")]);
    }

    #[test]
    fn line_breaks() {
        assert_eq!(
            inlines("a  \nb\nc\\\nd"),
            [
                text("a"),
                Inline::HardBreak,
                text("b"),
                Inline::SoftBreak,
                text("c"),
                Inline::HardBreak,
                text("d"),
            ]
        );
    }

    #[test]
    fn document_pass_resolves_table_cells() {
        let mut doc = crate::block::parse_blocks("*a*|b\n---|---\n`c`|d", &Default::default());
        parse_document_inlines(&mut doc);
        let Block::Document { children } = &doc else {
            panic!("expected document");
        };
        let Block::Table(table) = &children[0] else {
            panic!("expected table");
        };
        assert_eq!(
            table.head.row.cells[0].content,
            Content::Inlines(vec![Inline::Emphasis(vec![text("a")])])
        );
        assert_eq!(
            table.body.rows[0].cells[0].content,
            Content::Inlines(vec![Inline::Code("c".into())])
        );
        assert!(table.cells().all(|c| c.content.raw().is_none()));
        assert!(table.cells().all(|c| c.content.inlines().is_some()));
    }

    #[test]
    fn unescapes_info_strings() {
        assert_eq!(unescape_string(r"rust\_lang &amp; more"), "rust_lang & more");
    }

    #[test]
    fn unescape_keeps_backslash_before_non_punctuation() {
        assert_eq!(unescape_string(r"c\+\+ a\b \&amp;"), r"c++ a\b &amp;");
        assert_eq!(unescape_string("trailing\\"), "trailing\\");
    }
}
