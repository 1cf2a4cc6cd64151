use crate::ast::Block;
use crate::html::escape_html_into;
use crate::inline::render_content;
use crate::table::render_table;
use crate::{Extension, ParseOptions};

enum Work<'a> {
    Block(&'a Block),
    CloseTag(&'static str),
}

/// Render a parsed document (or any block subtree) to HTML.
///
/// Spans that never went through the inline pass are written as escaped
/// text. A table reaches the output only while [`Extension::Tables`] is
/// enabled in `opts`.
pub fn render_html(block: &Block, opts: &ParseOptions) -> String {
    let mut out = String::new();
    let mut stack: Vec<Work<'_>> = vec![Work::Block(block)];

    while let Some(work) = stack.pop() {
        match work {
            Work::CloseTag(tag) => out.push_str(tag),
            Work::Block(block) => render_one(block, &mut out, opts, &mut stack),
        }
    }
    out
}

#[inline]
fn render_one<'a>(
    block: &'a Block,
    out: &mut String,
    opts: &ParseOptions,
    stack: &mut Vec<Work<'a>>,
) {
    match block {
        Block::Document { children } => {
            stack.extend(children.iter().rev().map(Work::Block));
        }
        Block::ThematicBreak => out.push_str("<hr />\n"),
        Block::Heading { level, content } => {
            let level = (*level).clamp(1, 6);
            out.push_str("<h");
            out.push((b'0' + level) as char);
            out.push('>');
            render_content(out, content, opts);
            out.push_str("</h");
            out.push((b'0' + level) as char);
            out.push_str(">\n");
        }
        Block::Paragraph { content } => {
            out.push_str("<p>");
            render_content(out, content, opts);
            out.push_str("</p>\n");
        }
        Block::CodeBlock { info, literal } => {
            out.push_str("<pre><code");
            if let Some(lang) = info.split_whitespace().next() {
                out.push_str(" class=\"language-");
                escape_html_into(out, lang);
                out.push('"');
            }
            out.push('>');
            escape_html_into(out, literal);
            out.push_str("</code></pre>\n");
        }
        Block::BlockQuote { children } => {
            out.push_str("<blockquote>\n");
            stack.push(Work::CloseTag("</blockquote>\n"));
            stack.extend(children.iter().rev().map(Work::Block));
        }
        Block::Table(table) => {
            if opts.is_enabled(Extension::Tables) {
                render_table(out, table, |out, content| render_content(out, content, opts));
            } else {
                log::warn!(
                    "skipping {}-column table: tables extension is disabled",
                    table.columns()
                );
            }
        }
    }
}
