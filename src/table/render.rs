use super::ast::{Alignment, TableBlock, TableNode};
use crate::ast::Content;

enum Work<'a> {
    Node(TableNode<'a>),
    CloseTag(&'static str),
}

/// Render `table` as an HTML `<table>` fragment.
///
/// Cell content is handed to `render_content`, the host's inline renderer,
/// which owns all escaping.
pub(crate) fn render_table<F>(out: &mut String, table: &TableBlock, mut render_content: F)
where
    F: FnMut(&mut String, &Content),
{
    let mut stack = vec![Work::Node(TableNode::Block(table))];

    while let Some(work) = stack.pop() {
        let node = match work {
            Work::CloseTag(tag) => {
                out.push_str(tag);
                continue;
            }
            Work::Node(node) => node,
        };
        match node {
            TableNode::Block(block) => {
                out.push_str("<table>\n");
                stack.push(Work::CloseTag("</table>\n"));
                stack.push(Work::Node(TableNode::Body(&block.body)));
                stack.push(Work::Node(TableNode::Head(&block.head)));
            }
            TableNode::Head(head) => {
                out.push_str("<thead>\n");
                stack.push(Work::CloseTag("</thead>\n"));
                stack.push(Work::Node(TableNode::Row(&head.row)));
            }
            TableNode::Body(body) => {
                if body.rows.is_empty() {
                    out.push_str("<tbody></tbody>\n");
                    continue;
                }
                out.push_str("<tbody>\n");
                stack.push(Work::CloseTag("</tbody>\n"));
                for row in body.rows.iter().rev() {
                    stack.push(Work::Node(TableNode::Row(row)));
                }
            }
            TableNode::Row(row) => {
                out.push_str("<tr>");
                stack.push(Work::CloseTag("</tr>\n"));
                for cell in row.cells.iter().rev() {
                    stack.push(Work::Node(TableNode::Cell(cell)));
                }
            }
            TableNode::Cell(cell) => {
                let tag = if cell.header { "th" } else { "td" };
                open_cell(out, tag, cell.alignment);
                render_content(out, &cell.content);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

#[inline]
fn open_cell(out: &mut String, tag: &str, align: Alignment) {
    out.push('<');
    out.push_str(tag);
    if let Some(value) = align.as_attr() {
        out.push_str(" align=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}
