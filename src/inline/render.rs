use crate::ParseOptions;
use crate::ast::{Content, Inline};
use crate::html::escape_html_into;

enum Work<'a> {
    Node(&'a Inline),
    CloseTag(&'static str),
}

/// Render a leaf's content. Raw spans (inline pass skipped) render as escaped text.
pub(crate) fn render_content(out: &mut String, content: &Content, opts: &ParseOptions) {
    match content {
        Content::Raw(raw) => escape_html_into(out, raw),
        Content::Inlines(inlines) => render_inlines(out, inlines, opts),
    }
}

pub(crate) fn render_inlines(out: &mut String, inlines: &[Inline], opts: &ParseOptions) {
    let mut stack: Vec<Work<'_>> = inlines.iter().rev().map(Work::Node).collect();

    while let Some(work) = stack.pop() {
        match work {
            Work::CloseTag(tag) => out.push_str(tag),
            Work::Node(Inline::Text(text)) => escape_html_into(out, text),
            Work::Node(Inline::Code(code)) => {
                out.push_str("<code>");
                escape_html_into(out, code);
                out.push_str("</code>");
            }
            Work::Node(Inline::Emphasis(children)) => {
                out.push_str("<em>");
                stack.push(Work::CloseTag("</em>"));
                stack.extend(children.iter().rev().map(Work::Node));
            }
            Work::Node(Inline::Strong(children)) => {
                out.push_str("<strong>");
                stack.push(Work::CloseTag("</strong>"));
                stack.extend(children.iter().rev().map(Work::Node));
            }
            Work::Node(Inline::HardBreak) => out.push_str("<br />\n"),
            Work::Node(Inline::SoftBreak) => {
                if opts.hard_breaks {
                    out.push_str("<br />\n");
                } else {
                    out.push('\n');
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(inlines: &[Inline], opts: &ParseOptions) -> String {
        let mut out = String::new();
        render_inlines(&mut out, inlines, opts);
        out
    }

    #[test]
    fn nested_tags_close_in_order() {
        let inlines = [Inline::Strong(vec![
            Inline::Text("a ".into()),
            Inline::Emphasis(vec![Inline::Text("b".into())]),
        ])];
        assert_eq!(
            render(&inlines, &ParseOptions::default()),
            "<strong>a <em>b</em></strong>"
        );
    }

    #[test]
    fn escapes_text_and_code() {
        let inlines = [
            Inline::Text("1 < 2".into()),
            Inline::Code("<b>".into()),
        ];
        assert_eq!(
            render(&inlines, &ParseOptions::default()),
            "1 &lt; 2<code>&lt;b&gt;</code>"
        );
    }

    #[test]
    fn soft_breaks_follow_options() {
        let inlines = [Inline::Text("a".into()), Inline::SoftBreak, Inline::Text("b".into())];
        assert_eq!(render(&inlines, &ParseOptions::default()), "a\nb");
        let opts = ParseOptions {
            hard_breaks: true,
            ..Default::default()
        };
        assert_eq!(render(&inlines, &opts), "a<br />\nb");
    }

    #[test]
    fn raw_content_is_escaped_verbatim() {
        let mut out = String::new();
        render_content(&mut out, &Content::Raw("*a* & b".into()), &ParseOptions::default());
        assert_eq!(out, "*a* &amp; b");
    }
}
