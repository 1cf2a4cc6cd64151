use super::*;

impl<'a> BlockParser<'a> {
    #[inline(never)]
    pub(super) fn process_line(&mut self, mut line: Line<'a>) {
        let num_open = self.open.len();

        // Phase 1: match continuation markers of open containers
        let mut matched = 1;
        let mut all_matched = true;
        for i in 1..num_open {
            if self.open[i].block_type.is_leaf() {
                break;
            }
            let (_, _, ns_byte) = line.peek_nonspace();
            if line.indent() <= 3 && ns_byte == b'>' {
                line.consume_blockquote_marker();
                matched = i + 1;
            } else {
                all_matched = false;
                break;
            }
        }

        // Phase 2: continue the open leaf, if every container matched
        if all_matched && self.tip_is_leaf() {
            self.continue_leaf(line);
            return;
        }

        // Phase 3: lazy paragraph continuation
        if !all_matched && self.tip_is_paragraph() && !line.is_blank() {
            let rest = line.rest_of_line();
            if line.indent() >= 4 || !starts_interrupting_block(rest) {
                self.append_paragraph_line(&mut line);
                return;
            }
        }

        // Phase 4: close unmatched blocks and open new ones
        while self.open.len() > matched {
            self.close_top_block();
        }
        self.open_new_blocks(line);
    }

    fn continue_leaf(&mut self, mut line: Line<'a>) {
        let Some(tip) = self.open.last_mut() else {
            return;
        };
        match &mut tip.block_type {
            OpenBlockType::FencedCode(data) => {
                if is_closing_fence(line.remainder(), data.fence_char, data.fence_len) {
                    self.close_top_block();
                    return;
                }
                line.skip_indent(data.fence_indent);
                tip.content.push_str(&line.remainder_with_partial());
                tip.content.push('\n');
            }
            OpenBlockType::IndentedCode => {
                if line.is_blank() || line.indent() >= 4 {
                    line.skip_indent(4);
                    tip.content.push('\n');
                    tip.content.push_str(&line.remainder_with_partial());
                } else {
                    self.close_top_block();
                    self.open_new_blocks(line);
                }
            }
            OpenBlockType::Table(table) => {
                if line.is_blank() {
                    self.close_top_block();
                } else if line.indent() <= 3 && starts_interrupting_block(line.rest_of_line()) {
                    self.close_top_block();
                    self.open_new_blocks(line);
                } else {
                    table.add_row(line.remainder());
                }
            }
            OpenBlockType::Paragraph => self.continue_paragraph(line),
            OpenBlockType::Document | OpenBlockType::BlockQuote => {}
        }
    }

    fn continue_paragraph(&mut self, mut line: Line<'a>) {
        if line.is_blank() {
            self.close_top_block();
            return;
        }
        let indent = line.indent();
        let rest = line.rest_of_line();
        if indent <= 3 {
            let single_line = self
                .open
                .last()
                .is_some_and(|tip| !tip.content.contains('\n'));
            if single_line {
                let header = self.open.last().map_or("", |tip| tip.content.as_str());
                if let Some(block_type) = self.try_extension_start(header, line.remainder()) {
                    self.open.pop();
                    self.open.push(OpenBlock::new(block_type));
                    return;
                }
            }
            if let Some(level) = parse_setext_underline(rest) {
                if let Some(para) = self.open.pop() {
                    let text = para.content.trim();
                    self.push_child(Block::Heading {
                        level,
                        content: Content::Raw(text.to_string()),
                    });
                }
                return;
            }
            if starts_interrupting_block(rest) {
                self.close_top_block();
                self.open_new_blocks(line);
                return;
            }
        }
        self.append_paragraph_line(&mut line);
    }

    fn append_paragraph_line(&mut self, line: &mut Line<'a>) {
        line.advance_to_nonspace();
        if let Some(tip) = self.open.last_mut() {
            tip.content.push('\n');
            tip.content.push_str(line.remainder());
        }
    }

    fn open_new_blocks(&mut self, mut line: Line<'a>) {
        loop {
            if line.is_blank() {
                return;
            }
            let indent = line.indent();
            let rest = line.rest_of_line();

            if indent >= 4 {
                line.skip_indent(4);
                let content = line.remainder_with_partial();
                self.open
                    .push(OpenBlock::with_content(OpenBlockType::IndentedCode, &content));
                return;
            }

            if rest.starts_with('>') {
                line.consume_blockquote_marker();
                self.open.push(OpenBlock::new(OpenBlockType::BlockQuote));
                continue;
            }

            if let Some((level, text)) = parse_atx_heading(rest) {
                self.push_child(Block::Heading {
                    level,
                    content: Content::Raw(text.to_string()),
                });
                return;
            }

            if let Some((fence_char, fence_len, info)) = parse_fence_start(rest) {
                self.open
                    .push(OpenBlock::new(OpenBlockType::FencedCode(Box::new(FencedCodeData {
                        fence_char,
                        fence_len,
                        fence_indent: indent,
                        info: unescape_string(info),
                    }))));
                return;
            }

            if is_thematic_break(rest) {
                self.push_child(Block::ThematicBreak);
                return;
            }

            line.advance_to_nonspace();
            self.open
                .push(OpenBlock::with_content(OpenBlockType::Paragraph, line.remainder()));
            return;
        }
    }

    #[inline]
    fn tip_is_leaf(&self) -> bool {
        self.open.last().is_some_and(|tip| tip.block_type.is_leaf())
    }

    #[inline]
    fn tip_is_paragraph(&self) -> bool {
        self.open
            .last()
            .is_some_and(|tip| matches!(tip.block_type, OpenBlockType::Paragraph))
    }
}
