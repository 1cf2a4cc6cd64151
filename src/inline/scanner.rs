use super::*;
use crate::entities::{self, MAX_ENTITY_LEN};

static SPECIAL: [bool; 256] = {
    let mut t = [false; 256];
    t[b'\\' as usize] = true;
    t[b'`' as usize] = true;
    t[b'*' as usize] = true;
    t[b'_' as usize] = true;
    t[b'&' as usize] = true;
    t[b'\n' as usize] = true;
    t
};

#[inline(always)]
pub(super) fn is_special(b: u8) -> bool {
    SPECIAL[b as usize]
}

impl<'a> InlineScanner<'a> {
    pub(super) fn scan_all(&mut self) {
        let mut text_start = self.pos;

        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if !is_special(b) {
                self.pos += 1;
                continue;
            }

            match b {
                b'\\' => {
                    if self.bytes.get(self.pos + 1) == Some(&b'\n') {
                        self.flush_text_range(text_start, self.pos);
                        self.items.push(InlineItem::HardBreak);
                        self.pos += 2;
                        self.skip_line_indent();
                        text_start = self.pos;
                    } else if self.scan_escape(text_start) {
                        text_start = self.pos;
                    } else {
                        self.pos += 1;
                    }
                }
                b'`' => {
                    self.flush_text_range(text_start, self.pos);
                    self.scan_code_span();
                    text_start = self.pos;
                }
                b'*' | b'_' => {
                    self.flush_text_range(text_start, self.pos);
                    self.scan_delim_run(b);
                    text_start = self.pos;
                }
                b'&' => {
                    self.flush_text_range(text_start, self.pos);
                    if !self.try_entity() {
                        self.items.push(InlineItem::TextStatic("&"));
                        self.pos += 1;
                    }
                    text_start = self.pos;
                }
                b'\n' => {
                    let mut text_end = self.pos;
                    while text_end > text_start && self.bytes[text_end - 1] == b' ' {
                        text_end -= 1;
                    }
                    let is_hard = self.pos - text_end >= 2;
                    self.flush_text_range(text_start, text_end);
                    self.items.push(if is_hard {
                        InlineItem::HardBreak
                    } else {
                        InlineItem::SoftBreak
                    });
                    self.pos += 1;
                    self.skip_line_indent();
                    text_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }
        self.flush_text_range(text_start, self.pos);
    }

    /// Escapes and character references only; everything else is text.
    pub(super) fn scan_escapes_only(&mut self) {
        let mut text_start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            match b {
                b'\\' if self.scan_escape(text_start) => text_start = self.pos,
                b'&' => {
                    self.flush_text_range(text_start, self.pos);
                    if !self.try_entity() {
                        self.pos += 1;
                        self.items.push(InlineItem::TextStatic("&"));
                    }
                    text_start = self.pos;
                }
                _ => self.pos += 1,
            }
        }
        self.flush_text_range(text_start, self.pos);
    }

    /// Backslash before ASCII punctuation: emit the punctuation as text.
    fn scan_escape(&mut self, text_start: usize) -> bool {
        match self.bytes.get(self.pos + 1) {
            Some(&next) if is_ascii_punctuation(next) => {
                self.flush_text_range(text_start, self.pos);
                self.items
                    .push(InlineItem::TextRange(self.pos + 1, self.pos + 2));
                self.pos += 2;
                true
            }
            _ => false,
        }
    }

    fn skip_line_indent(&mut self) {
        while self.pos < self.bytes.len() && matches!(self.bytes[self.pos], b' ' | b'\t') {
            self.pos += 1;
        }
    }

    #[inline]
    pub(super) fn flush_text_range(&mut self, start: usize, end: usize) {
        if start < end {
            self.items.push(InlineItem::TextRange(start, end));
        }
    }

    pub(super) fn scan_code_span(&mut self) {
        let start = self.pos;
        let mut open_count = 0;
        while self.pos < self.bytes.len() && self.bytes[self.pos] == b'`' {
            open_count += 1;
            self.pos += 1;
        }
        let after_open = self.pos;
        loop {
            match memchr::memchr(b'`', &self.bytes[self.pos..]) {
                Some(idx) => self.pos += idx,
                None => {
                    self.items.push(InlineItem::TextRange(start, after_open));
                    self.pos = after_open;
                    return;
                }
            }
            let close_start = self.pos;
            let mut close_count = 0;
            while self.pos < self.bytes.len() && self.bytes[self.pos] == b'`' {
                close_count += 1;
                self.pos += 1;
            }
            if close_count == open_count {
                let content = self.input[after_open..close_start].replace('\n', " ");
                let stripped = if content.len() >= 2
                    && content.starts_with(' ')
                    && content.ends_with(' ')
                    && !content.bytes().all(|b| b == b' ')
                {
                    content[1..content.len() - 1].to_string()
                } else {
                    content
                };
                self.items.push(InlineItem::Code(stripped));
                return;
            }
        }
    }

    pub(super) fn scan_delim_run(&mut self, marker: u8) {
        let run_start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos] == marker {
            self.pos += 1;
        }

        let before = char_before(self.input, run_start);
        let after = char_at(self.input, self.pos);
        let (can_open, can_close) = flanking(marker, before, after);

        let idx = self.items.len();
        self.items.push(InlineItem::DelimRun {
            marker,
            count: self.pos - run_start,
            can_open,
            can_close,
            open_em: Vec::new(),
            close_em: Vec::new(),
        });
        self.delims.push(idx);
    }

    /// `&name;`, `&#123;` or `&#x1F;` at the current position.
    pub(super) fn try_entity(&mut self) -> bool {
        let bytes = self.bytes;
        let start = self.pos + 1;
        let Some(semi) = bytes[start..]
            .iter()
            .take(MAX_ENTITY_LEN.max(9) + 1)
            .position(|&b| b == b';')
            .map(|off| start + off)
        else {
            return false;
        };
        let body = &self.input[start..semi];

        let mut decoded = String::new();
        let ok = if let Some(num) = body.strip_prefix('#') {
            let (digits, hex, max) = match num.strip_prefix(['x', 'X']) {
                Some(h) => (h, true, 6),
                None => (num, false, 7),
            };
            !digits.is_empty()
                && digits.len() <= max
                && digits.bytes().all(|b| {
                    if hex {
                        b.is_ascii_hexdigit()
                    } else {
                        b.is_ascii_digit()
                    }
                })
                && entities::resolve_numeric_ref_into(digits, hex, &mut decoded)
        } else {
            match entities::lookup_entity(body) {
                Some(value) => {
                    decoded.push_str(value);
                    true
                }
                None => false,
            }
        };
        if !ok {
            return false;
        }
        self.items.push(InlineItem::TextOwned(decoded));
        self.pos = semi + 1;
        true
    }

    /// Pair delimiter runs above `stack_bottom` into emphasis.
    pub(super) fn process_emphasis(&mut self, stack_bottom: usize) {
        let mut closer_di = stack_bottom;
        while closer_di < self.delims.len() {
            let ci = self.delims[closer_di];
            let (cmarker, ccount, ccan_open, ccan_close) = self.delim_info(ci);
            if !ccan_close || ccount == 0 {
                closer_di += 1;
                continue;
            }

            let mut found = None;
            let mut odi = closer_di;
            while odi > stack_bottom {
                odi -= 1;
                let (omarker, ocount, ocan_open, ocan_close) = self.delim_info(self.delims[odi]);
                if omarker != cmarker || !ocan_open || ocount == 0 {
                    continue;
                }
                if (ocan_close || ccan_open)
                    && (ocount + ccount) % 3 == 0
                    && (ocount % 3 != 0 || ccount % 3 != 0)
                {
                    continue;
                }
                found = Some(odi);
                break;
            }

            let Some(opener_di) = found else {
                closer_di += 1;
                continue;
            };

            let oi = self.delims[opener_di];
            let ocount = self.delim_info(oi).1;
            let use_count = if ocount >= 2 && ccount >= 2 { 2 } else { 1 };

            if let InlineItem::DelimRun { count, open_em, .. } = &mut self.items[oi] {
                *count -= use_count;
                open_em.push(use_count as u8);
            }
            if let InlineItem::DelimRun {
                count, close_em, ..
            } = &mut self.items[ci]
            {
                *count -= use_count;
                close_em.push(use_count as u8);
            }

            // Delimiters between opener and closer can no longer match.
            let remove_start = opener_di + 1;
            if remove_start < closer_di {
                self.delims.drain(remove_start..closer_di);
                closer_di = remove_start;
            }

            if self.delim_info(self.delims[opener_di]).1 == 0 {
                self.delims.remove(opener_di);
                closer_di -= 1;
            }
            if self.delim_info(self.delims[closer_di]).1 == 0 {
                self.delims.remove(closer_di);
            }
        }
        self.delims.truncate(stack_bottom);
    }

    #[inline]
    fn delim_info(&self, idx: usize) -> (u8, usize, bool, bool) {
        match &self.items[idx] {
            InlineItem::DelimRun {
                marker,
                count,
                can_open,
                can_close,
                ..
            } => (*marker, *count, *can_open, *can_close),
            _ => (0, 0, false, false),
        }
    }

    /// Fold the flat item list into nested inline nodes.
    pub(super) fn build_tree(&mut self) -> Vec<Inline> {
        struct Frame {
            strong: bool,
            children: Vec<Inline>,
        }

        let mut stack = vec![Frame {
            strong: false,
            children: Vec::new(),
        }];

        for item in self.items.drain(..) {
            let Some(top) = stack.last_mut() else {
                break;
            };
            match item {
                InlineItem::TextRange(s, e) => push_text(&mut top.children, &self.input[s..e]),
                InlineItem::TextOwned(t) => push_text(&mut top.children, &t),
                InlineItem::TextStatic(t) => push_text(&mut top.children, t),
                InlineItem::Code(c) => top.children.push(Inline::Code(c)),
                InlineItem::HardBreak => top.children.push(Inline::HardBreak),
                InlineItem::SoftBreak => top.children.push(Inline::SoftBreak),
                InlineItem::DelimRun {
                    marker,
                    count,
                    open_em,
                    close_em,
                    ..
                } => {
                    for _ in &close_em {
                        if stack.len() < 2 {
                            break;
                        }
                        if let Some(frame) = stack.pop() {
                            let node = if frame.strong {
                                Inline::Strong(frame.children)
                            } else {
                                Inline::Emphasis(frame.children)
                            };
                            if let Some(parent) = stack.last_mut() {
                                parent.children.push(node);
                            }
                        }
                    }
                    if count > 0 {
                        let literal = (marker as char).to_string().repeat(count);
                        if let Some(top) = stack.last_mut() {
                            push_text(&mut top.children, &literal);
                        }
                    }
                    for &size in open_em.iter().rev() {
                        stack.push(Frame {
                            strong: size == 2,
                            children: Vec::new(),
                        });
                    }
                }
            }
        }

        // Paired closers pop every frame they open; flatten anything left over.
        while stack.len() > 1 {
            if let Some(frame) = stack.pop() {
                if let Some(parent) = stack.last_mut() {
                    for child in frame.children {
                        match child {
                            Inline::Text(t) => push_text(&mut parent.children, &t),
                            other => parent.children.push(other),
                        }
                    }
                }
            }
        }
        stack.pop().map(|root| root.children).unwrap_or_default()
    }
}

#[inline]
fn push_text(children: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = children.last_mut() {
        last.push_str(text);
    } else {
        children.push(Inline::Text(text.to_string()));
    }
}
