#[inline(always)]
pub(super) fn memchr_newline(bytes: &[u8], start: usize) -> usize {
    memchr::memchr(b'\n', &bytes[start..]).map_or(bytes.len(), |offset| start + offset)
}

/// Three or more matching `*`, `-` or `_`, optionally separated by spaces or tabs.
pub(super) fn is_thematic_break(line: &str) -> bool {
    let mut marker = None;
    let mut count = 0u32;
    for b in line.bytes() {
        match b {
            b' ' | b'\t' => {}
            b'*' | b'-' | b'_' => match marker {
                None => {
                    marker = Some(b);
                    count = 1;
                }
                Some(m) if m == b => count += 1,
                Some(_) => return false,
            },
            _ => return false,
        }
    }
    count >= 3
}

/// `# text` through `###### text`; returns the level and the heading text
/// with any closing `#` sequence removed.
pub(super) fn parse_atx_heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }
    Some((level as u8, strip_closing_hashes(rest.trim_matches([' ', '\t']))))
}

fn strip_closing_hashes(s: &str) -> &str {
    let without = s.trim_end_matches('#');
    if without.len() == s.len() {
        return s;
    }
    if without.is_empty() {
        return "";
    }
    if without.ends_with([' ', '\t']) {
        without.trim_end_matches([' ', '\t'])
    } else {
        s
    }
}

/// `===` gives level 1 and `---` level 2.
pub(super) fn parse_setext_underline(line: &str) -> Option<u8> {
    let trimmed = line.trim_end_matches([' ', '\t']);
    let first = *trimmed.as_bytes().first()?;
    let level = match first {
        b'=' => 1,
        b'-' => 2,
        _ => return None,
    };
    trimmed.bytes().all(|b| b == first).then_some(level)
}

/// Opening code fence: returns the fence character, its run length and the info string.
pub(super) fn parse_fence_start(line: &str) -> Option<(u8, usize, &str)> {
    let fence_char = *line.as_bytes().first()?;
    if fence_char != b'`' && fence_char != b'~' {
        return None;
    }
    let fence_len = line.bytes().take_while(|&b| b == fence_char).count();
    if fence_len < 3 {
        return None;
    }
    let info = line[fence_len..].trim_matches([' ', '\t']);
    if fence_char == b'`' && info.contains('`') {
        return None;
    }
    Some((fence_char, fence_len, info))
}

pub(super) fn is_closing_fence(line: &str, fence_char: u8, fence_len: usize) -> bool {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    if indent > 3 {
        return false;
    }
    let rest = &line[indent..];
    let run = rest.bytes().take_while(|&b| b == fence_char).count();
    run >= fence_len && rest[run..].bytes().all(|b| b == b' ' || b == b'\t')
}

/// Block starts that end a paragraph or a table body. `rest` begins at the
/// first non-space character of a line indented at most three columns.
pub(super) fn starts_interrupting_block(rest: &str) -> bool {
    rest.starts_with('>')
        || is_thematic_break(rest)
        || parse_atx_heading(rest).is_some()
        || parse_fence_start(rest).is_some()
}
