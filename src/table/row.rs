/// Split a table line into raw cell spans.
///
/// Surrounding whitespace and one leading/trailing unescaped `|` are removed
/// first. `\|` becomes a literal pipe inside the span; `\\` is kept as written
/// so the inline pass turns it into a single backslash, and the pipe after it
/// still delimits. Every span is trimmed of spaces and tabs.
pub fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim_matches(is_cell_space);
    let bytes = trimmed.as_bytes();

    let mut start = 0;
    let mut end = bytes.len();
    if bytes.first() == Some(&b'|') {
        start = 1;
    }
    if end > start && bytes[end - 1] == b'|' && !is_escaped(&bytes[start..end - 1]) {
        end -= 1;
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut seg_start = start;
    let mut i = start;
    while i < end {
        match bytes[i] {
            b'\\' if i + 1 < end && bytes[i + 1] == b'|' => {
                current.push_str(&trimmed[seg_start..i]);
                current.push('|');
                i += 2;
                seg_start = i;
            }
            b'\\' if i + 1 < end && bytes[i + 1] == b'\\' => {
                i += 2;
            }
            b'|' => {
                current.push_str(&trimmed[seg_start..i]);
                cells.push(finish_cell(&mut current));
                i += 1;
                seg_start = i;
            }
            _ => i += 1,
        }
    }
    current.push_str(&trimmed[seg_start..end]);
    cells.push(finish_cell(&mut current));
    cells
}

/// Whether `line` holds a `|` that would split it into cells.
pub(crate) fn has_unescaped_pipe(line: &str) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'|' => return true,
            _ => i += 1,
        }
    }
    false
}

#[inline]
fn is_cell_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// True when the byte following `prefix` is escaped by an odd backslash run.
fn is_escaped(prefix: &[u8]) -> bool {
    prefix.iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 1
}

fn finish_cell(current: &mut String) -> String {
    let cell = current.trim_matches(is_cell_space).to_string();
    current.clear();
    cell
}
