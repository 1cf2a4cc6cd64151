use super::ast::Alignment;
use super::row::split_row;

const MIN_DASHES: usize = 3;

/// Parse a table separator line like `| --- | :---: | ---: |`.
/// Returns one alignment per column if valid, `None` otherwise.
pub fn parse_separator(line: &str) -> Option<Vec<Alignment>> {
    let line = line.trim_end();
    let bytes = line.as_bytes();
    if bytes.is_empty() || !bytes.contains(&b'|') {
        return None;
    }
    if !bytes
        .iter()
        .all(|&b| matches!(b, b'-' | b':' | b'|' | b' ' | b'\t'))
    {
        return None;
    }

    // A leading pipe only counts in the first column; ` |---` is not a separator.
    let first_nonspace = bytes.iter().position(|&b| b != b' ' && b != b'\t')?;
    if first_nonspace > 0 && bytes[first_nonspace] == b'|' {
        log::trace!("separator rejected: space before leading pipe");
        return None;
    }

    let alignments = split_row(line)
        .iter()
        .map(|token| parse_column(token))
        .collect::<Option<Vec<_>>>()?;
    if alignments.is_empty() {
        return None;
    }
    Some(alignments)
}

fn parse_column(token: &str) -> Option<Alignment> {
    let (left, rest) = match token.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let (right, dashes) = match rest.strip_suffix(':') {
        Some(dashes) => (true, dashes),
        None => (false, rest),
    };
    if dashes.len() < MIN_DASHES || !dashes.bytes().all(|b| b == b'-') {
        log::trace!("separator rejected: bad column {token:?}");
        return None;
    }
    Some(match (left, right) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    })
}
