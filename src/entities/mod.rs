/// Named character references recognized by the inline parser, sorted by name.
static ENTITIES: &[(&str, &str)] = &[
    ("AElig", "\u{c6}"),
    ("Dagger", "\u{2021}"),
    ("amp", "&"),
    ("apos", "'"),
    ("bull", "\u{2022}"),
    ("cent", "\u{a2}"),
    ("copy", "\u{a9}"),
    ("dagger", "\u{2020}"),
    ("deg", "\u{b0}"),
    ("divide", "\u{f7}"),
    ("euro", "\u{20ac}"),
    ("frac12", "\u{bd}"),
    ("gt", ">"),
    ("hellip", "\u{2026}"),
    ("laquo", "\u{ab}"),
    ("larr", "\u{2190}"),
    ("ldquo", "\u{201c}"),
    ("lsquo", "\u{2018}"),
    ("lt", "<"),
    ("mdash", "\u{2014}"),
    ("middot", "\u{b7}"),
    ("nbsp", "\u{a0}"),
    ("ndash", "\u{2013}"),
    ("para", "\u{b6}"),
    ("plusmn", "\u{b1}"),
    ("pound", "\u{a3}"),
    ("quot", "\""),
    ("raquo", "\u{bb}"),
    ("rarr", "\u{2192}"),
    ("rdquo", "\u{201d}"),
    ("reg", "\u{ae}"),
    ("rsquo", "\u{2019}"),
    ("sect", "\u{a7}"),
    ("times", "\u{d7}"),
    ("trade", "\u{2122}"),
    ("yen", "\u{a5}"),
];

pub(crate) const MAX_ENTITY_LEN: usize = 6;

#[inline]
pub(crate) fn lookup_entity(name: &str) -> Option<&'static str> {
    ENTITIES
        .binary_search_by(|(n, _)| (*n).cmp(name))
        .ok()
        .map(|idx| ENTITIES[idx].1)
}

/// Decode a decimal or hexadecimal character reference body.
/// Code point zero and invalid code points become U+FFFD.
pub(crate) fn resolve_numeric_ref_into(value: &str, hex: bool, out: &mut String) -> bool {
    let cp = if hex {
        match u32::from_str_radix(value, 16) {
            Ok(v) => v,
            Err(_) => return false,
        }
    } else {
        match value.parse::<u32>() {
            Ok(v) => v,
            Err(_) => return false,
        }
    };

    let cp = if cp == 0 { 0xFFFD } else { cp };
    out.push(char::from_u32(cp).unwrap_or('\u{FFFD}'));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        assert!(ENTITIES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(ENTITIES.iter().all(|(n, _)| n.len() <= MAX_ENTITY_LEN));
    }

    #[test]
    fn looks_up_names() {
        assert_eq!(lookup_entity("amp"), Some("&"));
        assert_eq!(lookup_entity("copy"), Some("\u{a9}"));
        assert_eq!(lookup_entity("nope"), None);
    }

    #[test]
    fn numeric_refs() {
        let mut out = String::new();
        assert!(resolve_numeric_ref_into("35", false, &mut out));
        assert!(resolve_numeric_ref_into("22", true, &mut out));
        assert!(resolve_numeric_ref_into("0", false, &mut out));
        assert!(resolve_numeric_ref_into("D800", true, &mut out));
        assert!(!resolve_numeric_ref_into("zz", true, &mut out));
        assert_eq!(out, "#\"\u{FFFD}\u{FFFD}");
    }
}
