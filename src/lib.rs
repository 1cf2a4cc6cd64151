//! # pipemark
//!
//! A small CommonMark-style Markdown-to-HTML engine with a pluggable pipe
//! table extension.
//!
//! ## Usage
//!
//! ```
//! use pipemark::{parse, ParseOptions};
//!
//! let html = parse("Abc|Def\n---|---\n1|2", &ParseOptions::default());
//! assert!(html.starts_with("<table>\n"));
//!
//! // No extensions: the same input is an ordinary paragraph.
//! let html = parse("Abc|Def\n---|---", &ParseOptions::commonmark());
//! assert_eq!(html, "<p>Abc|Def\n---|---</p>\n");
//! ```
//!
//! ## Extensions
//!
//! Extensions are passed explicitly through [`ParseOptions::extensions`]:
//!
//! | Syntax | HTML | Extension |
//! |---|---|---|
//! | `\| a \| b \|` | `<table>` | [`Extension::Tables`] |

pub mod ast;
mod block;
mod entities;
mod html;
mod inline;
mod render;
pub mod table;

pub use ast::{Block, Content, Inline};
pub use block::{parse, parse_to_ast};
pub use render::render_html;

#[inline(always)]
pub(crate) fn is_ascii_punctuation(b: u8) -> bool {
    matches!(b, b'!'..=b'/' | b':'..=b'@' | b'['..=b'`' | b'{'..=b'~')
}

#[inline(always)]
pub(crate) fn utf8_char_len(first: u8) -> usize {
    if first < 0x80 {
        1
    } else if first < 0xE0 {
        2
    } else if first < 0xF0 {
        3
    } else {
        4
    }
}

/// A syntax extension the engine can be configured with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Pipe tables with `---` separator rows and `:` alignment markers.
    Tables,
}

impl Extension {
    /// Every extension this crate provides.
    pub const ALL: &'static [Extension] = &[Extension::Tables];
}

/// Options for customizing Markdown parsing and rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Extensions consulted for block starts and node rendering.
    /// Default: every extension in [`Extension::ALL`].
    pub extensions: Vec<Extension>,
    /// When `true`, every newline inside a paragraph becomes a hard line break (`<br />`).
    /// Default: `false`.
    pub hard_breaks: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            extensions: Extension::ALL.to_vec(),
            hard_breaks: false,
        }
    }
}

impl ParseOptions {
    /// Plain CommonMark: no extensions.
    pub fn commonmark() -> Self {
        Self {
            extensions: Vec::new(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_enabled(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }
}
