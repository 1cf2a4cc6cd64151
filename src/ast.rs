use crate::table::TableBlock;

/// Block-level node of a parsed document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Block {
    Document {
        children: Vec<Block>,
    },
    BlockQuote {
        children: Vec<Block>,
    },
    Paragraph {
        content: Content,
    },
    Heading {
        level: u8,
        content: Content,
    },
    CodeBlock {
        info: String,
        literal: String,
    },
    ThematicBreak,
    Table(Box<TableBlock>),
}

/// Text of a leaf block or table cell.
///
/// Block parsing leaves every span [`Content::Raw`]; the inline pass replaces
/// it with [`Content::Inlines`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Content {
    Raw(String),
    Inlines(Vec<Inline>),
}

impl Content {
    pub fn raw(&self) -> Option<&str> {
        match self {
            Content::Raw(raw) => Some(raw),
            Content::Inlines(_) => None,
        }
    }

    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Content::Raw(_) => None,
            Content::Inlines(inlines) => Some(inlines),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Content::Raw(raw) => raw.is_empty(),
            Content::Inlines(inlines) => inlines.is_empty(),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Raw(String::new())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    SoftBreak,
    HardBreak,
}
