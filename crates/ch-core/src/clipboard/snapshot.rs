use std::fmt;

/// Opaque counter from the clipboard source.
///
/// Two equal tokens mean the clipboard has not changed between the two reads.
/// The value carries no ordering meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeToken(pub u64);

impl fmt::Display for ChangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type tag of the raw clipboard payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTag {
    /// UTF-8 text.
    Text,
    /// Any encoded bitmap the normalizer knows how to decode (PNG, TIFF, ...).
    Image,
    /// Anything else; carries the platform format name for diagnostics.
    Other(String),
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentTag::Text => write!(f, "text"),
            ContentTag::Image => write!(f, "image"),
            ContentTag::Other(format) => write!(f, "other:{format}"),
        }
    }
}

/// Raw content read from the system clipboard at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSnapshot {
    pub tag: ContentTag,
    pub bytes: Vec<u8>,
}

impl ClipboardSnapshot {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            tag: ContentTag::Text,
            bytes: text.into().into_bytes(),
        }
    }

    pub fn image(encoded: Vec<u8>) -> Self {
        Self {
            tag: ContentTag::Image,
            bytes: encoded,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
