//! Character encoding used to decode source files on read and encode them on write

use encoding_rs::{Encoding, UTF_8};

/// Invalid `--encoding` value
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The label does not name any known encoding
    #[error("unknown character encoding '{0}'")]
    Unknown(String),

    /// The encoding can be decoded but not written back
    #[error("character encoding '{0}' cannot be used to write files")]
    NotWritable(&'static str),
}

/// Encoding applied symmetrically to every file of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl Default for TextEncoding {
    fn default() -> Self {
        Self::platform_default()
    }
}

impl TextEncoding {
    /// Encoding used when none is configured
    #[must_use]
    pub fn platform_default() -> Self {
        Self(UTF_8)
    }

    /// Resolve a WHATWG encoding label such as `utf-8`, `latin1` or `windows-1252`
    ///
    /// # Errors
    ///
    /// Returns an error for unknown labels and for encodings that `encoding_rs`
    /// cannot encode to (UTF-16 and the replacement encoding).
    pub fn for_label(label: &str) -> Result<Self, EncodingError> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| EncodingError::Unknown(label.to_string()))?;

        if encoding.output_encoding() != encoding {
            return Err(EncodingError::NotWritable(encoding.name()));
        }

        Ok(Self(encoding))
    }

    /// Resolve an optional label, falling back to the platform default
    ///
    /// # Errors
    ///
    /// See [`TextEncoding::for_label`].
    pub fn from_option(label: Option<&str>) -> Result<Self, EncodingError> {
        label.map_or_else(|| Ok(Self::platform_default()), Self::for_label)
    }

    /// Canonical encoding name
    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decode bytes without BOM sniffing or replacement characters
    ///
    /// Returns `None` if the bytes are malformed for this encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        self.0
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(std::borrow::Cow::into_owned)
    }

    /// Encode text, refusing characters the encoding cannot represent
    #[must_use]
    pub fn encode(self, text: &str) -> Option<Vec<u8>> {
        let (bytes, _, had_unmappable) = self.0.encode(text);
        if had_unmappable {
            None
        } else {
            Some(bytes.into_owned())
        }
    }
}
