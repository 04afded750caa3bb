//! JSON codec for the cart document
//!
//! The persisted form is plain JSON so external readers can consume it.
//! Pretty printing is the default.

use cartdb_core::CartDocument;

/// Outcome of decoding a persisted payload
#[derive(Debug)]
pub enum Decoded {
    /// Payload parsed into a document
    Document(CartDocument),
    /// Payload is not a valid document, or holds an item no validated write
    /// could have produced; carries the reason
    Corrupt(String),
}

/// Encodes and decodes [`CartDocument`] as JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::pretty()
    }
}

impl JsonCodec {
    /// Indented, human-readable output
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Single-line output
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Whether output is indented
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Serialize a document
    pub fn encode(&self, doc: &CartDocument) -> serde_json::Result<Vec<u8>> {
        if self.pretty {
            serde_json::to_vec_pretty(doc)
        } else {
            serde_json::to_vec(doc)
        }
    }

    /// Parse a persisted payload
    ///
    /// Never fails: anything that is not a document comes back as
    /// [`Decoded::Corrupt`]. So does a well-formed document holding an
    /// invalid item (zero quantity, negative price, blank name).
    pub fn decode(&self, bytes: &[u8]) -> Decoded {
        match serde_json::from_slice::<CartDocument>(bytes) {
            Ok(doc) => match doc.find_invalid_item() {
                Some(reason) => Decoded::Corrupt(reason),
                None => Decoded::Document(doc),
            },
            Err(e) => Decoded::Corrupt(e.to_string()),
        }
    }
}
