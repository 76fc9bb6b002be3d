//! Byte codec capability.

/// A binary-to-text codec supplied by the caller.
///
/// The codec is an injected capability decided once per stringify or
/// resolve context, never probed from the environment per call. Its
/// absence degrades decoding to a diagnostic plus passthrough and makes
/// encoding a fatal error, since encoded output cannot be silently
/// wrong.
pub trait ByteCodec {
    /// Encode bytes to text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decode text to bytes.
    ///
    /// Implementations should tolerate line breaks inside `text`, since
    /// encoded scalars are wrapped to the configured line width.
    fn decode(&self, text: &str) -> Result<Vec<u8>, String>;
}
