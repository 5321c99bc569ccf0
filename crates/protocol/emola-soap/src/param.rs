//! Ordered builder for the `param` fragment of a gateway call.
//!
//! The gateway reads the fragment positionally, so fields are emitted in
//! exactly the order they are pushed. Tag names are trusted constants; values
//! are escaped with [`escape_xml`].

use crate::escape::escape_xml;

/// Builds `<name>value</name>` sequences in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ParamBuilder {
    buf: String,
}

impl ParamBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, escaping `value`.
    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.buf.push('<');
        self.buf.push_str(name);
        self.buf.push('>');
        self.buf.push_str(&escape_xml(value));
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
        self
    }

    /// Finish and return the fragment.
    pub fn build(self) -> String {
        self.buf
    }
}
