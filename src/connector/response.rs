use serde_json::Value;

/// The decoded body of a transport response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    body: Value,
}

impl Response {
    /// A response from an already decoded body.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Decodes a response from raw bytes.
    pub fn from_slice(body: &[u8]) -> crate::Result<Self> {
        Ok(Self::new(serde_json::from_slice(body)?))
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}
