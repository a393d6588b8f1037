use crate::descriptor::error::DescriptorError;
use crate::descriptor::model::ParsedDescriptor;

/// Parsing seam between raw descriptor bytes and the parsed model.
///
/// Parsing is pure and CPU-bound; implementations must not perform I/O.
pub trait DescriptorParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedDescriptor, DescriptorError>;
}

/// Default parser for the JSON descriptor format.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDescriptorParser;

impl JsonDescriptorParser {
    pub fn new() -> Self {
        JsonDescriptorParser
    }
}

impl DescriptorParser for JsonDescriptorParser {
    fn parse(&self, bytes: &[u8]) -> Result<ParsedDescriptor, DescriptorError> {
        serde_json::from_slice(bytes).map_err(|e| DescriptorError::Malformed {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }
}
