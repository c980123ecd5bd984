//! XML binding
//!
//! [`XmlReader`] parses FES documents into a [`DocumentRoot`] and
//! [`XmlWriter`] serializes one back. Both are driven by the registry's XML
//! metadata, so an extension package registered in the same registry is
//! read and written without changes here.

pub mod reader;
pub mod writer;

pub use reader::{read_document, XmlReader};
pub use writer::{WriterConfig, XmlWriter};

use crate::error::Result;
use crate::model::DocumentRoot;

/// Parse an FES document with default limits
pub fn from_str(text: &str) -> Result<DocumentRoot> {
    read_document(text)
}

/// Serialize an FES document with the default configuration
pub fn to_string(document: &DocumentRoot) -> Result<String> {
    XmlWriter::fes20()?.write_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    #[test]
    fn test_round_trip_preserves_model() {
        let text = "<fes:Filter xmlns:fes=\"http://www.opengis.net/fes/2.0\">\
                    <fes:Not><fes:PropertyIsLike wildCard=\"*\" singleChar=\".\" escapeChar=\"!\">\
                    <fes:ValueReference>name</fes:ValueReference><fes:Literal>Ma*</fes:Literal>\
                    </fes:PropertyIsLike></fes:Not></fes:Filter>";
        let document = from_str(text).unwrap();
        let written = to_string(&document).unwrap();
        let reread = from_str(&written).unwrap();
        assert_eq!(reread.mixed, document.mixed);
        assert_eq!(reread.root().map(|e| e.element), Some(Element::Filter));
    }
}
