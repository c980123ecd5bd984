//! XML namespace handling
//!
//! Qualified names, prefix resolution and the namespaces an FES 2.0 document
//! refers to.

use crate::error::{Error, Result};
use crate::names;
use indexmap::IndexMap;
use std::fmt;

/// Filter Encoding 2.0 namespace
pub const FES_NAMESPACE: &str = "http://www.opengis.net/fes/2.0";

/// Conventional prefix for the FES namespace
pub const FES_PREFIX: &str = "fes";

/// OWS Common 1.1 namespace
pub const OWS_NAMESPACE: &str = "http://www.opengis.net/ows/1.1";

/// XLink namespace
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// XML Schema namespace
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// GML 3.2 namespace, the usual geometry operand namespace
pub const GML_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// XML Schema instance namespace
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// XML namespace
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XMLNS namespace
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Qualified name (QName) - namespace, local name and the prefix it was read with
#[derive(Debug, Clone, Eq)]
pub struct QName {
    /// Namespace URI (None for no namespace)
    pub namespace: Option<String>,
    /// Local name
    pub local_name: String,
    /// Prefix used in the lexical form, if any
    pub prefix: Option<String>,
}

impl QName {
    /// Create a new QName
    pub fn new(namespace: Option<impl Into<String>>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.map(|s| s.into()),
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Create a QName without a namespace
    pub fn local(local_name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Create a QName with a namespace
    pub fn namespaced(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            local_name: local_name.into(),
            prefix: None,
        }
    }

    /// Attach the prefix used when writing this name
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Parse the lexical `prefix:local` form without resolving the prefix.
    ///
    /// The namespace stays unset; use [`NamespaceContext::resolve`] when a
    /// prefix mapping is in scope.
    pub fn parse_lexical(lexical: &str) -> Result<Self> {
        let lexical = lexical.trim();
        names::validate_qname(lexical)?;
        Ok(match lexical.split_once(':') {
            Some((prefix, local)) => QName::local(local).with_prefix(prefix),
            None => QName::local(lexical),
        })
    }

    /// Lexical `prefix:local` form, or the bare local name
    pub fn to_lexical(&self) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, self.local_name),
            _ => self.local_name.clone(),
        }
    }

    /// Clark notation `{namespace}local`
    pub fn to_clark(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.local_name),
            None => self.local_name.clone(),
        }
    }
}

// Prefixes are presentation only; two names are equal when namespace and
// local name match.
impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local_name == other.local_name
    }
}

impl std::hash::Hash for QName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local_name.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_clark())
    }
}

/// Namespace context for resolving prefixes
#[derive(Debug, Clone)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI, in declaration order
    prefixes: IndexMap<String, String>,
    /// Default namespace (no prefix)
    default_namespace: Option<String>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self {
            prefixes: IndexMap::new(),
            default_namespace: None,
        }
    }

    /// Context with the FES, OWS, XLink and XSI prefixes bound
    pub fn fes() -> Self {
        let mut ctx = Self::new();
        ctx.add_prefix(FES_PREFIX, FES_NAMESPACE);
        ctx.add_prefix("ows", OWS_NAMESPACE);
        ctx.add_prefix("xlink", XLINK_NAMESPACE);
        ctx.add_prefix("xsi", XSI_NAMESPACE);
        ctx
    }

    /// Add a namespace prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Set the default namespace
    pub fn set_default_namespace(&mut self, namespace: impl Into<String>) {
        self.default_namespace = Some(namespace.into());
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&str> {
        if prefix == "xml" {
            return Some(XML_NAMESPACE);
        }
        self.prefixes.get(prefix).map(|s| s.as_str())
    }

    /// First prefix bound to a namespace
    pub fn get_prefix(&self, namespace: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, ns)| ns.as_str() == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Iterate prefix bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Resolve a prefixed name to a QName
    pub fn resolve(&self, prefixed_name: &str) -> Result<QName> {
        let prefixed_name = prefixed_name.trim();
        names::validate_qname(prefixed_name)?;
        if let Some((prefix, local)) = prefixed_name.split_once(':') {
            let namespace = self
                .get_namespace(prefix)
                .ok_or_else(|| Error::Namespace(format!("Unknown prefix: {}", prefix)))?;
            Ok(QName::namespaced(namespace, local).with_prefix(prefix))
        } else {
            Ok(QName::new(self.default_namespace.clone(), prefixed_name))
        }
    }
}

impl Default for NamespaceContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_to_clark() {
        let qname = QName::namespaced(FES_NAMESPACE, "Filter");
        assert_eq!(qname.to_clark(), "{http://www.opengis.net/fes/2.0}Filter");

        let qname_local = QName::local("element");
        assert_eq!(qname_local.to_string(), "element");
    }

    #[test]
    fn test_qname_equality_ignores_prefix() {
        let a = QName::namespaced("urn:x", "a").with_prefix("p");
        let b = QName::namespaced("urn:x", "a").with_prefix("q");
        assert_eq!(a, b);
        assert_ne!(a.to_lexical(), b.to_lexical());
    }

    #[test]
    fn test_parse_lexical() {
        let qname = QName::parse_lexical("gml:Point").unwrap();
        assert_eq!(qname.prefix.as_deref(), Some("gml"));
        assert_eq!(qname.local_name, "Point");
        assert_eq!(qname.to_lexical(), "gml:Point");
        assert!(QName::parse_lexical("a:b:c").is_err());
        assert!(QName::parse_lexical("").is_err());
    }

    #[test]
    fn test_resolve_prefixed_name() {
        let ctx = NamespaceContext::fes();
        let qname = ctx.resolve("fes:PropertyIsEqualTo").unwrap();
        assert_eq!(qname.namespace.as_deref(), Some(FES_NAMESPACE));
        assert_eq!(qname.local_name, "PropertyIsEqualTo");
        assert_eq!(ctx.get_prefix(OWS_NAMESPACE), Some("ows"));
        assert!(ctx.resolve("nope:Thing").is_err());
    }
}
