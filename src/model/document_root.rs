//! The document root: one slot per global element
//!
//! A parsed document is a [`DocumentRoot`] whose mixed content holds the
//! root element, plus any comments or processing instructions around it.
//! Element features are views of that content: reading one finds the
//! first entry written as the element or a member of its substitution
//! group, writing one replaces that entry in place.

use super::element::Element;
use super::object::ModelObject;
use super::value::{GroupEntry, MixedEntry, Value};
use crate::error::{Error, Result};
use crate::registry::ids::{classifier, document_root};
use crate::registry::{ClassifierId, FeatureId};
use indexmap::IndexMap;

/// Root of an FES document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRoot {
    /// Content in document order
    pub mixed: Vec<MixedEntry>,
    /// Prefix declarations of the root element
    pub xmlns_prefix_map: IndexMap<String, String>,
    /// `xsi:schemaLocation` pairs, namespace to location
    pub xsi_schema_location: IndexMap<String, String>,
}

impl DocumentRoot {
    /// Document holding one root element
    pub fn with_root(element: Element, value: impl Into<Value>) -> Result<Self> {
        let mut root = Self::default();
        root.set_element(element, value.into())?;
        Ok(root)
    }

    /// First element entry
    pub fn root(&self) -> Option<&GroupEntry> {
        self.mixed.iter().find_map(|entry| match entry {
            MixedEntry::Element(e) => Some(e),
            _ => None,
        })
    }

    /// First entry written as `element` or one of its members
    pub fn element(&self, element: Element) -> Option<&GroupEntry> {
        self.mixed.iter().find_map(|entry| match entry {
            MixedEntry::Element(e) if e.is_in(element) => Some(e),
            _ => None,
        })
    }

    /// Replace the entry written as `element`, or append one; `Null` removes it
    pub fn set_element(&mut self, element: Element, value: Value) -> Result<()> {
        if element.is_abstract() {
            return Err(Error::not_changeable("DocumentRoot", element.name()));
        }
        if value.is_null() {
            self.remove_element(element);
            return Ok(());
        }
        let entry = GroupEntry::new(element, value)?;
        let existing = self
            .mixed
            .iter_mut()
            .find(|m| matches!(m, MixedEntry::Element(e) if e.element == element));
        match existing {
            Some(slot) => *slot = MixedEntry::Element(entry),
            None => self.mixed.push(MixedEntry::Element(entry)),
        }
        Ok(())
    }

    fn remove_element(&mut self, element: Element) {
        self.mixed
            .retain(|m| !matches!(m, MixedEntry::Element(e) if e.element == element));
    }

    /// Declare a namespace prefix on the root element
    pub fn with_prefix(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.xmlns_prefix_map.insert(prefix.into(), namespace.into());
        self
    }

    fn element_feature(feature: FeatureId) -> Result<Element> {
        Element::from_feature(feature)
            .ok_or_else(|| Error::unknown_feature("DocumentRoot", classifier::DOCUMENT_ROOT, feature))
    }
}

impl ModelObject for DocumentRoot {
    fn class_id(&self) -> ClassifierId {
        classifier::DOCUMENT_ROOT
    }

    fn class_name(&self) -> &'static str {
        "DocumentRoot"
    }

    fn get_feature(&self, feature: FeatureId, _resolve: bool, _core: bool) -> Result<Value> {
        match feature {
            document_root::MIXED => Ok(Value::Mixed(self.mixed.clone())),
            document_root::XMLNS_PREFIX_MAP => Ok(Value::Map(self.xmlns_prefix_map.clone())),
            document_root::XSI_SCHEMA_LOCATION => Ok(Value::Map(self.xsi_schema_location.clone())),
            _ => {
                let element = Self::element_feature(feature)?;
                Ok(self.element(element).map_or(Value::Null, |e| e.value.clone()))
            }
        }
    }

    fn set_feature(&mut self, feature: FeatureId, value: Value) -> Result<()> {
        match feature {
            document_root::MIXED => self.mixed = value.into_mixed("mixed")?,
            document_root::XMLNS_PREFIX_MAP => self.xmlns_prefix_map = value.into_map("xMLNSPrefixMap")?,
            document_root::XSI_SCHEMA_LOCATION => self.xsi_schema_location = value.into_map("xSISchemaLocation")?,
            _ => {
                let element = Self::element_feature(feature)?;
                self.set_element(element, value)?;
            }
        }
        Ok(())
    }

    fn unset_feature(&mut self, feature: FeatureId) -> Result<()> {
        match feature {
            document_root::MIXED => self.mixed.clear(),
            document_root::XMLNS_PREFIX_MAP => self.xmlns_prefix_map.clear(),
            document_root::XSI_SCHEMA_LOCATION => self.xsi_schema_location.clear(),
            _ => {
                let element = Self::element_feature(feature)?;
                if element.is_abstract() {
                    return Err(Error::not_changeable(self.class_name(), element.name()));
                }
                self.remove_element(element);
            }
        }
        Ok(())
    }

    fn is_feature_set(&self, feature: FeatureId) -> Result<bool> {
        match feature {
            document_root::MIXED => Ok(!self.mixed.is_empty()),
            document_root::XMLNS_PREFIX_MAP => Ok(!self.xmlns_prefix_map.is_empty()),
            document_root::XSI_SCHEMA_LOCATION => Ok(!self.xsi_schema_location.is_empty()),
            _ => {
                let element = Self::element_feature(feature)?;
                Ok(self.element(element).is_some())
            }
        }
    }
}
