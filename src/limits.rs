//! Limits for reading FES documents
//!
//! Filters arrive from untrusted clients; the reader checks these bounds
//! before and while it builds the model tree.

use crate::error::{Error, Result};

/// Reader limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Maximum document size in bytes
    pub max_document_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,

    /// Maximum number of children under one element
    pub max_children: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_document_size: 16 * 1024 * 1024, // 16 MB
            max_attributes: 256,
            max_children: 100_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits for filters embedded in request URLs
    pub fn strict() -> Self {
        Self {
            max_depth: 64,
            max_document_size: 256 * 1024, // 256 KB
            max_attributes: 32,
            max_children: 1_000,
        }
    }

    /// Create permissive limits (capabilities documents, batch tooling)
    pub fn permissive() -> Self {
        Self {
            max_depth: 4096,
            max_document_size: 512 * 1024 * 1024, // 512 MB
            max_attributes: 4096,
            max_children: 10_000_000,
        }
    }

    /// Set the maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the maximum document size
    pub fn with_max_document_size(mut self, size: usize) -> Self {
        self.max_document_size = size;
        self
    }

    /// Check if nesting depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            Err(Error::LimitExceeded(format!(
                "element depth {} exceeds maximum {}",
                depth, self.max_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if document size is within limits
    pub fn check_document_size(&self, size: usize) -> Result<()> {
        if size > self.max_document_size {
            Err(Error::LimitExceeded(format!(
                "document size {} bytes exceeds maximum {} bytes",
                size, self.max_document_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            Err(Error::LimitExceeded(format!(
                "attribute count {} exceeds maximum {}",
                count, self.max_attributes
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of child elements is within limits
    pub fn check_children(&self, count: usize) -> Result<()> {
        if count > self.max_children {
            Err(Error::LimitExceeded(format!(
                "child element count {} exceeds maximum {}",
                count, self.max_children
            )))
        } else {
            Ok(())
        }
    }
}
