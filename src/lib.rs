//! # fes20
//!
//! A typed object model for OGC Filter Encoding 2.0 with reflective
//! structural access.
//!
//! Every concrete FES class is a Rust type implementing [`ModelObject`], a
//! dispatcher that reads and writes features by integer id. The ids and the
//! XML mapping of each feature come from a [`Registry`](registry::Registry)
//! built once per process by [`fes20()`].
//!
//! ## Features
//!
//! - Registry of the 57 classes, 20 datatypes and 6 enumerations of the package
//! - Typed model with choice groups, substitution groups and mixed content
//! - Factory and lexical conversion for every simple type
//! - Diagnostician checking multiplicities and datatype facets
//! - XML reading and writing driven by registry metadata
//! - Protection against oversized and deeply nested documents
//!
//! ## Example
//!
//! ```rust,ignore
//! use fes20::{xml, Diagnostician};
//!
//! let document = xml::from_str(r#"<fes:Filter xmlns:fes="http://www.opengis.net/fes/2.0">
//!   <fes:PropertyIsEqualTo>
//!     <fes:ValueReference>name</fes:ValueReference>
//!     <fes:Literal>Main St</fes:Literal>
//!   </fes:PropertyIsEqualTo>
//! </fes:Filter>"#)?;
//!
//! let filter = document.root().and_then(|e| e.as_object()).unwrap();
//! assert!(Diagnostician::fes20()?.is_valid(filter.as_model()));
//! println!("{}", xml::to_string(&document)?);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Names and namespaces
pub mod names;
pub mod namespaces;

// Package metadata
pub mod datatypes;
pub mod registry;

// Object model
pub mod model;
pub mod ows;

// Services over the model
pub mod factory;
pub mod validation;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use factory::Fes20Factory;
pub use limits::Limits;
pub use model::{DocumentRoot, Element, FesObject, GroupEntry, ModelObject, Value};
pub use registry::{fes20, ClassifierId, FeatureId, Registry};
pub use validation::Diagnostician;
pub use xml::{WriterConfig, XmlReader, XmlWriter};

/// Version of the fes20 library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use namespaces::{FES_NAMESPACE, FES_PREFIX};
