//! Typed FES 2.0 object model
//!
//! One Rust type per concrete class. Every type implements [`ModelObject`],
//! the reflective dispatcher used by the XML codec and the diagnostician;
//! fields are public for direct typed access.

pub mod capabilities;
pub mod document_root;
pub mod element;
pub mod expression;
pub mod filter;
pub mod object;
pub mod operators;
pub mod query;
pub mod slot;
pub mod sorting;
pub mod value;

pub use capabilities::*;
pub use document_root::DocumentRoot;
pub use element::{Element, ElementType};
pub use expression::{Expression, FunctionType, LiteralType};
pub use filter::{BinaryLogicOpType, FilterType, Predicate, UnaryLogicOpType};
pub use object::{FesObject, ModelObject};
pub use operators::*;
pub use query::{AbstractAdhocQueryExpressionType, AbstractQueryExpressionType};
pub use slot::{FieldValue, Slot};
pub use sorting::{SortByType, SortPropertyType};
pub use value::{AnyElement, GroupEntry, MixedEntry, Value};
