//! # gridlink-engine: The Engine Call Boundary
//!
//! Everything the binding knows about the external engine is expressed
//! here: the [`EngineBackend`] trait (one method per engine call), opaque
//! [`NetworkHandle`]/[`SessionHandle`] resource ids, the tabular payload
//! types ([`Table`], [`Column`], [`Value`]) engine queries return, and the
//! extension schema registry types.
//!
//! The crate also ships [`test_utils::StaticBackend`], an in-memory
//! fixture backend the workspace test suites run against.

pub mod backend;
pub mod extension;
pub mod table;
pub mod test_utils;

pub use backend::{EngineBackend, NetworkHandle, SessionHandle};
pub use extension::{AttributeSpec, AttributeType, ExtensionSchema};
pub use table::{Column, Table, Value};
