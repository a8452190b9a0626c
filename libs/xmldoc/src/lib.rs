//! # Document Tree - Spbwire Wire Document Model
//!
//! ## Purpose
//!
//! Pure data layer for spbwire: an ordered, labeled element tree plus UTF-8
//! XML reading and writing. The codec crate maps business records onto this
//! tree; this crate knows nothing about message catalogues or field paths.
//!
//! ## Architecture Role
//!
//! ```text
//! codec (mapping rules) → [xmldoc] → wire text
//!         ↑                  ↓           ↓
//!    Field Paths        Element Tree   UTF-8 XML
//!    Registry           Attributes     Declarations
//! ```
//!
//! ## What This Crate Contains
//! - `Element`: tag, attribute map, optional text, ordered children
//! - XML parsing into `Element` trees (quick-xml based)
//! - XML rendering of `Element` trees, with or without a document declaration
//!
//! ## What This Crate Does NOT Contain
//! - Path-based field mapping (belongs in codec)
//! - Message definitions or scalar validation (belongs in messages)

pub mod element;
pub mod error;
mod reader;
mod writer;

pub use element::Element;
pub use error::{XmlError, XmlResult};
