//! # Spbwire Codec - Declarative Record/Document Mapping
//!
//! ## Purpose
//!
//! This crate contains the "Rules" layer of spbwire:
//! - Path-based field binding between records and wire documents
//! - The tree mapper that serializes/deserializes any bound record
//! - Shape invariants and the matching error taxonomy
//! - The (code, version) registry with its best-effort load hook
//! - The interbank envelope wrapping every payload document
//!
//! ## Integration Points
//!
//! - **Message Definitions**: records in the messages crate declare a
//!   [`Descriptor`] table and implement [`Message`] and [`FromTree`]
//! - **Document Model**: all mapping happens over `xmldoc::Element` trees
//! - **Dispatch**: [`Registry::resolve`] turns a message code into a
//!   [`MessageSpec`] able to decode an incoming document
//!
//! ## Architecture Role
//!
//! ```text
//! messages (catalogue) → [codec] → xmldoc → wire text
//!        ↑                  ↓         ↓
//!   Field Tables       Tree Mapper  Element
//!   Scalar Layer       Registry     Trees
//! ```
//!
//! ## What This Crate Contains
//! - [`PathSpec`]: parsed field paths with text/attribute/group selectors
//! - [`Descriptor`]/[`FieldBinding`]: per-record static binding tables
//! - [`mapper`]: the serialize/deserialize engine with shape validation
//! - [`Registry`]: append-only (code, version) dispatch with load hook
//! - [`Envelope`]: the fixed sender/recipient/domain/operation wrapper
//!
//! ## What This Crate Does NOT Contain
//! - Concrete message definitions or scalar validation (messages crate)
//! - XML text handling (xmldoc crate)
//! - Any transport or persistence concern

pub mod binding;
pub mod constants;
pub mod envelope;
pub mod error;
pub mod mapper;
pub mod path;
pub mod record;
pub mod registry;

// Re-export key types for convenience
pub use binding::{Descriptor, FieldBinding, Shape};
pub use envelope::Envelope;
pub use error::{ConstraintViolation, WireError, WireResult};
pub use mapper::{deserialize, serialize};
pub use path::{PathSpec, Selector};
pub use record::{decode_boxed, FieldValue, FromTree, Message, MessageSpec, Raw, RawRecord};
pub use registry::{extract_message_code, LoadHook, LoadOutcome, ModuleHint, Registry};
