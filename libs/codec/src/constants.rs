//! Wire-protocol constants shared across the codec.
//!
//! Central registry of the fixed tag names and dispatch conventions used by
//! the envelope and the registry. These values define the wire contract and
//! must remain stable across releases.

/// Outer root tag of every interbank document
pub const ENVELOPE_ROOT_TAG: &str = "DOC";

/// Envelope header block hosting sender, recipient, domain, and operation
pub const ENVELOPE_HEADER_TAG: &str = "BCMSG";

/// Payload block hosting the message-specific subtree
pub const ENVELOPE_PAYLOAD_TAG: &str = "SISMSG";

/// Element whose first text content anywhere in a document identifies the
/// message code
pub const MESSAGE_CODE_TAG: &str = "CodMsg";

/// Default namespace emitted on the envelope root when requested; accepted
/// and otherwise ignored on input
pub const DEFAULT_NAMESPACE: &str = "http://www.bcb.gov.br/SPB";

/// Length of the service prefix at the front of every message code
pub const SERVICE_PREFIX_LEN: usize = 3;

/// Qualifier used in module hints when no version was requested
pub const DEFAULT_VERSION_QUALIFIER: &str = "default";
