//! # Spbwire Message Catalogue
//!
//! ## Purpose
//!
//! Concrete settlement message definitions on top of the codec engine. Each
//! message module declares its field-binding table, the typed record with
//! its validated constructor, and a registration entry point; the catalog
//! module wires them into the registry's lazy load hook.
//!
//! ## Layout
//!
//! Modules follow the service prefix of their message codes: `str` for
//! reserve-transfer messages, `sel` for securities settlement. One module
//! per message family, named after the lower-cased code, which is exactly
//! the identity the registry's module hints carry.
//!
//! ## Scalar Layer
//!
//! Field values never cross the wire as native types: the [`scalar`]
//! module renders and parses every scalar, enforcing the catalogue's
//! format constraints and raising `ConstraintViolation` on bad input.

pub mod catalog;
pub mod scalar;
pub mod sel;
pub mod str;

pub use catalog::{load_hook, register_all};

use codec::Registry;

/// Install the catalogue's load hook on the process-wide registry.
pub fn init() {
    Registry::global().install_hook(load_hook);
}
