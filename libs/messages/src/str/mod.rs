//! Reserve-transfer message family (`STR` service prefix).

pub mod str0004;
pub mod str0005;
pub mod str0005r1;
pub mod str0008;

pub use str0004::Str0004;
pub use str0005::Str0005;
pub use str0005r1::Str0005R1;
pub use str0008::{Str0008, Str0008Lanc};
