//! Securities settlement message family (`SEL` service prefix).

pub mod sel1052;

pub use sel1052::Sel1052;
