pub mod colors;
pub mod identifiers;
