pub mod compare;
pub mod map;
