//! Protocol object types.
//!
//! - [`Name`]: a hierarchical name, an ordered sequence of opaque byte
//!   components
//! - [`dtag`]: dictionary-tag numbers from the ccnb dictionary

pub mod dtag;
pub mod name;

pub use name::Name;
