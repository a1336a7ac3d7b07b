//! Index entries: one documented symbol occurrence, its source location and
//! the hierarchy that keys it in the source index.

mod entry;
mod error;
mod factory;

pub use entry::{IndexEntry, NO_LOCATION, TrueOrigin};
pub use error::EntryError;
pub use factory::{Declaration, NAME_STACK_DEPTH, build_entry};
