//! Track registry: scanning a directory into an ordered, immutable track list.
//!
//! The registry is built once at startup and never mutated afterwards; a
//! track's position in the returned `Vec` is its canonical index for the
//! whole session.

mod artwork;
mod model;
mod scan;

pub use artwork::find_artwork;
pub use model::*;
pub use scan::scan;
