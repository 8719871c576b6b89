//! Monadic wrappers.
//!
//! Rust has no higher-kinded types, so there is no shared trait here: each
//! wrapper exposes the same inherent surface (`of`, `map`, `bind`, `ap`,
//! `flat_map`) and implements [`Named`](crate::value::Named) so its instances
//! can be matched by type name.
pub mod io;
pub mod list;
pub mod maybe;
pub mod reader;
pub mod state;

pub use io::IO;
pub use list::ListMonad;
pub use maybe::Maybe;
pub use reader::Reader;
pub use state::State;

// ------------------------------- Tests ------------------------------------ //
