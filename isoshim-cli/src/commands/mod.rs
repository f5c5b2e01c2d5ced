//! Handler implementations, one module per dispatcher command.
//!
//! Each handler maps its argument sequence to a JSON-serializable value; the
//! dispatcher in `main` owns serialization and exit-status mapping.

pub mod archive;
pub mod eval;
pub mod sum;
