//! Layered grid surface for Formic simulations.
//!
//! [`Surface`] is an addressable 2D array store: any number of named
//! scalar layers over one fixed `rows x cols` extent. It is a pure data
//! container; the simulation logic that reads and writes it lives in
//! `formic-world`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod surface;

pub use error::GridError;
pub use surface::{Neighbours, Surface};
