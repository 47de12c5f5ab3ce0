// src/makes/mod.rs
// =============================================================================
// Reference data: car make names and the codes the search endpoint accepts.
// =============================================================================

mod catalog;

pub use catalog::{CarMake, MakeCatalog};
