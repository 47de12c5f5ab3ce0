// src/paginate/mod.rs
// =============================================================================
// This module walks the search results from the first page to the last.
//
// Submodules:
// - controller: the fetch / extract / accumulate loop
// - delay: politeness delays between requests
// - links: the de-duplicated set of collected URLs
// =============================================================================

mod controller;
mod delay;
mod links;

pub use controller::{CollectStats, Paginator};
pub use delay::{DelayPolicy, NoDelay, RandomDelay};
pub use links::LinkSet;
