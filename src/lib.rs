//! Collects vehicle listing links from Autotrader search results.
//!
//! A run walks the paginated search endpoint for one make around one ZIP code:
//! the first page gives the total result count, then pages are fetched one at
//! a time (with a randomized pause in between) until a page comes back without
//! listings. The listing URLs are read from the schema.org JSON blocks embedded
//! in each page and de-duplicated.
//!
//! - [`listing`]: search parameters, page fetching and extraction
//! - [`paginate`]: the pagination loop, delay policies and the link set
//! - [`makes`]: the make name / code reference list
//! - [`error`]: the error type shared by all of the above

pub mod error;
pub mod listing;
pub mod makes;
pub mod paginate;

pub use error::ScrapeError;
