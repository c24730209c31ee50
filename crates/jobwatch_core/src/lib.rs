//! Jobwatch core: listing model, message formatting and dedup policy, free of IO.
mod listing;
mod message;
mod policy;
mod seen;

pub use listing::{Listing, ListingId, ListingPage, Paginator};
pub use message::{escape_html, format_message, resolve_detail_link};
pub use policy::{decide, Decision};
pub use seen::{SeenOrigin, SeenSet};
