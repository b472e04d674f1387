//! Parse-at-boundary step turning loosely-typed backend JSON into the typed
//! domain model.
//!
//! Nothing here fails on bad data. Malformed numbers become zero, malformed
//! dates become `None`, unreadable records are dropped, and every such
//! decision is counted in an [`IngestReport`].

mod ingest_model;
mod parsers;

pub use ingest_model::*;
pub use parsers::*;
