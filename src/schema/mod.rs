//! Focus-session document schema
//!
//! This module defines the loosely-typed wire form of focus sessions as they
//! are exported from the document database, and the adapter that reads them.

mod adapter;
mod raw_session;

pub use adapter::*;
pub use raw_session::*;
