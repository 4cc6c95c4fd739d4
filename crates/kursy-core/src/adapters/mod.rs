//! Upstream rate-source adapters.

mod nbp;

pub use nbp::{NbpAdapter, NBP_BASE_URL};
