//! Eviction policy cores.
//!
//! Only strict least-recently-used ordering is provided.

pub mod lru;
