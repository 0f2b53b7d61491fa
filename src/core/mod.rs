//! Renaming, copying and the consolidation loop

pub mod consolidator;
pub mod copy;
pub mod naming;
