//! Whole-file access guarded by advisory locks.

pub mod operations;
