//! Small shared utilities for the `weft` crates.
//!
//! Currently this is the hashing layer: deterministic hash state and the
//! `hashbrown` containers configured with it.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
