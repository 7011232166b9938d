//! URL handling module for Sumi-Sieve
//!
//! URLs are kept as exact strings throughout a traversal: the only
//! normalization performed is the base-URL join done here. Two spellings of
//! the same resource are two different URLs as far as the visited set is
//! concerned.

mod base;
mod href;

pub use base::{join_path, normalize_base_url, parse_base_url};
pub use href::rebase_href;
