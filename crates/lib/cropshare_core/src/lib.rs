//! # cropshare_core
//!
//! Core domain logic for CropShare.

pub mod auth;
pub mod messages;
pub mod migrate;
pub mod models;
pub mod pantries;
pub mod repo;
pub mod seed;
pub mod stock;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
