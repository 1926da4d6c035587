//! Foundation types for the docstore transaction family.
//!
//! This crate provides the state addressing scheme shared by the client and
//! the transaction handler, plus the family configuration they both derive
//! it from. Every other docstore crate depends on `docstore-types`.
//!
//! # Key Types
//!
//! - [`StateAddress`] — 70-hex-character ledger state address
//! - [`FamilyConfig`] — transaction family name and version
//! - [`derive_address`] — the (family, public key) → address mapping

pub mod address;
pub mod error;
pub mod family;

pub use address::{derive_address, namespace_prefix, sha512_hex, StateAddress};
pub use error::TypeError;
pub use family::{FamilyConfig, FAMILY_NAME, FAMILY_VERSION};
