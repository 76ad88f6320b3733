//! Hash and KDF primitives backing the cipher and AEAD layers.
//!
//! Everything here is a dependency pulled in because RHX's key schedule and
//! HBA's tag computation need it (§1); nothing in this module is a public
//! entry point for an application to hash data with directly.

pub mod hkdf;
pub mod hmac;
pub mod keccak;
pub mod sha2;
pub mod sha3;
