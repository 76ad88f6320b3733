//! HMAC-SHA-2
//!
//! HMAC per RFC 2104, built on the SHA-256 and SHA-512 compression
//! functions of [`super::sha2`]. This is the PRF consumed by the HKDF-Expand
//! implementation in [`super::hkdf`], which in turn backs the HKDF(SHA-2)
//! RHX key-schedule extension.

use super::sha2::{sha256, sha512, Sha256, Sha512};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Compute `HMAC-SHA-256(key, message)`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; 32] {
    let block_key = block_sized_key_sha256(key);

    let mut inner_key = [0u8; 64];
    let mut outer_key = [0u8; 64];
    for i in 0..64 {
        inner_key[i] = block_key[i] ^ IPAD;
        outer_key[i] = block_key[i] ^ OPAD;
    }

    let mut inner = Sha256::new();
    inner.update(&inner_key);
    inner.update(message);
    let inner_digest = inner.finalize();

    let mut outer = Sha256::new();
    outer.update(&outer_key);
    outer.update(&inner_digest);
    outer.finalize()
}

/// Compute `HMAC-SHA-512(key, message)`.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> [u8; 64] {
    let block_key = block_sized_key_sha512(key);

    let mut inner_key = [0u8; 128];
    let mut outer_key = [0u8; 128];
    for i in 0..128 {
        inner_key[i] = block_key[i] ^ IPAD;
        outer_key[i] = block_key[i] ^ OPAD;
    }

    let mut inner = Sha512::new();
    inner.update(&inner_key);
    inner.update(message);
    let inner_digest = inner.finalize();

    let mut outer = Sha512::new();
    outer.update(&outer_key);
    outer.update(&inner_digest);
    outer.finalize()
}

fn block_sized_key_sha256(key: &[u8]) -> [u8; 64] {
    let mut block_key = [0u8; 64];
    if key.len() > 64 {
        let digest = sha256(key);
        block_key[..32].copy_from_slice(&digest);
    } else {
        block_key[..key.len()].copy_from_slice(key);
    }
    block_key
}

fn block_sized_key_sha512(key: &[u8]) -> [u8; 128] {
    let mut block_key = [0u8; 128];
    if key.len() > 128 {
        let digest = sha512(key);
        block_key[..64].copy_from_slice(&digest);
    } else {
        block_key[..key.len()].copy_from_slice(key);
    }
    block_key
}
