//! HKDF-Expand (RFC 5869)
//!
//! Only the Expand step is implemented: the RHX HKDF schedule extension
//! (§4.F) uses the user key directly as the pseudorandom key (PRK) and never
//! runs HKDF-Extract over it.

use super::hmac::{hmac_sha256, hmac_sha512};

/// `HKDF-Expand` using `HMAC-SHA-256` as the PRF.
///
/// `prk` is used directly as the HMAC key (the caller is responsible for
/// having already performed any extraction step it needs). `out_len` may
/// be any length up to `255 * 32` bytes, the RFC 5869 ceiling for a
/// 32-byte-output PRF.
pub fn hkdf_expand_sha256(prk: &[u8], info: &[u8], out_len: usize) -> Vec<u8> {
    hkdf_expand(prk, info, out_len, 32, hmac_sha256_into)
}

/// `HKDF-Expand` using `HMAC-SHA-512` as the PRF.
pub fn hkdf_expand_sha512(prk: &[u8], info: &[u8], out_len: usize) -> Vec<u8> {
    hkdf_expand(prk, info, out_len, 64, hmac_sha512_into)
}

fn hmac_sha256_into(key: &[u8], message: &[u8]) -> Vec<u8> {
    hmac_sha256(key, message).to_vec()
}

fn hmac_sha512_into(key: &[u8], message: &[u8]) -> Vec<u8> {
    hmac_sha512(key, message).to_vec()
}

fn hkdf_expand(
    prk: &[u8],
    info: &[u8],
    out_len: usize,
    hash_len: usize,
    prf: fn(&[u8], &[u8]) -> Vec<u8>,
) -> Vec<u8> {
    let n = out_len.div_ceil(hash_len);
    assert!(n <= 255, "HKDF-Expand: requested output too long");

    let mut okm = Vec::with_capacity(n * hash_len);
    let mut t = Vec::new();

    for i in 1..=n {
        let mut input = Vec::with_capacity(t.len() + info.len() + 1);
        input.extend_from_slice(&t);
        input.extend_from_slice(info);
        input.push(i as u8);

        t = prf(prk, &input);
        okm.extend_from_slice(&t);
    }

    okm.truncate(out_len);
    okm
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_bytes(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn test_hkdf_expand_sha256_deterministic_and_info_sensitive() {
        let prk = [0x0bu8; 32];
        let info_a = [0xf0u8, 0xf1, 0xf2, 0xf3, 0xf4];
        let info_b = [0xf0u8, 0xf1, 0xf2, 0xf3, 0xf5];
        let okm_a = hkdf_expand_sha256(&prk, &info_a, 42);
        let okm_a2 = hkdf_expand_sha256(&prk, &info_a, 42);
        let okm_b = hkdf_expand_sha256(&prk, &info_b, 42);
        assert_eq!(okm_a, okm_a2);
        assert_ne!(okm_a, okm_b);
        assert_eq!(okm_a.len(), 42);
    }

    #[test]
    fn test_hkdf_expand_sha256_rfc5869_test_case_1() {
        // RFC 5869 Test Case 1 is defined over HKDF-Extract-then-Expand; this
        // crate only implements Expand, so the PRK that Extract would have
        // produced is supplied directly as `prk`.
        let prk =
            hex_bytes("077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5");
        let info = hex_bytes("f0f1f2f3f4f5f6f7f8f9");
        let okm = hkdf_expand_sha256(&prk, &info, 42);
        let expected = "3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865";
        assert_eq!(hex::encode(&okm), expected);
    }

    #[test]
    fn test_hkdf_expand_output_length_is_exact() {
        let prk = [0x42u8; 32];
        let okm = hkdf_expand_sha256(&prk, b"ctx", 17);
        assert_eq!(okm.len(), 17);
    }

    #[test]
    fn test_hkdf_expand_sha512_deterministic() {
        let prk = [0x11u8; 64];
        let a = hkdf_expand_sha512(&prk, b"rhx", 64);
        let b = hkdf_expand_sha512(&prk, b"rhx", 64);
        assert_eq!(a, b);
    }
}
