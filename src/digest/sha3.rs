//! SHA-3, SHAKE, cSHAKE, and KMAC (NIST FIPS 202 / SP 800-185).
//!
//! Built entirely on the [`super::keccak`] sponge. cSHAKE and KMAC are the
//! two functions the RHX cSHAKE key schedule and the HBA MAC actually call;
//! SHA3-256/512 and plain SHAKE128/256 are kept alongside them because they
//! share every building block and NIST defines cSHAKE/KMAC in terms of them.

use super::keccak::KeccakState;

const SHAKE128_RATE: usize = 168;
const SHAKE256_RATE: usize = 136;
const SHA3_256_RATE: usize = 136;
const SHA3_512_RATE: usize = 72;

const SHA3_PAD: u8 = 0x06;
const SHAKE_PAD: u8 = 0x1f;
const CSHAKE_PAD: u8 = 0x04;

fn left_encode(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![1, 0];
    }
    let mut bytes = Vec::new();
    let mut v = value;
    while v > 0 {
        bytes.push((v & 0xff) as u8);
        v >>= 8;
    }
    bytes.reverse();
    let mut out = vec![bytes.len() as u8];
    out.extend(bytes);
    out
}

fn right_encode(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0, 1];
    }
    let mut bytes = Vec::new();
    let mut v = value;
    while v > 0 {
        bytes.push((v & 0xff) as u8);
        v >>= 8;
    }
    bytes.reverse();
    bytes.push(bytes.len() as u8);
    bytes
}

fn encode_string(s: &[u8]) -> Vec<u8> {
    let bit_len = (s.len() as u64) * 8;
    let mut out = left_encode(bit_len);
    out.extend_from_slice(s);
    out
}

fn bytepad(x: &[u8], w: usize) -> Vec<u8> {
    let mut z = left_encode(w as u64);
    z.extend_from_slice(x);
    while z.len() % w != 0 {
        z.push(0);
    }
    z
}

/// SHA3-256 one-shot digest.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut state = KeccakState::new(SHA3_256_RATE, SHA3_PAD);
    state.absorb(data);
    let out = state.squeeze(32);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&out);
    digest
}

/// SHA3-512 one-shot digest.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    let mut state = KeccakState::new(SHA3_512_RATE, SHA3_PAD);
    state.absorb(data);
    let out = state.squeeze(64);
    let mut digest = [0u8; 64];
    digest.copy_from_slice(&out);
    digest
}

/// SHAKE128 extendable-output function.
pub fn shake128(data: &[u8], out_len: usize) -> Vec<u8> {
    let mut state = KeccakState::new(SHAKE128_RATE, SHAKE_PAD);
    state.absorb(data);
    state.squeeze(out_len)
}

/// SHAKE256 extendable-output function.
pub fn shake256(data: &[u8], out_len: usize) -> Vec<u8> {
    let mut state = KeccakState::new(SHAKE256_RATE, SHAKE_PAD);
    state.absorb(data);
    state.squeeze(out_len)
}

fn cshake(data: &[u8], out_len: usize, name: &[u8], custom: &[u8], rate: usize) -> Vec<u8> {
    if name.is_empty() && custom.is_empty() {
        let mut state = KeccakState::new(rate, SHAKE_PAD);
        state.absorb(data);
        return state.squeeze(out_len);
    }

    let mut header = encode_string(name);
    header.extend(encode_string(custom));
    let header = bytepad(&header, rate);

    let mut state = KeccakState::new(rate, CSHAKE_PAD);
    state.absorb(&header);
    state.absorb(data);
    state.squeeze(out_len)
}

/// cSHAKE128, used by the RHX-256 cSHAKE key-schedule backend.
pub fn cshake128(data: &[u8], out_len: usize, name: &[u8], custom: &[u8]) -> Vec<u8> {
    cshake(data, out_len, name, custom, SHAKE128_RATE)
}

/// cSHAKE256, used by the RHX-512 cSHAKE key-schedule backend.
pub fn cshake256(data: &[u8], out_len: usize, name: &[u8], custom: &[u8]) -> Vec<u8> {
    cshake(data, out_len, name, custom, SHAKE256_RATE)
}

fn kmac(
    key: &[u8],
    data: &[u8],
    out_len: usize,
    custom: &[u8],
    rate: usize,
) -> Vec<u8> {
    let mut new_x = bytepad(&encode_string(key), rate);
    new_x.extend_from_slice(data);
    new_x.extend(right_encode((out_len as u64) * 8));
    cshake(&new_x, out_len, b"KMAC", custom, rate)
}

/// KMAC128 (NIST SP 800-185): a cSHAKE128-based keyed MAC.
pub fn kmac128(key: &[u8], data: &[u8], out_len: usize, custom: &[u8]) -> Vec<u8> {
    kmac(key, data, out_len, custom, SHAKE128_RATE)
}

/// KMAC256 (NIST SP 800-185): a cSHAKE256-based keyed MAC. This is the
/// variant HBA-RHX-256 and HBA-RHX-512 both rely on for tag computation,
/// since the component table names KMAC-256/512 by tag length rather than
/// by the underlying cSHAKE width.
pub fn kmac256(key: &[u8], data: &[u8], out_len: usize, custom: &[u8]) -> Vec<u8> {
    kmac(key, data, out_len, custom, SHAKE256_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha3_256_deterministic_and_sensitive() {
        let a = sha3_256(b"abc");
        let b = sha3_256(b"abc");
        let c = sha3_256(b"abd");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_sha3_256_empty_fips202_vector() {
        let digest = sha3_256(b"");
        let expected = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";
        assert_eq!(hex::encode(digest), expected);
    }

    #[test]
    fn test_cshake128_nist_sp800_185_sample_1() {
        // NIST SP 800-185 Appendix A, cSHAKE128 Sample #1: 4-byte message,
        // empty function name, customization string "Email Signature".
        let msg = [0x00u8, 0x01, 0x02, 0x03];
        let out = cshake128(&msg, 32, b"", b"Email Signature");
        let expected = "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5";
        assert_eq!(hex::encode(out), expected);
    }

    #[test]
    fn test_sha3_512_deterministic_and_sensitive() {
        let a = sha3_512(b"abc");
        let b = sha3_512(b"abc");
        let c = sha3_512(b"abd");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_shake128_variable_length_output_is_a_prefix() {
        let long = shake128(b"seed", 64);
        let short = shake128(b"seed", 16);
        assert_eq!(&long[..16], &short[..]);
    }

    #[test]
    fn test_shake256_variable_length_output_is_a_prefix() {
        let long = shake256(b"seed", 64);
        let short = shake256(b"seed", 16);
        assert_eq!(&long[..16], &short[..]);
    }

    #[test]
    fn test_cshake_empty_name_and_custom_matches_shake() {
        // SP 800-185: cSHAKE with empty N and S reduces to plain SHAKE.
        let a = cshake128(b"data", 32, b"", b"");
        let b = shake128(b"data", 32);
        assert_eq!(a, b);

        let c = cshake256(b"data", 32, b"", b"");
        let d = shake256(b"data", 32);
        assert_eq!(c, d);
    }

    #[test]
    fn test_cshake_customization_changes_output() {
        let a = cshake256(b"data", 32, b"RHX", b"");
        let b = cshake256(b"data", 32, b"RHX", b"tweak");
        let c = cshake256(b"data", 32, b"RHX", b"");
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_kmac256_is_deterministic_and_key_sensitive() {
        let key_a = [0x11u8; 32];
        let key_b = [0x22u8; 32];
        let tag_a = kmac256(&key_a, b"message", 32, b"");
        let tag_a2 = kmac256(&key_a, b"message", 32, b"");
        let tag_b = kmac256(&key_b, b"message", 32, b"");
        assert_eq!(tag_a, tag_a2);
        assert_ne!(tag_a, tag_b);
        assert_eq!(tag_a.len(), 32);
    }

    #[test]
    fn test_kmac128_output_length_matches_request() {
        let key = [0x01u8; 16];
        let tag = kmac128(&key, b"x", 64, b"custom");
        assert_eq!(tag.len(), 64);
    }
}
