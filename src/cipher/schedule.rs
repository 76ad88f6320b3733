//! Key schedules: AES FIPS-197 and the two RHX KDF-driven extensions.
//!
//! `ScheduleExpander` models §9's "dual KDF backends" design note: both the
//! cSHAKE and HKDF(SHA-2) RHX extensions are implementations of the same
//! `(user_key, info, out_len) -> bytes` capability, and the cipher only ever
//! talks to whichever one the `cshake-schedule` / `hkdf-schedule` feature
//! selects.

use crate::cipher::primitives::{inv_mix_columns_round_key, sub_word, RCON};
use crate::digest::hkdf::{hkdf_expand_sha256, hkdf_expand_sha512};
use crate::digest::sha3::cshake256;

/// A key-derivation capability that produces arbitrary-length schedule
/// bytes from a user key, an optional info/tweak string, and a requested
/// output length. RHX's two backends are both single-method impls of this.
pub trait ScheduleExpander {
    fn expand(user_key: &[u8], info: &[u8], out_len: usize) -> Vec<u8>;
}

/// cSHAKE-256 backend, the default RHX key schedule (§4.F.1).
pub struct CshakeSchedule;

impl ScheduleExpander for CshakeSchedule {
    fn expand(user_key: &[u8], info: &[u8], out_len: usize) -> Vec<u8> {
        cshake256(user_key, out_len, b"RHX", info)
    }
}

/// HKDF(SHA-2)-Expand backend, the alternate RHX key schedule (§4.F.2). The
/// PRK is the user key directly; no Extract step runs over it.
pub struct HkdfSchedule;

impl ScheduleExpander for HkdfSchedule {
    fn expand(user_key: &[u8], info: &[u8], out_len: usize) -> Vec<u8> {
        let mut label = b"RHX-HKDF-EXPAND".to_vec();
        label.extend_from_slice(info);
        if user_key.len() > 32 {
            hkdf_expand_sha512(user_key, &label, out_len)
        } else {
            hkdf_expand_sha256(user_key, &label, out_len)
        }
    }
}

#[cfg(all(feature = "hkdf-schedule", not(feature = "cshake-schedule")))]
pub type DefaultRhxSchedule = HkdfSchedule;

#[cfg(any(feature = "cshake-schedule", not(feature = "hkdf-schedule")))]
pub type DefaultRhxSchedule = CshakeSchedule;

fn parse_words_be(bytes: &[u8]) -> Vec<u32> {
    bytes.chunks_exact(4).map(crate::util::be_bytes_to_u32).collect()
}

/// Derive RHX round-key words via the configured `ScheduleExpander`.
/// Output length is `(rounds + 1) * 16` bytes, parsed big-endian into
/// words, per §4.F.1/2.
pub fn rhx_schedule<E: ScheduleExpander>(user_key: &[u8], info: &[u8], rounds: usize) -> Vec<u32> {
    let out_len = (rounds + 1) * 16;
    let bytes = E::expand(user_key, info, out_len);
    parse_words_be(&bytes)
}

/// FIPS-197 AES key schedule. `nk` is the key length in 32-bit words (4, 6,
/// or 8); `rounds` is 10/12/14 accordingly.
pub fn aes_schedule(key: &[u8], nk: usize, rounds: usize) -> Vec<u32> {
    let total_words = 4 * (rounds + 1);
    let mut w = vec![0u32; total_words];

    for i in 0..nk {
        w[i] = u32::from_be_bytes([key[4 * i], key[4 * i + 1], key[4 * i + 2], key[4 * i + 3]]);
    }

    for i in nk..total_words {
        let mut temp = w[i - 1];
        if i % nk == 0 {
            temp = sub_word(temp.rotate_left(8)) ^ ((RCON[i / nk] as u32) << 24);
        } else if nk > 6 && i % nk == 4 {
            temp = sub_word(temp);
        }
        w[i] = w[i - nk] ^ temp;
    }

    w
}

/// Transform an encryption-order round-key word sequence into the
/// equivalent-inverse-cipher decryption order (§4.F): the first and last
/// round keys swap places, and InvMixColumns is applied to every interior
/// one, so [`super::primitives::decrypt_block`] can use the same
/// SubBytes/ShiftRows/MixColumns-shaped loop as encryption.
pub fn to_decryption_order(enc_round_keys: &[u32], rounds: usize) -> Vec<u32> {
    let mut dec = vec![0u32; enc_round_keys.len()];

    dec[0..4].copy_from_slice(&enc_round_keys[rounds * 4..rounds * 4 + 4]);
    dec[rounds * 4..rounds * 4 + 4].copy_from_slice(&enc_round_keys[0..4]);

    for round in 1..rounds {
        let src_round = rounds - round;
        let word: [u32; 4] = enc_round_keys[src_round * 4..src_round * 4 + 4]
            .try_into()
            .expect("round-key slice is exactly 4 words");
        let transformed = inv_mix_columns_round_key(&word);
        dec[round * 4..round * 4 + 4].copy_from_slice(&transformed);
    }

    dec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes128_schedule_first_words_match_the_key() {
        let key = [
            0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf,
            0x4f, 0x3c,
        ];
        let w = aes_schedule(&key, 4, 10);
        assert_eq!(w.len(), 44);
        assert_eq!(w[0], 0x2b7e1516);
        assert_eq!(w[1], 0x28aed2a6);
        assert_eq!(w[2], 0xabf71588);
        assert_eq!(w[3], 0x09cf4f3c);
    }

    #[test]
    fn test_decryption_order_swaps_first_and_last() {
        let key = [0u8; 16];
        let w = aes_schedule(&key, 4, 10);
        let dec = to_decryption_order(&w, 10);
        assert_eq!(&dec[0..4], &w[40..44]);
        assert_eq!(&dec[40..44], &w[0..4]);
    }

    #[test]
    fn test_rhx_schedule_is_deterministic_and_info_sensitive() {
        let key = [0x42u8; 32];
        let a = rhx_schedule::<CshakeSchedule>(&key, b"", 22);
        let b = rhx_schedule::<CshakeSchedule>(&key, b"", 22);
        let c = rhx_schedule::<CshakeSchedule>(&key, b"tweak", 22);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), (22 + 1) * 4);
    }

    #[test]
    fn test_rhx_backends_diverge() {
        let key = [0x11u8; 32];
        let cshake = rhx_schedule::<CshakeSchedule>(&key, b"", 22);
        let hkdf = rhx_schedule::<HkdfSchedule>(&key, b"", 22);
        assert_ne!(cshake, hkdf);
    }
}
