//! Optional AES-NI accelerated round path (§4.E, §9 "Global state").
//!
//! Gated behind the `hardware-aes` feature and x86_64. CPU-feature
//! detection is memoized exactly once in a `OnceLock`, never re-probed per
//! block, per the design notes' instruction that hardware detection may be
//! cached in a read-only location but nothing else may be process-global.
//! Falls back to [`super::primitives`] on any other target or when the CPU
//! lacks the `aes` extension; both paths must produce byte-identical
//! results for the same round keys.

use std::sync::OnceLock;

use crate::cipher::primitives::{decrypt_block as sw_decrypt_block, encrypt_block as sw_encrypt_block, BLOCK_SIZE};

fn aes_ni_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        #[cfg(target_arch = "x86_64")]
        let available = is_x86_feature_detected!("aes") && is_x86_feature_detected!("sse2");
        #[cfg(not(target_arch = "x86_64"))]
        let available = false;

        log::debug!(
            "hardware-aes: AES-NI {}",
            if available { "available, using accelerated round path" } else { "unavailable, falling back to software" }
        );
        available
    })
}

pub fn encrypt_block(block: &[u8; BLOCK_SIZE], round_keys: &[u32], rounds: usize) -> [u8; BLOCK_SIZE] {
    #[cfg(target_arch = "x86_64")]
    {
        if aes_ni_available() {
            return unsafe { x86_64_impl::encrypt(block, round_keys, rounds) };
        }
    }
    sw_encrypt_block(block, round_keys, rounds)
}

pub fn decrypt_block(block: &[u8; BLOCK_SIZE], round_keys: &[u32], rounds: usize) -> [u8; BLOCK_SIZE] {
    #[cfg(target_arch = "x86_64")]
    {
        if aes_ni_available() {
            return unsafe { x86_64_impl::decrypt(block, round_keys, rounds) };
        }
    }
    sw_decrypt_block(block, round_keys, rounds)
}

#[cfg(target_arch = "x86_64")]
mod x86_64_impl {
    use super::BLOCK_SIZE;
    use std::arch::x86_64::{
        __m128i, _mm_aesdec_si128, _mm_aesdeclast_si128, _mm_aesenc_si128, _mm_aesenclast_si128,
        _mm_loadu_si128, _mm_storeu_si128, _mm_xor_si128,
    };

    fn round_key_to_m128i(round_keys: &[u32], round: usize) -> __m128i {
        let words = &round_keys[round * 4..round * 4 + 4];
        let mut bytes = [0u8; 16];
        for (i, w) in words.iter().enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&w.to_be_bytes());
        }
        unsafe { _mm_loadu_si128(bytes.as_ptr() as *const __m128i) }
    }

    /// # Safety
    /// Caller must have confirmed the `aes` and `sse2` CPU features are
    /// present (via [`super::aes_ni_available`]).
    pub unsafe fn encrypt(
        block: &[u8; BLOCK_SIZE],
        round_keys: &[u32],
        rounds: usize,
    ) -> [u8; BLOCK_SIZE] {
        let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);
        state = _mm_xor_si128(state, round_key_to_m128i(round_keys, 0));

        for round in 1..rounds {
            state = _mm_aesenc_si128(state, round_key_to_m128i(round_keys, round));
        }
        state = _mm_aesenclast_si128(state, round_key_to_m128i(round_keys, rounds));

        let mut out = [0u8; BLOCK_SIZE];
        _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, state);
        out
    }

    /// # Safety
    /// Caller must have confirmed the `aes` and `sse2` CPU features are
    /// present (via [`super::aes_ni_available`]). `round_keys` must already
    /// be in the equivalent-inverse-cipher order `aesdec` expects.
    pub unsafe fn decrypt(
        block: &[u8; BLOCK_SIZE],
        round_keys: &[u32],
        rounds: usize,
    ) -> [u8; BLOCK_SIZE] {
        let mut state = _mm_loadu_si128(block.as_ptr() as *const __m128i);
        state = _mm_xor_si128(state, round_key_to_m128i(round_keys, 0));

        for round in 1..rounds {
            state = _mm_aesdec_si128(state, round_key_to_m128i(round_keys, round));
        }
        state = _mm_aesdeclast_si128(state, round_key_to_m128i(round_keys, rounds));

        let mut out = [0u8; BLOCK_SIZE];
        _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, state);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::schedule::aes_schedule;

    #[test]
    fn test_hardware_path_matches_software_when_available() {
        let key = [0x2bu8; 16];
        let w = aes_schedule(&key, 4, 10);
        let block = [0x11u8; 16];

        let sw = sw_encrypt_block(&block, &w, 10);
        let maybe_hw = encrypt_block(&block, &w, 10);
        // Falls back to the software path bit-for-bit when AES-NI is
        // unavailable (e.g. non-x86_64 CI runners), so this holds either way.
        assert_eq!(sw, maybe_hw);
    }
}
