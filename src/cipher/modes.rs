//! ECB, CBC, and CTR mode drivers over a `CipherState` (§4.G).

use crate::cipher::primitives::BLOCK_SIZE;
use crate::cipher::state::CipherState;
use crate::error::CoreError;

#[cfg(feature = "hardware-aes")]
use crate::cipher::hwaes::{decrypt_block, encrypt_block};
#[cfg(not(feature = "hardware-aes"))]
use crate::cipher::primitives::{decrypt_block, encrypt_block};

fn xor_block(a: &[u8; BLOCK_SIZE], b: &[u8; BLOCK_SIZE]) -> [u8; BLOCK_SIZE] {
    let mut out = [0u8; BLOCK_SIZE];
    for i in 0..BLOCK_SIZE {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// `out = Enc(in)`. No chaining state.
pub fn ecb_encrypt_block(
    state: &CipherState,
    out: &mut [u8; BLOCK_SIZE],
    input: &[u8; BLOCK_SIZE],
) -> Result<(), CoreError> {
    state.check_live()?;
    *out = encrypt_block(input, &state.round_keys, state.rounds);
    Ok(())
}

/// `out = Dec(in)`. No chaining state.
pub fn ecb_decrypt_block(
    state: &CipherState,
    out: &mut [u8; BLOCK_SIZE],
    input: &[u8; BLOCK_SIZE],
) -> Result<(), CoreError> {
    state.check_live()?;
    *out = decrypt_block(input, &state.round_keys, state.rounds);
    Ok(())
}

/// `out = Enc(in XOR state.nonce); state.nonce = out`.
pub fn cbc_encrypt_block(
    state: &mut CipherState,
    out: &mut [u8; BLOCK_SIZE],
    input: &[u8; BLOCK_SIZE],
) -> Result<(), CoreError> {
    state.check_live()?;
    let chained = {
        let nonce = state.nonce_mut()?;
        xor_block(input, nonce)
    };
    let ciphertext = encrypt_block(&chained, &state.round_keys, state.rounds);
    *state.nonce_mut()? = ciphertext;
    *out = ciphertext;
    Ok(())
}

/// `tmp = Dec(in); out = tmp XOR state.nonce; state.nonce = in`.
pub fn cbc_decrypt_block(
    state: &mut CipherState,
    out: &mut [u8; BLOCK_SIZE],
    input: &[u8; BLOCK_SIZE],
) -> Result<(), CoreError> {
    state.check_live()?;
    let tmp = decrypt_block(input, &state.round_keys, state.rounds);
    let plaintext = {
        let nonce = state.nonce_mut()?;
        let plaintext = xor_block(&tmp, nonce);
        *nonce = *input;
        plaintext
    };
    *out = plaintext;
    Ok(())
}

pub(crate) fn increment_counter_be(counter: &mut [u8; BLOCK_SIZE]) {
    for byte in counter.iter_mut().rev() {
        if *byte == 0xff {
            *byte = 0;
        } else {
            *byte += 1;
            return;
        }
    }
    // All bytes were 0xff: wraps to all-zero, modulo 2^128.
}

/// XORs `len` bytes of keystream into `input`, producing `out`. The
/// keystream is the block cipher applied to successive values of
/// `state.nonce` read as a 128-bit big-endian counter, incremented by one
/// after each full or partial block; it is its own inverse.
pub fn ctr_transform(
    state: &mut CipherState,
    out: &mut [u8],
    input: &[u8],
    len: usize,
) -> Result<(), CoreError> {
    state.check_live()?;
    if out.len() < len || input.len() < len {
        return Err(CoreError::BufferMismatch);
    }

    let mut offset = 0;
    while offset < len {
        let counter_block = *state.nonce_mut()?;
        let keystream = encrypt_block(&counter_block, &state.round_keys, state.rounds);
        increment_counter_be(state.nonce_mut()?);

        let take = (len - offset).min(BLOCK_SIZE);
        for i in 0..take {
            out[offset + i] = input[offset + i] ^ keystream[i];
        }
        offset += take;
    }

    Ok(())
}
