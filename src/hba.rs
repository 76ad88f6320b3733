//! HBA: Hash-Based Authentication, the RHX/KMAC AEAD construction (§4.H).

use zeroize::Zeroize;

use crate::cipher::modes::increment_counter_be;
use crate::cipher::schedule::DefaultRhxSchedule;
use crate::cipher::state::{CipherState, CipherVariant, KeyParams};
use crate::cipher::{ctr_transform, BLOCK_SIZE};
use crate::digest::sha3::kmac256;
use crate::error::CoreError;
use crate::util::{ct_eq, u64_to_le_bytes};

/// Selects HBA-RHX-256 or HBA-RHX-512: cipher-key length and tag length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HbaVariant {
    HbaRhx256,
    HbaRhx512,
}

impl HbaVariant {
    fn cipher_variant(self) -> CipherVariant {
        match self {
            HbaVariant::HbaRhx256 => CipherVariant::Rhx256,
            HbaVariant::HbaRhx512 => CipherVariant::Rhx512,
        }
    }

    fn key_len(self) -> usize {
        self.cipher_variant().key_len()
    }

    fn tag_len(self) -> usize {
        match self {
            HbaVariant::HbaRhx256 => 32,
            HbaVariant::HbaRhx512 => 64,
        }
    }
}

const ENC_LABEL: &[u8] = b"HBA-ENC";
const MAC_LABEL: &[u8] = b"HBA-MAC";

/// Owns the CTR(RHX) cipher state, the derived KMAC key, the running
/// 16-byte nonce, and the message counter (§3 "HBA state").
pub struct HbaState {
    cipher: CipherState,
    mac_key: Vec<u8>,
    nonce: [u8; BLOCK_SIZE],
    counter: u64,
    tag_len: usize,
    disposed: bool,
}

impl HbaState {
    /// Derive `K_enc`/`K_mac` from `key` and `info` via the configured RHX
    /// KDF backend (domain-separated by label, §4.H.1) and set up the CTR
    /// cipher. The running nonce starts at all-zero.
    pub fn initialize(key: &[u8], info: &[u8], variant: HbaVariant) -> Result<Self, CoreError> {
        if key.len() != variant.key_len() {
            return Err(CoreError::InvalidKeyLength);
        }

        let mut enc_label = ENC_LABEL.to_vec();
        enc_label.extend_from_slice(info);
        let k_enc = rhx_expand(key, &enc_label, variant.key_len());

        let mut mac_label = MAC_LABEL.to_vec();
        mac_label.extend_from_slice(info);
        let mac_key = rhx_expand(key, &mac_label, variant.key_len());

        let initial_nonce = [0u8; BLOCK_SIZE];
        let params = KeyParams::new(&k_enc).with_nonce(&initial_nonce).with_info(info);
        let cipher = CipherState::initialize(&params, true, variant.cipher_variant())?;

        Ok(HbaState {
            cipher,
            mac_key,
            nonce: initial_nonce,
            counter: 0,
            tag_len: variant.tag_len(),
            disposed: false,
        })
    }

    fn check_live(&self) -> Result<(), CoreError> {
        if self.disposed {
            Err(CoreError::StateMisuse)
        } else {
            Ok(())
        }
    }

    fn compute_tag(&self, nonce: &[u8; BLOCK_SIZE], ad: &[u8], ciphertext: &[u8]) -> Vec<u8> {
        let mut mac_input = Vec::with_capacity(nonce.len() + ad.len() + ciphertext.len() + 24);
        mac_input.extend_from_slice(nonce);
        mac_input.extend_from_slice(ad);
        mac_input.extend_from_slice(ciphertext);
        mac_input.extend_from_slice(&u64_to_le_bytes(ad.len() as u64));
        mac_input.extend_from_slice(&u64_to_le_bytes(ciphertext.len() as u64));
        mac_input.extend_from_slice(&u64_to_le_bytes(self.counter));
        kmac256(&self.mac_key, &mac_input, self.tag_len, &[])
    }

    fn advance(&mut self) {
        self.counter = self.counter.wrapping_add(1);
        increment_counter_be(&mut self.nonce);
    }

    /// Encrypt `plaintext` and authenticate it together with `ad`, emitting
    /// `C || T` (§4.H steps 2-5).
    pub fn seal(&mut self, plaintext: &[u8], ad: &[u8]) -> Result<Vec<u8>, CoreError> {
        self.check_live()?;

        let message_nonce = self.nonce;
        self.cipher.set_nonce(message_nonce)?;
        let mut ciphertext = vec![0u8; plaintext.len()];
        ctr_transform(&mut self.cipher, &mut ciphertext, plaintext, plaintext.len())?;

        let tag = self.compute_tag(&message_nonce, ad, &ciphertext);
        self.advance();

        let mut output = ciphertext;
        output.extend_from_slice(&tag);
        Ok(output)
    }

    /// Verify and decrypt `ciphertext_and_tag`. On a tag mismatch, returns
    /// `AuthenticationFailure` and produces no plaintext (§4.H
    /// Decryption/verification).
    pub fn open(&mut self, ciphertext_and_tag: &[u8], ad: &[u8]) -> Result<Vec<u8>, CoreError> {
        self.check_live()?;
        if ciphertext_and_tag.len() < self.tag_len {
            return Err(CoreError::BufferMismatch);
        }

        let split_at = ciphertext_and_tag.len() - self.tag_len;
        let (ciphertext, received_tag) = ciphertext_and_tag.split_at(split_at);

        let message_nonce = self.nonce;
        let expected_tag = self.compute_tag(&message_nonce, ad, ciphertext);
        self.advance();

        if !ct_eq(&expected_tag, received_tag) {
            return Err(CoreError::AuthenticationFailure);
        }

        self.cipher.set_nonce(message_nonce)?;
        let mut plaintext = vec![0u8; ciphertext.len()];
        ctr_transform(&mut self.cipher, &mut plaintext, ciphertext, ciphertext.len())?;
        Ok(plaintext)
    }

    /// Zeroize the MAC key, the running nonce, and the underlying cipher
    /// state's round keys, and invalidate the state.
    pub fn dispose(&mut self) {
        self.mac_key.zeroize();
        self.nonce.zeroize();
        self.cipher.dispose();
        self.disposed = true;
    }
}

impl Drop for HbaState {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Derive `out_len` bytes of subkey material through the configured RHX
/// KDF backend directly, rather than through [`rhx_schedule`]'s
/// round-key-shaped output — `ScheduleExpander` is defined for any length.
fn rhx_expand(key: &[u8], label: &[u8], out_len: usize) -> Vec<u8> {
    use crate::cipher::schedule::ScheduleExpander;
    DefaultRhxSchedule::expand(key, label, out_len)
}
