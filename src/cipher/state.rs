//! `CipherVariant`, `KeyParams`, and `CipherState` (§3 DATA MODEL).

use zeroize::Zeroize;

use crate::cipher::schedule::{aes_schedule, rhx_schedule, to_decryption_order, DefaultRhxSchedule};
use crate::error::CoreError;

/// Selects key size, round count, and schedule strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherVariant {
    Aes128,
    Aes256,
    Rhx256,
    Rhx512,
}

impl CipherVariant {
    pub fn key_len(self) -> usize {
        match self {
            CipherVariant::Aes128 => 16,
            CipherVariant::Aes256 => 32,
            CipherVariant::Rhx256 => 32,
            CipherVariant::Rhx512 => 64,
        }
    }

    pub fn rounds(self) -> usize {
        match self {
            CipherVariant::Aes128 => 10,
            CipherVariant::Aes256 => 14,
            CipherVariant::Rhx256 => 22,
            CipherVariant::Rhx512 => 30,
        }
    }
}

/// A borrowed bundle of initialization material: the user key, an optional
/// 16-byte IV/nonce (required for CBC/CTR), and an optional RHX info/tweak
/// string (ignored by the AES variants).
pub struct KeyParams<'a> {
    pub key: &'a [u8],
    pub nonce: Option<&'a [u8]>,
    pub info: Option<&'a [u8]>,
}

impl<'a> KeyParams<'a> {
    pub fn new(key: &'a [u8]) -> Self {
        KeyParams { key, nonce: None, info: None }
    }

    pub fn with_nonce(mut self, nonce: &'a [u8]) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_info(mut self, info: &'a [u8]) -> Self {
        self.info = Some(info);
        self
    }
}

/// Process-local mutable cipher state. Owns round-key material that must be
/// zeroized on disposal and is never copyable.
pub struct CipherState {
    pub(crate) round_keys: Vec<u32>,
    pub(crate) rounds: usize,
    pub(crate) nonce: Option<[u8; 16]>,
    pub(crate) variant: CipherVariant,
    pub(crate) encrypting: bool,
    disposed: bool,
}

impl CipherState {
    /// The only constructor. Fails if `params.key` does not match
    /// `variant`'s required length.
    pub fn initialize(
        params: &KeyParams,
        for_encryption: bool,
        variant: CipherVariant,
    ) -> Result<Self, CoreError> {
        if params.key.len() != variant.key_len() {
            return Err(CoreError::InvalidKeyLength);
        }

        let rounds = variant.rounds();
        let info = params.info.unwrap_or(&[]);

        let enc_round_keys = match variant {
            CipherVariant::Aes128 => aes_schedule(params.key, 4, rounds),
            CipherVariant::Aes256 => aes_schedule(params.key, 8, rounds),
            CipherVariant::Rhx256 | CipherVariant::Rhx512 => {
                rhx_schedule::<DefaultRhxSchedule>(params.key, info, rounds)
            }
        };

        let round_keys = if for_encryption {
            enc_round_keys
        } else {
            to_decryption_order(&enc_round_keys, rounds)
        };

        let nonce = match params.nonce {
            Some(n) => {
                if n.len() != 16 {
                    return Err(CoreError::InvalidNonceLength);
                }
                let mut buf = [0u8; 16];
                buf.copy_from_slice(n);
                Some(buf)
            }
            None => None,
        };

        Ok(CipherState {
            round_keys,
            rounds,
            nonce,
            variant,
            encrypting: for_encryption,
            disposed: false,
        })
    }

    pub fn variant(&self) -> CipherVariant {
        self.variant
    }

    pub(crate) fn check_live(&self) -> Result<(), CoreError> {
        if self.disposed {
            Err(CoreError::StateMisuse)
        } else {
            Ok(())
        }
    }

    pub(crate) fn nonce_mut(&mut self) -> Result<&mut [u8; 16], CoreError> {
        self.check_live()?;
        self.nonce.as_mut().ok_or(CoreError::InvalidNonceLength)
    }

    /// Reset the CTR/CBC chaining value without re-running the key
    /// schedule. Used by HBA to re-seat its own running nonce as the CTR
    /// start-of-message counter on every call.
    pub(crate) fn set_nonce(&mut self, nonce: [u8; 16]) -> Result<(), CoreError> {
        self.check_live()?;
        self.nonce = Some(nonce);
        Ok(())
    }

    /// Zeroize all sensitive memory and invalidate the state. Calling this
    /// more than once is a no-op, not an error.
    pub fn dispose(&mut self) {
        self.round_keys.zeroize();
        if let Some(nonce) = &mut self.nonce {
            nonce.zeroize();
        }
        self.disposed = true;
    }
}

impl Drop for CipherState {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_rejects_wrong_key_length() {
        let key = [0u8; 10];
        let params = KeyParams::new(&key);
        let err = CipherState::initialize(&params, true, CipherVariant::Aes128).unwrap_err();
        assert_eq!(err, CoreError::InvalidKeyLength);
    }

    #[test]
    fn test_dispose_zeroizes_and_blocks_further_use() {
        let key = [0x11u8; 16];
        let params = KeyParams::new(&key);
        let mut state = CipherState::initialize(&params, true, CipherVariant::Aes128).unwrap();
        assert!(state.round_keys.iter().any(|&w| w != 0));
        state.dispose();
        assert!(state.round_keys.iter().all(|&w| w == 0));
        assert_eq!(state.check_live().unwrap_err(), CoreError::StateMisuse);
        // Double-dispose is a no-op, not a panic or a second error path.
        state.dispose();
    }

    #[test]
    fn test_cbc_requires_nonce() {
        let key = [0u8; 16];
        let params = KeyParams::new(&key);
        let mut state = CipherState::initialize(&params, true, CipherVariant::Aes128).unwrap();
        assert_eq!(state.nonce_mut().unwrap_err(), CoreError::InvalidNonceLength);
    }
}
