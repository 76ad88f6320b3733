//! RHX: the Rijndael-HX extended block cipher, standard AES, and the
//! HBA authenticated-encryption construction built on top of it.
//!
//! The cipher core lives in [`cipher`]: round primitives shared by AES and
//! RHX, the FIPS-197 and KDF-driven key schedules, and the ECB/CBC/CTR mode
//! drivers over a [`cipher::CipherState`]. [`hba`] wraps CTR(RHX) with a
//! KMAC tag to provide authenticated encryption. [`digest`] holds the hash
//! and KDF primitives (SHA-2, HMAC, HKDF-Expand, Keccak/SHA-3/SHAKE/cSHAKE/
//! KMAC) both of those depend on. Callers needing padding or a streaming
//! byte-at-a-time interface handle that themselves; this crate never does
//! I/O and never retries a failure internally.
//!
//! ```
//! use rhx_core::cipher::{CipherState, CipherVariant, KeyParams, ecb_encrypt_block};
//!
//! let key = [0x2bu8; 16];
//! let params = KeyParams::new(&key);
//! let state = CipherState::initialize(&params, true, CipherVariant::Aes128).unwrap();
//!
//! let plaintext = [0u8; 16];
//! let mut ciphertext = [0u8; 16];
//! ecb_encrypt_block(&state, &mut ciphertext, &plaintext).unwrap();
//! ```

pub mod cipher;
pub mod digest;
pub mod error;
pub mod hba;
pub mod util;

pub use error::CoreError;
pub use hba::{HbaState, HbaVariant};
