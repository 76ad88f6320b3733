//! AES/RHX cipher core: round primitives, key schedules, state, and modes.

pub mod modes;
pub mod primitives;
pub mod schedule;
pub mod state;

#[cfg(feature = "hardware-aes")]
pub mod hwaes;

pub use modes::{cbc_decrypt_block, cbc_encrypt_block, ctr_transform, ecb_decrypt_block, ecb_encrypt_block};
pub use primitives::BLOCK_SIZE;
pub use state::{CipherState, CipherVariant, KeyParams};
