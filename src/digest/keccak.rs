//! Keccak-f[1600] permutation and sponge construction.
//!
//! This is the shared engine behind SHA-3, SHAKE, cSHAKE, and KMAC in
//! [`super::sha3`]. The permutation operates on a 1600-bit (200-byte) state
//! organized as twenty-five 64-bit lanes; everything above this module only
//! ever talks to it through [`KeccakState::absorb`] and
//! [`KeccakState::squeeze`].

const ROUNDS: usize = 24;

const RC: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

const ROTC: [u32; ROUNDS] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

const PILN: [usize; ROUNDS] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

fn keccak_f1600(state: &mut [u64; 25]) {
    for round in 0..ROUNDS {
        // Theta
        let mut bc = [0u64; 5];
        for i in 0..5 {
            bc[i] = state[i] ^ state[i + 5] ^ state[i + 10] ^ state[i + 15] ^ state[i + 20];
        }
        for i in 0..5 {
            let t = bc[(i + 4) % 5] ^ bc[(i + 1) % 5].rotate_left(1);
            for j in (0..25).step_by(5) {
                state[j + i] ^= t;
            }
        }

        // Rho + Pi
        let mut t = state[1];
        for i in 0..ROUNDS {
            let j = PILN[i];
            let tmp = state[j];
            state[j] = t.rotate_left(ROTC[i]);
            t = tmp;
        }

        // Chi
        for j in (0..25).step_by(5) {
            let mut bc = [0u64; 5];
            bc[..5].copy_from_slice(&state[j..j + 5]);
            for i in 0..5 {
                state[j + i] ^= (!bc[(i + 1) % 5]) & bc[(i + 2) % 5];
            }
        }

        // Iota
        state[0] ^= RC[round];
    }
}

/// A sponge over the Keccak-f[1600] permutation with a fixed byte `rate`.
///
/// The caller supplies the domain-separation padding byte (`0x06` for
/// SHA-3, `0x1f` for SHAKE/cSHAKE with an empty `N`/`S` pair, `0x04` for
/// cSHAKE/KMAC with a non-empty pair) since that choice lives above this
/// module.
pub struct KeccakState {
    lanes: [u64; 25],
    rate: usize,
    buf: Vec<u8>,
    pad: u8,
    squeezing: bool,
    squeeze_buf: Vec<u8>,
    squeeze_pos: usize,
}

impl KeccakState {
    pub fn new(rate: usize, pad: u8) -> Self {
        assert!(rate > 0 && rate < 200, "rate must fit the 200-byte state");
        KeccakState {
            lanes: [0u64; 25],
            rate,
            buf: Vec::with_capacity(rate),
            pad,
            squeezing: false,
            squeeze_buf: Vec::new(),
            squeeze_pos: 0,
        }
    }

    /// Absorb more input. May be called repeatedly before the first
    /// [`squeeze`](Self::squeeze) call; absorbing after squeezing begins is
    /// a misuse of the sponge and is not supported.
    pub fn absorb(&mut self, data: &[u8]) {
        debug_assert!(!self.squeezing, "cannot absorb after squeeze has begun");
        self.buf.extend_from_slice(data);
        while self.buf.len() >= self.rate {
            self.absorb_block(&self.buf[..self.rate].to_vec());
            self.buf.drain(..self.rate);
        }
    }

    fn absorb_block(&mut self, block: &[u8]) {
        for (i, chunk) in block.chunks(8).enumerate() {
            let mut lane_bytes = [0u8; 8];
            lane_bytes[..chunk.len()].copy_from_slice(chunk);
            self.lanes[i] ^= u64::from_le_bytes(lane_bytes);
        }
        keccak_f1600(&mut self.lanes);
    }

    fn finalize_absorb(&mut self) {
        let mut last = self.buf.clone();
        last.push(self.pad);
        last.resize(self.rate, 0);
        last[self.rate - 1] |= 0x80;
        self.absorb_block(&last);
        self.buf.clear();
        self.squeezing = true;
    }

    /// Produce `out_len` bytes of sponge output.
    pub fn squeeze(&mut self, out_len: usize) -> Vec<u8> {
        if !self.squeezing {
            self.finalize_absorb();
            self.squeeze_buf = self.squeeze_rate_bytes();
            self.squeeze_pos = 0;
        }

        let mut out = Vec::with_capacity(out_len);
        while out.len() < out_len {
            if self.squeeze_pos == self.squeeze_buf.len() {
                keccak_f1600(&mut self.lanes);
                self.squeeze_buf = self.squeeze_rate_bytes();
                self.squeeze_pos = 0;
            }
            let take = (out_len - out.len()).min(self.squeeze_buf.len() - self.squeeze_pos);
            out.extend_from_slice(&self.squeeze_buf[self.squeeze_pos..self.squeeze_pos + take]);
            self.squeeze_pos += take;
        }
        out
    }

    fn squeeze_rate_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.rate);
        for lane in self.lanes.iter().take(self.rate.div_ceil(8)) {
            out.extend_from_slice(&lane.to_le_bytes());
        }
        out.truncate(self.rate);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sponge_matches_sha3_256_empty_vector() {
        // Rate 136 / pad 0x06 is the SHA-3 domain separation; squeezing 32
        // bytes from an empty absorb must reproduce the published
        // SHA3-256("") known-answer value directly at the sponge level.
        let mut state = KeccakState::new(136, 0x06);
        let out = state.squeeze(32);
        let expected = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";
        assert_eq!(hex::encode(out), expected);
    }

    #[test]
    fn test_sponge_deterministic() {
        let mut a = KeccakState::new(136, 0x06);
        a.absorb(b"hello world");
        let out_a = a.squeeze(32);

        let mut b = KeccakState::new(136, 0x06);
        b.absorb(b"hello world");
        let out_b = b.squeeze(32);

        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_sponge_sensitive_to_input() {
        let mut a = KeccakState::new(136, 0x06);
        a.absorb(b"hello world");
        let out_a = a.squeeze(32);

        let mut b = KeccakState::new(136, 0x06);
        b.absorb(b"hello worle");
        let out_b = b.squeeze(32);

        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_squeeze_can_cross_multiple_permutation_calls() {
        let mut state = KeccakState::new(136, 0x1f);
        state.absorb(b"xof input");
        let out = state.squeeze(500);
        assert_eq!(out.len(), 500);
    }

    #[test]
    fn test_absorb_across_multiple_rate_blocks() {
        let long_input = vec![0x5au8; 1000];

        let mut a = KeccakState::new(136, 0x06);
        a.absorb(&long_input);
        let out_a = a.squeeze(32);

        let mut b = KeccakState::new(136, 0x06);
        for chunk in long_input.chunks(17) {
            b.absorb(chunk);
        }
        let out_b = b.squeeze(32);

        assert_eq!(out_a, out_b);
    }
}
