//! Absorb and squeeze phases of the sponge construction
//!
//! ```text
//! Idle ──update──▶ Absorbing ──digest──▶ Squeezing ──squeeze──▶ Squeezing
//!   └──────────────────digest───────────────▲
//! ```
//!
//! `reset` returns any phase to `Idle`. Calling `update` or `digest` while
//! squeezing, or `squeeze` before `digest`, is a contract violation and
//! panics.

use zeroize::Zeroize;

use crate::error::SpongeError;
use crate::primitives::{extract, permute, xor_block};
use crate::state::{Phase, SpongeState};

impl SpongeState {
    /// Absorb more of the message
    ///
    /// Full rate blocks are permuted into the lanes immediately; fewer than
    /// `rate / 8` bytes stay buffered for the next call, so the result does
    /// not depend on how the message is split across calls.
    pub fn update(&mut self, msg: &[u8]) -> Result<(), SpongeError> {
        assert!(
            self.phase != Phase::Squeezing,
            "update on a finalised sponge; reset it first"
        );
        self.phase = Phase::Absorbing;

        let rate_bytes = self.rate / 8;
        let word_bytes = self.word_size / 8;
        let mut msg = msg;

        if !self.message.is_empty() {
            let take = (rate_bytes - self.message.len()).min(msg.len());
            self.reserve(take)?;
            self.message.extend_from_slice(&msg[..take]);
            msg = &msg[take..];

            if self.message.len() < rate_bytes {
                return Ok(());
            }
            xor_block(&mut self.lanes, &self.message, word_bytes);
            permute(&mut self.lanes, self.word_size);
            self.message.fill(0);
            self.message.clear();
        }

        let mut blocks = msg.chunks_exact(rate_bytes);
        for block in &mut blocks {
            xor_block(&mut self.lanes, block, word_bytes);
            permute(&mut self.lanes, self.word_size);
        }

        let tail = blocks.remainder();
        self.reserve(tail.len())?;
        self.message.extend_from_slice(tail);
        Ok(())
    }

    /// Absorb the last part of the message, pad, and squeeze one digest
    ///
    /// `msg` holds the final bytes. When `bits` is non-zero, the last byte of
    /// `msg` is only partially part of the message: its `bits` low-order bits
    /// are absorbed and the rest ignored. `suffix` is the domain separation
    /// bit string (`'1'` sets a bit, any other character leaves it clear),
    /// appended least significant bit first.
    ///
    /// With `out == None` the state advances exactly as if a digest had been
    /// written, so a later [`SpongeState::squeeze_into`] continues from the
    /// same point.
    ///
    /// # Panics
    ///
    /// If `bits >= 8`, if `bits > 0` with an empty `msg`, if `out` is shorter
    /// than [`SpongeState::digest_len`], or if the sponge is already
    /// squeezing.
    pub fn digest_into(
        &mut self,
        msg: &[u8],
        bits: usize,
        suffix: &str,
        out: Option<&mut [u8]>,
    ) -> Result<(), SpongeError> {
        assert!(bits < 8, "at most 7 extra bits, got {bits}");
        assert!(bits == 0 || !msg.is_empty(), "extra bits need a final byte");
        assert!(
            self.phase != Phase::Squeezing,
            "digest on a finalised sponge; reset it first"
        );
        if let Some(out) = out.as_deref() {
            assert!(out.len() >= self.digest_len(), "digest buffer too short");
        }

        let (whole, partial) = match msg.split_last() {
            Some((last, rest)) if bits > 0 => (rest, *last & ((1u8 << bits) - 1)),
            _ => (msg, 0),
        };
        self.update(whole)?;

        let rate_bytes = self.rate / 8;
        self.reserve((bits + suffix.len()).div_ceil(8) + rate_bytes)?;

        let mut last = partial;
        let mut used = bits;
        for c in suffix.bytes() {
            if c == b'1' {
                last |= 1 << used;
            }
            used += 1;
            if used == 8 {
                self.message.push(last);
                last = 0;
                used = 0;
            }
        }
        self.pad(last, used);

        let word_bytes = self.word_size / 8;
        for block in self.message.chunks(rate_bytes) {
            xor_block(&mut self.lanes, block, word_bytes);
            permute(&mut self.lanes, self.word_size);
        }
        self.message.zeroize();

        self.phase = Phase::Squeezing;
        self.squeezing_phase(out);
        Ok(())
    }

    /// [`SpongeState::digest_into`] into a freshly allocated buffer
    pub fn digest(
        &mut self,
        msg: &[u8],
        bits: usize,
        suffix: &str,
    ) -> Result<Vec<u8>, SpongeError> {
        let mut out = self.digest_buffer()?;
        self.digest_into(msg, bits, suffix, Some(&mut out))?;
        Ok(out)
    }

    /// Squeeze out another digest
    ///
    /// # Panics
    ///
    /// If the sponge has not been finalised with a digest, or `out` is
    /// shorter than [`SpongeState::digest_len`].
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        assert!(self.phase == Phase::Squeezing, "squeeze before digest");
        assert!(out.len() >= self.digest_len(), "digest buffer too short");

        permute(&mut self.lanes, self.word_size);
        self.squeezing_phase(Some(out));
    }

    /// [`SpongeState::squeeze_into`] into a freshly allocated buffer
    pub fn squeeze(&mut self) -> Result<Vec<u8>, SpongeError> {
        let mut out = self.digest_buffer()?;
        self.squeeze_into(&mut out);
        Ok(out)
    }

    /// Run the permutation `times` times
    pub fn simple_squeeze(&mut self, times: usize) {
        for _ in 0..times {
            permute(&mut self.lanes, self.word_size);
        }
    }

    /// Skip `times` digests without producing them
    ///
    /// Afterwards [`SpongeState::squeeze_into`] yields the digest that would
    /// follow `times` discarded squeezes.
    ///
    /// # Panics
    ///
    /// If the sponge has not been finalised with a digest.
    pub fn fast_squeeze(&mut self, times: usize) {
        assert!(self.phase == Phase::Squeezing, "squeeze before digest");
        self.simple_squeeze(times * self.blocks_per_digest());
    }

    /// Permutations spent on one digest: `ceil(output / rate)`
    pub fn blocks_per_digest(&self) -> usize {
        self.output.div_ceil(self.rate)
    }

    /// Append pad10*1 after `used` pending bits held in `last`
    ///
    /// When the pending byte is the final byte of a block and has room for
    /// both marker bits, the two ones share it.
    fn pad(&mut self, last: u8, used: usize) {
        let rate_bytes = self.rate / 8;
        let room = rate_bytes - self.message.len() % rate_bytes;

        if room == 1 && used < 7 {
            self.message.push(last | (1 << used) | 0x80);
            return;
        }

        self.message.push(last | (1 << used));
        let filled = self.message.len() % rate_bytes;
        let zeros = if filled == 0 {
            rate_bytes - 1
        } else {
            rate_bytes - 1 - filled
        };
        self.message.resize(self.message.len() + zeros, 0);
        self.message.push(0x80);
    }

    /// Copy `output` bits out of the lanes, permuting between rate blocks
    ///
    /// Expects the lanes to be freshly permuted. Bits above `output` in the
    /// last byte are cleared.
    fn squeezing_phase(&mut self, mut out: Option<&mut [u8]>) {
        let rate_bytes = self.rate / 8;
        let word_bytes = self.word_size / 8;
        let digest_len = self.digest_len();
        let mut written = 0;

        for block in 0..self.blocks_per_digest() {
            if block > 0 {
                permute(&mut self.lanes, self.word_size);
            }
            if let Some(out) = out.as_deref_mut() {
                let take = rate_bytes.min(digest_len - written);
                extract(&self.lanes, &mut out[written..written + take], word_bytes);
                written += take;
            }
        }

        if let Some(out) = out {
            let tail_bits = self.output % 8;
            if tail_bits != 0 {
                out[digest_len - 1] &= (1u8 << tail_bits) - 1;
            }
        }
    }

    fn digest_buffer(&self) -> Result<Vec<u8>, SpongeError> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.digest_len())?;
        out.resize(self.digest_len(), 0);
        Ok(out)
    }
}
