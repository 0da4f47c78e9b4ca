//! Nested HMAC over the Keccak sponge
//!
//! ```text
//! HMAC(K, m) = H((K0 ⊕ opad) || H((K0 ⊕ ipad) || m))
//! ```
//!
//! `K0` is the key right-padded with zero bits to one rate block. Keys longer
//! than a block are hashed first (SHA3 suffix, `min(output, rate)` bits).
//! The same sponge serves both passes: after the inner digest it is reset and
//! reused for the outer one, so it can keep squeezing afterwards.

use core::fmt;

use zeroize::Zeroize;

use crate::error::SpongeError;
use crate::params::{HMAC_INNER_PAD, HMAC_OUTER_PAD, SHA3_SUFFIX};
use crate::spec::ConcreteSpec;
use crate::state::SpongeState;

/// The state of one keyed hashing process
pub struct HmacState {
    pub(crate) sponge: SpongeState,
    /// `K0 ⊕ opad`, one rate block
    pub(crate) key_opad: Vec<u8>,
    /// `K0 ⊕ ipad`, one rate block; never marshalled, derived from `key_opad`
    pub(crate) key_ipad: Vec<u8>,
    /// Length of `K0` in bits, equal to the rate
    pub(crate) key_length: usize,
    /// The inner pad has not been absorbed yet
    pub(crate) ipad_pending: bool,
    /// Carried bits of a partially fed byte; always zero while `key_length`
    /// is byte aligned
    pub(crate) leftover: u8,
    /// Inner digest between the two passes
    pub(crate) scratch: Vec<u8>,
}

impl HmacState {
    /// Initialise for `spec` with a `key_bits`-bit key
    ///
    /// # Panics
    ///
    /// If `key` holds fewer than `key_bits` bits.
    pub fn new(spec: &ConcreteSpec, key: &[u8], key_bits: usize) -> Result<Self, SpongeError> {
        let mut state = Self {
            sponge: SpongeState::new(spec)?,
            key_opad: Vec::new(),
            key_ipad: Vec::new(),
            key_length: 0,
            ipad_pending: true,
            leftover: 0,
            scratch: Vec::new(),
        };
        state.set_key(key, key_bits)?;
        Ok(state)
    }

    /// Replace the key and restart the computation
    ///
    /// Only the low `key_bits % 8` bits of a trailing partial key byte are
    /// used.
    ///
    /// # Panics
    ///
    /// If `key` holds fewer than `key_bits` bits.
    pub fn set_key(&mut self, key: &[u8], key_bits: usize) -> Result<(), SpongeError> {
        assert!(key_bits <= key.len() * 8, "key shorter than {key_bits} bits");

        let rate = self.sponge.rate();
        let block_len = rate / 8;

        let mut block = Vec::new();
        block.try_reserve_exact(block_len)?;
        block.resize(block_len, 0u8);

        if key_bits > rate {
            let output = self.sponge.output().min(rate);
            let spec = ConcreteSpec::new(rate, self.sponge.capacity(), output)?;
            let mut hasher = SpongeState::new(&spec)?;
            let key = &key[..key_bits.div_ceil(8)];
            hasher.digest_into(key, key_bits % 8, SHA3_SUFFIX, Some(&mut block))?;
            hasher.destroy(true);
        } else {
            let key_len = key_bits.div_ceil(8);
            block[..key_len].copy_from_slice(&key[..key_len]);
            if key_bits % 8 != 0 {
                block[key_bits / 8] &= (1u8 << (key_bits % 8)) - 1;
            }
        }

        fill_pad(&mut self.key_opad, &block, HMAC_OUTER_PAD)?;
        fill_pad(&mut self.key_ipad, &block, HMAC_INNER_PAD)?;
        block.zeroize();

        self.key_length = rate;
        self.restart();
        Ok(())
    }

    /// Start a new message, optionally under a new key
    pub fn reset(&mut self, key: Option<(&[u8], usize)>) -> Result<(), SpongeError> {
        match key {
            Some((key, key_bits)) => self.set_key(key, key_bits),
            None => {
                self.restart();
                Ok(())
            }
        }
    }

    /// Absorb more of the message
    ///
    /// # Panics
    ///
    /// If the state has been wiped and no key set since.
    pub fn update(&mut self, msg: &[u8]) -> Result<(), SpongeError> {
        self.require_key();
        self.absorb_ipad()?;
        self.sponge.update(msg)
    }

    /// Finish the message and produce the MAC
    ///
    /// `msg`, `bits` and `suffix` have the same meaning as for
    /// [`SpongeState::digest_into`]; the suffix applies to both passes.
    /// The inner digest is zeroized on every return path.
    ///
    /// # Panics
    ///
    /// If the state has been wiped and no key set since.
    pub fn digest_into(
        &mut self,
        msg: &[u8],
        bits: usize,
        suffix: &str,
        out: Option<&mut [u8]>,
    ) -> Result<(), SpongeError> {
        self.require_key();
        self.absorb_ipad()?;

        let digest_len = self.sponge.digest_len();
        if self.scratch.len() < digest_len {
            self.scratch.try_reserve_exact(digest_len - self.scratch.len())?;
            self.scratch.resize(digest_len, 0);
        }

        let result = self.nested_digest(msg, bits, suffix, digest_len, out);
        self.scratch.zeroize();
        result
    }

    /// [`HmacState::digest_into`] into a freshly allocated buffer
    pub fn digest(
        &mut self,
        msg: &[u8],
        bits: usize,
        suffix: &str,
    ) -> Result<Vec<u8>, SpongeError> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.digest_len())?;
        out.resize(self.digest_len(), 0);
        self.digest_into(msg, bits, suffix, Some(&mut out))?;
        Ok(out)
    }

    /// Squeeze another block of output from the outer sponge
    pub fn squeeze_into(&mut self, out: &mut [u8]) {
        self.sponge.squeeze_into(out);
    }

    /// Skip `times` digests of the outer sponge
    pub fn fast_squeeze(&mut self, times: usize) {
        self.sponge.fast_squeeze(times);
    }

    /// Deep copy, including the key pads
    pub fn duplicate(&self) -> Result<Self, SpongeError> {
        Ok(Self {
            sponge: self.sponge.duplicate()?,
            key_opad: copy_buffer(&self.key_opad)?,
            key_ipad: copy_buffer(&self.key_ipad)?,
            key_length: self.key_length,
            ipad_pending: self.ipad_pending,
            leftover: self.leftover,
            scratch: Vec::new(),
        })
    }

    /// Overwrite the sponge, the key pads and the scratch buffer
    ///
    /// The state holds no key afterwards. Updating, digesting or marshalling
    /// it panics until [`HmacState::set_key`] is called again.
    pub fn wipe(&mut self) {
        self.sponge.wipe();
        self.key_opad.zeroize();
        self.key_ipad.zeroize();
        self.scratch.zeroize();
        self.leftover.zeroize();
        self.key_length = 0;
        self.ipad_pending = false;
    }

    /// Release the state, wiping it first when `erase` is set
    pub fn destroy(mut self, erase: bool) {
        if erase {
            self.wipe();
        }
    }

    /// Parameters of the underlying sponge
    pub fn spec(&self) -> &ConcreteSpec {
        self.sponge.spec()
    }

    /// The underlying sponge
    pub fn sponge(&self) -> &SpongeState {
        &self.sponge
    }

    /// Length of the padded key block in bits
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Bytes needed to hold one MAC
    pub fn digest_len(&self) -> usize {
        self.sponge.digest_len()
    }

    /// Panic unless a key is installed; a wiped state has none
    pub(crate) fn require_key(&self) {
        assert!(
            self.key_length != 0,
            "HMAC state has no key; call set_key first"
        );
    }

    /// Inner digest into `scratch`, then the outer pass over it
    fn nested_digest(
        &mut self,
        msg: &[u8],
        bits: usize,
        suffix: &str,
        digest_len: usize,
        out: Option<&mut [u8]>,
    ) -> Result<(), SpongeError> {
        let inner = &mut self.scratch[..digest_len];
        self.sponge.digest_into(msg, bits, suffix, Some(inner))?;

        self.sponge.reset();
        self.sponge.update(&self.key_opad)?;
        let tail_bits = self.sponge.output() % 8;
        let inner = &self.scratch[..digest_len];
        self.sponge.digest_into(inner, tail_bits, suffix, out)
    }

    fn restart(&mut self) {
        self.sponge.reset();
        self.ipad_pending = true;
        self.leftover = 0;
    }

    fn absorb_ipad(&mut self) -> Result<(), SpongeError> {
        if self.ipad_pending {
            self.sponge.update(&self.key_ipad)?;
            self.ipad_pending = false;
        }
        Ok(())
    }
}

/// Overwrite `pad` with `block ⊕ byte`, reusing its allocation when it fits
fn fill_pad(pad: &mut Vec<u8>, block: &[u8], byte: u8) -> Result<(), SpongeError> {
    if pad.capacity() < block.len() {
        pad.zeroize();
        *pad = Vec::new();
        pad.try_reserve_exact(block.len())?;
    }
    pad.clear();
    pad.extend(block.iter().map(|b| b ^ byte));
    Ok(())
}

fn copy_buffer(src: &[u8]) -> Result<Vec<u8>, SpongeError> {
    let mut dst = Vec::new();
    dst.try_reserve_exact(src.len())?;
    dst.extend_from_slice(src);
    Ok(dst)
}

impl Zeroize for HmacState {
    fn zeroize(&mut self) {
        self.wipe();
    }
}

impl fmt::Debug for HmacState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacState")
            .field("sponge", &self.sponge)
            .field("key_length", &self.key_length)
            .field("ipad_pending", &self.ipad_pending)
            .finish_non_exhaustive()
    }
}
