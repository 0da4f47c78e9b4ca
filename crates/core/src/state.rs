//! Sponge state lifecycle: initialise, reset, duplicate, wipe, destroy

use core::fmt;

use zeroize::Zeroize;

use crate::error::SpongeError;
use crate::params::{BASE_ROUNDS, LANES};
use crate::spec::ConcreteSpec;

/// Where a sponge is in its absorb/squeeze protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Freshly initialised or reset, nothing absorbed yet
    Idle,
    /// At least one `update` since the last reset
    Absorbing,
    /// Finalised by `digest`; only squeezing is allowed
    Squeezing,
}

impl Phase {
    pub(crate) fn to_wire(self) -> u64 {
        match self {
            Phase::Idle => 0,
            Phase::Absorbing => 1,
            Phase::Squeezing => 2,
        }
    }

    pub(crate) fn from_wire(v: u64) -> Option<Self> {
        match v {
            0 => Some(Phase::Idle),
            1 => Some(Phase::Absorbing),
            2 => Some(Phase::Squeezing),
            _ => None,
        }
    }
}

/// The mutable state of one hashing process
///
/// Parameters are fixed at initialisation. The buffered message is always
/// shorter than one rate block between calls. A state has a single owner;
/// use [`SpongeState::duplicate`] to fork a computation.
pub struct SpongeState {
    /// The lanes, each masked to `word_size` bits
    pub(crate) lanes: [u64; LANES],
    pub(crate) spec: ConcreteSpec,
    pub(crate) rate: usize,
    pub(crate) capacity: usize,
    pub(crate) output: usize,
    pub(crate) state_size: usize,
    pub(crate) word_size: usize,
    pub(crate) word_mask: u64,
    /// ℓ, the binary logarithm of the word size
    pub(crate) log2_word: usize,
    /// 12 + 2ℓ
    pub(crate) rounds: usize,
    /// Absorbed bytes not yet permuted into the lanes
    pub(crate) message: Vec<u8>,
    pub(crate) phase: Phase,
}

impl SpongeState {
    /// Initialise a state for a validated spec
    ///
    /// Reserves one rate block for the message buffer up front.
    pub fn new(spec: &ConcreteSpec) -> Result<Self, SpongeError> {
        let word_size = spec.word_size();
        let log2_word = word_size.trailing_zeros() as usize;
        let word_mask = if word_size == 64 {
            u64::MAX
        } else {
            (1u64 << word_size) - 1
        };

        let mut message = Vec::new();
        message.try_reserve_exact(spec.bitrate() / 8)?;

        Ok(Self {
            lanes: [0u64; LANES],
            spec: *spec,
            rate: spec.bitrate(),
            capacity: spec.capacity(),
            output: spec.output(),
            state_size: spec.state_size(),
            word_size,
            word_mask,
            log2_word,
            rounds: BASE_ROUNDS + 2 * log2_word,
            message,
            phase: Phase::Idle,
        })
    }

    /// Zero the lanes and drop buffered bytes, keeping the parameters
    ///
    /// The allocation is kept; buffered bytes are overwritten before the
    /// buffer is emptied.
    pub fn reset(&mut self) {
        self.lanes = [0u64; LANES];
        self.message.fill(0);
        self.message.clear();
        self.phase = Phase::Idle;
    }

    /// Deep copy, including the buffered message
    pub fn duplicate(&self) -> Result<Self, SpongeError> {
        let mut message = Vec::new();
        message.try_reserve_exact(self.message.capacity())?;
        message.extend_from_slice(&self.message);
        Ok(Self { message, ..*self })
    }

    /// Overwrite the buffered message, including spare capacity
    pub fn wipe_message(&mut self) {
        self.message.zeroize();
    }

    /// Overwrite the lanes
    pub fn wipe_sponge(&mut self) {
        self.lanes.zeroize();
    }

    /// Overwrite every secret-bearing field
    ///
    /// Uses volatile writes, so the stores survive even when the state is
    /// dropped right after. The state is left as if freshly reset.
    pub fn wipe(&mut self) {
        self.wipe_message();
        self.wipe_sponge();
        self.phase = Phase::Idle;
    }

    /// Release the state, wiping it first when `erase` is set
    ///
    /// Pass `erase = true` whenever the state ever held key material or
    /// other secret input.
    pub fn destroy(mut self, erase: bool) {
        if erase {
            self.wipe();
        }
    }

    /// The parameters this state was initialised with
    pub fn spec(&self) -> &ConcreteSpec {
        &self.spec
    }

    /// Rate in bits
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Capacity in bits
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Output size in bits
    pub fn output(&self) -> usize {
        self.output
    }

    /// `rate + capacity`
    pub fn state_size(&self) -> usize {
        self.state_size
    }

    /// Lane width in bits
    pub fn word_size(&self) -> usize {
        self.word_size
    }

    /// Mask of the valid bits in one lane
    pub fn word_mask(&self) -> u64 {
        self.word_mask
    }

    /// ℓ, with `word_size == 1 << ℓ`
    pub fn log2_word_size(&self) -> usize {
        self.log2_word
    }

    /// Permutation rounds, `12 + 2ℓ`
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Bytes needed to hold one digest, `(output + 7) / 8`
    pub fn digest_len(&self) -> usize {
        self.output.div_ceil(8)
    }

    /// Number of bytes currently buffered
    pub fn buffered(&self) -> usize {
        self.message.len()
    }

    /// Current protocol phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Raw lane values
    pub fn lanes(&self) -> &[u64; LANES] {
        &self.lanes
    }

    /// Make room for `additional` more buffered bytes
    ///
    /// When the buffer has to move, the old allocation is zeroed before it
    /// is released.
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), SpongeError> {
        let needed = self.message.len() + additional;
        if needed <= self.message.capacity() {
            return Ok(());
        }

        let mut grown = Vec::new();
        grown.try_reserve_exact(needed)?;
        grown.extend_from_slice(&self.message);
        let mut old = core::mem::replace(&mut self.message, grown);
        old.zeroize();
        Ok(())
    }
}

impl Zeroize for SpongeState {
    fn zeroize(&mut self) {
        self.wipe();
    }
}

/// Parameters only; lane and buffer contents are never printed
impl fmt::Debug for SpongeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpongeState")
            .field("rate", &self.rate)
            .field("capacity", &self.capacity)
            .field("output", &self.output)
            .field("word_size", &self.word_size)
            .field("rounds", &self.rounds)
            .field("buffered", &self.message.len())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
