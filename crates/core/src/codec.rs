//! Byte serialisation of sponge and HMAC states
//!
//! All integers are little-endian `u64`. A sponge record is
//!
//! ```text
//! rate | capacity | output | state size | word size | word mask | ℓ | rounds | phase
//! lane[0] .. lane[24]
//! message length | message bytes
//! ```
//!
//! An HMAC record appends `key_length | opad (key_length / 8 bytes) |
//! ipad pending (u8) | leftover (u8)` to the sponge record.

use zeroize::Zeroize;

use crate::error::{DecodeError, SpongeError};
use crate::hmac::HmacState;
use crate::params::{
    FIELD_SIZE, HMAC_INNER_PAD, HMAC_OUTER_PAD, LANES, MARSHAL_HEADER_SIZE, PARAM_FIELDS,
};
use crate::spec::ConcreteSpec;
use crate::state::{Phase, SpongeState};

/// Cursor over a marshalled record
struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn position(&self) -> usize {
        self.offset
    }

    fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.offset.checked_add(len).ok_or(DecodeError::Truncated {
            needed: usize::MAX,
            available: self.bytes.len(),
        })?;
        if end > self.bytes.len() {
            return Err(DecodeError::Truncated {
                needed: end,
                available: self.bytes.len(),
            });
        }
        let start = self.offset;
        self.offset = end;
        Ok(&self.bytes[start..end])
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        let mut buf = [0u8; FIELD_SIZE];
        buf.copy_from_slice(self.read_exact(FIELD_SIZE)?);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_usize(&mut self) -> Result<usize, DecodeError> {
        usize::try_from(self.read_u64()?)
            .map_err(|_| DecodeError::Inconsistent("field out of range"))
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_exact(1)?[0])
    }
}

/// Cursor writing into a caller-provided buffer
struct ByteWriter<'a> {
    bytes: &'a mut [u8],
    offset: usize,
}

impl<'a> ByteWriter<'a> {
    fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.bytes[self.offset..self.offset + data.len()].copy_from_slice(data);
        self.offset += data.len();
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }
}

impl SpongeState {
    /// Bytes needed to marshal this state
    pub fn marshal_size(&self) -> usize {
        MARSHAL_HEADER_SIZE + self.message.len()
    }

    /// Write the state into `buf`, returning the number of bytes written
    ///
    /// # Panics
    ///
    /// If `buf` is shorter than [`SpongeState::marshal_size`].
    pub fn marshal_into(&self, buf: &mut [u8]) -> usize {
        assert!(buf.len() >= self.marshal_size(), "marshal buffer too short");
        let mut w = ByteWriter::new(buf);
        self.write_record(&mut w);
        w.offset
    }

    /// Marshal into a freshly allocated buffer
    pub fn marshal(&self) -> Result<Vec<u8>, SpongeError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(self.marshal_size())?;
        buf.resize(self.marshal_size(), 0);
        self.marshal_into(&mut buf);
        Ok(buf)
    }

    /// Restore a state from the front of `data`
    ///
    /// Returns the state and the number of bytes consumed. Every parameter
    /// is revalidated, so a record that could not have been produced by
    /// [`SpongeState::marshal`] is rejected.
    pub fn unmarshal(data: &[u8]) -> Result<(Self, usize), SpongeError> {
        let mut r = ByteReader::new(data);
        let state = Self::read_record(&mut r)?;
        Ok((state, r.position()))
    }

    /// Length of the sponge record at the front of `data`, without decoding it
    pub fn unmarshal_skip(data: &[u8]) -> Result<usize, DecodeError> {
        let mut r = ByteReader::new(data);
        r.read_exact((PARAM_FIELDS + LANES) * FIELD_SIZE)?;
        let len = r.read_usize()?;
        r.read_exact(len)?;
        Ok(r.position())
    }

    fn write_record(&self, w: &mut ByteWriter<'_>) {
        w.write_usize(self.rate);
        w.write_usize(self.capacity);
        w.write_usize(self.output);
        w.write_usize(self.state_size);
        w.write_usize(self.word_size);
        w.write_u64(self.word_mask);
        w.write_usize(self.log2_word);
        w.write_usize(self.rounds);
        w.write_u64(self.phase.to_wire());
        for lane in &self.lanes {
            w.write_u64(*lane);
        }
        w.write_usize(self.message.len());
        w.write_bytes(&self.message);
    }

    fn read_record(r: &mut ByteReader<'_>) -> Result<Self, SpongeError> {
        let rate = r.read_usize()?;
        let capacity = r.read_usize()?;
        let output = r.read_usize()?;
        let state_size = r.read_usize()?;
        let word_size = r.read_usize()?;
        let word_mask = r.read_u64()?;
        let log2_word = r.read_usize()?;
        let rounds = r.read_usize()?;
        let phase = r.read_u64()?;

        let spec = ConcreteSpec::new(rate, capacity, output).map_err(DecodeError::from)?;
        let mut state = SpongeState::new(&spec)?;

        if state.state_size != state_size
            || state.word_size != word_size
            || state.word_mask != word_mask
            || state.log2_word != log2_word
            || state.rounds != rounds
        {
            return Err(DecodeError::Inconsistent("derived parameters disagree").into());
        }

        state.phase = Phase::from_wire(phase).ok_or(DecodeError::Inconsistent("unknown phase"))?;

        for lane in state.lanes.iter_mut() {
            let v = r.read_u64()?;
            if v & !word_mask != 0 {
                return Err(DecodeError::Inconsistent("lane wider than the word size").into());
            }
            *lane = v;
        }

        let len = r.read_usize()?;
        if len >= rate / 8 {
            return Err(DecodeError::Inconsistent("buffered message exceeds one block").into());
        }
        if len > 0 && state.phase == Phase::Squeezing {
            return Err(DecodeError::Inconsistent("buffered message on a finalised sponge").into());
        }
        state.message.extend_from_slice(r.read_exact(len)?);

        Ok(state)
    }
}

impl HmacState {
    /// Bytes needed to marshal this state
    pub fn marshal_size(&self) -> usize {
        self.sponge.marshal_size() + FIELD_SIZE + self.key_opad.len() + 2
    }

    /// Write the state into `buf`, returning the number of bytes written
    ///
    /// The inner pad is not stored; it is derived from the outer pad when
    /// the state is restored.
    ///
    /// # Panics
    ///
    /// If `buf` is shorter than [`HmacState::marshal_size`], or the state
    /// has been wiped and holds no key.
    pub fn marshal_into(&self, buf: &mut [u8]) -> usize {
        self.require_key();
        assert!(buf.len() >= self.marshal_size(), "marshal buffer too short");
        let mut w = ByteWriter::new(buf);
        self.sponge.write_record(&mut w);
        w.write_usize(self.key_length);
        w.write_bytes(&self.key_opad);
        w.write_bytes(&[u8::from(self.ipad_pending), self.leftover]);
        w.offset
    }

    /// Marshal into a freshly allocated buffer
    pub fn marshal(&self) -> Result<Vec<u8>, SpongeError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(self.marshal_size())?;
        buf.resize(self.marshal_size(), 0);
        self.marshal_into(&mut buf);
        Ok(buf)
    }

    /// Restore a state from the front of `data`
    pub fn unmarshal(data: &[u8]) -> Result<(Self, usize), SpongeError> {
        let mut r = ByteReader::new(data);
        let sponge = SpongeState::read_record(&mut r)?;

        let key_length = r.read_usize()?;
        if key_length != sponge.rate {
            return Err(DecodeError::Inconsistent("key block differs from the rate").into());
        }
        let opad = r.read_exact(key_length / 8)?;
        let ipad_pending = match r.read_u8()? {
            0 => false,
            1 => true,
            _ => return Err(DecodeError::Inconsistent("invalid inner pad flag").into()),
        };
        if r.read_u8()? != 0 {
            return Err(DecodeError::Inconsistent("leftover bits on a byte-aligned key").into());
        }

        let mut key_opad = Vec::new();
        key_opad.try_reserve_exact(opad.len())?;
        key_opad.extend_from_slice(opad);

        let mut key_ipad = Vec::new();
        if let Err(e) = key_ipad.try_reserve_exact(opad.len()) {
            key_opad.zeroize();
            return Err(e.into());
        }
        key_ipad.extend(opad.iter().map(|b| b ^ HMAC_OUTER_PAD ^ HMAC_INNER_PAD));

        let state = HmacState {
            sponge,
            key_opad,
            key_ipad,
            key_length,
            ipad_pending,
            leftover: 0,
            scratch: Vec::new(),
        };
        Ok((state, r.position()))
    }

    /// Length of the HMAC record at the front of `data`, without decoding it
    pub fn unmarshal_skip(data: &[u8]) -> Result<usize, DecodeError> {
        let sponge_len = SpongeState::unmarshal_skip(data)?;
        let mut r = ByteReader::new(data);
        r.read_exact(sponge_len)?;
        let key_length = r.read_usize()?;
        r.read_exact(key_length / 8 + 2)?;
        Ok(r.position())
    }
}
