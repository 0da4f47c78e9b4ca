//! One-shot and reusable drivers over the sponge engine
//!
//! With `squeezes == n` the message is digested, `n - 2` digests are
//! skipped and one more is squeezed out, so the result is the `n`-th digest
//! of the output stream. `n == 1` is a plain digest.

use kek_core::{ConcreteSpec, HmacState, SpongeState};

use crate::config::HashConfig;
use crate::error::Error;

/// A reusable hasher for one [`HashConfig`]
///
/// The sponge is allocated once and reset after every digest.
pub struct Hasher {
    state: SpongeState,
    suffix: String,
    squeezes: usize,
}

impl Hasher {
    /// Validate `config` and allocate a sponge for it
    pub fn new(config: &HashConfig) -> Result<Self, Error> {
        config.validate()?;
        let spec = config.spec()?;
        log_spec(config, &spec);

        Ok(Self {
            state: SpongeState::new(&spec)?,
            suffix: config.suffix().to_owned(),
            squeezes: config.squeezes,
        })
    }

    /// Parameters in use
    pub fn spec(&self) -> &ConcreteSpec {
        self.state.spec()
    }

    /// Absorb more of the message
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.state.update(data)?;
        Ok(())
    }

    /// Finish the message and return the last squeezed digest
    ///
    /// The hasher is reset and can be reused for the next message.
    pub fn finalize(&mut self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut out = vec![0u8; self.state.digest_len()];
        let result = if self.squeezes == 1 {
            self.state.digest_into(data, 0, &self.suffix, Some(&mut out))
        } else {
            self.state
                .digest_into(data, 0, &self.suffix, None)
                .map(|()| {
                    log::trace!("skipping {} digests", self.squeezes - 2);
                    self.state.fast_squeeze(self.squeezes - 2);
                    self.state.squeeze_into(&mut out);
                })
        };
        self.state.reset();
        result?;
        Ok(out)
    }

    /// Hash a whole message
    pub fn hash(&mut self, data: &[u8]) -> Result<Vec<u8>, Error> {
        self.finalize(data)
    }
}

impl Drop for Hasher {
    fn drop(&mut self) {
        self.state.wipe();
    }
}

/// Hash `data` as described by `config`
pub fn hash(config: &HashConfig, data: &[u8]) -> Result<Vec<u8>, Error> {
    Hasher::new(config)?.hash(data)
}

/// Keyed hash of `data` as described by `config`
///
/// The key is used whole; the squeeze count applies to the outer sponge.
pub fn mac(config: &HashConfig, key: &[u8], data: &[u8]) -> Result<Vec<u8>, Error> {
    config.validate()?;
    let spec = config.spec()?;
    log_spec(config, &spec);

    let mut state = HmacState::new(&spec, key, key.len() * 8)?;
    let mut out = vec![0u8; state.digest_len()];
    let suffix = config.suffix();

    let result = if config.squeezes == 1 {
        state.digest_into(data, 0, suffix, Some(&mut out))
    } else {
        state.digest_into(data, 0, suffix, None).map(|()| {
            state.fast_squeeze(config.squeezes - 2);
            state.squeeze_into(&mut out);
        })
    };
    state.destroy(true);
    result?;
    Ok(out)
}

fn log_spec(config: &HashConfig, spec: &ConcreteSpec) {
    log::debug!(
        "{:?}: rate {} capacity {} output {} word size {} suffix {:?} squeezes {}",
        config.algorithm,
        spec.bitrate(),
        spec.capacity(),
        spec.output(),
        spec.word_size(),
        config.suffix(),
        config.squeezes
    );
}
