//! Hash function selection
//!
//! A [`HashConfig`] names a function family and its parameters, in the same
//! shape whether it comes from code or from a JSON document:
//!
//! ```json
//! { "algorithm": "shake", "security": 256, "output": 1024, "squeezes": 3 }
//! ```

use kek_core::{
    ConcreteSpec, GeneralizedSpec, KECCAK_SUFFIX, Param, RAWSHAKE_SUFFIX, SHA3_SUFFIX,
    SHAKE_SUFFIX,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default security level (SHA3-256)
pub const DEFAULT_SECURITY: usize = 256;

/// Hash function family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Keccak-x: SHA3 parameters without a domain suffix
    Keccak,
    /// SHA3-x
    #[default]
    Sha3,
    /// RawSHAKEx, an output size is required
    RawShake,
    /// SHAKEx, an output size is required
    Shake,
    /// Parameters taken from [`HashConfig::params`]
    Custom,
}

/// Which function to compute and how many times to squeeze it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    pub algorithm: Algorithm,
    /// The x in SHA3-x or SHAKEx; ignored for [`Algorithm::Custom`]
    pub security: usize,
    /// Output size in bits, overriding the family default
    pub output: Option<usize>,
    /// Number of digests to squeeze; only the last is returned
    pub squeezes: usize,
    /// Partial parameters for [`Algorithm::Custom`]
    pub params: GeneralizedSpec,
    /// Domain suffix as a string of '0' and '1', overriding the family default
    pub suffix: Option<String>,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha3,
            security: DEFAULT_SECURITY,
            output: None,
            squeezes: 1,
            params: GeneralizedSpec::default(),
            suffix: None,
        }
    }
}

impl HashConfig {
    /// Config for a named family at security level `security`
    pub fn new(algorithm: Algorithm, security: usize) -> Self {
        Self {
            algorithm,
            security,
            ..Self::default()
        }
    }

    /// Config for fully or partially given sponge parameters
    pub fn custom(params: GeneralizedSpec) -> Self {
        Self {
            algorithm: Algorithm::Custom,
            params,
            ..Self::default()
        }
    }

    pub fn with_output(mut self, output: usize) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_squeezes(mut self, squeezes: usize) -> Self {
        self.squeezes = squeezes;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The concrete sponge parameters this config selects
    pub fn spec(&self) -> Result<ConcreteSpec, Error> {
        let spec = match self.algorithm {
            Algorithm::Keccak | Algorithm::Sha3 => {
                let spec = ConcreteSpec::sha3(self.security)?;
                match self.output {
                    Some(output) => spec.with_output(output)?,
                    None => spec,
                }
            }
            Algorithm::RawShake | Algorithm::Shake => {
                let output = self.output.ok_or_else(|| {
                    Error::Config(format!("{:?} needs an output size", self.algorithm))
                })?;
                ConcreteSpec::shake(self.security, output)?
            }
            Algorithm::Custom => {
                let mut params = self.params;
                if let Some(output) = self.output {
                    let output = i64::try_from(output)
                        .map_err(|_| Error::Config(format!("output size {output} is too large")))?;
                    params.output = Param::Exactly(output);
                }
                params.resolve()?
            }
        };
        Ok(spec)
    }

    /// The domain suffix to finish each message with
    pub fn suffix(&self) -> &str {
        if let Some(suffix) = &self.suffix {
            return suffix;
        }
        match self.algorithm {
            Algorithm::Keccak | Algorithm::Custom => KECCAK_SUFFIX,
            Algorithm::Sha3 => SHA3_SUFFIX,
            Algorithm::RawShake => RAWSHAKE_SUFFIX,
            Algorithm::Shake => SHAKE_SUFFIX,
        }
    }

    /// Check everything [`crate::hash`] relies on
    pub fn validate(&self) -> Result<(), Error> {
        if self.squeezes == 0 {
            return Err(Error::Config("at least one squeeze is required".into()));
        }
        if self.algorithm != Algorithm::Custom && self.security == 0 {
            return Err(Error::Config("the security level must be positive".into()));
        }
        if self.algorithm == Algorithm::Sha3 && self.output.is_some_and(|n| n != self.security) {
            return Err(Error::Config(format!(
                "SHA3-{} has a fixed {}-bit output",
                self.security, self.security
            )));
        }
        if let Some(suffix) = &self.suffix {
            if let Some(c) = suffix.chars().find(|c| *c != '0' && *c != '1') {
                return Err(Error::MalformedInput(format!(
                    "suffix may only contain '0' and '1', found {c:?}"
                )));
            }
        }
        self.spec()?;
        Ok(())
    }
}
