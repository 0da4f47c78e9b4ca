//! Tests for the configuration layer and drivers

use crate::sponge::{
    ConcreteSpec, GeneralizedSpec, HmacState, Param, SHA3_SUFFIX, SHAKE_SUFFIX, SpecError,
    SpongeError, SpongeState,
};
use crate::{Algorithm, Error, HashConfig, Hasher, hash, mac};

const SHA3_256_ABC: &str = "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532";

#[test]
fn test_default_is_sha3_256() {
    let config = HashConfig::default();
    assert_eq!(config.algorithm, Algorithm::Sha3);
    assert_eq!(config.security, 256);
    assert_eq!(config.squeezes, 1);
    assert_eq!(config.suffix(), "01");

    assert_eq!(hex::encode(hash(&config, b"abc").unwrap()), SHA3_256_ABC);
}

#[test]
fn test_named_families() {
    let keccak = HashConfig::new(Algorithm::Keccak, 256);
    assert_eq!(keccak.suffix(), "");
    assert_eq!(
        hex::encode(hash(&keccak, b"").unwrap()),
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
    );

    let shake = HashConfig::new(Algorithm::Shake, 128).with_output(256);
    assert_eq!(
        hex::encode(hash(&shake, b"").unwrap()),
        "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
    );

    let raw = HashConfig::new(Algorithm::RawShake, 256).with_output(512);
    assert_eq!(raw.suffix(), "11");
    assert_eq!(hash(&raw, b"").unwrap().len(), 64);
}

#[test]
fn test_squeezes_return_later_output_blocks() {
    // Output equal to the SHAKE128 rate, so squeezes walk the XOF stream
    let spec = ConcreteSpec::shake(128, 3 * 1344).unwrap();
    let stream = SpongeState::new(&spec)
        .unwrap()
        .digest(b"abc", 0, SHAKE_SUFFIX)
        .unwrap();

    for n in 1..=3 {
        let config = HashConfig::new(Algorithm::Shake, 128)
            .with_output(1344)
            .with_squeezes(n);
        let block = hash(&config, b"abc").unwrap();
        assert_eq!(block, stream[(n - 1) * 168..n * 168], "squeeze {n}");
    }
}

#[test]
fn test_many_squeezes_match_manual_squeezing() {
    let config = HashConfig::default().with_squeezes(5);

    let spec = ConcreteSpec::sha3(256).unwrap();
    let mut state = SpongeState::new(&spec).unwrap();
    let mut expected = state.digest(b"abc", 0, SHA3_SUFFIX).unwrap();
    for _ in 1..5 {
        expected = state.squeeze().unwrap();
    }

    assert_eq!(hash(&config, b"abc").unwrap(), expected);
}

#[test]
fn test_hasher_is_reusable() {
    let mut hasher = Hasher::new(&HashConfig::default()).unwrap();
    assert_eq!(hasher.spec(), &ConcreteSpec::sha3(256).unwrap());

    let first = hasher.hash(b"abc").unwrap();
    let second = hasher.hash(b"abc").unwrap();
    assert_eq!(first, second);
    assert_eq!(hex::encode(&first), SHA3_256_ABC);

    hasher.update(b"a").unwrap();
    hasher.update(b"b").unwrap();
    assert_eq!(hasher.finalize(b"c").unwrap(), first);
}

#[test]
fn test_custom_parameters() {
    let params = GeneralizedSpec {
        capacity: Param::Exactly(512),
        state_size: Param::Exactly(1600),
        ..GeneralizedSpec::default()
    };
    let config = HashConfig::custom(params).with_suffix("01");
    assert_eq!(config.spec().unwrap(), ConcreteSpec::sha3(256).unwrap());
    assert_eq!(hex::encode(hash(&config, b"abc").unwrap()), SHA3_256_ABC);

    let truncated = HashConfig::custom(params).with_suffix("01").with_output(128);
    assert_eq!(truncated.spec().unwrap().output(), 128);
}

#[test]
fn test_custom_needs_rate_or_capacity() {
    let params = GeneralizedSpec {
        output: Param::Exactly(256),
        ..GeneralizedSpec::default()
    };
    let err = hash(&HashConfig::custom(params), b"").unwrap_err();
    assert!(matches!(
        err,
        Error::Sponge(SpongeError::Spec(SpecError::InsufficientParameters))
    ));
    assert_eq!(
        err.to_string(),
        "sponge error: insufficient parameters: two of rate, capacity and state size are required"
    );
}

#[test]
fn test_validation_errors() {
    let no_squeeze = HashConfig::default().with_squeezes(0);
    assert!(matches!(no_squeeze.validate(), Err(Error::Config(_))));

    let xof = HashConfig::new(Algorithm::Shake, 256);
    assert!(matches!(xof.validate(), Err(Error::Config(_))));

    let sha3 = HashConfig::default().with_output(512);
    assert!(matches!(sha3.validate(), Err(Error::Config(_))));

    let zero = HashConfig::new(Algorithm::Sha3, 0);
    assert!(matches!(zero.validate(), Err(Error::Config(_))));

    let suffix = HashConfig::default().with_suffix("01x");
    assert!(matches!(suffix.validate(), Err(Error::MalformedInput(_))));

    let huge = HashConfig::new(Algorithm::Sha3, 1024);
    assert!(matches!(
        huge.validate(),
        Err(Error::Sponge(SpongeError::Spec(SpecError::StateTooLarge)))
    ));

    // Keccak allows a truncated output
    assert!(HashConfig::new(Algorithm::Keccak, 256)
        .with_output(160)
        .validate()
        .is_ok());
}

#[test]
fn test_json_config() {
    let config = HashConfig::from_json(
        r#"{ "algorithm": "shake", "security": 256, "output": 1024, "squeezes": 3 }"#,
    )
    .unwrap();
    assert_eq!(config.algorithm, Algorithm::Shake);
    assert_eq!(config.output, Some(1024));
    assert_eq!(config.squeezes, 3);
    assert_eq!(config.suffix, None);

    let json = config.to_json().unwrap();
    assert_eq!(HashConfig::from_json(&json).unwrap(), config);

    let custom = HashConfig::from_json(
        r#"{ "algorithm": "custom", "params": { "bitrate": { "exactly": 160 }, "word_size": { "exactly": 8 } }, "output": 40 }"#,
    )
    .unwrap();
    assert_eq!(custom.spec().unwrap(), ConcreteSpec::new(160, 40, 40).unwrap());

    assert!(matches!(HashConfig::from_json("{"), Err(Error::Json(_))));
    assert!(matches!(
        HashConfig::from_json(r#"{ "algorithm": "md5" }"#),
        Err(Error::Json(_))
    ));
    assert!(matches!(
        HashConfig::from_json(r#"{ "squeezes": 0 }"#),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_mac_known_answer() {
    let key: Vec<u8> = (0u8..32).collect();
    let tag = mac(
        &HashConfig::default(),
        &key,
        b"Sample message for keylen<blocklen",
    )
    .unwrap();
    assert_eq!(
        hex::encode(tag),
        "4fe8e202c4f058e8dddc23d8c34e467343e23555e24fc2f025d598f558f67205"
    );
}

#[test]
fn test_mac_squeezes() {
    let spec = ConcreteSpec::sha3(256).unwrap();
    let mut state = HmacState::new(&spec, b"key", 24).unwrap();
    state.digest_into(b"msg", 0, SHA3_SUFFIX, None).unwrap();
    state.fast_squeeze(1);
    let mut expected = vec![0u8; 32];
    state.squeeze_into(&mut expected);

    let config = HashConfig::default().with_squeezes(3);
    assert_eq!(mac(&config, b"key", b"msg").unwrap(), expected);
}
