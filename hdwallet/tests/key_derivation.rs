//! Tests for key derivation

use hdwallet::crypto::keys::*;
use hdwallet::crypto::mnemonic::*;
use hdwallet::crypto::seed::derive_seed;
use hdwallet::Error;

const VECTOR1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

fn vector1_master() -> ExtendedKey {
    let seed = hex::decode(VECTOR1_SEED).unwrap();
    ExtendedKey::master_key(&seed, Network::Mainnet).unwrap()
}

#[test]
fn test_bip32_vector1_chain() {
    let cases = [
        (
            "m",
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi",
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8",
        ),
        (
            "m/0'",
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7",
            "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw",
        ),
        (
            "m/0'/1",
            "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs",
            "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ",
        ),
    ];

    let master = vector1_master();
    for (path, xprv, xpub) in cases {
        let path: DerivationPath = path.parse().unwrap();
        let key = master.derive_path(&path).unwrap();
        assert_eq!(key.to_string(), xprv, "xprv at {}", path);
        assert_eq!(key.neuter().unwrap().to_string(), xpub, "xpub at {}", path);
    }
}

#[test]
fn test_public_chain_matches_private_chain() {
    let master = vector1_master();
    let account = master.child(HARDENED_OFFSET).unwrap();

    let from_public = account.neuter().unwrap().child(1).unwrap().child(7).unwrap();
    let from_private = account.child(1).unwrap().child(7).unwrap().neuter().unwrap();
    assert_eq!(from_public, from_private);
    assert_eq!(from_public.address().unwrap(), from_private.address().unwrap());
}

#[test]
fn test_hardened_restriction_on_parsed_xpub() {
    let xpub: ExtendedKey =
        "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
            .parse()
            .unwrap();

    assert!(!xpub.is_private());
    assert!(matches!(
        xpub.child(HARDENED_OFFSET + 44),
        Err(Error::PrivateDerivationOnPublicKey(_))
    ));
    assert!(xpub.child(44).is_ok());
}

#[test]
fn test_master_and_neutered_text_forms() {
    let master = vector1_master();
    let public = master.neuter().unwrap();

    let private_text = master.to_string();
    let public_text = public.to_string();
    assert!(private_text.starts_with("xprv"));
    assert!(public_text.starts_with("xpub"));
    assert_ne!(&private_text[..4], &public_text[..4]);

    assert_eq!(master.chain_code(), public.chain_code());
    assert_eq!(&master.public_key_bytes().unwrap(), public.key_material());
    assert_eq!(master.fingerprint().unwrap(), public.fingerprint().unwrap());
}

#[test]
fn test_mnemonic_to_master_key() {
    let codec = MnemonicCodec::with_languages(&[Language::English]);
    let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    assert!(codec.validate(phrase, Language::English));

    let seed = derive_seed(phrase, "TREZOR");
    let master = ExtendedKey::master_key(seed.as_bytes(), Network::Mainnet).unwrap();
    assert_eq!(
        master.to_string(),
        "xprv9s21ZrQH143K4PixKytiPDB86yig2vEUhg1kd1AcaJZ6M1DLH5xhE9N3UUbcNfrSchS4FNpkzXAD45Ehc1gdgCV7mGXoan3eqUsHEmwfN8V"
    );

    let account = master
        .derive_path(&"m/44'/0'/0'".parse().unwrap())
        .unwrap();
    assert_eq!(account.depth(), 3);
    assert!(account.is_hardened());
}

#[test]
fn test_serialize_parse_round_trip_across_tree() {
    let master = ExtendedKey::master_key(&[0x42; 64], Network::Testnet).unwrap();
    let mut key = master;
    for index in [0, HARDENED_OFFSET + 3, 17, HARDENED_OFFSET] {
        key = key.child(index).unwrap();
        for candidate in [key.clone(), key.neuter().unwrap()] {
            let text = candidate.to_string();
            let parsed = ExtendedKey::from_base58(&text).unwrap();
            assert_eq!(parsed, candidate);
            assert_eq!(parsed.to_string(), text);
        }
    }
}
