//! Mnemonic passphrase encoding and validation
//!
//! Entropy plus its SHA-256 checksum is read as one big unsigned integer and
//! split into 11-bit word indices, filling the sentence from the last word
//! backwards. Dictionaries are the fixed 2048-word lists shipped with the
//! `bip39` crate; a [`MnemonicCodec`] loads them once and is then passed to
//! whoever needs it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::entropy::{generate_entropy_with, validate_entropy_bits, EntropySource, OsEntropy};
use crate::crypto::hash::sha256;
use crate::error::{Error, Result};

/// Number of entries in every dictionary
pub const WORDLIST_SIZE: usize = 2048;

/// Accepted sentence lengths
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

const WORD_BITS: usize = 11;

/// Supported mnemonic languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    English,
    SimplifiedChinese,
    TraditionalChinese,
    Japanese,
    Spanish,
    French,
    Italian,
}

impl Language {
    /// Every supported language, in a stable order
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::SimplifiedChinese,
        Language::TraditionalChinese,
        Language::Japanese,
        Language::Spanish,
        Language::French,
        Language::Italian,
    ];

    /// Canonical kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::SimplifiedChinese => "simplified-chinese",
            Self::TraditionalChinese => "traditional-chinese",
            Self::Japanese => "japanese",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::Italian => "italian",
        }
    }

    fn word_list(self) -> &'static [&'static str; WORDLIST_SIZE] {
        let language = match self {
            Self::English => bip39::Language::English,
            Self::SimplifiedChinese => bip39::Language::SimplifiedChinese,
            Self::TraditionalChinese => bip39::Language::TraditionalChinese,
            Self::Japanese => bip39::Language::Japanese,
            Self::Spanish => bip39::Language::Spanish,
            Self::French => bip39::Language::French,
            Self::Italian => bip39::Language::Italian,
        };
        language.word_list()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "simplified-chinese" | "zh-hans" | "zh-cn" => Ok(Self::SimplifiedChinese),
            "traditional-chinese" | "zh-hant" | "zh-tw" => Ok(Self::TraditionalChinese),
            "japanese" | "ja" | "jp" => Ok(Self::Japanese),
            "spanish" | "es" => Ok(Self::Spanish),
            "french" | "fr" => Ok(Self::French),
            "italian" | "it" => Ok(Self::Italian),
            other => Err(Error::InvalidParameter(format!("Unknown language: {}", other))),
        }
    }
}

/// One language's word list with a reverse index
#[derive(Debug, Clone)]
pub struct Dictionary {
    language: Language,
    words: &'static [&'static str; WORDLIST_SIZE],
    index: HashMap<&'static str, u16>,
}

impl Dictionary {
    /// Load the word list for `language`
    pub fn load(language: Language) -> Self {
        let words = language.word_list();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, word)| (*word, i as u16))
            .collect();

        Self { language, words, index }
    }

    /// The language this dictionary belongs to
    pub fn language(&self) -> Language {
        self.language
    }

    /// Word at an 11-bit index
    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.words.get(index as usize).copied()
    }

    /// Index of a word, if present
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Whether the word is in this dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of entries (always 2048)
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Dictionaries are never empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// An ordered word sequence from a single dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mnemonic {
    language: Language,
    words: Vec<&'static str>,
}

impl Mnemonic {
    /// Language of the words
    pub fn language(&self) -> Language {
        self.language
    }

    /// The words in order
    pub fn words(&self) -> &[&'static str] {
        &self.words
    }

    /// Number of words
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words joined by single spaces
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

/// Encoder/decoder between entropy and mnemonic sentences
#[derive(Debug, Clone)]
pub struct MnemonicCodec {
    dictionaries: HashMap<Language, Dictionary>,
}

impl Default for MnemonicCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MnemonicCodec {
    /// Codec with every supported language loaded
    pub fn new() -> Self {
        Self::with_languages(&Language::ALL)
    }

    /// Codec with only the given languages loaded
    pub fn with_languages(languages: &[Language]) -> Self {
        let dictionaries = languages
            .iter()
            .map(|language| (*language, Dictionary::load(*language)))
            .collect();

        Self { dictionaries }
    }

    /// Dictionary for a loaded language
    pub fn dictionary(&self, language: Language) -> Result<&Dictionary> {
        self.dictionaries
            .get(&language)
            .ok_or_else(|| Error::InvalidParameter(format!("Language {} is not loaded", language)))
    }

    /// Languages this codec can encode and decode
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|language| self.dictionaries.contains_key(language))
            .collect()
    }

    /// Generate a new random mnemonic of `bits` entropy
    pub fn generate(&self, bits: usize, language: Language) -> Result<Mnemonic> {
        self.generate_with(&mut OsEntropy, bits, language)
    }

    /// Generate a new mnemonic using the given entropy source
    pub fn generate_with<S: EntropySource + ?Sized>(
        &self,
        source: &mut S,
        bits: usize,
        language: Language,
    ) -> Result<Mnemonic> {
        let entropy = generate_entropy_with(source, bits)?;
        self.encode(&entropy, language)
    }

    /// Encode entropy into words
    pub fn encode(&self, entropy: &[u8], language: Language) -> Result<Mnemonic> {
        let dictionary = self.dictionary(language)?;

        let entropy_bits = entropy.len() * 8;
        validate_entropy_bits(entropy_bits)?;
        let checksum_bits = entropy_bits / 32;
        let sentence_length = (entropy_bits + checksum_bits) / WORD_BITS;

        // entropy << checksum_bits | leading checksum bits of SHA-256(entropy)
        let mut bytes = entropy.to_vec();
        bytes.push(sha256(entropy)[0]);
        let mut value = BigUint::from_bytes_be(&bytes) >> (8 - checksum_bits);

        // Peel 11 bits at a time off the low end, filling from the last word.
        let mut words = vec![""; sentence_length];
        for slot in words.iter_mut().rev() {
            let index = (&value % WORDLIST_SIZE as u32).to_u16().unwrap_or(u16::MAX);
            value /= WORDLIST_SIZE as u32;
            *slot = dictionary
                .word(index)
                .ok_or_else(|| Error::Mnemonic(format!("Word index {} out of range", index)))?;
        }

        debug!(language = %language, words = sentence_length, "Encoded mnemonic");

        Ok(Mnemonic { language, words })
    }

    /// Recover the entropy from a phrase, checking its checksum
    pub fn decode(&self, phrase: &str, language: Language) -> Result<Vec<u8>> {
        let dictionary = self.dictionary(language)?;
        let indices = word_indices(dictionary, phrase)?;

        let word_count = indices.len();
        let checksum_bits = word_count / 3;
        let entropy_bytes = (word_count * WORD_BITS - checksum_bits) / 8;

        // Rebuild the integer by feeding indices back in from the first word.
        let value = indices
            .iter()
            .fold(BigUint::zero(), |value, index| value * WORDLIST_SIZE as u32 + *index as u32);

        let checksum = (&value % (1u32 << checksum_bits)).to_u8().unwrap_or(u8::MAX);
        let raw = (value >> checksum_bits).to_bytes_be();
        if raw.len() > entropy_bytes {
            return Err(Error::Mnemonic("Entropy does not fit the sentence length".to_string()));
        }

        // to_bytes_be drops leading zero bytes
        let mut entropy = vec![0u8; entropy_bytes];
        entropy[entropy_bytes - raw.len()..].copy_from_slice(&raw);

        let expected = sha256(&entropy)[0] >> (8 - checksum_bits);
        if checksum != expected {
            return Err(Error::Mnemonic("Checksum mismatch".to_string()));
        }

        Ok(entropy)
    }

    /// Decode a phrase into a `Mnemonic`, checking its checksum
    pub fn parse(&self, phrase: &str, language: Language) -> Result<Mnemonic> {
        self.decode(phrase, language)?;
        let dictionary = self.dictionary(language)?;
        let words = phrase
            .split_whitespace()
            .filter_map(|word| dictionary.index_of(word).and_then(|i| dictionary.word(i)))
            .collect();

        Ok(Mnemonic { language, words })
    }

    /// Valid word count, every word known, and the checksum matches
    pub fn validate(&self, phrase: &str, language: Language) -> bool {
        self.decode(phrase, language).is_ok()
    }

    /// Valid word count and every word known; the checksum is not checked
    pub fn is_well_formed(&self, phrase: &str, language: Language) -> bool {
        match self.dictionary(language) {
            Ok(dictionary) => word_indices(dictionary, phrase).is_ok(),
            Err(_) => false,
        }
    }

    /// Guess the language of a phrase
    ///
    /// Prefers the first loaded language in which the phrase fully validates,
    /// checksum included. Failing that, the first whose dictionary holds every
    /// word. Words shared between the Chinese lists sit at the same index in
    /// both, so such phrases resolve to simplified Chinese.
    pub fn detect_language(&self, phrase: &str) -> Option<Language> {
        let languages = self.languages();
        languages
            .iter()
            .copied()
            .find(|language| self.validate(phrase, *language))
            .or_else(|| {
                languages
                    .into_iter()
                    .find(|language| self.is_well_formed(phrase, *language))
            })
    }
}

fn word_indices(dictionary: &Dictionary, phrase: &str) -> Result<Vec<u16>> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return Err(Error::Mnemonic(format!(
            "Word count must be 12, 15, 18, 21 or 24, got {}",
            words.len()
        )));
    }

    words
        .iter()
        .enumerate()
        .map(|(position, word)| {
            dictionary.index_of(word).ok_or_else(|| {
                Error::Mnemonic(format!("Unknown word '{}' at position {}", word, position + 1))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> MnemonicCodec {
        MnemonicCodec::with_languages(&[Language::English, Language::Japanese])
    }

    #[test]
    fn test_english_vectors() {
        let codec = codec();
        let vectors = [
            (
                "00000000000000000000000000000000",
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
            ),
            (
                "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f",
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                "80808080808080808080808080808080",
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            ),
            (
                "ffffffffffffffffffffffffffffffff",
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000000",
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art",
            ),
        ];

        for (entropy_hex, phrase) in vectors {
            let entropy = hex::decode(entropy_hex).unwrap();
            let mnemonic = codec.encode(&entropy, Language::English).unwrap();
            assert_eq!(mnemonic.phrase(), phrase);
            assert_eq!(codec.decode(phrase, Language::English).unwrap(), entropy);
        }
    }

    #[test]
    fn test_encode_rejects_bad_entropy_length() {
        let codec = codec();
        let err = codec.encode(&[0u8; 15], Language::English).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_unloaded_language() {
        let codec = codec();
        let err = codec.encode(&[0u8; 16], Language::French).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(!codec.validate("abandon abandon", Language::French));
    }

    #[test]
    fn test_checksum_mismatch() {
        let codec = codec();
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(!codec.validate(phrase, Language::English));
        assert!(codec.is_well_formed(phrase, Language::English));
        assert!(matches!(
            codec.decode(phrase, Language::English),
            Err(Error::Mnemonic(_))
        ));
    }

    #[test]
    fn test_bad_word_count_and_unknown_word() {
        let codec = codec();
        assert!(!codec.is_well_formed("abandon abandon abandon", Language::English));

        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon bitcoinz";
        let err = codec.decode(phrase, Language::English).unwrap_err();
        assert_eq!(err, Error::Mnemonic("Unknown word 'bitcoinz' at position 12".to_string()));
    }

    #[test]
    fn test_detect_language() {
        let codec = codec();
        let mnemonic = codec.generate(128, Language::Japanese).unwrap();
        assert_eq!(codec.detect_language(&mnemonic.phrase()), Some(Language::Japanese));
        assert_eq!(codec.detect_language("not a mnemonic"), None);
    }

    #[test]
    fn test_detect_language_prefers_valid_checksum() {
        let codec = MnemonicCodec::with_languages(&[Language::English, Language::French]);

        // Every word is in both lists; only the French indices give a valid checksum
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon brave";
        assert!(codec.is_well_formed(phrase, Language::English));
        assert!(!codec.validate(phrase, Language::English));
        assert!(codec.validate(phrase, Language::French));
        assert_eq!(codec.detect_language(phrase), Some(Language::French));

        // No checksum matches anywhere: fall back to dictionary membership
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(!codec.validate(phrase, Language::French));
        assert_eq!(codec.detect_language(phrase), Some(Language::English));
    }

    #[test]
    fn test_language_names_round_trip() {
        for language in Language::ALL {
            assert_eq!(language.name().parse::<Language>().unwrap(), language);
        }
        assert_eq!("zh-TW".parse::<Language>().unwrap(), Language::TraditionalChinese);
        assert!("klingon".parse::<Language>().is_err());
    }

    #[test]
    fn test_dictionary_shape() {
        for language in Language::ALL {
            let dictionary = Dictionary::load(language);
            assert_eq!(dictionary.len(), WORDLIST_SIZE);
            assert_eq!(dictionary.index_of(dictionary.word(2047).unwrap()), Some(2047));
            assert_eq!(dictionary.word(2048), None);
        }
    }
}
