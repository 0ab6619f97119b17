//! hdw - command-line front end for hdwallet
//!
//! Generates mnemonics, stretches them into master keys and walks the key
//! tree. Results go to stdout, logs to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hdwallet::{derive_seed, DerivationPath, ExtendedKey, HdWallet, Language, MnemonicCodec, Network, WalletConfig};

#[derive(Parser)]
#[command(name = "hdw")]
#[command(about = "Hierarchical deterministic keys from mnemonic passphrases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON configuration file (defaults to HDWALLET_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Network override: mainnet or testnet
    #[arg(short, long, global = true)]
    network: Option<Network>,

    /// Mnemonic language override, e.g. english, japanese, zh-hans
    #[arg(short, long, global = true)]
    language: Option<Language>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new mnemonic phrase
    Mnemonic {
        /// Entropy size: 128, 160, 192, 224 or 256
        #[arg(long)]
        bits: Option<usize>,
    },
    /// Check a mnemonic phrase
    Validate {
        phrase: String,
        /// Only check word count and dictionary membership
        #[arg(long)]
        loose: bool,
    },
    /// Print the hex seed of a mnemonic phrase
    Seed {
        phrase: String,
        #[arg(short, long, default_value = "")]
        passphrase: String,
    },
    /// Print the master extended private key of a mnemonic phrase
    Master {
        phrase: String,
        #[arg(short, long, default_value = "")]
        passphrase: String,
    },
    /// Derive a descendant of an extended key, e.g. `derive xprv... m/44'/0'/0'/0/0`
    Derive {
        key: String,
        path: String,
        /// Print the public projection of the result
        #[arg(long)]
        public: bool,
    },
    /// Print the public projection of an extended key
    Neuter { key: String },
    /// Print the address of an extended key
    Address { key: String },
    /// Print the fields of an extended key as JSON
    Inspect { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hdw={},hdwallet={}", log_level, log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Mnemonic { bits } => {
            let codec = MnemonicCodec::with_languages(&[config.language]);
            let bits = bits.unwrap_or(config.entropy_bits);
            let mnemonic = codec.generate(bits, config.language)?;
            info!(words = mnemonic.word_count(), language = %config.language, "Generated mnemonic");
            println!("{}", mnemonic);
        }
        Commands::Validate { phrase, loose } => {
            let codec = MnemonicCodec::with_languages(&[config.language]);
            if loose {
                if !codec.is_well_formed(&phrase, config.language) {
                    bail!("mnemonic is not well formed");
                }
            } else {
                codec.decode(&phrase, config.language)?;
            }
            println!("valid");
        }
        Commands::Seed { phrase, passphrase } => {
            let seed = derive_seed(&phrase, &passphrase);
            println!("{}", hex::encode(seed.as_bytes()));
        }
        Commands::Master { phrase, passphrase } => {
            let codec = Arc::new(MnemonicCodec::with_languages(&[config.language]));
            let wallet = HdWallet::new(codec, config)?;
            let master = wallet.restore(&phrase, &passphrase)?;
            println!("{}", master);
        }
        Commands::Derive { key, path, public } => {
            let key = parse_key(&key)?;
            let path: DerivationPath = path.parse()?;
            let mut derived = key.derive_path(&path)?;
            if public {
                derived = derived.neuter()?;
            }
            info!(path = %path, depth = derived.depth(), "Derived key");
            println!("{}", derived);
        }
        Commands::Neuter { key } => {
            println!("{}", parse_key(&key)?.neuter()?);
        }
        Commands::Address { key } => {
            println!("{}", parse_key(&key)?.address()?);
        }
        Commands::Inspect { key } => {
            let key = parse_key(&key)?;
            let report = json!({
                "version": format!("{:?}", key.version()),
                "network": key.network(),
                "private": key.is_private(),
                "depth": key.depth(),
                "parent_fingerprint": hex::encode(key.parent_fingerprint()),
                "child_index": key.child_index(),
                "hardened": key.is_hardened(),
                "chain_code": hex::encode(key.chain_code()),
                "public_key": hex::encode(key.public_key_bytes()?),
                "fingerprint": hex::encode(key.fingerprint()?),
                "address": key.address()?,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<WalletConfig> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => WalletConfig::from_env(),
    };

    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }

    config.validate()?;
    Ok(config)
}

fn parse_key(text: &str) -> Result<ExtendedKey> {
    ExtendedKey::from_base58(text.trim()).context("parsing extended key")
}
