//! DigitSlate (DS) parameter inspector
//!
//! Prints the compiled-in parameters of a network and converts addresses
//! with its base58 prefixes. The proof-of-work hash is not linked into this
//! binary, so only the static checks run here.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ds_core::chain::{registry, ChainParams};
use ds_core::constants::{CHAIN_FULL_NAME, CHAIN_NAME, COIN};
use ds_core::wallet::Base58Type;

#[derive(Parser, Debug)]
#[command(name = "ds-params", version, about = "DigitSlate chain parameter inspector")]
struct Cli {
    /// Network to inspect: main, test or regtest (default: $DS_NETWORK, then main)
    #[arg(long, short)]
    network: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize the network's identity and consensus settings
    Show {
        /// Dump every parameter as JSON instead
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the checkpoint table
    Checkpoints,

    /// Print the genesis block header and coinbase
    Genesis,

    /// Base58check-encode a payload (kinds: pubkey, script, secret, xpub, xprv, coin-type)
    Encode {
        kind: String,

        /// Payload bytes (hex)
        payload: String,
    },

    /// Decode a base58check string and report which prefix it carries
    Decode { address: String },
}

fn init_tracing() {
    // init tracing from env DS_LOG or RUST_LOG; logs go to stderr, results to stdout
    let filter = std::env::var("DS_LOG")
        .unwrap_or_else(|_| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let network = cli
        .network
        .or_else(|| std::env::var("DS_NETWORK").ok())
        .unwrap_or_else(|| "main".into());

    let params = registry()
        .context("building chain parameters")?
        .lookup(&network)?;
    params
        .validate_static()
        .with_context(|| format!("{} parameters are inconsistent", params.id()))?;
    info!(network = %params.network, "parameters checked");

    match cli.cmd {
        Commands::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(params)?);
            } else {
                show(params);
            }
        }
        Commands::Checkpoints => {
            let data = &params.checkpoints;
            for cp in data.checkpoints() {
                println!("{:>10}  {}", cp.height, cp.hash);
            }
            println!();
            println!("Last checkpoint time:   {}", data.last_checkpoint_time);
            println!("Transactions at last:   {}", data.transactions_last_checkpoint);
            println!("Transactions per day:   {}", data.transactions_per_day);
        }
        Commands::Genesis => {
            let genesis = &params.genesis;
            let coinbase = &genesis.transactions[0];
            println!("Expected hash: {}", params.genesis_hash());
            println!("Merkle root:   {}", genesis.header.merkle_root);
            println!("Time:          {}", genesis.header.time);
            println!("Bits:          0x{:08x}", genesis.header.bits);
            println!("Nonce:         {}", genesis.header.nonce);
            println!("Reward:        {} {}", coinbase.outputs[0].value / COIN, CHAIN_NAME);
            println!("Header:        {}", hex::encode(genesis.header.to_bytes()));
            println!("Coinbase tx:   {}", hex::encode(coinbase.to_bytes()));
        }
        Commands::Encode { kind, payload } => {
            let kind = Base58Type::from_name(&kind)
                .ok_or_else(|| anyhow!("unknown prefix kind: {}", kind))?;
            let payload = hex::decode(payload.trim()).context("payload is not hex")?;
            println!("{}", params.encode_address(kind, &payload)?);
        }
        Commands::Decode { address } => {
            let (kind, payload) = params
                .decode_address(address.trim())
                .with_context(|| format!("not a {} base58check string", params.id()))?;
            println!("{} {}", kind, hex::encode(payload));
        }
    }

    Ok(())
}

fn show(params: &ChainParams) {
    let c = &params.consensus;
    println!("{} [{}] ({})", CHAIN_FULL_NAME, CHAIN_NAME, params.id());
    println!("  Magic:            {}", params.message_start);
    println!("  Port:             {}", params.default_port);
    println!("  Genesis:          {}", params.genesis_hash());
    println!(
        "  Block spacing:    {}s, retarget every {} blocks",
        c.pow_target_spacing,
        c.difficulty_adjustment_interval(0)
    );
    if let Some(upgrade) = c.upgrade_1_2_0 {
        println!(
            "  Upgrade 1.2.0:    height {}, retarget every {} blocks",
            upgrade.height,
            c.difficulty_adjustment_interval(upgrade.height)
        );
    }
    println!("  Halving interval: {}", c.subsidy_halving_interval);
    println!("  Checkpoints:      {}", params.checkpoints.len());
    for seed in params.dns_seeds {
        println!("  DNS seed:         {} ({})", seed.host, seed.name);
    }
    for (kind, prefix) in params.base58_prefixes.iter() {
        println!("  Prefix {:<10} {}", kind.name(), hex::encode(prefix));
    }
}
