use anyhow::{bail, Context, Result};
use clap::Parser;
use core_logic::{
    setup_logger, NetworkList, ProxyManager, RunTimer, WalletError, WalletManager, REPORT_TARGET,
};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use dotenv::dotenv;
use ethers::signers::LocalWallet;
use evm_inscriber::encoding::resolve_payload;
use evm_inscriber::{BatchConfig, BatchRunner, EthersClient, HexEncoder, InscriberConfig};
use std::path::Path;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: String,
    /// Network number as listed in the chain file (1-based)
    #[arg(short, long)]
    network: Option<usize>,
    /// Text to inscribe; blank uses the default mint inscription
    #[arg(short, long)]
    payload: Option<String>,
    /// Transactions per wallet
    #[arg(short = 'r', long)]
    count: Option<u32>,
}

fn prompt_network(networks: &NetworkList) -> Result<usize> {
    let idx = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select network")
        .items(&networks.names())
        .default(0)
        .interact()
        .context("Cannot prompt for network (not a terminal); pass --network")?;
    Ok(idx + 1)
}

fn prompt_payload() -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Payload (blank for default inscription)")
        .allow_empty(true)
        .interact_text()
        .context("Cannot prompt for payload (not a terminal); pass --payload")
}

fn prompt_count() -> Result<u32> {
    Input::<u32>::with_theme(&ColorfulTheme::default())
        .with_prompt("Transactions per wallet")
        .validate_with(|n: &u32| if *n > 0 { Ok(()) } else { Err("must be at least 1") })
        .interact_text()
        .context("Cannot prompt for count (not a terminal); pass --count")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let config = InscriberConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    let _log_guard = setup_logger(config.log_dir.as_deref());

    let networks = NetworkList::load(&config.chain_file)?;
    let selected = match args.network {
        Some(n) => n,
        None => prompt_network(&networks)?,
    };
    let network = networks.select(selected)?.clone();
    info!(
        target: REPORT_TARGET,
        "Network: {} ({})", network.name, network.rpc_endpoint
    );

    let manager = WalletManager::load(
        &config.wallet_file,
        config.key_file.as_deref().map(Path::new),
    )?;
    let wallets = manager
        .credentials()
        .iter()
        .enumerate()
        .map(|(i, cred)| {
            cred.private_key()
                .parse::<LocalWallet>()
                .map_err(|_| WalletError::InvalidKeyFormat { index: i + 1 })
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(target: REPORT_TARGET, "Loaded {} wallets.", wallets.len());

    let raw_payload = match args.payload {
        Some(p) => p,
        None => prompt_payload()?,
    };
    let payload = resolve_payload(&raw_payload);
    HexEncoder::new(config.payload_encoding)
        .to_bytes(&payload)
        .context("Payload cannot be used as transaction data; try payload_encoding = \"utf8\"")?;

    let repeat_count = match args.count {
        Some(n) => n,
        None => prompt_count()?,
    };
    if repeat_count == 0 {
        bail!("Transaction count must be at least 1");
    }

    let proxies = match &config.proxy_file {
        Some(path) => ProxyManager::load_proxies(Path::new(path))?,
        None => Vec::new(),
    };
    if let Some(proxy) = proxies.first() {
        info!("Using proxy {}", proxy.url);
    }

    let client = EthersClient::connect(&network, proxies.first()).await?;
    info!("Connected to chain ID {}", client.chain_id());

    let batch = BatchConfig {
        network,
        payload,
        repeat_count,
        gas: config.gas(),
        pacing: config.pacing(),
        nonce_policy: config.nonce_policy,
        encoding: config.payload_encoding,
    };

    let timer = RunTimer::start();
    let report = BatchRunner::new(&client, &batch).run_all(&wallets).await;

    let aborted = report.aborted_wallets();
    if aborted > 0 {
        warn!("{} of {} wallets stopped early", aborted, report.wallets.len());
    }
    timer.finish(&report.stats());

    Ok(())
}
