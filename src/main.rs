use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rolegate::config::load_config;
use rolegate::logs::init_logger;
use rolegate::server::config::GateServerConfig;
use rolegate::server::factory::ServerFactory;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct GateArgs {
    /// The config file to use.
    #[arg(long, short, default_value = "rolegate.toml")]
    pub config: PathBuf,

    /// Print server configuration data (JSON) and exit.
    #[arg(long)]
    pub print_config: bool,
}

async fn run(args: GateArgs) -> Result<()> {
    let cfg: GateServerConfig = load_config(&args.config)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    init_logger(&cfg.logs)?;

    let factory = ServerFactory::new(cfg);
    let srv = factory.build_server()?;
    srv.run().await.context("run gate server")?;

    info!("Server exited by user");
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = GateArgs::parse();
    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
