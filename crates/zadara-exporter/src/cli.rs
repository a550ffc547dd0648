use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zadara-exporter", version, about = "Zadara exporter for Prometheus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the Zadara exporter server
    Server(ServerArgs),
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// Config file; searched in /etc/zadara-exporter, ~/.zadara-exporter and . when omitted
    #[arg(long, env = "ZADARA_CONFIG")]
    pub config: Option<PathBuf>,

    /// The address to listen on for the metrics server [default: 0.0.0.0:9090]
    #[arg(long, alias = "listen_address", env = "ZADARA_LISTEN_ADDRESS")]
    pub listen_address: Option<String>,

    /// The path to expose the metrics on [default: /metrics]
    #[arg(long, alias = "listen_path", env = "ZADARA_LISTEN_PATH")]
    pub listen_path: Option<String>,
}
