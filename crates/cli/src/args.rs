use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ctreuse")]
#[command(version = "0.1.0")]
#[command(about = "Detect TCP connection reuse in the kernel conntrack table", long_about = None)]
pub struct Cli {
    /// Seconds between sampling passes
    #[arg(short, long, default_value = "5")]
    pub interval: u64,

    /// Keep only connections whose destination IP equals this address
    #[arg(short = 's', long, default_value = "")]
    pub service_ip: String,

    /// Path to the conntrack table file
    #[arg(short, long, default_value = "/proc/net/nf_conntrack")]
    pub path: PathBuf,

    /// Output format for reuse events: text, json
    #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
    pub output_format: String,

    /// Run a single sampling pass and exit
    #[arg(long)]
    pub once: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
