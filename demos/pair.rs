//! Discover a Hue bridge and pair with it.
//!
//! Prints the token on success. If more than one bridge answers, asks which
//! one to use.
//!
//! Run with: cargo run --example pair -- --timeout 10

use std::io::{self, BufRead, Write};
use std::time::Duration;

use clap::Parser;
use hue_bridge_rs::{BridgePairer, CloudDiscoverer, Config, discover_bridges};

#[derive(Parser)]
#[command(name = "hue-pair")]
#[command(about = "Find a Hue bridge and obtain an API token", long_about = None)]
struct Cli {
    /// Timeout in seconds for discovery and web requests
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Device name sent to the bridge (defaults to this machine's hostname)
    #[arg(short, long)]
    device: Option<String>,

    /// Ask discovery.meethue.com instead of browsing with mDNS
    #[arg(long)]
    cloud: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let timeout = Duration::from_secs(cli.timeout);
    let mut config = Config::default()
        .with_http_timeout(timeout)
        .with_discovery_timeout(timeout);
    if let Some(device) = &cli.device {
        config = config.with_device_name(device);
    }

    println!("Scanning network for Hue bridges...");
    let bridges = if cli.cloud {
        CloudDiscoverer::new(&config)?.discover().await?
    } else {
        discover_bridges(config.discovery_timeout).await?
    };

    let bridge = match bridges.len() {
        0 => return Err("No Hue bridges found!".into()),
        1 => &bridges[0],
        n => {
            println!("More than one Hue bridge discovered. Choose one of the following:");
            for (i, candidate) in bridges.iter().enumerate() {
                println!("[{}] {}", i, candidate);
            }
            print!("Enter selection number: ");
            io::stdout().flush()?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            let selection: usize = line.trim().parse()?;
            if selection >= n {
                return Err(format!("Invalid selection `{}` (must be less than {})", selection, n).into());
            }
            &bridges[selection]
        }
    };

    println!("Attempting to pair with {}. Please press the button on your bridge.", bridge);
    println!("Press the Enter key when ready...");
    io::stdin().lock().read_line(&mut String::new())?;

    let token = BridgePairer::new(&config)?.connect(bridge).await?;
    println!("{}", token.as_str());
    Ok(())
}
