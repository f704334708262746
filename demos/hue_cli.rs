//! CLI application for controlling the lights of a paired Hue bridge.
//!
//! Run with: cargo run --example hue_cli -- --help

use std::time::Duration;

use clap::{Parser, Subcommand};
use hue_bridge_rs::{
    Alert, BridgeAddress, Brightness, CieCoord, Config, Effect, Hue, Light, LightRepository,
    Mired, PairingToken, Saturation, discover_bridges,
};

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Control Hue lights from the command line", long_about = None)]
struct Cli {
    /// Address of the bridge (not required for discover command)
    #[arg(short, long, global = true)]
    address: Option<BridgeAddress>,

    /// Token obtained by pairing (not required for discover command)
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Timeout in seconds for web requests
    #[arg(short, long, global = true, default_value = "3")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover bridges on the network
    Discover,

    /// List all lights and their state
    List,

    /// Turn a light on
    On { id: String },

    /// Turn a light off
    Off { id: String },

    /// Toggle a light on/off
    Toggle { id: String },

    /// Set brightness (1-254)
    Brightness {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=254))]
        level: u8,
    },

    /// Set hue (0-65535) and saturation (0-254)
    Color {
        id: String,
        hue: u16,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=254))]
        saturation: u8,
    },

    /// Set CIE xy coordinates (0.0-1.0 each)
    Xy { id: String, x: f64, y: f64 },

    /// Set color temperature in Kelvin (2000-6500)
    Temperature {
        id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(2000..=6500))]
        kelvin: u32,
    },

    /// Flash a light (none, select, lselect)
    Alert { id: String, alert: Alert },

    /// Set an effect (none, colorloop)
    Effect { id: String, effect: Effect },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::default().with_http_timeout(Duration::from_secs(cli.timeout));

    if let Commands::Discover = cli.command {
        let bridges = discover_bridges(config.discovery_timeout).await?;
        if bridges.is_empty() {
            println!("No bridges found on the network.");
        }
        for bridge in bridges {
            println!("  {}", bridge);
        }
        return Ok(());
    }

    let address = cli
        .address
        .ok_or("Bridge address is required for this command. Use --address <IP>")?;
    let token = PairingToken::from(
        cli.username
            .ok_or("Token is required for this command. Use --username <TOKEN>")?,
    );
    let repo = LightRepository::new(&config)?;
    let lights = repo.fetch_all(address, &token).await?;

    let find = |id: &str| -> Result<Light, String> {
        lights
            .iter()
            .find(|light| light.id() == id)
            .cloned()
            .ok_or_else(|| format!("No light with id `{}`", id))
    };

    match cli.command {
        Commands::Discover => unreachable!(),

        Commands::List => {
            for light in &lights {
                let state = light.state();
                println!(
                    "[{}] {:24} {:4} bri {:3} reachable {}",
                    light.id(),
                    light.name(),
                    if state.on { "ON" } else { "OFF" },
                    state.brightness,
                    state.reachable
                );
            }
        }

        Commands::On { id } => repo.set_on(&mut find(&id)?, true).await?,

        Commands::Off { id } => repo.set_on(&mut find(&id)?, false).await?,

        Commands::Toggle { id } => {
            let mut light = find(&id)?;
            let on = !light.state().on;
            repo.set_on(&mut light, on).await?;
        }

        Commands::Brightness { id, level } => {
            let brightness = Brightness::create(level).ok_or("Invalid brightness")?;
            repo.set_brightness(&mut find(&id)?, brightness).await?;
        }

        Commands::Color { id, hue, saturation } => {
            let mut light = find(&id)?;
            let saturation = Saturation::create(saturation).ok_or("Invalid saturation")?;
            repo.set_hue(&mut light, Hue::new(hue)).await?;
            repo.set_saturation(&mut light, saturation).await?;
        }

        Commands::Xy { id, x, y } => {
            let coords = CieCoord::create(x, y).ok_or("Coordinates must be between 0 and 1")?;
            repo.set_xy(&mut find(&id)?, coords).await?;
        }

        Commands::Temperature { id, kelvin } => {
            let mired = Mired::from_kelvin(kelvin).ok_or("Invalid temperature")?;
            repo.set_color_temperature(&mut find(&id)?, mired).await?;
        }

        Commands::Alert { id, alert } => repo.set_alert(&mut find(&id)?, alert).await?,

        Commands::Effect { id, effect } => repo.set_effect(&mut find(&id)?, effect).await?,
    }

    Ok(())
}
