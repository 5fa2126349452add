use std::sync::Arc;

use clap::{Parser, Subcommand};
use demo_core::types::{number_token, split_chars};
use demo_core::{join_detached, Caller, DemoClient, Scenario, UreqTransport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "demo-client")]
#[command(about = "Calls the demo service routes and logs what comes back", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET /greet with query parameters
    Greet {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// POST /math/average with a JSON body
    Average {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// PUT /shout/{word}
    Shout { word: String },
    /// DELETE /secure/resource with an x-role header
    Delete {
        #[arg(short, long)]
        role: String,
    },
    /// Call all four routes
    All {
        #[arg(long, default_value = "yossi")]
        name: String,
        #[arg(long, default_value = "he")]
        lang: String,
        /// Sent one character per element, e.g. 12345 -> ["1","2","3","4","5"]
        #[arg(long, default_value = "12345")]
        digits: String,
        #[arg(long, default_value = "medina")]
        word: String,
        #[arg(long, default_value = "admin")]
        role: String,
        /// Start every call at once instead of chaining them
        #[arg(long)]
        concurrent: bool,
        /// With --concurrent, wait for every call before logging completion
        #[arg(long, requires = "concurrent")]
        wait: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let caller = Caller::new(DemoClient::new(&cli.url)?, UreqTransport::new());
    tracing::debug!(base_url = caller.client().base_url(), "client ready");

    match cli.command {
        Commands::Greet { name, lang } => caller.greet(&name, lang.as_deref()),
        Commands::Average { values } => {
            let numbers: Vec<_> = values.iter().map(String::as_str).map(number_token).collect();
            caller.average(&numbers);
        }
        Commands::Shout { word } => caller.shout(&word),
        Commands::Delete { role } => caller.delete_resource(&role),
        Commands::All {
            name,
            lang,
            digits,
            word,
            role,
            concurrent,
            wait,
        } => {
            let scenario = Scenario {
                name,
                lang: Some(lang),
                numbers: split_chars(&digits),
                word,
                role,
            };
            match (concurrent, wait) {
                (false, _) => caller.run_sequential(&scenario),
                (true, true) => caller.run_concurrent_joined(&scenario),
                (true, false) => {
                    let caller = Arc::new(caller);
                    // The marker is already logged; joining only keeps the
                    // process alive until the detached calls report.
                    join_detached(caller.run_concurrent(&scenario));
                }
            }
        }
    }
    Ok(())
}
