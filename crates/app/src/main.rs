//! Game rental console

use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gamerental_app::{cli::Cli, context::AppContext, menu, terminal::StdTerminal};

#[tokio::main]
pub async fn main() {
    // Usage errors and --help are printed by clap itself
    let cli = Cli::load().unwrap_or_else(|e| e.exit());

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = cli.connect_options().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");

        process::exit(1);
    });

    let ctx = match AppContext::connect(options, &cli.settings()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = ?e, "database connection failed");
            eprintln!("Unable to connect to database: {e}");

            process::exit(1);
        }
    };

    info!(empty_cart_policy = %cli.empty_cart_policy, "connected");

    let mut terminal = StdTerminal::new();

    if let Err(e) = menu::run(&ctx, &mut terminal).await {
        eprintln!("Error reading input: {e}");

        process::exit(1);
    }

    println!("Bye!");
}
