use anyhow::Result;
use callscope::cli::{commands, Cli, Commands, COLLECTION_BANNER};
use callscope::{Lab, ReportFormat};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let verbosity = cli.verbosity();

    // Initialize logging with verbosity-aware level; reports own stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.to_log_level()));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let config = cli.lab_config();
    if config.format == ReportFormat::Text {
        println!("{COLLECTION_BANNER}");
        println!();
    }
    let mut lab = Lab::with_config(std::io::stdout(), config);

    match cli.command() {
        Commands::Divide(args) => commands::divide(args, &mut lab)?,
        Commands::Fibonacci(args) => commands::fibonacci(args, &mut lab)?,
        Commands::Primes(args) => commands::primes(args, &mut lab)?,
        Commands::Parts(args) => commands::parts(args, &mut lab)?,
        Commands::Sum(args) => commands::sum(args, &mut lab)?,
    }

    Ok(())
}
