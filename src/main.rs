use clap::Parser;
use invsio_risk::cli::{Cli, Commands};
use invsio_risk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if std::path::Path::new(&cli.config).exists() {
        Config::load(&cli.config)?
    } else {
        eprintln!("Warning: config {} not found, using defaults", cli.config);
        Config::default()
    };

    // Initialize telemetry
    invsio_risk::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Calculate(args) => args.execute(&config).await?,
        Commands::Plan(args) => args.execute(&config).await?,
        Commands::Journal(args) => args.execute(&config).await?,
        Commands::Config => {
            println!("# Effective configuration ({})", cli.config);
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
