//! Kitbash CLI - component composition and lifecycle toolkit
//!
//! Usage: kitbash <COMMAND>
//!
//! Commands:
//!   demo  Run one of the composition demos
//!   list  List the available demos

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use kitbash::config::KitConfig;
use kitbash::domain::ports::Credentials;
use kitbash::infrastructure::logging;
use kitbash::presentation::{run_demo, Cli, Commands, Demo, DemoContext};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let (config, warnings) = KitConfig::load_with_warnings(path)
                .with_context(|| format!("loading {}", path.display()))?;
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            config.with_env_overrides()
        }
        None => {
            let cwd = std::env::current_dir().ok();
            KitConfig::load_or_default(cwd.as_deref())
        }
    };

    logging::init(&logging::filter_for_verbosity(
        &config.logging.filter,
        cli.verbose,
    ));

    match cli.command {
        Commands::Demo {
            name,
            username,
            password,
        } => {
            let mut ctx = DemoContext::new(config);
            if let (Some(username), Some(password)) = (username, password) {
                ctx = ctx.with_credentials(Credentials::new(username, password));
            }
            for line in run_demo(name, &ctx)? {
                println!("{}", line);
            }
        }
        Commands::List => {
            for demo in Demo::value_variants() {
                println!("{}", demo.name());
            }
        }
    }

    Ok(())
}
