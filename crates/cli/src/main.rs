mod cli;
mod commands;
mod logging;

use clap::Parser;
use tracing::error;

use crate::cli::{Cli, Commands, SavedCommands};
use crate::commands::{
    decode_command, list_command, run_command, saved_delete_command, saved_list_command,
    share_command, templates_command,
};
use strand_transforms::default_registry;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Cli::parse();
    let registry = default_registry();
    match args.cmd {
        Commands::List => list_command(&registry),
        Commands::Run {
            pipeline,
            quiet,
            save,
        } => {
            run_command(registry, &pipeline, &args.library, quiet, save).await?;
        }
        Commands::Share {
            pipeline,
            raw,
            base_url,
        } => {
            share_command(&registry, &pipeline, &args.library, raw, &base_url)?;
        }
        Commands::Decode { config } => decode_command(&config)?,
        Commands::Templates => templates_command(),
        Commands::Saved { cmd } => match cmd {
            SavedCommands::List => saved_list_command(&args.library)?,
            SavedCommands::Delete { name } => saved_delete_command(&args.library, &name)?,
        },
    }
    Ok(())
}
