use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;

use contact_pictures::cli::{self, context::RunContext};
use contact_pictures::providers::ProviderKind;

#[derive(Debug, Parser)]
#[command(name = "contact-pictures", about = "Fill in missing contact pictures")]
struct Cli {
    /// Contact database (default: platform data directory)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (default: platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run with some providers switched off
    Providers {
        #[arg(long)]
        no_gravatar: bool,

        #[arg(long)]
        no_linkedin: bool,
    },
    /// Import contacts from a JSON file
    Import { path: PathBuf },
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let ctx = match RunContext::load(args.config.as_deref(), args.file) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let disabled = match args.command {
        Some(Command::Import { path }) => {
            println!("Importing from {}...", path.display());
            match cli::import(&ctx, &path) {
                Ok(stats) => {
                    println!("Import complete!");
                    println!("  Contacts: {}", stats.contacts);
                    println!("  Emails: {}", stats.emails);
                    println!("  Social profiles: {}", stats.social_profiles);
                    println!("  Skipped: {}", stats.skipped);
                }
                Err(e) => {
                    eprintln!("Import failed: {}", e);
                    std::process::exit(1);
                }
            }
            return;
        }
        Some(Command::Providers {
            no_gravatar,
            no_linkedin,
        }) => {
            let mut disabled = Vec::new();
            if no_gravatar {
                disabled.push(ProviderKind::Gravatar);
            }
            if no_linkedin {
                disabled.push(ProviderKind::LinkedIn);
            }
            disabled
        }
        None => Vec::new(),
    };

    match cli::run(&ctx, &disabled) {
        Ok(summary) => {
            println!("Checked {} contacts", summary.total());
            println!("  Updated: {}", summary.updated);
            println!("  Already had a picture: {}", summary.already_set);
            println!("  No picture found: {}", summary.not_found);
            println!("  Skipped: {}", summary.skipped);
            println!("  Failed: {}", summary.failed);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
