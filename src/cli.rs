use clap::Parser;

/// Everything is driven by configuration, so there are no options beyond help and version.
#[derive(Parser)]
#[command(name = "decksize")]
#[command(about = "Disk usage per Steam app across internal storage and mounted cards")]
#[command(version)]
pub struct Cli {}
