use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "fittrack",
    about = "Fitness Activity Logging & Performance Prediction Dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Serve,
    Seed {
        #[arg(long, default_value_t = false)]
        keep_existing: bool,
    },
    Status,
}
