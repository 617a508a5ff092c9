mod cmd;
mod core;
mod tax;

use clap::{Parser, Subcommand};

/// Azerbaijan simplified tax (Tax Code 218-220) eligibility and calculation
#[derive(Parser, Debug)]
#[command(name = "azsim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Determine eligibility and compute the simplified tax due
    Evaluate(cmd::evaluate::EvaluateCommand),
    /// Print the expected input format or the result format
    Schema(cmd::schema::SchemaCommand),
    /// Browse the licensed activity catalog (218.5.13)
    Activities(cmd::activities::ActivitiesCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Evaluate(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
        Command::Activities(cmd) => cmd.exec(),
    }
}
