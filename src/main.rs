use clap::Parser;
use secret::cli::{commands, init_logging, output, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Get { ref key } => commands::get::execute(&cli, key),
        Commands::Set { ref key, ref value } => {
            commands::set::execute(&cli, key, value.as_deref())
        }
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
