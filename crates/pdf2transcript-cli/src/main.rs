mod cli;
mod convert_cmd;
mod shared;
mod split_cmd;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Convert {
            ref file,
            ref output,
        } => convert_cmd::run(file, output),
        cli::Commands::Split {
            ref file,
            ref output,
        } => split_cmd::run(file, output),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
