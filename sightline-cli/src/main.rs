use clap::Parser;
use sightline_cli::{run, Cli};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .parse_default_env()
        .init();

    log::debug!("{:?}", cli.command);

    let output = run(&cli).map_err(|e| miette::miette!("{:#}", e))?;
    println!("{}", output);
    Ok(())
}
