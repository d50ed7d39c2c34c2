use clap::Parser;
use gf_codegen::{CliArgs, GeneratorConfig, LoggingConfig, init_logging, run};

fn main() -> anyhow::Result<()> {
    let _guard = init_logging(LoggingConfig::from_env())?;

    let cli = CliArgs::parse();
    let config = GeneratorConfig::from_args(cli)?;

    run(&config).map(|_| ())
}
