use clap::Parser;
use fastapi_codegen::interface::output::print_summary;
use fastapi_codegen::interface::Cli;
use fastapi_codegen::{generate_from_config, Error, GenerateConfig};
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match generate_from_config(&config) {
        Ok(files) => print_summary(&config.target_path, &config.project_name, &files),
        Err(e @ Error::TargetDirectoryMissing(_)) => {
            println!("{}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Config file values first, then anything given on the command line
fn load_config(cli: &Cli) -> Result<GenerateConfig, Error> {
    let mut config = match cli.config_file {
        Some(ref path) => GenerateConfig::from_file(path)?,
        None => GenerateConfig::default(),
    };
    config.merge(&GenerateConfig::from(cli));
    Ok(config)
}
