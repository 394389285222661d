use anyhow::Result;
use clap::Parser;

mod cli;
mod cmd_classic;
mod cmd_config;
mod cmd_thin;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Config { config, vg, json } => cmd_config::exec(config, vg, json),

        cli::Cmd::Classic { store, json } => cmd_classic::exec(store, json),

        cli::Cmd::Thin {
            config,
            vg,
            lv,
            dump,
            json,
        } => cmd_thin::exec(config, vg, lv, dump, json),
    }
}
