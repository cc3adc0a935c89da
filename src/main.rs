use anyhow::Result;
use clap::Parser;
use grep_filter::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("grep-filter: error: {e:#}");
            std::process::exit(2);
        }
    };

    // CLI --log-level flag takes precedence, then RUST_LOG, then config
    grep_filter::debug::init_log_bridge(cli.log_level, config.log_level);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = cli::run(&cli, &config, &mut out) {
        log::error!("{e:#}");
        eprintln!("grep-filter: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
