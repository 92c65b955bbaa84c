pub mod console;

pub use console::Console;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "triqui")]
#[command(about = "Tic-tac-toe with local user accounts", long_about = None)]
pub struct Cli {
    /// Config file; created with defaults if missing
    #[arg(long, default_value = "triqui.toml")]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path() {
        let cli = Cli::parse_from(["triqui"]);
        assert_eq!(cli.config, PathBuf::from("triqui.toml"));

        let cli = Cli::parse_from(["triqui", "--config", "other.toml"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }
}
