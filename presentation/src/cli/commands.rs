//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for finquery
#[derive(Parser, Debug)]
#[command(name = "finquery")]
#[command(author, version, about = "Financial query assistant - one model call, one tool, one answer")]
#[command(long_about = r#"
finquery answers natural-language financial questions. For each query the
model either answers directly or picks one data tool (quotes, price history,
news, macro indicators, regional data, image generation); the tool result
is turned into a plain-language summary with optional chart data, image,
articles and spoken audio.

Configuration files are loaded from (in priority order):
1. FINQUERY_* environment variables (use __ between section and key)
2. --config <path>     Explicit config file
3. ./finquery.toml     Project-level config
4. ~/.config/finquery/config.toml   Global config

Example:
  finquery serve
  finquery ask "What is the current price of AAPL?"
  finquery tools
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Answer one query and print the response as JSON
    Ask {
        /// The financial question
        query: String,
    },

    /// Print the tool declarations offered to the model
    Tools,
}

impl Cli {
    /// The command to run; a bare invocation serves.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            host: None,
            port: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_serves() {
        let cli = Cli::parse_from(["finquery"]);
        assert_eq!(
            cli.command(),
            Command::Serve {
                host: None,
                port: None
            }
        );
    }

    #[test]
    fn test_ask_with_global_flags() {
        let cli = Cli::parse_from(["finquery", "ask", "price of AAPL?", "-vv", "--no-config"]);
        assert_eq!(
            cli.command(),
            Command::Ask {
                query: "price of AAPL?".to_string()
            }
        );
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
    }

    #[test]
    fn test_serve_port_override() {
        let cli = Cli::parse_from(["finquery", "serve", "--port", "8080"]);
        assert_eq!(
            cli.command(),
            Command::Serve {
                host: None,
                port: Some(8080)
            }
        );
    }
}
