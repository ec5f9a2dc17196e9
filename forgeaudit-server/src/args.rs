//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "forgeaudit-server")]
#[command(author, version, about = "Audit report builder API server")]
pub struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM provider (anthropic, openai)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model to use for text enhancement
    #[arg(long)]
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = Args::parse_from(["forgeaudit-server"]);
        assert!(args.port.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let args = Args::parse_from([
            "forgeaudit-server",
            "--port",
            "8080",
            "--provider",
            "openai",
            "--model",
            "gpt-4o",
        ]);
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.provider.as_deref(), Some("openai"));
        assert_eq!(args.model.as_deref(), Some("gpt-4o"));
    }
}
