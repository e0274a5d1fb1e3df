use crate::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "voxa")]
#[command(version, about = "Usage, billing and call-quality reports for Voxa clients")]
pub struct Cli {
    /// Input document; reads stdin when omitted or "-"
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Extra call records (JSON arrays or JSONL), e.g. "exports/*.jsonl"
    #[arg(long = "calls", value_name = "GLOB")]
    pub calls: Vec<String>,

    /// Treat the input as {clients, calls} and print the cross-client overview
    #[arg(short = 'a', long = "analytics")]
    pub analytics: bool,

    /// Reference date for the month-to-date report (YYYY-MM-DD)
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<String>,

    /// Output format, overrides the config file
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,

    /// Debug logging on stderr (VOXA_LOG takes precedence)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Input path, or None for stdin
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "voxa",
            "--input",
            "client.json",
            "--calls",
            "a/*.jsonl",
            "--calls",
            "b.json",
            "--today",
            "2024-03-15",
            "-f",
            "json",
        ]);
        assert_eq!(cli.input_path(), Some(&PathBuf::from("client.json")));
        assert_eq!(cli.calls, vec!["a/*.jsonl", "b.json"]);
        assert_eq!(cli.today.as_deref(), Some("2024-03-15"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(!cli.analytics);
    }

    #[test]
    fn test_dash_means_stdin() {
        let cli = Cli::parse_from(["voxa", "-i", "-"]);
        assert_eq!(cli.input_path(), None);
        let cli = Cli::parse_from(["voxa"]);
        assert_eq!(cli.input_path(), None);
    }
}
