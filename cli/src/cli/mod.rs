use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the TUI interface (default)
    #[command(alias = "tui")]
    Ui,

    /// Output battery reports and derived state as JSON
    #[command(alias = "pipe")]
    Report {
        /// Number of samples to output (0 = infinite)
        #[arg(short, long, default_value_t = 1)]
        samples: u32,

        /// Interval between samples in milliseconds
        #[arg(short, long, default_value_t = 1000)]
        interval: u64,

        /// Compact JSON output (one line per sample)
        #[arg(short, long)]
        compact: bool,
    },

    /// List battery devices and their individual reports
    #[command(alias = "ls")]
    Devices {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print each battery property as it changes
    Watch {
        /// Polling interval in milliseconds
        #[arg(
            short,
            long,
            default_value_t = 2000,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        interval: u64,
    },

    /// Show or edit configuration
    Config {
        /// Print config file path
        #[arg(long)]
        path: bool,

        /// Reset config to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(short, long)]
        edit: bool,
    },
}

/// Battery health monitor
#[derive(Debug, Parser)]
#[command(name = "juice", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// UI refresh interval in milliseconds
    #[arg(short, long, global = true)]
    pub refresh_ms: Option<u64>,

    /// Appearance mode (auto, dark, light)
    #[arg(short, long, global = true)]
    pub appearance: Option<String>,

    /// Icon set (nerd, ascii)
    #[arg(long, global = true)]
    pub icons: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tui() {
        let cli = Cli::try_parse_from(["juice"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_report_args() {
        let cli = Cli::try_parse_from(["juice", "report", "-s", "3", "--compact"]).unwrap();
        match cli.command {
            Some(Commands::Report {
                samples,
                interval,
                compact,
            }) => {
                assert_eq!(samples, 3);
                assert_eq!(interval, 1000);
                assert!(compact);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["juice", "ui", "--icons", "ascii", "--log-level", "debug"])
                .unwrap();
        assert_eq!(cli.icons.as_deref(), Some("ascii"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_watch_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["juice", "watch", "--interval", "0"]).is_err());

        let cli = Cli::try_parse_from(["juice", "watch", "-i", "500"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Watch { interval: 500 })));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
