use clap::Parser;
use datepick_core::PickerConfig;
use dotenv::dotenv;
use log::LevelFilter;

/// Keyboard-driven date range picker
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Pick a single date instead of a range
    #[arg(long)]
    single: bool,

    /// Longest allowed range in days, inclusive of both ends
    #[arg(long)]
    max_range: Option<u32>,

    /// Separator between year, month and day
    #[arg(long)]
    separator: Option<String>,

    #[arg(long)]
    min_year: Option<i32>,

    #[arg(long)]
    max_year: Option<i32>,

    /// Show a second, independent picker
    #[arg(long)]
    dual: bool,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Flags override whatever the environment configured
    fn apply(&self, mut config: PickerConfig) -> PickerConfig {
        if self.single {
            config.range_mode = false;
        }
        if let Some(max_range) = self.max_range {
            config.max_range = max_range;
        }
        if let Some(separator) = &self.separator {
            config.separator = separator.clone();
        }
        if let Some(min_year) = self.min_year {
            config.min_year = min_year;
        }
        if let Some(max_year) = self.max_year {
            config.max_year = max_year;
        }
        config
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    let config = cli.apply(PickerConfig::from_env());
    config.validate()?;
    datepick_tui::tui_main(config, cli.dual, cli.log_level).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "datepick",
            "--single",
            "--max-range",
            "14",
            "--separator",
            ".",
            "--min-year",
            "2000",
        ]);
        let config = cli.apply(PickerConfig::default());
        assert!(!config.range_mode);
        assert_eq!(config.max_range, 14);
        assert_eq!(config.separator, ".");
        assert_eq!(config.min_year, 2000);
        assert_eq!(config.max_year, PickerConfig::default().max_year);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["datepick"]);
        assert!(!cli.dual);
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert_eq!(cli.apply(PickerConfig::default()), PickerConfig::default());
    }
}
