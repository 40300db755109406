use anyhow::{Context, Result};
use clap::Parser;
use line_excise_config::Config;
use line_excise_engine::{ExciseOptions, ExcisionRange, ExcisionReport, RangePolicy, excise_file};
use std::path::PathBuf;

/// Remove an inclusive range of lines from a text file
#[derive(Debug, Parser)]
#[command(name = "line-excise", version, about)]
struct Cli {
    /// File to edit
    path: PathBuf,

    /// First line to remove (1-based)
    start: usize,

    /// Last line to remove (inclusive); values past the end remove the rest of the file
    end: usize,

    /// Write the result here instead of overwriting PATH
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat a start line past the end of the file as a no-op instead of an error
    #[arg(long, conflicts_with = "strict")]
    lenient: bool,

    /// Reject a start line past the end of the file (the default)
    #[arg(long)]
    strict: bool,

    /// Read configuration from this file instead of ~/.config/line-excise/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }

    /// Flags win over the config file, which wins over the default
    fn range_policy(&self, config: Option<&Config>) -> RangePolicy {
        if self.lenient {
            RangePolicy::Lenient
        } else if self.strict {
            RangePolicy::Strict
        } else {
            config.map(|c| c.range_policy).unwrap_or_default()
        }
    }
}

fn load_config(cli: &Cli) -> Result<Option<Config>> {
    let config = match &cli.config {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            config
        }
        None => Config::load()?,
    };
    Ok(config)
}

fn run(cli: &Cli) -> Result<ExcisionReport> {
    let config = load_config(cli)?;
    if config.is_none() {
        log::debug!("No config file, using defaults");
    }

    let range = ExcisionRange::new(cli.start, cli.end)?;
    let options = ExciseOptions {
        policy: cli.range_policy(config.as_ref()),
        output: cli.output.clone(),
    };
    log::info!(
        "Removing lines {range} from {} ({:?} range policy)",
        cli.path.display(),
        options.policy
    );

    excise_file(&cli.path, range, &options)
        .with_context(|| format!("Could not remove lines {range} from {}", cli.path.display()))
}

fn format_report(report: &ExcisionReport) -> String {
    let noun = if report.removed_lines == 1 {
        "line"
    } else {
        "lines"
    };
    format!(
        "Removed {} {noun} from {}. Total lines: {}",
        report.removed_lines,
        report.written_to.display(),
        report.remaining_lines
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .init();

    let report = run(&cli)?;
    println!("{}", format_report(&report));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn ten_line_file() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ten.txt");
        let content: String = (1..=10).map(|n| format!("L{n}\n")).collect();
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    /// Parse with an explicit, empty config so the user's own file never leaks in
    fn parse(dir: &TempDir, args: &[&str]) -> Cli {
        let config = dir.path().join("config.toml");
        if !config.exists() {
            fs::write(&config, "").unwrap();
        }
        let config = config.to_string_lossy().into_owned();
        let mut argv = vec!["line-excise", "--config", config.as_str()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_positional_arguments() {
        let cli = Cli::try_parse_from(["line-excise", "notes.txt", "3", "5"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("notes.txt"));
        assert_eq!(cli.start, 3);
        assert_eq!(cli.end, 5);
        assert_eq!(cli.output, None);
        assert_eq!(cli.log_level(), log::LevelFilter::Warn);
    }

    #[rstest]
    #[case(&["line-excise", "notes.txt", "3"])]
    #[case(&["line-excise", "notes.txt", "-1", "5"])]
    #[case(&["line-excise", "notes.txt", "three", "5"])]
    #[case(&["line-excise", "notes.txt", "3", "5", "--lenient", "--strict"])]
    fn test_parse_rejects(#[case] argv: &[&str]) {
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[rstest]
    #[case(&[], None, RangePolicy::Strict)]
    #[case(&[], Some(RangePolicy::Lenient), RangePolicy::Lenient)]
    #[case(&["--strict"], Some(RangePolicy::Lenient), RangePolicy::Strict)]
    #[case(&["--lenient"], None, RangePolicy::Lenient)]
    #[case(&["--lenient"], Some(RangePolicy::Strict), RangePolicy::Lenient)]
    fn test_range_policy_precedence(
        #[case] flags: &[&str],
        #[case] configured: Option<RangePolicy>,
        #[case] expected: RangePolicy,
    ) {
        let mut argv = vec!["line-excise", "f.txt", "1", "2"];
        argv.extend_from_slice(flags);
        let cli = Cli::try_parse_from(argv).unwrap();
        let config = configured.map(|range_policy| Config { range_policy });

        assert_eq!(cli.range_policy(config.as_ref()), expected);
    }

    #[test]
    fn test_verbose_levels() {
        let cli = Cli::try_parse_from(["line-excise", "-vv", "f.txt", "1", "2"]).unwrap();
        assert_eq!(cli.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_run_in_place() {
        let (dir, path) = ten_line_file();
        let cli = parse(&dir, &[path.to_str().unwrap(), "3", "5"]);

        let report = run(&cli).unwrap();

        assert_eq!(report.remaining_lines, 7);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "L1\nL2\nL6\nL7\nL8\nL9\nL10\n"
        );
        assert_eq!(
            format_report(&report),
            format!("Removed 3 lines from {}. Total lines: 7", path.display())
        );
    }

    #[test]
    fn test_run_with_output() {
        let (dir, path) = ten_line_file();
        let output = dir.path().join("out.txt");
        let cli = parse(
            &dir,
            &[path.to_str().unwrap(), "10", "10", "-o", output.to_str().unwrap()],
        );

        let report = run(&cli).unwrap();

        assert_eq!(report.written_to, output);
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 10);
        assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 9);
        assert_eq!(
            format_report(&report),
            format!("Removed 1 line from {}. Total lines: 9", output.display())
        );
    }

    #[test]
    fn test_run_uses_lenient_config() {
        let (dir, path) = ten_line_file();
        fs::write(dir.path().join("config.toml"), "range_policy = \"lenient\"\n").unwrap();
        let cli = parse(&dir, &[path.to_str().unwrap(), "20", "30"]);

        let report = run(&cli).unwrap();

        assert_eq!(report.removed_lines, 0);
    }

    #[test]
    fn test_run_strict_error_mentions_range() {
        let (dir, path) = ten_line_file();
        let cli = parse(&dir, &[path.to_str().unwrap(), "20", "30"]);

        let err = run(&cli).unwrap_err();

        assert!(format!("{err:#}").contains("past the end of a 10-line document"));
        assert!(err.to_string().contains("20-30"));
    }

    #[test]
    fn test_run_missing_config_file_is_error() {
        let (dir, path) = ten_line_file();
        let missing = dir.path().join("nope.toml");
        let cli = Cli::try_parse_from([
            "line-excise",
            "--config",
            missing.to_str().unwrap(),
            path.to_str().unwrap(),
            "1",
            "2",
        ])
        .unwrap();

        assert!(run(&cli).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 10);
    }
}
