//! Parsing Options.
//! `--config {file}` or `-c`, `--output {file}` or `-o`, `--max-rounds {n}`, `--keep-history`

use clap::{Arg, ArgAction, Command};
use std::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub config: PathBuf,
    /// Where to write the JSON run report, if anywhere.
    pub output: Option<PathBuf>,
    pub max_rounds: Option<usize>,
    pub keep_history: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: PathBuf::from("pnflow.toml"),
            output: None,
            max_rounds: None,
            keep_history: false,
        }
    }
}

fn make_options_parser() -> clap::Command {
    Command::new("pn-checkout")
        .no_binary_name(true)
        .version("v0.1.0")
        .about("Runs the checkout workflow on the Petri net engine")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("TOML configuration file; defaults are used when it does not exist")
                .default_value("pnflow.toml"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path to file where the JSON run report will be stored"),
        )
        .arg(
            Arg::new("max-rounds")
                .long("max-rounds")
                .value_name("N")
                .help("Upper bound on firing rounds, overrides the configuration")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("keep-history")
                .long("keep-history")
                .help("Record the final reset in the history instead of clearing it")
                .action(ArgAction::SetTrue),
        )
}

impl Options {
    pub fn parse_from_str(s: &str) -> Result<Self, Box<dyn Error>> {
        let args = s.split_whitespace().collect::<Vec<_>>();
        Self::parse_from_args(&args)
    }

    pub fn parse_from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, Box<dyn Error>> {
        let matches = make_options_parser()
            .try_get_matches_from(args.iter().map(|arg| arg.as_ref()))?;

        let config = matches
            .get_one::<String>("config")
            .map(PathBuf::from)
            .unwrap_or_else(|| Options::default().config);
        let output = matches.get_one::<String>("output").map(PathBuf::from);
        let max_rounds = matches.get_one::<usize>("max-rounds").copied();
        if max_rounds == Some(0) {
            return Err("max-rounds must be at least 1".into());
        }
        let keep_history = matches.get_flag("keep-history");

        Ok(Options {
            config,
            output,
            max_rounds,
            keep_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let options = Options::parse_from_str("").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn test_parse_from_str() {
        let options =
            Options::parse_from_str("-c shop.toml -o report.json --max-rounds 4 --keep-history")
                .unwrap();
        assert_eq!(options.config, PathBuf::from("shop.toml"));
        assert_eq!(options.output, Some(PathBuf::from("report.json")));
        assert_eq!(options.max_rounds, Some(4));
        assert!(options.keep_history);
    }

    #[test]
    fn test_parse_from_str_err() {
        assert!(Options::parse_from_str("--max-rounds many").is_err());
        assert!(Options::parse_from_str("--max-rounds 0").is_err());
        assert!(Options::parse_from_str("--unknown").is_err());
    }

    #[test]
    fn test_parse_from_args() {
        let options =
            Options::parse_from_args(&["--output".to_owned(), "out.json".to_owned()]).unwrap();
        assert_eq!(options.output, Some(PathBuf::from("out.json")));
        assert_eq!(options.max_rounds, None);
    }
}
