//! Command-line front end
//!
//! ```text
//! pcxkit <config.json>   decode and filter as described by the config
//! pcxkit --list          print the filter catalog
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for per-file detail.

use clap::Parser;
use pcxkit::filter::FilterCatalog;
use pcxkit::{Error, load_config, run};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pcxkit", version, about = "Decode PCX images and run spatial filters")]
struct Args {
    /// JSON run configuration
    #[arg(required_unless_present = "list")]
    config: Option<PathBuf>,

    /// Print the filter catalog and exit
    #[arg(long, conflicts_with = "config")]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = try_main(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn try_main(args: Args) -> Result<(), Error> {
    if args.list {
        print_catalog();
        return Ok(());
    }
    let path = args
        .config
        .ok_or_else(|| Error::Usage("a config path is required".to_string()))?;

    let config = load_config(&path)?;
    let report = run(&config)?;
    for path in &report.outputs {
        println!("{}", path.display());
    }
    Ok(())
}

fn print_catalog() {
    for spec in FilterCatalog::standard().iter() {
        println!("{:<10} {:<24} {}", spec.key, spec.name, spec.description);
        for param in spec.params {
            match param.default {
                Some(default) => println!("{:<12}{} (default {default})", "", param.name),
                None => println!("{:<12}{} (required)", "", param.name),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_config_or_list() {
        let args = Args::try_parse_from(["pcxkit", "run.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("run.json")));
        assert!(!args.list);

        let args = Args::try_parse_from(["pcxkit", "--list"]).unwrap();
        assert!(args.list);
        assert!(args.config.is_none());

        assert!(Args::try_parse_from(["pcxkit"]).is_err());
        assert!(Args::try_parse_from(["pcxkit", "--list", "run.json"]).is_err());
        assert!(Args::try_parse_from(["pcxkit", "a.json", "b.json"]).is_err());
    }
}
