// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use flexdesk_app::{AppState, PageKind, TableView};
use flexdesk_data::{Dataset, JsonFileSource, RecordSource};
use runtime::DataRuntime;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `flexdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let source = JsonFileSource::new(
        options.listings_path.clone().or_else(|| config.listings_path()),
        options.assets_path.clone().or_else(|| config.assets_path()),
    );

    if options.check_only {
        let dataset = Dataset::load(&source)
            .with_context(|| format!("load records from {}", source.name()))?;
        TableView::new("dashboard", dataset.assets, config.dashboard_page_size())?;
        TableView::new("marketplace", dataset.listings, config.marketplace_page_size())?;
        println!("ok: {}", source.name());
        return Ok(());
    }

    let log_file = config.log_file()?;
    logging::init(config.log_level(), &log_file)
        .with_context(|| format!("start logging to {}", log_file.display()))?;
    info!(
        config = %options.config_path.display(),
        source = %source.name(),
        "flexdesk starting"
    );

    let start = options.start_page.unwrap_or_else(|| config.start_page());
    let mut state = AppState::new(start);
    let mut runtime = DataRuntime::new(
        source,
        config.dashboard_page_size(),
        config.marketplace_page_size(),
    );
    flexdesk_tui::run_app(&mut state, &mut runtime)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    listings_path: Option<PathBuf>,
    assets_path: Option<PathBuf>,
    start_page: Option<PageKind>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        listings_path: None,
        assets_path: None,
        start_page: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--listings" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--listings requires a JSON file path"))?;
                options.listings_path = Some(PathBuf::from(value.as_ref()));
            }
            "--assets" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--assets requires a JSON file path"))?;
                options.assets_path = Some(PathBuf::from(value.as_ref()));
            }
            "--page" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--page requires a page name"))?;
                let page = PageKind::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown page {:?}; use dashboard, marketplace, or delivery-details",
                        value.as_ref()
                    )
                })?;
                options.start_page = Some(page);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("flexdesk: delivery marketplace admin console");
    println!("  --config <path>          Use a specific config path");
    println!("  --listings <path>        Load marketplace listings from a JSON file");
    println!("  --assets <path>          Load dashboard assets from a JSON file");
    println!("  --page <name>            Start on dashboard, marketplace, or delivery-details");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and data, then exit");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use flexdesk_app::PageKind;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/flexdesk-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                listings_path: None,
                assets_path: None,
                start_page: None,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_data_paths_and_page() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--listings",
                "/data/listings.json",
                "--assets",
                "/data/assets.json",
                "--page",
                "marketplace",
            ],
            default_options_path(),
        )?;
        assert_eq!(
            options.listings_path,
            Some(PathBuf::from("/data/listings.json"))
        );
        assert_eq!(options.assets_path, Some(PathBuf::from("/data/assets.json")));
        assert_eq!(options.start_page, Some(PageKind::Marketplace));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (flag, expected) in [
            ("--config", "--config requires a file path"),
            ("--listings", "--listings requires a JSON file path"),
            ("--page", "--page requires a page name"),
        ] {
            let error = parse_cli_args(vec![flag], default_options_path())
                .expect_err("missing value should fail");
            assert!(error.to_string().contains(expected));
        }
    }

    #[test]
    fn parse_cli_args_rejects_unknown_page() {
        let error = parse_cli_args(vec!["--page", "disputes"], default_options_path())
            .expect_err("unknown page should fail");
        assert!(error.to_string().contains("unknown page \"disputes\""));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
