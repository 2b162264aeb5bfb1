// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod render;
mod shell;

use anyhow::{Context, Result};
use config::Config;
use shell::{Collections, Shell};
use std::env;
use std::io;
use std::path::PathBuf;
use storefront_api::ShopApi;
use storefront_api::demo::DemoShop;
use storefront_app::{Budget, Note, Order, Product, ScreenContext};
use time::OffsetDateTime;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STOREFRONT_LOG";

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

    init_tracing();

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `storefront --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let (collections, source) = if options.demo {
        let shop = DemoShop::seeded();
        let collections = Collections {
            products: Box::new(shop.products),
            notes: Box::new(shop.notes),
            budgets: Box::new(shop.budgets),
            orders: Box::new(shop.orders),
        };
        (collections, "demo data (in memory)".to_owned())
    } else {
        let base_url = config.api_base_url()?;
        let api = ShopApi::new(&base_url, config.api_timeout()?).with_context(|| {
            format!(
                "invalid [api] config in {}; fix base_url/timeout values",
                options.config_path.display()
            )
        })?;
        let collections = Collections {
            products: Box::new(api.collection::<Product>()),
            notes: Box::new(api.collection::<Note>()),
            budgets: Box::new(api.collection::<Budget>()),
            orders: Box::new(api.collection::<Order>()),
        };
        (collections, api.base_url().to_owned())
    };
    info!(%source, demo = options.demo, "collections ready");
    if options.check_only {
        return Ok(());
    }

    let context = ScreenContext {
        user: config.user().map(str::to_owned),
        theme: config.theme(),
    };
    let today = OffsetDateTime::now_utc().date();
    let mut shell = Shell::new(
        collections,
        context,
        source,
        config.dashboard_options(),
        today,
    );
    shell::run_shell(
        &mut shell,
        config.default_tab(),
        io::stdin().lock(),
        io::stdout().lock(),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    demo: bool,
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
        print_config_path: false,
        demo: false,
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
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("storefront: shop back-office shell");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Use seeded in-memory collections instead of the API");
    println!("  --check                  Validate config and API settings, then exit");
    println!("  --help                   Show this help");
    println!();
    println!("Commands are read from stdin; type `help` at the prompt.");
    println!("Set {LOG_ENV}=debug to log requests to stderr.");
}
