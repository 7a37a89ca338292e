// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

mod host;

use std::cell::Cell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use colored::Colorize;
use conview::{ConsoleView, ViewConfig};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use host::demo::{self, DemoShell};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "conview")]
#[command(about = "Styled console view with prompt and suggestions, hosted in the terminal")]
#[command(version)]
#[command(styles = STYLES, color = clap::ColorChoice::Always)]
struct Args {
    #[arg(short, long, help = "Config file (default: <config dir>/conview/config.toml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Text shown before the input (default: machine:~ user$:)")]
    prompt_info: Option<String>,

    #[arg(long, help = "Always show the newest output, without a scrollbar")]
    no_scrollbar: bool,

    #[arg(long, help = "File with one suggestion per line")]
    suggestions: Option<PathBuf>,

    #[arg(long, default_value_t = Level::INFO, help = "Log level")]
    level: Level,

    #[arg(long, help = "Log file (default: conview.log in the temp dir)")]
    log_file: Option<PathBuf>,
}

fn fail(context: &str, detail: impl std::fmt::Display) -> ! {
    eprintln!("{} {}: {}", "error:".red().bold(), context, detail);
    std::process::exit(1);
}

fn init_logging(level: Level, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;

    let mut subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    if [Level::DEBUG, Level::TRACE].contains(&level) {
        subscriber = subscriber.with_file(true).with_line_number(true);
    }

    tracing::subscriber::set_global_default(subscriber.finish())
        .map_err(std::io::Error::other)
}

/// Load the config file if there is one. Without a file the view uses
/// metrics that match the terminal grid.
fn load_config(path: Option<PathBuf>) -> ViewConfig {
    let path = path.or_else(ViewConfig::default_path);
    match path {
        Some(path) if path.exists() => match ViewConfig::load(&path) {
            Ok(config) => config,
            Err(err) if err.is_config_content() => {
                fail(&format!("invalid config file {}", path.display()), err)
            }
            Err(err) => fail(&format!("cannot read config file {}", path.display()), err),
        },
        _ => ViewConfig {
            cells: host::terminal_metrics(),
            ..ViewConfig::default()
        },
    }
}

fn load_suggestions(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect(),
        Err(err) => fail(&format!("cannot read suggestions {}", path.display()), err),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("conview.log"));
    if let Err(err) = init_logging(args.level, &log_path) {
        fail(&format!("cannot open log file {}", log_path.display()), err);
    }

    let config = load_config(args.config);
    let suggestions = match &args.suggestions {
        Some(path) => load_suggestions(path),
        None => demo::DEMO_SUGGESTIONS
            .iter()
            .map(|item| item.to_string())
            .collect(),
    };

    let exit = Rc::new(Cell::new(false));
    let mut view = ConsoleView::with_consumer(config, DemoShell::new(Rc::clone(&exit)));
    if !args.no_scrollbar {
        view.attach_scrollbar();
    }
    view.suggestions_mut().add_range(suggestions);
    view.set_prompt_info(args.prompt_info.unwrap_or_else(demo::default_prompt_info));
    demo::greet(&mut view);
    view.set_prompting(true);

    info!(scrollbar = !args.no_scrollbar, "starting");
    host::run(view, exit).await
}
