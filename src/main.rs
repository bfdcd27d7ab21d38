//! Flit - A small terminal text editor
//! Main entry point

use anyhow::{bail, Context};
use flit::constants::env;
use flit::editor::Editor;
use flit::error::FlitError;
use flit::settings::{create_settings_registry, EditorOptions};
use flit::term::crossterm::CrosstermBackend;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: flit [-s name=value]... [file]";

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    /// `name=value` assignments in the order given
    settings: Vec<String>,
    file: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--set" => {
                let value = args.next().with_context(|| format!("{arg} needs name=value"))?;
                parsed.settings.push(value);
            }
            "-h" | "--help" => parsed.help = true,
            _ if arg.starts_with("--set=") => {
                parsed.settings.push(arg["--set=".len()..].to_string());
            }
            _ if arg.starts_with('-') && arg.len() > 1 => bail!("unknown flag {arg}\n{USAGE}"),
            _ if parsed.file.is_some() => bail!("only one file can be opened\n{USAGE}"),
            _ => parsed.file = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}

fn help_text() -> String {
    format!(
        "{USAGE}\n\noptions (also read from {}, comma separated):\n{}",
        env::OPTIONS,
        create_settings_registry().help()
    )
}

/// Apply the `FLIT_OPTIONS` list, then the command line assignments
fn load_options(args: &Args, env_value: Option<&str>) -> flit::error::Result<EditorOptions> {
    let registry = create_settings_registry();
    let mut options = EditorOptions::default();
    if let Some(list) = env_value {
        registry.apply_list(list, &mut options).map_err(FlitError::from)?;
    }
    for assignment in &args.settings {
        registry.apply(assignment, &mut options).map_err(FlitError::from)?;
    }
    Ok(options)
}

/// Install a file subscriber when `FLIT_LOG` names a log file
///
/// The terminal owns stdout and stderr while the editor runs.
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(env::LOG_FILE) else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", PathBuf::from(&path).display()))?;
    let filter = EnvFilter::try_from_env(env::LOG_LEVEL).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")
}

fn run() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print!("{}", help_text());
        return Ok(());
    }
    init_logging()?;
    let env_options = std::env::var(env::OPTIONS).ok();
    let options = load_options(&args, env_options.as_deref()).context("invalid option")?;
    tracing::info!(file = ?args.file, ?options, "starting flit");

    // Dropping the editor restores the terminal before any error is printed
    let mut editor = Editor::with_file(CrosstermBackend::new(), args.file.as_ref(), options)
        .context("failed to start editor")?;
    editor.run().context("editor error")?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        tracing::error!("{e:#}");
        eprintln!("flit: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
