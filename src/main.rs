//! Ripple interactive shell - CLI

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use ripple::console::{EditorConsole, SharedConsole, StdioConsole};
use ripple::engine::ScriptEngine;
use ripple::repl::{Evaluator, Interpreter, Prompts, Repl};
use ripple::tlog;
use ripple::tui::{self, TuiRepl};
use ripple::util::config::{get_config_path, load_user_config, save_user_config, UserConfig};
use ripple::util::i18n::{set_lang, t_cur, MSG};
use ripple::util::logger;
use ripple::{caption, NAME, VERSION};

/// Interactive read-eval-print shell
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    /// Definitions file run before the first prompt
    #[arg(value_name = "DEFS")]
    defs: Option<PathBuf>,

    /// Open the windowed console
    #[arg(long)]
    tui: bool,

    /// Read plain lines even on a terminal
    #[arg(long)]
    no_edit: bool,

    /// Message language (e.g. en, zh)
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Write the effective configuration to the user config file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Log lines on stderr would tear the alternate screen
    if !args.tui || args.verbose {
        logger::init_cli(args.verbose);
    }

    let config = load_config();
    select_lang(&args, &config);

    if args.init_config {
        save_user_config(&config).context("Failed to write configuration")?;
        if let Some(path) = get_config_path() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let engine = ScriptEngine::new();
    if args.tui {
        run_tui(engine, &config, args.defs.as_deref())
    } else {
        run_stream(engine, &config, args.defs.as_deref(), args.no_edit)
    }
}

/// User config, or defaults when it cannot be used
fn load_config() -> UserConfig {
    match load_user_config() {
        Ok(config) => {
            if let Some(path) = get_config_path().filter(|p| p.exists()) {
                tlog!(debug, MSG::ConfigLoaded, &path.display());
            }
            config
        }
        Err(e) => {
            tlog!(warn, MSG::ConfigFallback, &e);
            UserConfig::default()
        }
    }
}

/// CLI > `RIPPLE_LANG` > config
fn select_lang(
    args: &Args,
    config: &UserConfig,
) {
    if let Some(ref lang) = args.lang {
        set_lang(lang);
    } else if std::env::var_os("RIPPLE_LANG").is_none() {
        set_lang(&config.i18n.lang);
    }
}

fn run_stream<E: Evaluator>(
    engine: E,
    config: &UserConfig,
    defs: Option<&Path>,
    no_edit: bool,
) -> Result<()> {
    let console: SharedConsole =
        if config.repl.line_editing && !no_edit && io::stdin().is_terminal() {
            Rc::new(EditorConsole::new(&config.repl).context("Failed to start line editor")?)
        } else {
            tlog!(debug, MSG::ConsoleStream);
            Rc::new(StdioConsole::stdio())
        };

    let interpreter = Interpreter::with_exit_commands(
        console.clone(),
        engine,
        config.repl.exit_commands.clone(),
    );
    let mut repl = Repl::new(console, interpreter, Prompts::stream(&config.repl))
        .with_caption(styled_caption());

    load_definitions(&mut repl, config, defs);
    repl.run();
    Ok(())
}

fn run_tui<E: Evaluator>(
    engine: E,
    config: &UserConfig,
    defs: Option<&Path>,
) -> Result<()> {
    let (app, repl) = tui::session(engine, &config.repl, NAME);
    let mut repl = repl.with_caption(caption());

    load_definitions(&mut repl, config, defs);

    let mut window = TuiRepl::new(app, repl).context("Failed to set up the terminal")?;
    window.run().context("Terminal error")?;
    Ok(())
}

/// Explicit file, then the configured one, then the engine default.
///
/// Only the default may be absent without a notice.
fn load_definitions<E: Evaluator>(
    repl: &mut Repl<E>,
    config: &UserConfig,
    defs: Option<&Path>,
) {
    let interpreter = repl.interpreter_mut();
    let explicit = defs
        .map(Path::to_path_buf)
        .or_else(|| config.repl.init_file.clone());

    match explicit {
        Some(path) if !path.exists() => {
            let message = t_cur(MSG::IncludeMissing, Some(&[&path.display()]));
            interpreter.console().writeln(&message);
        }
        Some(path) => interpreter.read_include_file(&path),
        None => {
            let path = interpreter.default_include_file();
            interpreter.read_include_file(&path);
        }
    }
}

fn styled_caption() -> String {
    let text = caption();
    if io::stdout().is_terminal() {
        text.bold().to_string()
    } else {
        text
    }
}
