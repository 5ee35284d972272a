//! Message catalogue for Ripple
//!
//! Every log line and every host-generated console message goes through a [`MSG`] id.
//! English templates are built in; `locales/<lang>.json` can override any key.
//!
//! # Language selection
//!
//! Priority (high → low):
//! 1. CLI argument (`--lang`), applied with [`set_lang`]
//! 2. Environment variable (`RIPPLE_LANG`)
//! 3. User-level config (`[i18n] lang`)
//! 4. `en`
//!
//! # Usage
//!
//! ```rust
//! use ripple::util::i18n::{t, MSG};
//!
//! let text = t(MSG::IncludeMissing, "en", Some(&[&"init.rpl"]));
//! assert!(text.contains("init.rpl"));
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use once_cell::sync::Lazy;

/// Language chosen at startup
static CURRENT_LANG: OnceLock<String> = OnceLock::new();

/// Translation table loaded from JSON
type TranslationMap = HashMap<String, String>;

/// Locale overrides found in `locales/`, keyed by language code
static TRANSLATIONS: Lazy<HashMap<String, TranslationMap>> = Lazy::new(|| {
    let mut map = HashMap::new();

    let locales_dir = std::path::Path::new("locales");
    if let Ok(entries) = std::fs::read_dir(locales_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(file_stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        match serde_json::from_str::<TranslationMap>(&content) {
                            Ok(translations) => {
                                map.insert(file_stem.to_string(), translations);
                            }
                            Err(e) => eprintln!(
                                "Warning: Failed to parse {} translation file: {}",
                                file_stem, e
                            ),
                        }
                    }
                }
            }
        }
    }

    map
});

/// Get all language codes with a locale file, plus the built-in `en`
pub fn available_langs() -> Vec<&'static str> {
    let mut langs: Vec<&'static str> = TRANSLATIONS.keys().map(|s| s.as_str()).collect();
    if !langs.contains(&"en") {
        langs.push("en");
    }
    langs.sort_unstable();
    langs
}

/// Fix the language for the rest of the process. Later calls are ignored.
pub fn set_lang(lang: &str) {
    let _ = CURRENT_LANG.set(lang.to_string());
}

/// Current language
/// Priority: set_lang > RIPPLE_LANG env > en
pub fn current_lang() -> String {
    if let Some(lang) = CURRENT_LANG.get() {
        return lang.clone();
    }
    std::env::var("RIPPLE_LANG").unwrap_or_else(|_| "en".to_string())
}

/// Get translation for a message ID
pub fn t(
    id: MSG,
    lang: &str,
    args: Option<&[&dyn std::fmt::Display]>,
) -> String {
    let template = TRANSLATIONS
        .get(lang)
        .and_then(|translations| translations.get(id.key()))
        .map(|s| s.as_str())
        .unwrap_or_else(|| id.default_text());

    match args {
        Some(args) => {
            let mut result = template.to_string();
            for (i, arg) in args.iter().enumerate() {
                result = result.replace(&format!("{{{}}}", i), &arg.to_string());
            }
            result
        }
        None => template.to_string(),
    }
}

/// Translation in the current language
#[inline]
pub fn t_cur(
    id: MSG,
    args: Option<&[&dyn std::fmt::Display]>,
) -> String {
    t(id, &current_lang(), args)
}

/// Translation in the current language without args
#[inline]
pub fn t_cur_simple(id: MSG) -> String {
    t_cur(id, None)
}

/// Macro for translated logging with arguments (using current language)
#[macro_export]
macro_rules! tlog {
    (debug, $id:expr) => {
        tracing::debug!("{}", $crate::util::i18n::t_cur_simple($id));
    };
    (info, $id:expr) => {
        tracing::info!("{}", $crate::util::i18n::t_cur_simple($id));
    };
    (warn, $id:expr) => {
        tracing::warn!("{}", $crate::util::i18n::t_cur_simple($id));
    };
    (error, $id:expr) => {
        tracing::error!("{}", $crate::util::i18n::t_cur_simple($id));
    };
    (debug, $id:expr, $($arg:expr),+) => {
        tracing::debug!("{}", $crate::util::i18n::t_cur($id, Some(&[$($arg as &dyn std::fmt::Display),+])));
    };
    (info, $id:expr, $($arg:expr),+) => {
        tracing::info!("{}", $crate::util::i18n::t_cur($id, Some(&[$($arg as &dyn std::fmt::Display),+])));
    };
    (warn, $id:expr, $($arg:expr),+) => {
        tracing::warn!("{}", $crate::util::i18n::t_cur($id, Some(&[$($arg as &dyn std::fmt::Display),+])));
    };
    (error, $id:expr, $($arg:expr),+) => {
        tracing::error!("{}", $crate::util::i18n::t_cur($id, Some(&[$($arg as &dyn std::fmt::Display),+])));
    };
}

/// Message IDs for logs and host-generated console text
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MSG {
    // Startup
    Caption,
    ConfigLoaded,
    ConfigFallback,
    ConsoleStream,
    ConsoleEditor,
    ConsoleWidget,

    // Definitions file
    IncludeLoading,
    IncludeLoaded,
    IncludeMissing,
    IncludeUnreadable,
    IncludeUnterminated,

    // Session
    ReplLineReceived,
    ReplChunkComplete,
    ReplChunkPending,
    ReplExitDirective,
    ReplEndOfInput,
    ReplBind,
    ReplTerminated,

    // Meta commands
    ReplHelp,
    ReplCleared,
    ReplReset,
    ReplNoBindings,
    ReplNoSymbols,
    ReplStats,
    ReplUnknownCommand,

    // Script engine
    EngineScriptError,

    // Console
    ConsoleReadFailed,
    ConsoleWriteFailed,
    HistoryLoadFailed,
    HistorySaveFailed,

    // TUI
    TuiStart,
    TuiClosed,
}

impl MSG {
    /// Get the JSON key for this message ID
    pub fn key(&self) -> &'static str {
        match self {
            MSG::Caption => "caption",
            MSG::ConfigLoaded => "config_loaded",
            MSG::ConfigFallback => "config_fallback",
            MSG::ConsoleStream => "console_stream",
            MSG::ConsoleEditor => "console_editor",
            MSG::ConsoleWidget => "console_widget",
            MSG::IncludeLoading => "include_loading",
            MSG::IncludeLoaded => "include_loaded",
            MSG::IncludeMissing => "include_missing",
            MSG::IncludeUnreadable => "include_unreadable",
            MSG::IncludeUnterminated => "include_unterminated",
            MSG::ReplLineReceived => "repl_line_received",
            MSG::ReplChunkComplete => "repl_chunk_complete",
            MSG::ReplChunkPending => "repl_chunk_pending",
            MSG::ReplExitDirective => "repl_exit_directive",
            MSG::ReplEndOfInput => "repl_end_of_input",
            MSG::ReplBind => "repl_bind",
            MSG::ReplTerminated => "repl_terminated",
            MSG::ReplHelp => "repl_help",
            MSG::ReplCleared => "repl_cleared",
            MSG::ReplReset => "repl_reset",
            MSG::ReplNoBindings => "repl_no_bindings",
            MSG::ReplNoSymbols => "repl_no_symbols",
            MSG::ReplStats => "repl_stats",
            MSG::ReplUnknownCommand => "repl_unknown_command",
            MSG::EngineScriptError => "engine_script_error",
            MSG::ConsoleReadFailed => "console_read_failed",
            MSG::ConsoleWriteFailed => "console_write_failed",
            MSG::HistoryLoadFailed => "history_load_failed",
            MSG::HistorySaveFailed => "history_save_failed",
            MSG::TuiStart => "tui_start",
            MSG::TuiClosed => "tui_closed",
        }
    }

    /// Built-in English template; `{0}`, `{1}` are positional arguments
    pub fn default_text(&self) -> &'static str {
        match self {
            MSG::Caption => "Ripple interactive shell v{0}",
            MSG::ConfigLoaded => "config loaded from {0}",
            MSG::ConfigFallback => "config unusable, using defaults: {0}",
            MSG::ConsoleStream => "using stream console",
            MSG::ConsoleEditor => "using line editor console",
            MSG::ConsoleWidget => "using windowed console",
            MSG::IncludeLoading => "loading definitions from {0}",
            MSG::IncludeLoaded => "loaded {0} lines from {1}",
            MSG::IncludeMissing => "definitions file {0} not found",
            MSG::IncludeUnreadable => "cannot read definitions file {0}: {1}",
            MSG::IncludeUnterminated => "unterminated block at end of {0} discarded",
            MSG::ReplLineReceived => "line received at depth {0}: {1}",
            MSG::ReplChunkComplete => "chunk complete ({0} bytes), executing",
            MSG::ReplChunkPending => "chunk still open at depth {0}",
            MSG::ReplExitDirective => "exit directive received",
            MSG::ReplEndOfInput => "end of input",
            MSG::ReplBind => "bound host value {0}: {1}",
            MSG::ReplTerminated => "session terminated",
            MSG::ReplHelp => {
                "Commands:\n  :help        show this help\n  :clear       discard the pending block\n  :bindings    list host bindings\n  :vars        list defined names\n  :stats       show session statistics\n  :reset       clear the evaluation environment\n  exit, quit   leave the shell\n"
            }
            MSG::ReplCleared => "pending input discarded",
            MSG::ReplReset => "environment cleared",
            MSG::ReplNoBindings => "no host bindings",
            MSG::ReplNoSymbols => "nothing defined",
            MSG::ReplStats => "statements executed: {0}, lines read: {1}",
            MSG::ReplUnknownCommand => "unknown command: {0} (try :help)",
            MSG::EngineScriptError => "script error: {0}",
            MSG::ConsoleReadFailed => "console read failed: {0}",
            MSG::ConsoleWriteFailed => "console write failed: {0}",
            MSG::HistoryLoadFailed => "cannot load history {0}: {1}",
            MSG::HistorySaveFailed => "cannot save history {0}: {1}",
            MSG::TuiStart => "windowed console started",
            MSG::TuiClosed => "window closed",
        }
    }
}

#[cfg(test)]
mod tests;
