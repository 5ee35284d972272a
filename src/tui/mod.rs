//! 窗口模式
//!
//! 基于 ratatui 的窗口控制台：输出文本控件、输入框、标题栏。
//! 输入通过事件回调交给 [`Repl::submit`]，输出经 [`WidgetConsole`] 写入文本控件。

pub mod app;
pub mod components;
pub mod host;
#[allow(clippy::module_inception)]
pub mod tui;

use std::rc::Rc;

pub use app::{Action, App};
pub use host::{FormHandle, TextHandle, WindowState};
pub use tui::TuiRepl;

use crate::console::{SharedConsole, WidgetConsole};
use crate::repl::{Evaluator, Interpreter, Prompts, Repl};
use crate::tlog;
use crate::util::config::ReplConfig;
use crate::util::i18n::MSG;

/// 创建窗口会话：应用状态，以及绑定了 `form` 和 `text` 的 REPL
pub fn session<E: Evaluator>(
    engine: E,
    config: &ReplConfig,
    title: &str,
) -> (App, Repl<E>) {
    tlog!(debug, MSG::ConsoleWidget);
    let app = App::new(title);
    let console: SharedConsole = Rc::new(WidgetConsole::new(app.surface().clone()));

    let mut interpreter =
        Interpreter::with_exit_commands(console.clone(), engine, config.exit_commands.clone());
    interpreter.bind(
        "form",
        Rc::new(FormHandle::new(app.window().clone(), app.surface().clone())),
    );
    interpreter.bind("text", Rc::new(TextHandle::new(app.surface().clone())));

    let repl = Repl::new(console, interpreter, Prompts::widget(config));
    (app, repl)
}
