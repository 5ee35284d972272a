//! TUI 主框架
//!
//! crossterm 事件循环驱动 [`Repl`]：每次回车是一次处理步骤

use std::io::{self, IsTerminal};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::repl::{Evaluator, Repl};
use crate::tlog;
use crate::tui::app::App;
use crate::util::i18n::MSG;
use crate::{ReplError, Result};

/// 窗口模式 REPL
pub struct TuiRepl<E: Evaluator> {
    /// 终端实例
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    /// 应用程序状态
    app: App,
    /// REPL 驱动
    repl: Repl<E>,
    /// 终端是否已恢复
    restored: bool,
}

impl<E: Evaluator> TuiRepl<E> {
    /// 进入备用屏幕并创建窗口
    pub fn new(
        app: App,
        repl: Repl<E>,
    ) -> Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(ReplError::Terminal("standard output is not a terminal".into()));
        }
        enable_raw_mode()?;
        let terminal = Self::enter_screen().inspect_err(|_| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        Ok(Self {
            terminal,
            app,
            repl,
            restored: false,
        })
    }

    /// 进入备用屏幕并创建终端
    fn enter_screen() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        Ok(Terminal::new(CrosstermBackend::new(stdout))?)
    }

    /// 运行直到窗口关闭或会话结束
    pub fn run(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(250);
        tlog!(info, MSG::TuiStart);
        self.repl.start();

        loop {
            self.terminal.draw(|f| {
                let area = f.area();
                self.app.render(f, area);
            })?;

            if !event::poll(tick_rate)? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = self.app.handle_key_event(key);
                if !self.app.apply(action, &mut self.repl) {
                    break;
                }
            }
        }

        tlog!(info, MSG::TuiClosed);
        self.restore()
    }

    /// 恢复终端
    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<E: Evaluator> Drop for TuiRepl<E> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
