//! 应用程序状态管理
//!
//! 窗口布局、按键处理，以及把提交的输入交给 REPL

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::repl::{Evaluator, Repl, ReplState};
use crate::tui::components::{InputWindow, OutputConsole};
use crate::tui::host::WindowState;

/// 翻页行数
const PAGE: u16 = 10;

/// 用户动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// 提交一行输入
    Submit(String),
}

/// 应用程序状态
#[derive(Debug)]
pub struct App {
    /// 输入窗口
    input: InputWindow,
    /// 输出控制台，与 WidgetConsole 共享
    surface: Rc<RefCell<OutputConsole>>,
    /// 窗口状态，与 `form` 共享
    window: Rc<RefCell<WindowState>>,
}

impl App {
    /// 创建新的应用
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            input: InputWindow::new(),
            surface: Rc::new(RefCell::new(OutputConsole::new())),
            window: Rc::new(RefCell::new(WindowState::new(title))),
        }
    }

    /// 输出控制台
    pub fn surface(&self) -> &Rc<RefCell<OutputConsole>> {
        &self.surface
    }

    /// 窗口状态
    pub fn window(&self) -> &Rc<RefCell<WindowState>> {
        &self.window
    }

    /// 输入窗口
    pub fn input(&self) -> &InputWindow {
        &self.input
    }

    /// 脚本是否请求关闭
    pub fn close_requested(&self) -> bool {
        self.window.borrow().close_requested
    }

    /// 处理按键事件
    pub fn handle_key_event(
        &mut self,
        key: KeyEvent,
    ) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => Action::Quit,
            KeyCode::Char('c') if ctrl => {
                self.input.clear();
                Action::None
            }
            KeyCode::Char('l') if ctrl => {
                self.surface.borrow_mut().clear();
                Action::None
            }
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => Action::Submit(self.input.take_line()),
            KeyCode::Char(c) => {
                self.input.insert_char(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.input.delete_char();
                Action::None
            }
            KeyCode::Left => {
                self.input.move_cursor_back();
                Action::None
            }
            KeyCode::Right => {
                self.input.move_cursor_forward();
                Action::None
            }
            KeyCode::Home => {
                self.input.move_to_line_start();
                Action::None
            }
            KeyCode::End => {
                self.input.move_to_line_end();
                Action::None
            }
            KeyCode::Up => {
                self.input.history_prev();
                Action::None
            }
            KeyCode::Down => {
                self.input.history_next();
                Action::None
            }
            KeyCode::PageUp => {
                self.surface.borrow_mut().scroll_up(PAGE);
                Action::None
            }
            KeyCode::PageDown => {
                self.surface.borrow_mut().scroll_down(PAGE);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// 执行动作；返回 false 表示应关闭窗口
    pub fn apply<E: Evaluator>(
        &mut self,
        action: Action,
        repl: &mut Repl<E>,
    ) -> bool {
        match action {
            Action::None => {}
            Action::Quit => return false,
            Action::Submit(line) => {
                // 回显到提示符之后
                self.surface.borrow_mut().append(&format!("{}\n", line));
                repl.submit(&line);
            }
        }
        repl.state() != ReplState::Terminated && !self.close_requested()
    }

    /// 渲染应用
    pub fn render(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // 标题栏
                Constraint::Min(3),    // 输出
                Constraint::Length(3), // 输入
            ])
            .split(area);

        self.render_title_bar(f, chunks[0]);
        self.surface.borrow().render(f, chunks[1], "Output");
        self.input.render(f, chunks[2]);
    }

    /// 渲染标题栏
    fn render_title_bar(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
    ) {
        let window = self.window.borrow();
        let mut spans = vec![Span::styled(
            format!(" {} ", window.title),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )];
        if !window.status.is_empty() {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                window.status.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            "  Enter: run  Esc: close  PgUp/PgDn: scroll",
            Style::default().fg(Color::DarkGray),
        ));

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
