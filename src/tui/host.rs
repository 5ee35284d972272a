//! 宿主对象
//!
//! 窗口模式下绑定给脚本的两个对象：`form`（窗口本身）和 `text`（输出文本控件）

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::repl::backend_trait::expect_args;
use crate::repl::{HostData, HostError, HostObject};
use crate::tui::components::OutputConsole;

/// 窗口状态，由脚本修改、由界面读取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    /// 标题栏文字
    pub title: String,
    /// 状态栏文字
    pub status: String,
    /// 脚本请求关闭窗口
    pub close_requested: bool,
}

impl WindowState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: String::new(),
            close_requested: false,
        }
    }
}

fn string_arg(
    method: &str,
    args: &[HostData],
) -> Result<String, HostError> {
    expect_args(method, args, 1)?;
    match &args[0] {
        HostData::Str(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

fn unknown(
    type_name: &str,
    method: &str,
) -> HostError {
    HostError::UnknownMethod {
        type_name: type_name.to_string(),
        method: method.to_string(),
    }
}

/// `form`：窗口句柄
#[derive(Debug, Clone)]
pub struct FormHandle {
    window: Rc<RefCell<WindowState>>,
    surface: Rc<RefCell<OutputConsole>>,
}

impl FormHandle {
    pub fn new(
        window: Rc<RefCell<WindowState>>,
        surface: Rc<RefCell<OutputConsole>>,
    ) -> Self {
        Self { window, surface }
    }
}

impl HostObject for FormHandle {
    fn type_name(&self) -> &'static str {
        "Form"
    }

    fn describe(&self) -> String {
        format!("<Form \"{}\">", self.window.borrow().title)
    }

    fn methods(&self) -> &'static [&'static str] {
        &["title", "status", "clear", "close"]
    }

    fn invoke(
        &self,
        method: &str,
        args: &[HostData],
    ) -> Result<HostData, HostError> {
        match method {
            "title" if args.is_empty() => Ok(HostData::Str(self.window.borrow().title.clone())),
            "title" => {
                self.window.borrow_mut().title = string_arg(method, args)?;
                Ok(HostData::Nil)
            }
            "status" => {
                self.window.borrow_mut().status = string_arg(method, args)?;
                Ok(HostData::Nil)
            }
            "clear" => {
                expect_args(method, args, 0)?;
                self.surface.borrow_mut().clear();
                Ok(HostData::Nil)
            }
            "close" => {
                expect_args(method, args, 0)?;
                self.window.borrow_mut().close_requested = true;
                Ok(HostData::Nil)
            }
            _ => Err(unknown(self.type_name(), method)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `text`：输出文本控件句柄
#[derive(Debug, Clone)]
pub struct TextHandle {
    surface: Rc<RefCell<OutputConsole>>,
}

impl TextHandle {
    pub fn new(surface: Rc<RefCell<OutputConsole>>) -> Self {
        Self { surface }
    }
}

impl HostObject for TextHandle {
    fn type_name(&self) -> &'static str {
        "TextBox"
    }

    fn methods(&self) -> &'static [&'static str] {
        &["append", "clear", "lines"]
    }

    fn invoke(
        &self,
        method: &str,
        args: &[HostData],
    ) -> Result<HostData, HostError> {
        match method {
            "append" => {
                let text = string_arg(method, args)?;
                self.surface.borrow_mut().append(&text);
                Ok(HostData::Nil)
            }
            "clear" => {
                expect_args(method, args, 0)?;
                self.surface.borrow_mut().clear();
                Ok(HostData::Nil)
            }
            "lines" => {
                expect_args(method, args, 0)?;
                Ok(HostData::Int(self.surface.borrow().line_count() as i64))
            }
            _ => Err(unknown(self.type_name(), method)),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
