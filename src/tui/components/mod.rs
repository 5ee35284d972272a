/// UI 组件模块
///
/// 窗口控制台的界面组件
pub mod input_window;
pub mod output_console;

pub use input_window::InputWindow;
pub use output_console::OutputConsole;
