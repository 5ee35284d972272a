/// 输出控制台组件
///
/// 窗口中的输出文本控件，REPL 的所有输出都追加到这里
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// 输出控制台
#[derive(Debug)]
pub struct OutputConsole {
    /// 文本行；最后一行是尚未换行的部分
    lines: Vec<String>,
    /// 最大行数
    max_lines: usize,
    /// 距离底部的滚动偏移
    scroll_back: u16,
}

impl OutputConsole {
    /// 创建新的输出控制台
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            max_lines: 1000,
            scroll_back: 0,
        }
    }

    /// 追加文本，`\n` 开始新的一行
    pub fn append(
        &mut self,
        text: &str,
    ) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            if let Some(last) = self.lines.last_mut() {
                last.push_str(first);
            }
        }
        for part in parts {
            self.lines.push(part.to_string());
        }
        self.trim_lines();
        self.scroll_back = 0;
    }

    /// 清空输出
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.scroll_back = 0;
    }

    /// 全部文本
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// 行数（包括未结束的最后一行）
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 向上滚动
    pub fn scroll_up(
        &mut self,
        amount: u16,
    ) {
        let max = self.lines.len().saturating_sub(1) as u16;
        self.scroll_back = self.scroll_back.saturating_add(amount).min(max);
    }

    /// 向下滚动
    pub fn scroll_down(
        &mut self,
        amount: u16,
    ) {
        self.scroll_back = self.scroll_back.saturating_sub(amount);
    }

    /// 修剪行
    fn trim_lines(&mut self) {
        if self.lines.len() > self.max_lines {
            self.lines.drain(0..self.lines.len() - self.max_lines);
        }
    }

    /// 渲染输出控制台
    pub fn render(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        title: &str,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .title(format!(" {} ", title));

        let visible = area.height.saturating_sub(2) as usize;
        let bottom = self.lines.len().saturating_sub(self.scroll_back as usize);
        let top = bottom.saturating_sub(visible);
        let content = self.lines[top..bottom].join("\n");

        let paragraph = Paragraph::new(content)
            .block(block)
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, area);
    }
}

impl Default for OutputConsole {
    fn default() -> Self {
        Self::new()
    }
}
