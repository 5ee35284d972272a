/// 输入窗口组件
///
/// 单行输入框，回车时把整行交给 REPL，支持历史回溯
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// 输入窗口
#[derive(Debug, Default)]
pub struct InputWindow {
    /// 输入缓冲区
    buffer: String,
    /// 光标位置（字符索引）
    cursor_pos: usize,
    /// 已提交的输入
    history: Vec<String>,
    /// 历史浏览位置
    history_pos: Option<usize>,
}

impl InputWindow {
    /// 创建新的输入窗口
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取输入缓冲区
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// 光标位置
    pub fn cursor(&self) -> usize {
        self.cursor_pos
    }

    /// 取出当前行并记入历史
    pub fn take_line(&mut self) -> String {
        let line = std::mem::take(&mut self.buffer);
        if !line.trim().is_empty() && self.history.last() != Some(&line) {
            self.history.push(line.clone());
        }
        self.cursor_pos = 0;
        self.history_pos = None;
        line
    }

    /// 清空缓冲区
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor_pos = 0;
        self.history_pos = None;
    }

    /// 插入字符
    pub fn insert_char(
        &mut self,
        ch: char,
    ) {
        let at = self.byte_index(self.cursor_pos);
        self.buffer.insert(at, ch);
        self.cursor_pos += 1;
    }

    /// 删除字符（光标前）
    pub fn delete_char(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_index(self.cursor_pos);
            self.buffer.remove(at);
        }
    }

    /// 向前移动光标
    pub fn move_cursor_forward(&mut self) {
        if self.cursor_pos < self.buffer.chars().count() {
            self.cursor_pos += 1;
        }
    }

    /// 向后移动光标
    pub fn move_cursor_back(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    /// 移动到行首
    pub fn move_to_line_start(&mut self) {
        self.cursor_pos = 0;
    }

    /// 移动到行尾
    pub fn move_to_line_end(&mut self) {
        self.cursor_pos = self.buffer.chars().count();
    }

    /// 上一条历史
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            Some(0) => 0,
            Some(p) => p - 1,
            None => self.history.len() - 1,
        };
        self.recall(pos);
    }

    /// 下一条历史
    pub fn history_next(&mut self) {
        match self.history_pos {
            Some(p) if p + 1 < self.history.len() => self.recall(p + 1),
            Some(_) => self.clear(),
            None => {}
        }
    }

    fn recall(
        &mut self,
        pos: usize,
    ) {
        self.history_pos = Some(pos);
        self.buffer = self.history[pos].clone();
        self.move_to_line_end();
    }

    fn byte_index(
        &self,
        char_pos: usize,
    ) -> usize {
        self.buffer
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    /// 渲染输入窗口
    pub fn render(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .title(" Input ");

        let paragraph = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, area);
        f.set_cursor_position(Position::new(
            area.x + 1 + self.cursor_pos as u16,
            area.y + 1,
        ));
    }
}
