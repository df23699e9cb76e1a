//! Clipboard  cross-platform clipboard helpers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Clip(String),
}

/// 剪贴板能力接口：以注入方式传给控制逻辑，便于脱离桌面环境测试
pub trait ClipboardAccess {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 系统剪贴板（copypasta 实现）
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_clipboard(text)
    }
}

/// 将文本复制到系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| ClipboardError::Clip(e.to_string()))
}

/// 录制写入内容的测试桩
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub written: Vec<String>,
}

#[cfg(test)]
impl ClipboardAccess for RecordingClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.written.push(text.to_string());
        Ok(())
    }
}

/// 写入总是失败的测试桩（模拟剪贴板不可用）
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FailingClipboard;

#[cfg(test)]
impl ClipboardAccess for FailingClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Clip("剪贴板不可用".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_clipboard_captures_writes() {
        let mut clipboard = RecordingClipboard::default();
        clipboard.write_text("第一段").expect("写入应该成功");
        clipboard.write_text("第二段").expect("写入应该成功");
        assert_eq!(clipboard.written, vec!["第一段", "第二段"]);
    }
}
