//! 通用工具：剪贴板、文件IO、来源获取

pub mod clipboard;
pub mod fs;
pub mod net;
