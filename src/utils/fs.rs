//! IO helper: safe file read for JSON/JSON5 sources

use std::{fs, path::Path};

use serde_json::Value;

use crate::model::data_core::AppError;

/// 读取文件全文（UTF-8）
pub fn read_text_file(p: &Path) -> Result<String, AppError> {
    Ok(fs::read_to_string(p)?)
}

/// 将 JSON5 超集文本解析为内存值（未加引号的键、尾逗号等均可接受）
pub fn parse_document(text: &str) -> Result<Value, AppError> {
    Ok(json5::from_str(text)?)
}

/// 从文件读取并解析 JSON/JSON5 文档
pub fn read_json_file(p: &Path) -> Result<Value, AppError> {
    let text = read_text_file(p)?;
    parse_document(&text)
}
