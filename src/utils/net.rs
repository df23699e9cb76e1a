//! 数据源定位：按 scheme 分发的一次性文本获取

use std::path::Path;

use crate::model::data_core::AppError;
use crate::utils::fs::read_text_file;

/// 判断定位串是否为受支持的来源（http/https/file 或本地路径）
pub fn is_supported_locator(locator: &str) -> bool {
    let s = locator.trim();
    !s.is_empty() && !s.starts_with("content://")
}

/// 获取定位串指向的原始文本
///
/// `https?://` 走一次性阻塞 GET；`file://` 与裸路径读本地文件；
/// `content://` 为安卓宿主专有，这里直接报来源错误
pub fn fetch_text(locator: &str) -> Result<String, AppError> {
    let locator = locator.trim();
    if locator.is_empty() {
        return Err(AppError::Source("数据来源为空".into()));
    }

    if locator.starts_with("http://") || locator.starts_with("https://") {
        return fetch_url(locator);
    }
    if let Some(path) = locator.strip_prefix("file://") {
        return read_text_file(Path::new(path));
    }
    if locator.starts_with("content://") {
        return Err(AppError::Source(format!(
            "content:// 来源仅安卓宿主支持: {}",
            locator
        )));
    }
    // 其余按本地文件路径处理
    read_text_file(Path::new(locator))
}

fn fetch_url(url: &str) -> Result<String, AppError> {
    tracing::info!("开始获取远程数据: {}", url);
    let mut body = ureq::get(url)
        .header("User-Agent", "json-keshihua")
        .call()
        .map_err(|e| AppError::Source(format!("请求失败: {}", e)))?
        .into_body();

    body.read_to_string()
        .map_err(|e| AppError::Source(format!("读取响应失败: {}", e)))
}
