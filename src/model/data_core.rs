//! AppState：应用核心状态（文档、渲染树、设置）与节点操作

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::model::actions::{resolve_action, NodeAction};
use crate::model::json_path::NodePath;
use crate::model::settings::Settings;
use crate::model::tree::{find_node, render_root, toggle_expanded, visible_rows, TreeNode};
use crate::utils::clipboard::{ClipboardAccess, ClipboardError};
use crate::utils::fs::{parse_document, read_text_file};
use crate::utils::net::fetch_text;

#[derive(Debug, Default)]
pub struct AppState {
    /// 当前数据来源（文件路径、URL 或文本输入标签）
    pub source: Option<String>,
    pub dom: Option<Value>,
    /// 根级节点序列（分支节点内嵌子树与展开状态）
    pub tree: Vec<TreeNode>,
    pub settings: Settings,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] json5::Error),
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("来源错误: {0}")]
    Source(String),
    #[error("剪贴板错误: {0}")]
    Clipboard(#[from] ClipboardError),
    #[error("状态错误: {0}")]
    State(String),
}

impl AppState {
    /// 加载并解析本地JSON/JSON5文件
    pub fn load_file(&mut self, p: &Path) -> Result<(), AppError> {
        let text = read_text_file(p)?;
        self.load_text(&p.display().to_string(), &text)
    }

    /// 按定位串获取来源文本并解析（http/https/file/本地路径）
    pub fn load_locator(&mut self, locator: &str) -> Result<(), AppError> {
        let text = fetch_text(locator)?;
        self.load_text(locator, &text)
    }

    /// 解析文本并替换当前文档
    ///
    /// 先解析后替换：解析失败时原有文档与树保持不变，界面可继续使用
    pub fn load_text(&mut self, source: &str, text: &str) -> Result<(), AppError> {
        let dom = parse_document(text)?;
        self.tree = render_root(&dom);
        self.dom = Some(dom);
        self.source = Some(source.to_string());
        Ok(())
    }

    /// 当前可见的行（折叠分支的子树不下钻）
    pub fn visible_rows(&self) -> Vec<&TreeNode> {
        visible_rows(&self.tree)
    }

    /// 树中节点总数（含折叠部分，用于状态栏信息）
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.tree)
    }

    /// 按可见行序号取出对应节点的结构化路径
    ///
    /// UI 以可见行序号寻址节点：路径展示串在键含引号时不可逆，
    /// 不能用作节点标识
    pub fn visible_path(&self, index: usize) -> Option<NodePath> {
        self.visible_rows().get(index).map(|node| node.path.clone())
    }

    /// 切换指定路径分支的展开状态；找到并切换返回 true
    pub fn toggle_node(&mut self, path: &NodePath) -> bool {
        toggle_expanded(&mut self.tree, path)
    }

    /// 按可见行序号切换展开状态
    pub fn toggle_visible_row(&mut self, index: usize) -> bool {
        match self.visible_path(index) {
            Some(path) => self.toggle_node(&path),
            None => false,
        }
    }

    /// 解析节点操作文本并写入剪贴板，返回写入的文本
    pub fn copy_node(
        &self,
        path: &NodePath,
        action: NodeAction,
        clipboard: &mut dyn ClipboardAccess,
    ) -> Result<String, AppError> {
        let dom = self
            .dom
            .as_ref()
            .ok_or_else(|| AppError::State("文档尚未加载".into()))?;
        let node = find_node(&self.tree, path)
            .ok_or_else(|| AppError::State(format!("未找到节点: {}", path)))?;

        let text = resolve_action(dom, node, action, &self.settings)?;
        clipboard.write_text(&text)?;
        Ok(text)
    }

    /// 按可见行序号执行节点操作
    pub fn copy_visible_row(
        &self,
        index: usize,
        action: NodeAction,
        clipboard: &mut dyn ClipboardAccess,
    ) -> Result<String, AppError> {
        let path = self
            .visible_path(index)
            .ok_or_else(|| AppError::State(format!("可见行序号越界: {}", index)))?;
        self.copy_node(&path, action, clipboard)
    }
}
