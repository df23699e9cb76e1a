//! 树渲染核心：将解析后的 JSON 值递归转换为可展示的节点序列

use serde_json::Value;

use crate::model::json_path::{NodePath, PathSegment};
use crate::model::value_kind::{branch_summary, leaf_display, ValueKind};

/// 一个可渲染的树节点：叶子行或可展开的分支行
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    /// 在父级中的键名展示形式（对象键原样，数组下标为 `[i]`）
    pub key: String,
    /// 值类别
    pub kind: ValueKind,
    /// 深度（根级条目为 0，控制缩进）
    pub depth: u32,
    /// 从文档根定位到该值的路径
    pub path: NodePath,
    /// 展示文本：叶子为格式化值，分支为 `Array (n)` / `Object (n)` 摘要
    pub display: String,
    /// 是否展开（仅分支有意义；默认折叠，切换不触发重算）
    pub expanded: bool,
    /// 子节点（分支在渲染时立即计算，叶子为空）
    pub children: Vec<TreeNode>,
}

/// 统一迭代适配：数组按下标规整为键值条目，与对象共用同一条迭代路径
///
/// 标量值没有条目，返回空序列
fn entries(value: &Value) -> Vec<(PathSegment, &Value)> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, child)| (PathSegment::Index(i), child))
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(k, child)| (PathSegment::Key(k.clone()), child))
            .collect(),
        _ => Vec::new(),
    }
}

/// 递归渲染：每个自有条目恰好产生一个节点，保持输入顺序
///
/// 渲染是纯函数：不修改输入值，同一输入总是产生相同的节点序列
pub fn render(value: &Value, depth: u32, parent: &NodePath) -> Vec<TreeNode> {
    let mut out = Vec::new();
    for (segment, child) in entries(value) {
        let key = segment.key_label();
        let path = parent.child(segment);
        let kind = ValueKind::classify(Some(child));

        if kind.is_branch() {
            let children = render(child, depth + 1, &path);
            out.push(TreeNode {
                key,
                kind,
                depth,
                display: branch_summary(child),
                expanded: false,
                children,
                path,
            });
        } else {
            out.push(TreeNode {
                key,
                kind,
                depth,
                display: leaf_display(kind, Some(child)),
                expanded: false,
                children: Vec::new(),
                path,
            });
        }
    }
    out
}

/// 从根级节点序列渲染整棵树（深度 0、根路径）
pub fn render_root(value: &Value) -> Vec<TreeNode> {
    render(value, 0, &NodePath::root())
}

/// 收集当前可见的行：节点本身总是可见，子节点仅在分支展开时下钻
pub fn visible_rows<'a>(nodes: &'a [TreeNode]) -> Vec<&'a TreeNode> {
    fn walk<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a TreeNode>) {
        for node in nodes {
            out.push(node);
            if node.expanded {
                walk(&node.children, out);
            }
        }
    }
    let mut out = Vec::with_capacity(nodes.len());
    walk(nodes, &mut out);
    out
}

/// 按结构化路径查找节点（深度优先）
///
/// 按段序列比较而非展示串：展示串在键含引号时可能撞车，段序列不会
pub fn find_node<'a>(nodes: &'a [TreeNode], path: &NodePath) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.path == *path {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, path) {
            return Some(found);
        }
    }
    None
}

/// 切换指定路径分支的展开状态；找到并切换返回 true
///
/// 只翻转布尔标志，子节点保持不变
pub fn toggle_expanded(nodes: &mut [TreeNode], path: &NodePath) -> bool {
    for node in nodes {
        if node.path == *path {
            if node.kind.is_branch() {
                node.expanded = !node.expanded;
                return true;
            }
            return false;
        }
        if toggle_expanded(&mut node.children, path) {
            return true;
        }
    }
    false
}
