//! 路径模型：从文档根到某个值的定位路径，支持规范字符串展示与结构化解析

use std::fmt;

use serde_json::Value;

/// 单个路径段：对象成员用字符串键，数组成员用整数下标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// 该段在树中的键名展示形式：对象键原样，数组下标为 `[i]`
    pub fn key_label(&self) -> String {
        match self {
            PathSegment::Key(k) => k.clone(),
            PathSegment::Index(i) => format!("[{}]", i),
        }
    }
}

/// 从根到某个值的有序路径段序列；根路径为空序列
///
/// 展示形式为方括号串，如 `["a"][0]["b"]`（根为空字符串）。
/// 注意：键名中的双引号不做转义，展示串仅用于查看与复制；
/// 结构化解析（resolve）按段序列进行，不受展示形式影响
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(Vec<PathSegment>);

impl NodePath {
    /// 根路径（空段序列）
    pub fn root() -> Self {
        NodePath(Vec::new())
    }

    /// 在当前路径后追加一段，产生子路径
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        NodePath(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// 按段序列在根值中定位；任一段不匹配即返回 None
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.0 {
            current = match (segment, current) {
                (PathSegment::Key(k), Value::Object(map)) => map.get(k)?,
                (PathSegment::Index(i), Value::Array(items)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            match segment {
                PathSegment::Key(k) => write!(f, "[\"{}\"]", k)?,
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}
