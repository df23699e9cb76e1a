//! 值类型分类：将 JSON 值归入固定的八种展示类别

use serde_json::Value;

/// JSON 值类别（与 UI 展示解耦）
///
/// 布尔值拆分为 True/False 两类，便于按类别分配颜色；
/// Undefined 仅在值缺失时出现（serde 数据模型本身没有 undefined）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    True,
    False,
    Null,
    Undefined,
    Array,
    Object,
}

impl ValueKind {
    /// 对值进行分类；None 表示值缺失（如路径已失效），归为 Undefined
    ///
    /// 分类是全函数：任何输入都有唯一类别，无错误分支
    pub fn classify(value: Option<&Value>) -> Self {
        match value {
            None => ValueKind::Undefined,
            Some(Value::Bool(true)) => ValueKind::True,
            Some(Value::Bool(false)) => ValueKind::False,
            Some(Value::Null) => ValueKind::Null,
            Some(Value::Array(_)) => ValueKind::Array,
            Some(Value::Object(_)) => ValueKind::Object,
            Some(Value::String(_)) => ValueKind::String,
            Some(Value::Number(_)) => ValueKind::Number,
        }
    }

    /// 是否为分支类别（可展开、有子节点）
    pub fn is_branch(self) -> bool {
        matches!(self, ValueKind::Array | ValueKind::Object)
    }

    /// 是否为叶子类别（直接展示值文本）
    pub fn is_leaf(self) -> bool {
        !self.is_branch()
    }

    /// 类别名（用于 UI 样式与日志）
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::True => "true",
            ValueKind::False => "false",
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

/// 叶子值的展示文本：字符串加引号，其余按规范文本形式输出
pub fn leaf_display(kind: ValueKind, value: Option<&Value>) -> String {
    match (kind, value) {
        (ValueKind::String, Some(Value::String(s))) => format!("\"{}\"", s),
        (ValueKind::Number, Some(Value::Number(n))) => n.to_string(),
        (ValueKind::True, _) => "true".to_string(),
        (ValueKind::False, _) => "false".to_string(),
        (ValueKind::Null, _) => "null".to_string(),
        (ValueKind::Undefined, _) => "undefined".to_string(),
        // 分支类别不走叶子展示；其余组合不会出现
        _ => String::new(),
    }
}

/// 分支节点的摘要标签：`Array (长度)` / `Object (键数)`
pub fn branch_summary(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("Array ({})", items.len()),
        Value::Object(map) => format!("Object ({})", map.len()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_all_kinds() {
        assert_eq!(ValueKind::classify(Some(&json!("文本"))), ValueKind::String);
        assert_eq!(ValueKind::classify(Some(&json!(42))), ValueKind::Number);
        assert_eq!(ValueKind::classify(Some(&json!(3.25))), ValueKind::Number);
        assert_eq!(ValueKind::classify(Some(&json!(true))), ValueKind::True);
        assert_eq!(ValueKind::classify(Some(&json!(false))), ValueKind::False);
        assert_eq!(ValueKind::classify(Some(&json!(null))), ValueKind::Null);
        assert_eq!(ValueKind::classify(Some(&json!([1, 2]))), ValueKind::Array);
        assert_eq!(ValueKind::classify(Some(&json!({"a": 1}))), ValueKind::Object);
        assert_eq!(ValueKind::classify(None), ValueKind::Undefined);
    }

    #[test]
    fn test_branch_and_leaf_predicates() {
        assert!(ValueKind::Array.is_branch());
        assert!(ValueKind::Object.is_branch());
        assert!(ValueKind::String.is_leaf());
        assert!(ValueKind::Null.is_leaf());
        assert!(ValueKind::Undefined.is_leaf());
        assert!(!ValueKind::Object.is_leaf());
    }

    #[test]
    fn test_leaf_display_formats() {
        let s = json!("你好");
        assert_eq!(leaf_display(ValueKind::String, Some(&s)), "\"你好\"");

        let n = json!(42);
        assert_eq!(leaf_display(ValueKind::Number, Some(&n)), "42");

        assert_eq!(leaf_display(ValueKind::True, Some(&json!(true))), "true");
        assert_eq!(leaf_display(ValueKind::False, Some(&json!(false))), "false");
        assert_eq!(leaf_display(ValueKind::Null, Some(&json!(null))), "null");
        assert_eq!(leaf_display(ValueKind::Undefined, None), "undefined");
    }

    #[test]
    fn test_branch_summary_counts() {
        assert_eq!(branch_summary(&json!([1, 2, 3])), "Array (3)");
        assert_eq!(branch_summary(&json!({"a": 1, "b": 2})), "Object (2)");
        assert_eq!(branch_summary(&json!([])), "Array (0)");
        assert_eq!(branch_summary(&json!({})), "Object (0)");
    }
}
