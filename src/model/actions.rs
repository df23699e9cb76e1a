//! 节点操作：复制路径 / 复制值的文本解析

use serde::Serialize;
use serde_json::Value;

use crate::model::data_core::AppError;
use crate::model::settings::Settings;
use crate::model::tree::TreeNode;
use crate::model::value_kind::{leaf_display, ValueKind};

/// 单个节点可执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    CopyPath,
    CopyValue,
}

/// 解析节点操作为待写入剪贴板的文本
///
/// 复制值时按类别取文本：数组/对象按对应缩进设置序列化为 JSON，
/// 字符串取未加引号的原始内容，其余取规范文本形式
pub fn resolve_action(
    root: &Value,
    node: &TreeNode,
    action: NodeAction,
    settings: &Settings,
) -> Result<String, AppError> {
    match action {
        NodeAction::CopyPath => Ok(node.path.to_string()),
        NodeAction::CopyValue => match node.path.resolve(root) {
            Some(v @ Value::Array(_)) => to_json_with_indent(v, settings.array_indent),
            Some(v @ Value::Object(_)) => to_json_with_indent(v, settings.object_indent),
            // 字符串取未加引号的原始内容
            Some(Value::String(s)) => Ok(s.clone()),
            // 数字/布尔/null 的规范文本形式
            Some(other) => Ok(other.to_string()),
            // 路径已失效（值缺失）按 Undefined 处理
            None => Ok(leaf_display(ValueKind::Undefined, None)),
        },
    }
}

/// 按指定缩进宽度序列化 JSON 文本；宽度为 0 时输出紧凑单行
pub fn to_json_with_indent(value: &Value, indent: u32) -> Result<String, AppError> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }
    let spaces = vec![b' '; indent as usize];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&spaces);
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| AppError::State(format!("序列化产生非UTF-8文本: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::json_path::{NodePath, PathSegment};
    use crate::model::tree::{find_node, render_root};
    use serde_json::json;

    fn settings_with(array_indent: u32, object_indent: u32) -> Settings {
        Settings {
            array_indent,
            object_indent,
            ..Settings::default()
        }
    }

    fn key_path(keys: &[&str]) -> NodePath {
        keys.iter().fold(NodePath::root(), |path, k| {
            path.child(PathSegment::Key((*k).into()))
        })
    }

    #[test]
    fn test_copy_path_nested_value() {
        let doc = json!({"a": [{"b": 2}]});
        let tree = render_root(&doc);
        let node = &tree[0].children[0].children[0];

        let text = resolve_action(&doc, node, NodeAction::CopyPath, &Settings::default())
            .expect("复制路径应成功");
        assert_eq!(text, "[\"a\"][0][\"b\"]");
    }

    #[test]
    fn test_copy_object_value_uses_object_indent() {
        let doc = json!({"a": 1, "b": {"c": 2}});
        let tree = render_root(&doc);
        let node = find_node(&tree, &key_path(&["b"])).expect("应能找到对象节点");

        let text = resolve_action(&doc, node, NodeAction::CopyValue, &settings_with(2, 2))
            .expect("复制对象值应成功");
        assert_eq!(text, serde_json::to_string_pretty(&json!({"c": 2})).unwrap());
    }

    #[test]
    fn test_copy_array_value_uses_array_indent() {
        let doc = json!({"items": [1, 2]});
        let tree = render_root(&doc);
        let node = find_node(&tree, &key_path(&["items"])).expect("应能找到数组节点");

        let text = resolve_action(&doc, node, NodeAction::CopyValue, &settings_with(4, 2))
            .expect("复制数组值应成功");
        assert_eq!(text, "[\n    1,\n    2\n]");
    }

    #[test]
    fn test_zero_indent_is_compact() {
        let doc = json!({"b": {"c": 2}});
        let tree = render_root(&doc);
        let node = find_node(&tree, &key_path(&["b"])).unwrap();

        let text = resolve_action(&doc, node, NodeAction::CopyValue, &settings_with(0, 0))
            .expect("紧凑序列化应成功");
        assert_eq!(text, "{\"c\":2}");
    }

    #[test]
    fn test_copy_leaf_values_are_raw() {
        let doc = json!({
            "s": "纯文本",
            "n": 42,
            "t": true,
            "f": false,
            "z": null
        });
        let tree = render_root(&doc);
        let settings = Settings::default();

        let copy = |k: &str| {
            let node = find_node(&tree, &key_path(&[k])).expect("应能找到节点");
            resolve_action(&doc, node, NodeAction::CopyValue, &settings).unwrap()
        };

        // 字符串复制为未加引号的原始内容
        assert_eq!(copy("s"), "纯文本");
        assert_eq!(copy("n"), "42");
        assert_eq!(copy("t"), "true");
        assert_eq!(copy("f"), "false");
        assert_eq!(copy("z"), "null");
    }

    #[test]
    fn test_copy_value_of_stale_path_is_undefined() {
        // 节点路径在另一文档中不存在时，按 Undefined 的规范文本处理
        let doc = json!({"a": 1});
        let tree = render_root(&doc);
        let node = find_node(&tree, &key_path(&["a"])).unwrap();

        let other = json!({"b": 1});
        let text = resolve_action(&other, node, NodeAction::CopyValue, &Settings::default())
            .expect("缺失值不应报错");
        assert_eq!(text, "undefined");
    }

    #[test]
    fn test_to_json_with_indent_matches_pretty() {
        let value = json!({"a": 1, "b": {"c": 2}});
        let text = to_json_with_indent(&value, 2).unwrap();
        assert_eq!(text, serde_json::to_string_pretty(&value).unwrap());
    }
}
