//! 持久化设置：复制时的序列化缩进宽度与各值类别的显示颜色

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::data_core::AppError;
use crate::model::value_kind::ValueKind;

/// 各值类别的显示颜色（#rrggbb 十六进制）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindColors {
    pub string: String,
    pub number: String,
    pub boolean_true: String,
    pub boolean_false: String,
    pub null: String,
    pub undefined: String,
    pub array: String,
    pub object: String,
}

impl Default for KindColors {
    fn default() -> Self {
        Self {
            string: "#98c379".into(),
            number: "#61afef".into(),
            boolean_true: "#56b6c2".into(),
            boolean_false: "#e06c75".into(),
            null: "#7f848e".into(),
            undefined: "#7f848e".into(),
            array: "#c678dd".into(),
            object: "#e5c07b".into(),
        }
    }
}

/// 缩进宽度上限：序列化缓冲随缩进乘深度增长，超出此值没有展示意义
pub const MAX_INDENT: u32 = 16;

/// 应用设置：启动时加载一次，缺失字段并入默认值，每次修改立即持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 复制数组值时的序列化缩进宽度（0 为紧凑单行）
    pub array_indent: u32,
    /// 复制对象值时的序列化缩进宽度（0 为紧凑单行）
    pub object_indent: u32,
    pub colors: KindColors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            array_indent: 2,
            object_indent: 2,
            colors: KindColors::default(),
        }
    }
}

/// 设置面板的声明式字段描述（键、标签、编辑器类型、当前值）
#[derive(Debug, Clone)]
pub struct SettingField {
    pub key: &'static str,
    pub label: &'static str,
    pub editor: &'static str,
    pub value: String,
}

impl Settings {
    /// 设置文件位置：`<配置目录>/json-keshihua/settings.json`
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("json-keshihua").join("settings.json"))
    }

    /// 启动时加载：文件缺失或损坏时回退默认值并记录日志
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("无法确定配置目录，使用默认设置");
            return Self::default();
        };
        if !path.exists() {
            tracing::info!("设置文件不存在，使用默认设置: {}", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("设置加载成功: {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("设置加载失败，回退默认值: {}", e);
                Self::default()
            }
        }
    }

    /// 从指定文件加载；缺失字段由 serde(default) 并入默认值，
    /// 超限的缩进宽度收拢到上限
    pub fn load_from(path: &std::path::Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)?;
        let mut settings: Self = serde_json::from_str(&text)?;
        settings.array_indent = settings.array_indent.min(MAX_INDENT);
        settings.object_indent = settings.object_indent.min(MAX_INDENT);
        Ok(settings)
    }

    /// 持久化到默认位置（修改后立即调用）
    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::settings_path()
            .ok_or_else(|| AppError::State("无法确定配置目录".into()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// 某值类别的显示颜色
    pub fn color_for(&self, kind: ValueKind) -> &str {
        match kind {
            ValueKind::String => &self.colors.string,
            ValueKind::Number => &self.colors.number,
            ValueKind::True => &self.colors.boolean_true,
            ValueKind::False => &self.colors.boolean_false,
            ValueKind::Null => &self.colors.null,
            ValueKind::Undefined => &self.colors.undefined,
            ValueKind::Array => &self.colors.array,
            ValueKind::Object => &self.colors.object,
        }
    }

    /// 设置面板的字段清单（键、标签、编辑器类型、当前值）
    pub fn field_list(&self) -> Vec<SettingField> {
        vec![
            SettingField { key: "array_indent", label: "数组缩进宽度", editor: "number", value: self.array_indent.to_string() },
            SettingField { key: "object_indent", label: "对象缩进宽度", editor: "number", value: self.object_indent.to_string() },
            SettingField { key: "color.string", label: "字符串颜色", editor: "color", value: self.colors.string.clone() },
            SettingField { key: "color.number", label: "数字颜色", editor: "color", value: self.colors.number.clone() },
            SettingField { key: "color.true", label: "true 颜色", editor: "color", value: self.colors.boolean_true.clone() },
            SettingField { key: "color.false", label: "false 颜色", editor: "color", value: self.colors.boolean_false.clone() },
            SettingField { key: "color.null", label: "null 颜色", editor: "color", value: self.colors.null.clone() },
            SettingField { key: "color.undefined", label: "undefined 颜色", editor: "color", value: self.colors.undefined.clone() },
            SettingField { key: "color.array", label: "数组颜色", editor: "color", value: self.colors.array.clone() },
            SettingField { key: "color.object", label: "对象颜色", editor: "color", value: self.colors.object.clone() },
        ]
    }

    /// 应用单个字段编辑；非法输入返回错误且不改动设置
    pub fn apply_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "array_indent" | "object_indent" => {
                let parsed: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| AppError::State(format!("缩进宽度须为非负整数: {}", value)))?;
                if parsed > MAX_INDENT {
                    return Err(AppError::State(format!(
                        "缩进宽度不能超过 {}: {}",
                        MAX_INDENT, value
                    )));
                }
                if key == "array_indent" {
                    self.array_indent = parsed;
                } else {
                    self.object_indent = parsed;
                }
            }
            _ if key.starts_with("color.") => {
                if parse_hex_color(value).is_none() {
                    return Err(AppError::State(format!("颜色须为 #rrggbb 形式: {}", value)));
                }
                let color = value.trim().to_string();
                match key {
                    "color.string" => self.colors.string = color,
                    "color.number" => self.colors.number = color,
                    "color.true" => self.colors.boolean_true = color,
                    "color.false" => self.colors.boolean_false = color,
                    "color.null" => self.colors.null = color,
                    "color.undefined" => self.colors.undefined = color,
                    "color.array" => self.colors.array = color,
                    "color.object" => self.colors.object = color,
                    _ => return Err(AppError::State(format!("未知的颜色字段: {}", key))),
                }
            }
            _ => return Err(AppError::State(format!("未知的设置字段: {}", key))),
        }
        Ok(())
    }
}

/// 解析 #rrggbb 颜色串为 RGB 分量
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let s = s.trim();
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.array_indent = 4;
        settings.colors.string = "#ff0000".into();
        settings.save_to(&path).expect("保存设置应该成功");

        let loaded = Settings::load_from(&path).expect("重新加载应该成功");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_merges_defaults() {
        let mut file = NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(br#"{"object_indent": 8}"#)
            .expect("写入临时文件失败");

        let loaded = Settings::load_from(file.path()).expect("部分设置应可加载");
        assert_eq!(loaded.object_indent, 8);
        assert_eq!(loaded.array_indent, Settings::default().array_indent);
        assert_eq!(loaded.colors, KindColors::default());
    }

    #[test]
    fn test_apply_indent_field() {
        let mut settings = Settings::default();
        settings.apply_field("array_indent", "0").expect("应接受 0");
        assert_eq!(settings.array_indent, 0);

        let err = settings.apply_field("array_indent", "-1");
        assert!(err.is_err(), "负数应被拒绝");
        assert_eq!(settings.array_indent, 0, "非法输入不应改动设置");
    }

    #[test]
    fn test_apply_indent_rejects_above_limit() {
        let mut settings = Settings::default();
        settings
            .apply_field("object_indent", &MAX_INDENT.to_string())
            .expect("上限值本身应被接受");
        assert_eq!(settings.object_indent, MAX_INDENT);

        for value in ["17", "4294967295"] {
            let err = settings.apply_field("object_indent", value);
            assert!(matches!(err, Err(AppError::State(_))), "超限宽度应被拒绝: {}", value);
            assert_eq!(settings.object_indent, MAX_INDENT, "拒绝后设置保持不变");
        }
    }

    #[test]
    fn test_load_clamps_oversized_indent() {
        let mut file = NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(br#"{"array_indent": 4294967295, "object_indent": 4}"#)
            .expect("写入临时文件失败");

        let loaded = Settings::load_from(file.path()).expect("超限文件仍应可加载");
        assert_eq!(loaded.array_indent, MAX_INDENT, "超限宽度收拢到上限");
        assert_eq!(loaded.object_indent, 4, "合法宽度原样保留");
    }

    #[test]
    fn test_apply_color_field() {
        let mut settings = Settings::default();
        settings
            .apply_field("color.number", "#123abc")
            .expect("合法颜色应被接受");
        assert_eq!(settings.colors.number, "#123abc");

        assert!(settings.apply_field("color.number", "red").is_err());
        assert!(settings.apply_field("color.unknown", "#000000").is_err());
        assert!(settings.apply_field("no_such_field", "1").is_err());
    }

    #[test]
    fn test_field_list_covers_all_settings() {
        let settings = Settings::default();
        let fields = settings.field_list();
        assert_eq!(fields.len(), 10, "两个缩进字段加八种颜色");

        // 每个字段的当前值都能原样写回
        let mut copy = settings.clone();
        for field in &fields {
            copy.apply_field(field.key, &field.value)
                .expect("字段清单中的值应能原样应用");
        }
        assert_eq!(copy, settings);
    }

    #[test]
    fn test_color_for_each_kind() {
        let settings = Settings::default();
        assert_eq!(settings.color_for(ValueKind::String), "#98c379");
        assert_eq!(settings.color_for(ValueKind::Object), "#e5c07b");
        assert_eq!(
            settings.color_for(ValueKind::Undefined),
            settings.colors.undefined.as_str()
        );
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color(" #61afef "), Some((0x61, 0xaf, 0xef)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("61afef"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
