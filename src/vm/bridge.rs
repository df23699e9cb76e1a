//! VM桥接层：连接Slint UI与AppState数据模型
//!
//! 注意：此模块的具体实现在main.rs中，因为依赖于Slint生成的类型
//! 这里只提供公共常量

// === 常量定义（消除魔法值） ===
pub const STATUS_READY: &str = "就绪";
pub const STATUS_LOADING: &str = "正在加载数据...";
pub const STATUS_LOADED: &str = "数据加载完成";
pub const STATUS_COPIED: &str = "已复制到剪贴板";
pub const STATUS_SETTINGS_SAVED: &str = "设置已保存";
pub const STATUS_ERROR_PREFIX: &str = "错误: ";

// === 节点操作菜单索引（与 UI 对话框按钮对应） ===
pub const ACTION_COPY_PATH: i32 = 0;
pub const ACTION_COPY_VALUE: i32 = 1;
