//! JSON 可视化工具库
//!
//! 提供 JSON/JSON5 加载、树节点渲染、路径定位与复制操作
//! 遵循MVVM架构模式，渲染逻辑保持纯函数便于测试

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::actions::NodeAction;
pub use model::data_core::{AppError, AppState};
pub use model::json_path::{NodePath, PathSegment};
pub use model::settings::Settings;
pub use model::tree::{render_root, TreeNode};
pub use model::value_kind::ValueKind;
