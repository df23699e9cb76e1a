//! 数据层：值分类、路径、树渲染、节点操作、设置与应用状态

pub mod actions;
pub mod data_core;
pub mod json_path;
pub mod settings;
pub mod tree;
pub mod value_kind;
