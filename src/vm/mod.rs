//! 视图模型层：UI与数据层之间的桥接

pub mod bridge;
