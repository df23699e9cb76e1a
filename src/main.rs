//! 程序入口：初始化日志、加载 Slint UI，并绑定 VM 回调

use std::{cell::RefCell, rc::Rc};

use slint::{ComponentHandle, ModelRc, VecModel};
use tracing_subscriber::fmt::SubscriberBuilder;

slint::include_modules!();

mod model;
mod utils;
mod vm;

use std::time::Instant;

use model::actions::NodeAction;
use model::data_core::AppState;
use model::settings::{parse_hex_color, Settings};
use model::tree::TreeNode;
use utils::clipboard::SystemClipboard;
use vm::bridge::*;

/// 将数据层节点转换为Slint行数据（颜色按设置中的类别颜色解析）
fn to_row_data(node: &TreeNode, settings: &Settings) -> TreeRowData {
    let (r, g, b) = parse_hex_color(settings.color_for(node.kind)).unwrap_or((215, 218, 224));
    TreeRowData {
        key: node.key.clone().into(),
        display: node.display.clone().into(),
        kind: node.kind.name().into(),
        path: node.path.to_string().into(),
        depth: node.depth as i32,
        is_branch: node.kind.is_branch(),
        expanded: node.expanded,
        value_color: slint::Color::from_rgb_u8(r, g, b),
    }
}

/// VM桥接器：管理UI与数据层的交互
struct ViewModelBridge {
    app_state: Rc<RefCell<AppState>>,
    clipboard: Rc<RefCell<SystemClipboard>>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, app_state: Rc<RefCell<AppState>>) -> Self {
        let bridge = Self {
            app_state,
            clipboard: Rc::new(RefCell::new(SystemClipboard)),
        };
        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        let app_state = self.app_state.clone();

        // === 打开文件回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_open_file_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_open_file(&app_window, &app_state);
                }
            });
        }

        // === URL获取回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_fetch_url_pressed(move |locator| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_fetch_locator(&app_window, &app_state, &locator.to_string());
                }
            });
        }

        // === 文本可视化回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_visualize_text_pressed(move |text| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_visualize_text(&app_window, &app_state, &text.to_string());
                }
            });
        }

        // === 节点展开/折叠回调 ===
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_toggle_node(move |row_index| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_toggle_node(&app_window, &app_state, row_index);
                }
            });
        }

        // === 节点操作菜单回调 ===
        {
            let app_window_weak = app_window.as_weak();
            app_window.on_node_menu_pressed(move |row_index, node_path| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_window.set_action_menu_index(row_index);
                    app_window.set_action_menu_path(node_path);
                    app_window.set_action_menu_visible(true);
                }
            });
        }
        {
            let app_window_weak = app_window.as_weak();
            app_window.on_close_action_menu(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_window.set_action_menu_visible(false);
                }
            });
        }

        // === 节点操作执行回调（复制路径/复制值） ===
        {
            let app_state = app_state.clone();
            let clipboard = self.clipboard.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_node_action_pressed(move |row_index, action| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_node_action(&app_window, &app_state, &clipboard, row_index, action);
                }
            });
        }

        // === 设置面板回调 ===
        {
            let app_window_weak = app_window.as_weak();
            app_window.on_toggle_settings_pressed(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_window.set_settings_visible(!app_window.get_settings_visible());
                }
            });
        }
        {
            let app_state = app_state.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_setting_edited(move |key, value| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_setting_edited(
                        &app_window,
                        &app_state,
                        &key.to_string(),
                        &value.to_string(),
                    );
                }
            });
        }
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_status_message(STATUS_READY.into());
        app_window.set_current_source("".into());
        app_window.set_action_menu_visible(false);
        app_window.set_settings_visible(false);

        // 设置空的树模型
        let empty_model = ModelRc::new(VecModel::<TreeRowData>::default());
        app_window.set_tree_model(empty_model);

        Self::refresh_settings_model(app_window, &self.app_state);
    }

    /// 重建树模型：只向UI提供当前可见的行
    fn rebuild_tree_model(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let state = app_state.borrow();
        let rows: Vec<TreeRowData> = state
            .visible_rows()
            .into_iter()
            .map(|node| to_row_data(node, &state.settings))
            .collect();
        app_window.set_tree_model(ModelRc::new(VecModel::from(rows)));
    }

    /// 重建设置面板的字段模型
    fn refresh_settings_model(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let fields: Vec<SettingFieldData> = app_state
            .borrow()
            .settings
            .field_list()
            .into_iter()
            .map(|field| SettingFieldData {
                key: field.key.into(),
                label: field.label.into(),
                editor: field.editor.into(),
                value: field.value.into(),
            })
            .collect();
        app_window.set_settings_model(ModelRc::new(VecModel::from(fields)));
    }

    /// 显示文件选择对话框
    fn show_file_dialog() -> Option<std::path::PathBuf> {
        use rfd::FileDialog;

        let file_path = FileDialog::new()
            .add_filter("JSON文件", &["json", "json5"])
            .add_filter("所有文件", &["*"])
            .set_title("选择要可视化的JSON文件")
            .pick_file();

        match file_path {
            Some(path) => {
                tracing::info!("用户选择了文件: {}", path.display());
                Some(path)
            }
            None => {
                tracing::info!("用户取消了文件选择");
                None
            }
        }
    }

    /// 处理打开文件操作
    fn handle_open_file(app_window: &AppWindow, app_state: &Rc<RefCell<AppState>>) {
        let file_path = match Self::show_file_dialog() {
            Some(path) => path,
            None => {
                app_window.set_status_message("未选择文件".into());
                return;
            }
        };

        app_window.set_status_message(STATUS_LOADING.into());
        let start_time = Instant::now();

        let load_result = app_state.borrow_mut().load_file(&file_path);
        Self::finish_load(app_window, app_state, load_result, start_time);
    }

    /// 处理按定位串获取数据（https?:// 或 file://）
    fn handle_fetch_locator(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        locator: &str,
    ) {
        if !utils::net::is_supported_locator(locator) {
            app_window
                .set_status_message(format!("{}不支持的数据来源: {}", STATUS_ERROR_PREFIX, locator).into());
            return;
        }

        app_window.set_status_message(STATUS_LOADING.into());
        let start_time = Instant::now();

        let load_result = app_state.borrow_mut().load_locator(locator);
        Self::finish_load(app_window, app_state, load_result, start_time);
    }

    /// 处理粘贴文本可视化（相当于编辑器中的选中文本入口）
    fn handle_visualize_text(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        text: &str,
    ) {
        if text.trim().is_empty() {
            app_window.set_status_message(format!("{}输入文本为空", STATUS_ERROR_PREFIX).into());
            return;
        }

        let start_time = Instant::now();
        let load_result = app_state.borrow_mut().load_text("输入文本", text);
        Self::finish_load(app_window, app_state, load_result, start_time);
    }

    /// 加载收尾：成功则重建树模型并显示耗时，失败则保留原有树并提示
    fn finish_load(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        load_result: Result<(), model::data_core::AppError>,
        start_time: Instant,
    ) {
        match load_result {
            Ok(()) => {
                let load_duration = start_time.elapsed();
                Self::rebuild_tree_model(app_window, app_state);

                let (source, node_count) = {
                    let state = app_state.borrow();
                    (state.source.clone().unwrap_or_default(), state.node_count())
                };
                app_window.set_current_source(source.into());
                app_window.set_status_message(
                    format!(
                        "{} | 节点: {} | 耗时: {}ms",
                        STATUS_LOADED,
                        node_count,
                        load_duration.as_millis()
                    )
                    .into(),
                );
                tracing::info!(
                    "数据加载成功: {} 个节点，耗时: {}ms",
                    node_count,
                    load_duration.as_millis()
                );
            }
            Err(e) => {
                // 原有文档与树保持不变，界面可继续使用
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
                tracing::error!("数据加载失败: {}", e);
            }
        }
    }

    /// 处理节点展开/折叠（按可见行序号寻址）
    fn handle_toggle_node(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        row_index: i32,
    ) {
        let Ok(row_index) = usize::try_from(row_index) else {
            return;
        };
        if app_state.borrow_mut().toggle_visible_row(row_index) {
            Self::rebuild_tree_model(app_window, app_state);
        }
    }

    /// 处理节点操作（复制路径/复制值）
    fn handle_node_action(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        clipboard: &Rc<RefCell<SystemClipboard>>,
        row_index: i32,
        action: i32,
    ) {
        app_window.set_action_menu_visible(false);

        let node_action = match action {
            ACTION_COPY_PATH => NodeAction::CopyPath,
            ACTION_COPY_VALUE => NodeAction::CopyValue,
            other => {
                tracing::warn!("未知的节点操作索引: {}", other);
                return;
            }
        };
        let Ok(row_index) = usize::try_from(row_index) else {
            tracing::warn!("非法的可见行序号: {}", row_index);
            return;
        };

        let copy_result = app_state.borrow().copy_visible_row(
            row_index,
            node_action,
            &mut *clipboard.borrow_mut(),
        );
        match copy_result {
            Ok(text) => {
                app_window.set_status_message(STATUS_COPIED.into());
                tracing::info!("内容已复制到剪贴板，长度: {} 字符", text.len());
            }
            Err(e) => {
                app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
                tracing::error!("复制失败: {}", e);
            }
        }
    }

    /// 处理设置字段编辑：应用、立即持久化并刷新展示
    fn handle_setting_edited(
        app_window: &AppWindow,
        app_state: &Rc<RefCell<AppState>>,
        key: &str,
        value: &str,
    ) {
        let apply_result = app_state.borrow_mut().settings.apply_field(key, value);
        if let Err(e) = apply_result {
            app_window.set_status_message(format!("{}{}", STATUS_ERROR_PREFIX, e).into());
            tracing::warn!("设置字段应用失败: {}", e);
            return;
        }

        // 每次修改立即持久化
        if let Err(e) = app_state.borrow().settings.save() {
            app_window.set_status_message(format!("{}设置保存失败: {}", STATUS_ERROR_PREFIX, e).into());
            tracing::error!("设置保存失败: {}", e);
            return;
        }

        Self::refresh_settings_model(app_window, app_state);
        // 颜色可能已变化，刷新树的行数据
        Self::rebuild_tree_model(app_window, app_state);
        app_window.set_status_message(STATUS_SETTINGS_SAVED.into());
        tracing::info!("设置已更新并保存: {} = {}", key, value);
    }
}

fn main() {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let app = AppWindow::new().expect("UI 初始化失败");

    let mut state = AppState::default();
    state.settings = Settings::load();
    let state = Rc::new(RefCell::new(state));

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, state.clone());
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run().expect("UI 运行失败");
}
