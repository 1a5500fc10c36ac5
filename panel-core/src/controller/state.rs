use crate::form::ScheduleDialog;
use crate::models::{Backup, Export, ExportContent, Schedule};
use crate::notification::NotificationCenter;
use crate::view::{self, TableView};
use std::sync::atomic::{AtomicU64, Ordering};

/// 面板管理的三类资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Backup,
    Export,
    Schedule,
}

impl ResourceKind {
    fn index(self) -> usize {
        match self {
            Self::Backup => 0,
            Self::Export => 1,
            Self::Schedule => 2,
        }
    }
}

/// 简单对话框的打开状态（计划对话框见 [`ScheduleDialog`]）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dialogs {
    pub create_backup: bool,
    pub create_export: bool,
    pub upload_backup: bool,
}

/// 分析按钮的状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnalyzeState {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Succeeded,
}

/// 整个面板页面的状态
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub backups: Vec<Backup>,
    pub exports: Vec<Export>,
    pub schedules: Vec<Schedule>,
    pub dialogs: Dialogs,
    pub schedule_dialog: ScheduleDialog,
    pub export_viewer: Option<ExportContent>,
    pub notifications: NotificationCenter,
    pub analyze: AnalyzeState,
}

impl PanelState {
    pub fn table(&self, kind: ResourceKind) -> TableView {
        match kind {
            ResourceKind::Backup => view::backups_table(&self.backups),
            ResourceKind::Export => view::exports_table(&self.exports),
            ResourceKind::Schedule => view::schedules_table(&self.schedules),
        }
    }
}

/// 每类资源的加载序号，只有最新一次加载的结果会被应用
#[derive(Debug, Default)]
pub(crate) struct LoadTickets {
    latest: [AtomicU64; 3],
}

impl LoadTickets {
    pub(crate) fn issue(&self, kind: ResourceKind) -> u64 {
        self.latest[kind.index()].fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, kind: ResourceKind, ticket: u64) -> bool {
        self.latest[kind.index()].load(Ordering::SeqCst) == ticket
    }
}
