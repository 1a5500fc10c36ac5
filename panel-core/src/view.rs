//! 记录到表格行的纯映射，不依赖任何输出介质

use crate::constants::table::{
    BACKUP_HEADERS, COLUMN_COUNT, EMPTY_BACKUPS, EMPTY_EXPORTS, EMPTY_SCHEDULES, EXPORT_HEADERS,
    SCHEDULE_HEADERS, STATUS_ACTIVE, STATUS_PAUSED,
};
use crate::format::{format_date, format_file_size, format_schedule_frequency};
use crate::models::{ArtifactRecord, Backup, Export, RecordId, Schedule};

/// 行内操作按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Download,
    Restore,
    View,
    Edit,
    /// `activate` 为点击后的目标状态
    Toggle { activate: bool },
    Delete,
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Download => "download",
            Self::Restore => "restore",
            Self::View => "view",
            Self::Edit => "edit",
            Self::Toggle { activate: true } => "resume",
            Self::Toggle { activate: false } => "pause",
            Self::Delete => "delete",
        }
    }
}

/// 表格中的一行：数据单元格 + 操作按钮
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: RecordId,
    pub cells: Vec<String>,
    pub actions: Vec<RowAction>,
}

/// 整个表格；没有记录时 `rows` 为空且带占位提示
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub headers: [&'static str; COLUMN_COUNT],
    pub rows: Vec<TableRow>,
    pub placeholder: Option<&'static str>,
}

impl TableView {
    fn build<T>(
        headers: [&'static str; COLUMN_COUNT],
        empty: &'static str,
        records: &[T],
        to_row: impl Fn(&T) -> TableRow,
    ) -> Self {
        let rows: Vec<TableRow> = records.iter().map(to_row).collect();
        let placeholder = rows.is_empty().then_some(empty);
        Self {
            headers,
            rows,
            placeholder,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn artifact_cells(record: &ArtifactRecord) -> Vec<String> {
    vec![
        record.filename.clone(),
        record.device_name.clone(),
        format_file_size(record.size),
        format_date(record.created_at.as_ref()),
        record.kind.clone(),
    ]
}

pub fn backup_row(backup: &Backup) -> TableRow {
    TableRow {
        id: backup.id.clone(),
        cells: artifact_cells(backup),
        actions: vec![RowAction::Download, RowAction::Restore, RowAction::Delete],
    }
}

pub fn export_row(export: &Export) -> TableRow {
    TableRow {
        id: export.id.clone(),
        cells: artifact_cells(export),
        actions: vec![
            RowAction::Download,
            RowAction::Restore,
            RowAction::View,
            RowAction::Delete,
        ],
    }
}

pub fn schedule_row(schedule: &Schedule) -> TableRow {
    let status = if schedule.active {
        STATUS_ACTIVE
    } else {
        STATUS_PAUSED
    };
    TableRow {
        id: schedule.id.clone(),
        cells: vec![
            schedule.name.clone(),
            schedule.device_name.clone(),
            format_schedule_frequency(schedule),
            format_date(schedule.next_run.as_ref()),
            status.to_string(),
        ],
        actions: vec![
            RowAction::Edit,
            RowAction::Toggle {
                activate: !schedule.active,
            },
            RowAction::Delete,
        ],
    }
}

pub fn backups_table(backups: &[Backup]) -> TableView {
    TableView::build(BACKUP_HEADERS, EMPTY_BACKUPS, backups, backup_row)
}

pub fn exports_table(exports: &[Export]) -> TableView {
    TableView::build(EXPORT_HEADERS, EMPTY_EXPORTS, exports, export_row)
}

pub fn schedules_table(schedules: &[Schedule]) -> TableView {
    TableView::build(SCHEDULE_HEADERS, EMPTY_SCHEDULES, schedules, schedule_row)
}
