//! 资源面板控制器
//!
//! 把备份、导出、计划三张表的操作串起来：请求前显示忙碌指示，
//! 结束后清除；每个终态产生一条通知；破坏性操作先经过确认。

mod operation;
mod state;

pub use operation::Operation;
pub use state::{AnalyzeState, Dialogs, PanelState, ResourceKind};

use crate::api::{ArtifactKind, BackupApi};
use crate::busy::BusyIndicator;
use crate::error::Result;
use crate::form::{ScheduleDialog, ScheduleForm, UploadForm, UploadIssue};
use crate::models::{
    CreateBackupRequest, CreateExportRequest, ExportContent, RecordId, ScheduleType,
};
use crate::notification::{Notification, NotificationKind};
use crate::view::TableView;
use state::LoadTickets;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// 破坏性操作前的是/否确认
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// 总是同意（命令行 `--yes`）
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// 操作的非错误结局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// 用户取消了确认，没有发出请求
    Declined,
    /// 上传前校验未通过，没有发出请求
    Incomplete(UploadIssue),
}

pub struct PanelController<A: BackupApi> {
    api: Arc<A>,
    confirm: Arc<dyn Confirm>,
    state: Arc<RwLock<PanelState>>,
    busy: BusyIndicator,
    tickets: Arc<LoadTickets>,
}

impl<A: BackupApi> Clone for PanelController<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            confirm: self.confirm.clone(),
            state: self.state.clone(),
            busy: self.busy.clone(),
            tickets: self.tickets.clone(),
        }
    }
}

impl<A: BackupApi> PanelController<A> {
    pub fn new(api: A, confirm: Arc<dyn Confirm>) -> Self {
        Self::with_shared_api(Arc::new(api), confirm)
    }

    pub fn with_shared_api(api: Arc<A>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            confirm,
            state: Arc::new(RwLock::new(PanelState::default())),
            busy: BusyIndicator::new(),
            tickets: Arc::new(LoadTickets::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn busy(&self) -> &BusyIndicator {
        &self.busy
    }

    /// 执行一次网络调用：持有忙碌指示直到调用结束，失败时推送错误通知
    async fn run<T, F>(&self, op: Operation, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let _busy = self.busy.show();
        match call.await {
            Ok(value) => Ok(value),
            Err(err) => {
                let message = op.failure_message(&err);
                warn!(operation = ?op, error = %err, "操作失败");
                self.notify(NotificationKind::Error, message).await;
                Err(err)
            }
        }
    }

    async fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        self.state.write().await.notifications.push(kind, message);
    }

    async fn notify_success(&self, op: Operation) {
        if let Some(message) = op.success_message() {
            info!("{}", message);
            self.notify(NotificationKind::Success, message).await;
        }
    }

    /// 操作成功后的刷新；刷新失败已由 `load` 自行通知
    async fn reload(&self, kind: ResourceKind) {
        if let Err(e) = self.load(kind).await {
            debug!(kind = ?kind, error = %e, "刷新列表失败");
        }
    }

    fn confirmed(&self, op: Operation) -> bool {
        match op.confirm_prompt() {
            Some(prompt) => {
                let accepted = self.confirm.confirm(prompt);
                if !accepted {
                    info!(operation = ?op, "用户取消了操作");
                }
                accepted
            }
            None => true,
        }
    }

    /// 拉取整个集合并替换表格；较早发出的请求晚到时丢弃其结果
    #[instrument(skip(self))]
    pub async fn load(&self, kind: ResourceKind) -> Result<Outcome> {
        let ticket = self.tickets.issue(kind);
        match kind {
            ResourceKind::Backup => {
                let items = self.run(Operation::LoadBackups, self.api.list_backups()).await?;
                self.apply_load(kind, ticket, |state| state.backups = items)
                    .await;
            }
            ResourceKind::Export => {
                let items = self.run(Operation::LoadExports, self.api.list_exports()).await?;
                self.apply_load(kind, ticket, |state| state.exports = items)
                    .await;
            }
            ResourceKind::Schedule => {
                let items = self
                    .run(Operation::LoadSchedules, self.api.list_schedules())
                    .await?;
                self.apply_load(kind, ticket, |state| state.schedules = items)
                    .await;
            }
        }
        Ok(Outcome::Done)
    }

    async fn apply_load(&self, kind: ResourceKind, ticket: u64, apply: impl FnOnce(&mut PanelState)) {
        let mut state = self.state.write().await;
        if self.tickets.is_current(kind, ticket) {
            apply(&mut state);
        } else {
            debug!(kind = ?kind, ticket, "丢弃过期的加载结果");
        }
    }

    pub async fn load_all(&self) {
        let _ = tokio::join!(
            self.load(ResourceKind::Backup),
            self.load(ResourceKind::Export),
            self.load(ResourceKind::Schedule),
        );
    }

    #[instrument(skip(self))]
    pub async fn create_backup(&self, request: CreateBackupRequest) -> Result<Outcome> {
        let op = Operation::CreateBackup;
        self.run(op, self.api.create_backup(&request)).await?;
        self.notify_success(op).await;
        self.state.write().await.dialogs.create_backup = false;
        self.reload(ResourceKind::Backup).await;
        Ok(Outcome::Done)
    }

    #[instrument(skip(self))]
    pub async fn create_export(&self, request: CreateExportRequest) -> Result<Outcome> {
        let op = Operation::CreateExport;
        self.run(op, self.api.create_export(&request)).await?;
        self.notify_success(op).await;
        self.state.write().await.dialogs.create_export = false;
        self.reload(ResourceKind::Export).await;
        Ok(Outcome::Done)
    }

    /// 先检查文件再检查设备，任一缺失只给出警告
    #[instrument(skip(self, form))]
    pub async fn upload_backup(&self, form: UploadForm) -> Result<Outcome> {
        let (file, device_id) = match form.validate() {
            Ok(ready) => ready,
            Err(issue) => {
                warn!("{}", issue.message());
                self.notify(NotificationKind::Warning, issue.message()).await;
                return Ok(Outcome::Incomplete(issue));
            }
        };

        let op = Operation::UploadBackup;
        info!(file = %file.file_name, size = file.bytes.len(), "上传备份文件");
        self.run(op, self.api.upload_backup(file, device_id)).await?;
        self.notify_success(op).await;
        self.state.write().await.dialogs.upload_backup = false;
        self.reload(ResourceKind::Backup).await;
        Ok(Outcome::Done)
    }

    /// 恢复成功后不刷新列表
    #[instrument(skip(self))]
    pub async fn restore(&self, kind: ArtifactKind, id: &RecordId) -> Result<Outcome> {
        let op = match kind {
            ArtifactKind::Backup => Operation::RestoreBackup,
            ArtifactKind::Export => Operation::RestoreExport,
        };
        if !self.confirmed(op) {
            return Ok(Outcome::Declined);
        }
        let call = match kind {
            ArtifactKind::Backup => self.api.restore_backup(id),
            ArtifactKind::Export => self.api.restore_export(id),
        };
        self.run(op, call).await?;
        self.notify_success(op).await;
        Ok(Outcome::Done)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, kind: ResourceKind, id: &RecordId) -> Result<Outcome> {
        let op = match kind {
            ResourceKind::Backup => Operation::DeleteBackup,
            ResourceKind::Export => Operation::DeleteExport,
            ResourceKind::Schedule => Operation::DeleteSchedule,
        };
        if !self.confirmed(op) {
            return Ok(Outcome::Declined);
        }
        let call = match kind {
            ResourceKind::Backup => self.api.delete_backup(id),
            ResourceKind::Export => self.api.delete_export(id),
            ResourceKind::Schedule => self.api.delete_schedule(id),
        };
        self.run(op, call).await?;
        self.notify_success(op).await;
        self.reload(kind).await;
        Ok(Outcome::Done)
    }

    /// 只给出下载地址，字节传输由调用方处理
    pub fn download(&self, kind: ArtifactKind, id: &RecordId) -> String {
        self.api.download_url(kind, id)
    }

    #[instrument(skip(self))]
    pub async fn view_export(&self, id: &RecordId) -> Result<Outcome> {
        let content = self
            .run(Operation::ViewExport, self.api.export_content(id))
            .await?;
        self.state.write().await.export_viewer = Some(content);
        Ok(Outcome::Done)
    }

    pub async fn close_export_viewer(&self) {
        self.state.write().await.export_viewer = None;
    }

    pub async fn open_create_backup(&self) {
        self.state.write().await.dialogs.create_backup = true;
    }

    pub async fn close_create_backup(&self) {
        self.state.write().await.dialogs.create_backup = false;
    }

    pub async fn open_create_export(&self) {
        self.state.write().await.dialogs.create_export = true;
    }

    pub async fn close_create_export(&self) {
        self.state.write().await.dialogs.create_export = false;
    }

    pub async fn open_upload_backup(&self) {
        self.state.write().await.dialogs.upload_backup = true;
    }

    pub async fn close_upload_backup(&self) {
        self.state.write().await.dialogs.upload_backup = false;
    }

    /// 以新建模式打开计划对话框，表单重置为默认值
    pub async fn open_add_schedule(&self) {
        let mut dialog = ScheduleDialog::for_create();
        dialog.open = true;
        self.state.write().await.schedule_dialog = dialog;
    }

    /// 拉取单条计划并以编辑模式打开对话框
    #[instrument(skip(self))]
    pub async fn edit_schedule(&self, id: &RecordId) -> Result<Outcome> {
        let schedule = self
            .run(Operation::EditSchedule, self.api.get_schedule(id))
            .await?;
        let mut dialog = ScheduleDialog::for_edit(&schedule);
        dialog.open = true;
        self.state.write().await.schedule_dialog = dialog;
        Ok(Outcome::Done)
    }

    pub async fn close_schedule_dialog(&self) {
        self.state.write().await.schedule_dialog.open = false;
    }

    pub async fn set_schedule_type(&self, schedule_type: ScheduleType) {
        self.state
            .write()
            .await
            .schedule_dialog
            .set_schedule_type(schedule_type);
    }

    /// 修改表单字段；类型变化时重新推导可见性
    pub async fn update_schedule_form(&self, edit: impl FnOnce(&mut ScheduleForm)) {
        let mut state = self.state.write().await;
        edit(&mut state.schedule_dialog.form);
        state.schedule_dialog.refresh_visibility();
    }

    /// 按对话框打开方式新建或更新
    #[instrument(skip(self))]
    pub async fn save_schedule(&self) -> Result<Outcome> {
        let save = self.state.read().await.schedule_dialog.to_save();
        let op = Operation::SaveSchedule;
        self.run(op, self.api.save_schedule(&save)).await?;
        self.notify_success(op).await;
        self.state.write().await.schedule_dialog.open = false;
        self.reload(ResourceKind::Schedule).await;
        Ok(Outcome::Done)
    }

    #[instrument(skip(self))]
    pub async fn toggle_schedule(&self, id: &RecordId, active: bool) -> Result<Outcome> {
        let op = Operation::ToggleSchedule { activate: active };
        self.run(op, self.api.toggle_schedule(id, active)).await?;
        self.notify_success(op).await;
        self.reload(ResourceKind::Schedule).await;
        Ok(Outcome::Done)
    }

    /// 分析结果只反映在 [`AnalyzeState`] 上，不产生通知
    #[instrument(skip(self))]
    pub async fn analyze(&self) -> AnalyzeState {
        self.state.write().await.analyze = AnalyzeState::Loading;
        let result = {
            let _busy = self.busy.show();
            self.api.analyze().await
        };

        let next = match result {
            Ok(response) if response.status == "error" => {
                AnalyzeState::Failed(response.message.unwrap_or_default())
            }
            Ok(_) => AnalyzeState::Succeeded,
            Err(e) => AnalyzeState::Failed(format!("An unexpected error occurred: {}", e.reason())),
        };
        debug!(state = ?next, "分析完成");
        self.state.write().await.analyze = next.clone();
        next
    }

    pub async fn snapshot(&self) -> PanelState {
        self.state.read().await.clone()
    }

    pub async fn table(&self, kind: ResourceKind) -> TableView {
        self.state.read().await.table(kind)
    }

    pub async fn dialogs(&self) -> Dialogs {
        self.state.read().await.dialogs
    }

    pub async fn schedule_dialog(&self) -> ScheduleDialog {
        self.state.read().await.schedule_dialog.clone()
    }

    pub async fn export_viewer(&self) -> Option<ExportContent> {
        self.state.read().await.export_viewer.clone()
    }

    pub async fn analyze_state(&self) -> AnalyzeState {
        self.state.read().await.analyze.clone()
    }

    /// 当前仍可见的通知
    pub async fn notifications(&self) -> Vec<Notification> {
        let mut state = self.state.write().await;
        state.notifications.prune(Instant::now());
        state.notifications.visible(Instant::now()).into_iter().cloned().collect()
    }

    pub async fn dismiss_notification(&self, id: u64) -> bool {
        self.state.write().await.notifications.dismiss(id)
    }

    /// 取走所有通知（命令行输出到日志）
    pub async fn drain_notifications(&self) -> Vec<Notification> {
        self.state.write().await.notifications.drain()
    }
}
