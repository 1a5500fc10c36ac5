#![allow(dead_code)]

use async_trait::async_trait;
use panel_core::api::{ArtifactKind, BackupApi};
use panel_core::controller::{Confirm, PanelController};
use panel_core::models::{
    AnalyzeResponse, ArtifactRecord, Backup, CreateBackupRequest, CreateExportRequest, Export,
    ExportContent, MonthDay, RecordId, Schedule, ScheduleSave, ScheduleType, UploadFile,
};
use panel_core::{PanelError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// 记录下来的一次接口调用
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListBackups,
    CreateBackup(CreateBackupRequest),
    UploadBackup { file_name: String, device_id: String },
    RestoreBackup(RecordId),
    DeleteBackup(RecordId),
    ListExports,
    CreateExport(CreateExportRequest),
    ExportContent(RecordId),
    RestoreExport(RecordId),
    DeleteExport(RecordId),
    ListSchedules,
    GetSchedule(RecordId),
    SaveSchedule(ScheduleSave),
    ToggleSchedule(RecordId, bool),
    DeleteSchedule(RecordId),
    Analyze,
}

/// 预设的失败方式
#[derive(Debug, Clone)]
pub enum Failure {
    /// `success: false`
    Rejected(String),
    /// 非 2xx 状态
    Status(String),
}

impl Failure {
    fn into_error(self) -> PanelError {
        match self {
            Self::Rejected(msg) => PanelError::rejected(msg),
            Self::Status(reason) => PanelError::Api(reason),
        }
    }
}

/// 内存中的服务端，记录所有调用
#[derive(Default)]
pub struct FakeApi {
    pub backups: Mutex<Vec<Backup>>,
    pub exports: Mutex<Vec<Export>>,
    pub schedules: Mutex<Vec<Schedule>>,
    pub export_text: Mutex<String>,
    pub analyze_response: Mutex<Option<AnalyzeResponse>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, Failure>>,
    backup_gates: Mutex<VecDeque<oneshot::Receiver<Vec<Backup>>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backups(self, backups: Vec<Backup>) -> Self {
        *self.backups.lock().unwrap() = backups;
        self
    }

    pub fn with_exports(self, exports: Vec<Export>) -> Self {
        *self.exports.lock().unwrap() = exports;
        self
    }

    pub fn with_schedules(self, schedules: Vec<Schedule>) -> Self {
        *self.schedules.lock().unwrap() = schedules;
        self
    }

    /// 让指定方法失败，方法名与 trait 中一致
    pub fn fail(&self, method: &'static str, failure: Failure) {
        self.failures.lock().unwrap().insert(method, failure);
    }

    pub fn recover(&self, method: &'static str) {
        self.failures.lock().unwrap().remove(method);
    }

    /// 下一次 `list_backups` 等待返回的发送端
    pub fn gate_backups(&self) -> oneshot::Sender<Vec<Backup>> {
        let (tx, rx) = oneshot::channel();
        self.backup_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn enter(&self, method: &'static str, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(method) {
            Some(failure) => Err(failure.clone().into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BackupApi for FakeApi {
    async fn list_backups(&self) -> Result<Vec<Backup>> {
        self.enter("list_backups", Call::ListBackups)?;
        let gate = self.backup_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            return gate
                .await
                .map_err(|_| PanelError::custom("gate dropped"));
        }
        Ok(self.backups.lock().unwrap().clone())
    }

    async fn create_backup(&self, request: &CreateBackupRequest) -> Result<()> {
        self.enter("create_backup", Call::CreateBackup(request.clone()))?;
        let mut backups = self.backups.lock().unwrap();
        let id = format!("b{}", backups.len() + 1);
        backups.push(artifact(&id, &format!("{}.backup", request.name), "backup"));
        Ok(())
    }

    async fn upload_backup(&self, file: &UploadFile, device_id: &str) -> Result<()> {
        self.enter(
            "upload_backup",
            Call::UploadBackup {
                file_name: file.file_name.clone(),
                device_id: device_id.to_string(),
            },
        )?;
        let mut backups = self.backups.lock().unwrap();
        let id = format!("u{}", backups.len() + 1);
        backups.push(artifact(&id, &file.file_name, "upload"));
        Ok(())
    }

    async fn restore_backup(&self, id: &RecordId) -> Result<()> {
        self.enter("restore_backup", Call::RestoreBackup(id.clone()))
    }

    async fn delete_backup(&self, id: &RecordId) -> Result<()> {
        self.enter("delete_backup", Call::DeleteBackup(id.clone()))?;
        self.backups.lock().unwrap().retain(|b| &b.id != id);
        Ok(())
    }

    async fn list_exports(&self) -> Result<Vec<Export>> {
        self.enter("list_exports", Call::ListExports)?;
        Ok(self.exports.lock().unwrap().clone())
    }

    async fn create_export(&self, request: &CreateExportRequest) -> Result<()> {
        self.enter("create_export", Call::CreateExport(request.clone()))?;
        let mut exports = self.exports.lock().unwrap();
        let id = format!("e{}", exports.len() + 1);
        exports.push(artifact(&id, &format!("{}.json", request.name), "export"));
        Ok(())
    }

    async fn export_content(&self, id: &RecordId) -> Result<ExportContent> {
        self.enter("export_content", Call::ExportContent(id.clone()))?;
        Ok(ExportContent {
            content: self.export_text.lock().unwrap().clone(),
        })
    }

    async fn restore_export(&self, id: &RecordId) -> Result<()> {
        self.enter("restore_export", Call::RestoreExport(id.clone()))
    }

    async fn delete_export(&self, id: &RecordId) -> Result<()> {
        self.enter("delete_export", Call::DeleteExport(id.clone()))?;
        self.exports.lock().unwrap().retain(|e| &e.id != id);
        Ok(())
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.enter("list_schedules", Call::ListSchedules)?;
        Ok(self.schedules.lock().unwrap().clone())
    }

    async fn get_schedule(&self, id: &RecordId) -> Result<Schedule> {
        self.enter("get_schedule", Call::GetSchedule(id.clone()))?;
        self.schedules
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| PanelError::rejected("Không tìm thấy lịch backup"))
    }

    async fn save_schedule(&self, save: &ScheduleSave) -> Result<()> {
        self.enter("save_schedule", Call::SaveSchedule(save.clone()))
    }

    async fn toggle_schedule(&self, id: &RecordId, active: bool) -> Result<()> {
        self.enter("toggle_schedule", Call::ToggleSchedule(id.clone(), active))?;
        if let Some(schedule) = self
            .schedules
            .lock()
            .unwrap()
            .iter_mut()
            .find(|s| &s.id == id)
        {
            schedule.active = active;
        }
        Ok(())
    }

    async fn delete_schedule(&self, id: &RecordId) -> Result<()> {
        self.enter("delete_schedule", Call::DeleteSchedule(id.clone()))?;
        self.schedules.lock().unwrap().retain(|s| &s.id != id);
        Ok(())
    }

    async fn analyze(&self) -> Result<AnalyzeResponse> {
        self.enter("analyze", Call::Analyze)?;
        Ok(self
            .analyze_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(AnalyzeResponse {
                status: "success".to_string(),
                message: None,
            }))
    }

    fn download_url(&self, kind: ArtifactKind, id: &RecordId) -> String {
        match kind {
            ArtifactKind::Backup => format!("http://fake/api/backup/{id}/download"),
            ArtifactKind::Export => format!("http://fake/api/backup/export/{id}/download"),
        }
    }
}

/// 按脚本回答确认，并记录提示语
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}

pub fn controller(api: FakeApi, answer: bool) -> (PanelController<FakeApi>, Arc<ScriptedConfirm>) {
    let confirm = ScriptedConfirm::new(answer);
    (PanelController::new(api, confirm.clone()), confirm)
}

pub fn artifact(id: &str, filename: &str, kind: &str) -> ArtifactRecord {
    ArtifactRecord {
        id: RecordId::from(id),
        filename: filename.to_string(),
        device_name: "router-01".to_string(),
        size: 2048,
        created_at: None,
        kind: kind.to_string(),
    }
}

pub fn schedule(id: &str, schedule_type: ScheduleType, active: bool) -> Schedule {
    Schedule {
        id: RecordId::from(id),
        name: format!("Lịch {id}"),
        device_id: Some(RecordId::from("1")),
        device_name: "router-01".to_string(),
        schedule_type,
        time: Some("02:30".to_string()),
        weekday: Some(1),
        day: Some(MonthDay::Day(15)),
        retention: Some(10),
        include_sensitive: false,
        active,
        next_run: None,
    }
}
