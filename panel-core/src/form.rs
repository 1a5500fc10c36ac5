//! 对话框表单状态

use crate::constants::schedule::{
    ADD_TITLE, DEFAULT_RETENTION, DEFAULT_TIME, EDIT_TITLE,
};
use crate::models::{
    MonthDay, RecordId, Schedule, ScheduleRequest, ScheduleSave, ScheduleType, UploadFile,
};

/// 计划对话框中可切换的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldVisibility {
    pub weekday: bool,
    pub month_day: bool,
}

impl ScheduleType {
    /// 由计划类型推导字段可见性：weekly 只显示星期，monthly 只显示日期，daily 都隐藏
    pub fn visibility(&self) -> FieldVisibility {
        match self {
            Self::Daily => FieldVisibility::default(),
            Self::Weekly => FieldVisibility {
                weekday: true,
                month_day: false,
            },
            Self::Monthly => FieldVisibility {
                weekday: false,
                month_day: true,
            },
        }
    }
}

/// 计划表单的输入值（与界面控件一一对应）
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleForm {
    pub name: String,
    pub device_id: String,
    pub schedule_type: ScheduleType,
    pub time: String,
    pub weekday: u8,
    pub day: MonthDay,
    pub retention: u32,
    pub include_sensitive: bool,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            device_id: String::new(),
            schedule_type: ScheduleType::Daily,
            time: DEFAULT_TIME.to_string(),
            weekday: 0,
            day: MonthDay::default(),
            retention: DEFAULT_RETENTION,
            include_sensitive: false,
        }
    }
}

impl ScheduleForm {
    /// 用已有计划填充表单；与类型无关的字段保持默认值
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let defaults = Self::default();
        Self {
            name: schedule.name.clone(),
            device_id: schedule
                .device_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            schedule_type: schedule.schedule_type,
            time: schedule.time.clone().unwrap_or(defaults.time),
            weekday: match schedule.schedule_type {
                ScheduleType::Weekly => schedule.weekday.unwrap_or(defaults.weekday),
                _ => defaults.weekday,
            },
            day: match schedule.schedule_type {
                ScheduleType::Monthly => schedule.day.unwrap_or(defaults.day),
                _ => defaults.day,
            },
            retention: schedule.retention.unwrap_or(defaults.retention),
            include_sensitive: schedule.include_sensitive,
        }
    }

    /// 只提交当前类型对应的字段
    pub fn to_request(&self) -> ScheduleRequest {
        let visibility = self.schedule_type.visibility();
        ScheduleRequest {
            name: self.name.clone(),
            device_id: self.device_id.clone(),
            schedule_type: self.schedule_type,
            time: self.time.clone(),
            retention: self.retention,
            include_sensitive: self.include_sensitive,
            weekday: visibility.weekday.then_some(self.weekday),
            day: visibility.month_day.then_some(self.day),
        }
    }
}

/// 对话框打开方式决定保存时是新建还是更新
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScheduleFormMode {
    #[default]
    Create,
    Edit(RecordId),
}

/// 计划对话框
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDialog {
    pub open: bool,
    pub title: &'static str,
    pub mode: ScheduleFormMode,
    pub form: ScheduleForm,
    pub visibility: FieldVisibility,
}

impl Default for ScheduleDialog {
    fn default() -> Self {
        Self::for_create()
    }
}

impl ScheduleDialog {
    /// 新增：表单重置为默认值
    pub fn for_create() -> Self {
        let form = ScheduleForm::default();
        Self {
            open: false,
            title: ADD_TITLE,
            mode: ScheduleFormMode::Create,
            visibility: form.schedule_type.visibility(),
            form,
        }
    }

    /// 编辑：表单由服务端记录填充
    pub fn for_edit(schedule: &Schedule) -> Self {
        let form = ScheduleForm::from_schedule(schedule);
        Self {
            open: false,
            title: EDIT_TITLE,
            mode: ScheduleFormMode::Edit(schedule.id.clone()),
            visibility: form.schedule_type.visibility(),
            form,
        }
    }

    /// 类型下拉框变化
    pub fn set_schedule_type(&mut self, schedule_type: ScheduleType) {
        self.form.schedule_type = schedule_type;
        self.refresh_visibility();
    }

    /// 从当前选择重新推导可见性（打开对话框时也会调用一次）
    pub fn refresh_visibility(&mut self) {
        self.visibility = self.form.schedule_type.visibility();
    }

    pub fn to_save(&self) -> ScheduleSave {
        let request = self.form.to_request();
        match &self.mode {
            ScheduleFormMode::Create => ScheduleSave::Create(request),
            ScheduleFormMode::Edit(id) => ScheduleSave::Update(id.clone(), request),
        }
    }
}

/// 上传对话框的输入
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file: Option<UploadFile>,
    pub device_id: Option<String>,
}

/// 上传前的本地校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadIssue {
    MissingFile,
    MissingDevice,
}

impl UploadIssue {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFile => "Vui lòng chọn file backup",
            Self::MissingDevice => "Vui lòng chọn thiết bị",
        }
    }
}

impl UploadForm {
    pub fn new(file: Option<UploadFile>, device_id: Option<String>) -> Self {
        Self { file, device_id }
    }

    /// 先检查文件再检查设备
    pub fn validate(&self) -> Result<(&UploadFile, &str), UploadIssue> {
        let file = self.file.as_ref().ok_or(UploadIssue::MissingFile)?;
        let device_id = self
            .device_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(UploadIssue::MissingDevice)?;
        Ok((file, device_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(schedule_type: ScheduleType) -> Schedule {
        Schedule {
            id: RecordId::from("s9"),
            name: "Cuối tháng".to_string(),
            device_id: Some(RecordId::from("4")),
            device_name: "edge".to_string(),
            schedule_type,
            time: Some("23:00".to_string()),
            weekday: Some(3),
            day: Some(MonthDay::Last),
            retention: Some(12),
            include_sensitive: true,
            active: false,
            next_run: None,
        }
    }

    #[test]
    fn test_visibility_state_machine() {
        let mut dialog = ScheduleDialog::for_create();
        assert_eq!(dialog.visibility, FieldVisibility::default());

        dialog.set_schedule_type(ScheduleType::Weekly);
        assert!(dialog.visibility.weekday);
        assert!(!dialog.visibility.month_day);

        dialog.set_schedule_type(ScheduleType::Monthly);
        assert!(!dialog.visibility.weekday);
        assert!(dialog.visibility.month_day);

        dialog.set_schedule_type(ScheduleType::Daily);
        assert!(!dialog.visibility.weekday);
        assert!(!dialog.visibility.month_day);
    }

    #[test]
    fn test_create_dialog_saves_as_create() {
        let mut dialog = ScheduleDialog::for_create();
        dialog.form.name = "Đêm".to_string();
        dialog.form.device_id = "1".to_string();
        assert_eq!(dialog.title, "Thêm Lịch Backup");

        match dialog.to_save() {
            ScheduleSave::Create(request) => {
                assert_eq!(request.name, "Đêm");
                assert_eq!(request.weekday, None);
                assert_eq!(request.day, None);
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_dialog_saves_as_update() {
        let dialog = ScheduleDialog::for_edit(&schedule(ScheduleType::Monthly));
        assert_eq!(dialog.title, "Chỉnh Sửa Lịch Backup");
        assert!(dialog.visibility.month_day);

        match dialog.to_save() {
            ScheduleSave::Update(id, request) => {
                assert_eq!(id.as_str(), "s9");
                assert_eq!(request.day, Some(MonthDay::Last));
                assert_eq!(request.weekday, None);
                assert_eq!(request.retention, 12);
                assert!(request.include_sensitive);
            }
            other => panic!("expected update, got {other:?}"),
        }
    }

    #[test]
    fn test_request_only_carries_field_of_current_type() {
        let mut form = ScheduleForm::from_schedule(&schedule(ScheduleType::Weekly));
        assert_eq!(form.weekday, 3);
        assert_eq!(form.to_request().weekday, Some(3));
        assert_eq!(form.to_request().day, None);

        form.schedule_type = ScheduleType::Daily;
        let request = form.to_request();
        assert_eq!(request.weekday, None);
        assert_eq!(request.day, None);
    }

    #[test]
    fn test_upload_validation_order() {
        let empty = UploadForm::default();
        assert_eq!(empty.validate().unwrap_err(), UploadIssue::MissingFile);

        let no_device = UploadForm::new(Some(UploadFile::new("a.backup", vec![1])), Some("  ".into()));
        assert_eq!(no_device.validate().unwrap_err(), UploadIssue::MissingDevice);

        let no_file = UploadForm::new(None, Some("1".into()));
        assert_eq!(no_file.validate().unwrap_err(), UploadIssue::MissingFile);

        let ready = UploadForm::new(Some(UploadFile::new("a.backup", vec![1])), Some("1".into()));
        let (file, device) = ready.validate().unwrap();
        assert_eq!(file.file_name, "a.backup");
        assert_eq!(device, "1");
    }
}
