use crate::error::PanelError;

/// 面板上会产生通知的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadBackups,
    LoadExports,
    LoadSchedules,
    CreateBackup,
    CreateExport,
    UploadBackup,
    ViewExport,
    RestoreBackup,
    RestoreExport,
    DeleteBackup,
    DeleteExport,
    EditSchedule,
    SaveSchedule,
    ToggleSchedule { activate: bool },
    DeleteSchedule,
}

impl Operation {
    /// 失败提示中的动作描述
    fn subject(&self) -> &'static str {
        match self {
            Self::LoadBackups => "tải danh sách backup",
            Self::LoadExports => "tải danh sách export",
            Self::LoadSchedules => "tải danh sách lịch backup",
            Self::CreateBackup => "tạo backup",
            Self::CreateExport => "tạo export",
            Self::UploadBackup => "upload backup",
            Self::ViewExport => "xem nội dung export",
            Self::RestoreBackup => "khôi phục backup",
            Self::RestoreExport => "áp dụng export",
            Self::DeleteBackup => "xóa backup",
            Self::DeleteExport => "xóa export",
            Self::EditSchedule => "tải thông tin lịch",
            Self::SaveSchedule => "lưu lịch backup",
            Self::ToggleSchedule { .. } => "thay đổi trạng thái lịch",
            Self::DeleteSchedule => "xóa lịch backup",
        }
    }

    /// 加载、查看、编辑成功时没有通知
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Self::LoadBackups
            | Self::LoadExports
            | Self::LoadSchedules
            | Self::ViewExport
            | Self::EditSchedule => None,
            Self::CreateBackup => Some("Đã tạo backup thành công"),
            Self::CreateExport => Some("Đã tạo export thành công"),
            Self::UploadBackup => Some("Đã upload backup thành công"),
            Self::RestoreBackup => Some("Đã khôi phục backup thành công"),
            Self::RestoreExport => Some("Đã áp dụng export thành công"),
            Self::DeleteBackup => Some("Đã xóa backup thành công"),
            Self::DeleteExport => Some("Đã xóa export thành công"),
            Self::SaveSchedule => Some("Đã lưu lịch backup thành công"),
            Self::ToggleSchedule { activate: true } => Some("Đã kích hoạt lịch backup"),
            Self::ToggleSchedule { activate: false } => Some("Đã tạm dừng lịch backup"),
            Self::DeleteSchedule => Some("Đã xóa lịch backup thành công"),
        }
    }

    /// 业务失败用 "Không thể"，传输失败用 "Lỗi khi"
    pub fn failure_message(&self, err: &PanelError) -> String {
        let prefix = if err.is_rejected() {
            "Không thể"
        } else {
            "Lỗi khi"
        };
        format!("{} {}: {}", prefix, self.subject(), err.reason())
    }

    /// 需要用户确认的操作
    pub fn confirm_prompt(&self) -> Option<&'static str> {
        match self {
            Self::RestoreBackup => Some("Bạn có chắc chắn muốn khôi phục backup này không?"),
            Self::RestoreExport => Some("Bạn có chắc chắn muốn áp dụng export này không?"),
            Self::DeleteBackup => Some("Bạn có chắc chắn muốn xóa backup này không?"),
            Self::DeleteExport => Some("Bạn có chắc chắn muốn xóa export này không?"),
            Self::DeleteSchedule => Some("Bạn có chắc chắn muốn xóa lịch backup này không?"),
            _ => None,
        }
    }
}
