/// API服务相关常量
pub mod api {
    /// 默认API服务器地址
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

    /// 覆盖服务器地址的环境变量
    pub const BASE_URL_ENV: &str = "PANEL_BASE_URL";

    /// 路径中记录ID的占位符
    pub const ID_PLACEHOLDER: &str = "{id}";

    /// API端点路径
    pub mod endpoints {
        /// 备份列表
        pub const BACKUP_LIST: &str = "/api/backup/list";

        /// 创建备份
        pub const BACKUP_CREATE: &str = "/api/backup/create";

        /// 上传备份文件（multipart）
        pub const BACKUP_UPLOAD: &str = "/api/backup/upload";

        /// 下载备份
        pub const BACKUP_DOWNLOAD: &str = "/api/backup/{id}/download";

        /// 恢复备份
        pub const BACKUP_RESTORE: &str = "/api/backup/{id}/restore";

        /// 单个备份（DELETE）
        pub const BACKUP_ITEM: &str = "/api/backup/{id}";

        /// 导出列表
        pub const EXPORT_LIST: &str = "/api/backup/exports";

        /// 创建导出
        pub const EXPORT_CREATE: &str = "/api/backup/export";

        /// 导出内容
        pub const EXPORT_CONTENT: &str = "/api/backup/export/{id}/content";

        /// 下载导出
        pub const EXPORT_DOWNLOAD: &str = "/api/backup/export/{id}/download";

        /// 应用导出
        pub const EXPORT_RESTORE: &str = "/api/backup/export/{id}/restore";

        /// 单个导出（DELETE）
        pub const EXPORT_ITEM: &str = "/api/backup/export/{id}";

        /// 定时计划列表
        pub const SCHEDULE_LIST: &str = "/api/backup/schedules";

        /// 创建定时计划
        pub const SCHEDULE_CREATE: &str = "/api/backup/schedule";

        /// 单个定时计划（GET / PUT / DELETE）
        pub const SCHEDULE_ITEM: &str = "/api/backup/schedule/{id}";

        /// 启用/暂停定时计划
        pub const SCHEDULE_TOGGLE: &str = "/api/backup/schedule/{id}/toggle";

        /// 仓库分析
        pub const ANALYZE: &str = "/analyze";
    }

    /// HTTP相关常量
    pub mod http {
        /// User-Agent头
        pub const USER_AGENT: &str = "panel-cli/0.1";

        /// 上传表单中的文件字段
        pub const UPLOAD_FILE_FIELD: &str = "file";

        /// 上传表单中的设备字段
        pub const UPLOAD_DEVICE_FIELD: &str = "deviceId";
    }
}

/// 配置文件相关常量
pub mod config {
    use std::path::{Path, PathBuf};

    /// 默认配置文件名
    pub const CONFIG_FILE_NAME: &str = "panel.toml";

    /// 按优先级查找的配置文件
    pub const CONFIG_SEARCH_FILES: [&str; 3] = ["panel.toml", "backup-panel.toml", ".backup-panel.toml"];

    /// 默认下载目录名
    pub const DOWNLOAD_DIR_NAME: &str = "downloads";

    /// 获取默认配置文件路径
    pub fn get_config_file_path() -> PathBuf {
        Path::new(".").join(CONFIG_FILE_NAME)
    }

    /// 获取默认下载目录
    pub fn get_default_download_dir() -> PathBuf {
        Path::new(".").join(DOWNLOAD_DIR_NAME)
    }
}

/// 日志相关常量
pub mod logging {
    /// 默认日志级别
    pub const DEFAULT_LOG_LEVEL: &str = "info";

    /// 详细模式日志级别
    pub const VERBOSE_LOG_LEVEL: &str = "debug";

    /// 日志文件环境变量
    pub const LOG_FILE_ENV: &str = "PANEL_LOG_FILE";
}

/// 通知相关常量
pub mod notification {
    /// 通知自动消失时间（毫秒）
    pub const AUTO_DISMISS_MS: u64 = 5000;
}

/// 定时计划表单相关常量
pub mod schedule {
    /// 默认执行时间
    pub const DEFAULT_TIME: &str = "00:00";

    /// 默认保留份数
    pub const DEFAULT_RETENTION: u32 = 7;

    /// 默认每月执行日
    pub const DEFAULT_MONTH_DAY: u8 = 1;

    /// "每月最后一天" 的哨兵值
    pub const LAST_DAY: &str = "last";

    /// 星期标签，下标 0 为星期日
    pub const WEEKDAY_LABELS: [&str; 7] = [
        "Chủ Nhật",
        "Thứ Hai",
        "Thứ Ba",
        "Thứ Tư",
        "Thứ Năm",
        "Thứ Sáu",
        "Thứ Bảy",
    ];

    /// 新增对话框标题
    pub const ADD_TITLE: &str = "Thêm Lịch Backup";

    /// 编辑对话框标题
    pub const EDIT_TITLE: &str = "Chỉnh Sửa Lịch Backup";
}

/// 表格相关常量
pub mod table {
    /// 每个表格的列数（含操作列）
    pub const COLUMN_COUNT: usize = 6;

    pub const BACKUP_HEADERS: [&str; COLUMN_COUNT] =
        ["Tên file", "Thiết bị", "Kích thước", "Ngày tạo", "Loại", "Thao tác"];

    pub const EXPORT_HEADERS: [&str; COLUMN_COUNT] =
        ["Tên file", "Thiết bị", "Kích thước", "Ngày tạo", "Loại", "Thao tác"];

    pub const SCHEDULE_HEADERS: [&str; COLUMN_COUNT] =
        ["Tên", "Thiết bị", "Tần suất", "Lần chạy tiếp", "Trạng thái", "Thao tác"];

    pub const EMPTY_BACKUPS: &str = "Không có backup nào";
    pub const EMPTY_EXPORTS: &str = "Không có export nào";
    pub const EMPTY_SCHEDULES: &str = "Không có lịch backup nào";

    pub const STATUS_ACTIVE: &str = "Đang hoạt động";
    pub const STATUS_PAUSED: &str = "Tạm dừng";
}
