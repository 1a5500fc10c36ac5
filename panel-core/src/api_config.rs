//! API配置模块 - 备份面板服务端端点配置

use crate::constants::api;
use crate::models::RecordId;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 路径段中保留原样的字符（RFC 3986 unreserved）
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// API端点配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoints {
    pub backup_list: String,
    pub backup_create: String,
    pub backup_upload: String,
    pub backup_download: String,
    pub backup_restore: String,
    pub backup_item: String,
    pub export_list: String,
    pub export_create: String,
    pub export_content: String,
    pub export_download: String,
    pub export_restore: String,
    pub export_item: String,
    pub schedule_list: String,
    pub schedule_create: String,
    pub schedule_item: String,
    pub schedule_toggle: String,
    /// 仓库分析端点
    pub analyze: String,
}

/// API配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 基础URL
    pub base_url: String,
    /// API端点
    pub endpoints: ApiEndpoints,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        use api::endpoints::*;
        Self {
            backup_list: BACKUP_LIST.to_string(),
            backup_create: BACKUP_CREATE.to_string(),
            backup_upload: BACKUP_UPLOAD.to_string(),
            backup_download: BACKUP_DOWNLOAD.to_string(),
            backup_restore: BACKUP_RESTORE.to_string(),
            backup_item: BACKUP_ITEM.to_string(),
            export_list: EXPORT_LIST.to_string(),
            export_create: EXPORT_CREATE.to_string(),
            export_content: EXPORT_CONTENT.to_string(),
            export_download: EXPORT_DOWNLOAD.to_string(),
            export_restore: EXPORT_RESTORE.to_string(),
            export_item: EXPORT_ITEM.to_string(),
            schedule_list: SCHEDULE_LIST.to_string(),
            schedule_create: SCHEDULE_CREATE.to_string(),
            schedule_item: SCHEDULE_ITEM.to_string(),
            schedule_toggle: SCHEDULE_TOGGLE.to_string(),
            analyze: ANALYZE.to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base_url(api::DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    /// 使用指定服务器地址创建配置（去掉末尾的 `/`）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: ApiEndpoints::default(),
        }
    }

    /// 获取完整的端点URL
    pub fn get_endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// 获取带记录ID的完整URL（替换 `{id}` 占位符，ID 按单个路径段编码）
    pub fn get_item_url(&self, endpoint: &str, id: &RecordId) -> String {
        let segment = utf8_percent_encode(id.as_str(), PATH_SEGMENT_ENCODE_SET).to_string();
        self.get_endpoint_url(&endpoint.replace(api::ID_PLACEHOLDER, &segment))
    }

    pub fn backup_list_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.backup_list)
    }

    pub fn backup_create_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.backup_create)
    }

    pub fn backup_upload_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.backup_upload)
    }

    pub fn backup_download_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.backup_download, id)
    }

    pub fn backup_restore_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.backup_restore, id)
    }

    pub fn backup_item_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.backup_item, id)
    }

    pub fn export_list_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.export_list)
    }

    pub fn export_create_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.export_create)
    }

    pub fn export_content_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.export_content, id)
    }

    pub fn export_download_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.export_download, id)
    }

    pub fn export_restore_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.export_restore, id)
    }

    pub fn export_item_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.export_item, id)
    }

    pub fn schedule_list_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.schedule_list)
    }

    pub fn schedule_create_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.schedule_create)
    }

    pub fn schedule_item_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.schedule_item, id)
    }

    pub fn schedule_toggle_url(&self, id: &RecordId) -> String {
        self.get_item_url(&self.endpoints.schedule_toggle, id)
    }

    pub fn analyze_url(&self) -> String {
        self.get_endpoint_url(&self.endpoints.analyze)
    }

    /// 获取所有端点信息，用于CLI帮助显示
    pub fn get_endpoints_info(&self) -> Vec<(&str, String)> {
        vec![
            ("服务器地址", self.base_url.clone()),
            ("备份列表", self.backup_list_url()),
            ("创建备份", self.backup_create_url()),
            ("上传备份", self.backup_upload_url()),
            ("导出列表", self.export_list_url()),
            ("创建导出", self.export_create_url()),
            ("定时计划列表", self.schedule_list_url()),
            ("创建定时计划", self.schedule_create_url()),
            ("仓库分析", self.analyze_url()),
        ]
    }
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "当前API配置:")?;
        writeln!(f, "服务器地址: {}", self.base_url)?;
        writeln!(f, "\n主要端点:")?;
        for (name, url) in self.get_endpoints_info() {
            writeln!(f, "  {name}: {url}")?;
        }
        Ok(())
    }
}
