use crate::api_config::ApiConfig;
use crate::config::AppConfig;
use crate::constants::api::http;
use crate::error::{PanelError, Result};
use crate::models::{
    AnalyzeResponse, Backup, CreateBackupRequest, CreateExportRequest, Envelope, Export,
    ExportContent, RecordId, Schedule, ScheduleSave, ToggleRequest, UploadFile,
};
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info, warn};

/// 可下载的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Backup,
    Export,
}

/// 备份面板服务端接口
///
/// 除下载外，所有调用都读取 `{success, data, error}` 信封：
/// 非 2xx 状态返回 [`PanelError::Api`]，`success: false` 返回 [`PanelError::Rejected`]。
#[async_trait]
pub trait BackupApi: Send + Sync {
    async fn list_backups(&self) -> Result<Vec<Backup>>;

    async fn create_backup(&self, request: &CreateBackupRequest) -> Result<()>;

    /// multipart 上传：`file` + `deviceId`
    async fn upload_backup(&self, file: &UploadFile, device_id: &str) -> Result<()>;

    async fn restore_backup(&self, id: &RecordId) -> Result<()>;

    async fn delete_backup(&self, id: &RecordId) -> Result<()>;

    async fn list_exports(&self) -> Result<Vec<Export>>;

    async fn create_export(&self, request: &CreateExportRequest) -> Result<()>;

    async fn export_content(&self, id: &RecordId) -> Result<ExportContent>;

    async fn restore_export(&self, id: &RecordId) -> Result<()>;

    async fn delete_export(&self, id: &RecordId) -> Result<()>;

    async fn list_schedules(&self) -> Result<Vec<Schedule>>;

    async fn get_schedule(&self, id: &RecordId) -> Result<Schedule>;

    /// Create -> POST 集合路径，Update -> PUT 带ID的路径
    async fn save_schedule(&self, save: &ScheduleSave) -> Result<()>;

    async fn toggle_schedule(&self, id: &RecordId, active: bool) -> Result<()>;

    async fn delete_schedule(&self, id: &RecordId) -> Result<()>;

    /// `/analyze` 不使用信封
    async fn analyze(&self) -> Result<AnalyzeResponse>;

    /// 下载地址；字节传输交给 HTTP 层，不经过信封
    fn download_url(&self, kind: ArtifactKind, id: &RecordId) -> String;
}

/// 基于 reqwest 的 API 客户端
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
    session_cookie: Option<String>,
}

impl ApiClient {
    /// 创建新的 API 客户端；未配置超时时沿用 reqwest 默认行为
    pub fn new(config: ApiConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(http::USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
            session_cookie: None,
        })
    }

    /// 根据应用配置创建客户端
    pub fn from_app_config(app_config: &AppConfig) -> Result<Self> {
        let mut client = Self::new(
            ApiConfig::with_base_url(&app_config.server.base_url),
            app_config.request_timeout(),
        )?;
        if let Some(cookie) = &app_config.server.session_cookie {
            client.set_session_cookie(cookie.clone());
        }
        Ok(client)
    }

    /// 设置会话 Cookie（服务端页面需要登录）
    pub fn set_session_cookie(&mut self, cookie: String) {
        self.session_cookie = Some(cookie);
    }

    /// 获取当前API配置
    pub fn get_config(&self) -> &ApiConfig {
        &self.config
    }

    /// 构建带会话信息的请求
    fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(ref cookie) = self.session_cookie {
            request = request.header(COOKIE, cookie);
        }
        request
    }

    /// 检查 HTTP 状态，非 2xx 转为 [`PanelError::Api`]
    async fn check_status(response: Response, url: &str) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        error!("请求失败: {} - {} - {}", url, status, text);
        let reason = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        Err(PanelError::Api(reason))
    }

    /// 发送请求并解析信封
    async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Envelope<T>> {
        debug!("发送请求: {}", url);
        let response = request.send().await?;
        let response = Self::check_status(response, url).await?;
        Ok(response.json::<Envelope<T>>().await?)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let request = self.build_request(Method::GET, url);
        self.send_envelope::<T>(request, url).await?.into_data()
    }

    /// 只关心 success 的调用
    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<()> {
        self.send_envelope::<serde_json::Value>(request, url)
            .await?
            .into_result()
            .map(|_| ())
    }

    /// 流式下载到本地文件，`on_progress(已下载, 总大小)`
    ///
    /// 任何失败都会删除已写入的部分文件。
    pub async fn download_to<P, F>(&self, url: &str, save_path: P, on_progress: F) -> Result<u64>
    where
        P: AsRef<Path>,
        F: FnMut(u64, Option<u64>),
    {
        let save_path = save_path.as_ref();
        info!("开始下载: {}", url);
        let response = self.build_request(Method::GET, url).send().await?;
        let response = Self::check_status(response, url).await?;

        match Self::write_body(response, save_path, on_progress).await {
            Ok(downloaded) => {
                info!("下载完成: {} ({} bytes)", save_path.display(), downloaded);
                Ok(downloaded)
            }
            Err(e) => {
                warn!("下载失败，清理部分文件: {} - {}", save_path.display(), e);
                let _ = tokio::fs::remove_file(save_path).await;
                Err(e)
            }
        }
    }

    async fn write_body<F>(response: Response, save_path: &Path, mut on_progress: F) -> Result<u64>
    where
        F: FnMut(u64, Option<u64>),
    {
        use futures::StreamExt;

        let total_size = response.content_length();
        let mut file = File::create(save_path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            on_progress(downloaded, total_size);
        }
        file.flush().await?;

        match total_size {
            Some(total) if downloaded != total => Err(PanelError::custom(format!(
                "下载不完整: {downloaded}/{total} bytes"
            ))),
            _ => Ok(downloaded),
        }
    }
}

#[async_trait]
impl BackupApi for ApiClient {
    async fn list_backups(&self) -> Result<Vec<Backup>> {
        self.fetch(&self.config.backup_list_url()).await
    }

    async fn create_backup(&self, request: &CreateBackupRequest) -> Result<()> {
        let url = self.config.backup_create_url();
        let builder = self.build_request(Method::POST, &url).json(request);
        self.execute(builder, &url).await
    }

    async fn upload_backup(&self, file: &UploadFile, device_id: &str) -> Result<()> {
        let url = self.config.backup_upload_url();
        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        let form = Form::new()
            .part(http::UPLOAD_FILE_FIELD, part)
            .text(http::UPLOAD_DEVICE_FIELD, device_id.to_string());
        let builder = self.build_request(Method::POST, &url).multipart(form);
        self.execute(builder, &url).await
    }

    async fn restore_backup(&self, id: &RecordId) -> Result<()> {
        let url = self.config.backup_restore_url(id);
        self.execute(self.build_request(Method::POST, &url), &url).await
    }

    async fn delete_backup(&self, id: &RecordId) -> Result<()> {
        let url = self.config.backup_item_url(id);
        self.execute(self.build_request(Method::DELETE, &url), &url).await
    }

    async fn list_exports(&self) -> Result<Vec<Export>> {
        self.fetch(&self.config.export_list_url()).await
    }

    async fn create_export(&self, request: &CreateExportRequest) -> Result<()> {
        let url = self.config.export_create_url();
        let builder = self.build_request(Method::POST, &url).json(request);
        self.execute(builder, &url).await
    }

    async fn export_content(&self, id: &RecordId) -> Result<ExportContent> {
        self.fetch(&self.config.export_content_url(id)).await
    }

    async fn restore_export(&self, id: &RecordId) -> Result<()> {
        let url = self.config.export_restore_url(id);
        self.execute(self.build_request(Method::POST, &url), &url).await
    }

    async fn delete_export(&self, id: &RecordId) -> Result<()> {
        let url = self.config.export_item_url(id);
        self.execute(self.build_request(Method::DELETE, &url), &url).await
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>> {
        self.fetch(&self.config.schedule_list_url()).await
    }

    async fn get_schedule(&self, id: &RecordId) -> Result<Schedule> {
        self.fetch(&self.config.schedule_item_url(id)).await
    }

    async fn save_schedule(&self, save: &ScheduleSave) -> Result<()> {
        let (method, url) = match save {
            ScheduleSave::Create(_) => (Method::POST, self.config.schedule_create_url()),
            ScheduleSave::Update(id, _) => (Method::PUT, self.config.schedule_item_url(id)),
        };
        let builder = self.build_request(method, &url).json(save.request());
        self.execute(builder, &url).await
    }

    async fn toggle_schedule(&self, id: &RecordId, active: bool) -> Result<()> {
        let url = self.config.schedule_toggle_url(id);
        let builder = self
            .build_request(Method::POST, &url)
            .json(&ToggleRequest { active });
        self.execute(builder, &url).await
    }

    async fn delete_schedule(&self, id: &RecordId) -> Result<()> {
        let url = self.config.schedule_item_url(id);
        self.execute(self.build_request(Method::DELETE, &url), &url).await
    }

    async fn analyze(&self) -> Result<AnalyzeResponse> {
        let url = self.config.analyze_url();
        let response = self
            .build_request(Method::POST, &url)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        // 错误状态码也带 {status, message}，直接按 JSON 读取
        debug!("分析请求返回状态: {}", response.status());
        Ok(response.json::<AnalyzeResponse>().await?)
    }

    fn download_url(&self, kind: ArtifactKind, id: &RecordId) -> String {
        match kind {
            ArtifactKind::Backup => self.config.backup_download_url(id),
            ArtifactKind::Export => self.config.export_download_url(id),
        }
    }
}
