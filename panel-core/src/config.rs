use crate::constants::{api, config};
use crate::error::{PanelError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 应用配置结构
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// 服务端连接配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub base_url: String,
    /// 不设置时不限制请求时间
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// 登录后的会话 Cookie，例如 `session=abc`
    #[serde(default)]
    pub session_cookie: Option<String>,
}

/// 下载相关配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DownloadConfig {
    pub dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            dir: config::get_default_download_dir()
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: api::DEFAULT_BASE_URL.to_string(),
                request_timeout_secs: None,
                session_cookie: None,
            },
            download: DownloadConfig::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置：显式路径优先，必须存在；否则按优先级查找
    /// panel.toml -> backup-panel.toml -> .backup-panel.toml，都没有时使用默认配置
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(PanelError::ConfigNotFound);
            }
            tracing::info!("使用配置文件: {}", path.display());
            return Self::load_from_file(path);
        }
        Self::find_and_load_config_in(Path::new("."))
    }

    /// 在指定目录中查找配置文件
    pub fn find_and_load_config_in(dir: &Path) -> Result<Self> {
        for config_file in &config::CONFIG_SEARCH_FILES {
            let candidate = dir.join(config_file);
            if candidate.exists() {
                tracing::info!("找到配置文件: {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
        }

        tracing::warn!("未找到配置文件，使用默认配置（可运行 init 生成 {}）", config::CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments()?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> Result<String> {
        const TEMPLATE: &str = include_str!("../templates/panel.toml.template");

        // 可选字段未设置时保留模板中的注释示例
        let timeout = match self.server.request_timeout_secs {
            Some(secs) => format!("request_timeout_secs = {secs}"),
            None => "# request_timeout_secs = 30".to_string(),
        };
        let cookie = match &self.server.session_cookie {
            Some(cookie) => format!("session_cookie = {}", toml_string(cookie)?),
            None => "# session_cookie = \"session=...\"".to_string(),
        };

        Ok(render_template(
            TEMPLATE,
            &[
                ("base_url", toml_string(&self.server.base_url)?),
                ("request_timeout", timeout),
                ("session_cookie", cookie),
                ("download_dir", toml_string(&self.download.dir)?),
            ],
        ))
    }

    /// 用环境变量覆盖服务器地址
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("服务器地址被覆盖为: {}", url);
            self.server.base_url = url;
        }
        self
    }

    /// 读取 `PANEL_BASE_URL` 环境变量
    pub fn apply_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(api::BASE_URL_ENV).ok())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.server.request_timeout_secs.map(Duration::from_secs)
    }

    /// 获取下载目录路径
    pub fn get_download_dir(&self) -> PathBuf {
        PathBuf::from(&self.download.dir)
    }

    /// 确保下载目录存在
    pub fn ensure_download_dir(&self) -> Result<PathBuf> {
        let dir = self.get_download_dir();
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

/// 转义为 TOML 字符串字面量
fn toml_string(value: &str) -> Result<String> {
    Ok(toml::Value::String(value.to_string()).to_string())
}

/// 单次扫描替换 `{name}` 占位符，已替换的值不会被再次展开
fn render_template(template: &str, values: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let tail = &rest[start..];
        let value = tail.find('}').and_then(|end| {
            values
                .iter()
                .find(|(name, _)| *name == &tail[1..end])
                .map(|(_, value)| (value, end))
        });
        match value {
            Some((value, end)) => {
                output.push_str(value);
                rest = &tail[end + 1..];
            }
            None => {
                output.push('{');
                rest = &tail[1..];
            }
        }
    }
    output.push_str(rest);
    output
}
