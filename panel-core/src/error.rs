use thiserror::Error;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("HTTP 请求错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("API请求失败: {0}")]
    Api(String),

    #[error("服务端拒绝请求: {0}")]
    Rejected(String),

    #[error("服务端响应无效: {0}")]
    InvalidResponse(String),

    #[error("配置文件未找到")]
    ConfigNotFound,

    #[error("自定义错误: {0}")]
    Custom(String),
}

impl PanelError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// 服务端以 `success: false` 拒绝了请求（业务失败，而非传输失败）
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// 面向用户显示的错误原因（不带日志前缀）
    pub fn reason(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::Io(e) => e.to_string(),
            Self::Serde(e) => e.to_string(),
            Self::Config(e) => e.to_string(),
            Self::ConfigWrite(e) => e.to_string(),
            Self::Api(msg)
            | Self::Rejected(msg)
            | Self::InvalidResponse(msg)
            | Self::Custom(msg) => msg.clone(),
            Self::ConfigNotFound => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_reason_has_no_prefix() {
        let err = PanelError::rejected("Thiết bị không tồn tại");
        assert!(err.is_rejected());
        assert_eq!(err.reason(), "Thiết bị không tồn tại");
        assert!(err.to_string().contains("Thiết bị không tồn tại"));
    }

    #[test]
    fn test_api_error_is_not_rejected() {
        let err = PanelError::Api("500 Internal Server Error".to_string());
        assert!(!err.is_rejected());
        assert_eq!(err.reason(), "500 Internal Server Error");
    }
}
