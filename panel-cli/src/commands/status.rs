use crate::app::CliApp;
use crate::project_info::{get_copyright_info, get_version_string};
use panel_core::error::Result;
use tracing::info;

/// 显示客户端版本信息
pub fn show_client_version() {
    info!("📋 {}", get_version_string());
    info!("   {}", get_copyright_info());
}

/// 显示当前API配置
pub async fn run_api_info(app: &CliApp) -> Result<()> {
    show_client_version();
    info!("   下载目录: {}", app.config.get_download_dir().display());
    match app.config.request_timeout() {
        Some(timeout) => info!("   请求超时: {} 秒", timeout.as_secs()),
        None => info!("   请求超时: 未设置"),
    }
    info!("{}", app.panel.api().get_config());
    Ok(())
}
