use anyhow::{Context, Result};
use panel_core::{config::AppConfig, constants::config};
use std::path::Path;
use tracing::{info, warn};

/// 运行独立的初始化流程：写出带注释的默认配置
pub fn run_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    info!("🗂  Backup Panel 初始化");
    info!("======================");

    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::get_config_file_path);

    if !force && path.exists() {
        warn!("⚠️  检测到已存在的配置文件: {}", path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        info!("示例: panel-cli init --force");
        return Ok(());
    }

    let config = AppConfig::default();
    config
        .save_to_file(&path)
        .with_context(|| format!("写入配置文件失败: {}", path.display()))?;
    info!("   ✅ 创建配置文件: {}", path.display());

    info!(
        "   📁 下载目录: {} (首次下载时创建)",
        config.get_download_dir().display()
    );

    info!("🎉 初始化完成！");
    info!("");
    info!("📝 接下来的步骤:");
    info!("   1️⃣  编辑 {} 中的 [server] base_url", path.display());
    info!("   2️⃣  服务端需要登录时填写 session_cookie");
    info!("   3️⃣  运行 'panel-cli backup list' 查看备份");
    info!("");
    info!("💡 提示:");
    info!("   - 环境变量 PANEL_BASE_URL 可临时覆盖服务器地址");
    info!("   - 使用 'panel-cli --help' 查看所有可用命令");

    Ok(())
}
