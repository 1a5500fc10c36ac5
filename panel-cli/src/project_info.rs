/// Panel CLI 项目信息模块
///
/// panel-cli 是面向用户的主程序，项目元数据统一在这里定义；
/// panel-core 作为内部库，只提供技术性常量

/// 项目元数据（自动从 panel-cli 的 Cargo.toml 同步）
pub mod metadata {
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    pub const PROJECT_LICENSE: &str = env!("CARGO_PKG_LICENSE");

    /// 用户友好的显示名称（手动维护，用于 UI 显示）
    pub mod display {
        pub const FRIENDLY_NAME: &str = "Backup Panel";

        pub const CLI_FULL_NAME: &str = "Backup Panel CLI";

        pub const DESCRIPTION_LONG: &str = "备份面板的命令行客户端：管理设备备份、配置导出和定时备份计划，支持上传、下载、恢复以及计划的启用与暂停";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// 获取版本信息字符串
pub fn get_version_string() -> String {
    format!(
        "{} v{}",
        metadata::display::FRIENDLY_NAME,
        version_info::CLI_VERSION
    )
}

/// 获取作者和许可证信息
pub fn get_copyright_info() -> String {
    format!(
        "© {} - Licensed under {}",
        metadata::PROJECT_AUTHORS,
        metadata::PROJECT_LICENSE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        let version = get_version_string();
        assert!(version.starts_with("Backup Panel v"));
        assert!(version.ends_with(version_info::CLI_VERSION));
        assert_eq!(metadata::PROJECT_NAME, "panel-cli");
    }
}
