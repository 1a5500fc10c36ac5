use panel_core::{
    api::ApiClient,
    config::AppConfig,
    controller::{AssumeYes, Confirm, PanelController},
    error::Result,
};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::cli::Commands;
use crate::{commands, ui};
use tracing::debug;

pub struct CliApp {
    pub config: AppConfig,
    pub panel: PanelController<ApiClient>,
    spinner: JoinHandle<()>,
}

impl CliApp {
    /// 加载配置并创建面板控制器；显式给出的配置文件必须存在
    pub async fn new(config_path: Option<&Path>, assume_yes: bool) -> Result<Self> {
        let config = AppConfig::load(config_path)?.apply_env_overrides();
        debug!("服务器地址: {}", config.server.base_url);

        let api_client = ApiClient::from_app_config(&config)?;
        let confirm: Arc<dyn Confirm> = if assume_yes {
            Arc::new(AssumeYes)
        } else {
            Arc::new(ui::StdinConfirm)
        };
        let panel = PanelController::new(api_client, confirm);
        let spinner = ui::spawn_busy_spinner(panel.busy().subscribe());

        Ok(Self {
            config,
            panel,
            spinner,
        })
    }

    /// 运行应用命令，结束后把通知输出到日志
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        let result = match command {
            // 已经在 main.rs 中处理
            Commands::Init { .. } => Ok(()),
            Commands::Backup(cmd) => commands::run_backup_command(self, cmd).await,
            Commands::Export(cmd) => commands::run_export_command(self, cmd).await,
            Commands::Schedule(cmd) => commands::run_schedule_command(self, cmd).await,
            Commands::Analyze => commands::run_analyze(self).await,
            Commands::ApiInfo => commands::run_api_info(self).await,
        };

        ui::log_notifications(self.panel.drain_notifications().await);
        result
    }
}

impl Drop for CliApp {
    fn drop(&mut self) {
        self.spinner.abort();
    }
}
