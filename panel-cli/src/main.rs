use clap::Parser;
use panel_cli::{Cli, CliApp, Commands, run_init, setup_logging};
use panel_core::PanelError;
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录，文件日志的 guard 需要活到退出前
    let _log_guard = setup_logging(cli.verbose);

    if run(cli).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(cli: Cli) -> bool {
    // `init` 命令是特例，它不需要预先加载配置
    if let Commands::Init { force } = cli.command {
        if let Err(e) = run_init(cli.config.as_deref(), force) {
            error!("❌ 初始化失败: {:#}", e);
            return false;
        }
        return true;
    }

    let app = match CliApp::new(cli.config.as_deref(), cli.yes).await {
        Ok(app) => app,
        Err(PanelError::ConfigNotFound) => {
            if let Some(path) = &cli.config {
                error!("❌ 配置文件 '{}' 未找到。", path.display());
            }
            error!("👉 请先运行 'panel-cli init' 命令来创建配置文件。");
            return false;
        }
        Err(e) => {
            error!("❌ 应用初始化失败: {}", e);
            return false;
        }
    };

    // 运行命令
    if let Err(e) = app.run_command(cli.command).await {
        error!("❌ 操作失败: {}", e);
        return false;
    }
    true
}
