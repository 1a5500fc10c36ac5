use crate::app::CliApp;
use panel_core::PanelError;
use panel_core::controller::AnalyzeState;
use panel_core::error::Result;
use tracing::{error, info};

/// 触发服务端分析，结果只看返回的状态
pub async fn run_analyze(app: &CliApp) -> Result<()> {
    info!("🔍 开始分析...");
    match app.panel.analyze().await {
        AnalyzeState::Succeeded => {
            info!("✅ 分析完成");
            Ok(())
        }
        AnalyzeState::Failed(message) => {
            error!("❌ {}", message);
            Err(PanelError::custom(message))
        }
        AnalyzeState::Idle | AnalyzeState::Loading => Ok(()),
    }
}
