mod analyze;
mod backup;
mod download;
mod export;
mod schedule;
mod status;

// Resource commands
pub use backup::run_backup_command;
pub use export::run_export_command;
pub use schedule::run_schedule_command;

// Analyze command
pub use analyze::run_analyze;

// Status commands
pub use status::{run_api_info, show_client_version};

use panel_core::PanelError;
use panel_core::controller::Outcome;
use panel_core::error::Result;
use tracing::info;

/// 把控制器的结局转为命令结果：`true` 表示操作已执行
pub(crate) fn check_outcome(outcome: Outcome) -> Result<bool> {
    match outcome {
        Outcome::Done => Ok(true),
        Outcome::Declined => {
            info!("操作已取消");
            Ok(false)
        }
        Outcome::Incomplete(issue) => Err(PanelError::custom(issue.message())),
    }
}
