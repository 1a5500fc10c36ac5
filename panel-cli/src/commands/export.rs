use crate::app::CliApp;
use crate::cli::ExportCommand;
use crate::commands::{check_outcome, download};
use crate::ui;
use panel_core::api::ArtifactKind;
use panel_core::controller::ResourceKind;
use panel_core::error::Result;
use panel_core::models::{CreateExportRequest, RecordId};
use tracing::{info, instrument};

const TITLE: &str = "📄 导出列表";

#[instrument(skip(app))]
pub async fn run_export_command(app: &CliApp, cmd: ExportCommand) -> Result<()> {
    let panel = &app.panel;
    let show_table = match cmd {
        ExportCommand::List => check_outcome(panel.load(ResourceKind::Export).await?)?,
        ExportCommand::Create {
            device,
            name,
            compact,
            include_sensitive,
        } => {
            info!("导出配置: 设备 {}", device);
            panel.open_create_export().await;
            let request = CreateExportRequest {
                device_id: device,
                name,
                compact,
                include_sensitive,
            };
            check_outcome(panel.create_export(request).await?)?
        }
        ExportCommand::View { id } => {
            let id = RecordId::from(id);
            panel.view_export(&id).await?;
            if let Some(viewer) = panel.export_viewer().await {
                info!("📄 导出内容 #{}", id);
                info!("{}", "-".repeat(60));
                for line in viewer.content.lines() {
                    info!("{}", line);
                }
                info!("{}", "-".repeat(60));
            }
            panel.close_export_viewer().await;
            false
        }
        ExportCommand::Download { id, output } => {
            download::run_download(app, ArtifactKind::Export, &RecordId::from(id), output)
                .await?;
            false
        }
        ExportCommand::Restore { id } => {
            check_outcome(
                panel
                    .restore(ArtifactKind::Export, &RecordId::from(id))
                    .await?,
            )?;
            false
        }
        ExportCommand::Delete { id } => {
            check_outcome(
                panel
                    .delete(ResourceKind::Export, &RecordId::from(id))
                    .await?,
            )?
        }
    };

    if show_table {
        ui::render_table(TITLE, &panel.table(ResourceKind::Export).await);
    }
    Ok(())
}
