use crate::app::CliApp;
use crate::cli::BackupCommand;
use crate::commands::{check_outcome, download};
use crate::ui;
use panel_core::api::ArtifactKind;
use panel_core::controller::ResourceKind;
use panel_core::error::Result;
use panel_core::form::UploadForm;
use panel_core::models::{CreateBackupRequest, RecordId, UploadFile};
use tracing::{info, instrument};

const TITLE: &str = "💾 备份列表";

#[instrument(skip(app))]
pub async fn run_backup_command(app: &CliApp, cmd: BackupCommand) -> Result<()> {
    let panel = &app.panel;
    let show_table = match cmd {
        BackupCommand::List => check_outcome(panel.load(ResourceKind::Backup).await?)?,
        BackupCommand::Create {
            device,
            name,
            include_sensitive,
        } => {
            info!("创建备份: 设备 {}", device);
            panel.open_create_backup().await;
            let request = CreateBackupRequest {
                device_id: device,
                name,
                include_sensitive,
            };
            check_outcome(panel.create_backup(request).await?)?
        }
        BackupCommand::Upload { file, device } => {
            let file = match file {
                Some(path) => Some(UploadFile::from_path(&path).await?),
                None => None,
            };
            panel.open_upload_backup().await;
            check_outcome(panel.upload_backup(UploadForm::new(file, device)).await?)?
        }
        BackupCommand::Download { id, output } => {
            download::run_download(app, ArtifactKind::Backup, &RecordId::from(id), output)
                .await?;
            false
        }
        BackupCommand::Restore { id } => {
            check_outcome(
                panel
                    .restore(ArtifactKind::Backup, &RecordId::from(id))
                    .await?,
            )?;
            false
        }
        BackupCommand::Delete { id } => {
            check_outcome(
                panel
                    .delete(ResourceKind::Backup, &RecordId::from(id))
                    .await?,
            )?
        }
    };

    if show_table {
        ui::render_table(TITLE, &panel.table(ResourceKind::Backup).await);
    }
    Ok(())
}
