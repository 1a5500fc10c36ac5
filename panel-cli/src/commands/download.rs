use crate::app::CliApp;
use crate::ui;
use panel_core::api::ArtifactKind;
use panel_core::controller::ResourceKind;
use panel_core::error::Result;
use panel_core::format::format_file_size;
use panel_core::models::{ArtifactRecord, RecordId};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// 下载备份或导出文件；未指定保存路径时使用列表中的文件名
pub async fn run_download(
    app: &CliApp,
    kind: ArtifactKind,
    id: &RecordId,
    output: Option<PathBuf>,
) -> Result<()> {
    let url = app.panel.download(kind, id);
    debug!("下载地址: {}", url);

    let save_path = match output {
        Some(path) => path,
        None => {
            let file_name = remote_file_name(app, kind, id).await;
            app.config.ensure_download_dir()?.join(file_name)
        }
    };

    let label = save_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| id.to_string());
    let bar = ui::create_download_bar(&label);
    let downloaded = app
        .panel
        .api()
        .download_to(&url, &save_path, |done, total| {
            if let Some(total) = total {
                bar.set_length(total);
            }
            bar.set_position(done);
        })
        .await;
    bar.finish_and_clear();

    let bytes = downloaded?;
    info!(
        "✅ 已保存到 {} ({})",
        save_path.display(),
        format_file_size(bytes)
    );
    Ok(())
}

/// 列表加载失败或找不到记录时使用 `backup-{id}` / `export-{id}`
async fn remote_file_name(app: &CliApp, kind: ArtifactKind, id: &RecordId) -> String {
    let (resource, fallback) = match kind {
        ArtifactKind::Backup => (ResourceKind::Backup, format!("backup-{id}")),
        ArtifactKind::Export => (ResourceKind::Export, format!("export-{id}")),
    };
    if let Err(e) = app.panel.load(resource).await {
        warn!("无法读取文件名，使用默认名称 {}: {}", fallback, e);
        return fallback;
    }

    let snapshot = app.panel.snapshot().await;
    let records = match kind {
        ArtifactKind::Backup => &snapshot.backups,
        ArtifactKind::Export => &snapshot.exports,
    };
    pick_file_name(records, id).unwrap_or(fallback)
}

fn pick_file_name(records: &[ArtifactRecord], id: &RecordId) -> Option<String> {
    records
        .iter()
        .find(|r| &r.id == id)
        .map(|r| file_name_only(&r.filename))
        .filter(|name| !name.is_empty())
}

/// 服务端文件名不应带目录
fn file_name_only(name: &str) -> String {
    name.rsplit(['/', '\\']).next().unwrap_or_default().to_string()
}
