//! 终端输出：表格、通知、确认和进度显示

use indicatif::{ProgressBar, ProgressStyle};
use panel_core::controller::Confirm;
use panel_core::notification::{Notification, NotificationKind};
use panel_core::view::TableView;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 以对齐的列输出表格，首列为记录 ID
pub fn render_table(title: &str, table: &TableView) {
    info!("{}", title);
    info!("{}", "=".repeat(title.chars().count().max(12)));

    if let Some(placeholder) = table.placeholder {
        info!("   {}", placeholder);
        return;
    }

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut line = Vec::with_capacity(row.cells.len() + 2);
            line.push(row.id.to_string());
            line.extend(row.cells.iter().cloned());
            line.push(
                row.actions
                    .iter()
                    .map(|a| a.label())
                    .collect::<Vec<_>>()
                    .join("/"),
            );
            line
        })
        .collect();

    let mut header = vec!["ID".to_string()];
    header.extend(table.headers.iter().map(|h| h.to_string()));

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .chain(std::iter::once(&header[col]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = format_line(&header);
    info!("{}", header_line);
    info!("{}", "-".repeat(header_line.chars().count()));
    for row in &rows {
        info!("{}", format_line(row));
    }
    info!("共 {} 条记录", rows.len());
}

/// 通知按类型映射到日志级别
pub fn log_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        match notification.kind {
            NotificationKind::Success => info!("✅ {}", notification.message),
            NotificationKind::Info => info!("ℹ️  {}", notification.message),
            NotificationKind::Warning => warn!("⚠️  {}", notification.message),
            NotificationKind::Error => error!("❌ {}", notification.message),
        }
    }
}

/// 从标准输入读取 y/N
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} (y/N): ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => input.trim().to_lowercase() == "y",
            Err(e) => {
                warn!("读取输入失败: {}", e);
                false
            }
        }
    }
}

/// 忙碌指示为真时显示 spinner
pub fn spawn_busy_spinner(mut visible: watch::Receiver<bool>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut spinner: Option<ProgressBar> = None;
        loop {
            let busy = *visible.borrow_and_update();
            match (busy, spinner.take()) {
                (true, None) => spinner = Some(create_spinner("Đang xử lý...")),
                (true, Some(current)) => spinner = Some(current),
                (false, Some(current)) => current.finish_and_clear(),
                (false, None) => {}
            }
            if visible.changed().await.is_err() {
                break;
            }
        }
        if let Some(current) = spinner {
            current.finish_and_clear();
        }
    })
}

fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// 下载进度条，总大小未知时先按 0 显示
pub fn create_download_bar(file_name: &str) -> ProgressBar {
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::with_template(
        "{spinner:.green} {msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    )
    .map(|s| s.progress_chars("#>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_message(file_name.to_string());
    bar
}
