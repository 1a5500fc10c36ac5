use panel_core::constants::logging::{DEFAULT_LOG_LEVEL, LOG_FILE_ENV, VERBOSE_LOG_LEVEL};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// # Panel CLI 日志系统
///
/// - 库代码只使用 `tracing` 宏：`info!()`, `warn!()`, `error!()`, `debug!()`
/// - 在 `main.rs` 中调用 `setup_logging()`
/// - `-v, --verbose`：DEBUG 级别
/// - `RUST_LOG`：标准的日志级别控制
/// - `PANEL_LOG_FILE`：日志文件路径，设置后日志写入文件而非终端
///
/// ```bash
/// PANEL_LOG_FILE=panel.log panel-cli backup list
/// RUST_LOG=panel_core::controller=debug panel-cli schedule list
/// ```
///
/// 返回的 guard 必须保留到程序结束，否则文件日志可能丢失
pub fn setup_logging(verbose: bool) -> Option<WorkerGuard> {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match std::env::var(LOG_FILE_ENV) {
        Ok(log_file) if !log_file.trim().is_empty() => {
            // 文件输出：包含模块路径、线程名和行号
            let path = Path::new(&log_file);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "panel.log".into());

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true)
                .with_line_number(true)
                .init();
            Some(guard)
        }
        _ => {
            // 终端输出：简洁格式
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_thread_names(false)
                .with_line_number(false)
                .without_time()
                .compact()
                .init();
            None
        }
    }
}
