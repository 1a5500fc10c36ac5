use crate::project_info::{metadata, version_info};
use clap::{Args, Parser, Subcommand};
use panel_core::models::{MonthDay, ScheduleType};
use std::path::PathBuf;

/// 备份管理命令
#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// 列出所有备份
    List,
    /// 为设备创建备份
    Create {
        /// 设备 ID
        #[arg(long)]
        device: String,
        /// 备份名称
        #[arg(long, default_value = "")]
        name: String,
        /// 包含敏感数据（密码、证书等）
        #[arg(long)]
        include_sensitive: bool,
    },
    /// 上传本地备份文件
    Upload {
        /// 本地备份文件路径
        #[arg(long)]
        file: Option<PathBuf>,
        /// 目标设备 ID
        #[arg(long)]
        device: Option<String>,
    },
    /// 下载备份文件
    Download {
        /// 备份 ID
        id: String,
        /// 保存路径（默认保存到下载目录）
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// 从备份恢复设备
    Restore {
        /// 备份 ID
        id: String,
    },
    /// 删除备份
    Delete {
        /// 备份 ID
        id: String,
    },
}

/// 配置导出命令
#[derive(Subcommand, Debug)]
pub enum ExportCommand {
    /// 列出所有导出
    List,
    /// 为设备导出配置
    Create {
        /// 设备 ID
        #[arg(long)]
        device: String,
        /// 导出名称
        #[arg(long, default_value = "")]
        name: String,
        /// 紧凑格式导出
        #[arg(long)]
        compact: bool,
        /// 包含敏感数据
        #[arg(long)]
        include_sensitive: bool,
    },
    /// 查看导出内容
    View {
        /// 导出 ID
        id: String,
    },
    /// 下载导出文件
    Download {
        /// 导出 ID
        id: String,
        /// 保存路径（默认保存到下载目录）
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// 把导出的配置应用到设备
    Restore {
        /// 导出 ID
        id: String,
    },
    /// 删除导出
    Delete {
        /// 导出 ID
        id: String,
    },
}

/// 计划表单字段，未给出的字段保持原值
#[derive(Args, Debug, Default, Clone)]
pub struct ScheduleFields {
    /// 计划名称
    #[arg(long)]
    pub name: Option<String>,
    /// 设备 ID
    #[arg(long)]
    pub device: Option<String>,
    /// 执行频率：daily、weekly、monthly
    #[arg(long = "type", value_name = "TYPE")]
    pub schedule_type: Option<ScheduleType>,
    /// 执行时间，例如 02:30
    #[arg(long)]
    pub time: Option<String>,
    /// 星期几（0=周日 … 6=周六），仅 weekly 使用
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub weekday: Option<u8>,
    /// 每月第几天（1-31 或 last），仅 monthly 使用
    #[arg(long)]
    pub day: Option<MonthDay>,
    /// 保留的备份数量
    #[arg(long)]
    pub retention: Option<u32>,
    /// 是否包含敏感数据
    #[arg(long)]
    pub include_sensitive: Option<bool>,
}

/// 定时备份计划命令
#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    /// 列出所有计划
    List,
    /// 显示单个计划的表单内容
    Show {
        /// 计划 ID
        id: String,
    },
    /// 新增计划
    Add {
        #[command(flatten)]
        fields: ScheduleFields,
    },
    /// 修改已有计划
    Edit {
        /// 计划 ID
        id: String,
        #[command(flatten)]
        fields: ScheduleFields,
    },
    /// 启用或暂停计划
    Toggle {
        /// 计划 ID
        id: String,
        /// 目标状态；不指定时切换当前状态
        #[arg(long)]
        active: Option<bool>,
    },
    /// 删除计划
    Delete {
        /// 计划 ID
        id: String,
    },
}

/// Backup Panel CLI - 设备备份、配置导出和定时计划管理
#[derive(Parser)]
#[command(name = "panel-cli")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径（默认按 panel.toml、backup-panel.toml、.backup-panel.toml 查找）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    /// 跳过恢复/删除前的确认
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 创建配置文件
    Init {
        /// 如果配置文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 备份管理
    #[command(subcommand)]
    Backup(BackupCommand),
    /// 配置导出管理
    #[command(subcommand)]
    Export(ExportCommand),
    /// 定时备份计划管理
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// 触发服务端分析
    Analyze,
    /// 显示当前API配置信息
    ApiInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule_add() {
        let cli = Cli::try_parse_from([
            "panel-cli",
            "-y",
            "schedule",
            "add",
            "--name",
            "Đêm",
            "--device",
            "3",
            "--type",
            "monthly",
            "--day",
            "last",
        ])
        .unwrap();

        assert!(cli.yes);
        match cli.command {
            Commands::Schedule(ScheduleCommand::Add { fields }) => {
                assert_eq!(fields.schedule_type, Some(ScheduleType::Monthly));
                assert_eq!(fields.day, Some(MonthDay::Last));
                assert_eq!(fields.weekday, None);
            }
            _ => panic!("expected schedule add"),
        }
    }

    #[test]
    fn test_weekday_range_is_checked() {
        let result = Cli::try_parse_from([
            "panel-cli", "schedule", "edit", "s1", "--weekday", "7",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_toggle_without_target_state() {
        let cli = Cli::try_parse_from(["panel-cli", "schedule", "toggle", "s1"]).unwrap();
        match cli.command {
            Commands::Schedule(ScheduleCommand::Toggle { id, active }) => {
                assert_eq!(id, "s1");
                assert_eq!(active, None);
            }
            _ => panic!("expected schedule toggle"),
        }
    }
}
