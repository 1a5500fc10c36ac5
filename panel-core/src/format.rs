//! 表格单元格的显示格式化

use crate::constants::schedule::{DEFAULT_TIME, WEEKDAY_LABELS};
use crate::models::{MonthDay, Schedule, ScheduleType};
use chrono::{DateTime, FixedOffset};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// 字节数转为可读大小，最多保留两位小数并去掉末尾的 0
///
/// `0 -> "0 Bytes"`, `1536 -> "1.5 KB"`, `1048576 -> "1 MB"`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// `dd/mm/yyyy HH:MM:SS`，按时间戳自带的时区显示；缺失时为空串
pub fn format_date(timestamp: Option<&DateTime<FixedOffset>>) -> String {
    timestamp
        .map(|ts| ts.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// 计划频率描述，例如 `Hàng tuần, Thứ Hai 02:00`
pub fn format_schedule_frequency(schedule: &Schedule) -> String {
    let time = schedule
        .time
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_TIME);

    match schedule.schedule_type {
        ScheduleType::Daily => format!("Hàng ngày, {time}"),
        ScheduleType::Weekly => match schedule.weekday.and_then(|d| WEEKDAY_LABELS.get(d as usize)) {
            Some(label) => format!("Hàng tuần, {label} {time}"),
            None => UNKNOWN_FREQUENCY.to_string(),
        },
        ScheduleType::Monthly => match schedule.day {
            Some(MonthDay::Last) => format!("Hàng tháng, Ngày cuối tháng {time}"),
            Some(MonthDay::Day(day)) => format!("Hàng tháng, Ngày {day} {time}"),
            None => UNKNOWN_FREQUENCY.to_string(),
        },
    }
}

const UNKNOWN_FREQUENCY: &str = "Không xác định";
