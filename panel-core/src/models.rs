use crate::constants::schedule::LAST_DAY;
use crate::error::PanelError;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 服务端统一响应信封 `{success, data?, error?}`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// `success: false` 时返回 [`PanelError::Rejected`]
    pub fn into_result(self) -> crate::Result<Option<T>> {
        if self.success {
            Ok(self.data)
        } else {
            Err(PanelError::Rejected(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            ))
        }
    }

    /// 要求响应必须携带 `data`
    pub fn into_data(self) -> crate::Result<T> {
        self.into_result()?
            .ok_or_else(|| PanelError::InvalidResponse("响应缺少 data 字段".to_string()))
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// 不透明的记录ID，数字ID按十进制字符串保存
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Signed(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => Self(n.to_string()),
            NumberOrText::Signed(n) => Self(n.to_string()),
            NumberOrText::Text(s) => Self(s),
        })
    }
}

/// 接受数字或数字字符串的可选字段（表单值经常以字符串提交）
fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => T::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("数值超出范围: {n}"))),
        Some(NumberOrText::Signed(n)) => Err(de::Error::custom(format!("数值不能为负: {n}"))),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("无效的数值: {s}"))),
    }
}

/// 显式的 `null` 与缺失字段一样取默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 解析服务端时间戳：RFC 3339，或不带时区的 ISO 格式（按 UTC 处理）
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_timestamp(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::debug!("无法解析时间戳: {}", s);
        }
        parsed
    }))
}

/// 备份或导出记录（两者字段一致）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: u64,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

/// 设备配置的完整快照
pub type Backup = ArtifactRecord;

/// 可预览内容的导出快照
pub type Export = ArtifactRecord;

/// 定时计划类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for ScheduleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(format!("未知的计划类型: {other}（可选 daily / weekly / monthly）")),
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 每月执行日：具体日期或 "最后一天"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDay {
    Day(u8),
    Last,
}

impl Default for MonthDay {
    fn default() -> Self {
        Self::Day(crate::constants::schedule::DEFAULT_MONTH_DAY)
    }
}

impl FromStr for MonthDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(LAST_DAY) {
            return Ok(Self::Last);
        }
        match s.parse::<u8>() {
            Ok(day) if (1..=31).contains(&day) => Ok(Self::Day(day)),
            _ => Err(format!("无效的每月执行日: {s}（1-31 或 last）")),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{day}"),
            Self::Last => f.write_str(LAST_DAY),
        }
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Day(day) => serializer.serialize_u8(*day),
            Self::Last => serializer.serialize_str(LAST_DAY),
        }
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Number(n) => n.to_string().parse().map_err(de::Error::custom),
            NumberOrText::Signed(n) => Err(de::Error::custom(format!("无效的每月执行日: {n}"))),
            NumberOrText::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

/// 非 monthly 计划的表单会把 day 提交为空字符串
fn optional_month_day<'de, D>(deserializer: D) -> Result<Option<MonthDay>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => s.parse().map(Some).map_err(de::Error::custom),
        Some(NumberOrText::Number(n)) => n.to_string().parse().map(Some).map_err(de::Error::custom),
        Some(NumberOrText::Signed(n)) => Err(de::Error::custom(format!("无效的每月执行日: {n}"))),
    }
}

/// 定时备份计划
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub device_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub device_name: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    #[serde(default)]
    pub time: Option<String>,
    /// 0 = 星期日 … 6 = 星期六，仅 weekly 有值
    #[serde(default, deserialize_with = "optional_number")]
    pub weekday: Option<u8>,
    /// 仅 monthly 有值
    #[serde(default, deserialize_with = "optional_month_day")]
    pub day: Option<MonthDay>,
    #[serde(default, deserialize_with = "optional_number")]
    pub retention: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub include_sensitive: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub next_run: Option<DateTime<FixedOffset>>,
}

/// 创建备份请求
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBackupRequest {
    pub device_id: String,
    pub name: String,
    pub include_sensitive: bool,
}

/// 创建导出请求
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExportRequest {
    pub device_id: String,
    pub name: String,
    pub compact: bool,
    pub include_sensitive: bool,
}

/// 定时计划保存请求，weekday 与 day 互斥
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub name: String,
    pub device_id: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub time: String,
    pub retention: u32,
    pub include_sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<MonthDay>,
}

/// 保存定时计划：新建或更新，由打开表单的动作决定
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleSave {
    Create(ScheduleRequest),
    Update(RecordId, ScheduleRequest),
}

impl ScheduleSave {
    pub fn request(&self) -> &ScheduleRequest {
        match self {
            Self::Create(request) | Self::Update(_, request) => request,
        }
    }
}

/// 启用/暂停请求
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToggleRequest {
    pub active: bool,
}

/// 导出的文本内容
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportContent {
    #[serde(default)]
    pub content: String,
}

/// `/analyze` 响应
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// 待上传的备份文件
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// 从磁盘读取待上传文件
    pub async fn from_path<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| PanelError::custom(format!("无效的文件路径: {}", path.display())))?;
        Ok(Self { file_name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_with_data() {
        let envelope: Envelope<Vec<Backup>> = serde_json::from_value(json!({
            "success": true,
            "data": [{
                "id": 7,
                "filename": "router.backup",
                "deviceName": "core-01",
                "size": 2048,
                "createdAt": "2024-05-01T08:30:00Z",
                "type": "manual"
            }]
        }))
        .unwrap();

        let backups = envelope.into_data().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].id.as_str(), "7");
        assert_eq!(backups[0].device_name, "core-01");
        assert_eq!(backups[0].kind, "manual");
        assert!(backups[0].created_at.is_some());
    }

    #[test]
    fn test_envelope_failure_carries_error() {
        let envelope: Envelope<serde_json::Value> =
            Envelope::from_json(r#"{"success": false, "error": "Không tìm thấy thiết bị"}"#).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(err.is_rejected());
        assert_eq!(err.reason(), "Không tìm thấy thiết bị");
    }

    #[test]
    fn test_envelope_failure_without_error_text() {
        let envelope: Envelope<serde_json::Value> = Envelope::from_json(r#"{"success": false}"#).unwrap();
        assert_eq!(envelope.into_result().unwrap_err().reason(), "Unknown error");
    }

    #[test]
    fn test_envelope_missing_data_is_invalid() {
        let envelope: Envelope<ExportContent> = Envelope::from_json(r#"{"success": true}"#).unwrap();
        assert!(matches!(envelope.into_data(), Err(PanelError::InvalidResponse(_))));
    }

    #[test]
    fn test_schedule_accepts_string_numbers() {
        let schedule: Schedule = serde_json::from_value(json!({
            "id": "s1",
            "name": "Tuần",
            "deviceId": 3,
            "deviceName": "edge",
            "type": "weekly",
            "time": "02:00",
            "weekday": "5",
            "retention": "10",
            "includeSensitive": true,
            "active": true,
            "nextRun": "2024-05-03 02:00:00"
        }))
        .unwrap();

        assert_eq!(schedule.schedule_type, ScheduleType::Weekly);
        assert_eq!(schedule.weekday, Some(5));
        assert_eq!(schedule.retention, Some(10));
        assert_eq!(schedule.device_id, Some(RecordId::from("3")));
        assert!(schedule.next_run.is_some());
        assert_eq!(schedule.day, None);
    }

    #[test]
    fn test_month_day_last_roundtrip_on_wire() {
        let schedule: Schedule = serde_json::from_value(json!({
            "id": 1, "type": "monthly", "day": "last"
        }))
        .unwrap();
        assert_eq!(schedule.day, Some(MonthDay::Last));

        let numeric: Schedule = serde_json::from_value(json!({
            "id": 2, "type": "monthly", "day": 15
        }))
        .unwrap();
        assert_eq!(numeric.day, Some(MonthDay::Day(15)));

        assert_eq!(serde_json::to_value(MonthDay::Last).unwrap(), json!("last"));
        assert_eq!(serde_json::to_value(MonthDay::Day(15)).unwrap(), json!(15));
    }

    #[test]
    fn test_null_fields_keep_the_row() {
        let envelope: Envelope<Vec<Backup>> = Envelope::from_json(
            r#"{"success": true, "data": [
                {"id": 1, "filename": "a.backup", "deviceName": "core-01", "size": 10, "type": "manual"},
                {"id": 2, "filename": null, "deviceName": null, "size": null, "createdAt": null, "type": null}
            ]}"#,
        )
        .unwrap();

        let backups = envelope.into_data().unwrap();
        assert_eq!(backups.len(), 2);
        assert_eq!(backups[1].device_name, "");
        assert_eq!(backups[1].filename, "");
        assert_eq!(backups[1].size, 0);
        assert_eq!(backups[1].kind, "");
    }

    #[test]
    fn test_schedule_null_and_blank_fields() {
        let schedule: Schedule = serde_json::from_value(json!({
            "id": 4,
            "name": null,
            "deviceName": null,
            "type": "daily",
            "weekday": "",
            "day": "",
            "includeSensitive": null,
            "active": null
        }))
        .unwrap();
        assert_eq!(schedule.name, "");
        assert_eq!(schedule.weekday, None);
        assert_eq!(schedule.day, None);
        assert!(!schedule.active);

        let with_null_day: Schedule =
            serde_json::from_value(json!({"id": 5, "type": "weekly", "day": null})).unwrap();
        assert_eq!(with_null_day.day, None);
    }

    #[test]
    fn test_month_day_rejects_out_of_range() {
        assert!("0".parse::<MonthDay>().is_err());
        assert!("32".parse::<MonthDay>().is_err());
        assert_eq!("LAST".parse::<MonthDay>().unwrap(), MonthDay::Last);
    }

    #[test]
    fn test_schedule_request_omits_unused_fields() {
        let request = ScheduleRequest {
            name: "Hàng ngày".to_string(),
            device_id: "1".to_string(),
            schedule_type: ScheduleType::Daily,
            time: "01:30".to_string(),
            retention: 7,
            include_sensitive: false,
            weekday: None,
            day: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "daily");
        assert_eq!(value["deviceId"], "1");
        assert_eq!(value["includeSensitive"], false);
        assert!(value.get("weekday").is_none());
        assert!(value.get("day").is_none());
    }

    #[test]
    fn test_unparsable_timestamp_becomes_none() {
        let backup: Backup = serde_json::from_value(json!({
            "id": "b", "createdAt": "yesterday"
        }))
        .unwrap();
        assert_eq!(backup.created_at, None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-02T03:04:05+07:00").is_some());
        assert!(parse_timestamp("2024-01-02T03:04:05.123456").is_some());
        assert!(parse_timestamp("2024-01-02 03:04:05").is_some());
        assert!(parse_timestamp("02/01/2024").is_none());
    }
}
