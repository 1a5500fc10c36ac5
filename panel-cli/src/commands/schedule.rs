use crate::app::CliApp;
use crate::cli::{ScheduleCommand, ScheduleFields};
use crate::commands::check_outcome;
use crate::ui;
use panel_core::PanelError;
use panel_core::controller::ResourceKind;
use panel_core::error::Result;
use panel_core::form::ScheduleForm;
use panel_core::models::RecordId;
use tracing::{info, instrument};

const TITLE: &str = "⏰ 定时备份计划";

#[instrument(skip(app))]
pub async fn run_schedule_command(app: &CliApp, cmd: ScheduleCommand) -> Result<()> {
    let panel = &app.panel;
    let show_table = match cmd {
        ScheduleCommand::List => check_outcome(panel.load(ResourceKind::Schedule).await?)?,
        ScheduleCommand::Show { id } => {
            panel.edit_schedule(&RecordId::from(id)).await?;
            show_form(&panel.schedule_dialog().await.form);
            panel.close_schedule_dialog().await;
            false
        }
        ScheduleCommand::Add { fields } => {
            panel.open_add_schedule().await;
            panel
                .update_schedule_form(|form| apply_fields(fields, form))
                .await;
            check_outcome(panel.save_schedule().await?)?
        }
        ScheduleCommand::Edit { id, fields } => {
            panel.edit_schedule(&RecordId::from(id)).await?;
            panel
                .update_schedule_form(|form| apply_fields(fields, form))
                .await;
            check_outcome(panel.save_schedule().await?)?
        }
        ScheduleCommand::Toggle { id, active } => {
            let id = RecordId::from(id);
            let target = match active {
                Some(active) => active,
                None => !current_state(app, &id).await?,
            };
            check_outcome(panel.toggle_schedule(&id, target).await?)?
        }
        ScheduleCommand::Delete { id } => check_outcome(
            panel
                .delete(ResourceKind::Schedule, &RecordId::from(id))
                .await?,
        )?,
    };

    if show_table {
        ui::render_table(TITLE, &panel.table(ResourceKind::Schedule).await);
    }
    Ok(())
}

/// 命令行只覆盖给出的字段
fn apply_fields(fields: ScheduleFields, form: &mut ScheduleForm) {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(device) = fields.device {
        form.device_id = device;
    }
    if let Some(schedule_type) = fields.schedule_type {
        form.schedule_type = schedule_type;
    }
    if let Some(time) = fields.time {
        form.time = time;
    }
    if let Some(weekday) = fields.weekday {
        form.weekday = weekday;
    }
    if let Some(day) = fields.day {
        form.day = day;
    }
    if let Some(retention) = fields.retention {
        form.retention = retention;
    }
    if let Some(include_sensitive) = fields.include_sensitive {
        form.include_sensitive = include_sensitive;
    }
}

/// 从列表中读取计划当前是否启用
async fn current_state(app: &CliApp, id: &RecordId) -> Result<bool> {
    app.panel.load(ResourceKind::Schedule).await?;
    app.panel
        .snapshot()
        .await
        .schedules
        .iter()
        .find(|s| &s.id == id)
        .map(|s| s.active)
        .ok_or_else(|| PanelError::custom(format!("计划不存在: {id}")))
}

fn show_form(form: &ScheduleForm) {
    let visibility = form.schedule_type.visibility();
    info!("⏰ 计划详情");
    info!("   名称: {}", form.name);
    info!("   设备: {}", form.device_id);
    info!("   频率: {}", form.schedule_type);
    info!("   时间: {}", form.time);
    if visibility.weekday {
        info!("   星期: {}", form.weekday);
    }
    if visibility.month_day {
        info!("   日期: {}", form.day);
    }
    info!("   保留数量: {}", form.retention);
    info!("   包含敏感数据: {}", form.include_sensitive);
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_core::models::{MonthDay, ScheduleType};

    #[test]
    fn test_apply_fields_only_overrides_given_values() {
        let mut form = ScheduleForm {
            name: "Cũ".to_string(),
            device_id: "1".to_string(),
            retention: 9,
            ..ScheduleForm::default()
        };
        let fields = ScheduleFields {
            schedule_type: Some(ScheduleType::Monthly),
            day: Some(MonthDay::Last),
            ..ScheduleFields::default()
        };

        apply_fields(fields, &mut form);

        assert_eq!(form.name, "Cũ");
        assert_eq!(form.retention, 9);
        assert_eq!(form.schedule_type, ScheduleType::Monthly);
        assert_eq!(form.day, MonthDay::Last);
    }
}
