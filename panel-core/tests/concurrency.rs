mod common;

use common::{FakeApi, artifact, controller};
use futures::poll;
use panel_core::controller::ResourceKind;

#[tokio::test]
async fn test_stale_load_does_not_overwrite_newer_table() {
    let api = FakeApi::new();
    let older_gate = api.gate_backups();
    let newer_gate = api.gate_backups();
    let (panel, _) = controller(api, true);

    let mut older = Box::pin(panel.load(ResourceKind::Backup));
    assert!(poll!(older.as_mut()).is_pending());
    let mut newer = Box::pin(panel.load(ResourceKind::Backup));
    assert!(poll!(newer.as_mut()).is_pending());
    assert_eq!(panel.busy().in_flight(), 2);

    newer_gate
        .send(vec![
            artifact("2", "new.backup", "manual"),
            artifact("3", "newer.backup", "manual"),
        ])
        .unwrap();
    newer.await.unwrap();
    assert!(panel.busy().is_busy());

    older_gate
        .send(vec![artifact("1", "old.backup", "manual")])
        .unwrap();
    older.await.unwrap();

    let table = panel.table(ResourceKind::Backup).await;
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells[0], "new.backup");
    assert!(!panel.busy().is_busy());
}

#[tokio::test]
async fn test_loads_of_different_kinds_do_not_interfere() {
    let api = FakeApi::new().with_exports(vec![artifact("e1", "cfg.json", "export")]);
    let gate = api.gate_backups();
    let (panel, _) = controller(api, true);

    let mut backups = Box::pin(panel.load(ResourceKind::Backup));
    assert!(poll!(backups.as_mut()).is_pending());

    panel.load(ResourceKind::Export).await.unwrap();
    assert!(panel.busy().is_busy());

    gate.send(vec![artifact("1", "a.backup", "manual")]).unwrap();
    backups.await.unwrap();

    let snapshot = panel.snapshot().await;
    assert_eq!(snapshot.backups.len(), 1);
    assert_eq!(snapshot.exports.len(), 1);
    assert!(!panel.busy().is_busy());
}

#[tokio::test]
async fn test_busy_indicator_follows_request_lifetime() {
    let api = FakeApi::new();
    let gate = api.gate_backups();
    let (panel, _) = controller(api, true);
    let mut visible = panel.busy().subscribe();

    let mut load = Box::pin(panel.load(ResourceKind::Backup));
    assert!(poll!(load.as_mut()).is_pending());
    assert!(*visible.borrow_and_update());

    drop(gate);
    assert!(load.await.is_err());

    visible.changed().await.unwrap();
    assert!(!*visible.borrow_and_update());
    assert_eq!(panel.busy().in_flight(), 0);
    assert_eq!(panel.drain_notifications().await.len(), 1);
}

#[tokio::test]
async fn test_load_all_fills_every_table() {
    let api = FakeApi::new()
        .with_backups(vec![artifact("1", "a.backup", "manual")])
        .with_exports(vec![artifact("e1", "cfg.json", "export")]);
    let (panel, _) = controller(api, true);

    panel.load_all().await;

    let snapshot = panel.snapshot().await;
    assert_eq!(snapshot.backups.len(), 1);
    assert_eq!(snapshot.exports.len(), 1);
    assert!(snapshot.schedules.is_empty());
    assert!(snapshot.notifications.is_empty());
}
