use super::*;

/// Tests loading from an empty data directory.
///
/// Expected: default record, no files created
#[tokio::test]
async fn load_defaults_when_files_missing() {
    let test = TestContext::new().unwrap();
    let store = FileStateStore::new(test.data_dir());

    let config = store.load().await;

    assert_eq!(config.channel_id, None);
    assert_eq!(config.role_id, None);
    assert_eq!(config.last_video_id, "");
    assert!(test.files().unwrap().is_empty());
}

/// Tests loading when `config.json` is corrupt.
///
/// Expected: default record instead of an error
#[tokio::test]
async fn load_degrades_on_corrupt_config() {
    let test = TestContext::new().unwrap();
    test.write("config.json", "{not json").unwrap();
    test.write("last_video_id.txt", "v1").unwrap();
    let store = FileStateStore::new(test.data_dir());

    let config = store.load().await;

    assert_eq!(config.channel_id, None);
    assert_eq!(config.last_video_id, "");
}

/// Tests reading files written by earlier versions with numeric ids.
///
/// Expected: ids parsed, marker trimmed
#[tokio::test]
async fn load_reads_legacy_numeric_ids() {
    let test = TestContext::new().unwrap();
    test.write("config.json", r#"{"channel_id": 7, "role_id": 42}"#)
        .unwrap();
    test.write("last_video_id.txt", "v1\n").unwrap();
    let store = FileStateStore::new(test.data_dir());

    let config = store.load().await;

    assert_eq!(config.channel_id, Some(ChannelId::new(7)));
    assert_eq!(config.role_id, Some(RoleId::new(42)));
    assert_eq!(config.last_video_id, "v1");
}

/// Tests that consecutive partial saves merge rather than clobber.
///
/// Saving the channel and then only the role keeps both.
///
/// Expected: `{channel_id: "7", role_id: "42"}`
#[tokio::test]
async fn save_merges_partial_updates() {
    let test = TestContext::new().unwrap();
    let store = FileStateStore::new(test.data_dir());

    assert!(
        store
            .save(MonitorConfigPatch {
                channel_id: Some(Some(ChannelId::new(7))),
                ..MonitorConfigPatch::default()
            })
            .await
    );
    assert!(
        store
            .save(MonitorConfigPatch {
                role_id: Some(Some(RoleId::new(42))),
                ..MonitorConfigPatch::default()
            })
            .await
    );

    let config = store.load().await;
    assert_eq!(config.channel_id, Some(ChannelId::new(7)));
    assert_eq!(config.role_id, Some(RoleId::new(42)));
    assert!(config.last_updated.is_some());

    let stored: serde_json::Value =
        serde_json::from_str(&test.read("config.json").unwrap().unwrap()).unwrap();
    assert_eq!(stored["channel_id"], "7");
    assert_eq!(stored["role_id"], "42");
}

/// Tests that advancing the marker keeps the destination intact.
///
/// Expected: marker file holds the bare id, channel unchanged
#[tokio::test]
async fn save_marker_keeps_destination() {
    let test = TestContext::new().unwrap();
    let store = FileStateStore::new(test.data_dir());

    store
        .save(MonitorConfigPatch::destination(ChannelId::new(7), None))
        .await;
    assert!(store.save(MonitorConfigPatch::last_video("v2")).await);

    assert_eq!(
        test.read("last_video_id.txt").unwrap(),
        Some("v2".to_string())
    );
    let config = store.load().await;
    assert_eq!(config.channel_id, Some(ChannelId::new(7)));
    assert_eq!(config.last_video_id, "v2");
}

/// Tests that atomic writes leave no temporary files behind.
///
/// Expected: only the two monitor files exist
#[tokio::test]
async fn save_leaves_no_temporary_files() {
    let test = TestContext::new().unwrap();
    let store = FileStateStore::new(test.data_dir());

    store.save(MonitorConfigPatch::last_video("v1")).await;

    assert_eq!(
        test.files().unwrap(),
        vec!["config.json".to_string(), "last_video_id.txt".to_string()]
    );
}

/// Tests saving into a data directory that does not exist yet.
///
/// Expected: directory created, save succeeds
#[tokio::test]
async fn save_creates_missing_directory() {
    let test = TestContext::new().unwrap();
    let store = FileStateStore::new(test.path("nested/state"));

    assert!(store.save(MonitorConfigPatch::last_video("v1")).await);
    assert_eq!(store.load().await.last_video_id, "v1");
}

/// Tests a marker save whose `config.json` write fails.
///
/// `config.json` is a directory, so the rename over it fails.
///
/// Expected: save returns false and the previous marker is kept
#[tokio::test]
async fn failed_save_keeps_previous_marker() {
    let test = TestContext::new().unwrap();
    test.write("last_video_id.txt", "v1").unwrap();
    std::fs::create_dir(test.path("config.json")).unwrap();
    let store = FileStateStore::new(test.data_dir());

    assert!(!store.save(MonitorConfigPatch::last_video("v2")).await);
    assert_eq!(test.read("last_video_id.txt").unwrap().as_deref(), Some("v1"));
}

/// Tests the ticket counter sequence.
///
/// Expected: 1, 2, 3 and the count persisted
#[tokio::test]
async fn ticket_counter_increments() {
    let test = TestContext::new().unwrap();
    let store = FileStateStore::new(test.data_dir());

    assert_eq!(store.next_ticket_number().await, 1);
    assert_eq!(store.next_ticket_number().await, 2);
    assert_eq!(store.next_ticket_number().await, 3);

    let reopened = FileStateStore::new(test.data_dir());
    assert_eq!(reopened.next_ticket_number().await, 4);
}

/// Tests the ticket counter with a corrupt counter file.
///
/// Expected: restarts at 1
#[tokio::test]
async fn ticket_counter_recovers_from_corrupt_file() {
    let test = TestContext::new().unwrap();
    test.write("ticket_state.json", "garbage").unwrap();
    let store = FileStateStore::new(test.data_dir());

    assert_eq!(store.next_ticket_number().await, 1);
}
