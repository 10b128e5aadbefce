mod common;

use std::sync::Arc;
use voicevault::config::VaultConfig;
use voicevault::domain::values::category_kind::CategoryKind;
use voicevault::domain::values::lane::Lane;
use voicevault::infrastructure::encoding::trigram::TrigramEncoder;
use voicevault::VoiceVault;

fn open(path: &str) -> VoiceVault {
    VoiceVault::with_providers(path, VaultConfig::default(), Arc::new(TrigramEncoder::default())).unwrap()
}

#[tokio::test]
async fn test_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let path = path.to_str().unwrap();

    let (saved_ids, last_seq) = {
        let vault = open(path);
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "hello there friend").unwrap();
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "hello there buddy").unwrap();
        let last = vault
            .add_sample(CategoryKind::StyleBank, "Noir", Lane::Narration, "rain on neon")
            .unwrap();
        vault.create_category(CategoryKind::Voice, "Empty").unwrap();
        assert_eq!(vault.save().unwrap(), 3);

        let ids: Vec<(String, u64)> = vault
            .list_samples(CategoryKind::Voice, "Mara", Lane::Dialogue)
            .unwrap()
            .into_iter()
            .map(|s| (s.id, s.seq))
            .collect();
        (ids, last.seq)
    };

    let vault = open(path);
    let reloaded: Vec<(String, u64)> = vault
        .list_samples(CategoryKind::Voice, "Mara", Lane::Dialogue)
        .unwrap()
        .into_iter()
        .map(|s| (s.id, s.seq))
        .collect();
    assert_eq!(reloaded, saved_ids);
    assert_eq!(
        vault.list_categories(CategoryKind::Voice).unwrap(),
        vec!["Empty", "Mara"]
    );
    assert_eq!(vault.list_categories(CategoryKind::StyleBank).unwrap(), vec!["Noir"]);

    // New samples continue the creation order.
    let next = vault
        .add_sample(CategoryKind::Voice, "Mara", Lane::Action, "she ran")
        .unwrap();
    assert!(next.seq > last_seq);

    let results = vault
        .retrieve(CategoryKind::Voice, "Mara", Lane::Dialogue, "hello there pal", 2)
        .unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_save_replaces_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let path = path.to_str().unwrap();

    {
        let vault = open(path);
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "keep me").unwrap();
        vault.add_sample(CategoryKind::Voice, "Gone", Lane::Dialogue, "drop me").unwrap();
        vault.save().unwrap();
    }
    {
        let vault = open(path);
        assert!(vault.delete_category(CategoryKind::Voice, "Gone").unwrap());
        vault.save().unwrap();
    }

    let vault = open(path);
    assert_eq!(vault.list_categories(CategoryKind::Voice).unwrap(), vec!["Mara"]);
    assert_eq!(vault.stats(CategoryKind::Voice, "Mara").unwrap().total_samples, 1);
}

#[tokio::test]
async fn test_unsaved_changes_are_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let path = path.to_str().unwrap();

    {
        let vault = open(path);
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "never saved").unwrap();
    }
    let vault = open(path);
    assert!(vault.list_categories(CategoryKind::Voice).unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = VaultConfig {
        cache_capacity: 0,
        ..Default::default()
    };
    let result = VoiceVault::with_providers(":memory:", config, Arc::new(TrigramEncoder::default()));
    assert!(result.is_err());
}

fn count_rows(path: &str) -> i64 {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM samples", [], |r| r.get(0))
        .unwrap()
}

#[tokio::test]
async fn test_unreadable_rows_survive_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let path = path.to_str().unwrap();

    {
        let vault = open(path);
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "hello there").unwrap();
        vault.save().unwrap();
    }
    {
        let conn = rusqlite::Connection::open(path).unwrap();
        conn.execute(
            "INSERT INTO samples (id, kind, category, lane, text, word_count, seq, created_at)
             VALUES ('odd-lane', 'voice', 'Mara', 'Monologue', 'to be or not', 4, 50, '2024-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO samples (id, kind, category, lane, text, word_count, seq, created_at)
             VALUES ('odd-count', 'voice', 'Mara', 'Dialogue', 'words words', 'many', 51, '2024-01-01T00:00:00Z')",
            [],
        )
        .unwrap();
    }
    assert_eq!(count_rows(path), 3);

    {
        let vault = open(path);
        assert_eq!(
            vault.list_samples(CategoryKind::Voice, "Mara", Lane::Dialogue).unwrap().len(),
            1
        );
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Action, "she ran").unwrap();
        vault.save().unwrap();
    }
    assert_eq!(count_rows(path), 4);
}

#[tokio::test]
async fn test_deleted_samples_are_removed_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.db");
    let path = path.to_str().unwrap();

    {
        let vault = open(path);
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "first").unwrap();
        vault.add_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, "second").unwrap();
        vault.save().unwrap();
    }
    {
        let vault = open(path);
        let removed = vault
            .delete_sample(CategoryKind::Voice, "Mara", Lane::Dialogue, 0)
            .unwrap()
            .unwrap();
        assert_eq!(removed.text, "second");
        vault.save().unwrap();
    }
    assert_eq!(count_rows(path), 1);

    let vault = open(path);
    let left = vault.list_samples(CategoryKind::Voice, "Mara", Lane::Dialogue).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].text, "first");
}
