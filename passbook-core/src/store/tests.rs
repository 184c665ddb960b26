use super::*;

fn store() -> CredentialStore {
    let store = CredentialStore::in_memory(TableName::default()).unwrap();
    store.ensure_schema().unwrap();
    store
}

fn credential(website: &str, username: &str, password: &str) -> NewCredential {
    NewCredential::new(website, username, password)
}

#[test]
fn test_insert_and_list() {
    let store = store();
    let before = store.list_all().unwrap();
    assert!(before.is_empty());

    let id = store
        .insert(&credential("example.com", "alice", "Passw0rd!"))
        .unwrap();
    assert!(id > 0);

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].website, "example.com");
    assert_eq!(records[0].username, "alice");
    assert_eq!(records[0].password, "Passw0rd!");
    assert_eq!(records[0].created_at, records[0].updated_at);
}

#[test]
fn test_ids_are_unique_and_listed_in_insertion_order() {
    let store = store();
    let first = store.insert(&credential("b.com", "bob", "abcd1234")).unwrap();
    let second = store.insert(&credential("a.com", "amy", "abcd1234")).unwrap();
    let third = store.insert(&credential("c.com", "cat", "abcd1234")).unwrap();

    assert_ne!(first, second);
    assert_ne!(second, third);

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn test_deleted_ids_are_not_reused() {
    let store = store();
    let first = store.insert(&credential("a.com", "amy", "abcd1234")).unwrap();
    assert!(store.delete(first).unwrap());

    let second = store.insert(&credential("b.com", "bob", "abcd1234")).unwrap();
    assert!(second > first);
}

#[test]
fn test_update_existing_record() {
    let store = store();
    let id = store
        .insert(&credential("example.com", "alice", "Passw0rd!"))
        .unwrap();

    let changed = store
        .update(id, &credential("example.org", "alice2", "N3wPassword"))
        .unwrap();
    assert!(changed);

    let record = store.get(id).unwrap().unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.website, "example.org");
    assert_eq!(record.username, "alice2");
    assert_eq!(record.password, "N3wPassword");
    assert!(record.updated_at >= record.created_at);
}

#[test]
fn test_update_refreshes_updated_at_only() {
    let store = store();
    let id = store
        .insert(&credential("example.com", "alice", "Passw0rd!"))
        .unwrap();
    store
        .database()
        .conn()
        .execute(
            "UPDATE password_info SET created_at = 1, updated_at = 1 WHERE id = ?1",
            [id],
        )
        .unwrap();

    assert!(store
        .update(id, &credential("example.com", "alice", "N3wPassword"))
        .unwrap());

    let record = store.get(id).unwrap().unwrap();
    assert_eq!(record.created_at.timestamp(), 1);
    assert!(record.updated_at > record.created_at);
}

#[test]
fn test_update_missing_id_is_silent() {
    let store = store();
    let id = store
        .insert(&credential("example.com", "alice", "Passw0rd!"))
        .unwrap();

    let changed = store
        .update(id + 100, &credential("other.com", "mallory", "Passw0rd!"))
        .unwrap();
    assert!(!changed);

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].website, "example.com");
}

#[test]
fn test_delete_record() {
    let store = store();
    let id = store
        .insert(&credential("example.com", "alice", "Passw0rd!"))
        .unwrap();

    assert!(store.delete(id).unwrap());
    assert!(store.get(id).unwrap().is_none());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_delete_missing_id_is_noop() {
    let store = store();
    store
        .insert(&credential("example.com", "alice", "Passw0rd!"))
        .unwrap();

    assert!(!store.delete(9999).unwrap());
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_search_matches_website_or_username_ignoring_case() {
    let store = store();
    let github = store
        .insert(&credential("GitHub.com", "alice", "Passw0rd!"))
        .unwrap();
    let mail = store
        .insert(&credential("mail.example", "Hubert", "Passw0rd!"))
        .unwrap();
    store
        .insert(&credential("bank.example", "carol", "Passw0rd!"))
        .unwrap();

    let ids: Vec<i64> = store.search("hub").unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![github, mail]);

    let ids: Vec<i64> = store.search("ALICE").unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![github]);

    assert!(store.search("nothing-here").unwrap().is_empty());
}

#[test]
fn test_search_empty_term_returns_all() {
    let store = store();
    store.insert(&credential("a.com", "amy", "abcd1234")).unwrap();
    store.insert(&credential("b.com", "bob", "abcd1234")).unwrap();

    assert_eq!(store.search("").unwrap().len(), 2);
}

#[test]
fn test_search_treats_wildcards_literally() {
    let store = store();
    let underscored = store
        .insert(&credential("my_site.com", "amy", "abcd1234"))
        .unwrap();
    store
        .insert(&credential("myXsite.com", "bob", "abcd1234"))
        .unwrap();
    store
        .insert(&credential("plain.com", "carol", "abcd1234"))
        .unwrap();

    let ids: Vec<i64> = store.search("y_s").unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![underscored]);
    assert!(store.search("%").unwrap().is_empty());
}

#[test]
fn test_custom_table_name() {
    let table = TableName::new("work_credentials").unwrap();
    let store = CredentialStore::in_memory(table.clone()).unwrap();
    store.ensure_schema().unwrap();
    store
        .insert(&credential("intranet", "amy", "abcd1234"))
        .unwrap();

    assert_eq!(store.table(), &table);
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[test]
fn test_missing_table_is_a_store_error() {
    let store = CredentialStore::in_memory(TableName::default()).unwrap();

    let result = store.list_all();
    assert!(matches!(
        result,
        Err(crate::PassbookError::Database(DatabaseError::Sqlite(_)))
    ));
}

#[test]
fn test_records_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("passbook.db");

    let id = {
        let store = CredentialStore::open(&path, TableName::default()).unwrap();
        store.ensure_schema().unwrap();
        store
            .insert(&credential("example.com", "alice", "Passw0rd!"))
            .unwrap()
    };

    let store = CredentialStore::open(&path, TableName::default()).unwrap();
    store.ensure_schema().unwrap();
    assert_eq!(store.path(), Some(path.as_path()));

    let record = store.get(id).unwrap().unwrap();
    assert_eq!(record.website, "example.com");
}

#[test]
fn test_end_to_end_lifecycle() {
    let store = store();

    let id = store
        .insert(&credential("github.com", "alice", "Passw0rd!"))
        .unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);

    store
        .update(id, &credential("github.io", "alice", "Passw0rd!"))
        .unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].website, "github.io");

    store.delete(id).unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_escape_like() {
    assert_eq!(escape_like("plain"), "plain");
    assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
}
