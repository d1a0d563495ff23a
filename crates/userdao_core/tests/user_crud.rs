use rusqlite::Connection;
use std::collections::HashSet;
use userdao_core::{
    SessionProvider, SqliteSessionFactory, SqliteUserRepository, StoreConfig, User, UserRepository,
};

fn memory_repo() -> SqliteUserRepository<SqliteSessionFactory> {
    SqliteUserRepository::new(SqliteSessionFactory::in_memory().unwrap())
}

#[test]
fn create_table_yields_empty_table_and_is_idempotent() {
    let repo = memory_repo();

    repo.create_table().unwrap();
    assert_table_exists(repo.provider(), true);
    assert!(repo.find_all().unwrap().is_empty());

    repo.create_table().unwrap();
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn drop_then_create_round_trip_succeeds() {
    let repo = memory_repo();
    repo.create_table().unwrap();
    repo.save("Ann", "Lee", 30).unwrap();

    repo.drop_table().unwrap();
    assert_table_exists(repo.provider(), false);
    repo.drop_table().unwrap();

    repo.create_table().unwrap();
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn save_then_find_all_returns_the_saved_user() {
    let repo = memory_repo();
    repo.create_table().unwrap();

    let saved = repo.save("Ann", "Lee", 30).unwrap();
    let users = repo.find_all().unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0], saved);
    assert_eq!(users[0].first_name, "Ann");
    assert_eq!(users[0].last_name, "Lee");
    assert_eq!(users[0].age, 30);
    assert!(users[0].id > 0);
}

#[test]
fn save_assigns_distinct_ids() {
    let repo = memory_repo();
    repo.create_table().unwrap();

    let ids: HashSet<_> = (0..5)
        .map(|age| repo.save("Same", "Name", age).unwrap().id)
        .collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn save_accepts_age_bounds() {
    let repo = memory_repo();
    repo.create_table().unwrap();

    repo.save("Young", "One", u8::MIN).unwrap();
    repo.save("Old", "One", u8::MAX).unwrap();

    let mut ages: Vec<u8> = repo
        .find_all()
        .unwrap()
        .iter()
        .map(|user| user.age)
        .collect();
    ages.sort_unstable();
    assert_eq!(ages, vec![0, 255]);
}

#[test]
fn remove_by_id_removes_exactly_that_user() {
    let repo = memory_repo();
    repo.create_table().unwrap();
    let ann = repo.save("Ann", "Lee", 30).unwrap();
    let bob = repo.save("Bob", "Ray", 41).unwrap();

    assert!(repo.remove_by_id(ann.id).unwrap());

    let users = repo.find_all().unwrap();
    assert_eq!(users, vec![bob]);
}

#[test]
fn remove_by_missing_id_is_a_noop() {
    let repo = memory_repo();
    repo.create_table().unwrap();
    let ann = repo.save("Ann", "Lee", 30).unwrap();

    assert!(!repo.remove_by_id(ann.id + 100).unwrap());
    assert_eq!(repo.find_all().unwrap(), vec![ann]);
}

#[test]
fn remove_by_id_binds_parameter() {
    let repo = memory_repo();
    repo.create_table().unwrap();
    repo.save("Ann", "Lee", 30).unwrap();

    // A name shaped like SQL must be stored verbatim.
    let tricky = repo.save("Robert'); DROP TABLE users;--", "Tables", 12).unwrap();
    assert!(repo.remove_by_id(tricky.id).unwrap());

    assert_table_exists(repo.provider(), true);
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn clear_removes_all_rows_but_keeps_table() {
    let repo = memory_repo();
    repo.create_table().unwrap();
    for age in 20..24 {
        repo.save("User", "Many", age).unwrap();
    }

    assert_eq!(repo.clear().unwrap(), 4);
    assert!(repo.find_all().unwrap().is_empty());
    assert_table_exists(repo.provider(), true);

    assert_eq!(repo.clear().unwrap(), 0);
}

#[test]
fn ids_are_not_reused_after_clear() {
    let repo = memory_repo();
    repo.create_table().unwrap();
    let first = repo.save("Ann", "Lee", 30).unwrap();
    repo.clear().unwrap();

    let second = repo.save("Ann", "Lee", 30).unwrap();
    assert!(second.id > first.id);
}

#[test]
fn file_store_persists_across_factories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");

    let saved = {
        let factory = SqliteSessionFactory::new(StoreConfig::file(&path)).unwrap();
        let repo = SqliteUserRepository::new(factory);
        repo.create_table().unwrap();
        repo.save("Ann", "Lee", 30).unwrap()
    };

    let factory = SqliteSessionFactory::new(StoreConfig::file(&path)).unwrap();
    let repo = SqliteUserRepository::new(factory);
    assert_eq!(repo.find_all().unwrap(), vec![saved]);

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn repository_accepts_borrowed_provider() {
    let factory = SqliteSessionFactory::in_memory().unwrap();
    let writer = SqliteUserRepository::new(&factory);
    let reader = SqliteUserRepository::new(&factory);

    writer.create_table().unwrap();
    let saved: User = writer.save("Ann", "Lee", 30).unwrap();

    assert_eq!(reader.find_all().unwrap(), vec![saved]);
}

fn assert_table_exists(provider: &impl SessionProvider, expected: bool) {
    let session = provider.open_session().unwrap();
    let exists: i64 = session
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'users'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists == 1, expected, "unexpected users table presence");
}
