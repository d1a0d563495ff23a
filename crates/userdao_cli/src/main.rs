//! Demo driver for `userdao_core`.
//!
//! # Responsibility
//! - Walk the users table through its full lifecycle once.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `userdao [DB_PATH]` (in-memory store when no path is given).

use log::info;
use std::error::Error;
use userdao_core::{
    default_log_level, init_logging, LogConfig, SqliteSessionFactory, SqliteUserRepository,
    StoreConfig, UserRepository,
};

const DEMO_USERS: [(&str, &str, u8); 4] = [
    ("Ivan", "Petrov", 25),
    ("Anna", "Sidorova", 31),
    ("Oleg", "Smirnov", 42),
    ("Maria", "Volkova", 19),
];

fn main() -> Result<(), Box<dyn Error>> {
    let mut log_config = LogConfig::new(
        default_log_level(),
        std::env::temp_dir().join("userdao-logs"),
    );
    log_config.duplicate_errors_to_stderr = true;
    if let Err(err) = init_logging(&log_config) {
        eprintln!("logging disabled: {err}");
    }

    let store = match std::env::args().nth(1) {
        Some(path) => StoreConfig::file(path),
        None => StoreConfig::in_memory(),
    };
    let repo = SqliteUserRepository::new(SqliteSessionFactory::new(store)?);

    println!("userdao_core version={}", userdao_core::core_version());
    repo.create_table()?;

    for (first_name, last_name, age) in DEMO_USERS {
        let user = repo.save(first_name, last_name, age)?;
        println!("User named {} added to the database (id={})", user.first_name, user.id);
    }

    for user in repo.find_all()? {
        println!("{user}");
    }

    let removed = repo.clear()?;
    println!("removed {removed} users");
    repo.drop_table()?;

    info!("event=demo_finish module=cli status=ok");
    Ok(())
}
