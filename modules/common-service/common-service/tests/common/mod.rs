#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use anyhow::Result;
use common_service::infra::storage::SeaOrmCommonDao;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tempfile::TempDir;

/// Fixture schema: users, dishes (`meishixinxi`) and orders (`meishidingdan`).
const FIXTURE: &str = r"
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL,
    role TEXT,
    level INTEGER,
    parent TEXT
);
INSERT INTO users (id, username, role, level, parent) VALUES
    (1, 'admin', 'admin', 1, NULL),
    (2, 'zhangsan', 'member', 2, 'admin'),
    (3, 'lisi', 'member', 2, 'admin'),
    (4, 'vip_user', 'vip', 2, 'zhangsan'),
    (5, 'ghost', NULL, 3, NULL),
    (6, 'blank', '', 3, NULL);

CREATE TABLE meishixinxi (
    id INTEGER PRIMARY KEY,
    meishimingcheng TEXT NOT NULL,
    meishifenlei TEXT,
    jiage REAL,
    kucun INTEGER,
    shangjiariqi TEXT
);
INSERT INTO meishixinxi (id, meishimingcheng, meishifenlei, jiage, kucun, shangjiariqi) VALUES
    (1, 'beef noodles', 'noodles', 18.5, 20, '2024-01-05'),
    (2, 'dan dan noodles', 'noodles', 12.0, 0, '2024-02-10'),
    (3, 'mapo tofu', 'sichuan', 22.0, 5, '2024-03-15'),
    (4, 'kung pao chicken', 'sichuan', 28.5, 12, '2024-06-01'),
    (5, 'spring rolls', 'snacks', 8.0, 40, '2025-01-20');

CREATE TABLE meishidingdan (
    id INTEGER PRIMARY KEY,
    meishimingcheng TEXT NOT NULL,
    jiage REAL NOT NULL,
    sfsh TEXT NOT NULL DEFAULT 'pending',
    shhf TEXT
);
INSERT INTO meishidingdan (id, meishimingcheng, jiage, sfsh, shhf) VALUES
    (1, 'beef noodles', 18.5, 'pending', NULL),
    (2, 'mapo tofu', 22.0, 'pending', NULL),
    (3, 'beef noodles', 18.5, 'yes', 'ok');
";

/// A seeded SQLite database living in a temporary directory.
pub struct Fixture {
    pub db: DatabaseConnection,
    _dir: TempDir,
}

impl Fixture {
    pub fn dao(&self) -> SeaOrmCommonDao {
        SeaOrmCommonDao::new(self.db.clone())
    }
}

/// Creates a file-backed SQLite database and loads the fixture tables.
///
/// # Errors
/// Returns an error if the database cannot be created or seeded.
pub async fn seeded_sqlite() -> Result<Fixture> {
    let dir = TempDir::new()?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("common.db").display());

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(8).sqlx_logging(false);
    let db = Database::connect(opts).await?;

    for stmt in FIXTURE.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        db.execute_unprepared(stmt).await?;
    }

    Ok(Fixture { db, _dir: dir })
}
