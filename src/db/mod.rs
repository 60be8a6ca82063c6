mod migrate;
pub mod prescriptions;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Local prescription store backed by SQLite.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Open (creating if needed) the store at `path`. The file is kept at
    /// mode 0600 on unix.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        restrict_permissions(path)?;

        tracing::debug!(path = %path.display(), "opening prescription store");
        let conn = Connection::open(path)?;
        let db = Self { conn };
        migrate::run(&db.conn)?;
        Ok(db)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::fs::{self, OpenOptions};
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    if !path.exists() {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .mode(0o600)
            .open(path)?;
    } else {
        let mut perms = fs::metadata(path)?.permissions();
        if perms.mode() & 0o777 != 0o600 {
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }
    }
    Ok(())
}
