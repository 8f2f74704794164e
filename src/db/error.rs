use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,

    #[error("Stored record is inconsistent: {0}")]
    Corrupt(String),
}

impl DatabaseError {
    /// Map unique-violation errors onto `Duplicate`
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Duplicate,
            sqlx::Error::RowNotFound => DatabaseError::NotFound,
            _ => DatabaseError::Sqlx(err),
        }
    }
}
