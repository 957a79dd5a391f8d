use std::fmt;
use thiserror::Error;

/// Which schema constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Check => "check",
        })
    }
}

/// Errors surfaced by the repositories.
#[derive(Error, Debug)]
pub enum DbError {
    /// No row matched the key
    #[error("Entity not found")]
    NotFound,

    #[error("{kind} constraint failed: {message}")]
    Constraint {
        kind: ConstraintKind,
        table: Option<String>,
        message: String,
    },

    /// Pool, I/O and decode failures
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn constraint_kind(db_err: &dyn sqlx::error::DatabaseError) -> Option<ConstraintKind> {
    if db_err.is_unique_violation() {
        Some(ConstraintKind::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(ConstraintKind::ForeignKey)
    } else if db_err.is_check_violation() {
        Some(ConstraintKind::Check)
    } else {
        None
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => DbError::NotFound,
            sqlx::Error::Database(db_err) => match constraint_kind(db_err.as_ref()) {
                Some(kind) => DbError::Constraint {
                    kind,
                    table: db_err.table().map(str::to_owned),
                    message: db_err.message().to_owned(),
                },
                None => DbError::Other(anyhow::Error::from(err)),
            },
            _ => DbError::Other(anyhow::Error::from(err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(DbError::from(sqlx::Error::RowNotFound), DbError::NotFound));
    }

    #[test]
    fn pool_timeout_is_opaque() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::Other(_)));
    }

    #[test]
    fn constraint_display_names_the_kind() {
        let err = DbError::Constraint {
            kind: ConstraintKind::ForeignKey,
            table: None,
            message: "FOREIGN KEY constraint failed".to_string(),
        };
        assert_eq!(err.to_string(), "foreign key constraint failed: FOREIGN KEY constraint failed");
    }
}
