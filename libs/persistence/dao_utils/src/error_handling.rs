use tokio_postgres::error::SqlState;

/// True when the statement was rejected by a foreign key, unique, or
/// not-null constraint rather than by a backend failure.
pub fn is_constraint_violation(err: &tokio_postgres::Error) -> bool {
    matches!(
        err.code(),
        Some(code) if *code == SqlState::FOREIGN_KEY_VIOLATION
            || *code == SqlState::UNIQUE_VIOLATION
            || *code == SqlState::NOT_NULL_VIOLATION
    )
}
