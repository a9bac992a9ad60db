use tokio_postgres::types::ToSql;

pub type PgParam = dyn ToSql + Sync;
pub type PgSendParam = dyn ToSql + Sync + Send;
pub type PgParamBox = Box<PgSendParam>;
pub type PgParamVec = Vec<PgParamBox>;

/// Accumulates `AND`-joined predicates and their numbered parameters.
///
/// ```
/// use dao_utils::SqlFilter;
///
/// let mut filter = SqlFilter::default();
/// let p = filter.bind("music".to_string());
/// filter.push(format!("LOWER(c.name) = LOWER({p})"));
///
/// assert_eq!(filter.where_clause(), " WHERE LOWER(c.name) = LOWER($1)");
/// ```
#[derive(Default)]
pub struct SqlFilter {
    clauses: Vec<String>,
    params: PgParamVec,
}

impl SqlFilter {
    /// Registers a parameter and returns its `$n` placeholder.
    pub fn bind<T>(&mut self, value: T) -> String
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Box::new(value));
        format!("${}", self.params.len())
    }

    pub fn push(&mut self, clause: impl Into<String>) {
        self.clauses.push(clause.into());
    }

    pub fn param_count(&self) -> usize { self.params.len() }

    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        }
        else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub fn param_refs(&self) -> Vec<&PgParam> {
        self.params.iter().map(|p| p.as_ref() as &PgParam).collect()
    }
}
