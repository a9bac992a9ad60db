use crate::query_helpers::SqlFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PaginationParams {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self { limit, offset }
    }

    /// Appends `LIMIT`/`OFFSET` to `query`, numbering the placeholders after
    /// the parameters already bound in `filter`.
    pub fn append_to(&self, query: &mut String, filter: &mut SqlFilter) {
        if let Some(limit) = self.limit {
            let p = filter.bind(limit as i64);
            query.push_str(&format!(" LIMIT {p}"));
        }

        if let Some(offset) = self.offset {
            let p = filter.bind(offset as i64);
            query.push_str(&format!(" OFFSET {p}"));
        }
    }
}
