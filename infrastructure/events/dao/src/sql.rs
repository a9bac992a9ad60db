//! Rendering of [`EventQuery`] into PostgreSQL.

use dao_utils::{PaginationParams, SqlFilter};
use events_queries::{EventPredicate, EventQuery, EventSort};

pub const SELECT_EVENT: &str = "SELECT e.id, e.name, e.description, \
                                e.image_id, e.category_id, e.start_date, \
                                e.end_date, e.status, e.location_id, c.id, \
                                c.name FROM events e LEFT JOIN categories c \
                                ON c.id = e.category_id";

const COUNT_EVENT: &str = "SELECT COUNT(*) FROM events e LEFT JOIN \
                           categories c ON c.id = e.category_id";

fn filter_for(query: &EventQuery) -> SqlFilter {
    let mut filter = SqlFilter::default();

    for predicate in &query.predicates {
        match predicate {
            EventPredicate::CategoryNameEquals(name) => {
                let p = filter.bind(name.clone());
                filter.push(format!("LOWER(c.name) = LOWER({p})"));
            }
            EventPredicate::StartsOnOrAfter(from) => {
                let p = filter.bind(*from);
                filter.push(format!("e.start_date >= {p}"));
            }
            EventPredicate::StartsBefore(until) => {
                let p = filter.bind(*until);
                filter.push(format!("e.start_date < {p}"));
            }
            EventPredicate::TextContains(needle) => {
                let p = filter.bind(needle.to_lowercase());
                filter.push(format!(
                    "(strpos(LOWER(e.name), {p}) > 0 OR \
                     strpos(LOWER(COALESCE(e.description, '')), {p}) > 0 OR \
                     strpos(LOWER(COALESCE(c.name, '')), {p}) > 0)"
                ));
            }
        }
    }

    filter
}

/// Select statement with filter, ordering and window applied.
pub fn select_matching(query: &EventQuery) -> (String, SqlFilter) {
    let mut filter = filter_for(query);
    let mut sql = format!("{SELECT_EVENT}{}", filter.where_clause());

    match query.sort {
        EventSort::StartDateAscending => {
            sql.push_str(" ORDER BY e.start_date ASC, e.id ASC");
        }
    }

    if let Some(window) = query.window {
        PaginationParams::new(Some(window.take), Some(window.skip))
            .append_to(&mut sql, &mut filter);
    }

    (sql, filter)
}

/// Count statement over the same filter. Sorting and windowing are dropped.
pub fn count_matching(query: &EventQuery) -> (String, SqlFilter) {
    let filter = filter_for(query);
    let sql = format!("{COUNT_EVENT}{}", filter.where_clause());
    (sql, filter)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use events_queries::PageWindow;

    use super::*;

    #[test]
    fn unfiltered_query_orders_by_start_date_then_id() {
        let (sql, filter) = select_matching(&EventQuery::default());

        assert_eq!(
            sql,
            format!("{SELECT_EVENT} ORDER BY e.start_date ASC, e.id ASC")
        );
        assert_eq!(filter.param_count(), 0);
    }

    #[test]
    fn predicates_are_and_joined_before_the_window() {
        let from = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let query = EventQuery {
            predicates: vec![
                EventPredicate::CategoryNameEquals("Music".into()),
                EventPredicate::StartsOnOrAfter(from),
            ],
            window: Some(PageWindow { skip: 20, take: 10 }),
            ..EventQuery::default()
        };

        let (sql, filter) = select_matching(&query);

        assert!(sql.contains(
            " WHERE LOWER(c.name) = LOWER($1) AND e.start_date >= $2 ORDER BY"
        ));
        assert!(sql.ends_with(" LIMIT $3 OFFSET $4"));
        assert_eq!(filter.param_count(), 4);
    }

    #[test]
    fn text_search_reuses_one_parameter() {
        let query = EventQuery {
            predicates: vec![EventPredicate::TextContains("jazz".into())],
            ..EventQuery::default()
        };

        let (sql, filter) = count_matching(&query);

        assert!(sql.starts_with("SELECT COUNT(*)"));
        assert_eq!(sql.matches("$1").count(), 3);
        assert_eq!(filter.param_count(), 1);
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn count_ignores_the_window() {
        let query = EventQuery {
            window: Some(PageWindow { skip: 0, take: 5 }),
            ..EventQuery::default()
        };

        let (sql, filter) = count_matching(&query);

        assert!(!sql.contains("ORDER BY"));
        assert_eq!(filter.param_count(), 0);
    }
}
