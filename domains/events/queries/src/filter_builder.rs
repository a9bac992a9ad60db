use chrono::{Days, NaiveDate, Utc};

use crate::{
    DateFilter, EventPredicate, EventQuery, GetEventsQuery, PageRequest,
    date_filter::start_of_day, event_query::EventSort,
};

/// Translates optional listing parameters into one [`EventQuery`].
///
/// Steps run in a fixed order: category, date (keyword first, explicit
/// range otherwise), search, sort, window.
#[derive(Debug, Clone, Copy)]
pub struct QueryFilterBuilder {
    today: NaiveDate,
}

impl QueryFilterBuilder {
    pub fn new(today: NaiveDate) -> Self { Self { today } }

    /// Builder anchored at the current UTC date.
    pub fn for_now() -> Self { Self::new(Utc::now().date_naive()) }

    pub fn build(&self, query: &GetEventsQuery, page: PageRequest) -> EventQuery {
        let mut predicates = Vec::new();

        if let Some(category) = query
            .category_name_filter
            .as_deref()
            .filter(|c| !c.is_empty())
        {
            predicates.push(EventPredicate::CategoryNameEquals(
                category.to_string(),
            ));
        }

        self.push_date_predicates(query, &mut predicates);

        if let Some(term) =
            query.search_term.as_deref().filter(|t| !t.trim().is_empty())
        {
            predicates.push(EventPredicate::TextContains(term.to_lowercase()));
        }

        EventQuery {
            predicates,
            sort: EventSort::StartDateAscending,
            window: Some(page.window()),
        }
    }

    fn push_date_predicates(
        &self, query: &GetEventsQuery, predicates: &mut Vec<EventPredicate>,
    ) {
        if let Some(keyword) =
            query.date_filter.as_deref().filter(|k| !k.trim().is_empty())
        {
            // An unknown keyword still suppresses the explicit range.
            if let Some(filter) = DateFilter::parse(keyword) {
                let (from, until) = filter.bounds(self.today);
                predicates.extend(from.map(EventPredicate::StartsOnOrAfter));
                predicates.extend(until.map(EventPredicate::StartsBefore));
            }
            return;
        }

        if let Some(from) = query.specific_date_from {
            predicates.push(EventPredicate::StartsOnOrAfter(start_of_day(from)));
        }
        if let Some(to) = query.specific_date_to {
            if let Some(next_day) = to.checked_add_days(Days::new(1)) {
                predicates
                    .push(EventPredicate::StartsBefore(start_of_day(next_day)));
            }
        }
    }
}
