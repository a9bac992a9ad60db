use chrono::{DateTime, Utc};
use events_models::Event;

/// A single filter step. Stores translate each variant to their own query
/// language; [`EventPredicate::matches`] is the reference semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPredicate {
    /// Case-insensitive equality on the joined category name. Events
    /// without a loaded category never match.
    CategoryNameEquals(String),
    StartsOnOrAfter(DateTime<Utc>),
    StartsBefore(DateTime<Utc>),
    /// Lowercased needle matched as a substring of the name, the
    /// description, or the category name.
    TextContains(String),
}

impl EventPredicate {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::CategoryNameEquals(name) => event
                .category_name()
                .is_some_and(|c| c.to_lowercase() == name.to_lowercase()),
            Self::StartsOnOrAfter(from) => event.start_date >= *from,
            Self::StartsBefore(until) => event.start_date < *until,
            Self::TextContains(needle) => {
                let contains = |text: &str| text.to_lowercase().contains(needle.as_str());
                contains(&event.name)
                    || event.description.as_deref().is_some_and(contains)
                    || event.category_name().is_some_and(contains)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSort {
    /// Ascending start date, ties broken by id.
    #[default]
    StartDateAscending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
}

/// Filter, sort and window over events, executed once by a store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventQuery {
    pub predicates: Vec<EventPredicate>,
    pub sort: EventSort,
    pub window: Option<PageWindow>,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        self.predicates.iter().all(|p| p.matches(event))
    }

    /// Same filter without the page window, for counting.
    pub fn unpaged(&self) -> Self {
        Self {
            window: None,
            ..self.clone()
        }
    }

    pub fn count<'a>(&self, events: impl IntoIterator<Item = &'a Event>) -> u64 {
        events.into_iter().filter(|e| self.matches(e)).count() as u64
    }

    /// Filters, sorts and windows an in-memory collection.
    pub fn apply(&self, events: impl IntoIterator<Item = Event>) -> Vec<Event> {
        let mut matched: Vec<Event> =
            events.into_iter().filter(|e| self.matches(e)).collect();

        match self.sort {
            EventSort::StartDateAscending => {
                matched.sort_by(|a, b| {
                    a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id))
                });
            }
        }

        match self.window {
            Some(PageWindow { skip, take }) => matched
                .into_iter()
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(usize::try_from(take).unwrap_or(usize::MAX))
                .collect(),
            None => matched,
        }
    }
}
