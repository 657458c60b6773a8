use crate::models::{Category, Event, EventId};

const BUILTIN_EVENTS: &str = include_str!("../../data/events.json");

/// Read-only event catalog.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        let events: Vec<Event> = serde_json::from_str(BUILTIN_EVENTS)?;
        tracing::debug!(count = events.len(), "Loaded built-in event catalog");
        Ok(Self::new(events))
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Filters by category, then by a case-insensitive title substring.
    /// A blank term keeps every event in the category.
    pub fn search(&self, category: Category, term: &str) -> Vec<&Event> {
        let term = term.trim().to_lowercase();
        self.events
            .iter()
            .filter(|event| category.matches(event))
            .filter(|event| event.title.to_lowercase().contains(&term))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(events: Vec<&Event>) -> Vec<&str> {
        events.into_iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = EventCatalog::builtin().unwrap();
        assert!(!catalog.all().is_empty());

        let mut ids: Vec<EventId> = catalog.all().iter().map(|e| e.id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total, "event ids must be unique");
    }

    #[test]
    fn test_find_by_id() {
        let catalog = EventCatalog::builtin().unwrap();
        assert_eq!(catalog.find(1).map(|e| e.title.as_str()), Some("Synthwave Dreams"));
        assert!(catalog.find(9999).is_none());
    }

    #[test]
    fn test_search_by_category() {
        let catalog = EventCatalog::builtin().unwrap();
        assert_eq!(
            titles(catalog.search(Category::Music, "")),
            vec!["Synthwave Dreams", "Rooftop Jazz Evenings"]
        );
        assert_eq!(catalog.search(Category::All, "").len(), catalog.all().len());
    }

    #[test]
    fn test_search_term_is_case_insensitive() {
        let catalog = EventCatalog::builtin().unwrap();
        assert_eq!(titles(catalog.search(Category::All, "  MARATHON ")), vec!["City Marathon 2025"]);
        assert!(catalog.search(Category::Art, "marathon").is_empty());
    }
}
