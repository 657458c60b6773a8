use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type EventId = i64;

/// A catalog entry. Events are static for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub price: Decimal,
    pub category: String,
    pub image: String,
    pub organizer: String,
    pub available_seats: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Music,
    Tech,
    Sports,
    Art,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Music => "Music",
            Category::Tech => "Tech",
            Category::Sports => "Sports",
            Category::Art => "Art",
        }
    }

    /// `All` matches every event regardless of its category string.
    pub fn matches(&self, event: &Event) -> bool {
        matches!(self, Category::All) || event.category == self.as_str()
    }
}
