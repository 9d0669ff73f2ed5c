use std::cmp::Ordering;

use serde::{Serialize, Serializer};

use crate::models::{Category, Course, Difficulty};

/// A closed set of course attributes a query can select on.
pub trait Facet: Copy + PartialEq {
    fn parse(value: &str) -> Option<Self>;
    fn as_str(&self) -> &'static str;
    fn of(course: &Course) -> Self;
}

impl Facet for Difficulty {
    fn parse(value: &str) -> Option<Self> {
        Difficulty::parse(value)
    }

    fn as_str(&self) -> &'static str {
        Difficulty::as_str(self)
    }

    fn of(course: &Course) -> Self {
        course.difficulty
    }
}

impl Facet for Category {
    fn parse(value: &str) -> Option<Self> {
        Category::parse(value)
    }

    fn as_str(&self) -> &'static str {
        Category::as_str(self)
    }

    fn of(course: &Course) -> Self {
        course.category
    }
}

/// Filter on one facet. `Unmatched` keeps a value no course can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    All,
    Only(T),
    Unmatched(String),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: Facet> Selection<T> {
    pub fn from_wire(value: &str) -> Self {
        if value == "all" {
            return Selection::All;
        }
        match T::parse(value) {
            Some(v) => Selection::Only(v),
            None => Selection::Unmatched(value.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Selection::All => "all",
            Selection::Only(v) => v.as_str(),
            Selection::Unmatched(raw) => raw,
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => T::of(course) == *v,
            Selection::Unmatched(_) => false,
        }
    }
}

impl<T: Facet> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most students first.
    #[default]
    Popularity,
    /// Highest rated first.
    Rating,
    /// Shortest first.
    Duration,
    /// Cheapest first.
    Price,
    /// Keeps collection order. Any unrecognised sort value lands here.
    Unsorted,
}

impl SortKey {
    pub const fn all() -> [SortKey; 4] {
        [SortKey::Popularity, SortKey::Rating, SortKey::Duration, SortKey::Price]
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "popular" | "popularity" => SortKey::Popularity,
            "rating" => SortKey::Rating,
            "duration" => SortKey::Duration,
            "price" => SortKey::Price,
            _ => SortKey::Unsorted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popular",
            SortKey::Rating => "rating",
            SortKey::Duration => "duration",
            SortKey::Price => "price",
            SortKey::Unsorted => "unsorted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Popularity => "Most Popular",
            SortKey::Rating => "Highest Rated",
            SortKey::Duration => "Shortest First",
            SortKey::Price => "Price: Low to High",
            SortKey::Unsorted => "Catalog Order",
        }
    }

    pub fn compare(&self, a: &Course, b: &Course) -> Ordering {
        match self {
            SortKey::Popularity => b.students_count.cmp(&a.students_count),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Duration => a.duration.cmp(&b.duration),
            SortKey::Price => a.price.total_cmp(&b.price),
            SortKey::Unsorted => Ordering::Equal,
        }
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CatalogQuery {
    pub term: String,
    pub difficulty: Selection<Difficulty>,
    pub category: Selection<Category>,
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Builds a query from raw wire values; absent values take their defaults.
    pub fn from_wire(
        term: Option<&str>,
        difficulty: Option<&str>,
        category: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        Self {
            term: term.unwrap_or_default().to_string(),
            difficulty: difficulty.map(Selection::from_wire).unwrap_or_default(),
            category: category.map(Selection::from_wire).unwrap_or_default(),
            sort: sort.map(SortKey::from_wire).unwrap_or_default(),
        }
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Selection::Only(difficulty);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Selection::Only(category);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Resets term, difficulty and category. The sort key is kept.
    pub fn clear(&mut self) {
        self.term.clear();
        self.difficulty = Selection::All;
        self.category = Selection::All;
    }

    pub fn is_filtered(&self) -> bool {
        !self.term.is_empty() || self.difficulty != Selection::All || self.category != Selection::All
    }

    pub fn matches(&self, course: &Course) -> bool {
        self.matches_term(&self.term.to_lowercase(), course)
    }

    pub(crate) fn matches_term(&self, needle: &str, course: &Course) -> bool {
        course.mentions(needle) && self.difficulty.matches(course) && self.category.matches(course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_from_wire() {
        assert_eq!(Selection::<Difficulty>::from_wire("all"), Selection::All);
        assert_eq!(
            Selection::<Difficulty>::from_wire("advanced"),
            Selection::Only(Difficulty::Advanced)
        );
        assert_eq!(
            Selection::<Category>::from_wire("cooking"),
            Selection::Unmatched("cooking".to_string())
        );
        assert_eq!(Selection::<Category>::from_wire("cooking").as_wire(), "cooking");
    }

    #[test]
    fn test_sort_key_from_wire() {
        assert_eq!(SortKey::from_wire("popular"), SortKey::Popularity);
        assert_eq!(SortKey::from_wire("popularity"), SortKey::Popularity);
        assert_eq!(SortKey::from_wire("price"), SortKey::Price);
        assert_eq!(SortKey::from_wire("newest"), SortKey::Unsorted);
    }

    #[test]
    fn test_clear_keeps_sort_key() {
        let mut query = CatalogQuery::default()
            .with_term("ai")
            .with_difficulty(Difficulty::Beginner)
            .with_category(Category::Python)
            .with_sort(SortKey::Price);
        assert!(query.is_filtered());

        query.clear();

        assert!(!query.is_filtered());
        assert_eq!(query.sort, SortKey::Price);
        assert_eq!(query, CatalogQuery::default().with_sort(SortKey::Price));
    }

    #[test]
    fn test_from_wire_defaults() {
        let query = CatalogQuery::from_wire(None, None, None, None);
        assert_eq!(query, CatalogQuery::default());
        assert_eq!(query.sort, SortKey::Popularity);
    }

    #[test]
    fn test_query_serializes_wire_values() {
        let query = CatalogQuery::from_wire(Some("bot"), Some("expert"), Some("rpa"), Some("rating"));
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["term"], "bot");
        assert_eq!(json["difficulty"], "expert");
        assert_eq!(json["category"], "rpa");
        assert_eq!(json["sort"], "rating");
    }
}
