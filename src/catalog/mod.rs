//! Course catalog and its query pipeline.
//!
//! The collection is validated once when the [`Catalog`] is built and never
//! changes afterwards. [`Catalog::query`] is a pure function of the
//! collection and a [`CatalogQuery`]: filter on term, difficulty and
//! category, then a stable sort on the query's [`SortKey`].

pub mod query;
pub mod sample;

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::Course;

pub use query::{CatalogQuery, Facet, Selection, SortKey};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate course id: {0}")]
    DuplicateId(String),

    #[error("course {id}: rating {rating} is outside 0..=5")]
    RatingOutOfRange { id: String, rating: f64 },

    #[error("course {id}: progress {progress} is outside 0..=100")]
    ProgressOutOfRange { id: String, progress: u8 },

    #[error("course {id}: price {price} is negative")]
    NegativePrice { id: String, price: f64 },

    #[error("course {id}: free flag does not match price {price}")]
    FreeFlagMismatch { id: String, price: f64 },

    #[error("course {0}: duration must be positive")]
    ZeroDuration(String),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

/// One page of results plus the counts shown above the grid.
#[derive(Debug, Serialize)]
pub struct CatalogPage<'a> {
    pub courses: Vec<&'a Course>,
    pub shown: usize,
    pub total: usize,
    pub query: CatalogQuery,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !seen.insert(course.id.as_str()) {
                return Err(CatalogError::DuplicateId(course.id.clone()));
            }
            validate(course)?;
        }
        Ok(Self { courses })
    }

    pub fn sample() -> Self {
        Self {
            courses: sample::sample_courses(),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)?;
        let courses: Vec<Course> = serde_json::from_str(&body)?;
        let catalog = Self::new(courses)?;
        info!("Loaded {} courses from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn query(&self, query: &CatalogQuery) -> Vec<&Course> {
        let needle = query.term.to_lowercase();
        let mut matched: Vec<&Course> = self
            .courses
            .iter()
            .filter(|course| query.matches_term(&needle, course))
            .collect();

        if query.sort != SortKey::Unsorted {
            matched.sort_by(|a, b| query.sort.compare(a, b));
        }
        matched
    }

    pub fn search(&self, query: CatalogQuery) -> CatalogPage<'_> {
        let courses = self.query(&query);
        CatalogPage {
            shown: courses.len(),
            total: self.len(),
            courses,
            query,
        }
    }
}

fn validate(course: &Course) -> Result<(), CatalogError> {
    if !(0.0..=5.0).contains(&course.rating) {
        return Err(CatalogError::RatingOutOfRange {
            id: course.id.clone(),
            rating: course.rating,
        });
    }
    if let Some(progress) = course.progress {
        if progress > 100 {
            return Err(CatalogError::ProgressOutOfRange {
                id: course.id.clone(),
                progress,
            });
        }
    }
    if course.price.is_nan() || course.price < 0.0 {
        return Err(CatalogError::NegativePrice {
            id: course.id.clone(),
            price: course.price,
        });
    }
    if course.is_free != (course.price == 0.0) {
        return Err(CatalogError::FreeFlagMismatch {
            id: course.id.clone(),
            price: course.price,
        });
    }
    if course.duration == 0 {
        return Err(CatalogError::ZeroDuration(course.id.clone()));
    }
    Ok(())
}
