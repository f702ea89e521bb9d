use serde::{Deserialize, Serialize};

use crate::entities::movie;

/// A stored movie. `id` is only assigned by the database backend and is
/// left out of the JSON when absent.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Movie {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub is_super_hero: bool,
}

/// Client-submitted movie. Any `id` in the request body is ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct NewMovie {
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub is_super_hero: bool,
}

impl From<movie::Model> for Movie {
    fn from(m: movie::Model) -> Self {
        Self {
            id: Some(m.id),
            imdb_id: m.imdb_id,
            title: m.title,
            year: m.year,
            rating: m.rating,
            is_super_hero: m.is_super_hero,
        }
    }
}

impl From<NewMovie> for Movie {
    fn from(m: NewMovie) -> Self {
        Self {
            id: None,
            imdb_id: m.imdb_id,
            title: m.title,
            year: m.year,
            rating: m.rating,
            is_super_hero: m.is_super_hero,
        }
    }
}
