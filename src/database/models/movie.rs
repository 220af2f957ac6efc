use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};

use super::{Entity, FieldSpec};
use crate::database::object_id::ObjectId;

/// Watchlist entry. Numeric fields keep the exact JSON number the client sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub title: String,
    pub director: String,
    pub genre: String,
    pub release_year: Number,
    pub rating: Number,
    pub watched: bool,
}

impl Entity for Movie {
    const COLLECTION: &'static str = "movies";
    const LABEL: &'static str = "Movie";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::text("title"),
        FieldSpec::text("director"),
        FieldSpec::text("genre"),
        FieldSpec::number("releaseYear"),
        FieldSpec::number("rating"),
        FieldSpec::boolean("watched"),
    ];
    const VALIDATION_MESSAGE: &'static str =
        "All fields (title, director, genre, releaseYear, rating, watched) are required with correct data types.";
    const DELETED_MESSAGE: &'static str = "Movie deleted";

    fn created_body(id: ObjectId, movie: &Self) -> Value {
        json!({
            "message": "Movie added",
            "id": id,
            "movie": movie,
        })
    }
}
