// src/model.rs
//! Wire types exchanged with the recipe backend

use serde::{Deserialize, Serialize};

/// Backend-assigned recipe identifier
///
/// The backend may hand out numeric or string ids. The value is kept exactly
/// as received so it round-trips into request paths unchanged; numbers are
/// not narrowed, so floats and values past `i64::MAX` survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for RecipeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(value: i64) -> Self {
        RecipeId::Number(value.into())
    }
}

impl From<i32> for RecipeId {
    fn from(value: i32) -> Self {
        RecipeId::Number(value.into())
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        RecipeId::Text(value.to_string())
    }
}

/// A recipe as returned by `GET /recipes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub instructions: String,
}

impl Recipe {
    pub fn new(
        id: impl Into<RecipeId>,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            instructions: instructions.into(),
        }
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub instructions: String,
}

/// Body of `POST /register`
///
/// The registration form also collects an email address; the backend
/// contract only takes the username and password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Find the first recipe in `recipes` whose name equals `name` exactly
pub fn find_by_name<'a>(recipes: &'a [Recipe], name: &str) -> Option<&'a Recipe> {
    recipes.iter().find(|r| r.name == name)
}
