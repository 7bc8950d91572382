/*
 * Responsibility
 * - Drinks request/response DTOs and the two menu representations
 * - validation (shape checks) via validate()
 */
use serde::{Deserialize, Serialize};

use crate::repos::drink_repo::DrinkRow;

/// One ingredient of a drink recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: i64,
}

/// Public menu view: ingredient names withheld.
#[derive(Debug, Serialize)]
pub struct IngredientShort {
    pub color: String,
    pub parts: i64,
}

#[derive(Debug, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

#[derive(Debug, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

impl TryFrom<DrinkRow> for DrinkLong {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&row.recipe)?;
        Ok(Self {
            id: row.drink_id,
            title: row.title,
            recipe,
        })
    }
}

impl TryFrom<DrinkRow> for DrinkShort {
    type Error = serde_json::Error;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        let recipe: Vec<Ingredient> = serde_json::from_str(&row.recipe)?;
        Ok(Self {
            id: row.drink_id,
            title: row.title,
            recipe: recipe
                .into_iter()
                .map(|i| IngredientShort {
                    color: i.color,
                    parts: i.parts,
                })
                .collect(),
        })
    }
}

/// `recipe` in request bodies may be a single ingredient object or a list;
/// a single object is treated as a one-element list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            Self::Many(list) => list,
            Self::One(ingredient) => vec![ingredient],
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Self::Many(list) if list.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDrinkRequest {
    pub title: String,
    pub recipe: RecipeInput,
}

impl CreateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.recipe.is_empty() {
            return Err("recipe must contain at least one ingredient");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateDrinkRequest {
    pub title: Option<String>,
    pub recipe: Option<RecipeInput>,
}

impl UpdateDrinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(recipe) = &self.recipe
            && recipe.is_empty()
        {
            return Err("recipe must contain at least one ingredient");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkListResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    pub delete: i64,
}
