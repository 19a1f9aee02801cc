use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Category, Cost, EngineError, ResultEngine};

/// A single expense record.
///
/// `id` and `created_at` are assigned once, at creation, and never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub category: Category,
    pub cost: Cost,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        description: &str,
        category: Category,
        cost: Cost,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            description: normalize_description(description)?,
            category,
            cost,
            created_at,
        })
    }
}

/// Partial update of an [`Expense`].
///
/// Only the editable fields appear here; `None` leaves the stored value as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub category: Option<Category>,
    pub cost: Option<Cost>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.category.is_none() && self.cost.is_none()
    }

    /// Validates the patch and turns it into an active model touching only the
    /// provided columns.
    pub(crate) fn into_active_model(self, id: Uuid) -> ResultEngine<ActiveModel> {
        let description = self
            .description
            .as_deref()
            .map(normalize_description)
            .transpose()?;

        Ok(ActiveModel {
            id: ActiveValue::Unchanged(id.to_string()),
            description: description.map_or(ActiveValue::NotSet, ActiveValue::Set),
            category: self
                .category
                .map_or(ActiveValue::NotSet, |c| ActiveValue::Set(c.as_str().to_string())),
            cost_minor: self
                .cost
                .map_or(ActiveValue::NotSet, |c| ActiveValue::Set(c.cents())),
            created_at: ActiveValue::NotSet,
        })
    }
}

fn normalize_description(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidExpense(
            "description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub description: String,
    pub category: String,
    pub cost_minor: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id.to_string()),
            description: ActiveValue::Set(expense.description.clone()),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            cost_minor: ActiveValue::Set(expense.cost.cents()),
            created_at: ActiveValue::Set(expense.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| {
                EngineError::InvalidExpense(format!("stored id is not a UUID: {}", model.id))
            })?,
            description: model.description,
            category: Category::try_from(model.category.as_str())?,
            cost: Cost::from_cents(model.cost_minor)?,
            created_at: model.created_at,
        })
    }
}
