use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Category, Cost, DateFilter, DateRange, Expense, ExpensePatch, ExpenseReport, ResultEngine,
    expenses,
};

use super::{Engine, with_tx};

trait ApplyRange: QueryFilter + Sized {
    fn apply_range(self, range: Option<&DateRange>) -> Self;
}

impl<T> ApplyRange for T
where
    T: QueryFilter + Sized,
{
    fn apply_range(mut self, range: Option<&DateRange>) -> Self {
        let Some(range) = range else {
            return self;
        };

        self = self.filter(expenses::Column::CreatedAt.gte(range.start));
        if range.end_inclusive {
            self.filter(expenses::Column::CreatedAt.lte(range.end))
        } else {
            self.filter(expenses::Column::CreatedAt.lt(range.end))
        }
    }
}

/// Malformed ids cannot match a stored expense, so they are treated as absent.
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

impl Engine {
    /// Builds the report for a date filter, evaluated at the engine clock's
    /// current instant.
    pub async fn expenses(&self, filter: &DateFilter) -> ResultEngine<ExpenseReport> {
        let range = filter.resolve(self.now())?;
        let records = self.find_expenses(range.as_ref()).await?;
        ExpenseReport::collect(records, range.as_ref())
    }

    /// Loads the expenses created inside `range` (all of them when `None`),
    /// oldest first.
    pub async fn find_expenses(&self, range: Option<&DateRange>) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .apply_range(range)
            .order_by_asc(expenses::Column::CreatedAt)
            .order_by_asc(expenses::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    /// Loads a single expense. Malformed ids yield `None`.
    pub async fn expense(&self, id: &str) -> ResultEngine<Option<Expense>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        expenses::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .map(Expense::try_from)
            .transpose()
    }

    /// Stores a new expense stamped with the current instant.
    pub async fn create_expense(
        &self,
        description: &str,
        category: Category,
        cost: Cost,
    ) -> ResultEngine<Expense> {
        let expense = Expense::new(description, category, cost, self.now())?;
        let model = expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Expense::try_from(model)
    }

    /// Applies `patch` to the expense `id` and returns the updated record.
    ///
    /// Returns `None` when the id is malformed or unknown, before the patch is
    /// validated. An empty patch returns the stored record untouched.
    pub async fn edit_expense(
        &self,
        id: &str,
        patch: ExpensePatch,
    ) -> ResultEngine<Option<Expense>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return self.expense(&id.to_string()).await;
        }

        with_tx!(self, |db_tx| {
            let exists = expenses::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                let updated = patch.into_active_model(id)?.update(&db_tx).await?;
                Expense::try_from(updated).map(Some)
            } else {
                Ok(None)
            }
        })
    }

    /// Deletes the expense `id`. Returns `false` when nothing was deleted.
    pub async fn delete_expense(&self, id: &str) -> ResultEngine<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let result = expenses::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
