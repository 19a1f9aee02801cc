use crate::{Cost, DateRange, EngineError, Expense, ResultEngine};

/// Expenses selected by a query together with their total cost.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseReport {
    pub items: Vec<Expense>,
    pub total_cost: Cost,
}

impl ExpenseReport {
    /// Keeps the records created inside `range` (all of them when `None`),
    /// preserving their order, and sums their cost.
    ///
    /// Fails with [`EngineError::InvalidAmount`] when the total does not fit
    /// in an `i64` of cents.
    pub fn collect<I>(records: I, range: Option<&DateRange>) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = Expense>,
    {
        let items: Vec<Expense> = records
            .into_iter()
            .filter(|expense| range.is_none_or(|r| r.contains(expense.created_at)))
            .collect();
        let total_cost = items
            .iter()
            .try_fold(Cost::ZERO, |total, expense| total.checked_add(expense.cost))
            .ok_or_else(|| EngineError::InvalidAmount("total cost overflows".to_string()))?;

        Ok(Self { items, total_cost })
    }
}
