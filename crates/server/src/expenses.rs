//! Expenses API endpoints

use api_types::expense::{
    ExpenseCategory, ExpenseDeleted, ExpenseNew, ExpenseQuery, ExpenseReport, ExpenseUpdate,
    ExpenseView,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{Category, Cost, DateFilter, ExpensePatch};

use crate::{ServerError, server::ServerState};

fn map_category(category: Category) -> ExpenseCategory {
    match category {
        Category::Mandatory => ExpenseCategory::Mandatory,
        Category::Entertainment => ExpenseCategory::Entertainment,
        Category::Food => ExpenseCategory::Food,
        Category::Household => ExpenseCategory::Household,
    }
}

fn parse_category(category: ExpenseCategory) -> Category {
    match category {
        ExpenseCategory::Mandatory => Category::Mandatory,
        ExpenseCategory::Entertainment => Category::Entertainment,
        ExpenseCategory::Food => Category::Food,
        ExpenseCategory::Household => Category::Household,
    }
}

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        description: expense.description,
        category: map_category(expense.category),
        cost: expense.cost.as_f64(),
        created_at: expense.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ExpenseQuery>, QueryRejection>,
) -> Result<Json<ExpenseReport>, ServerError> {
    let Query(query) = query?;
    tracing::info!(
        "listing expenses: year={:?}, month={:?}, day={:?}",
        query.year,
        query.month,
        query.day
    );

    let filter = DateFilter::new(query.year, query.month, query.day);
    let report = state.engine.expenses(&filter).await?;

    tracing::info!(
        "found {} expenses with total cost {}",
        report.items.len(),
        report.total_cost
    );

    Ok(Json(ExpenseReport {
        total_cost: report.total_cost.as_f64(),
        items: report.items.into_iter().map(map_expense).collect(),
    }))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let Json(payload) = payload?;
    tracing::info!(
        "creating expense: description={:?}, category={:?}, cost={}",
        payload.description,
        payload.category,
        payload.cost
    );

    let cost = Cost::try_from_f64(payload.cost)?;
    let expense = state
        .engine
        .create_expense(&payload.description, parse_category(payload.category), cost)
        .await?;

    tracing::info!("expense created with id {}", expense.id);
    Ok((StatusCode::CREATED, Json(map_expense(expense))))
}

pub async fn edit(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<Option<ExpenseView>>, ServerError> {
    let Json(payload) = payload?;
    tracing::info!("editing expense {id}: {payload:?}");

    let patch = ExpensePatch {
        description: payload.description,
        category: payload.category.map(parse_category),
        cost: payload.cost.map(Cost::try_from_f64).transpose()?,
    };

    let updated = state.engine.edit_expense(&id, patch).await?;
    if updated.is_none() {
        tracing::warn!("expense {id} not found for update");
    }

    Ok(Json(updated.map(map_expense)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseDeleted>, ServerError> {
    tracing::info!("deleting expense {id}");

    let deleted = state.engine.delete_expense(&id).await?;
    if deleted {
        tracing::info!("expense {id} deleted");
    } else {
        tracing::warn!("expense {id} not found for deletion");
    }

    Ok(Json(ExpenseDeleted { deleted }))
}
