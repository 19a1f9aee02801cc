//! Expense tracking engine.
//!
//! Holds the domain model ([`Expense`], [`Category`], [`Cost`]), the date
//! filter resolver ([`DateFilter`] → [`DateRange`]), report aggregation
//! ([`ExpenseReport`]) and the [`Engine`] that persists expenses through a
//! sea-orm connection.

pub use category::Category;
pub use clock::{Clock, FixedClock, SystemClock};
pub use cost::Cost;
pub use date_range::{DateFilter, DateRange};
pub use error::EngineError;
pub use expenses::{Expense, ExpensePatch};
pub use ops::{Engine, EngineBuilder};
pub use report::ExpenseReport;

mod category;
mod clock;
mod cost;
mod date_range;
mod error;
mod expenses;
mod ops;
mod report;

type ResultEngine<T> = Result<T, EngineError>;
