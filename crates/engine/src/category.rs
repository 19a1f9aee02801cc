use crate::EngineError;

/// Closed set of expense categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Mandatory,
    Entertainment,
    Food,
    Household,
}

impl Category {
    /// Canonical string stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mandatory => "MANDATORY",
            Self::Entertainment => "ENTERTAINMENT",
            Self::Food => "FOOD",
            Self::Household => "HOUSEHOLD",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "MANDATORY" => Ok(Self::Mandatory),
            "ENTERTAINMENT" => Ok(Self::Entertainment),
            "FOOD" => Ok(Self::Food),
            "HOUSEHOLD" => Ok(Self::Household),
            other => Err(EngineError::InvalidExpense(format!(
                "invalid category: {other}"
            ))),
        }
    }
}
