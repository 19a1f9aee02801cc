use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `DateTime` scalar: how timestamps travel on the wire.
pub mod scalar {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

    /// RFC 3339 with an explicit `+00:00` offset and only as many fractional
    /// digits as needed.
    pub fn serialize_datetime(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    /// Parses an RFC 3339 timestamp, or a naive ISO 8601 one taken as UTC.
    ///
    /// Malformed input yields `None` instead of an error.
    pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// `#[serde(with = "...")]` adapter for `DateTime<Utc>` fields.
    pub mod datetime {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            value: &DateTime<Utc>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&super::serialize_datetime(value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<DateTime<Utc>, D::Error> {
            let raw = String::deserialize(deserializer)?;
            super::parse_datetime(&raw)
                .ok_or_else(|| D::Error::custom(format!("invalid DateTime: {raw}")))
        }
    }

}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum ExpenseCategory {
        Mandatory,
        Entertainment,
        Food,
        Household,
    }

    /// Query string of `GET /expenses`.
    ///
    /// `month` and `day` only matter when `year` is present.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseQuery {
        pub year: Option<i32>,
        pub month: Option<u32>,
        pub day: Option<u32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub category: ExpenseCategory,
        pub cost: f64,
    }

    /// Partial update: absent fields are left untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub description: Option<String>,
        pub category: Option<ExpenseCategory>,
        pub cost: Option<f64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        /// Expense id (UUID), serialized as a string.
        pub id: Uuid,
        pub description: String,
        pub category: ExpenseCategory,
        pub cost: f64,
        #[serde(with = "crate::scalar::datetime")]
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseReport {
        pub items: Vec<ExpenseView>,
        pub total_cost: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDeleted {
        pub deleted: bool,
    }
}

pub mod health {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum HealthStatus {
        Up,
        Down,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ComponentHealth {
        pub status: HealthStatus,
        pub details: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: HealthStatus,
        pub components: BTreeMap<String, ComponentHealth>,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::expense::*;

    #[test]
    fn expense_view_uses_camel_case_and_scalar() {
        let view = ExpenseView {
            id: uuid::Uuid::nil(),
            description: "lunch".to_string(),
            category: ExpenseCategory::Food,
            cost: 15.0,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["createdAt"], "2024-06-15T09:00:00+00:00");
        assert_eq!(json["category"], "FOOD");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");

        let back: ExpenseView = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn update_fields_are_optional() {
        let update: ExpenseUpdate = serde_json::from_str(r#"{"cost": 12.5}"#).unwrap();
        assert_eq!(update.cost, Some(12.5));
        assert!(update.description.is_none());
        assert!(update.category.is_none());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let res = serde_json::from_str::<ExpenseNew>(
            r#"{"description": "x", "category": "TRAVEL", "cost": 1}"#,
        );
        assert!(res.is_err());
    }
}
