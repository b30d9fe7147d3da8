use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type EngineerId = String;
pub type TripId = String;
pub type ExpenseId = String;
pub type AvailabilityId = String;

/// A field engineer who can be assigned trips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Engineer {
    pub id: EngineerId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub daily_rate: f64,
    pub color: String,
}

/// An on-site assignment with an inclusive date range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    pub engineer_id: EngineerId,
    pub project_name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TripStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripStatus {
    Planned,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const ALL: [TripStatus; 5] = [
        TripStatus::Planned,
        TripStatus::Confirmed,
        TripStatus::InProgress,
        TripStatus::Completed,
        TripStatus::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TripStatus::Planned => "planned",
            TripStatus::Confirmed => "confirmed",
            TripStatus::InProgress => "in-progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TripStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TripStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown trip status '{s}'"))
    }
}

/// A cost item attached to a trip. `engineer_id` is denormalized from the
/// trip and not validated against it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub trip_id: TripId,
    pub engineer_id: EngineerId,
    #[serde(rename = "type")]
    pub kind: ExpenseType,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpenseType {
    Travel,
    Accommodation,
    Meals,
    Transportation,
    Other,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 5] = [
        ExpenseType::Travel,
        ExpenseType::Accommodation,
        ExpenseType::Meals,
        ExpenseType::Transportation,
        ExpenseType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseType::Travel => "travel",
            ExpenseType::Accommodation => "accommodation",
            ExpenseType::Meals => "meals",
            ExpenseType::Transportation => "transportation",
            ExpenseType::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseType::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown expense type '{s}'"))
    }
}

/// A self-declared travel-readiness window. Records may overlap; the first
/// record in list order wins when a period is queried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub id: AvailabilityId,
    pub engineer_id: EngineerId,
    pub status: AvailabilityStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    Available,
    OnBreak,
    Flexible,
    CannotTravel,
    LimitedAvailability,
}

impl AvailabilityStatus {
    pub const ALL: [AvailabilityStatus; 5] = [
        AvailabilityStatus::Available,
        AvailabilityStatus::OnBreak,
        AvailabilityStatus::Flexible,
        AvailabilityStatus::CannotTravel,
        AvailabilityStatus::LimitedAvailability,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::OnBreak => "on-break",
            AvailabilityStatus::Flexible => "flexible",
            AvailabilityStatus::CannotTravel => "cannot-travel",
            AvailabilityStatus::LimitedAvailability => "limited-availability",
        }
    }

    /// Single-character marker shown in timeline cells.
    pub fn marker(self) -> char {
        match self {
            AvailabilityStatus::Available => 'A',
            AvailabilityStatus::OnBreak => 'B',
            AvailabilityStatus::Flexible => 'F',
            AvailabilityStatus::CannotTravel => 'X',
            AvailabilityStatus::LimitedAvailability => 'L',
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AvailabilityStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown availability status '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_labels() {
        for status in TripStatus::ALL {
            assert_eq!(status.label().parse::<TripStatus>().unwrap(), status);
        }
        for kind in ExpenseType::ALL {
            assert_eq!(kind.label().parse::<ExpenseType>().unwrap(), kind);
        }
        for status in AvailabilityStatus::ALL {
            assert_eq!(
                status.label().parse::<AvailabilityStatus>().unwrap(),
                status
            );
        }
    }

    #[test]
    fn unknown_enum_values_fail_loudly() {
        assert!("on-site".parse::<TripStatus>().is_err());
        let raw = r#"{"id":"a-1","engineer_id":"1","status":"half-day",
            "start_date":"2024-01-01","end_date":"2024-01-02"}"#;
        assert!(serde_json::from_str::<Availability>(raw).is_err());
    }

    #[test]
    fn serde_uses_kebab_case_labels() {
        let json = serde_json::to_string(&TripStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let json = serde_json::to_string(&AvailabilityStatus::CannotTravel).unwrap();
        assert_eq!(json, "\"cannot-travel\"");
    }
}
