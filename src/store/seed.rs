/// Sample data written to a fresh store so the dashboard is not empty on
/// first launch.
use chrono::NaiveDate;

use crate::types::{Availability, Engineer, Expense, ExpenseType, Trip, TripStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

pub fn engineers() -> Vec<Engineer> {
    vec![
        Engineer {
            id: "1".to_string(),
            name: "Marie Dubois".to_string(),
            email: "marie.dubois@company.fr".to_string(),
            role: "Senior Electrical Engineer".to_string(),
            daily_rate: 800.0,
            color: "#3B82F6".to_string(),
        },
        Engineer {
            id: "2".to_string(),
            name: "Jean Martin".to_string(),
            email: "jean.martin@company.fr".to_string(),
            role: "Mechanical Engineer".to_string(),
            daily_rate: 750.0,
            color: "#10B981".to_string(),
        },
        Engineer {
            id: "3".to_string(),
            name: "Sophie Laurent".to_string(),
            email: "sophie.laurent@company.fr".to_string(),
            role: "Control Systems Engineer".to_string(),
            daily_rate: 820.0,
            color: "#F59E0B".to_string(),
        },
        Engineer {
            id: "4".to_string(),
            name: "Pierre Bernard".to_string(),
            email: "pierre.bernard@company.fr".to_string(),
            role: "Project Manager".to_string(),
            daily_rate: 900.0,
            color: "#8B5CF6".to_string(),
        },
    ]
}

pub fn trips() -> Vec<Trip> {
    vec![
        Trip {
            id: "1".to_string(),
            engineer_id: "1".to_string(),
            project_name: "Mumbai Power Plant".to_string(),
            location: "Mumbai, India".to_string(),
            start_date: date(2024, 1, 15),
            end_date: date(2024, 1, 25),
            status: TripStatus::Completed,
            notes: Some("Initial site assessment and equipment inspection".to_string()),
        },
        Trip {
            id: "2".to_string(),
            engineer_id: "2".to_string(),
            project_name: "Bangalore Factory".to_string(),
            location: "Bangalore, India".to_string(),
            start_date: date(2024, 2, 10),
            end_date: date(2024, 2, 20),
            status: TripStatus::Completed,
            notes: None,
        },
        Trip {
            id: "3".to_string(),
            engineer_id: "1".to_string(),
            project_name: "Delhi Infrastructure".to_string(),
            location: "Delhi, India".to_string(),
            start_date: date(2024, 3, 5),
            end_date: date(2024, 3, 15),
            status: TripStatus::Completed,
            notes: None,
        },
        Trip {
            id: "4".to_string(),
            engineer_id: "3".to_string(),
            project_name: "Chennai Automation".to_string(),
            location: "Chennai, India".to_string(),
            start_date: date(2024, 12, 10),
            end_date: date(2024, 12, 20),
            status: TripStatus::Confirmed,
            notes: Some("Control system commissioning".to_string()),
        },
        Trip {
            id: "5".to_string(),
            engineer_id: "4".to_string(),
            project_name: "Hyderabad Planning".to_string(),
            location: "Hyderabad, India".to_string(),
            start_date: date(2025, 1, 8),
            end_date: date(2025, 1, 12),
            status: TripStatus::Planned,
            notes: Some("Project kickoff and planning".to_string()),
        },
        Trip {
            id: "6".to_string(),
            engineer_id: "2".to_string(),
            project_name: "Pune Installation".to_string(),
            location: "Pune, India".to_string(),
            start_date: date(2025, 1, 15),
            end_date: date(2025, 1, 28),
            status: TripStatus::Planned,
            notes: None,
        },
    ]
}

pub fn expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: "1".to_string(),
            trip_id: "1".to_string(),
            engineer_id: "1".to_string(),
            kind: ExpenseType::Travel,
            amount: 1200.0,
            currency: "EUR".to_string(),
            date: date(2024, 1, 15),
            description: "Paris to Mumbai flight (round trip)".to_string(),
            receipt: None,
        },
        Expense {
            id: "2".to_string(),
            trip_id: "1".to_string(),
            engineer_id: "1".to_string(),
            kind: ExpenseType::Accommodation,
            amount: 1500.0,
            currency: "EUR".to_string(),
            date: date(2024, 1, 15),
            description: "Hotel Mumbai - 10 nights".to_string(),
            receipt: None,
        },
        Expense {
            id: "3".to_string(),
            trip_id: "1".to_string(),
            engineer_id: "1".to_string(),
            kind: ExpenseType::Meals,
            amount: 450.0,
            currency: "EUR".to_string(),
            date: date(2024, 1, 15),
            description: "Per diem meals".to_string(),
            receipt: None,
        },
        Expense {
            id: "4".to_string(),
            trip_id: "2".to_string(),
            engineer_id: "2".to_string(),
            kind: ExpenseType::Travel,
            amount: 1150.0,
            currency: "EUR".to_string(),
            date: date(2024, 2, 10),
            description: "Paris to Bangalore flight".to_string(),
            receipt: None,
        },
        Expense {
            id: "5".to_string(),
            trip_id: "2".to_string(),
            engineer_id: "2".to_string(),
            kind: ExpenseType::Accommodation,
            amount: 1200.0,
            currency: "EUR".to_string(),
            date: date(2024, 2, 10),
            description: "Hotel Bangalore - 10 nights".to_string(),
            receipt: None,
        },
    ]
}

pub fn availabilities() -> Vec<Availability> {
    Vec::new()
}
