/// Persistence: a flat key-value store with one fixed key per collection,
/// each value a JSON-serialized array. Collections are loaded whole at
/// startup (seeded when absent) and rewritten whole on every mutation.
mod seed;

use anyhow::{bail, Result};
use rand::RngExt;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::types::{Availability, Engineer, Expense, Trip};

const KEY_ENGINEERS: &str = "engineers";
const KEY_TRIPS: &str = "trips";
const KEY_EXPENSES: &str = "expenses";
const KEY_AVAILABILITIES: &str = "availabilities";

/// A full read of all four collections, in stored (insertion) order.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub engineers: Vec<Engineer>,
    pub trips: Vec<Trip>,
    pub expenses: Vec<Expense>,
    pub availabilities: Vec<Availability>,
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the store and ensures the schema exists.
    pub fn open(path: &str) -> Result<Store> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> Result<Store> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            engineers: self.engineers()?,
            trips: self.trips()?,
            expenses: self.expenses()?,
            availabilities: self.availabilities()?,
        })
    }

    pub fn engineers(&self) -> Result<Vec<Engineer>> {
        self.read_or_seed(KEY_ENGINEERS, seed::engineers)
    }

    pub fn trips(&self) -> Result<Vec<Trip>> {
        self.read_or_seed(KEY_TRIPS, seed::trips)
    }

    pub fn expenses(&self) -> Result<Vec<Expense>> {
        self.read_or_seed(KEY_EXPENSES, seed::expenses)
    }

    pub fn availabilities(&self) -> Result<Vec<Availability>> {
        self.read_or_seed(KEY_AVAILABILITIES, seed::availabilities)
    }

    pub fn add_engineer(&self, engineer: Engineer) -> Result<Engineer> {
        let mut engineers = self.engineers()?;
        engineers.push(engineer.clone());
        self.write_key(KEY_ENGINEERS, &engineers)?;
        Ok(engineer)
    }

    pub fn add_trip(&self, trip: Trip) -> Result<Trip> {
        let mut trips = self.trips()?;
        trips.push(trip.clone());
        self.write_key(KEY_TRIPS, &trips)?;
        Ok(trip)
    }

    pub fn update_trip(&self, trip: &Trip) -> Result<()> {
        let mut trips = self.trips()?;
        let Some(slot) = trips.iter_mut().find(|t| t.id == trip.id) else {
            bail!("No trip with id '{}'", trip.id);
        };
        *slot = trip.clone();
        self.write_key(KEY_TRIPS, &trips)
    }

    /// Deletes a trip. No cascade: expenses referencing the trip stay.
    pub fn delete_trip(&self, id: &str) -> Result<()> {
        let mut trips = self.trips()?;
        let before = trips.len();
        trips.retain(|t| t.id != id);
        if trips.len() == before {
            bail!("No trip with id '{id}'");
        }
        self.write_key(KEY_TRIPS, &trips)
    }

    pub fn add_expense(&self, expense: Expense) -> Result<Expense> {
        let mut expenses = self.expenses()?;
        expenses.push(expense.clone());
        self.write_key(KEY_EXPENSES, &expenses)?;
        Ok(expense)
    }

    pub fn update_expense(&self, expense: &Expense) -> Result<()> {
        let mut expenses = self.expenses()?;
        let Some(slot) = expenses.iter_mut().find(|e| e.id == expense.id) else {
            bail!("No expense with id '{}'", expense.id);
        };
        *slot = expense.clone();
        self.write_key(KEY_EXPENSES, &expenses)
    }

    pub fn delete_expense(&self, id: &str) -> Result<()> {
        let mut expenses = self.expenses()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            bail!("No expense with id '{id}'");
        }
        self.write_key(KEY_EXPENSES, &expenses)
    }

    pub fn add_availability(&self, availability: Availability) -> Result<Availability> {
        let mut availabilities = self.availabilities()?;
        availabilities.push(availability.clone());
        self.write_key(KEY_AVAILABILITIES, &availabilities)?;
        Ok(availability)
    }

    pub fn delete_availability(&self, id: &str) -> Result<()> {
        let mut availabilities = self.availabilities()?;
        let before = availabilities.len();
        availabilities.retain(|a| a.id != id);
        if availabilities.len() == before {
            bail!("No availability with id '{id}'");
        }
        self.write_key(KEY_AVAILABILITIES, &availabilities)
    }

    fn read_or_seed<T>(&self, key: &str, seed: fn() -> Vec<T>) -> Result<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        if let Some(items) = self.read_key(key)? {
            return Ok(items);
        }
        let items = seed();
        self.write_key(key, &items)?;
        Ok(items)
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM collections WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.conn.execute(
            "INSERT INTO collections (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, json],
        )?;
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS collections (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

/// Returns the default store path inside the user's data directory.
/// Falls back to `./tripdeck.db` when no data dir is found.
pub fn default_store_path() -> String {
    if let Some(data_dir) = dirs::data_local_dir() {
        let tripdeck_dir = data_dir.join("tripdeck");
        std::fs::create_dir_all(&tripdeck_dir).ok();
        tripdeck_dir
            .join("tripdeck.db")
            .to_string_lossy()
            .into_owned()
    } else {
        "tripdeck.db".to_string()
    }
}

/// Fresh opaque id: `<kind>-<millis>-<random>`.
pub fn new_id(kind: &str) -> String {
    let millis = chrono::Local::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: u32 = rng.random_range(0..0x10000);
    format!("{kind}-{millis}-{suffix:04x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AvailabilityStatus, ExpenseType, TripStatus};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_trip(id: &str) -> Trip {
        Trip {
            id: id.to_string(),
            engineer_id: "1".to_string(),
            project_name: "Chennai Automation".to_string(),
            location: "Chennai, India".to_string(),
            start_date: d(2025, 2, 1),
            end_date: d(2025, 2, 10),
            status: TripStatus::Planned,
            notes: None,
        }
    }

    #[test]
    fn snapshot_falls_back_to_seed_data() {
        let store = Store::open_in_memory().unwrap();
        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.engineers.len(), 4);
        assert_eq!(snapshot.trips.len(), 6);
        assert_eq!(snapshot.expenses.len(), 5);
        assert!(snapshot.availabilities.is_empty());
        assert_eq!(snapshot.engineers[0].name, "Marie Dubois");
    }

    #[test]
    fn added_records_survive_reloads_in_insertion_order() {
        let store = Store::open_in_memory().unwrap();
        store.add_trip(sample_trip("trip-a")).unwrap();
        store.add_trip(sample_trip("trip-b")).unwrap();

        let trips = store.trips().unwrap();
        assert_eq!(trips.len(), 8);
        assert_eq!(trips[6].id, "trip-a");
        assert_eq!(trips[7].id, "trip-b");
    }

    #[test]
    fn update_replaces_in_place() {
        let store = Store::open_in_memory().unwrap();
        store.add_trip(sample_trip("trip-a")).unwrap();

        let mut updated = sample_trip("trip-a");
        updated.status = TripStatus::Cancelled;
        store.update_trip(&updated).unwrap();

        let trips = store.trips().unwrap();
        assert_eq!(trips[6].status, TripStatus::Cancelled);
        assert_eq!(trips.len(), 7);
    }

    #[test]
    fn mutations_on_unknown_ids_fail_loudly() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.update_trip(&sample_trip("ghost")).is_err());
        assert!(store.delete_trip("ghost").is_err());
        assert!(store.delete_expense("ghost").is_err());
        assert!(store.delete_availability("ghost").is_err());
    }

    #[test]
    fn deleting_a_trip_does_not_cascade_to_expenses() {
        let store = Store::open_in_memory().unwrap();
        // Seed expense e1..e3 reference seed trip '1'.
        store.delete_trip("1").unwrap();
        let expenses = store.expenses().unwrap();
        assert!(expenses.iter().any(|e| e.trip_id == "1"));
    }

    #[test]
    fn availabilities_keep_insertion_order() {
        let store = Store::open_in_memory().unwrap();
        for (id, status) in [
            ("a-1", AvailabilityStatus::OnBreak),
            ("a-2", AvailabilityStatus::Available),
        ] {
            store
                .add_availability(Availability {
                    id: id.to_string(),
                    engineer_id: "1".to_string(),
                    status,
                    start_date: d(2025, 1, 1),
                    end_date: d(2025, 1, 31),
                    notes: None,
                })
                .unwrap();
        }
        let availabilities = store.availabilities().unwrap();
        assert_eq!(availabilities[0].status, AvailabilityStatus::OnBreak);
        assert_eq!(availabilities[1].status, AvailabilityStatus::Available);
    }

    #[test]
    fn expense_enum_round_trips_through_json_blob() {
        let store = Store::open_in_memory().unwrap();
        store
            .add_expense(Expense {
                id: "e-x".to_string(),
                trip_id: "1".to_string(),
                engineer_id: "1".to_string(),
                kind: ExpenseType::Transportation,
                amount: 42.5,
                currency: "EUR".to_string(),
                date: d(2025, 3, 3),
                description: "Taxi".to_string(),
                receipt: None,
            })
            .unwrap();
        let expenses = store.expenses().unwrap();
        assert_eq!(expenses.last().unwrap().kind, ExpenseType::Transportation);
    }

    #[test]
    fn new_ids_carry_the_kind_prefix() {
        let id = new_id("trip");
        assert!(id.starts_with("trip-"));
        assert_ne!(new_id("trip"), new_id("trip"));
    }
}
