/// CLI argument parsing and command handling.
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::agg::{build_report, month_bounds, quarter_bounds, year_bounds};
use crate::identity::{materialize_engineer, resolve_engineer, Session};
use crate::store::{new_id, Store};
use crate::types::{
    Availability, AvailabilityStatus, Engineer, Expense, ExpenseType, Trip, TripStatus,
};
use crate::{agg, color};

#[derive(Parser)]
#[command(
    name = "tripdeck",
    version,
    about = "Tripdeck - A terminal trip and expense dashboard for field engineers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Engineer {
        #[command(subcommand)]
        command: EngineerCommand,
    },
    Trip {
        #[command(subcommand)]
        command: TripCommand,
    },
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },
    Availability {
        #[command(subcommand)]
        command: AvailabilityCommand,
    },
    /// Print totals and breakdowns for the current month/quarter/year.
    Report {
        #[arg(short = 'p', long = "period", default_value = "month")]
        period: String,
        #[arg(short = 'e', long = "engineer")]
        engineer: Option<String>,
    },
    /// Resolve (or lazily create) the engineer record for a session.
    Profile {
        #[arg(long = "email")]
        email: String,
        #[arg(long = "name")]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EngineerCommand {
    Add {
        name: String,
        email: String,
        role: String,
        #[arg(short = 'r', long = "rate", default_value_t = 0.0)]
        rate: f64,
        #[arg(short = 'c', long = "color")]
        color: Option<String>,
    },
    List,
}

#[derive(Subcommand, Debug)]
pub enum TripCommand {
    Add {
        engineer: String,
        project: String,
        location: String,
        #[arg(short = 's', long = "start")]
        start: String,
        #[arg(short = 'e', long = "end")]
        end: String,
        #[arg(long = "status", default_value = "planned")]
        status: String,
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },
    List,
    /// Update fields of an existing trip. Omitted flags keep current values.
    Edit {
        id: String,
        #[arg(long = "project")]
        project: Option<String>,
        #[arg(long = "location")]
        location: Option<String>,
        #[arg(short = 's', long = "start")]
        start: Option<String>,
        #[arg(short = 'e', long = "end")]
        end: Option<String>,
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },
    /// Set a trip's status. Any transition is allowed.
    Status { id: String, status: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    Add {
        trip_id: String,
        #[arg(value_name = "TYPE")]
        kind: String,
        amount: f64,
        #[arg(short = 'd', long = "date")]
        date: String,
        #[arg(long = "currency", default_value = "EUR")]
        currency: String,
        #[arg(long = "description", default_value = "")]
        description: String,
        #[arg(long = "receipt")]
        receipt: Option<String>,
    },
    List,
    /// Update fields of an existing expense. Omitted flags keep current
    /// values.
    Edit {
        id: String,
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        #[arg(long = "amount")]
        amount: Option<f64>,
        #[arg(short = 'd', long = "date")]
        date: Option<String>,
        #[arg(long = "currency")]
        currency: Option<String>,
        #[arg(long = "description")]
        description: Option<String>,
        #[arg(long = "receipt")]
        receipt: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum AvailabilityCommand {
    Add {
        engineer: String,
        status: String,
        #[arg(short = 's', long = "start")]
        start: String,
        #[arg(short = 'e', long = "end")]
        end: String,
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },
    List,
    Delete { id: String },
}

/// Execute a CLI command against the store.
pub fn run(command: Command, store: &Store) -> Result<()> {
    match command {
        Command::Engineer { command } => run_engineer(command, store)?,
        Command::Trip { command } => run_trip(command, store)?,
        Command::Expense { command } => run_expense(command, store)?,
        Command::Availability { command } => run_availability(command, store)?,
        Command::Report { period, engineer } => handle_report(period, engineer, store)?,
        Command::Profile { email, name } => handle_profile(email, name, store)?,
    }
    Ok(())
}

fn run_engineer(command: EngineerCommand, store: &Store) -> Result<()> {
    match command {
        EngineerCommand::Add {
            name,
            email,
            role,
            rate,
            color: color_opt,
        } => {
            let color = match color_opt {
                Some(c) if !color::is_valid_hex(&c) => {
                    println!("Invalid color format. Please provide a hex code like #RRGGBB.");
                    return Ok(());
                }
                Some(c) => c,
                None => color::random_color(),
            };
            let engineer = store.add_engineer(Engineer {
                id: new_id("eng"),
                name,
                email,
                role,
                daily_rate: rate,
                color,
            })?;
            println!("Added engineer '{}' ({})", engineer.name, engineer.id);
        }
        EngineerCommand::List => {
            for engineer in store.engineers()? {
                println!(
                    "{:<24} {:<32} {:<28} {:>8.0}/day  {}",
                    engineer.name, engineer.email, engineer.role, engineer.daily_rate, engineer.id
                );
            }
        }
    }
    Ok(())
}

fn run_trip(command: TripCommand, store: &Store) -> Result<()> {
    match command {
        TripCommand::Add {
            engineer,
            project,
            location,
            start,
            end,
            status,
            notes,
        } => {
            let engineers = store.engineers()?;
            let Some(engineer) = find_engineer(&engineer, &engineers) else {
                return Ok(());
            };
            let trip = store.add_trip(Trip {
                id: new_id("trip"),
                engineer_id: engineer.id.clone(),
                project_name: project,
                location,
                start_date: parse_date(&start)?,
                end_date: parse_date(&end)?,
                status: status.parse::<TripStatus>()?,
                notes,
            })?;
            println!("Added trip '{}' ({})", trip.project_name, trip.id);
        }
        TripCommand::List => {
            let engineers = store.engineers()?;
            for trip in store.trips()? {
                let engineer_name = engineers
                    .iter()
                    .find(|e| e.id == trip.engineer_id)
                    .map(|e| e.name.as_str())
                    .unwrap_or("Unknown engineer");
                println!(
                    "{:<24} {:<20} {} - {}  {:>3} days  {:<12} {}",
                    trip.project_name,
                    engineer_name,
                    trip.start_date,
                    trip.end_date,
                    agg::span_days(trip.start_date, trip.end_date),
                    trip.status,
                    trip.id
                );
            }
        }
        TripCommand::Edit {
            id,
            project,
            location,
            start,
            end,
            notes,
        } => {
            let trips = store.trips()?;
            let Some(trip) = trips.iter().find(|t| t.id == id) else {
                println!("Trip '{id}' not found");
                return Ok(());
            };
            let mut updated = trip.clone();
            if let Some(project) = project {
                updated.project_name = project;
            }
            if let Some(location) = location {
                updated.location = location;
            }
            if let Some(start) = start {
                updated.start_date = parse_date(&start)?;
            }
            if let Some(end) = end {
                updated.end_date = parse_date(&end)?;
            }
            if let Some(notes) = notes {
                updated.notes = Some(notes);
            }
            store.update_trip(&updated)?;
            println!("Updated trip '{}'", updated.project_name);
        }
        TripCommand::Status { id, status } => {
            let trips = store.trips()?;
            let Some(trip) = trips.iter().find(|t| t.id == id) else {
                println!("Trip '{id}' not found");
                return Ok(());
            };
            let mut updated = trip.clone();
            updated.status = status.parse::<TripStatus>()?;
            store.update_trip(&updated)?;
            println!("Trip '{}' is now {}", updated.project_name, updated.status);
        }
        TripCommand::Delete { id } => {
            store.delete_trip(&id)?;
            println!("Deleted trip '{id}'");
        }
    }
    Ok(())
}

fn run_expense(command: ExpenseCommand, store: &Store) -> Result<()> {
    match command {
        ExpenseCommand::Add {
            trip_id,
            kind,
            amount,
            date,
            currency,
            description,
            receipt,
        } => {
            let trips = store.trips()?;
            let Some(trip) = trips.iter().find(|t| t.id == trip_id) else {
                println!("Trip '{trip_id}' not found");
                return Ok(());
            };
            let expense = store.add_expense(Expense {
                id: new_id("expense"),
                trip_id: trip.id.clone(),
                engineer_id: trip.engineer_id.clone(),
                kind: kind.parse::<ExpenseType>()?,
                amount,
                currency,
                date: parse_date(&date)?,
                description,
                receipt,
            })?;
            println!(
                "Added {} expense of {:.2} {} ({})",
                expense.kind, expense.amount, expense.currency, expense.id
            );
        }
        ExpenseCommand::Edit {
            id,
            kind,
            amount,
            date,
            currency,
            description,
            receipt,
        } => {
            let expenses = store.expenses()?;
            let Some(expense) = expenses.iter().find(|e| e.id == id) else {
                println!("Expense '{id}' not found");
                return Ok(());
            };
            let mut updated = expense.clone();
            if let Some(kind) = kind {
                updated.kind = kind.parse::<ExpenseType>()?;
            }
            if let Some(amount) = amount {
                updated.amount = amount;
            }
            if let Some(date) = date {
                updated.date = parse_date(&date)?;
            }
            if let Some(currency) = currency {
                updated.currency = currency;
            }
            if let Some(description) = description {
                updated.description = description;
            }
            if let Some(receipt) = receipt {
                updated.receipt = Some(receipt);
            }
            store.update_expense(&updated)?;
            println!(
                "Updated {} expense of {:.2} {}",
                updated.kind, updated.amount, updated.currency
            );
        }
        ExpenseCommand::Delete { id } => {
            store.delete_expense(&id)?;
            println!("Deleted expense '{id}'");
        }
        ExpenseCommand::List => {
            for expense in store.expenses()? {
                println!(
                    "{}  {:<16} {:>10.2} {}  {:<32} {}",
                    expense.date,
                    expense.kind,
                    expense.amount,
                    expense.currency,
                    expense.description,
                    expense.id
                );
            }
        }
    }
    Ok(())
}

fn run_availability(command: AvailabilityCommand, store: &Store) -> Result<()> {
    match command {
        AvailabilityCommand::Add {
            engineer,
            status,
            start,
            end,
            notes,
        } => {
            let engineers = store.engineers()?;
            let Some(engineer) = find_engineer(&engineer, &engineers) else {
                return Ok(());
            };
            let availability = store.add_availability(Availability {
                id: new_id("avail"),
                engineer_id: engineer.id.clone(),
                status: status.parse::<AvailabilityStatus>()?,
                start_date: parse_date(&start)?,
                end_date: parse_date(&end)?,
                notes,
            })?;
            println!(
                "Added availability '{}' for {} ({})",
                availability.status, engineer.name, availability.id
            );
        }
        AvailabilityCommand::Delete { id } => {
            store.delete_availability(&id)?;
            println!("Deleted availability '{id}'");
        }
        AvailabilityCommand::List => {
            let engineers = store.engineers()?;
            for availability in store.availabilities()? {
                let engineer_name = engineers
                    .iter()
                    .find(|e| e.id == availability.engineer_id)
                    .map(|e| e.name.as_str())
                    .unwrap_or("Unknown engineer");
                println!(
                    "{:<24} {:<22} {} - {}  {}",
                    engineer_name,
                    availability.status,
                    availability.start_date,
                    availability.end_date,
                    availability.id
                );
            }
        }
    }
    Ok(())
}

fn handle_report(period: String, engineer: Option<String>, store: &Store) -> Result<()> {
    let today = Local::now().date_naive();
    let range = match period.as_str() {
        "month" => month_bounds(today.year(), today.month()),
        "quarter" => quarter_bounds(today.year(), today.month()),
        "year" => year_bounds(today.year()),
        other => {
            println!("Unknown period '{other}'. Use month, quarter or year.");
            return Ok(());
        }
    };

    let snapshot = store.snapshot()?;
    let engineer_id = match engineer {
        Some(query) => match find_engineer(&query, &snapshot.engineers) {
            Some(engineer) => Some(engineer.id.clone()),
            None => return Ok(()),
        },
        None => None,
    };

    let report = build_report(
        range,
        engineer_id.as_deref(),
        &snapshot.engineers,
        &snapshot.trips,
        &snapshot.expenses,
    );
    print_report(&report, &snapshot.engineers);
    Ok(())
}

fn print_report(report: &agg::Report, engineers: &[Engineer]) {
    println!("Report {} - {}", report.range.start, report.range.end);
    println!(
        "Trips: {}   Days: {}   Expenses: {:.2} EUR",
        report.trips.len(),
        report.total_days,
        report.total_expenses
    );

    if !report.by_engineer.is_empty() {
        println!();
        println!("{:<24} {:>6} {:>6} {:>12}", "Engineer", "Trips", "Days", "Expenses");
        for entry in &report.by_engineer {
            let name = engineers
                .iter()
                .find(|e| e.id == entry.engineer_id)
                .map(|e| e.name.as_str())
                .unwrap_or("Unknown engineer");
            println!(
                "{:<24} {:>6} {:>6} {:>12.2}",
                name, entry.trip_count, entry.days, entry.expense_total
            );
        }
    }

    if !report.by_type.is_empty() {
        println!();
        println!("{:<16} {:>12} {:>8}", "Type", "Amount", "Share");
        for entry in &report.by_type {
            println!(
                "{:<16} {:>12.2} {:>7.1}%",
                entry.kind.label(),
                entry.amount,
                entry.percent
            );
        }
    }
}

fn handle_profile(email: String, name: Option<String>, store: &Store) -> Result<()> {
    let name = name.unwrap_or_else(|| email.clone());
    let session = Session::new(&email, &name);
    let engineers = store.engineers()?;

    let engineer = match resolve_engineer(&session, &engineers) {
        Some(engineer) => engineer.clone(),
        None => {
            let engineer = store.add_engineer(materialize_engineer(&session))?;
            println!("Created engineer record for '{}'", engineer.email);
            engineer
        }
    };

    println!("Name:  {}", engineer.name);
    println!("Email: {}", engineer.email);
    println!("Role:  {}", engineer.role);
    println!("Color: {}", engineer.color);
    Ok(())
}

/// Look up an engineer by id, exact email or exact name. Ambiguous names
/// print a complaint and resolve to nothing.
fn find_engineer<'a>(query: &str, engineers: &'a [Engineer]) -> Option<&'a Engineer> {
    if let Some(engineer) = engineers
        .iter()
        .find(|e| e.id == query || e.email == query)
    {
        return Some(engineer);
    }
    let by_name: Vec<&Engineer> = engineers.iter().filter(|e| e.name == query).collect();
    match by_name.len() {
        0 => {
            println!("Engineer '{query}' not found");
            None
        }
        1 => Some(by_name[0]),
        _ => {
            println!("Multiple engineers named '{query}', use the id or email instead");
            None
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date '{value}', expected YYYY-MM-DD"))
}
