//! Rebuild cached day totals from food entries
//! Usage: cargo run --bin recalculate_days -- [date]
//!
//! Without a date every day is recalculated.

use nutrilog::config::Config;
use nutrilog::db::{migrations, Database};
use nutrilog::models::{recalculate_day_totals, Day};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let date = std::env::args().nth(1);

    let config = Config::from_env();
    println!("Database: {}", config.database_path.display());

    let database = Database::new(&config.database_path)?;
    database.with_conn(migrations::run_migrations)?;

    database.with_transaction(|tx| {
        let days: Vec<Day> = match date.as_deref() {
            Some(date) => Day::get_by_date(tx, date)?.into_iter().collect(),
            None => Day::list_all(tx)?,
        };

        if days.is_empty() {
            println!("No days found");
            return Ok(());
        }

        for day in &days {
            let totals = recalculate_day_totals(tx, day.id)?;
            let new_calories = totals.day_totals.calories;
            println!(
                "{}: {:.1} -> {:.1} kcal (diff {:+.1})",
                day.date,
                day.cached_totals.calories,
                new_calories,
                new_calories - day.cached_totals.calories
            );
        }
        println!("Recalculated {} day(s)", days.len());

        Ok(())
    })?;

    Ok(())
}
