use anyhow::Result;
use chrono::NaiveDate;
use jury_client::hydration::load_round;
use jury_client::{ApiClient, RoundProvider, Session};
use scoring::services::details::RoundDetails;
use scoring::services::schedule::{bucket_rounds, dates_with_rounds, rounds_on};
use tracing::warn;

use crate::display;

pub async fn list(client: &ApiClient, date: Option<NaiveDate>) -> Result<()> {
    let rounds = client.jury_rounds().await?;

    if let Some(date) = date {
        let on_day: Vec<_> = rounds_on(&rounds, date).into_iter().cloned().collect();
        display::print_section(&format!("Rounds on {date}"), &on_day);

        if on_day.is_empty() {
            let days: Vec<String> = dates_with_rounds(&rounds)
                .into_iter()
                .map(|d| d.to_string())
                .collect();
            if !days.is_empty() {
                println!("Days with rounds: {}", days.join(", "));
            }
        }
        return Ok(());
    }

    let buckets = bucket_rounds(rounds);
    if buckets.is_empty() {
        println!("No rounds assigned.");
        return Ok(());
    }

    display::print_section("Ongoing", &buckets.ongoing);
    display::print_section("Upcoming", &buckets.upcoming);
    display::print_section("Completed", &buckets.completed);
    Ok(())
}

pub async fn show(client: &ApiClient, session: &Session, round_id: i64) -> Result<()> {
    let (round, marks) = load_round(client, client, session, round_id).await?;

    for (side, error) in marks.failures() {
        warn!(round_id, %side, error = %error, "existing marks could not be loaded");
    }

    let details = RoundDetails::new(&round, marks.gate(&round));
    display::print_details(&details);
    Ok(())
}
