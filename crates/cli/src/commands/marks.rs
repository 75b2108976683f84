use std::path::Path;

use anyhow::{Context, Result, bail};
use jury_client::hydration::load_round;
use jury_client::{ApiClient, ScoringSheet, Session};
use scoring::models::OVERALL_COMMENTS;
use scoring::services::scoring::clamped_score;
use scoring::{Criterion, TeamSide};
use serde_json::Value;
use tracing::{info, warn};

use crate::display::format_total;

/// Reads a score sheet: a JSON object of criterion id (or `overall_comments`)
/// to value. Numbers and strings are both accepted; `null` clears the field.
pub fn parse_sheet(content: &str) -> Result<Vec<(String, String)>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(fields) = value else {
        bail!("score sheet must be a JSON object");
    };

    fields
        .into_iter()
        .map(|(field, value)| {
            let raw = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Null => String::new(),
                other => bail!("unsupported value for {field}: {other}"),
            };
            Ok((field, raw))
        })
        .collect()
}

async fn read_sheet(path: &Path) -> Result<Vec<(String, String)>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Cannot read score sheet {}", path.display()))?;
    parse_sheet(&content).with_context(|| format!("Invalid score sheet {}", path.display()))
}

/// How a criterion edit landed on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreEdit {
    Stored,
    Clamped,
    Ignored,
}

fn classify_edit(criterion: Criterion, raw: &str, stored: &str) -> ScoreEdit {
    if stored == raw.trim() {
        ScoreEdit::Stored
    } else if clamped_score(criterion, raw).is_none() {
        ScoreEdit::Ignored
    } else {
        ScoreEdit::Clamped
    }
}

fn apply(sheet: &mut ScoringSheet, side: TeamSide, fields: &[(String, String)]) {
    if sheet.is_locked(side) {
        warn!(%side, "marks already submitted for this team; its score sheet is ignored");
        return;
    }

    for (field, raw) in fields {
        sheet.set_score(side, field, raw);

        match Criterion::from_id(field) {
            Some(criterion) => {
                let stored = sheet.entry(side).score(criterion);
                match classify_edit(criterion, raw, stored) {
                    ScoreEdit::Stored => {}
                    ScoreEdit::Ignored => {
                        warn!(%side, field = %field, value = %raw, "ignored non-numeric score")
                    }
                    ScoreEdit::Clamped => {
                        info!(%side, field = %field, value = %raw, stored, "score clamped")
                    }
                }
            }
            None if field == OVERALL_COMMENTS => {}
            None => warn!(%side, field = %field, "field is not part of the rubric"),
        }
    }
}

fn print_totals(sheet: &ScoringSheet) {
    for side in TeamSide::BOTH {
        let team = &sheet.team(side).team;
        println!(
            "{side} {}: {} / {}",
            team.team_id,
            format_total(sheet.total(side)),
            sheet.max_total()
        );
        for criterion in sheet.rubric() {
            let value = sheet.entry(side).score(*criterion);
            println!(
                "    {:<45} {:>6} / {}",
                criterion.label(),
                if value.is_empty() { "-" } else { value },
                criterion.max_points()
            );
        }
    }
}

async fn dialog_closed() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

pub async fn run(
    client: &ApiClient,
    session: &Session,
    round_id: i64,
    team1: &Path,
    team2: &Path,
    dry_run: bool,
) -> Result<()> {
    let team1_fields = read_sheet(team1).await?;
    let team2_fields = read_sheet(team2).await?;

    let (round, marks) = load_round(client, client, session, round_id).await?;
    for (side, error) in marks.failures() {
        warn!(round_id, %side, error = %error, "existing marks could not be loaded");
    }

    let mut sheet =
        ScoringSheet::open(round, session, &marks).context("Marks entry is not available")?;
    apply(&mut sheet, TeamSide::Team1, &team1_fields);
    apply(&mut sheet, TeamSide::Team2, &team2_fields);

    print_totals(&sheet);

    if sheet.is_final_submission() {
        println!(
            "Warning: round is {}. This submission is final and the marks cannot be edited afterwards.",
            sheet.round().status
        );
    }

    if dry_run {
        return Ok(());
    }

    println!("{}...", sheet.submit_label());
    let outcome = sheet.submit_until(client, dialog_closed()).await?;

    for side in TeamSide::BOTH {
        let result = match side {
            TeamSide::Team1 => outcome.team1.as_ref().map(|_| ()),
            TeamSide::Team2 => outcome.team2.as_ref().map(|_| ()),
        };
        match result {
            Ok(()) => println!("{side}: saved"),
            Err(e) => println!("{side}: NOT saved ({e})"),
        }
    }

    outcome
        .into_result()
        .context("Oral marks were not fully submitted; rerun to retry")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_accepts_numbers_and_strings() {
        let fields = parse_sheet(
            r#"{"knowledge_of_law": 20, "persuasiveness": "7.5", "overall_comments": "Good", "style_poise_courtesy_and_demeanor": null}"#,
        )
        .unwrap();

        assert!(fields.contains(&("knowledge_of_law".to_string(), "20".to_string())));
        assert!(fields.contains(&("persuasiveness".to_string(), "7.5".to_string())));
        assert!(fields.contains(&("overall_comments".to_string(), "Good".to_string())));
        assert!(fields.contains(&(
            "style_poise_courtesy_and_demeanor".to_string(),
            String::new()
        )));
    }

    #[test]
    fn test_classify_edit() {
        let c = Criterion::KnowledgeOfLaw;
        assert_eq!(classify_edit(c, " 12.5 ", "12.5"), ScoreEdit::Stored);
        assert_eq!(classify_edit(c, "", ""), ScoreEdit::Stored);
        assert_eq!(classify_edit(c, "999", "25"), ScoreEdit::Clamped);
        assert_eq!(classify_edit(c, "abc", ""), ScoreEdit::Ignored);
    }

    #[test]
    fn test_rejected_edit_over_existing_value_is_ignored() {
        let c = Criterion::Persuasiveness;
        assert_eq!(classify_edit(c, "abc", "8"), ScoreEdit::Ignored);
        assert_eq!(classify_edit(c, "NaN", "8"), ScoreEdit::Ignored);
        assert_eq!(classify_edit(c, "40", "10"), ScoreEdit::Clamped);
    }

    #[test]
    fn test_parse_sheet_rejects_other_shapes() {
        assert!(parse_sheet("[1, 2]").is_err());
        assert!(parse_sheet(r#"{"knowledge_of_law": [20]}"#).is_err());
        assert!(parse_sheet("not json").is_err());
    }
}
