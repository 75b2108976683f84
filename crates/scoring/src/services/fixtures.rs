use chrono::NaiveDate;

use crate::models::{Round, RoundStatus, RoundTeam, RoundType};

pub fn team(id: i64, code: &str) -> RoundTeam {
    RoundTeam {
        id,
        team_id: code.to_string(),
        institution_name: format!("{code} Institute"),
        team_representative_name: format!("{code} Representative"),
        speaker_1_name: "Speaker One".to_string(),
        speaker_2_name: "Speaker Two".to_string(),
        researcher_name: "Researcher".to_string(),
    }
}

pub fn round(id: i64, status: RoundStatus, date: (i32, u32, u32)) -> Round {
    Round {
        id,
        round_name: format!("Round {id}"),
        team1: Some(team(id * 10 + 1, &format!("TM-{id}A"))),
        team2: Some(team(id * 10 + 2, &format!("TM-{id}B"))),
        winner: None,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        time: "10:00:00".to_string(),
        duration_in_minutes: 45,
        venue: Some("Court Room 2".to_string()),
        meet_url: None,
        round_type: RoundType::Offline,
        status,
        created_at: None,
        updated_at: None,
    }
}
