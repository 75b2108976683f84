use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use jury_client::{ApiClient, RoundAdmin};
use scoring::dto::round::{CreateRoundRequest, EligibleTeamsQuery, UpdateRoundRequest};
use scoring::{RoundStatus, RoundType};

use crate::display;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoundTypeArg {
    Online,
    Offline,
}

impl From<RoundTypeArg> for RoundType {
    fn from(arg: RoundTypeArg) -> Self {
        match arg {
            RoundTypeArg::Online => RoundType::Online,
            RoundTypeArg::Offline => RoundType::Offline,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// List every round with its marks summary
    Rounds,
    /// Schedule a new round
    CreateRound {
        #[arg(long)]
        name: String,

        #[arg(long)]
        team1: i64,

        #[arg(long)]
        team2: i64,

        #[arg(long)]
        date: NaiveDate,

        #[arg(long)]
        time: String,

        #[arg(long, default_value_t = 60)]
        duration: u32,

        #[arg(long, value_enum, default_value = "offline")]
        round_type: RoundTypeArg,

        #[arg(long)]
        venue: Option<String>,

        #[arg(long)]
        meet_url: Option<String>,

        #[arg(long, default_value = "upcoming")]
        status: String,
    },
    /// Change fields of an existing round
    UpdateRound {
        round_id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        team1: Option<i64>,

        #[arg(long)]
        team2: Option<i64>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        duration: Option<u32>,

        #[arg(long, value_enum)]
        round_type: Option<RoundTypeArg>,

        #[arg(long)]
        venue: Option<String>,

        #[arg(long)]
        meet_url: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// Numeric id of the winning team
        #[arg(long)]
        winner: Option<i64>,
    },
    /// Remove a round
    DeleteRound { round_id: i64 },
    /// Teams that can be scheduled into rounds of this name
    EligibleTeams {
        #[arg(long)]
        round_name: String,

        /// Only teams assigned to this juror
        #[arg(long)]
        for_jury: Option<i64>,
    },
}

pub async fn run(client: &ApiClient, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::Rounds => {
            let rounds = client.list_rounds().await?;
            if rounds.is_empty() {
                println!("No rounds scheduled.");
            }
            for round in &rounds {
                display::print_admin_round(round);
            }
        }
        AdminCommand::CreateRound {
            name,
            team1,
            team2,
            date,
            time,
            duration,
            round_type,
            venue,
            meet_url,
            status,
        } => {
            let request = CreateRoundRequest {
                round_name: name,
                team1,
                team2,
                date,
                time,
                duration_in_minutes: duration,
                venue,
                meet_url,
                round_type: round_type.into(),
                status: RoundStatus::from(status),
                winner: None,
            };
            let round = client
                .create_round(&request)
                .await
                .context("Cannot create round")?;
            display::print_admin_round(&round);
        }
        AdminCommand::UpdateRound {
            round_id,
            name,
            team1,
            team2,
            date,
            time,
            duration,
            round_type,
            venue,
            meet_url,
            status,
            winner,
        } => {
            let request = UpdateRoundRequest {
                round_name: name,
                team1,
                team2,
                date,
                time,
                duration_in_minutes: duration,
                venue,
                meet_url,
                round_type: round_type.map(Into::into),
                status: status.map(RoundStatus::from),
                winner,
            };
            let round = client
                .update_round(round_id, &request)
                .await
                .with_context(|| format!("Cannot update round {round_id}"))?;
            display::print_admin_round(&round);
        }
        AdminCommand::DeleteRound { round_id } => {
            client
                .delete_round(round_id)
                .await
                .with_context(|| format!("Cannot delete round {round_id}"))?;
            println!("Round {round_id} deleted.");
        }
        AdminCommand::EligibleTeams {
            round_name,
            for_jury,
        } => {
            let teams = client
                .eligible_teams(&EligibleTeamsQuery {
                    round_name,
                    jury_id: for_jury,
                })
                .await?;
            for team in &teams {
                let jury = team.jury.as_ref().map(|j| j.name.as_str()).unwrap_or("-");
                println!(
                    "#{:<5} {:<10} {:<30} jury: {}",
                    team.id, team.team_id, team.institution_name, jury
                );
            }
        }
    }

    Ok(())
}
