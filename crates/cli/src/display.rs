use rust_decimal::Decimal;
use scoring::models::AdminRound;
use scoring::services::details::{Location, RoundDetails};
use scoring::services::summary::summarize_marks;
use scoring::{Round, TeamSide};

pub fn round_line(round: &Round) -> String {
    format!(
        "#{:<5} {:<24} {} {:<8} {:>4} min  {:<7}  {}",
        round.id,
        round.round_name,
        round.date,
        round.time,
        round.duration_in_minutes,
        round.round_type.to_string(),
        round.status.label()
    )
}

pub fn print_section(title: &str, rounds: &[Round]) {
    println!("{title} ({})", rounds.len());
    if rounds.is_empty() {
        println!("  -");
    }
    for round in rounds {
        println!("  {}", round_line(round));
    }
}

pub fn format_total(total: Decimal) -> String {
    total.normalize().to_string()
}

pub fn print_details(details: &RoundDetails<'_>) {
    let round = details.round();

    println!("{} (#{})", round.round_name, round.id);
    println!("{}", details.description());
    println!("  Status:   {}", round.status.display_status().label());
    println!("  When:     {} {} ({} min)", round.date, round.time, round.duration_in_minutes);
    println!("  Type:     {}", round.round_type);

    match details.location() {
        Location::Venue(venue) => println!("  Venue:    {}", venue.unwrap_or("-")),
        Location::MeetingLinkPending => {
            println!("  Meeting:  link will be shared when the round starts")
        }
        Location::MeetingLink(url) => println!("  Meeting:  {}", url.unwrap_or("-")),
        Location::Hidden => {}
    }

    if let Some(link) = details.join_link() {
        println!("  Join now: {link}");
    }

    if let Some(notice) = details.upcoming_notice() {
        println!();
        println!("{notice}");
    }

    for side in TeamSide::BOTH {
        if let Some(team) = details.team(side) {
            println!();
            println!("  {side}: {} ({})", team.team_id, team.institution_name);
            println!("    Representative: {}", team.team_representative_name);
            println!("    Speakers:       {}, {}", team.speaker_1_name, team.speaker_2_name);
            println!("    Researcher:     {}", team.researcher_name);
        }
    }

    if let Some(winner) = details.winner() {
        println!();
        println!("  Winner: {winner}");
    }

    if let Some(label) = details.gate().action_label() {
        println!();
        println!("  Marks: {label}");
    }
}

pub fn print_admin_round(round: &AdminRound) {
    let team = |side: TeamSide| {
        let details = match side {
            TeamSide::Team1 => round.team1_details.as_ref(),
            TeamSide::Team2 => round.team2_details.as_ref(),
        };
        match (details, round.team_id(side)) {
            (Some(d), _) => d.team_id.clone(),
            (None, Some(id)) => format!("team #{id}"),
            (None, None) => "TBD".to_string(),
        }
    };

    println!(
        "#{:<5} {:<24} {} {:<8} {:<7} {:<10} {} vs {}",
        round.id,
        round.round_name,
        round.date,
        round.time,
        round.round_type.to_string(),
        round.status.label(),
        team(TeamSide::Team1),
        team(TeamSide::Team2),
    );

    if let Some(judge) = &round.judge {
        println!("       Judge: {}", judge.name);
    }

    if let Some(marks) = &round.marks {
        let summary = summarize_marks(marks);
        let total = |t: Option<Decimal>| t.map(format_total).unwrap_or_else(|| "-".to_string());
        let leader = match summary.leader {
            Some(side) => team(side),
            None => "none".to_string(),
        };
        println!(
            "       Marks: {} / {} (leading: {leader})",
            total(summary.team1_total),
            total(summary.team2_total)
        );
    }

    if let Some(winner) = &round.winner_details {
        println!("       Winner: {}", winner.team_id);
    }
}
