use crate::infra::{parse_date, resolve_roster_source, roster_provider};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::workflows::matching::{
    CandidateRecord, MatchForm, MatchReport, MatchRequirement, Matcher, MatchingService,
    ScoredCandidate, SkillInput,
};
use talent_match::workflows::roster::RosterProvider;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterSourceArgs {
    /// Read the roster from a CSV file instead of the configured source
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Fetch the roster from a published spreadsheet (CSV export or Google Sheets link)
    #[arg(long, conflicts_with = "roster_csv")]
    pub(crate) sheet_url: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Project name (informational)
    #[arg(long)]
    pub(crate) project_name: Option<String>,
    /// Required skills, comma separated
    #[arg(long, default_value = "")]
    pub(crate) required: String,
    /// Preferred skills, comma separated
    #[arg(long, default_value = "")]
    pub(crate) preferred: String,
    /// Work location, compared verbatim with each candidate's work condition
    #[arg(long)]
    pub(crate) location: String,
    /// Rate range such as "75万～90万"
    #[arg(long)]
    pub(crate) rate: Option<String>,
    /// Project start (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_period: Option<NaiveDate>,
    /// Billing terms such as "140h～180h"
    #[arg(long)]
    pub(crate) billing_time: Option<String>,
    #[command(flatten)]
    pub(crate) source: RosterSourceArgs,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
}

impl MatchArgs {
    fn form(&self) -> MatchForm {
        MatchForm {
            project_name: self.project_name.clone(),
            required_skills: Some(SkillInput::from(self.required.as_str())),
            preferred_skills: Some(SkillInput::from(self.preferred.as_str())),
            location: self.location.clone(),
            rate_range: self.rate.clone(),
            start_period: self.start_period.map(|date| date.to_string()),
            billing_time: self.billing_time.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    #[command(flatten)]
    pub(crate) source: RosterSourceArgs,
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
}

fn build_service(
    source: RosterSourceArgs,
) -> Result<MatchingService<dyn RosterProvider>, AppError> {
    let config = AppConfig::load()?;
    let source = resolve_roster_source(config.roster, source.sheet_url, source.roster_csv);
    Ok(MatchingService::new(
        roster_provider(&source),
        Matcher::new(config.matcher),
    ))
}

pub(crate) async fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let requirement = MatchRequirement::try_from(args.form())?;
    let format = args.format;
    let service = build_service(args.source)?;

    let report = service.run(requirement).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => render_report_table(&mut out, &service.source(), &report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => render_ranked_csv(&mut out, &report.candidates)?,
    }

    Ok(())
}

pub(crate) async fn run_roster(args: RosterArgs) -> Result<(), AppError> {
    let service = build_service(args.source)?;
    let roster = service.roster().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => {
            writeln!(
                out,
                "Roster from {} ({} candidates)",
                service.source(),
                roster.len()
            )?;
            for candidate in &roster {
                writeln!(out, "- {}", candidate_line(candidate))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &roster)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut out);
            writer.write_record(ROSTER_COLUMNS)?;
            for candidate in &roster {
                writer.write_record(candidate_fields(candidate))?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

const ROSTER_COLUMNS: [&str; 6] = [
    "name",
    "skills",
    "role",
    "desired_rate",
    "work_condition",
    "available_from",
];

fn candidate_fields(candidate: &CandidateRecord) -> [String; 6] {
    [
        candidate.name.clone(),
        candidate.skill_text(),
        candidate.role.clone(),
        candidate
            .desired_rate
            .map(|rate| rate.to_string())
            .unwrap_or_default(),
        candidate.work_condition.clone(),
        candidate.available_from.clone(),
    ]
}

fn candidate_line(candidate: &CandidateRecord) -> String {
    let rate = candidate
        .desired_rate
        .map(|rate| format!("{rate}万"))
        .unwrap_or_else(|| "rate n/a".to_string());
    format!(
        "{} ({}) | {} | {} | {} | from {}",
        candidate.name,
        candidate.role,
        candidate.skill_text(),
        rate,
        candidate.work_condition,
        candidate.available_from
    )
}

/// Roster columns plus `match_score`, in ranked order.
pub(crate) fn render_ranked_csv<W: Write>(
    out: W,
    candidates: &[ScoredCandidate],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header: Vec<&str> = ROSTER_COLUMNS.to_vec();
    header.push("match_score");
    writer.write_record(&header)?;

    for scored in candidates {
        let mut record = candidate_fields(&scored.candidate).to_vec();
        record.push(scored.match_score.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub(crate) fn render_report_table<W: Write>(
    mut out: W,
    source: &str,
    report: &MatchReport,
) -> std::io::Result<()> {
    let requirement = &report.requirement;
    if requirement.project_name.is_empty() {
        writeln!(out, "Matching results")?;
    } else {
        writeln!(out, "Matching results for {}", requirement.project_name)?;
    }
    writeln!(out, "Roster source: {source}")?;
    writeln!(
        out,
        "Required: {} | Preferred: {} | Location: {}",
        display_tokens(&requirement.required_skills),
        display_tokens(&requirement.preferred_skills),
        requirement.location
    )?;
    if let Some(range) = requirement.rate_range {
        writeln!(out, "Rate range: {}万～{}万", range.min, range.max)?;
    }

    if report.candidates.is_empty() {
        writeln!(out, "\nNo candidates on the roster")?;
        return Ok(());
    }

    writeln!(out)?;
    for (position, scored) in report.candidates.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. [{:>3}] {}",
            position + 1,
            scored.match_score,
            candidate_line(&scored.candidate)
        )?;
        for component in &scored.components {
            writeln!(
                out,
                "      +{} {}: {}",
                component.points,
                component.factor.label(),
                component.notes
            )?;
        }
    }

    Ok(())
}

fn display_tokens(tokens: &[String]) -> String {
    if tokens.is_empty() {
        "-".to_string()
    } else {
        tokens.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_match::workflows::matching::rank;
    use talent_match::workflows::roster::StaticRoster;

    fn sample_report() -> MatchReport {
        let roster = StaticRoster::sample();
        let requirement = MatchRequirement::new("フルリモート")
            .with_required(["AWS"])
            .with_preferred(["Docker"])
            .with_rate_range(70.0, 90.0);
        let candidates = rank(roster.candidates(), &requirement);
        MatchReport {
            candidate_count: candidates.len(),
            requirement,
            candidates,
        }
    }

    #[test]
    fn ranked_csv_appends_match_score_column() {
        let report = sample_report();
        let mut buffer = Vec::new();
        render_ranked_csv(&mut buffer, &report.candidates).expect("csv renders");

        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,skills,role,desired_rate,work_condition,available_from,match_score")
        );
        assert_eq!(
            lines.next(),
            Some("OR,\"C#, AWS, Docker\",TL,75,フルリモート,2024-01-20,70")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn table_lists_candidates_in_rank_order() {
        let report = sample_report();
        let mut buffer = Vec::new();
        render_report_table(&mut buffer, "static roster", &report).expect("table renders");

        let text = String::from_utf8(buffer).expect("utf8");
        let or = text.find(" 1. [ 70] OR").expect("OR ranked first");
        let kt = text.find("K.T").expect("K.T listed");
        assert!(or < kt);
        assert!(text.contains("Rate range: 70万～90万"));
    }

    #[test]
    fn match_args_always_supply_skill_inputs() {
        let args = MatchArgs {
            project_name: None,
            required: String::new(),
            preferred: String::new(),
            location: "remote".to_string(),
            rate: None,
            start_period: NaiveDate::from_ymd_opt(2024, 2, 1),
            billing_time: None,
            source: RosterSourceArgs::default(),
            format: OutputFormat::Table,
        };

        let requirement = MatchRequirement::try_from(args.form()).expect("valid");
        assert!(requirement.required_skills.is_empty());
        assert_eq!(requirement.start_period, NaiveDate::from_ymd_opt(2024, 2, 1));
    }
}
