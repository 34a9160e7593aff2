use crate::workflows::matching::domain::CandidateRecord;
use crate::workflows::matching::requirement::{parse_man_yen, split_skill_tokens};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Reads a header-first roster table into candidate records.
///
/// Headers may be the English field names or the Japanese column titles used by
/// the staffing spreadsheets.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<RosterRow>() {
        let row = record?;
        records.push(row.into_candidate());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(alias = "名前", alias = "Name")]
    name: String,
    #[serde(alias = "スキル", alias = "Skills", default)]
    skills: String,
    #[serde(alias = "役割", alias = "Role", default)]
    role: String,
    #[serde(
        alias = "希望単価",
        alias = "Desired Rate",
        default,
        deserialize_with = "lenient_rate"
    )]
    desired_rate: Option<f64>,
    #[serde(alias = "稼働条件", alias = "Work Condition", default)]
    work_condition: String,
    #[serde(alias = "稼働開始日", alias = "Available From", default)]
    available_from: String,
}

impl RosterRow {
    fn into_candidate(self) -> CandidateRecord {
        CandidateRecord {
            skills: split_skill_tokens(&self.skills),
            name: self.name,
            role: self.role,
            desired_rate: self.desired_rate,
            work_condition: self.work_condition,
            available_from: self.available_from,
        }
    }
}

/// Unreadable rate cells become `None` instead of failing the row.
fn lenient_rate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().and_then(parse_man_yen))
}
