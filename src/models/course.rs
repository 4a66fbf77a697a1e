use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// A training or seminar entry. `deleted` marks soft-deleted rows and never
/// crosses the JSON boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub trainer: String,
    pub organizer: Option<String>,
    #[serde(default, with = "rfc3339_secs")]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default, with = "rfc3339_secs")]
    pub end_date: Option<DateTime<FixedOffset>>,
    pub course_form: Option<CourseForm>,
    pub course_type: CourseType,
    pub price: Option<String>,
    pub execution_type: Option<ExecutionType>,
    pub address: Option<String>,
    pub target_audience: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    #[serde(skip)]
    pub deleted: bool,
}

/// Request body for create and update. Every field is optional at the decode
/// stage so the validation pipeline can report all missing required fields
/// in one response instead of failing on the first absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoursePayload {
    pub title: Option<String>,
    pub trainer: Option<String>,
    pub organizer: Option<String>,
    #[serde(with = "rfc3339_secs")]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(with = "rfc3339_secs")]
    pub end_date: Option<DateTime<FixedOffset>>,
    pub course_form: Option<CourseForm>,
    pub course_type: Option<CourseType>,
    pub price: Option<String>,
    pub execution_type: Option<ExecutionType>,
    pub address: Option<String>,
    pub target_audience: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseForm {
    Seminar,
    Meetup,
    Workshop,
    StudyGroup,
    Certification,
    Conference,
    Lecture,
    LanguageCourse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    External,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionType {
    Remote,
    Onsite,
}

impl CourseForm {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseForm::Seminar => "SEMINAR",
            CourseForm::Meetup => "MEETUP",
            CourseForm::Workshop => "WORKSHOP",
            CourseForm::StudyGroup => "STUDY_GROUP",
            CourseForm::Certification => "CERTIFICATION",
            CourseForm::Conference => "CONFERENCE",
            CourseForm::Lecture => "LECTURE",
            CourseForm::LanguageCourse => "LANGUAGE_COURSE",
        }
    }
}

impl FromStr for CourseForm {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "SEMINAR" => Ok(CourseForm::Seminar),
            "MEETUP" => Ok(CourseForm::Meetup),
            "WORKSHOP" => Ok(CourseForm::Workshop),
            "STUDY_GROUP" => Ok(CourseForm::StudyGroup),
            "CERTIFICATION" => Ok(CourseForm::Certification),
            "CONFERENCE" => Ok(CourseForm::Conference),
            "LECTURE" => Ok(CourseForm::Lecture),
            "LANGUAGE_COURSE" => Ok(CourseForm::LanguageCourse),
            other => Err(format!("unknown courseForm value: {other}")),
        }
    }
}

impl CourseType {
    pub fn as_str(self) -> &'static str {
        match self {
            CourseType::External => "EXTERNAL",
            CourseType::Internal => "INTERNAL",
        }
    }
}

impl FromStr for CourseType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EXTERNAL" => Ok(CourseType::External),
            "INTERNAL" => Ok(CourseType::Internal),
            other => Err(format!("unknown courseType value: {other}")),
        }
    }
}

impl ExecutionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionType::Remote => "REMOTE",
            ExecutionType::Onsite => "ONSITE",
        }
    }
}

impl FromStr for ExecutionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "REMOTE" => Ok(ExecutionType::Remote),
            "ONSITE" => Ok(ExecutionType::Onsite),
            other => Err(format!("unknown executionType value: {other}")),
        }
    }
}

// Dates and enums live as TEXT columns, so the row mapping is written out
// instead of derived.
impl FromRow<'_, SqliteRow> for Course {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let course_type: String = row.try_get("course_type")?;

        Ok(Course {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            trainer: row.try_get("trainer")?,
            organizer: row.try_get("organizer")?,
            start_date: date_column(row, "start_date")?,
            end_date: date_column(row, "end_date")?,
            course_form: enum_column(row, "course_form")?,
            course_type: course_type
                .parse()
                .map_err(|err: String| decode_error("course_type", err))?,
            price: row.try_get("price")?,
            execution_type: enum_column(row, "execution_type")?,
            address: row.try_get("address")?,
            target_audience: row.try_get("target_audience")?,
            link: row.try_get("link")?,
            description: row.try_get("description")?,
            deleted: row.try_get("deleted")?,
        })
    }
}

fn decode_error(
    column: &str,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: source.into(),
    }
}

fn date_column(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<DateTime<FixedOffset>>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| DateTime::parse_from_rfc3339(&value).map_err(|err| decode_error(column, err)))
        .transpose()
}

fn enum_column<T>(row: &SqliteRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: FromStr<Err = String>,
{
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|value| value.parse::<T>().map_err(|err| decode_error(column, err)))
        .transpose()
}

/// RFC 3339 with second precision and a `Z` suffix for zero offset, e.g.
/// `2020-01-01T20:00:00Z`.
mod rfc3339_secs {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Option<DateTime<FixedOffset>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => {
                serializer.serialize_some(&date.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|value| DateTime::parse_from_rfc3339(&value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
