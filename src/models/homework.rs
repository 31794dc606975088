use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Work reviewed: the reviewer liked everything. Hooray!",
            HomeworkStatus::Reviewing => "Work has been taken up for review.",
            HomeworkStatus::Rejected => "Work reviewed: the reviewer has comments.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(Error::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submission's review state as reported by the status API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    pub name: String,
    pub status: HomeworkStatus,
}

impl StatusRecord {
    /// Reads `homework_name` and `status` out of a raw homework object.
    /// Every other field is ignored.
    pub fn from_json(homework: &JsonValue) -> Result<Self> {
        let name = homework
            .get("homework_name")
            .ok_or_else(|| Error::MissingField("homework_name".to_string()))?;
        let status = homework
            .get("status")
            .ok_or_else(|| Error::MissingField("status".to_string()))?;

        let name = name
            .as_str()
            .ok_or_else(|| Error::Shape(format!("\"homework_name\" is not a string: {}", name)))?;
        let status = match status.as_str() {
            Some(s) => s.parse()?,
            None => return Err(Error::UnknownStatus(status.to_string())),
        };

        Ok(Self {
            name: name.to_string(),
            status,
        })
    }

    pub fn message(&self) -> String {
        format!(
            "Changed review status for \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Turns a raw homework object into the notification text.
pub fn parse_status(homework: &JsonValue) -> Result<String> {
    Ok(StatusRecord::from_json(homework)?.message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_statuses_render_their_verdict() {
        let cases = [
            ("approved", "Work reviewed: the reviewer liked everything. Hooray!"),
            ("reviewing", "Work has been taken up for review."),
            ("rejected", "Work reviewed: the reviewer has comments."),
        ];
        for (status, verdict) in cases {
            let hw = json!({ "homework_name": "user__hw_python_oop.zip", "status": status, "id": 7 });
            assert_eq!(
                parse_status(&hw).unwrap(),
                format!(
                    "Changed review status for \"user__hw_python_oop.zip\". {}",
                    verdict
                )
            );
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        let hw = json!({ "homework_name": "hw1", "status": "lost" });
        assert!(matches!(parse_status(&hw), Err(Error::UnknownStatus(s)) if s == "lost"));

        let hw = json!({ "homework_name": "hw1", "status": 3 });
        assert!(matches!(parse_status(&hw), Err(Error::UnknownStatus(_))));
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let hw = json!({ "status": "approved" });
        assert!(matches!(parse_status(&hw), Err(Error::MissingField(f)) if f == "homework_name"));

        let hw = json!({ "homework_name": "hw1" });
        assert!(matches!(parse_status(&hw), Err(Error::MissingField(f)) if f == "status"));
    }

    #[test]
    fn status_round_trips_through_serde() {
        let status: HomeworkStatus = serde_json::from_value(json!("reviewing")).unwrap();
        assert_eq!(status, HomeworkStatus::Reviewing);
        assert_eq!(status.to_string(), "reviewing");
    }
}
