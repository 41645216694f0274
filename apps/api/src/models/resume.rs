//! Canonical résumé record consumed by every template.
//!
//! The record is loaded once at startup and shared read-only across requests.
//! Optional collections default to empty so renderers can treat "absent" and
//! "empty" identically.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Built-in record used when no `RESUME_DATA_PATH` is configured.
const EMBEDDED_RESUME: &str = include_str!("../../data/resume.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub core_competencies: Competencies,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub portfolio: String,
    /// Portrait path relative to the public-assets root, e.g. `/images/me.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl ExperienceEntry {
    /// Human-readable tenure, e.g. `Mar 2021 – Present`.
    ///
    /// A `current` entry always ends in "Present"; any stored end date is ignored.
    pub fn period(&self) -> String {
        let start = format_month(&self.start_date);
        let end = if self.current {
            Some("Present".to_string())
        } else {
            self.end_date.as_deref().map(format_month)
        };
        match end {
            Some(end) if start.is_empty() => end,
            Some(end) => format!("{start} – {end}"),
            None => start,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Competency groups
// ────────────────────────────────────────────────────────────────────────────

/// Named skill groups in source-document order.
///
/// Serialized as a JSON object; deserialization walks the object's entries in
/// the order they appear so categories are never re-sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Competencies(Vec<(String, Vec<String>)>);

impl Competencies {
    pub fn new(groups: Vec<(String, Vec<String>)>) -> Self {
        Self(groups)
    }

    /// Groups with at least one skill.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .filter(|(_, skills)| !skills.is_empty())
            .map(|(name, skills)| (name.as_str(), skills.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.groups().next().is_none()
    }
}

impl Serialize for Competencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, skills) in &self.0 {
            map.serialize_entry(name, skills)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Competencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = Competencies;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to skill list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, skills)) = access.next_entry::<String, Vec<String>>()? {
                    groups.push((name, skills));
                }
                Ok(Competencies(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Loading
// ────────────────────────────────────────────────────────────────────────────

impl ResumeData {
    /// Loads the record from `path`, or the embedded default when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read resume data from {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid resume data in {}", path.display()))
            }
            None => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED_RESUME).context("Embedded resume data is invalid")
    }
}

/// Formats `YYYY-MM` / `YYYY-MM-DD` as `Mon YYYY`; anything else passes through.
pub fn format_month(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d"));
    match parsed {
        Ok(date) => date.format("%b %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(current: bool, end: Option<&str>) -> ExperienceEntry {
        ExperienceEntry {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            location: None,
            start_date: "2021-03".to_string(),
            end_date: end.map(str::to_string),
            current,
            achievements: vec![],
            technologies: vec![],
        }
    }

    #[test]
    fn test_embedded_resume_parses() {
        let data = ResumeData::embedded().unwrap();
        assert!(!data.personal_info.name.is_empty());
        assert!(!data.experience.is_empty());
    }

    #[test]
    fn test_period_current_renders_present() {
        assert_eq!(entry(true, None).period(), "Mar 2021 – Present");
    }

    #[test]
    fn test_period_current_ignores_end_date() {
        assert_eq!(entry(true, Some("2023-01")).period(), "Mar 2021 – Present");
    }

    #[test]
    fn test_period_past_role() {
        assert_eq!(entry(false, Some("2023-11")).period(), "Mar 2021 – Nov 2023");
    }

    #[test]
    fn test_period_without_end_shows_start_only() {
        assert_eq!(entry(false, None).period(), "Mar 2021");
    }

    #[test]
    fn test_format_month_passthrough() {
        assert_eq!(format_month("2019"), "2019");
        assert_eq!(format_month("Summer 2020"), "Summer 2020");
        assert_eq!(format_month("2020-07-15"), "Jul 2020");
    }

    #[test]
    fn test_competencies_preserve_source_order() {
        let json = r#"{"tools": ["git"], "backend": ["rust", "go"], "frontend": ["ts"]}"#;
        let groups: Competencies = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = groups.groups().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["tools", "backend", "frontend"]);

        let back = serde_json::to_string(&groups).unwrap();
        assert!(back.find("tools").unwrap() < back.find("frontend").unwrap());
    }

    #[test]
    fn test_competencies_skip_empty_groups() {
        let groups = Competencies::new(vec![
            ("empty".to_string(), vec![]),
            ("tools".to_string(), vec!["git".to_string()]),
        ]);
        assert_eq!(groups.groups().count(), 1);
        assert!(!groups.is_empty());
        assert!(Competencies::default().is_empty());
    }

    #[test]
    fn test_optional_sections_default_to_empty() {
        let json = r#"{"personalInfo": {"name": "Sam"}}"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert!(data.certifications.is_empty());
        assert!(data.languages.is_empty());
        assert!(data.experience.is_empty());
        assert!(data.personal_info.image.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            br#"{"personalInfo": {"name": "From Disk"}, "summary": "hi"}"#,
        )
        .unwrap();
        let data = ResumeData::load(Some(file.path())).unwrap();
        assert_eq!(data.personal_info.name, "From Disk");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(ResumeData::load(Some(Path::new("/definitely/not/here.json"))).is_err());
    }
}
