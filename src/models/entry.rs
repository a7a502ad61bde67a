//! Changelog entry model matching the frontend ChangelogEntry interface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Reactions;
use crate::errors::AppError;

/// Kind of change a release note describes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    New,
    Fix,
    Improvement,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::New => "new",
            ChangeType::Fix => "fix",
            ChangeType::Improvement => "improvement",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ChangeType::New => "✨",
            ChangeType::Fix => "🐛",
            ChangeType::Improvement => "🛠️",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::New => "New",
            ChangeType::Fix => "Fix",
            ChangeType::Improvement => "Improvement",
        }
    }
}

/// Product area an entry belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ui,
    Performance,
    Security,
    Feature,
    Api,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ui => "ui",
            Category::Performance => "performance",
            Category::Security => "security",
            Category::Feature => "feature",
            Category::Api => "api",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Ui => "UI",
            Category::Performance => "Performance",
            Category::Security => "Security",
            Category::Feature => "Feature",
            Category::Api => "API",
            Category::Other => "Other",
        }
    }
}

/// One published release note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    pub id: String,
    pub version: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub category: Category,
    pub reactions: Reactions,
}

/// Request body for creating a new entry: every field except `id` and `reactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub version: String,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub category: Category,
}

impl CreateEntryRequest {
    /// Reject blank text fields. The store itself never validates.
    pub fn validate(&self) -> Result<(), AppError> {
        require("Version", &self.version)?;
        require("Title", &self.title)?;
        require("Description", &self.description)?;
        Ok(())
    }
}

/// Request body for a partial update. Omitted fields are preserved.
///
/// There is no way to carry `id` or `reactions`; unknown JSON keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl UpdateEntryRequest {
    /// Supplied text fields must not be blank.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(version) = &self.version {
            require("Version", version)?;
        }
        if let Some(title) = &self.title {
            require("Title", title)?;
        }
        if let Some(description) = &self.description {
            require("Description", description)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into `entry`.
    pub fn apply_to(&self, entry: &mut ChangelogEntry) {
        if let Some(version) = &self.version {
            entry.version = version.clone();
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(change_type) = self.change_type {
            entry.change_type = change_type;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
    }
}

/// The edit form always submits every field.
impl From<CreateEntryRequest> for UpdateEntryRequest {
    fn from(fields: CreateEntryRequest) -> Self {
        Self {
            version: Some(fields.version),
            date: Some(fields.date),
            title: Some(fields.title),
            description: Some(fields.description),
            change_type: Some(fields.change_type),
            category: Some(fields.category),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_entry() -> ChangelogEntry {
        ChangelogEntry {
            id: "abc".to_string(),
            version: "v1.0.0".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            title: "Initial".to_string(),
            description: "First release".to_string(),
            change_type: ChangeType::New,
            category: Category::Feature,
            reactions: Reactions::zeroed(),
        }
    }

    #[test]
    fn test_entry_json_shape() {
        let value = serde_json::to_value(sample_entry()).unwrap();
        assert_eq!(value["date"], "2023-06-15");
        assert_eq!(value["type"], "new");
        assert_eq!(value["category"], "feature");
        assert_eq!(value["reactions"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_update_request_ignores_id_and_reactions() {
        let request: UpdateEntryRequest = serde_json::from_value(json!({
            "id": "hijacked",
            "title": "Renamed",
            "reactions": []
        }))
        .unwrap();

        let mut entry = sample_entry();
        let before = entry.clone();
        request.apply_to(&mut entry);

        assert_eq!(entry.title, "Renamed");
        assert_eq!(entry.id, before.id);
        assert_eq!(entry.reactions, before.reactions);
        assert_eq!(entry.description, before.description);
        assert_eq!(entry.date, before.date);
    }

    #[test]
    fn test_create_validation_rejects_blank_fields() {
        let mut request = CreateEntryRequest {
            version: "v1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            title: "   ".to_string(),
            description: "Body".to_string(),
            change_type: ChangeType::Fix,
            category: Category::Other,
        };
        let err = request.validate().unwrap_err();
        assert_eq!(err.message(), "Title is required");

        request.title = "Ok".to_string();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_validation_only_checks_supplied_fields() {
        assert!(UpdateEntryRequest::default().validate().is_ok());

        let request = UpdateEntryRequest {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(request.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_labels() {
        assert_eq!(ChangeType::Fix.emoji(), "🐛");
        assert_eq!(ChangeType::Improvement.label(), "Improvement");
        assert_eq!(Category::Api.label(), "API");
        assert_eq!(Category::Ui.as_str(), "ui");
    }
}
