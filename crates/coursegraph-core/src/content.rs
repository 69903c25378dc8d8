//! Content model: courses, the units embedded in them, and pages.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of a content item, as written in front-matter `type:` and in the
/// index `typename`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A course document (`content/{id}/course.yaml`).
    Course,
    /// A unit, embedded in its course document.
    Unit,
    /// A page (`content/{course}/pages/{id}.mdx`).
    Page,
}

impl ContentKind {
    /// Lowercase name used on disk and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Unit => "unit",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "course" => Ok(Self::Course),
            "unit" => Ok(Self::Unit),
            "page" => Ok(Self::Page),
            other => Err(format!("unknown content type: {other}")),
        }
    }
}

fn course_kind() -> ContentKind {
    ContentKind::Course
}

fn unit_kind() -> ContentKind {
    ContentKind::Unit
}

fn page_kind() -> ContentKind {
    ContentKind::Page
}

/// Front-matter of a course file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDocument {
    /// Course id, also the name of its directory under `content/`.
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default = "course_kind")]
    pub kind: ContentKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form version label. Unquoted YAML numbers are accepted.
    #[serde(
        default,
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Units in display order. `None` when the file has no `units` key;
    /// an emptied list is kept as `Some` and written as `units: []`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<Vec<UnitEntry>>,

    /// Unrecognised keys, kept so a rewrite does not drop them.
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl CourseDocument {
    /// Create an empty course document with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Units in display order, empty when there are none.
    pub fn units(&self) -> &[UnitEntry] {
        self.units.as_deref().unwrap_or_default()
    }

    /// Unit list for modification, created empty if the course had none.
    pub fn units_mut(&mut self) -> &mut Vec<UnitEntry> {
        self.units.get_or_insert_with(Vec::new)
    }

    /// Find a unit by id.
    pub fn unit(&self, unit_id: &str) -> Option<&UnitEntry> {
        self.units().iter().find(|u| u.id == unit_id)
    }

    /// Find a unit by id for modification.
    pub fn unit_mut(&mut self, unit_id: &str) -> Option<&mut UnitEntry> {
        self.units.as_mut()?.iter_mut().find(|u| u.id == unit_id)
    }

    /// Unit ids in display order.
    pub fn unit_ids(&self) -> Vec<String> {
        self.units().iter().map(|u| u.id.clone()).collect()
    }
}

impl Default for CourseDocument {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: ContentKind::Course,
            title: None,
            version: None,
            subtitle: None,
            author: None,
            units: None,
            extra: BTreeMap::new(),
        }
    }
}

/// A unit as stored inside its course document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitEntry {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", default = "unit_kind")]
    pub kind: ContentKind,

    /// Page ids in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<String>,
}

impl UnitEntry {
    /// Create a unit with the given id, title and page list.
    pub fn new(id: impl Into<String>, title: Option<String>, pages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title,
            kind: ContentKind::Unit,
            pages,
        }
    }
}

/// Front-matter of a page file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFrontmatter {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default = "page_kind")]
    pub kind: ContentKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PageFrontmatter {
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            kind: ContentKind::Page,
            title,
        }
    }
}

impl Default for PageFrontmatter {
    fn default() -> Self {
        Self::new(String::new(), None)
    }
}

/// A page as served to clients: front-matter fields plus the trimmed body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: Option<String>,
    pub content: String,
}

/// Accept any YAML scalar where a string is expected.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_yaml::Value::Null) => None,
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a scalar, found {other:?}"
            )));
        }
    })
}
