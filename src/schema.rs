//! Content types as they are defined in the CMS studio.
//!
//! The frontend only reads documents, but editors author them against these
//! definitions, so the same field names, requirements and orderings are
//! kept here. [`validate_document`] applies the field rules to exported
//! documents and [`StudioConfig`] captures the desk structure, including the
//! site-settings singleton.

use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

use crate::sanity::queries::SINGLETON_ID;

/// Schema types that may only ever have one document.
pub const SINGLETON_TYPES: &[&str] = &["siteSettings"];

/// Loose email check used as a warning on the settings document.
#[allow(clippy::expect_used)]
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex: RE_EMAIL")
});

/// Top-level document or embedded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Stored as its own document with an `_id`.
    Document,
    /// Only ever embedded inside a document.
    Object,
}

/// Field value kinds understood by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text.
    String,
    /// Multi-line text.
    Text,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// RFC 3339 instant.
    Datetime,
    /// Any JSON number.
    Number,
    /// `true`/`false`.
    Boolean,
    /// Absolute URL.
    Url,
    /// Image asset with its own sub-fields.
    Image,
    /// Rich-text block array.
    Blocks,
    /// Array of embedded objects described by the field's sub-fields.
    Array,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String | Self::Text | Self::Date | Self::Datetime | Self::Url => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Image => value.is_object(),
            Self::Blocks | Self::Array => value.is_array(),
        }
    }
}

/// How serious a failed rule is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Editors are told but can still publish.
    Warning,
    /// Blocks publishing.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single validation constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Field must be present and non-null.
    Required,
    /// Number must be at least this.
    Min(f64),
    /// Number must be at most this.
    Max(f64),
    /// Number must be whole.
    Integer,
    /// Text must be at most this many characters.
    MaxLength(usize),
    /// URL must use one of these schemes.
    UriScheme(&'static [&'static str]),
    /// Text must look like an email address.
    Email,
}

/// A rule together with the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    /// The constraint.
    pub rule: Rule,
    /// Reported severity.
    pub severity: Severity,
    /// Editor-facing message.
    pub message: &'static str,
}

/// One field of a schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// JSON property name.
    pub name: &'static str,
    /// Studio label.
    pub title: &'static str,
    /// Value kind.
    pub kind: FieldKind,
    /// Constraints checked by [`validate_document`].
    pub rules: Vec<Validation>,
    /// Value pre-filled for new documents.
    pub initial_value: Option<Value>,
    /// Sub-fields of images and array members.
    pub fields: Vec<FieldDef>,
}

impl FieldDef {
    fn new(name: &'static str, title: &'static str, kind: FieldKind) -> Self {
        Self { name, title, kind, rules: Vec::new(), initial_value: None, fields: Vec::new() }
    }

    fn rule(mut self, rule: Rule, severity: Severity, message: &'static str) -> Self {
        self.rules.push(Validation { rule, severity, message });
        self
    }

    fn required(self, message: &'static str) -> Self {
        self.rule(Rule::Required, Severity::Error, message)
    }

    fn initial(mut self, value: Value) -> Self {
        self.initial_value = Some(value);
        self
    }

    fn with_fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields = fields;
        self
    }

    /// Whether a value must be supplied.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|v| v.rule == Rule::Required)
    }
}

/// Sort direction for an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// A named studio list ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// Identifier.
    pub name: &'static str,
    /// Menu label.
    pub title: &'static str,
    /// Sort keys, most significant first.
    pub by: Vec<(&'static str, Direction)>,
}

/// A registered content type.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSchema {
    /// `_type` value.
    pub name: &'static str,
    /// Studio label.
    pub title: &'static str,
    /// Document or embedded object.
    pub kind: SchemaKind,
    /// Fields in studio order.
    pub fields: Vec<FieldDef>,
    /// Available list orderings.
    pub orderings: Vec<Ordering>,
}

impl DocumentSchema {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether only one document of this type may exist.
    pub fn is_singleton(&self) -> bool {
        SINGLETON_TYPES.contains(&self.name)
    }
}

fn image_alt(required: bool) -> FieldDef {
    let alt = FieldDef::new("alt", "Alt Text", FieldKind::String);
    if required {
        alt.required("Alt text is required for accessibility.")
    } else {
        alt
    }
}

fn date_orderings(newest_first: bool) -> Vec<Ordering> {
    let desc = Ordering { name: "dateDesc", title: "Date (Newest First)", by: vec![("date", Direction::Desc)] };
    let asc = Ordering { name: "dateAsc", title: "Date (Oldest First)", by: vec![("date", Direction::Asc)] };
    if newest_first { vec![desc, asc] } else { vec![asc, desc] }
}

fn sermon() -> DocumentSchema {
    DocumentSchema {
        name: "sermon",
        title: "Sermon",
        kind: SchemaKind::Document,
        fields: vec![
            FieldDef::new("title", "Title", FieldKind::String).required("A sermon title is required."),
            FieldDef::new("date", "Date", FieldKind::Date).required("A sermon date is required."),
            FieldDef::new("speaker", "Speaker", FieldKind::String).required("A speaker name is required."),
            FieldDef::new("scripture", "Scripture Reference", FieldKind::String),
            FieldDef::new("videoUrl", "Video URL", FieldKind::Url).rule(
                Rule::UriScheme(&["http", "https"]),
                Severity::Error,
                "Video URL must start with http or https.",
            ),
            FieldDef::new("thumbnail", "Thumbnail Image", FieldKind::Image).with_fields(vec![image_alt(true)]),
        ],
        orderings: date_orderings(true),
    }
}

fn event() -> DocumentSchema {
    let mut orderings = date_orderings(false);
    if let Some(first) = orderings.first_mut() {
        first.title = "Date (Upcoming First)";
    }
    if let Some(last) = orderings.last_mut() {
        last.title = "Date (Most Recent First)";
    }

    DocumentSchema {
        name: "event",
        title: "Event",
        kind: SchemaKind::Document,
        fields: vec![
            FieldDef::new("title", "Title", FieldKind::String).required("An event title is required."),
            FieldDef::new("date", "Date", FieldKind::Date).required("An event date is required."),
            FieldDef::new("time", "Time", FieldKind::String),
            FieldDef::new("location", "Location", FieldKind::String),
            FieldDef::new("description", "Description", FieldKind::Text).rule(
                Rule::MaxLength(500),
                Severity::Warning,
                "Consider keeping the description under 500 characters.",
            ),
            FieldDef::new("image", "Event Image", FieldKind::Image).with_fields(vec![image_alt(true)]),
            FieldDef::new("isRecurring", "Recurring Event", FieldKind::Boolean).initial(Value::Bool(false)),
        ],
        orderings,
    }
}

fn announcement() -> DocumentSchema {
    const PRIORITY_MESSAGE: &str = "Priority should be between 1 and 5.";

    DocumentSchema {
        name: "announcement",
        title: "Announcement",
        kind: SchemaKind::Document,
        fields: vec![
            FieldDef::new("title", "Title", FieldKind::String).required("An announcement title is required."),
            FieldDef::new("body", "Body", FieldKind::Blocks),
            FieldDef::new("publishDate", "Publish Date", FieldKind::Datetime)
                .required("A publish date is required."),
            FieldDef::new("expiryDate", "Expiry Date", FieldKind::Datetime),
            FieldDef::new("priority", "Priority", FieldKind::Number)
                .rule(Rule::Min(1.0), Severity::Warning, PRIORITY_MESSAGE)
                .rule(Rule::Max(5.0), Severity::Warning, PRIORITY_MESSAGE)
                .rule(Rule::Integer, Severity::Warning, PRIORITY_MESSAGE)
                .initial(Value::from(3)),
        ],
        orderings: vec![
            Ordering {
                name: "priorityDesc",
                title: "Priority (Highest First)",
                by: vec![("priority", Direction::Desc), ("publishDate", Direction::Desc)],
            },
            Ordering {
                name: "publishDateDesc",
                title: "Publish Date (Newest First)",
                by: vec![("publishDate", Direction::Desc)],
            },
        ],
    }
}

fn site_settings() -> DocumentSchema {
    DocumentSchema {
        name: "siteSettings",
        title: "Site Settings",
        kind: SchemaKind::Document,
        fields: vec![
            FieldDef::new("churchName", "Church Name", FieldKind::String),
            FieldDef::new("address", "Address", FieldKind::String),
            FieldDef::new("phone", "Phone Number", FieldKind::String),
            FieldDef::new("email", "Email Address", FieldKind::String).rule(
                Rule::Email,
                Severity::Warning,
                "This doesn't look like a valid email address.",
            ),
            FieldDef::new("serviceTimes", "Service Times", FieldKind::Array).with_fields(vec![
                FieldDef::new("day", "Day", FieldKind::String).required("A day is required."),
                FieldDef::new("time", "Time", FieldKind::String).required("A time is required."),
            ]),
        ],
        orderings: Vec::new(),
    }
}

fn leader() -> DocumentSchema {
    DocumentSchema {
        name: "leader",
        title: "Leader",
        kind: SchemaKind::Object,
        fields: vec![
            FieldDef::new("name", "Name", FieldKind::String).required("A name is required."),
            FieldDef::new("role", "Role", FieldKind::String).required("A role is required."),
            FieldDef::new("image", "Profile Image", FieldKind::Image).with_fields(vec![image_alt(false)]),
            FieldDef::new("bio", "Bio", FieldKind::Text),
        ],
        orderings: Vec::new(),
    }
}

fn leadership_group() -> DocumentSchema {
    DocumentSchema {
        name: "leadershipGroup",
        title: "Leadership Group",
        kind: SchemaKind::Document,
        fields: vec![
            FieldDef::new("title", "Title", FieldKind::String).required("A group title is required."),
            FieldDef::new("description", "Description", FieldKind::Text).required("A description is required."),
            FieldDef::new("order", "Display Order", FieldKind::Number)
                .required("A display order is required.")
                .initial(Value::from(0)),
            FieldDef::new("members", "Members", FieldKind::Array).with_fields(leader().fields),
        ],
        orderings: vec![Ordering {
            name: "orderAsc",
            title: "Display Order",
            by: vec![("order", Direction::Asc)],
        }],
    }
}

/// Every registered content type, in studio order.
pub fn schema_types() -> Vec<DocumentSchema> {
    vec![sermon(), event(), announcement(), site_settings(), leader(), leadership_group()]
}

/// Find a registered type by its `_type` name.
pub fn schema_for(name: &str) -> Option<DocumentSchema> {
    schema_types().into_iter().find(|s| s.name == name)
}

/// A failed rule at a field path such as `serviceTimes[1].day`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Dotted path to the offending field.
    pub path: String,
    /// Severity of the failed rule.
    pub severity: Severity,
    /// Editor-facing message.
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// Check a document against its schema.
///
/// Missing required fields, values of the wrong kind and failed rules are
/// all reported; nothing short-circuits. Sub-fields of an image are only
/// checked when the image itself is present.
pub fn validate_document(schema: &DocumentSchema, document: &Value) -> Vec<Issue> {
    let mut issues = Vec::new();
    validate_fields(&schema.fields, document, "", &mut issues);
    issues
}

fn validate_fields(fields: &[FieldDef], object: &Value, prefix: &str, issues: &mut Vec<Issue>) {
    for field in fields {
        let path = if prefix.is_empty() { field.name.to_string() } else { format!("{prefix}.{}", field.name) };
        match object.get(field.name).filter(|v| !v.is_null()) {
            None => {
                for v in field.rules.iter().filter(|v| v.rule == Rule::Required) {
                    issues.push(Issue { path: path.clone(), severity: v.severity, message: v.message.to_string() });
                }
            }
            Some(value) => validate_value(field, value, &path, issues),
        }
    }
}

fn validate_value(field: &FieldDef, value: &Value, path: &str, issues: &mut Vec<Issue>) {
    if !field.kind.accepts(value) {
        issues.push(Issue {
            path: path.to_string(),
            severity: Severity::Error,
            message: format!("Expected a {:?} value.", field.kind).to_lowercase(),
        });
        return;
    }

    for v in &field.rules {
        if !rule_holds(&v.rule, value) {
            issues.push(Issue { path: path.to_string(), severity: v.severity, message: v.message.to_string() });
        }
    }

    match field.kind {
        FieldKind::Image => validate_fields(&field.fields, value, path, issues),
        FieldKind::Array if !field.fields.is_empty() => {
            for (i, item) in value.as_array().into_iter().flatten().enumerate() {
                validate_fields(&field.fields, item, &format!("{path}[{i}]"), issues);
            }
        }
        _ => {}
    }
}

fn rule_holds(rule: &Rule, value: &Value) -> bool {
    match rule {
        Rule::Required => true,
        Rule::Min(min) => value.as_f64().is_none_or(|n| n >= *min),
        Rule::Max(max) => value.as_f64().is_none_or(|n| n <= *max),
        Rule::Integer => value.as_f64().is_none_or(|n| n.fract().abs() < f64::EPSILON),
        Rule::MaxLength(max) => value.as_str().is_none_or(|s| s.chars().count() <= *max),
        Rule::UriScheme(schemes) => value
            .as_str()
            .is_none_or(|s| s.split_once("://").is_some_and(|(scheme, _)| schemes.contains(&scheme))),
        Rule::Email => value.as_str().is_none_or(|s| RE_EMAIL.is_match(s)),
    }
}

/// Validate an exported dataset: each document against its type plus the
/// singleton rule. Returns `(document id, issue)` pairs.
pub fn validate_export(documents: &[Value]) -> Vec<(String, Issue)> {
    let types = schema_types();
    let mut report = Vec::new();
    let mut singletons_seen: Vec<&str> = Vec::new();

    for (i, doc) in documents.iter().enumerate() {
        let id = doc["_id"].as_str().map_or_else(|| format!("#{i}"), String::from);
        let Some(type_name) = doc["_type"].as_str() else {
            report.push((id, Issue { path: "_type".into(), severity: Severity::Error, message: "Missing _type.".into() }));
            continue;
        };

        let Some(schema) = types.iter().find(|s| s.name == type_name && s.kind == SchemaKind::Document) else {
            report.push((
                id,
                Issue {
                    path: "_type".into(),
                    severity: Severity::Warning,
                    message: format!("Unknown document type '{type_name}'."),
                },
            ));
            continue;
        };

        if schema.is_singleton() {
            if id != SINGLETON_ID && id != format!("drafts.{SINGLETON_ID}") {
                report.push((
                    id.clone(),
                    Issue {
                        path: "_id".into(),
                        severity: Severity::Error,
                        message: format!("{} must use the fixed id '{SINGLETON_ID}'.", schema.title),
                    },
                ));
            }
            if singletons_seen.contains(&schema.name) && !id.starts_with("drafts.") {
                report.push((
                    id.clone(),
                    Issue {
                        path: "_id".into(),
                        severity: Severity::Error,
                        message: format!("Only one {} document may exist.", schema.title),
                    },
                ));
            }
            if !id.starts_with("drafts.") {
                singletons_seen.push(schema.name);
            }
        }

        report.extend(validate_document(schema, doc).into_iter().map(|issue| (id.clone(), issue)));
    }

    report
}

/// Document-level actions the studio may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    /// New document from a template.
    Create,
    /// Publish the draft.
    Publish,
    /// Revert to the draft-only state.
    Unpublish,
    /// Drop unpublished changes.
    DiscardChanges,
    /// Copy into a new document.
    Duplicate,
    /// Remove the document.
    Delete,
    /// Restore an earlier revision.
    Restore,
}

const ALL_ACTIONS: &[DocumentAction] = &[
    DocumentAction::Create,
    DocumentAction::Publish,
    DocumentAction::Unpublish,
    DocumentAction::DiscardChanges,
    DocumentAction::Duplicate,
    DocumentAction::Delete,
    DocumentAction::Restore,
];

/// A "new document" template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Schema type the template creates.
    pub schema_type: &'static str,
    /// Menu label.
    pub title: &'static str,
}

/// One entry in the studio's content list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureItem {
    /// Opens the single document directly.
    Singleton {
        /// Schema type.
        schema_type: &'static str,
        /// Label.
        title: &'static str,
        /// Fixed document id.
        document_id: &'static str,
    },
    /// Visual separator.
    Divider,
    /// Standard list of every document of a type.
    DocumentList {
        /// Schema type.
        schema_type: &'static str,
        /// Label.
        title: &'static str,
    },
}

/// Studio configuration: registered types, desk structure and permitted actions.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    /// Studio identifier.
    pub name: &'static str,
    /// Studio title.
    pub title: &'static str,
    /// Registered types.
    pub types: Vec<DocumentSchema>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self { name: "ucc-studio", title: "United Community Church", types: schema_types() }
    }
}

impl StudioConfig {
    fn documents(&self) -> impl Iterator<Item = &DocumentSchema> {
        self.types.iter().filter(|s| s.kind == SchemaKind::Document)
    }

    /// Actions available on documents of `schema_type`.
    ///
    /// Singletons can be edited and published but never created, duplicated
    /// or deleted.
    pub fn document_actions(&self, schema_type: &str) -> Vec<DocumentAction> {
        let singleton = SINGLETON_TYPES.contains(&schema_type);
        ALL_ACTIONS
            .iter()
            .copied()
            .filter(|a| {
                !singleton
                    || !matches!(a, DocumentAction::Create | DocumentAction::Duplicate | DocumentAction::Delete)
            })
            .collect()
    }

    /// "New document" templates; singletons have none.
    pub fn templates(&self) -> Vec<Template> {
        self.documents()
            .filter(|s| !s.is_singleton())
            .map(|s| Template { schema_type: s.name, title: s.title })
            .collect()
    }

    /// Desk structure: singletons first, a divider, then one list per type.
    pub fn structure(&self) -> Vec<StructureItem> {
        let mut items: Vec<StructureItem> = self
            .documents()
            .filter(|s| s.is_singleton())
            .map(|s| StructureItem::Singleton { schema_type: s.name, title: s.title, document_id: SINGLETON_ID })
            .collect();
        items.push(StructureItem::Divider);
        items.extend(
            self.documents()
                .filter(|s| !s.is_singleton())
                .map(|s| StructureItem::DocumentList { schema_type: s.name, title: s.title }),
        );
        items
    }
}
