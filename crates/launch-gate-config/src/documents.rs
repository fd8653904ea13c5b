// crates/launch-gate-config/src/documents.rs
// ============================================================================
// Module: Launch Gate Input Documents
// Description: Schema checks and decoding for listing and catalog documents.
// Purpose: Turn untrusted JSON into typed inputs or field-pathed issues.
// Dependencies: launch-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Input documents are untrusted. Each decoder checks the document's shape
//! before handing it to typed deserialization and reports every violation as
//! a field-pathed issue. Issues are data: a malformed document never raises a
//! fault, it short-circuits further processing of that document instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use launch_gate_core::ApplicabilityCatalog;
use launch_gate_core::ApplicabilityRule;
use launch_gate_core::ListingInput;
use launch_gate_core::RawEvidenceDoc;
use launch_gate_core::RuleCatalog;
use launch_gate_core::RuleRecord;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Issue Codes
// ============================================================================

/// Issue code for a document that is not a JSON object.
pub const ISSUE_NOT_OBJECT: &str = "DOC_NOT_OBJECT";
/// Issue code for a missing required field.
pub const ISSUE_FIELD_MISSING: &str = "DOC_FIELD_MISSING";
/// Issue code for a field with the wrong JSON type.
pub const ISSUE_FIELD_TYPE: &str = "DOC_FIELD_TYPE";
/// Issue code for a field that fails typed decoding.
pub const ISSUE_FIELD_INVALID: &str = "DOC_FIELD_INVALID";

// ============================================================================
// SECTION: Document Issues
// ============================================================================

/// One field-pathed schema violation in an input document.
///
/// # Invariants
/// - `path` uses dotted segments with `[index]` for array elements; the
///   empty string denotes the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIssue {
    /// Path of the offending field.
    pub path: String,
    /// Stable issue code.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl DocumentIssue {
    /// Creates a document issue.
    #[must_use]
    pub fn new(path: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// SECTION: Decoders
// ============================================================================

/// Decodes a listing document.
///
/// # Errors
///
/// Returns every schema violation found, each with the path of the offending
/// field.
pub fn decode_listing(value: &Value) -> Result<ListingInput, Vec<DocumentIssue>> {
    let Some(root) = value.as_object() else {
        return Err(vec![not_object_issue("")]);
    };
    let mut issues = Vec::new();

    match root.get("listing_id") {
        None => issues.push(missing_issue("listing_id")),
        Some(Value::String(id)) if !id.trim().is_empty() => {}
        Some(Value::String(_)) => issues.push(DocumentIssue::new(
            "listing_id",
            ISSUE_FIELD_INVALID,
            "listing_id must be non-empty",
        )),
        Some(_) => issues.push(type_issue("listing_id", "string")),
    }

    if let Some(attributes) = root.get("attributes") {
        if attributes.is_object() {
            check_attributes(attributes, &mut issues);
        } else {
            issues.push(type_issue("attributes", "object"));
        }
    }

    if let Some(evidence) = root.get("evidence") {
        if let Some(entries) = evidence.as_object() {
            for (key, doc) in entries {
                let path = format!("evidence.{key}");
                if !doc.is_object() {
                    issues.push(type_issue(&path, "object"));
                    continue;
                }
                if let Err(err) = RawEvidenceDoc::deserialize(doc) {
                    issues.push(DocumentIssue::new(path, ISSUE_FIELD_INVALID, err.to_string()));
                }
            }
        } else {
            issues.push(type_issue("evidence", "object"));
        }
    }

    finish(value, issues)
}

/// Decodes a rule catalog document.
///
/// # Errors
///
/// Returns every schema violation found, each with the path of the offending
/// field.
pub fn decode_rule_catalog(value: &Value) -> Result<RuleCatalog, Vec<DocumentIssue>> {
    let Some(root) = value.as_object() else {
        return Err(vec![not_object_issue("")]);
    };
    let mut issues = Vec::new();

    match root.get("version") {
        None => issues.push(missing_issue("version")),
        Some(Value::String(_)) => {}
        Some(_) => issues.push(type_issue("version", "string")),
    }
    check_elements::<RuleRecord>(root.get("rules"), "rules", &mut issues);

    finish(value, issues)
}

/// Decodes an applicability catalog document.
///
/// # Errors
///
/// Returns every schema violation found, each with the path of the offending
/// field.
pub fn decode_applicability_catalog(
    value: &Value,
) -> Result<ApplicabilityCatalog, Vec<DocumentIssue>> {
    let Some(root) = value.as_object() else {
        return Err(vec![not_object_issue("")]);
    };
    let mut issues = Vec::new();
    check_elements::<ApplicabilityRule>(root.get("entries"), "entries", &mut issues);
    finish(value, issues)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Boolean attribute fields and their expected JSON type.
const BOOL_ATTRIBUTES: [&str; 6] = [
    "is_radio_equipment",
    "is_medical_device",
    "is_aviation_equipment",
    "is_military_equipment",
    "is_emc_relevant",
    "is_battery_powered",
];

/// Optional voltage attribute fields.
const VOLTAGE_ATTRIBUTES: [&str; 4] =
    ["ac_voltage_min", "ac_voltage_max", "dc_voltage_min", "dc_voltage_max"];

/// Checks listing attribute field types.
fn check_attributes(attributes: &Value, issues: &mut Vec<DocumentIssue>) {
    for field in BOOL_ATTRIBUTES {
        if let Some(raw) = attributes.get(field)
            && !raw.is_boolean()
        {
            issues.push(type_issue(&format!("attributes.{field}"), "boolean"));
        }
    }
    for field in VOLTAGE_ATTRIBUTES {
        if let Some(raw) = attributes.get(field)
            && !raw.is_null()
            && raw.as_u64().is_none()
        {
            issues.push(type_issue(&format!("attributes.{field}"), "non-negative integer"));
        }
    }
}

/// Checks a required array field and typed-decodes each element.
fn check_elements<T: for<'de> Deserialize<'de>>(
    field: Option<&Value>,
    path: &str,
    issues: &mut Vec<DocumentIssue>,
) {
    match field {
        None => issues.push(missing_issue(path)),
        Some(Value::Array(elements)) => {
            for (index, element) in elements.iter().enumerate() {
                if let Err(err) = T::deserialize(element) {
                    issues.push(DocumentIssue::new(
                        format!("{path}[{index}]"),
                        ISSUE_FIELD_INVALID,
                        err.to_string(),
                    ));
                }
            }
        }
        Some(_) => issues.push(type_issue(path, "array")),
    }
}

/// Runs typed deserialization after the structural checks pass.
fn finish<T: for<'de> Deserialize<'de>>(
    value: &Value,
    issues: Vec<DocumentIssue>,
) -> Result<T, Vec<DocumentIssue>> {
    if !issues.is_empty() {
        return Err(issues);
    }
    T::deserialize(value)
        .map_err(|err| vec![DocumentIssue::new("", ISSUE_FIELD_INVALID, err.to_string())])
}

/// Issue for a document whose root is not a JSON object.
fn not_object_issue(path: &str) -> DocumentIssue {
    DocumentIssue::new(path, ISSUE_NOT_OBJECT, "document must be a JSON object")
}

/// Issue for a missing required field.
fn missing_issue(path: &str) -> DocumentIssue {
    DocumentIssue::new(path, ISSUE_FIELD_MISSING, format!("required field `{path}` is missing"))
}

/// Issue for a field with the wrong JSON type.
fn type_issue(path: &str, expected: &str) -> DocumentIssue {
    DocumentIssue::new(path, ISSUE_FIELD_TYPE, format!("`{path}` must be a {expected}"))
}
