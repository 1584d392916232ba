//! Built-in prompt, label set, and entity schema
//!
//! The default system prompt was tuned for [`DEFAULT_MODEL`] and is English
//! only. Other models fall back to it with a warning at resolution time.

use crate::domain::PiiLabel;
use serde_json::{json, Value};

/// Model the built-in prompt was written for
pub const DEFAULT_MODEL: &str = "meta/llama-3.1-70b-instruct";

/// Language the built-in prompt is written in
pub const DEFAULT_LANGUAGE: &str = "en";

/// Name given to the schema in `response_format` requests
pub const SCHEMA_NAME: &str = "pii_entities";

/// Default PII label enumeration
pub const DEFAULT_PII_LABELS: &[&str] = &[
    "medical_record_number",
    "location",
    "address",
    "ssn",
    "date_of_birth",
    "date_time",
    "name",
    "email",
    "customer_id",
    "employee_id",
    "phone_number",
    "ip_address",
    "credit_card_number",
    "user_name",
    "device_identifier",
    "bank_routing_number",
    "company_name",
    "unique_identifier",
    "biometric_identifier",
    "account_number",
    "certificate_license_number",
    "license_plate",
    "vehicle_identifier",
    "api_key",
    "password",
    "health_plan_beneficiary_number",
    "national_id",
    "tax_id",
    "url",
    "swift_bic",
    "cvv",
    "pin",
];

/// Built-in system prompt for [`DEFAULT_MODEL`]
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert redactor. The user is going to provide you with some text. \
Please find all personally identifying information from this text. \
Return results as a JSON array of objects, each with the fields \"entity_type\" and \"text\". \
Only return results for entities which actually appear in the text. \
It is very important that you return the text by copying it exactly from the input. \
Do not perform any modification or normalization of the text. \
The entity_type should be one of these: medical_record_number, location, address, ssn, \
date_of_birth, date_time, name, email, customer_id, employee_id, phone_number, ip_address, \
credit_card_number, user_name, device_identifier, bank_routing_number, company_name, \
unique_identifier, biometric_identifier, account_number, certificate_license_number, \
license_plate, vehicle_identifier, api_key, password, health_plan_beneficiary_number, \
national_id, tax_id, url, swift_bic, cvv, pin. \
If there is no personally identifying information, return an empty array.";

/// Default labels as owned strings, for config defaults
pub fn default_pii_labels() -> Vec<String> {
    DEFAULT_PII_LABELS.iter().map(|s| s.to_string()).collect()
}

/// JSON schema of an entity list constrained to `labels`
///
/// ```
/// use pii_curator::config::prompts::entity_json_schema;
/// use pii_curator::domain::PiiLabel;
///
/// let schema = entity_json_schema(&[PiiLabel::new("name").unwrap()]);
/// assert_eq!(schema["type"], "array");
/// assert_eq!(schema["items"]["properties"]["entity_type"]["enum"][0], "name");
/// ```
pub fn entity_json_schema(labels: &[PiiLabel]) -> Value {
    let label_names: Vec<&str> = labels.iter().map(PiiLabel::as_str).collect();

    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["entity_type", "text"],
            "additionalProperties": false,
            "properties": {
                "entity_type": {"type": "string", "enum": label_names},
                "text": {"type": "string"}
            }
        }
    })
}

/// Entity list schema wrapped in an object root (`{"entities": [...]}`)
///
/// OpenAI-style `response_format` schemas must have an object at the root.
pub fn wrapped_entity_json_schema(labels: &[PiiLabel]) -> Value {
    json!({
        "type": "object",
        "required": ["entities"],
        "additionalProperties": false,
        "properties": {
            "entities": entity_json_schema(labels)
        }
    })
}
