//! Legacy record schema
//!
//! Top-level legacy record fields wrapping the nested metadata dump.

use super::SerializerError;
use super::fields::{get_path, insert_opt, integer, sanitized, scalar_string, string};
use super::metadata::MetadataSchema;
use serde_json::{Map, Value, json};

/// Record fields the metadata schema needs to see
const HOOKED_FIELDS: &[&str] = &["custom_fields", "access", "pids", "parent"];

/// Legacy draft state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyState {
    Unsubmitted,
    InProgress,
    Done,
}

impl LegacyState {
    pub fn from_flags(is_published: bool, is_draft: bool) -> Self {
        match (is_published, is_draft) {
            (false, _) => LegacyState::Unsubmitted,
            (true, true) => LegacyState::InProgress,
            (true, false) => LegacyState::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyState::Unsubmitted => "unsubmitted",
            LegacyState::InProgress => "inprogress",
            LegacyState::Done => "done",
        }
    }
}

impl std::fmt::Display for LegacyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy top-level fields under `metadata`
pub fn hook_metadata(record: &Value) -> Result<Value, SerializerError> {
    let access = record
        .get("access")
        .ok_or_else(|| SerializerError::MissingField("access".to_string()))?;

    let mut metadata = match record.get("metadata") {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    };
    for field in HOOKED_FIELDS {
        let value = if *field == "access" {
            access.clone()
        } else {
            record.get(*field).cloned().unwrap_or(Value::Null)
        };
        metadata.insert(field.to_string(), value);
    }
    Ok(Value::Object(metadata))
}

fn bool_field(record: &Value, field: &str) -> bool {
    record.get(field).and_then(Value::as_bool).unwrap_or(false)
}

/// Legacy file listing; `None` when the record has no file entries
pub fn dump_files(record: &Value) -> Result<Option<Vec<Value>>, SerializerError> {
    let Some(entries) = get_path(record, "files.entries").and_then(Value::as_object) else {
        return Ok(None);
    };
    if entries.is_empty() {
        return Ok(None);
    }

    let files_url = string(record, "links.files")
        .ok_or_else(|| SerializerError::MissingField("links.files".to_string()))?;
    let bucket_url = string(record, "links.bucket");

    let mut files = Vec::with_capacity(entries.len());
    for entry in entries.values() {
        let id = entry
            .get("id")
            .and_then(scalar_string)
            .ok_or_else(|| SerializerError::MissingField("files.entries.id".to_string()))?;
        let key = string(entry, "key")
            .ok_or_else(|| SerializerError::MissingField("files.entries.key".to_string()))?;

        let mut links = Map::new();
        links.insert("self".to_string(), json!(format!("{}/{}", files_url, id)));
        if let Some(bucket_url) = &bucket_url {
            links.insert(
                "download".to_string(),
                json!(format!("{}/{}", bucket_url, key)),
            );
        }

        // skip the checksum algorithm prefix
        let checksum = string(entry, "checksum").map(|c| match c.split_once(':') {
            Some((_, digest)) => digest.to_string(),
            None => c,
        });

        let mut file = Map::new();
        file.insert("id".to_string(), json!(id));
        file.insert("filename".to_string(), json!(key));
        insert_opt(&mut file, "filesize", entry.get("size").cloned());
        insert_opt(&mut file, "checksum", checksum);
        file.insert("links".to_string(), Value::Object(links));
        files.push(Value::Object(file));
    }
    Ok(Some(files))
}

/// Dump a full legacy record
pub fn dump_record(
    record: &Value,
    metadata_schema: &MetadataSchema<'_>,
    doi_prefix: &str,
) -> Result<Value, SerializerError> {
    let recid_raw = record
        .get("id")
        .and_then(scalar_string)
        .ok_or_else(|| SerializerError::MissingField("id".to_string()))?;
    let recid = integer(record, "id").ok_or_else(|| SerializerError::InvalidRecid(recid_raw))?;

    let hooked = hook_metadata(record)?;
    let mut metadata = metadata_schema.dump(&hooked)?;

    let mut out = Map::new();
    insert_opt(&mut out, "created", sanitized(record, "created"));
    insert_opt(&mut out, "modified", sanitized(record, "updated"));
    out.insert("id".to_string(), json!(recid));
    out.insert("record_id".to_string(), json!(recid));
    insert_opt(&mut out, "conceptrecid", string(record, "parent.id"));
    insert_opt(&mut out, "doi", string(record, "pids.doi.identifier"));
    insert_opt(
        &mut out,
        "conceptdoi",
        string(record, "parent.pids.doi.identifier"),
    );
    insert_opt(&mut out, "doi_url", sanitized(record, "links.doi"));
    insert_opt(&mut out, "links", get_path(record, "links").cloned());
    out.insert(
        "title".to_string(),
        json!(sanitized(record, "metadata.title").unwrap_or_default()),
    );
    insert_opt(
        &mut out,
        "owner",
        get_path(record, "parent.access.owned_by.user").cloned(),
    );
    insert_opt(&mut out, "files", dump_files(record)?);

    let is_published = bool_field(record, "is_published");
    let state = LegacyState::from_flags(is_published, bool_field(record, "is_draft"));
    out.insert("state".to_string(), json!(state.as_str()));
    out.insert("submitted".to_string(), json!(is_published));

    metadata.insert(
        "prereserve_doi".to_string(),
        json!({
            "doi": format!("{}/zenodo.{}", doi_prefix, recid),
            "recid": recid,
        }),
    );
    out.insert("metadata".to_string(), Value::Object(metadata));

    Ok(Value::Object(out))
}
