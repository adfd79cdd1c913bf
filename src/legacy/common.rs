//! Metadata fields shared by every legacy format dump
//!
//! These map RDM metadata back onto the field names the pre-RDM API used.

use super::fields::{array, get_path, insert_opt, sanitized, scalar_string, string};
use serde_json::{Map, Value, json};

/// Legacy `access_right` derived from RDM access settings
pub fn access_right(access: Option<&Value>) -> &'static str {
    let Some(access) = access else {
        return "closed";
    };
    let embargo_active = get_path(access, "embargo.active")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if embargo_active {
        return "embargoed";
    }
    let record = get_path(access, "record").and_then(Value::as_str);
    let files = get_path(access, "files").and_then(Value::as_str);
    match (record, files) {
        (Some("public"), Some("public")) => "open",
        (Some("public"), Some("restricted")) => "restricted",
        _ => "closed",
    }
}

/// Identifier of `scheme` on a person or organisation
fn identifier(person_or_org: &Value, scheme: &str) -> Option<String> {
    array(person_or_org, "identifiers")
        .iter()
        .find(|i| i.get("scheme").and_then(Value::as_str) == Some(scheme))
        .and_then(|i| string(i, "identifier"))
}

/// Legacy creator/contributor entry
fn dump_person(entry: &Value) -> Option<Value> {
    let person = entry.get("person_or_org")?;
    let name = sanitized(person, "name").or_else(|| {
        match (string(person, "family_name"), string(person, "given_name")) {
            (Some(family), Some(given)) => Some(format!("{}, {}", family, given)),
            (Some(family), None) => Some(family),
            (None, given) => given,
        }
    })?;

    let mut out = Map::new();
    out.insert("name".to_string(), json!(name));
    insert_opt(
        &mut out,
        "affiliation",
        array(entry, "affiliations")
            .first()
            .and_then(|a| sanitized(a, "name")),
    );
    insert_opt(&mut out, "orcid", identifier(person, "orcid"));
    insert_opt(&mut out, "gnd", identifier(person, "gnd"));
    Some(Value::Object(out))
}

fn dump_creators(metadata: &Value) -> Option<Value> {
    let creators: Vec<Value> = array(metadata, "creators")
        .iter()
        .filter_map(dump_person)
        .collect();
    (!creators.is_empty()).then(|| Value::Array(creators))
}

fn dump_contributors(metadata: &Value) -> Option<Value> {
    let contributors: Vec<Value> = array(metadata, "contributors")
        .iter()
        .filter_map(|c| {
            let mut person = dump_person(c)?;
            if let (Some(obj), Some(role)) = (person.as_object_mut(), string(c, "role.id")) {
                obj.insert("type".to_string(), json!(role));
            }
            Some(person)
        })
        .collect();
    (!contributors.is_empty()).then(|| Value::Array(contributors))
}

/// Free-text subjects become keywords; controlled subjects have an `id`
fn dump_keywords(metadata: &Value) -> Option<Value> {
    let keywords: Vec<Value> = array(metadata, "subjects")
        .iter()
        .filter(|s| s.get("id").is_none())
        .filter_map(|s| sanitized(s, "subject"))
        .map(Value::String)
        .collect();
    (!keywords.is_empty()).then(|| Value::Array(keywords))
}

fn dump_notes(metadata: &Value) -> Option<String> {
    array(metadata, "additional_descriptions")
        .iter()
        .find(|d| string(d, "type.id").as_deref() == Some("notes"))
        .and_then(|d| string(d, "description"))
}

fn dump_references(metadata: &Value) -> Option<Value> {
    let references: Vec<Value> = array(metadata, "references")
        .iter()
        .filter_map(|r| match r {
            Value::String(s) => Some(s.clone()),
            other => string(other, "reference"),
        })
        .map(Value::String)
        .collect();
    (!references.is_empty()).then(|| Value::Array(references))
}

/// Legacy related identifiers: `{identifier, relation, scheme?, resource_type?}`
fn dump_related_identifiers(metadata: &Value) -> Option<Value> {
    let related: Vec<Value> = array(metadata, "related_identifiers")
        .iter()
        .filter_map(|r| {
            let identifier = r.get("identifier").and_then(scalar_string)?;
            let mut out = Map::new();
            out.insert("identifier".to_string(), json!(identifier));
            insert_opt(&mut out, "relation", string(r, "relation_type.id"));
            insert_opt(&mut out, "scheme", string(r, "scheme"));
            insert_opt(&mut out, "resource_type", string(r, "resource_type.id"));
            Some(Value::Object(out))
        })
        .collect();
    (!related.is_empty()).then(|| Value::Array(related))
}

/// Dump the common metadata fields into `out`
pub fn dump_common_metadata(metadata: &Value, out: &mut Map<String, Value>) {
    insert_opt(out, "title", sanitized(metadata, "title"));
    insert_opt(out, "doi", string(metadata, "pids.doi.identifier"));
    insert_opt(out, "publication_date", string(metadata, "publication_date"));
    insert_opt(out, "description", string(metadata, "description"));
    out.insert(
        "access_right".to_string(),
        json!(access_right(get_path(metadata, "access"))),
    );
    insert_opt(out, "creators", dump_creators(metadata));
    insert_opt(out, "contributors", dump_contributors(metadata));
    insert_opt(out, "keywords", dump_keywords(metadata));
    insert_opt(out, "related_identifiers", dump_related_identifiers(metadata));
    insert_opt(out, "references", dump_references(metadata));
    insert_opt(out, "notes", dump_notes(metadata));
    insert_opt(out, "version", sanitized(metadata, "version"));
    insert_opt(
        out,
        "language",
        array(metadata, "languages")
            .first()
            .and_then(|l| string(l, "id")),
    );
}
