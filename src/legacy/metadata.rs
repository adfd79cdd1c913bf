//! Legacy metadata schema
//!
//! Dumps the `metadata` section of a legacy record. Besides the common fields
//! this covers what only existed in the legacy format: grants, flat journal /
//! conference / imprint / thesis fields, communities and upload types.

use super::SerializerError;
use super::common::dump_common_metadata;
use super::fields::{array, get_path, insert_opt, sanitized, string};
use crate::vocabulary::{FunderDoiTable, ServiceRegistry};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Relation used for alternate identifiers folded into related identifiers
pub const ALTERNATE_IDENTIFIER_RELATION: &str = "isAlternateIdentifier";

/// Flat legacy field -> attribute path
const CUSTOM_FIELD_MAPPINGS: &[(&str, &str)] = &[
    ("journal_title", "custom_fields.journal:journal.title"),
    ("journal_volume", "custom_fields.journal:journal.volume"),
    ("journal_issue", "custom_fields.journal:journal.issue"),
    ("journal_pages", "custom_fields.journal:journal.pages"),
    ("conference_title", "custom_fields.meeting:meeting.title"),
    ("conference_acronym", "custom_fields.meeting:meeting.acronym"),
    ("conference_dates", "custom_fields.meeting:meeting.dates"),
    ("conference_place", "custom_fields.meeting:meeting.place"),
    ("conference_url", "custom_fields.meeting:meeting.url"),
    ("conference_session", "custom_fields.meeting:meeting.session"),
    (
        "conference_session_part",
        "custom_fields.meeting:meeting.session_part",
    ),
    // Imprint publisher does not exist in RDM, it comes from the record itself.
    ("imprint_publisher", "publisher"),
    ("imprint_isbn", "custom_fields.imprint:imprint.isbn"),
    ("imprint_place", "custom_fields.imprint:imprint.place"),
    ("partof_pages", "custom_fields.imprint:imprint.pages"),
    ("partof_title", "custom_fields.imprint:imprint.title"),
    ("thesis_university", "custom_fields.thesis:university"),
];

/// Metadata schema with grant resolution
pub struct MetadataSchema<'a> {
    registry: &'a ServiceRegistry,
    funder_dois: &'a FunderDoiTable,
}

impl<'a> MetadataSchema<'a> {
    pub fn new(registry: &'a ServiceRegistry, funder_dois: &'a FunderDoiTable) -> Self {
        Self {
            registry,
            funder_dois,
        }
    }

    /// Dump metadata, running the pre and post dump hooks
    pub fn dump(&self, metadata: &Value) -> Result<Map<String, Value>, SerializerError> {
        let metadata = hook_alternate_identifiers(metadata.clone());

        let mut out = Map::new();
        dump_common_metadata(&metadata, &mut out);

        insert_opt(&mut out, "grants", self.dump_grants(&metadata)?);
        insert_opt(
            &mut out,
            "license",
            sanitized(&metadata, "license").or_else(|| {
                array(&metadata, "rights")
                    .first()
                    .and_then(|r| string(r, "id"))
            }),
        );
        for (field, path) in CUSTOM_FIELD_MAPPINGS {
            insert_opt(&mut out, field, sanitized(&metadata, path));
        }
        insert_opt(
            &mut out,
            "embargo_date",
            string(&metadata, "access.embargo.until"),
        );
        insert_opt(&mut out, "communities", dump_communities(&metadata));

        dump_resource_type(&metadata, &mut out);
        Ok(out)
    }

    /// Resolve `funding` into legacy grant identifiers.
    ///
    /// Returns `None` (field omitted) when there is no funding, or when any
    /// funding entry cannot be expressed in the legacy API: funder-only
    /// funding, deleted awards and awards without a funder.
    pub fn dump_grants(&self, metadata: &Value) -> Result<Option<Vec<Value>>, SerializerError> {
        let funding = array(metadata, "funding");
        if funding.is_empty() {
            return Ok(None);
        }

        let mut grants = Vec::with_capacity(funding.len());
        for item in funding {
            let Some(award_ref) = get_path(item, "award") else {
                debug!("Funder-only funding is not supported in the legacy API");
                return Ok(None);
            };

            let (number, funder_id) = match string(award_ref, "id").filter(|s| !s.is_empty()) {
                Some(award_id) => match self.registry.read_award(&award_id) {
                    Ok(award) => (award.number, award.funder.and_then(|f| f.id)),
                    Err(e) if e.is_unresolved() => {
                        debug!("Award {} does not resolve: {}", award_id, e);
                        return Ok(None);
                    }
                    Err(e) => return Err(e.into()),
                },
                // Custom award, read as is
                None => (
                    string(award_ref, "number").unwrap_or_default(),
                    string(award_ref, "funder.id"),
                ),
            };

            // funding.funder.id is ignored in favour of the award's funder
            let Some(funder_id) = funder_id.filter(|s| !s.is_empty()) else {
                debug!("Awards without a funder are not supported in the legacy API");
                return Ok(None);
            };
            let funder = self.registry.read_funder(&funder_id)?;

            let Some(funder_doi) = self
                .funder_dois
                .get(&funder.id)
                .or_else(|| funder.doi())
            else {
                warn!(
                    "No funder DOI known for funder {}, skipping grant {}",
                    funder.id, number
                );
                continue;
            };

            grants.push(json!({"id": format!("{}::{}", funder_doi, number)}));
        }

        Ok((!grants.is_empty()).then_some(grants))
    }
}

/// Hook `identifiers` into related identifiers as alternate identifiers
pub fn hook_alternate_identifiers(mut metadata: Value) -> Value {
    let mut related: Vec<Value> = array(&metadata, "related_identifiers").to_vec();
    for identifier in array(&metadata, "identifiers") {
        if let Some(id) = identifier.get("identifier") {
            related.push(json!({
                "relation_type": {"id": ALTERNATE_IDENTIFIER_RELATION},
                "identifier": id,
            }));
        }
    }
    if !related.is_empty()
        && let Some(obj) = metadata.as_object_mut()
    {
        obj.insert("related_identifiers".to_string(), Value::Array(related));
    }
    metadata
}

fn dump_communities(metadata: &Value) -> Option<Value> {
    let communities: Vec<Value> = array(metadata, "_communities")
        .iter()
        .map(|slug| json!({"identifier": slug}))
        .collect();
    (!communities.is_empty()).then(|| Value::Array(communities))
}

/// Split `resource_type.id` into `upload_type` and `<upload_type>_type`
pub fn dump_resource_type(metadata: &Value, out: &mut Map<String, Value>) {
    let Some(resource_type_id) = string(metadata, "resource_type.id").filter(|s| !s.is_empty())
    else {
        return;
    };
    let upload_type = resource_type_id
        .split('-')
        .next()
        .unwrap_or_default()
        .to_string();
    if let Some((_, subtype)) = resource_type_id.rsplit_once('-') {
        out.insert(format!("{}_type", upload_type), json!(subtype));
    }
    out.insert("upload_type".to_string(), json!(upload_type));
}
