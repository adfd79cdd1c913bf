//! Legacy record -> RDM record row

use super::MigrationError;
use super::models::{
    Affiliation, Creator, Embargo, FilesOptions, LegacyCreator, LegacyEntry, LegacyResourceType,
    PersonIdentifier, PersonOrOrg, Pid, RdmRecordEntry, RecordAccess, RecordJson, RecordMetadata,
    RecordPids, ResourceType,
};
use super::names::HumanName;

/// Field-level steps of a record transform.
///
/// [`RecordEntryTransform::transform`] assembles the row from the individual
/// steps, so implementations only describe where each field comes from.
pub trait RecordEntryTransform {
    type Entry;

    fn created(&self, entry: &Self::Entry) -> String;
    fn updated(&self, entry: &Self::Entry) -> String;
    fn version_id(&self, entry: &Self::Entry) -> i64;
    fn index(&self, entry: &Self::Entry) -> i64;
    fn recid(&self, entry: &Self::Entry) -> String;
    fn pids(&self, entry: &Self::Entry) -> Result<RecordPids, MigrationError>;
    fn files(&self, entry: &Self::Entry) -> FilesOptions;
    fn access(&self, entry: &Self::Entry) -> Result<RecordAccess, MigrationError>;
    fn metadata(&self, entry: &Self::Entry) -> Result<RecordMetadata, MigrationError>;

    /// Build the record row
    fn transform(&self, entry: &Self::Entry) -> Result<RdmRecordEntry, MigrationError> {
        Ok(RdmRecordEntry {
            created: self.created(entry),
            updated: self.updated(entry),
            version_id: self.version_id(entry),
            index: self.index(entry),
            json: RecordJson {
                id: self.recid(entry),
                pids: self.pids(entry)?,
                files: self.files(entry),
                metadata: self.metadata(entry)?,
                access: self.access(entry)?,
            },
        })
    }
}

/// Zenodo legacy record transform
#[derive(Debug, Clone, Copy, Default)]
pub struct ZenodoRecordEntry;

impl ZenodoRecordEntry {
    pub fn new() -> Self {
        Self
    }
}

/// `<type>-<subtype>` or `<type>`
fn resource_type(data: &LegacyResourceType) -> ResourceType {
    let id = match data.subtype.as_deref().filter(|s| !s.is_empty()) {
        Some(subtype) => format!("{}-{}", data.type_, subtype),
        None => data.type_.clone(),
    };
    ResourceType { id }
}

fn creator(data: &LegacyCreator) -> Creator {
    let name = HumanName::parse(&data.name);
    let family_name = name.surnames();

    let identifiers = data
        .orcid
        .iter()
        .filter(|o| !o.is_empty())
        .map(|orcid| PersonIdentifier {
            scheme: "orcid".to_string(),
            identifier: orcid.clone(),
        })
        .collect();
    let affiliations = data
        .affiliation
        .iter()
        .filter(|a| !a.is_empty())
        .map(|a| Affiliation { name: a.clone() })
        .collect();

    Creator {
        person_or_org: PersonOrOrg {
            type_: "personal".to_string(),
            identifiers,
            // autocompleted by the RDM metadata schema
            name: format!("{}, {}", family_name, name.first),
            given_name: name.first,
            family_name,
        },
        affiliations,
    }
}

impl RecordEntryTransform for ZenodoRecordEntry {
    type Entry = LegacyEntry;

    fn created(&self, entry: &LegacyEntry) -> String {
        entry.created.clone()
    }

    fn updated(&self, entry: &LegacyEntry) -> String {
        entry.updated.clone()
    }

    fn version_id(&self, entry: &LegacyEntry) -> i64 {
        entry.version_id
    }

    // legacy indices start at 0
    fn index(&self, entry: &LegacyEntry) -> i64 {
        entry.index.unwrap_or(0).saturating_add(1)
    }

    fn recid(&self, entry: &LegacyEntry) -> String {
        entry.json.recid.to_string()
    }

    fn pids(&self, entry: &LegacyEntry) -> Result<RecordPids, MigrationError> {
        let record = &entry.json;
        let oai = record
            .oai
            .as_ref()
            .ok_or_else(|| MigrationError::MissingField("_oai.id".to_string()))?;

        Ok(RecordPids {
            oai: Pid {
                client: None,
                provider: "oai".to_string(),
                identifier: oai.id.clone(),
            },
            doi: record
                .doi
                .as_ref()
                .filter(|d| !d.is_empty())
                .map(|doi| Pid {
                    client: Some("datacite".to_string()),
                    provider: "datacite".to_string(),
                    identifier: doi.clone(),
                }),
        })
    }

    fn files(&self, _entry: &LegacyEntry) -> FilesOptions {
        FilesOptions { enabled: true }
    }

    fn access(&self, entry: &LegacyEntry) -> Result<RecordAccess, MigrationError> {
        let record = &entry.json;
        let is_open = record.access_right == "open";

        let embargo = if record.access_right == "embargoed" {
            let until = record
                .embargo_date
                .clone()
                .ok_or_else(|| MigrationError::MissingField("embargo_date".to_string()))?;
            Some(Embargo {
                until,
                active: true,
            })
        } else {
            None
        };

        Ok(RecordAccess {
            record: "public".to_string(),
            files: if is_open { "public" } else { "restricted" }.to_string(),
            embargo,
        })
    }

    fn metadata(&self, entry: &LegacyEntry) -> Result<RecordMetadata, MigrationError> {
        let record = &entry.json;
        Ok(RecordMetadata {
            title: record.title.clone(),
            description: record.description.clone(),
            publication_date: record.publication_date.clone(),
            resource_type: resource_type(&record.resource_type),
            creators: record.creators.iter().map(creator).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(overrides: serde_json::Value) -> LegacyEntry {
        let mut record = json!({
            "recid": 1234,
            "conceptrecid": "1233",
            "_oai": {"id": "oai:zenodo.org:1234"},
            "access_right": "open",
            "title": "A dataset",
            "description": "<p>Description</p>",
            "publication_date": "2023-01-31",
            "resource_type": {"type": "dataset"},
            "creators": [{"name": "Doe, John"}]
        });
        if let (Some(obj), Some(extra)) = (record.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                obj.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(json!({
            "created": "2023-01-31T10:00:00",
            "updated": "2023-02-01T10:00:00",
            "version_id": 3,
            "json": record
        }))
        .unwrap()
    }

    #[test]
    fn test_index_starts_at_one() {
        let transform = ZenodoRecordEntry::new();
        let mut e = entry(json!({}));
        assert_eq!(transform.index(&e), 1);
        e.index = Some(2);
        assert_eq!(transform.index(&e), 3);
        e.index = Some(i64::MAX);
        assert_eq!(transform.index(&e), i64::MAX);
    }

    #[test]
    fn test_pids_with_and_without_doi() {
        let transform = ZenodoRecordEntry::new();
        let pids = transform.pids(&entry(json!({}))).unwrap();
        assert_eq!(pids.oai.identifier, "oai:zenodo.org:1234");
        assert!(pids.doi.is_none());

        let pids = transform
            .pids(&entry(json!({"doi": "10.5281/zenodo.1234"})))
            .unwrap();
        assert_eq!(
            serde_json::to_value(&pids).unwrap(),
            json!({
                "oai": {"provider": "oai", "identifier": "oai:zenodo.org:1234"},
                "doi": {"client": "datacite", "provider": "datacite", "identifier": "10.5281/zenodo.1234"}
            })
        );
    }

    #[test]
    fn test_missing_oai_is_an_error() {
        let mut e = entry(json!({}));
        e.json.oai = None;
        let result = ZenodoRecordEntry::new().pids(&e);
        assert!(matches!(result, Err(MigrationError::MissingField(f)) if f == "_oai.id"));
    }

    #[test]
    fn test_access_rights() {
        let transform = ZenodoRecordEntry::new();
        let open = transform.access(&entry(json!({}))).unwrap();
        assert_eq!(open.files, "public");
        assert!(open.embargo.is_none());

        let closed = transform
            .access(&entry(json!({"access_right": "closed"})))
            .unwrap();
        assert_eq!(closed.record, "public");
        assert_eq!(closed.files, "restricted");

        let embargoed = transform
            .access(&entry(json!({"access_right": "embargoed", "embargo_date": "2030-01-01"})))
            .unwrap();
        assert_eq!(
            embargoed.embargo,
            Some(Embargo {
                until: "2030-01-01".to_string(),
                active: true
            })
        );

        let no_date = transform.access(&entry(json!({"access_right": "embargoed"})));
        assert!(matches!(no_date, Err(MigrationError::MissingField(_))));
    }

    #[test]
    fn test_metadata_creators_and_resource_type() {
        let e = entry(json!({
            "resource_type": {"type": "publication", "subtype": "article"},
            "creators": [{
                "name": "Ludwig van Beethoven",
                "affiliation": "Bonn",
                "orcid": "0000-0002-1825-0097"
            }]
        }));
        let metadata = ZenodoRecordEntry::new().metadata(&e).unwrap();
        assert_eq!(metadata.resource_type.id, "publication-article");
        assert_eq!(
            serde_json::to_value(&metadata.creators).unwrap(),
            json!([{
                "person_or_org": {
                    "type": "personal",
                    "identifiers": [{"scheme": "orcid", "identifier": "0000-0002-1825-0097"}],
                    "given_name": "Ludwig",
                    "family_name": "van Beethoven",
                    "name": "van Beethoven, Ludwig"
                },
                "affiliations": [{"name": "Bonn"}]
            }])
        );
    }

    #[test]
    fn test_transform_assembles_row() {
        let row = ZenodoRecordEntry::new().transform(&entry(json!({}))).unwrap();
        assert_eq!(row.json.id, "1234");
        assert_eq!(row.version_id, 3);
        assert_eq!(row.index, 1);
        assert!(row.json.files.enabled);
        assert_eq!(row.json.metadata.creators[0].person_or_org.name, "Doe, John");
    }
}
