//! Legacy entry -> RDM record, parent and files

use super::MigrationError;
use super::models::{
    FileInfo, LegacyEntry, ObjectVersion, Owner, ParentAccess, ParentCommunities, ParentJson,
    RdmFileEntry, RdmParentEntry, RdmRecordEntry, RdmTransformResult,
};
use super::record::{RecordEntryTransform, ZenodoRecordEntry};

/// Steps of a full entry transform
pub trait RecordTransform {
    type Entry;

    fn parent(&self, entry: &Self::Entry) -> Result<RdmParentEntry, MigrationError>;
    fn record(&self, entry: &Self::Entry) -> Result<Option<RdmRecordEntry>, MigrationError>;
    fn draft(&self, entry: &Self::Entry) -> Result<Option<RdmRecordEntry>, MigrationError>;
    fn record_files(&self, entry: &Self::Entry) -> Option<Vec<RdmFileEntry>>;
    fn draft_files(&self, entry: &Self::Entry) -> Option<Vec<RdmFileEntry>>;

    fn transform(&self, entry: &Self::Entry) -> Result<RdmTransformResult, MigrationError> {
        Ok(RdmTransformResult {
            record: self.record(entry)?,
            draft: self.draft(entry)?,
            parent: self.parent(entry)?,
            record_files: self.record_files(entry),
            draft_files: self.draft_files(entry),
        })
    }
}

/// Zenodo legacy records become published records; drafts are not migrated
#[derive(Debug, Clone, Copy, Default)]
pub struct ZenodoRecordTransform {
    entry: ZenodoRecordEntry,
}

impl ZenodoRecordTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Community membership from the legacy slugs; the first one is the default
    pub fn community_ids(&self, entry: &LegacyEntry) -> ParentCommunities {
        let mut ids: Vec<String> = Vec::new();
        for slug in entry.json.communities.iter().flatten() {
            if !slug.is_empty() && !ids.contains(slug) {
                ids.push(slug.clone());
            }
        }
        let default = ids.first().cloned();
        ParentCommunities { ids, default }
    }
}

impl RecordTransform for ZenodoRecordTransform {
    type Entry = LegacyEntry;

    fn parent(&self, entry: &LegacyEntry) -> Result<RdmParentEntry, MigrationError> {
        Ok(RdmParentEntry {
            // same as the record
            created: entry.created.clone(),
            updated: entry.updated.clone(),
            version_id: entry.version_id,
            json: ParentJson {
                // the loader creates or updates the parent if the PID exists
                id: entry.json.conceptrecid.to_string(),
                access: ParentAccess {
                    owned_by: entry
                        .json
                        .owners
                        .iter()
                        .map(|o| Owner { user: o.clone() })
                        .collect(),
                },
                communities: self.community_ids(entry),
            },
        })
    }

    fn record(&self, entry: &LegacyEntry) -> Result<Option<RdmRecordEntry>, MigrationError> {
        self.entry.transform(entry).map(Some)
    }

    fn draft(&self, _entry: &LegacyEntry) -> Result<Option<RdmRecordEntry>, MigrationError> {
        Ok(None)
    }

    fn record_files(&self, entry: &LegacyEntry) -> Option<Vec<RdmFileEntry>> {
        Some(
            entry
                .json
                .files
                .iter()
                .map(|f| RdmFileEntry {
                    key: f.key.clone(),
                    object_version: ObjectVersion {
                        file: FileInfo {
                            size: f.size,
                            checksum: f.checksum.clone(),
                        },
                    },
                })
                .collect(),
        )
    }

    fn draft_files(&self, _entry: &LegacyEntry) -> Option<Vec<RdmFileEntry>> {
        None
    }
}
