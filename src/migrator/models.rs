//! Legacy entry and RDM output structures
//!
//! Legacy entries are rows of the legacy records table: timestamps, version
//! and the record JSON. Output structures mirror what the RDM loader expects
//! for records, parents and file rows.

use serde::{Deserialize, Serialize};

/// Identifier that legacy data stores either as a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyId {
    Int(u64),
    Str(String),
}

impl std::fmt::Display for LegacyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LegacyId::Int(i) => write!(f, "{}", i),
            LegacyId::Str(s) => f.write_str(s),
        }
    }
}

// === Legacy input ===

/// A legacy records table row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyEntry {
    pub created: String,
    pub updated: String,
    pub version_id: i64,
    /// Version index, zero-based in legacy
    #[serde(default)]
    pub index: Option<i64>,
    pub json: LegacyRecord,
}

/// OAI-PMH information of a legacy record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyOai {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyResourceType {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyCreator {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orcid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyFile {
    pub key: String,
    pub size: u64,
    /// Checksum with algorithm prefix, e.g. `md5:...`
    pub checksum: String,
}

/// Legacy record JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyRecord {
    pub recid: LegacyId,
    pub conceptrecid: LegacyId,
    #[serde(rename = "_oai", default, skip_serializing_if = "Option::is_none")]
    pub oai: Option<LegacyOai>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    pub access_right: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo_date: Option<String>,
    pub title: String,
    pub description: String,
    pub publication_date: String,
    pub resource_type: LegacyResourceType,
    #[serde(default)]
    pub creators: Vec<LegacyCreator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communities: Option<Vec<String>>,
    #[serde(default)]
    pub owners: Vec<LegacyId>,
    #[serde(rename = "_files", default)]
    pub files: Vec<LegacyFile>,
}

// === RDM output ===

/// Persistent identifier entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub provider: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPids {
    pub oai: Pid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<Pid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embargo {
    pub until: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordAccess {
    pub record: String,
    pub files: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo: Option<Embargo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonIdentifier {
    pub scheme: String,
    pub identifier: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonOrOrg {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<PersonIdentifier>,
    pub given_name: String,
    pub family_name: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliation {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub person_or_org: PersonOrOrg,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<Affiliation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub title: String,
    pub description: String,
    pub publication_date: String,
    pub resource_type: ResourceType,
    pub creators: Vec<Creator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordJson {
    pub id: String,
    pub pids: RecordPids,
    pub files: FilesOptions,
    pub metadata: RecordMetadata,
    pub access: RecordAccess,
}

/// RDM record row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdmRecordEntry {
    pub created: String,
    pub updated: String,
    pub version_id: i64,
    /// One-based version index
    pub index: i64,
    pub json: RecordJson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub user: LegacyId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentAccess {
    pub owned_by: Vec<Owner>,
}

/// Parent community membership; serializes to `{}` when empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentCommunities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentJson {
    pub id: String,
    pub access: ParentAccess,
    pub communities: ParentCommunities,
}

/// RDM parent row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdmParentEntry {
    pub created: String,
    pub updated: String,
    pub version_id: i64,
    pub json: ParentJson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub size: u64,
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectVersion {
    pub file: FileInfo,
}

/// RDM record file row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdmFileEntry {
    pub key: String,
    pub object_version: ObjectVersion,
}

/// Everything produced from one legacy entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdmTransformResult {
    pub record: Option<RdmRecordEntry>,
    pub draft: Option<RdmRecordEntry>,
    pub parent: RdmParentEntry,
    pub record_files: Option<Vec<RdmFileEntry>>,
    pub draft_files: Option<Vec<RdmFileEntry>>,
}
