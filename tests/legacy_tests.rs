//! Tests for the legacy JSON serializer

use serde_json::{Value, json};
use std::sync::Arc;
use zenodo_rdm_transforms::config::Config;
use zenodo_rdm_transforms::legacy::{LegacySerializer, SerializerError};
use zenodo_rdm_transforms::vocabulary::{
    AWARDS_SERVICE, FUNDERS_SERVICE, InMemoryVocabulary, ServiceRegistry, VocabularyError,
};

fn registry() -> ServiceRegistry {
    let mut awards = InMemoryVocabulary::new();
    awards.insert(
        "00k4n6c32::824068",
        json!({
            "id": "00k4n6c32::824068",
            "number": "824068",
            "title": {"en": "EOSC-hub"},
            "acronym": "EOSC-hub",
            "funder": {"id": "00k4n6c32"}
        }),
    );
    awards.insert(
        "021nxhr62::1928394",
        json!({"id": "021nxhr62::1928394", "number": "1928394", "funder": {"id": "021nxhr62"}}),
    );
    let mut funders = InMemoryVocabulary::new();
    funders.insert(
        "00k4n6c32",
        json!({"id": "00k4n6c32", "name": "European Commission", "country": "BE"}),
    );
    funders.insert(
        "021nxhr62",
        json!({"id": "021nxhr62", "name": "National Science Foundation", "country": "US"}),
    );
    ServiceRegistry::new()
        .with_service(AWARDS_SERVICE, Arc::new(awards))
        .with_service(FUNDERS_SERVICE, Arc::new(funders))
}

fn full_record() -> Value {
    json!({
        "id": "7548901",
        "created": "2023-01-31T10:00:00.000000+00:00",
        "updated": "2023-02-01T11:30:00.000000+00:00",
        "is_published": true,
        "is_draft": false,
        "links": {
            "self": "https://zenodo.org/api/records/7548901",
            "doi": "https://doi.org/10.5281/zenodo.7548901",
            "files": "https://zenodo.org/api/records/7548901/files",
            "bucket": "https://zenodo.org/api/files/6f2b"
        },
        "pids": {"doi": {"identifier": "10.5281/zenodo.7548901", "provider": "datacite"}},
        "parent": {
            "id": "7548900",
            "pids": {"doi": {"identifier": "10.5281/zenodo.7548900"}},
            "access": {"owned_by": {"user": 42}}
        },
        "access": {"record": "public", "files": "public", "embargo": {"active": false}},
        "files": {
            "enabled": true,
            "entries": {
                "data.csv": {"id": "a1", "key": "data.csv", "size": 1024, "checksum": "md5:0123abcd"},
                "README.md": {"id": "b2", "key": "README.md", "size": 12, "checksum": "md5:ffff"}
            }
        },
        "custom_fields": {
            "journal:journal": {"title": "Journal of Open Data", "volume": "12", "pages": "1-10"}
        },
        "metadata": {
            "title": "Ocean temperature measurements",
            "description": "<p>Hourly readings.</p>",
            "publication_date": "2023-01-30",
            "publisher": "Zenodo",
            "resource_type": {"id": "publication-article"},
            "creators": [{
                "person_or_org": {"type": "personal", "name": "Doe, Jane",
                                  "given_name": "Jane", "family_name": "Doe"},
                "affiliations": [{"name": "CERN"}]
            }],
            "identifiers": [{"identifier": "arXiv:2301.00001", "scheme": "arxiv"}],
            "funding": [
                {"funder": {"id": "00k4n6c32"}, "award": {"id": "00k4n6c32::824068"}},
                {"funder": {"id": "021nxhr62"}, "award": {"id": "021nxhr62::1928394"}}
            ],
            "rights": [{"id": "cc-by-4.0"}],
            "version": "v1.0"
        }
    })
}

#[test]
fn test_full_record_dump() {
    let serializer = LegacySerializer::new(registry());
    let legacy = serializer.dump(&full_record()).unwrap();

    assert_eq!(legacy["id"], json!(7548901));
    assert_eq!(legacy["record_id"], json!(7548901));
    assert_eq!(legacy["conceptrecid"], json!("7548900"));
    assert_eq!(legacy["doi"], json!("10.5281/zenodo.7548901"));
    assert_eq!(legacy["conceptdoi"], json!("10.5281/zenodo.7548900"));
    assert_eq!(legacy["doi_url"], json!("https://doi.org/10.5281/zenodo.7548901"));
    assert_eq!(legacy["created"], json!("2023-01-31T10:00:00.000000+00:00"));
    assert_eq!(legacy["modified"], json!("2023-02-01T11:30:00.000000+00:00"));
    assert_eq!(legacy["title"], json!("Ocean temperature measurements"));
    assert_eq!(legacy["owner"], json!(42));
    assert_eq!(legacy["state"], json!("done"));
    assert_eq!(legacy["submitted"], json!(true));

    let files = legacy["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["filename"], json!("data.csv"));
    assert_eq!(files[0]["checksum"], json!("0123abcd"));
    assert_eq!(
        files[1]["links"]["download"],
        json!("https://zenodo.org/api/files/6f2b/README.md")
    );

    let metadata = &legacy["metadata"];
    assert_eq!(
        metadata["grants"],
        json!([
            {"id": "10.13039/501100000780::824068"},
            {"id": "10.13039/100000001::1928394"}
        ])
    );
    assert_eq!(metadata["upload_type"], json!("publication"));
    assert_eq!(metadata["publication_type"], json!("article"));
    assert_eq!(metadata["access_right"], json!("open"));
    assert_eq!(metadata["license"], json!("cc-by-4.0"));
    assert_eq!(metadata["journal_title"], json!("Journal of Open Data"));
    assert_eq!(metadata["journal_pages"], json!("1-10"));
    assert_eq!(metadata["imprint_publisher"], json!("Zenodo"));
    assert_eq!(
        metadata["related_identifiers"],
        json!([{"identifier": "arXiv:2301.00001", "relation": "isAlternateIdentifier"}])
    );
    assert_eq!(
        metadata["prereserve_doi"],
        json!({"doi": "10.5281/zenodo.7548901", "recid": 7548901})
    );
    assert!(metadata.get("embargo_date").is_none());
    assert!(metadata.get("communities").is_none());
}

#[test]
fn test_unpublished_draft_state() {
    let mut record = full_record();
    record["is_published"] = json!(false);
    record["is_draft"] = json!(true);
    let legacy = LegacySerializer::new(registry()).dump(&record).unwrap();
    assert_eq!(legacy["state"], json!("unsubmitted"));
    assert_eq!(legacy["submitted"], json!(false));

    record["is_published"] = json!(true);
    let legacy = LegacySerializer::new(registry()).dump(&record).unwrap();
    assert_eq!(legacy["state"], json!("inprogress"));
}

#[test]
fn test_missing_title_defaults_to_empty() {
    let mut record = full_record();
    record["metadata"]
        .as_object_mut()
        .unwrap()
        .remove("title");
    let legacy = LegacySerializer::new(registry()).dump(&record).unwrap();
    assert_eq!(legacy["title"], json!(""));
    assert!(legacy["metadata"].get("title").is_none());
}

#[test]
fn test_record_without_files_omits_files() {
    let mut record = full_record();
    record["files"] = json!({"enabled": false, "entries": {}});
    let legacy = LegacySerializer::new(registry()).dump(&record).unwrap();
    assert!(legacy.get("files").is_none());
}

#[test]
fn test_deleted_award_omits_all_grants() {
    let mut record = full_record();
    record["metadata"]["funding"]
        .as_array_mut()
        .unwrap()
        .push(json!({"award": {"id": "00k4n6c32::000000"}}));
    let legacy = LegacySerializer::new(registry()).dump(&record).unwrap();
    assert!(legacy["metadata"].get("grants").is_none());
}

#[test]
fn test_unregistered_vocabulary_is_an_error() {
    let result = LegacySerializer::new(ServiceRegistry::new()).dump(&full_record());
    assert!(matches!(
        result,
        Err(SerializerError::Vocabulary(VocabularyError::ServiceNotRegistered(_)))
    ));
}

#[test]
fn test_non_integer_recid_is_an_error() {
    let mut record = full_record();
    record["id"] = json!("abcd-1234");
    let result = LegacySerializer::new(registry()).dump(&record);
    assert!(matches!(result, Err(SerializerError::InvalidRecid(id)) if id == "abcd-1234"));
}

#[test]
fn test_config_prefix_and_extra_funders() {
    let config = Config::parse(
        r#"
[legacy]
doi_prefix = "10.1234"

[funders.extra]
"00k4n6c32" = "10.9999/ec"
"#,
    )
    .unwrap();
    let serializer = LegacySerializer::from_config(registry(), &config);
    let legacy = serializer.dump(&full_record()).unwrap();
    assert_eq!(
        legacy["metadata"]["prereserve_doi"]["doi"],
        json!("10.1234/zenodo.7548901")
    );
    assert_eq!(legacy["metadata"]["grants"][0], json!({"id": "10.9999/ec::824068"}));
}

#[test]
fn test_embargoed_record_and_communities() {
    let mut record = full_record();
    record["access"] = json!({
        "record": "public",
        "files": "restricted",
        "embargo": {"active": true, "until": "2030-06-01", "reason": null}
    });
    record["metadata"]["_communities"] = json!(["zenodo"]);
    let legacy = LegacySerializer::new(registry()).dump(&record).unwrap();
    assert_eq!(legacy["metadata"]["access_right"], json!("embargoed"));
    assert_eq!(legacy["metadata"]["embargo_date"], json!("2030-06-01"));
    assert_eq!(
        legacy["metadata"]["communities"],
        json!([{"identifier": "zenodo"}])
    );
}

#[test]
fn test_dump_many_keeps_order() {
    let mut second = full_record();
    second["id"] = json!("2");
    let dumped = LegacySerializer::new(registry())
        .dump_many(&[full_record(), second])
        .unwrap();
    assert_eq!(dumped.len(), 2);
    assert_eq!(dumped[1]["record_id"], json!(2));
}
