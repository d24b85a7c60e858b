//! End-to-end builds over on-disk input trees.

use crate::integration::test_utils::{names, without_timestamps, Fixture};
use metadist::aggregate::Domain;
use metadist::config::MetadistConfig;
use metadist::error::BuildError;
use metadist::pipeline::Pipeline;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use walkdir::WalkDir;

#[test]
fn test_full_build_writes_every_domain() {
    let fixture = Fixture::populated();
    let summary = fixture.pipeline().run().unwrap();
    assert!(summary.warnings.is_empty(), "unexpected warnings: {:?}", summary.warnings);

    let addresses = fixture.output_json("addresses/1.json");
    assert_eq!(addresses["chainId"], json!(1));
    assert_eq!(addresses["count"], json!(3));
    let labels: Vec<_> = addresses["addresses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["address"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["0x0a", "0x02", "0x01"]);
    assert_eq!(fixture.output_json("addresses/137.json")["count"], json!(1));

    let tokens = fixture.output_json("tokens/1.json");
    assert_eq!(names(&tokens, "tokens"), vec!["bar", "Foo"]);
    assert_eq!(names(&fixture.output_json("tokens/10.json"), "tokens"), vec!["Optimism"]);

    let networks = fixture.output_json("networks.json");
    assert_eq!(names(&networks, "networks"), vec!["Ethereum", "Polygon"]);
    assert!(networks.get("chainId").is_none());

    assert_eq!(names(&fixture.output_json("apps.json"), "apps"), vec!["Lend", "Swap"]);
    assert_eq!(
        names(&fixture.output_json("organizations.json"), "organizations"),
        vec!["Acme"]
    );

    let donations = fixture.output_json("donations.json");
    assert_eq!(donations["total"], json!("10"));

    assert_eq!(
        fs::read_to_string(fixture.layout().output.root.join("assets/logos/foo.svg")).unwrap(),
        "<svg/>"
    );
    assert!(fixture.output_exists("profiles/acme/readme.md"));
    assert_eq!(summary.static_files.files, 2);

    let manifest = fixture.output_json("manifest.json");
    assert_eq!(manifest["version"], json!("1.4.2"));
    assert_eq!(
        manifest["counts"],
        json!({
            "tokens": 3,
            "networks": 2,
            "apps": 2,
            "organizations": 1,
            "supporters": 3,
            "donations": 1,
            "events": 9,
            "addresses": 4
        })
    );
}

#[test]
fn test_empty_input_still_writes_flat_listings() {
    let fixture = Fixture::new();
    let summary = fixture.pipeline().run().unwrap();

    for file in ["networks.json", "apps.json", "organizations.json", "supporters.json"] {
        let doc = fixture.output_json(file);
        assert_eq!(doc["count"], json!(0), "{} should be empty", file);
    }
    assert!(!fixture.output_exists("donations.json"));
    assert!(fixture.output_exists("tokens"));
    assert!(!fixture.output_exists("tokens/1.json"));

    for domain in Domain::ALL {
        assert_eq!(summary.count(domain), 0);
    }
    assert!(fixture.output_exists("manifest.json"));
}

#[test]
fn test_manifest_counts_match_written_items() {
    let fixture = Fixture::populated();
    fixture.pipeline().run().unwrap();
    let output = fixture.layout().output.root;

    let mut written: BTreeMap<String, u64> = BTreeMap::new();
    for domain in ["addresses", "tokens"] {
        for entry in fs::read_dir(output.join(domain)).unwrap() {
            let doc: Value =
                serde_json::from_str(&fs::read_to_string(entry.unwrap().path()).unwrap()).unwrap();
            let items = doc[domain].as_array().unwrap().len() as u64;
            assert_eq!(doc["count"].as_u64().unwrap(), items);
            *written.entry(domain.to_string()).or_default() += items;
        }
    }
    for entry in fs::read_dir(output.join("events")).unwrap() {
        let doc: Value =
            serde_json::from_str(&fs::read_to_string(entry.unwrap().path()).unwrap()).unwrap();
        *written.entry("events".to_string()).or_default() += doc["count"].as_u64().unwrap();
    }
    for domain in ["networks", "apps", "organizations", "supporters"] {
        let doc = fixture.output_json(&format!("{}.json", domain));
        written.insert(domain.to_string(), doc[domain].as_array().unwrap().len() as u64);
    }
    let donations = fixture.output_json("donations.json");
    written.insert(
        "donations".to_string(),
        donations["donations"].as_array().unwrap().len() as u64,
    );

    let counts = &fixture.output_json("manifest.json")["counts"];
    for (domain, total) in written {
        assert_eq!(counts[&domain].as_u64().unwrap(), total, "count for {}", domain);
    }
}

#[test]
fn test_rebuild_is_identical_apart_from_timestamps() {
    let fixture = Fixture::populated();
    let output = fixture.layout().output.root;

    let snapshot = || -> BTreeMap<String, Value> {
        WalkDir::new(&output)
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("json"))
            .map(|e| {
                let relative = e.path().strip_prefix(&output).unwrap().display().to_string();
                let doc: Value = serde_json::from_str(&fs::read_to_string(e.path()).unwrap()).unwrap();
                (relative, without_timestamps(&doc))
            })
            .collect()
    };

    fixture.pipeline().run().unwrap();
    let first = snapshot();
    fixture.pipeline().run().unwrap();
    let second = snapshot();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_malformed_file_is_skipped_with_one_warning() {
    let fixture = Fixture::new();
    fixture.file("data/apps/a.json", r#"{"id": "a", "name": "Alpha"}"#);
    fixture.file("data/apps/b.json", r#"{"id": "b", "name": "Beta"}"#);
    fixture.file("data/apps/c.json", r#"{"id": "c", "name": "Gamma"}"#);
    let broken = fixture.file("data/apps/broken.json", r#"{"id": "x", "name": "#);

    let summary = fixture.pipeline().run().unwrap();

    assert_eq!(summary.count(Domain::Apps), 3);
    assert_eq!(
        names(&fixture.output_json("apps.json"), "apps"),
        vec!["Alpha", "Beta", "Gamma"]
    );
    // Apps are read by both the apps and supporters steps; reported once.
    assert_eq!(summary.warnings.len(), 1);
    assert_eq!(summary.warnings[0].path, broken);
    assert!(fixture.output_exists("manifest.json"));
}

#[test]
fn test_malformed_networks_file_yields_empty_listing() {
    let fixture = Fixture::new();
    fixture.file("data/networks.json", "{\"networks\": [");
    fixture.file("data/donations.json", "not json");

    let summary = fixture.pipeline().run().unwrap();

    assert_eq!(fixture.output_json("networks.json")["networks"], json!([]));
    assert!(!fixture.output_exists("donations.json"));
    assert_eq!(summary.warnings.len(), 2);
}

#[test]
fn test_token_supporter_derivation() {
    let fixture = Fixture::new();
    fixture.file(
        "data/tokens/1/foo.json",
        r#"{"address": "0x1", "name": "Foo", "symbol": "FOO",
            "subscription": {"tier": 2, "expiresAt": "2025-01-01T00:00:00Z"}}"#,
    );
    fixture.file(
        "data/tokens/1/plain.json",
        r#"{"address": "0x2", "name": "Plain", "symbol": "PLN", "subscription": null}"#,
    );

    fixture.pipeline().run().unwrap();
    let supporters = fixture.output_json("supporters.json");

    assert_eq!(supporters["count"], json!(1));
    assert_eq!(
        supporters["supporters"][0],
        json!({
            "id": "0x1",
            "type": "token",
            "name": "Foo (FOO)",
            "startedAt": "2025-01-01T00:00:00Z",
            "currentTier": 2,
            "expiresAt": "2025-01-01T00:00:00Z"
        })
    );
}

#[test]
fn test_supporters_sorted_across_kinds() {
    let fixture = Fixture::populated();
    fixture.pipeline().run().unwrap();

    let supporters = fixture.output_json("supporters.json");
    assert_eq!(
        names(&supporters, "supporters"),
        vec!["Ethereum", "Foo (FOO)", "Lend"]
    );
    let ethereum = &supporters["supporters"][0];
    assert_eq!(ethereum["type"], json!("network"));
    assert_eq!(ethereum["id"], json!("1"));
    assert_eq!(ethereum["chainId"], json!(1));
    assert!(supporters["supporters"][2].get("chainId").is_none());
}

#[test]
fn test_event_bundle_count() {
    let fixture = Fixture::populated();
    let summary = fixture.pipeline().run().unwrap();

    let events = fixture.output_json("events/1.json");
    assert_eq!(events["count"], json!(9));
    assert_eq!(summary.count(Domain::Events), 9);
}

#[test]
fn test_non_numeric_chain_directories_ignored() {
    let fixture = Fixture::new();
    fixture.file("data/tokens/1/a.json", r#"{"name": "A"}"#);
    fixture.file("data/tokens/mainnet/b.json", r#"{"name": "B"}"#);
    fixture.file("data/tokens/01/c.json", r#"{"name": "C"}"#);
    fixture.file("data/tokens/README.json", r#"{"name": "Loose"}"#);

    let summary = fixture.pipeline().run().unwrap();

    assert_eq!(summary.count(Domain::Tokens), 1);
    let files: Vec<_> = fs::read_dir(fixture.layout().output.root.join("tokens"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, vec!["1.json"]);
}

#[test]
fn test_configured_paths_and_version_override() {
    let fixture = Fixture::bare();
    fixture.file("content/apps/a.json", r#"{"id": "a", "name": "A"}"#);

    let mut config = MetadistConfig::default();
    config.paths.data_dir = "content".into();
    config.paths.output_dir = "public".into();
    config.build.version = Some("9.0.0".to_string());

    let summary = Pipeline::from_config(fixture.root(), &config).run().unwrap();

    assert_eq!(summary.manifest.version, "9.0.0");
    assert_eq!(summary.output_dir, fixture.root().join("public"));
    let apps: Value = serde_json::from_str(
        &fs::read_to_string(fixture.root().join("public/apps.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(apps["count"], json!(1));
}

#[test]
fn test_missing_version_descriptor_aborts_before_output() {
    let fixture = Fixture::bare();
    fixture.file("data/apps/a.json", r#"{"id": "a", "name": "A"}"#);
    fixture.file("dist/stale.json", "{}");

    let err = fixture.pipeline().run().unwrap_err();

    assert!(matches!(err, BuildError::Io { .. }));
    assert!(fixture.output_exists("stale.json"));
    assert!(!fixture.output_exists("manifest.json"));
}

#[cfg(unix)]
#[test]
fn test_linked_token_directory_skipped_and_linked_asset_shipped() {
    let fixture = Fixture::new();
    fixture.file("data/tokens/1/own.json", r#"{"name": "Own"}"#);
    fixture.file("vendor/tokens/foreign.json", r#"{"name": "Foreign"}"#);
    let logo = fixture.file("vendor/logo.svg", "<svg id=\"vendor\"/>");
    fs::create_dir_all(fixture.root().join("assets")).unwrap();
    std::os::unix::fs::symlink(
        fixture.root().join("vendor/tokens"),
        fixture.root().join("data/tokens/1/vendor"),
    )
    .unwrap();
    std::os::unix::fs::symlink(&logo, fixture.root().join("assets/logo.svg")).unwrap();

    let summary = fixture.pipeline().run().unwrap();

    assert_eq!(summary.count(Domain::Tokens), 1);
    assert_eq!(names(&fixture.output_json("tokens/1.json"), "tokens"), vec!["Own"]);

    let shipped = fixture.layout().output.root.join("assets/logo.svg");
    assert!(fs::symlink_metadata(&shipped).unwrap().file_type().is_file());
    assert_eq!(fs::read(&shipped).unwrap(), fs::read(&logo).unwrap());
}
