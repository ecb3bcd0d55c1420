//! End-to-end tests of the fetch, match and update flow.
//!
//! Both servers are mocked with mockito and tables go through real files, the
//! way the two tools hand them to each other.

use immich_birthday_sync::table::{read_rows, write_rows};
use immich_birthday_sync::{
    CardDavClient, Config, DirectoryService, ImmichClient, MatchService, TableRow,
};
use mockito::{Matcher, Server};
use serial_test::serial;
use std::env;
use std::fs::File;
use std::io::Write;

/// Guard to save and restore environment variables.
struct EnvGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let vars = keys
            .iter()
            .map(|key| (key.to_string(), env::var(key).ok()))
            .collect();
        Self { vars }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

const ENV_KEYS: &[&str] = &[
    "IMMICH_URL",
    "IMMICH_API_KEY",
    "CARDDAV_URL",
    "CARDDAV_USER",
    "CARDDAV_PASS",
    "CARDDAV_SLEEP",
    "REQUEST_TIMEOUT",
];

fn mock_address_book(server: &mut Server) -> Vec<mockito::Mock> {
    let listing = r#"<?xml version="1.0"?>
<multistatus xmlns="DAV:">
  <response><href>/addressbooks/me/contacts/</href></response>
  <response><href>/addressbooks/me/contacts/1.vcf</href></response>
  <response><href>/addressbooks/me/contacts/2.vcf</href></response>
</multistatus>"#;

    vec![
        server
            .mock("PROPFIND", "/addressbooks/me/contacts/")
            .with_status(207)
            .with_body(listing)
            .create(),
        server
            .mock("GET", "/addressbooks/me/contacts/1.vcf")
            .with_status(200)
            .with_body("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Ada Lovelace (Countess)\r\nBDAY:18151210\r\nEND:VCARD\r\n")
            .create(),
        server
            .mock("GET", "/addressbooks/me/contacts/2.vcf")
            .with_status(200)
            .with_body("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Grace Hopper\r\nBDAY:19061209\r\nEND:VCARD\r\n")
            .create(),
    ]
}

#[test]
#[serial]
fn test_fetch_match_update_round_trip() {
    let _guard = EnvGuard::new(ENV_KEYS);
    let dir = tempfile::tempdir().unwrap();

    let mut immich = Server::new();
    let mut dav = Server::new();

    let config_path = dir.path().join("immich.toml");
    let mut config_file = File::create(&config_path).unwrap();
    writeln!(
        config_file,
        "[immich]\nurl = \"{}\"\napi_key = \"secret-key\"\n\n[carddav]\nurl = \"{}\"\nusername = \"me\"\npassword = \"pw\"\nsleep = 0.0\n",
        immich.url(),
        dav.url()
    )
    .unwrap();
    for key in ENV_KEYS {
        env::remove_var(key);
    }

    let config = Config::load(&config_path).unwrap();

    // Fetch people missing a birthdate.
    let list = immich
        .mock("GET", "/api/people")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .match_header("x-api-key", "secret-key")
        .with_status(200)
        .with_body(
            r#"{"hasNextPage": false, "people": [
                {"id": "p1", "name": "Ada Lovelace", "birthDate": null},
                {"id": "p2", "name": "Grace Hopper", "birthDate": null},
                {"id": "p3", "name": "", "birthDate": null},
                {"id": "p4", "name": "Alan Turing", "birthDate": "1912-06-23"}
            ]}"#,
        )
        .create();

    let client = ImmichClient::new(&config.immich().unwrap(), Default::default());
    let directory = DirectoryService::new(client);
    let people = directory.fetch_missing_birthdates().unwrap();
    list.assert();

    let missing_path = dir.path().join("missing.csv");
    let placeholders: Vec<TableRow> = people.iter().map(TableRow::placeholder).collect();
    write_rows(File::create(&missing_path).unwrap(), &placeholders).unwrap();

    // Match against the address book. Ada's birthday predates 1900.
    let _dav_mocks = mock_address_book(&mut dav);
    let settings = config.carddav(&Default::default()).unwrap();
    let contacts = CardDavClient::new(&settings, Default::default()).unwrap();
    let matcher = MatchService::new(contacts).with_delay(settings.sleep);

    let rows = read_rows(File::open(&missing_path).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    let resources = matcher.list_contact_resources().unwrap();
    let report = matcher.match_and_normalize(rows, &resources).unwrap();

    let matched_path = dir.path().join("matched.csv");
    write_rows(File::create(&matched_path).unwrap(), &report.matched).unwrap();
    assert_eq!(
        std::fs::read_to_string(&matched_path).unwrap(),
        "id;name;birthDate\np2;Grace Hopper;1906-12-09\n"
    );

    // Push the matched table back.
    let update = immich
        .mock("PUT", "/api/people/p2")
        .match_body(Matcher::Json(serde_json::json!({"birthDate": "1906-12-09"})))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let rows = read_rows(File::open(&matched_path).unwrap()).unwrap();
    let update_report = directory.apply_birthdate_updates(&rows, true);

    update.assert();
    assert_eq!(update_report.updated(), 1);
    assert_eq!(update_report.failed(), 0);
}

#[test]
#[serial]
fn test_environment_fills_missing_config_values() {
    let _guard = EnvGuard::new(ENV_KEYS);
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("immich.toml");
    std::fs::write(&config_path, "[immich]\n").unwrap();
    env::set_var("IMMICH_API_KEY", "from-env");
    env::remove_var("IMMICH_URL");

    let settings = Config::load(&config_path).unwrap().immich().unwrap();
    assert_eq!(settings.api_key, "from-env");
    assert_eq!(settings.url, "http://localhost:2283");
}

#[test]
#[serial]
fn test_missing_config_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(&dir.path().join("absent.toml"));
    assert!(matches!(
        result,
        Err(immich_birthday_sync::ConfigError::FileNotFound(_))
    ));
}
