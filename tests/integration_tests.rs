use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_ini::{decode, from_str, parse, unmarshal, Category, Error};
use std::time::Duration;

#[derive(Deserialize, Debug, PartialEq, Default)]
struct Database {
    host: String,
    port: u16,
    replicas: u8,
    enabled: bool,
    #[serde(rename = "maxConns")]
    max_conns: u32,
    offset: i64,
}

#[derive(Deserialize, Debug, PartialEq, Default)]
struct Jobs {
    #[serde(with = "serde_ini::with::duration")]
    interval: Duration,
    #[serde(with = "serde_ini::with::timestamp")]
    start: NaiveDateTime,
    retries: i8,
}

#[derive(Deserialize, Debug, PartialEq, Default)]
struct AppConfig {
    #[serde(rename = "Database")]
    database: Database,
    #[serde(rename = "Jobs")]
    jobs: Jobs,
}

const APP: &str = "\
# application settings
[Database]
host=db.internal
port=5432
replicas=3
enabled=true
maxConns=128
offset=-42

; scheduler
[Jobs]
interval=1h30m
start=2024-01-15T10:30:00
retries=-1

[Unused]
whatever=ignored
";

fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

#[test]
fn test_full_config() {
    let config: AppConfig = from_str(APP).unwrap();

    assert_eq!(
        config.database,
        Database {
            host: "db.internal".to_string(),
            port: 5432,
            replicas: 3,
            enabled: true,
            max_conns: 128,
            offset: -42,
        }
    );
    assert_eq!(config.jobs.interval, Duration::from_secs(5400));
    assert_eq!(config.jobs.start, start_time());
    assert_eq!(config.jobs.retries, -1);
}

#[test]
fn test_unmarshal_overwrites_existing_values() {
    let mut config = AppConfig::default();
    config.database.host = "stale".to_string();
    config.database.port = 1;

    unmarshal(APP.as_bytes(), &mut config).unwrap();

    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.port, 5432);
}

#[test]
fn test_missing_section_names_it() {
    let text = "[Database]\nhost=h\nport=1\nreplicas=1\nenabled=0\nmaxConns=1\noffset=0\n";
    let err = from_str::<AppConfig>(text).unwrap_err();
    assert_eq!(err, Error::SectionNotFound("Jobs".to_string()));
    assert_eq!(err.category(), Category::Schema);
}

#[test]
fn test_missing_key_names_section_and_key() {
    let text = "[Database]\nhost=h\nport=1\n";
    let err = from_str::<AppConfig>(text).unwrap_err();
    assert_eq!(err, Error::key_not_found("Database", "replicas"));
    assert_eq!(err.to_string(), "key not found: [Database]->replicas");
}

#[test]
fn test_names_are_case_sensitive() {
    let text = APP.replace("[Database]", "[database]");
    let err = from_str::<AppConfig>(&text).unwrap_err();
    assert_eq!(err, Error::section_not_found("Database"));
}

#[test]
fn test_extra_keys_are_ignored() {
    let text = APP.replace("offset=-42", "offset=-42\nunknown=1");
    assert!(from_str::<AppConfig>(&text).is_ok());
}

#[test]
fn test_unsigned_out_of_range() {
    let text = APP.replace("replicas=3", "replicas=300");
    let err = from_str::<AppConfig>(&text).unwrap_err();
    match &err {
        Error::Conversion { section, key, reason } => {
            assert_eq!(section, "Database");
            assert_eq!(key, "replicas");
            assert!(reason.contains("out of range"), "{reason}");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
    assert_eq!(err.category(), Category::Decode);
}

#[test]
fn test_bad_boolean() {
    let text = APP.replace("enabled=true", "enabled=yes");
    let err = from_str::<AppConfig>(&text).unwrap_err();
    assert!(matches!(err, Error::Conversion { ref key, .. } if key == "enabled"));
}

#[test]
fn test_bad_duration_has_location() {
    let text = APP.replace("interval=1h30m", "interval=10x");
    let err = from_str::<AppConfig>(&text).unwrap_err();
    match err {
        Error::Conversion { section, key, reason } => {
            assert_eq!(section, "Jobs");
            assert_eq!(key, "interval");
            assert!(reason.contains("10x"), "{reason}");
        }
        other => panic!("expected conversion error, got {other:?}"),
    }
}

#[test]
fn test_timestamp_with_zone_rejected() {
    let text = APP.replace("2024-01-15T10:30:00", "2024-01-15T10:30:00Z");
    let err = from_str::<AppConfig>(&text).unwrap_err();
    assert!(matches!(err, Error::Conversion { ref key, .. } if key == "start"));
}

#[test]
fn test_partial_mutation_on_missing_section() {
    let text = "[Database]\nhost=fresh\nport=7\nreplicas=2\nenabled=1\nmaxConns=9\noffset=5\n";
    let mut config = AppConfig::default();
    config.jobs.retries = 4;

    let err = unmarshal(text.as_bytes(), &mut config).unwrap_err();

    assert_eq!(err, Error::section_not_found("Jobs"));
    assert_eq!(config.database.host, "fresh");
    assert_eq!(config.database.offset, 5);
    assert_eq!(config.jobs.retries, 4);
}

#[test]
fn test_partial_mutation_on_bad_value() {
    let text = APP.replace("enabled=true", "enabled=maybe");
    let mut config = AppConfig::default();

    let err = unmarshal(text.as_bytes(), &mut config).unwrap_err();

    assert!(matches!(err, Error::Conversion { .. }));
    // Fields before `enabled` were written, the rest were not.
    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.replicas, 3);
    assert_eq!(config.database.max_conns, 0);
    assert_eq!(config.jobs, Jobs::default());
}

#[test]
fn test_decode_into_unsupported_leaf() {
    #[derive(Deserialize, Debug, Default)]
    #[allow(dead_code)]
    struct Tags {
        names: Vec<String>,
    }
    #[derive(Deserialize, Debug, Default)]
    #[allow(dead_code, non_snake_case)]
    struct Top {
        Tags: Tags,
    }

    let document = parse(b"[Tags]\nnames=a").unwrap();
    let mut top = Top::default();
    let err = decode(&document, &mut top).unwrap_err();
    assert_eq!(err, Error::unsupported_type("Tags", "names", "sequence"));
}

#[test]
fn test_option_leaf_is_unsupported() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Opt {
        value: Option<u8>,
    }
    #[derive(Deserialize, Debug)]
    #[allow(dead_code, non_snake_case)]
    struct Top {
        Opt: Opt,
    }

    let err = from_str::<Top>("[Opt]\nvalue=1").unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { ref ty, .. } if ty == "Option"));
}

#[test]
fn test_third_level_struct_is_unsupported() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Inner {
        x: u8,
    }
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Middle {
        inner: Inner,
    }
    #[derive(Deserialize, Debug)]
    #[allow(dead_code, non_snake_case)]
    struct Top {
        Middle: Middle,
    }

    let err = from_str::<Top>("[Middle]\ninner=1").unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { .. }));
}

#[test]
fn test_section_must_be_struct() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code, non_snake_case)]
    struct Top {
        Port: u16,
    }

    let err = from_str::<Top>("[Port]\nvalue=1").unwrap_err();
    assert_eq!(err, Error::not_a_record("section `Port`"));
}

#[test]
fn test_top_level_must_be_struct() {
    let err = from_str::<Vec<String>>("[A]\nx=1").unwrap_err();
    assert!(matches!(err, Error::NotARecord(_)));
}

#[test]
fn test_newtype_leaf() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Port(u16);
    #[derive(Deserialize, Debug)]
    struct Listen {
        port: Port,
    }
    #[derive(Deserialize, Debug)]
    #[allow(non_snake_case)]
    struct Top {
        Listen: Listen,
    }

    let top: Top = from_str("[Listen]\nport=8443").unwrap();
    assert_eq!(top.Listen.port, Port(8443));
}

#[test]
fn test_skipped_fields_are_not_looked_up() {
    #[derive(Deserialize, Debug, Default)]
    struct Server {
        host: String,
        #[serde(skip)]
        resolved: bool,
    }
    #[derive(Deserialize, Debug, Default)]
    #[allow(non_snake_case)]
    struct Top {
        Server: Server,
    }

    let top: Top = from_str("[Server]\nhost=a").unwrap();
    assert_eq!(top.Server.host, "a");
    assert!(!top.Server.resolved);
}

#[test]
fn test_from_reader_propagates_io_errors() {
    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"))
        }
    }

    let err = serde_ini::from_reader::<_, AppConfig>(Broken).unwrap_err();
    assert_eq!(err.category(), Category::Io);
    assert!(err.to_string().contains("disk on fire"));
}
