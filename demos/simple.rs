//! Decoding a small service configuration.
//!
//! Run with: `cargo run --example simple`

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize, Debug, Default)]
struct Http {
    host: String,
    port: u16,
    #[serde(with = "serde_ini::with::duration")]
    timeout: Duration,
}

#[derive(Deserialize, Debug, Default)]
struct Maintenance {
    enabled: bool,
    #[serde(with = "serde_ini::with::timestamp")]
    window: NaiveDateTime,
}

#[derive(Deserialize, Debug, Default)]
struct Config {
    #[serde(rename = "Http")]
    http: Http,
    #[serde(rename = "Maintenance")]
    maintenance: Maintenance,
}

const CONFIG: &str = "\
; service settings
[Http]
host=0.0.0.0
port=8080
timeout=2m30s

[Maintenance]
enabled=false
window=2024-03-01T02:00:00
";

fn main() {
    let mut config = Config::default();
    match serde_ini::unmarshal(CONFIG.as_bytes(), &mut config) {
        Ok(()) => println!("{config:#?}"),
        Err(e) => eprintln!("config error: {e}"),
    }

    // A bad value reports the section and key it came from.
    let broken = CONFIG.replace("port=8080", "port=80800");
    if let Err(e) = serde_ini::unmarshal(broken.as_bytes(), &mut config) {
        println!("\nRejected: {e}");
    }
}
