//! String `format` generation routines.
//!
//! Each supported format maps to one deterministic routine driven entirely by
//! the caller-supplied RNG, so a seeded context reproduces identical output.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use super::heuristics;

/// Generate a value for a recognized string `format`, or `None` when the
/// format is not in the table.
pub fn for_format(format: &str, rng: &mut StdRng) -> Option<String> {
    let value = match format {
        "uuid" => uuid(rng),
        "email" | "idn-email" => heuristics::email(rng),
        "uri" | "url" => format!(
            "https://{}.example.com/{}",
            heuristics::word(rng),
            heuristics::word(rng)
        ),
        "hostname" | "idn-hostname" => format!("{}.example.com", heuristics::word(rng)),
        "ipv4" => format!(
            "{}.{}.{}.{}",
            rng.gen_range(1..255),
            rng.gen_range(0..256),
            rng.gen_range(0..256),
            rng.gen_range(1..255)
        ),
        "ipv6" => {
            let groups: Vec<String> = (0..8).map(|_| format!("{:x}", rng.gen::<u16>())).collect();
            groups.join(":")
        }
        "date-time" => date_time(rng).to_rfc3339(),
        "date" => date_time(rng).format("%Y-%m-%d").to_string(),
        "time" => date_time(rng).format("%H:%M:%S").to_string(),
        "password" => heuristics::token(rng, 12),
        "byte" => STANDARD.encode(heuristics::token(rng, 16)),
        "binary" => {
            let bytes: Vec<u8> = (0..8).map(|_| rng.gen::<u8>()).collect();
            bytes.iter().map(|b| format!("{b:02x}")).collect()
        }
        _ => return None,
    };
    Some(value)
}

/// RNG-derived UUID v4, so deterministic seeds reproduce identical ids.
pub fn uuid(rng: &mut StdRng) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

fn date_time(rng: &mut StdRng) -> DateTime<Utc> {
    let secs = rng.gen_range(1_451_606_400..1_767_225_600_i64);
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
}
