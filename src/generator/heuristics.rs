//! Property-name heuristics for realistic string generation.
//!
//! When a string schema declares no `format`, the property name it hangs under
//! often tells us what a human would expect to see there. The lookup runs an
//! exact-match table first, then substring/suffix rules, and returns `None`
//! when nothing applies so the caller falls back to generic words.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashMap;

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "Sofia", "Carlos", "Yuki", "Amara", "Liam", "Priya",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Martinez",
    "Nakamura", "Okafor", "Novak", "Larsson", "Costa",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverton", "Fairview", "Georgetown", "Ashland", "Milton", "Clayton",
    "Madison", "Arlington", "Dayton",
];

const COUNTRIES: &[&str] = &[
    "United States", "Canada", "Germany", "Japan", "Brazil", "Australia", "Kenya", "Norway",
    "India", "Portugal",
];

const STREETS: &[&str] = &[
    "Maple", "Oak", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park", "Pine", "Sunset",
];

const COMPANIES: &[&str] = &[
    "Acme Corp", "Globex", "Initech", "Umbrella Labs", "Stark Industries", "Wayne Enterprises",
    "Hooli", "Vandelay Industries",
];

const JOB_TITLES: &[&str] = &[
    "Software Engineer", "Product Manager", "Designer", "Data Analyst", "Account Executive",
    "Support Specialist", "Operations Lead",
];

const COLORS: &[&str] = &[
    "red", "orange", "yellow", "green", "blue", "indigo", "violet", "teal", "crimson", "amber",
];

const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "BRL", "AUD", "CAD", "INR"];

const STATUSES: &[&str] = &["active", "inactive", "pending"];

pub(crate) const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "amet", "consectetur", "adipiscing", "elit", "tempor",
    "incididunt", "labore", "magna", "aliqua", "veniam", "nostrud", "ullamco", "laboris",
];

/// What a recognized property name should generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    City,
    Country,
    Street,
    Zip,
    Bio,
    Status,
    Age,
    Username,
    Password,
    Avatar,
    Url,
    Company,
    JobTitle,
    Color,
    Currency,
    Price,
    Id,
    Timestamp,
    Token,
}

/// Exact-match table keyed by lower-cased property name.
static EXACT: Lazy<HashMap<&'static str, PropertyKind>> = Lazy::new(|| {
    use PropertyKind::*;
    HashMap::from([
        ("firstname", FirstName),
        ("first_name", FirstName),
        ("lastname", LastName),
        ("last_name", LastName),
        ("surname", LastName),
        ("name", FullName),
        ("fullname", FullName),
        ("full_name", FullName),
        ("email", Email),
        ("mail", Email),
        ("phone", Phone),
        ("telephone", Phone),
        ("mobile", Phone),
        ("city", City),
        ("town", City),
        ("country", Country),
        ("street", Street),
        ("address", Street),
        ("zip", Zip),
        ("zipcode", Zip),
        ("postal_code", Zip),
        ("postcode", Zip),
        ("bio", Bio),
        ("description", Bio),
        ("summary", Bio),
        ("status", Status),
        ("age", Age),
        ("username", Username),
        ("user_name", Username),
        ("login", Username),
        ("password", Password),
        ("avatar", Avatar),
        ("image", Avatar),
        ("photo", Avatar),
        ("url", Url),
        ("website", Url),
        ("link", Url),
        ("company", Company),
        ("organization", Company),
        ("employer", Company),
        ("title", JobTitle),
        ("role", JobTitle),
        ("job", JobTitle),
        ("color", Color),
        ("colour", Color),
        ("currency", Currency),
        ("price", Price),
        ("amount", Price),
        ("cost", Price),
        ("id", Id),
        ("uuid", Id),
        ("token", Token),
        ("apikey", Token),
        ("api_key", Token),
    ])
});

/// Look up a property name and, on a hit, generate a matching value.
///
/// Exact match is consulted first, then substring/suffix rules, mirroring how
/// a human reads field names: `billingEmail` is still an email even though the
/// exact table does not know it.
pub fn lookup(property_name: &str, rng: &mut StdRng) -> Option<String> {
    let name = property_name.to_lowercase();
    let kind = EXACT.get(name.as_str()).copied().or_else(|| {
        use PropertyKind::*;
        if name.contains("email") {
            Some(Email)
        } else if name.contains("phone") || name.contains("mobile") || name.contains("fax") {
            Some(Phone)
        } else if name.contains("address") || name.contains("street") {
            Some(Street)
        } else if name.contains("city") {
            Some(City)
        } else if name.contains("country") {
            Some(Country)
        } else if name.contains("zip") || name.contains("postal") {
            Some(Zip)
        } else if name.contains("url") || name.contains("link") || name.contains("website") {
            Some(Url)
        } else if name.contains("image")
            || name.contains("avatar")
            || name.contains("photo")
            || name.contains("picture")
        {
            Some(Avatar)
        } else if name.contains("price") || name.contains("amount") || name.contains("cost") {
            Some(Price)
        } else if name.contains("date") || name.contains("time") || name.ends_with("at") {
            Some(Timestamp)
        } else if name.ends_with("name") {
            Some(FullName)
        } else if name.contains("token") || name.contains("secret") {
            Some(Token)
        } else if name.ends_with("id") {
            Some(Id)
        } else {
            None
        }
    })?;
    Some(generate(kind, rng))
}

/// Generate one value for a recognized property kind.
pub fn generate(kind: PropertyKind, rng: &mut StdRng) -> String {
    match kind {
        PropertyKind::FirstName => pick(rng, FIRST_NAMES).to_string(),
        PropertyKind::LastName => pick(rng, LAST_NAMES).to_string(),
        PropertyKind::FullName => {
            format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
        }
        PropertyKind::Email => email(rng),
        PropertyKind::Phone => format!(
            "+1-{:03}-{:03}-{:04}",
            rng.gen_range(200..1000),
            rng.gen_range(200..1000),
            rng.gen_range(0..10000)
        ),
        PropertyKind::City => pick(rng, CITIES).to_string(),
        PropertyKind::Country => pick(rng, COUNTRIES).to_string(),
        PropertyKind::Street => format!(
            "{} {} {}",
            rng.gen_range(1..2000),
            pick(rng, STREETS),
            pick(rng, &["St", "Ave", "Blvd", "Ln"])
        ),
        PropertyKind::Zip => format!("{:05}", rng.gen_range(0..100000)),
        PropertyKind::Bio => sentence(rng, 8),
        PropertyKind::Status => pick(rng, STATUSES).to_string(),
        PropertyKind::Age => rng.gen_range(18..80).to_string(),
        PropertyKind::Username => {
            format!(
                "{}{}",
                pick(rng, FIRST_NAMES).to_lowercase(),
                rng.gen_range(1..100)
            )
        }
        PropertyKind::Password => token(rng, 12),
        PropertyKind::Avatar => format!(
            "https://example.com/avatars/{}.png",
            rng.gen_range(1..1000)
        ),
        PropertyKind::Url => format!("https://{}.example.com/{}", word(rng), word(rng)),
        PropertyKind::Company => pick(rng, COMPANIES).to_string(),
        PropertyKind::JobTitle => pick(rng, JOB_TITLES).to_string(),
        PropertyKind::Color => pick(rng, COLORS).to_string(),
        PropertyKind::Currency => pick(rng, CURRENCIES).to_string(),
        PropertyKind::Price => format!("{:.2}", rng.gen_range(0.0..1000.0_f64)),
        PropertyKind::Id => super::formats::uuid(rng),
        PropertyKind::Timestamp => timestamp(rng),
        PropertyKind::Token => token(rng, 24),
    }
}

pub(crate) fn pick<'a>(rng: &mut StdRng, list: &'a [&str]) -> &'a str {
    list[rng.gen_range(0..list.len())]
}

/// One generic lorem word.
pub fn word(rng: &mut StdRng) -> String {
    pick(rng, WORDS).to_string()
}

/// A space-joined sequence of `count` generic words.
pub fn sentence(rng: &mut StdRng, count: usize) -> String {
    (0..count)
        .map(|_| pick(rng, WORDS))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn email(rng: &mut StdRng) -> String {
    format!(
        "{}.{}@example.com",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase()
    )
}

pub(crate) fn token(rng: &mut StdRng, len: usize) -> String {
    use rand::distributions::Alphanumeric;
    (0..len)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

pub(crate) fn timestamp(rng: &mut StdRng) -> String {
    // Any instant in the decade leading up to 2026.
    let secs = rng.gen_range(1_451_606_400..1_767_225_600_i64);
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc3339()
}
