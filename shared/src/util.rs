use serde::{Deserialize, Deserializer};

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Israeli country prefix applied to local numbers
const COUNTRY_PREFIX: &str = "+972";

/// Normalize a local phone number (`05x...`) to international form (`+9725x...`).
///
/// Numbers that do not start with `0` are returned trimmed but otherwise untouched.
pub fn normalize_phone_number(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_prefix('0') {
        Some(rest) => format!("{COUNTRY_PREFIX}{rest}"),
        None => trimmed.to_string(),
    }
}

/// Deserialize a 0/1 flag the client may send as bool, number, or numeric string.
pub fn flag<'de, D>(deserializer: D) -> Result<i16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => i64::from(b),
        Raw::Int(n) => n,
        Raw::Float(f) => f as i64,
        Raw::Text(s) => match s.trim() {
            "true" => 1,
            "false" | "" => 0,
            other => other
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid flag: {other}")))?,
        },
    };

    Ok(i16::from(value != 0))
}
