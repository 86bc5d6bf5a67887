use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed view over the well-known settings.
///
/// Unknown keys are ignored; every field falls back to its default, so a
/// configuration that only sets `HELLO` still deserializes. String settings
/// accept any scalar: `SNAKEEYES_SECRET_KEY=123456` arrives as an integer
/// once the environment layer has parsed it, and is kept as `"123456"`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct AppConfig {
    pub debug: bool,
    pub testing: bool,
    /// `host:port` the server binds to.
    #[serde(deserialize_with = "scalar_string")]
    pub server_name: String,
    #[serde(deserialize_with = "optional_scalar_string")]
    pub secret_key: Option<String>,
    /// Body served by `GET /`; [`DEFAULT_GREETING`](crate::constants::DEFAULT_GREETING) when unset.
    #[serde(deserialize_with = "optional_scalar_string")]
    pub hello: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub log_level: String,
}

impl AppConfig {
    /// Returns the configured greeting or the built-in default.
    #[must_use]
    pub fn greeting(&self) -> &str {
        self.hello.as_deref().unwrap_or(crate::constants::DEFAULT_GREETING)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debug: false,
            testing: false,
            server_name: "localhost:8000".to_owned(),
            secret_key: None,
            hello: None,
            log_level: "info".to_owned(),
        }
    }
}

// Hand-written so the secret never ends up in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("debug", &self.debug)
            .field("testing", &self.testing)
            .field("server_name", &self.server_name)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("hello", &self.hello)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(ScalarVisitor)
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_option(OptionalScalarVisitor)
}

struct ScalarVisitor;

impl Visitor<'_> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

struct OptionalScalarVisitor;

impl<'de> Visitor<'de> for OptionalScalarVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional string, number or boolean")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        scalar_string(deserializer).map(Some)
    }
}
