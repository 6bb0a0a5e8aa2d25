use serde::{Deserialize, Serialize};

use crate::domain::City;

/// One installer entry as it appears on a utility QPL.
///
/// Field declaration order is the column order of every file the records are
/// written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerRecord {
    pub business_name: String,
    pub license_number: String,
    pub phone: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub utility_provider: String,
    pub services: String,
    #[serde(with = "qpl_flag")]
    pub verified: bool,
}

/// QPL listings spell booleans `True`/`False`.
///
/// Reading accepts that spelling, lowercase `true`/`false`, or a native bool.
mod qpl_flag {
    use std::fmt;

    use serde::{de, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    struct FlagVisitor;

    impl<'de> de::Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a boolean or one of \"True\", \"true\", \"False\", \"false\"")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim() {
                "True" | "true" => Ok(true),
                "False" | "false" => Ok(false),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }
}

impl InstallerRecord {
    /// Builds a record located in `city`, copying its region fields.
    pub fn in_city(
        city: &City,
        business_name: String,
        license_number: String,
        phone: String,
        services: &str,
        verified: bool,
    ) -> Self {
        Self {
            business_name,
            license_number,
            phone,
            city: city.name.to_string(),
            state: city.state.to_string(),
            zip_code: city.zip.to_string(),
            utility_provider: city.utility.to_string(),
            services: services.to_string(),
            verified,
        }
    }
}
