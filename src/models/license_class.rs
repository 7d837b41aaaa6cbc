//! License class filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReleasesError;

/// The class of license under which releases are offered.
///
/// Used both as a filter on listing and latest-release requests and as a
/// field of [`ReleaseInfo`](crate::ReleaseInfo).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseClass {
    /// No filtering by license class.
    #[default]
    #[serde(rename = "")]
    Any,

    /// Releases under an OSS or BSL license.
    #[serde(rename = "oss")]
    Oss,

    /// Releases under an Enterprise license.
    #[serde(rename = "enterprise")]
    Enterprise,

    /// Releases intended for use with HashiCorp Cloud Platform.
    #[serde(rename = "hcp")]
    Hcp,
}

impl LicenseClass {
    /// Every license class, including [`LicenseClass::Any`].
    pub const ALL: [LicenseClass; 4] = [
        LicenseClass::Any,
        LicenseClass::Oss,
        LicenseClass::Enterprise,
        LicenseClass::Hcp,
    ];

    /// The wire tag for this class. [`LicenseClass::Any`] is the empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Oss => "oss",
            Self::Enterprise => "enterprise",
            Self::Hcp => "hcp",
        }
    }

    /// The `license_class` query value, or `None` when no filter applies.
    pub(crate) fn filter_tag(filter: Option<Self>) -> Option<&'static str> {
        match filter {
            None | Some(Self::Any) => None,
            Some(class) => Some(class.as_str()),
        }
    }

    fn expected_names() -> String {
        let names: Vec<String> = Self::ALL
            .iter()
            .map(|class| format!("{:?}", class.as_str()))
            .collect();
        match names.split_last() {
            Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
            None => String::new(),
        }
    }
}

impl fmt::Display for LicenseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for LicenseClass {
    type Err = ReleasesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "any" => Ok(Self::Any),
            "oss" => Ok(Self::Oss),
            "enterprise" => Ok(Self::Enterprise),
            "hcp" => Ok(Self::Hcp),
            other => Err(ReleasesError::InvalidLicenseClass(format!(
                "{other:?}: must be one of {}",
                Self::expected_names()
            ))),
        }
    }
}
