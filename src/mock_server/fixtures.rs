//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::{BuildInfo, LicenseClass, ReleaseInfo, ReleaseState, ReleaseStatus};

/// OSS releases of the sample product, newest first.
const WAYPOINT_VERSIONS: [&str; 43] = [
    "0.11.4", "0.11.3", "0.11.2", "0.11.1", "0.11.0", "0.10.5", "0.10.4", "0.10.3", "0.10.2",
    "0.10.1", "0.10.0", "0.9.1", "0.9.0", "0.8.2", "0.8.1", "0.8.0", "0.7.2", "0.7.1", "0.7.0",
    "0.6.3", "0.6.2", "0.6.1", "0.6.0", "0.5.2", "0.5.1", "0.5.0", "0.4.2", "0.4.1", "0.4.0",
    "0.3.2", "0.3.1", "0.3.0", "0.2.4", "0.2.3", "0.2.2", "0.2.1", "0.2.0", "0.1.5", "0.1.4",
    "0.1.3", "0.1.2", "0.1.1", "0.1.0",
];

/// Number of newest OSS releases that also have an enterprise build.
const WAYPOINT_ENTERPRISE_COUNT: usize = 16;

/// Platforms every fixture release is built for.
const PLATFORMS: [(&str, &str); 3] = [
    ("linux", "amd64"),
    ("darwin", "arm64"),
    ("windows", "amd64"),
];

/// Default scenario data.
pub struct DefaultScenario {
    pub releases: Vec<ReleaseInfo>,
    pub products: Vec<String>,
}

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Release Fixtures
    // =========================================================================

    /// Create an OSS release with no builds or URLs.
    pub fn minimal_release(product: &str, version: &str, created: DateTime<Utc>) -> ReleaseInfo {
        ReleaseInfo {
            builds: vec![],
            docker_name_tag: None,
            is_prerelease: false,
            license_class: LicenseClass::Oss,
            name: product.to_string(),
            status: ReleaseStatus {
                message: None,
                state: ReleaseState::Supported,
            },
            timestamp_created: created,
            timestamp_updated: created,
            url_blogpost: None,
            url_changelog: None,
            url_docker_registry_dockerhub: None,
            url_docker_registry_ecr: None,
            url_license: None,
            url_project_website: None,
            url_release_notes: None,
            url_shasums: None,
            url_shasums_signatures: vec![],
            url_source_repository: None,
            version: version.to_string(),
        }
    }

    /// Create a release with builds, checksums and signatures.
    pub fn release(
        product: &str,
        version: &str,
        created: DateTime<Utc>,
        license_class: LicenseClass,
    ) -> ReleaseInfo {
        let download = format!("https://releases.hashicorp.com/{product}/{version}");

        let mut release = Self::minimal_release(product, version, created);
        release.license_class = license_class;
        release.builds = PLATFORMS
            .iter()
            .map(|(os, arch)| BuildInfo {
                arch: arch.to_string(),
                os: os.to_string(),
                unsupported: false,
                url: format!("{download}/{product}_{version}_{os}_{arch}.zip"),
            })
            .collect();
        release.url_shasums = Some(format!("{download}/{product}_{version}_SHA256SUMS"));
        release.url_shasums_signatures = vec![
            format!("{download}/{product}_{version}_SHA256SUMS.sig"),
            format!("{download}/{product}_{version}_SHA256SUMS.72D7468F.sig"),
        ];
        if license_class != LicenseClass::Enterprise {
            release.url_source_repository = Some(format!("https://github.com/hashicorp/{product}"));
        }
        release
    }

    /// Create a withdrawn release.
    pub fn withdrawn_release(
        product: &str,
        version: &str,
        created: DateTime<Utc>,
        message: &str,
    ) -> ReleaseInfo {
        let mut release = Self::release(product, version, created, LicenseClass::Oss);
        release.status = ReleaseStatus {
            message: Some(message.to_string()),
            state: ReleaseState::Withdrawn,
        };
        release
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Release history of the sample product "waypoint".
    ///
    /// 43 OSS releases created 24 days apart from 2020-10-15T16:37:48Z
    /// (0.1.0) to 0.11.4, whose creation time carries milliseconds. The 16
    /// newest OSS releases each have a `+ent` enterprise release created two
    /// hours later, for 59 releases in total.
    pub fn waypoint_history() -> Vec<ReleaseInfo> {
        let first = Utc
            .with_ymd_and_hms(2020, 10, 15, 16, 37, 48)
            .single()
            .expect("valid fixture timestamp");
        let newest = WAYPOINT_VERSIONS.len() - 1;

        let mut releases = Vec::with_capacity(WAYPOINT_VERSIONS.len() + WAYPOINT_ENTERPRISE_COUNT);
        for (age, version) in WAYPOINT_VERSIONS.iter().rev().enumerate() {
            let mut created = first + Duration::days(24 * age as i64);
            if age == newest {
                created += Duration::milliseconds(901);
            }

            releases.push(Self::release("waypoint", version, created, LicenseClass::Oss));

            if newest - age < WAYPOINT_ENTERPRISE_COUNT {
                releases.push(Self::release(
                    "waypoint",
                    &format!("{version}+ent"),
                    created + Duration::hours(2),
                    LicenseClass::Enterprise,
                ));
            }
        }
        releases
    }

    /// Create the default scenario with common test data.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            releases: Self::waypoint_history(),
            products: ["consul", "nomad", "packer", "terraform"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}
