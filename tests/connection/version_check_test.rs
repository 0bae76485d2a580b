// tests/connection/version_check_test.rs
//! Version compatibility check against a mock probe.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mantis_impala::advisory::Advisory;
use mantis_impala::metadata::{
    check_connectivity, DatabaseVersion, MetadataProbe, ProbeError, ProbeResult,
};

struct MockProbe {
    version: ProbeResult<DatabaseVersion>,
    valid: bool,
    version_calls: AtomicUsize,
}

impl MockProbe {
    fn new(major: u32, minor: u32, valid: bool) -> Self {
        Self {
            version: Ok(DatabaseVersion::new(major, minor)),
            valid,
            version_calls: AtomicUsize::new(0),
        }
    }

    fn unreadable(version: &str, valid: bool) -> Self {
        Self {
            version: Err(ProbeError::InvalidVersion(version.to_string())),
            valid,
            version_calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            version: Err(ProbeError::connection(message)),
            valid: false,
            version_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MetadataProbe for MockProbe {
    async fn database_version(&self) -> ProbeResult<DatabaseVersion> {
        self.version_calls.fetch_add(1, Ordering::SeqCst);
        self.version.clone()
    }

    async fn is_valid(&self) -> bool {
        self.valid
    }
}

#[tokio::test]
async fn supported_version_has_no_advisory() {
    let probe = MockProbe::new(5, 7, true);
    let checked = check_connectivity(&probe).await.unwrap();
    assert!(checked.value);
    assert!(checked.advisories.is_empty());
}

#[tokio::test]
async fn old_version_has_one_advisory() {
    let probe = MockProbe::new(5, 6, true);
    let checked = check_connectivity(&probe).await.unwrap();
    assert!(checked.value);
    assert_eq!(
        checked.advisories,
        vec![Advisory::UnsupportedServerVersion {
            found: 5.6,
            minimum: 5.7
        }]
    );
}

#[tokio::test]
async fn result_is_the_probe_validity() {
    let probe = MockProbe::new(6, 0, false);
    let checked = check_connectivity(&probe).await.unwrap();
    assert!(!checked.value);
    assert!(checked.advisories.is_empty());

    // An advisory never turns a valid connection into a rejected one
    let probe = MockProbe::new(4, 0, true);
    let checked = check_connectivity(&probe).await.unwrap();
    assert!(checked.value);
    assert_eq!(checked.advisories.len(), 1);
}

#[tokio::test]
async fn two_digit_minor_uses_legacy_number() {
    let probe = MockProbe::new(5, 10, true);
    let checked = check_connectivity(&probe).await.unwrap();
    assert_eq!(checked.advisories.len(), 1);
    assert!(DatabaseVersion::new(5, 10).at_least(5, 7));
}

#[tokio::test]
async fn huge_major_version_is_supported() {
    let probe = MockProbe::new(500_000_000, 1, true);
    let checked = check_connectivity(&probe).await.unwrap();
    assert!(checked.value);
    assert!(checked.advisories.is_empty());
}

#[tokio::test]
async fn unreadable_version_only_raises_an_advisory() {
    let probe = MockProbe::unreadable("impalad-dev", true);
    let checked = check_connectivity(&probe).await.unwrap();
    assert!(checked.value);
    assert_eq!(
        checked.advisories,
        vec![Advisory::UnreadableServerVersion {
            reported: "impalad-dev".to_string()
        }]
    );
}

#[tokio::test]
async fn probe_failure_is_returned_once() {
    let probe = MockProbe::failing("Communications link failure");
    let err = check_connectivity(&probe).await.unwrap_err();
    assert_eq!(err.humanized(), "check host and port");
    assert_eq!(probe.version_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn works_through_trait_objects() {
    let probe: Box<dyn MetadataProbe> = Box::new(MockProbe::new(5, 7, true));
    let checked = check_connectivity(probe.as_ref()).await.unwrap();
    assert!(checked.value);
}
