// tests/connection/descriptor_test.rs
//! Connection descriptor construction.

use mantis_impala::advisory::Advisory;
use mantis_impala::config::{
    ConnectionDescriptor, ConnectionError, ConnectionParams, Settings, TunnelSettings,
};
use mantis_impala::sql::dialect::IMPALA_CAPABILITIES;

#[test]
fn inferred_ssl_with_trust_has_no_advisory() {
    let params = ConnectionParams::new("impala", "sales")
        .with_ssl(false)
        .with_additional_options("useSSL=true;trustServerCertificate=true");
    let built = ConnectionDescriptor::build(&params).unwrap();
    assert!(built.value.ssl);
    assert!(built.advisories.is_empty());
    assert_eq!(built.value.property("useSSL"), Some("true"));
}

#[test]
fn inferred_ssl_without_trust_has_one_advisory() {
    let params = ConnectionParams::new("impala", "sales")
        .with_ssl(false)
        .with_additional_options("useSSL=true");
    let built = ConnectionDescriptor::build(&params).unwrap();
    assert!(built.value.ssl);
    assert_eq!(
        built.advisories,
        vec![Advisory::SslWithoutTrustServerCertificate]
    );
}

#[test]
fn explicit_ssl_without_options_has_one_advisory() {
    let params = ConnectionParams::new("impala", "sales").with_ssl(true);
    let built = ConnectionDescriptor::build(&params).unwrap();
    assert!(built.value.ssl);
    assert_eq!(built.advisories.len(), 1);
}

#[test]
fn advisory_leaves_descriptor_unchanged() {
    let with_trust = ConnectionParams::new("impala", "sales")
        .with_ssl(true)
        .with_additional_options("trustServerCertificate=false");
    let without_trust = ConnectionParams::new("impala", "sales").with_ssl(true);

    let a = ConnectionDescriptor::build(&with_trust).unwrap().into_value();
    let b = ConnectionDescriptor::build(&without_trust).unwrap().into_value();
    assert_eq!(a.ssl, b.ssl);
    assert_eq!(a.host, b.host);
    assert_eq!(a.property("useSSL"), b.property("useSSL"));
}

#[test]
fn ssl_inference_is_case_insensitive() {
    let params = ConnectionParams::new("impala", "sales")
        .with_additional_options("?USESSL=TRUE&TrustServerCertificate=true");
    let built = ConnectionDescriptor::build(&params).unwrap();
    assert!(built.value.ssl);
    assert!(!built.has_advisories());
    // Known keys land under their canonical spelling, replacing the default
    assert_eq!(built.value.property("useSSL"), Some("TRUE"));
    assert_eq!(built.value.property("USESSL"), None);
    assert_eq!(built.value.property("trustServerCertificate"), Some("true"));
}

#[test]
fn use_ssl_false_is_not_inferred() {
    let params = ConnectionParams::new("impala", "sales").with_additional_options("useSSL=false");
    let built = ConnectionDescriptor::build(&params).unwrap();
    assert!(!built.value.ssl);
    assert!(built.advisories.is_empty());
}

#[test]
fn missing_database_is_the_only_error() {
    let err = ConnectionDescriptor::build(&ConnectionParams::new("impala", "")).unwrap_err();
    assert!(matches!(err, ConnectionError::MissingDatabase));

    // Garbage options are passed through, not rejected
    let params = ConnectionParams::new("", "sales").with_additional_options("===;&&;novalue");
    let descriptor = ConnectionDescriptor::build(&params).unwrap().into_value();
    assert_eq!(descriptor.property("novalue"), Some(""));
}

#[test]
fn precedence_defaults_then_ssl_then_database_then_options() {
    let params = ConnectionParams::new("impala", "sales")
        .with_additional_options("database=override;zeroDateTimeBehavior=exception;extra=1");
    let descriptor = ConnectionDescriptor::build(&params).unwrap().into_value();
    assert_eq!(descriptor.property("database"), Some("override"));
    assert_eq!(descriptor.property("zeroDateTimeBehavior"), Some("exception"));
    assert_eq!(descriptor.property("characterEncoding"), Some("UTF8"));
    assert_eq!(descriptor.property("extra"), Some("1"));
    // The descriptor field keeps the configured name
    assert_eq!(descriptor.database, "sales");
    // but the transport sees the override
    assert!(descriptor
        .to_connection_string()
        .starts_with("impala://impala:21050/override?"));
}

#[test]
fn defaults_match_capabilities() {
    let descriptor = ConnectionDescriptor::build(&ConnectionParams::new("", "sales"))
        .unwrap()
        .into_value();
    assert_eq!(descriptor.host, "localhost");
    assert_eq!(Some(descriptor.port), IMPALA_CAPABILITIES.default_port);
    assert_eq!(descriptor.default_args().len(), 4);
}

#[test]
fn tunnel_settings_pass_through() {
    let tunnel = TunnelSettings(
        [("ssh_host".to_string(), "bastion".to_string())]
            .into_iter()
            .collect(),
    );
    let params = ConnectionParams::new("impala", "sales").with_tunnel(tunnel.clone());
    let descriptor = ConnectionDescriptor::build(&params).unwrap().into_value();
    assert_eq!(descriptor.tunnel, Some(tunnel));
    assert!(!descriptor.to_connection_string().contains("bastion"));
}

#[test]
fn connection_string_from_settings() {
    let settings: Settings = toml::from_str(
        r#"
[connections.warehouse]
host = "impala.internal"
port = 21000
database = "dw"
additional_options = "useSSL=true;trustServerCertificate=true"
"#,
    )
    .unwrap();
    let params = settings.resolved_connection("warehouse").unwrap();
    let built = ConnectionDescriptor::build(&params).unwrap();
    assert!(!built.has_advisories());
    assert_eq!(
        built.value.to_connection_string(),
        "impala://impala.internal:21000/dw?characterEncoding=UTF8&trustServerCertificate=true\
         &useCompression=true&useSSL=true&useUnicode=true&zeroDateTimeBehavior=convertToNull"
    );
}

#[test]
fn descriptor_serializes() {
    let descriptor = ConnectionDescriptor::build(&ConnectionParams::new("impala", "sales"))
        .unwrap()
        .into_value();
    let json = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(json["port"], 21050);
    assert_eq!(json["properties"]["useUnicode"], "true");
    assert!(json.get("tunnel").is_none());
}
