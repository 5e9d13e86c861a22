//! Tests for layered configuration loading

use ads_dashboard::config::{get_config_value, Config, ConfigLoader};
use ads_dashboard::credentials::CredentialField;
use std::collections::HashMap;
use std::io::Write;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = ConfigLoader::load_defaults();

    assert_eq!(config, Config::default());
    assert_eq!(config.environment, "production");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.google_ads.api_version, "v17");
    assert!(config.google_ads.use_proto_plus);
    assert!(!config.data.always_use_real_client);
    assert!(!config.data.allow_mock_data);
    assert!(!config.google_ads.credentials.is_complete());
    ConfigLoader::validate(&config).unwrap();
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
environment: staging
server:
  port: 9090
data:
  allowMockData: true
"#,
    );

    let config = ConfigLoader::load_file(file.path()).unwrap();

    assert_eq!(config.environment, "staging");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert!(config.data.allow_mock_data);
    assert!(!config.data.always_use_real_client);
    assert_eq!(config.google_ads.token_url, "https://oauth2.googleapis.com/token");
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");

    let err = ConfigLoader::load(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("server:\n  port: not-a-number\n");
    assert!(ConfigLoader::load_file(file.path()).is_err());
}

#[test]
fn test_env_overrides_file_values() {
    let file = write_config(
        r#"
googleAds:
  credentials:
    clientId: file-client
    developerToken: file-token
data:
  allowMockData: false
"#,
    );
    let config = ConfigLoader::load_file(file.path()).unwrap();

    let config = ConfigLoader::apply_env_overrides(
        config,
        env(&[
            ("GOOGLE_ADS_CLIENT_ID", "env-client"),
            ("GOOGLE_ADS_DEVELOPER_TOKEN", ""),
            ("ALLOW_MOCK_DATA", "true"),
            ("GOOGLE_ADS_ALWAYS_USE_REAL_CLIENT", "not-a-bool"),
            ("PORT", "3000"),
        ]),
    );

    let credentials = &config.google_ads.credentials;
    assert_eq!(credentials.client_id, "env-client");
    // Empty values do not clear file values
    assert_eq!(credentials.developer_token, "file-token");
    assert!(config.data.allow_mock_data);
    assert!(!config.data.always_use_real_client);
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_env_credentials_complete_the_set() {
    let config = ConfigLoader::apply_env_overrides(
        Config::default(),
        env(&[
            ("GOOGLE_ADS_CLIENT_ID", "id"),
            ("GOOGLE_ADS_CLIENT_SECRET", "secret"),
            ("GOOGLE_ADS_DEVELOPER_TOKEN", "token"),
            ("GOOGLE_ADS_LOGIN_CUSTOMER_ID", "123-456-7890"),
            ("GOOGLE_ADS_REFRESH_TOKEN", "refresh"),
        ]),
    );

    assert!(config.google_ads.credentials.is_complete());
    assert_eq!(config.google_ads.credentials.customer_id(), "1234567890");
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = Config::default();
    config.server.request_timeout = "soon".to_string();
    assert!(ConfigLoader::validate(&config).is_err());

    let mut config = Config::default();
    config.google_ads.token_url = "not a url".to_string();
    assert!(ConfigLoader::validate(&config).is_err());

    let mut config = Config::default();
    config.server.port = 0;
    assert!(ConfigLoader::validate(&config).is_err());
}

#[test]
fn test_get_config_value_masks_secrets() {
    let mut config = Config::default();
    config
        .google_ads
        .credentials
        .set(CredentialField::RefreshToken, "1//abcdefghijklmnop");
    config
        .google_ads
        .credentials
        .set(CredentialField::LoginCustomerId, "123-456-7890");

    let refresh = get_config_value(&config, "googleAds.credentials.refreshToken").unwrap();
    assert!(refresh.starts_with("1//a"));
    assert!(refresh.ends_with("mnop"));
    assert!(refresh.contains('*'));

    assert_eq!(
        get_config_value(&config, "googleAds.credentials.loginCustomerId").unwrap(),
        "123-456-7890"
    );
    assert_eq!(get_config_value(&config, "data.allowMockData").unwrap(), "false");
    assert!(get_config_value(&config, "ui.skin").is_err());
}

#[test]
fn test_redacted_config_hides_secrets() {
    let mut config = Config::default();
    config.google_ads.credentials.client_secret = "GOCSPX-very-secret".to_string();

    let yaml = serde_yaml::to_string(&config.redacted()).unwrap();
    assert!(!yaml.contains("GOCSPX-very-secret"));
    assert!(yaml.contains("GOCS"));
}
