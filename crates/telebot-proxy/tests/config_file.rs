use std::fs;

use telebot_proxy::ProxyConfig;
use tempfile::TempDir;

#[test]
fn test_yaml_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("telebot.yml");

    fs::write(
        &config_path,
        r#"
host: "127.0.0.1"
port: 9000
openai_base_url: "http://localhost:4000"
model: "gpt-4o-mini"
max_tokens: 2048
temperature: 0.2
request_timeout_secs: 30
context_char_limit: 200
"#,
    )
    .unwrap();

    let config = ProxyConfig::from_yaml_file(&config_path).unwrap();
    assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    assert_eq!(config.openai_base_url, "http://localhost:4000");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.max_tokens, 2048);
    assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.context_char_limit, 200);
    assert!(config.openai_api_key.is_none());
    assert!(config.auth_token.is_none());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = ProxyConfig::from_yaml_file(&dir.path().join("absent.yml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config"));
}

#[test]
fn test_unknown_keys_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("telebot.yml");
    fs::write(&config_path, "openai_api_key: sk-should-not-live-here\n").unwrap();

    let err = ProxyConfig::from_yaml_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}
