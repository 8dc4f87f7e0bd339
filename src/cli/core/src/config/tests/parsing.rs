/* src/cli/core/src/config/tests/parsing.rs */

use std::collections::HashMap;

use storefront_server::BuildMode;

use super::*;

#[test]
fn parse_minimal_config() {
  let toml_str = r#"
[api]
url = "http://localhost:3000/shop-api"
"#;
  let config: StorefrontConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.api.url, "http://localhost:3000/shop-api");
  assert!(config.api.channel_token.is_none());
  assert_eq!(config.api.auth_token_header, "vendure-auth-token");
  assert_eq!(config.server.host, "0.0.0.0");
  assert_eq!(config.server.port, 3000);
  assert_eq!(config.server.public_dir, "public");
  assert_eq!(config.server.session_cookie, "storefront_session");
  assert!(!config.server.secure_cookie);
  assert!(config.app.mode.is_none());
  assert_eq!(config.app.log_level, "info");
  assert_eq!(config.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn parse_full_config() {
  let toml_str = r#"
[server]
host = "127.0.0.1"
port = 8080
public_dir = "static"
session_cookie = "sid"
secure_cookie = true

[api]
url = "https://shop.example.com/shop-api"
channel_token = "eu-channel"
auth_token_header = "x-auth-token"

[app]
mode = "production"
log_level = "debug"
title = "Example Shop"
"#;
  let config: StorefrontConfig = toml::from_str(toml_str).unwrap();
  assert_eq!(config.bind_addr(), "127.0.0.1:8080");
  assert_eq!(config.server.public_dir, "static");
  assert_eq!(config.server.session_cookie, "sid");
  assert!(config.server.secure_cookie);
  assert_eq!(config.api.channel_token.as_deref(), Some("eu-channel"));
  assert_eq!(config.api.auth_token_header, "x-auth-token");
  assert_eq!(config.build_mode(), BuildMode::Production);
  assert_eq!(config.app.log_level, "debug");
  assert_eq!(config.app.title.as_deref(), Some("Example Shop"));
}

#[test]
fn missing_api_section_fails() {
  let toml_str = r#"
[server]
port = 8080
"#;
  assert!(toml::from_str::<StorefrontConfig>(toml_str).is_err());
}

#[test]
fn unknown_mode_fails() {
  let toml_str = r#"
[api]
url = "http://localhost/shop-api"

[app]
mode = "staging"
"#;
  assert!(toml::from_str::<StorefrontConfig>(toml_str).is_err());
}

#[test]
fn load_resolves_public_dir_against_config_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join(CONFIG_FILE_NAME);
  std::fs::write(&path, "[api]\nurl = \"http://localhost/shop-api\"\n").unwrap();

  let config = load_config(&path).unwrap();
  assert_eq!(
    std::path::PathBuf::from(&config.server.public_dir),
    dir.path().join("public")
  );
}

#[test]
fn load_keeps_absolute_public_dir() {
  let dir = tempfile::tempdir().unwrap();
  let public = dir.path().join("assets");
  let path = dir.path().join(CONFIG_FILE_NAME);
  std::fs::write(
    &path,
    format!(
      "[server]\npublic_dir = {:?}\n\n[api]\nurl = \"http://localhost/shop-api\"\n",
      public.to_string_lossy()
    ),
  )
  .unwrap();

  let config = load_config(&path).unwrap();
  assert_eq!(std::path::PathBuf::from(&config.server.public_dir), public);
}

#[test]
fn load_reports_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
  assert!(err.to_string().contains("failed to read"));
}

#[test]
fn find_config_walks_upward() {
  let dir = tempfile::tempdir().unwrap();
  let nested = dir.path().join("a/b/c");
  std::fs::create_dir_all(&nested).unwrap();
  std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[api]\nurl = \"http://x\"\n").unwrap();

  let found = find_config(&nested).unwrap();
  assert_eq!(found, dir.path().canonicalize().unwrap().join(CONFIG_FILE_NAME));
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
  let map: HashMap<String, String> =
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
  move |key| map.get(key).cloned()
}

#[test]
fn env_overrides_replace_file_values() {
  let mut config: StorefrontConfig =
    toml::from_str("[api]\nurl = \"http://file/shop-api\"\n").unwrap();
  apply_env_overrides(
    &mut config,
    env_from(&[("PORT", "4100"), ("STOREFRONT_API_URL", "http://env/shop-api"), ("STOREFRONT_ENV", "dev")]),
  )
  .unwrap();
  assert_eq!(config.server.port, 4100);
  assert_eq!(config.api.url, "http://env/shop-api");
  assert_eq!(config.build_mode(), BuildMode::Development);
}

#[test]
fn env_overrides_absent_leave_config_alone() {
  let mut config: StorefrontConfig =
    toml::from_str("[server]\nport = 5000\n\n[api]\nurl = \"http://file/shop-api\"\n").unwrap();
  apply_env_overrides(&mut config, env_from(&[])).unwrap();
  assert_eq!(config.server.port, 5000);
  assert_eq!(config.api.url, "http://file/shop-api");
  assert!(config.app.mode.is_none());
}

#[test]
fn env_override_rejects_bad_port() {
  let mut config: StorefrontConfig = toml::from_str("[api]\nurl = \"http://x\"\n").unwrap();
  let err = apply_env_overrides(&mut config, env_from(&[("PORT", "eighty")])).unwrap_err();
  assert!(err.to_string().contains("PORT"));
}
