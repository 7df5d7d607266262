//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use uuid::Uuid;

struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("storefront-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("key file written");
        Self { path }
    }

    fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_file: &TempKeyFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_file.path_string()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        (TTL_ENV, "8".to_owned()),
    ])
}

#[rstest]
fn release_accepts_complete_configuration(key_file: TempKeyFile) {
    let env = mock_env(release_vars(&key_file));

    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("complete release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.ttl_hours, 8);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
#[case(TTL_ENV)]
fn release_rejects_missing_toggle(key_file: TempKeyFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&key_file);
    vars.remove(missing);

    let result = session_settings_from_env(&mock_env(vars), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::MissingEnv { name }) if name == missing
    ));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sometimes")]
#[case(TTL_ENV, "0")]
#[case(TTL_ENV, "9999")]
fn release_rejects_malformed_toggle(
    key_file: TempKeyFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&key_file);
    vars.insert(name, value.to_owned());

    let result = session_settings_from_env(&mock_env(vars), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::InvalidEnv { name: reported, .. }) if reported == name
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    let result = session_settings_from_env(&mock_env(vars), BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::InsecureSameSiteNone)));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(ALLOW_EPHEMERAL_ENV, "1".to_owned());

    let result = session_settings_from_env(&mock_env(vars), BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::EphemeralNotAllowed)));
}

#[rstest]
fn release_rejects_short_key() {
    let short = TempKeyFile::new(SESSION_KEY_MIN_LEN - 1);
    let result = session_settings_from_env(&mock_env(release_vars(&short)), BuildMode::Release);
    assert!(matches!(
        result,
        Err(SessionConfigError::KeyTooShort { length, .. }) if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_missing_key_file(key_file: TempKeyFile) {
    let mut vars = release_vars(&key_file);
    vars.insert(KEY_FILE_ENV, "/nonexistent/storefront/session_key".to_owned());

    let result = session_settings_from_env(&mock_env(vars), BuildMode::Release);
    assert!(matches!(result, Err(SessionConfigError::KeyRead { .. })));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let vars = HashMap::from([(KEY_FILE_ENV, "/nonexistent/storefront/session_key".to_owned())]);

    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
    assert_eq!(settings.ttl_hours, DEFAULT_TTL_HOURS);
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case("n", Some(false))]
#[case("", None)]
fn parse_bool_accepts_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
