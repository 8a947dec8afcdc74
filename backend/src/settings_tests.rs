//! Tests for configuration loading and session validation.

use std::ffi::OsString;

use env_lock::lock_env;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::{LoginCredentials, hash_password};

const ENV_KEYS: [&str; 14] = [
    "PORTFOLIO_BIND_ADDR",
    "PORTFOLIO_DATABASE_URL",
    "PORTFOLIO_POOL_MAX_SIZE",
    "PORTFOLIO_RUN_MIGRATIONS",
    "PORTFOLIO_SESSION_KEY_FILE",
    "PORTFOLIO_COOKIE_SECURE",
    "PORTFOLIO_SAME_SITE",
    "PORTFOLIO_ALLOW_EPHEMERAL",
    "PORTFOLIO_ADMIN_USERNAME",
    "PORTFOLIO_ADMIN_PASSWORD_HASH",
    "PORTFOLIO_SITE_HEADER",
    "PORTFOLIO_SITE_TITLE",
    "PORTFOLIO_INDEX_TITLE",
    "PORTFOLIO_PUBLIC_BASE_URL",
];

fn load_with(overrides: &[(&'static str, &str)]) -> PortfolioSettings {
    let vars = ENV_KEYS.map(|key| {
        let value = overrides
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_owned());
        (key, value)
    });
    let _guard = lock_env(vars);
    PortfolioSettings::load_from_iter([OsString::from("portfolio")]).expect("config should load")
}

#[fixture]
fn release_settings() -> PortfolioSettings {
    PortfolioSettings {
        bind_addr: None,
        database_url: None,
        pool_max_size: None,
        run_migrations: false,
        session_key_file: None,
        cookie_secure: Some("1".into()),
        same_site: Some("Strict".into()),
        allow_ephemeral: Some("0".into()),
        admin_username: None,
        admin_password_hash: None,
        site_header: None,
        site_title: None,
        index_title: None,
        public_base_url: None,
    }
}

struct KeyFile(PathBuf);

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("portfolio-session-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self(path)
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[rstest]
fn defaults_apply_when_nothing_is_set() {
    let settings = load_with(&[]);
    assert_eq!(
        settings.bind_addr().expect("default addr"),
        "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
    );
    assert!(settings.database_url().is_none());
    assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    assert!(!settings.run_migrations);
    assert_eq!(settings.public_base_url(), DEFAULT_PUBLIC_BASE_URL);
    assert_eq!(settings.admin_site(), AdminSiteSettings::default());
}

#[rstest]
fn environment_overrides_are_respected() {
    let settings = load_with(&[
        ("PORTFOLIO_BIND_ADDR", "127.0.0.1:9000"),
        ("PORTFOLIO_DATABASE_URL", "postgres://localhost/portfolio"),
        ("PORTFOLIO_POOL_MAX_SIZE", "4"),
        ("PORTFOLIO_RUN_MIGRATIONS", "true"),
        ("PORTFOLIO_SITE_TITLE", "Meu painel"),
        ("PORTFOLIO_PUBLIC_BASE_URL", "https://ana.dev"),
    ]);
    assert_eq!(
        settings.bind_addr().expect("addr"),
        "127.0.0.1:9000".parse::<SocketAddr>().expect("addr")
    );
    assert_eq!(settings.database_url(), Some("postgres://localhost/portfolio"));
    assert_eq!(settings.pool_max_size(), 4);
    assert!(settings.run_migrations);
    assert_eq!(settings.admin_site().site_title(), "Meu painel");
    assert_eq!(settings.public_base_url(), "https://ana.dev");
}

#[rstest]
fn blank_database_url_selects_the_memory_store(mut release_settings: PortfolioSettings) {
    release_settings.database_url = Some("   ".into());
    assert!(release_settings.database_url().is_none());
}

#[rstest]
fn invalid_bind_addr_is_rejected(mut release_settings: PortfolioSettings) {
    release_settings.bind_addr = Some("localhost".into());
    assert!(matches!(
        release_settings.bind_addr(),
        Err(SettingsError::Invalid { name: "PORTFOLIO_BIND_ADDR", .. })
    ));
}

#[rstest]
#[case("1", Some(true))]
#[case("YES", Some(true))]
#[case("y", Some(true))]
#[case("false", Some(false))]
#[case("n", Some(false))]
#[case("maybe", None)]
fn parses_boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}

#[rstest]
fn release_accepts_a_long_key(mut release_settings: PortfolioSettings) {
    let key = KeyFile::with_len(64);
    release_settings.session_key_file = Some(key.0.clone());
    let session = release_settings
        .session_settings(BuildMode::Release)
        .expect("valid release settings");
    assert!(session.cookie_secure);
    assert_eq!(session.same_site, SameSite::Strict);
}

#[rstest]
#[case(BuildMode::Release, 40, true)]
#[case(BuildMode::Debug, 40, false)]
#[case(BuildMode::Debug, 16, true)]
fn key_length_depends_on_build_mode(
    mut release_settings: PortfolioSettings,
    #[case] mode: BuildMode,
    #[case] len: usize,
    #[case] rejected: bool,
) {
    let key = KeyFile::with_len(len);
    release_settings.session_key_file = Some(key.0.clone());
    let result = release_settings.session_settings(mode);
    assert_eq!(
        matches!(result, Err(SettingsError::KeyTooShort { .. })),
        rejected
    );
}

#[rstest]
fn release_requires_the_key_file(mut release_settings: PortfolioSettings) {
    release_settings.session_key_file = Some(PathBuf::from("/nonexistent/portfolio-key"));
    assert!(matches!(
        release_settings.session_settings(BuildMode::Release),
        Err(SettingsError::KeyRead { .. })
    ));
}

#[rstest]
fn debug_generates_a_temporary_key(mut release_settings: PortfolioSettings) {
    release_settings.session_key_file = Some(PathBuf::from("/nonexistent/portfolio-key"));
    release_settings.cookie_secure = None;
    release_settings.same_site = None;
    release_settings.allow_ephemeral = None;
    let session = release_settings
        .session_settings(BuildMode::Debug)
        .expect("debug defaults");
    assert!(session.cookie_secure);
    assert_eq!(session.same_site, SameSite::Lax);
}

#[rstest]
fn release_rejects_missing_cookie_toggle(mut release_settings: PortfolioSettings) {
    release_settings.cookie_secure = None;
    assert!(matches!(
        release_settings.session_settings(BuildMode::Release),
        Err(SettingsError::Missing { name: "PORTFOLIO_COOKIE_SECURE" })
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(mut release_settings: PortfolioSettings) {
    release_settings.cookie_secure = Some("0".into());
    release_settings.same_site = Some("None".into());
    assert!(matches!(
        release_settings.session_settings(BuildMode::Release),
        Err(SettingsError::InsecureSameSiteNone)
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys(mut release_settings: PortfolioSettings) {
    release_settings.allow_ephemeral = Some("1".into());
    assert!(matches!(
        release_settings.session_settings(BuildMode::Release),
        Err(SettingsError::EphemeralNotAllowed)
    ));
}

#[rstest]
#[tokio::test]
async fn configured_admin_can_log_in(mut release_settings: PortfolioSettings) {
    release_settings.admin_username = Some("ana".into());
    release_settings.admin_password_hash = Some(hash_password("segredo").expect("hash"));
    let login = release_settings.login_service().expect("valid admin");
    let creds = LoginCredentials::try_from_parts("ana", "segredo").expect("shape");
    let admin = login.authenticate(&creds).await.expect("accepted");
    assert_eq!(admin.username(), "ana");
}

#[rstest]
#[tokio::test]
async fn unconfigured_admin_disables_login(release_settings: PortfolioSettings) {
    let login = release_settings.login_service().expect("disabled login");
    let creds = LoginCredentials::try_from_parts("admin", "password").expect("shape");
    assert!(login.authenticate(&creds).await.is_err());
}

#[rstest]
#[case(Some("ana"), None, "PORTFOLIO_ADMIN_PASSWORD_HASH")]
#[case(None, Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"), "PORTFOLIO_ADMIN_USERNAME")]
fn half_configured_admin_is_rejected(
    mut release_settings: PortfolioSettings,
    #[case] username: Option<&str>,
    #[case] hash: Option<&str>,
    #[case] missing: &str,
) {
    release_settings.admin_username = username.map(str::to_owned);
    release_settings.admin_password_hash = hash.map(str::to_owned);
    match release_settings.login_service() {
        Err(SettingsError::Missing { name }) => assert_eq!(name, missing),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a configuration error"),
    }
}

#[rstest]
#[case("not-a-hash")]
#[case("5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8")]
fn malformed_password_hash_is_rejected(
    mut release_settings: PortfolioSettings,
    #[case] hash: &str,
) {
    release_settings.admin_username = Some("ana".into());
    release_settings.admin_password_hash = Some(hash.into());
    match release_settings.login_service() {
        Err(SettingsError::Invalid { name, value, .. }) => {
            assert_eq!(name, "PORTFOLIO_ADMIN_PASSWORD_HASH");
            assert_eq!(value, "<redacted>");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a configuration error"),
    }
}

#[rstest]
fn key_fingerprints_identify_keys_without_revealing_them() {
    let key = Key::derive_from(&[b'a'; 64]);
    let fingerprint = key_fingerprint(&key);
    assert_eq!(fingerprint.len(), FINGERPRINT_BYTES * 2);
    assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(fingerprint, key_fingerprint(&key));
    assert_ne!(fingerprint, key_fingerprint(&Key::derive_from(&[b'b'; 64])));
}
