use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_fermata_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("FERMATA_CONFIG_PATH", "/tmp/fermata-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/fermata-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home/fermata/config.toml")
    );
}

#[test]
fn defaults_match_the_documented_behavior() {
    let s = Settings::default();
    assert_eq!(s.download.reset_ms, 3000);
    assert_eq!(s.download.directory, "Downloads");
    assert!(!s.playback.looping);
    assert_eq!(s.controls.seek_step_percent, 5);
    assert!(s.validate().is_ok());
}

#[test]
fn sample_config_file_parses() {
    let s: Settings = toml::from_str(
        r#"
            [download]
            directory = "dl"
            reset_ms = 1500

            [controls]
            seek_step_percent = 10

            [playback]
            looping = true

            [library]
            extensions = ["mp3", "flac"]
            recursive = false
        "#,
    )
    .unwrap();

    assert_eq!(s.download.directory, "dl");
    assert_eq!(s.download.reset_ms, 1500);
    assert_eq!(s.controls.seek_step_percent, 10);
    assert!(s.playback.looping);
    assert_eq!(s.library.extensions, vec!["mp3", "flac"]);
    assert!(!s.library.recursive);
    // Untouched sections keep their defaults.
    assert_eq!(s.audio.quit_fade_out_ms, 500);
}

#[test]
fn validate_rejects_bad_seek_step() {
    let mut s = Settings::default();
    s.controls.seek_step_percent = 0;
    assert!(s.validate().is_err());
    s.controls.seek_step_percent = 101;
    assert!(s.validate().is_err());
    s.controls.seek_step_percent = 100;
    assert!(s.validate().is_ok());
}
