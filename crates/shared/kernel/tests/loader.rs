use snakeeyes_kernel::config::{
    ConfigLoadError, ConfigLoader, EnvSource, FileFormat, InstancePolicy, Settings, Source,
    resolve,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const BASE: &str = r#"
DEBUG = true
TESTING = false
SERVER_NAME = "localhost:8000"
HELLO = "<h1>Base</h1>"
"#;

const INSTANCE: &str = r#"
HELLO = "<h1>Instance</h1>"
SECRET_KEY = "instance-secret"
"#;

struct Fixture {
    _dir: TempDir,
    base: PathBuf,
    instance: PathBuf,
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write settings file");
    path
}

fn fixture() -> Fixture {
    let dir = tempdir().expect("temp dir");
    let base = write(dir.path(), "settings.toml", BASE);
    let instance = write(dir.path(), "instance.toml", INSTANCE);
    Fixture { _dir: dir, base, instance }
}

fn test_overrides() -> Settings {
    Settings::new().with("DEBUG", false).with("TESTING", true)
}

#[test]
fn instance_layer_overwrites_base() {
    let fx = fixture();
    let settings = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(&fx.instance))
        .resolve()
        .expect("resolve");

    assert_eq!(settings.get_str("HELLO"), Some("<h1>Instance</h1>"));
    assert_eq!(settings.get_str("SECRET_KEY"), Some("instance-secret"));
    assert_eq!(settings.get_bool("DEBUG"), Some(true));
    assert_eq!(settings.get_str("SERVER_NAME"), Some("localhost:8000"));
}

#[test]
fn resolution_is_deterministic() {
    let fx = fixture();
    let loader = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(&fx.instance))
        .overrides(test_overrides())
        .build()
        .expect("build loader");

    assert_eq!(loader.resolve().expect("first"), loader.resolve().expect("second"));
}

#[test]
fn override_wins_over_base_and_instance() {
    let fx = fixture();
    write(fx.instance.parent().unwrap(), "instance.toml", "DEBUG = true\nTESTING = false\n");

    let settings = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(&fx.instance))
        .overrides(test_overrides())
        .resolve()
        .expect("resolve");

    assert_eq!(settings.get_bool("DEBUG"), Some(false));
    assert_eq!(settings.get_bool("TESTING"), Some(true));
}

#[test]
fn applying_override_twice_matches_applying_once() {
    let fx = fixture();
    let once = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .overrides(test_overrides())
        .resolve()
        .expect("once");
    let twice = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .overrides(test_overrides())
        .overrides(test_overrides())
        .resolve()
        .expect("twice");

    assert_eq!(once, twice);
    assert_eq!(once.clone().merged(test_overrides()), once);
}

#[test]
fn missing_base_is_fatal() {
    let dir = tempdir().expect("temp dir");
    let err = ConfigLoader::builder()
        .base(Source::file(dir.path().join("nope.toml")))
        .resolve()
        .expect_err("missing base must fail");

    assert!(matches!(err, ConfigLoadError::NotFound { .. }), "got {err:?}");
    assert!(err.to_string().contains("base settings"));
}

#[test]
fn missing_optional_instance_is_skipped() {
    let fx = fixture();
    let settings = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(fx.base.with_file_name("absent.toml")))
        .instance_policy(InstancePolicy::Optional)
        .resolve()
        .expect("optional instance may be absent");

    assert_eq!(settings.get_str("HELLO"), Some("<h1>Base</h1>"));
}

#[test]
fn missing_required_instance_is_fatal() {
    let fx = fixture();
    let err = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(fx.base.with_file_name("absent.toml")))
        .instance_policy(InstancePolicy::Required)
        .resolve()
        .expect_err("required instance must exist");

    match err {
        ConfigLoadError::NotFound { path, context } => {
            assert!(path.ends_with("absent.toml"));
            assert_eq!(context.as_deref(), Some("instance settings"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_optional_instance_still_fails() {
    let fx = fixture();
    write(fx.instance.parent().unwrap(), "instance.toml", "HELLO = [unterminated");

    let err = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(&fx.instance))
        .instance_policy(InstancePolicy::Optional)
        .resolve()
        .expect_err("malformed instance must fail");

    assert!(matches!(err, ConfigLoadError::Parse { .. }), "got {err:?}");
}

#[test]
fn environment_sits_between_files_and_overrides() {
    let fx = fixture();
    let env = EnvSource::new("SNAKEEYES").with_vars([
        ("SNAKEEYES_HELLO", "<h1>Env</h1>"),
        ("SNAKEEYES_TESTING", "false"),
        ("OTHER_HELLO", "ignored"),
    ]);

    let settings = ConfigLoader::builder()
        .base(Source::file(&fx.base))
        .instance(Source::file(&fx.instance))
        .env_source(env)
        .overrides(Settings::new().with("TESTING", true))
        .resolve()
        .expect("resolve");

    assert_eq!(settings.get_str("HELLO"), Some("<h1>Env</h1>"));
    assert_eq!(settings.get_bool("TESTING"), Some(true));
    assert!(!settings.contains_key("OTHER_HELLO"));
}

#[test]
fn environment_values_are_parsed() {
    let env = EnvSource::new("SNAKEEYES")
        .with_vars([("SNAKEEYES_DEBUG", "false"), ("SNAKEEYES_WORKERS", "4")]);

    let settings = ConfigLoader::builder()
        .base(Source::inline("base", "DEBUG = true", FileFormat::Toml))
        .env_source(env)
        .resolve()
        .expect("resolve");

    assert_eq!(settings.get_bool("DEBUG"), Some(false));
    assert_eq!(settings.get_as::<u32>("WORKERS").expect("typed"), Some(4));
}

#[test]
fn format_is_inferred_from_extension() {
    let dir = tempdir().expect("temp dir");
    let base = write(dir.path(), "settings.json", r#"{ "HELLO": "json", "DEBUG": true }"#);
    let instance = write(dir.path(), "instance.yaml", "HELLO: yaml\n");

    let settings = ConfigLoader::builder()
        .base(Source::file(base))
        .instance(Source::file(instance))
        .resolve()
        .expect("resolve");

    assert_eq!(settings.get_str("HELLO"), Some("yaml"));
    assert_eq!(settings.get_bool("DEBUG"), Some(true));
}

#[test]
fn builder_without_base_is_invalid() {
    let err = ConfigLoader::builder().build().expect_err("base is mandatory");
    assert!(matches!(err, ConfigLoadError::Invalid { .. }));
}

#[test]
fn free_function_resolves_all_layers() {
    let fx = fixture();
    let settings = resolve(
        Source::file(&fx.base),
        Some((Source::file(&fx.instance), InstancePolicy::Required)),
        Some(test_overrides()),
    )
    .expect("resolve");

    assert_eq!(settings.get_str("HELLO"), Some("<h1>Instance</h1>"));
    assert_eq!(settings.get_bool("TESTING"), Some(true));
}
