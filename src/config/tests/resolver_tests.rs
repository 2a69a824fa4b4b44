//! Configuration source resolution tests.

use camino::{Utf8Path, Utf8PathBuf};
use mockable::MockEnv;
use rstest::rstest;

use crate::config::resolver::SYSTEM_CONFIG_DIR;
use crate::config::tests::helpers::{ConfigDir, config_dir, empty_env, mock_env};
use crate::config::{ConfigFormat, ConfigSearch, ConfigSource, resolve_source, user_config_dir};

/// Unwraps a search source, failing the test for anything else.
fn expect_search(source: ConfigSource) -> ConfigSearch {
    match source {
        ConfigSource::Search(search) => search,
        ConfigSource::File(path) => panic!("expected a search, got explicit file {path}"),
    }
}

#[rstest]
fn config_file_flag_is_used_verbatim() {
    let env = mock_env(&[("TIBCTL_CONFIG_FILE", "/from/env.yaml")]);
    let source = resolve_source(Some(Utf8Path::new("relative/flag.yml")), None, &env);
    assert_eq!(
        source,
        ConfigSource::File(Utf8PathBuf::from("relative/flag.yml"))
    );
}

#[rstest]
fn config_file_env_is_used_when_flag_absent() {
    let env = mock_env(&[("TIBCTL_CONFIG_FILE", "/from/env.yaml")]);
    let source = resolve_source(None, Some("staging"), &env);
    assert_eq!(source, ConfigSource::File(Utf8PathBuf::from("/from/env.yaml")));
}

#[rstest]
fn empty_config_file_values_fall_through_to_search() {
    let env = mock_env(&[("TIBCTL_CONFIG_FILE", ""), ("XDG_CONFIG_HOME", "/xdg")]);
    let source = resolve_source(Some(Utf8Path::new("")), None, &env);
    let search = expect_search(source);
    assert_eq!(search.name, "default");
}

#[rstest]
fn profile_flag_names_the_file_and_xdg_is_searched_first() {
    let env = mock_env(&[("XDG_CONFIG_HOME", "/home/user/.config")]);
    let search = expect_search(resolve_source(None, Some("staging"), &env));

    assert_eq!(search.name, "staging");
    assert_eq!(search.format, ConfigFormat::Yaml);
    assert_eq!(
        search.dirs,
        [
            Utf8PathBuf::from("/home/user/.config/tibctl"),
            Utf8PathBuf::from(SYSTEM_CONFIG_DIR),
        ]
    );
}

#[rstest]
fn profile_env_names_the_file_without_flag() {
    let env = mock_env(&[("TIBCTL_PROFILE", "envp"), ("XDG_CONFIG_HOME", "/xdg")]);
    let search = expect_search(resolve_source(None, None, &env));
    assert_eq!(search.name, "envp");
}

/// The flag is applied after the environment when choosing the file name, so
/// it wins even though both are set.
#[rstest]
fn profile_flag_overrides_profile_env() {
    let env = mock_env(&[("TIBCTL_PROFILE", "envp"), ("XDG_CONFIG_HOME", "/xdg")]);
    let search = expect_search(resolve_source(None, Some("flagp"), &env));
    assert_eq!(search.name, "flagp");
}

#[rstest]
fn default_profile_is_used_when_nothing_selects_one() {
    let env = mock_env(&[("XDG_CONFIG_HOME", "/xdg")]);
    let search = expect_search(resolve_source(None, None, &env));
    assert_eq!(search.name, "default");
}

#[rstest]
fn system_path_is_always_searched_last(empty_env: MockEnv) {
    let search = expect_search(resolve_source(None, None, &empty_env));
    assert_eq!(
        search.dirs.last().map(Utf8PathBuf::as_path),
        Some(Utf8Path::new(SYSTEM_CONFIG_DIR))
    );
}

#[rstest]
fn xdg_config_home_overrides_platform_dir() {
    let env = mock_env(&[("XDG_CONFIG_HOME", "/custom/config")]);
    assert_eq!(
        user_config_dir(&env),
        Some(Utf8PathBuf::from("/custom/config"))
    );
}

#[rstest]
fn candidates_are_listed_directory_by_directory() {
    let search = ConfigSearch {
        dirs: vec![Utf8PathBuf::from("/a"), Utf8PathBuf::from("/b")],
        name: String::from("prod"),
        format: ConfigFormat::Yaml,
    };
    assert_eq!(
        search.candidates(),
        [
            Utf8PathBuf::from("/a/prod.yaml"),
            Utf8PathBuf::from("/a/prod.yml"),
            Utf8PathBuf::from("/a/prod"),
            Utf8PathBuf::from("/b/prod.yaml"),
            Utf8PathBuf::from("/b/prod.yml"),
            Utf8PathBuf::from("/b/prod"),
        ]
    );
}

#[rstest]
fn find_prefers_earlier_directories(config_dir: ConfigDir) {
    let first = config_dir.write("first/prod.yml", "secret: one\n");
    config_dir.write("second/prod.yaml", "secret: two\n");
    let search = ConfigSearch {
        dirs: vec![config_dir.path.join("first"), config_dir.path.join("second")],
        name: String::from("prod"),
        format: ConfigFormat::Yaml,
    };
    assert_eq!(search.find(), Some(first));
}

#[rstest]
fn find_ignores_directories_named_like_candidates(config_dir: ConfigDir) {
    std::fs::create_dir_all(config_dir.path.join("prod.yaml")).expect("dir should be created");
    let search = ConfigSearch {
        dirs: vec![config_dir.path.clone()],
        name: String::from("prod"),
        format: ConfigFormat::Yaml,
    };
    assert_eq!(search.find(), None);
}

#[rstest]
fn find_accepts_extensionless_file(config_dir: ConfigDir) {
    let bare = config_dir.write("prod", "secret: bare\n");
    let search = ConfigSearch {
        dirs: vec![config_dir.path.clone()],
        name: String::from("prod"),
        format: ConfigFormat::Yaml,
    };
    assert_eq!(search.find(), Some(bare));
}

#[rstest]
fn find_prefers_extension_over_bare_name_in_same_directory(config_dir: ConfigDir) {
    config_dir.write("prod", "secret: bare\n");
    let yml = config_dir.write("prod.yml", "secret: yml\n");
    let search = ConfigSearch {
        dirs: vec![config_dir.path.clone()],
        name: String::from("prod"),
        format: ConfigFormat::Yaml,
    };
    assert_eq!(search.find(), Some(yml));
}
