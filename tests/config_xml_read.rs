//! Verify XML config is parsed and layered without touching user state.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

use file_organizer::config::{
    CONFIG_ENV, default_config_path, load_config_from_xml, load_config_from_xml_path,
};
use file_organizer::{Config, LogLevel, Mode};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let source = td.path().join("downloads");
    let dest = td.path().join("sorted");

    let xml = format!(
        r#"
<config>
  <source>{}</source>
  <dest>{}</dest>
  <mode>watch</mode>
  <dry_run>true</dry_run>
  <recursive>false</recursive>
  <log_level>debug</log_level>
  <stability_interval_ms> 250 </stability_interval_ms>
  <stability_attempts>3</stability_attempts>
  <follow_new_dirs>true</follow_new_dirs>
</config>
"#,
        source.display(),
        dest.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let parsed = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");
    let mut cfg = Config::default();
    parsed.apply(&mut cfg).expect("apply");

    assert_eq!(cfg.source, source);
    assert_eq!(cfg.dest, dest);
    assert_eq!(cfg.mode, Mode::Watch);
    assert!(cfg.dry_run);
    assert!(!cfg.recursive);
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.stability.interval, Duration::from_millis(250));
    assert_eq!(cfg.stability.max_attempts, 3);
    assert!(cfg.follow_new_dirs);
    assert!(!cfg.lock_files);
}

#[test]
fn bad_mode_value_fails_apply() {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(&p, "<config><mode>hourly</mode></config>").unwrap();

    let parsed = load_config_from_xml_path(&p).unwrap();
    assert!(parsed.apply(&mut Config::default()).is_err());
}

#[test]
fn malformed_xml_is_an_error() {
    let td = tempdir().unwrap();
    let p = td.path().join("config.xml");
    fs::write(&p, "<config><source>/a</dest></config>").unwrap();
    assert!(load_config_from_xml_path(&p).is_err());
}

#[test]
#[serial]
fn env_override_selects_config_file() {
    let td = tempdir().unwrap();
    let p = td.path().join("custom.xml");
    fs::write(&p, "<config><dest>/srv/sorted</dest></config>").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &p);
    }
    let resolved = default_config_path();
    let loaded = load_config_from_xml();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    assert_eq!(resolved, Some(p.clone()));
    let (path, xml) = loaded.unwrap().expect("config file present");
    assert_eq!(path, p);
    assert_eq!(xml.dest.as_deref(), Some("/srv/sorted"));
}

#[test]
#[serial]
fn missing_env_file_means_no_overrides() {
    let td = tempdir().unwrap();
    unsafe {
        std::env::set_var(CONFIG_ENV, td.path().join("absent.xml"));
    }
    let loaded = load_config_from_xml();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
    assert!(loaded.unwrap().is_none());
    assert_eq!(Config::default().source, PathBuf::from("."));
}
