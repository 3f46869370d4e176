//! End-to-end tests for the generate command
//!
//! Run with: cargo test --test generate_integration

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use webscript_gen::commands::generate::{self, GenerateArgs};

/// Args for a non-interactive run with an isolated, empty config
fn args_in(dir: &Path) -> GenerateArgs {
    let config = dir.join("webscript-gen.toml");
    fs::write(&config, "").expect("write config");

    GenerateArgs {
        id: Some("User Profile".to_string()),
        language: Some("javascript".to_string()),
        shortname: Some("User profile".to_string()),
        url_templates: Some("users/{user}".to_string()),
        output: dir.join("out"),
        config: Some(config),
        non_interactive: true,
        ..Default::default()
    }
}

fn names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_generate_javascript_defaults() {
    let dir = TempDir::new().unwrap();
    let args = args_in(dir.path());

    let generated = generate::generate(&args, None).expect("generate");

    assert_eq!(
        names(&generated.written),
        vec![
            "user-profile.get.desc.xml",
            "user-profile.get.html.ftl",
            "user-profile.get.properties",
            "user-profile.get_ar.properties",
            "user-profile.get_fr.properties",
            "user-profile.get.js",
        ]
    );

    let desc = fs::read_to_string(dir.path().join("out/user-profile.get.desc.xml")).unwrap();
    assert!(desc.contains("<shortname>User profile</shortname>"));
    assert!(desc.contains("<url>/users/{user}</url>"));
    assert!(desc.contains("<format default=\"html\">any</format>"));
    assert!(desc.contains("<authentication>none</authentication>"));
}

#[test]
fn test_generate_java_controllers_per_method() {
    let dir = TempDir::new().unwrap();
    let mut args = args_in(dir.path());
    args.language = Some("java".to_string());
    args.methods = Some("get,po".to_string());
    args.class_package = Some("com.acme.scripts".to_string());

    let generated = generate::generate(&args, None).expect("generate");
    let written = names(&generated.written);

    assert!(written.contains(&"UserProfileGet.java".to_string()));
    assert!(written.contains(&"UserProfilePost.java".to_string()));
    assert!(written.contains(&"webscript-user-profile-post-context.xml".to_string()));
    assert!(!written.iter().any(|n| n.ends_with(".js")));

    let java = fs::read_to_string(dir.path().join("out/UserProfilePost.java")).unwrap();
    assert!(java.contains("package com.acme.scripts;"));
    assert!(java.contains("public class UserProfilePost extends DeclarativeWebScript"));
}

#[test]
fn test_rerun_requires_force() {
    let dir = TempDir::new().unwrap();
    let mut args = args_in(dir.path());

    generate::generate(&args, None).expect("first run");

    let err = generate::generate(&args, None).unwrap_err();
    assert!(err.to_string().contains("--force"));

    args.force = true;
    let generated = generate::generate(&args, None).expect("forced run");
    assert_eq!(generated.written.len(), generated.files.len());
}

#[test]
fn test_invalid_flag_names_the_flag() {
    let dir = TempDir::new().unwrap();
    let mut args = args_in(dir.path());
    args.methods = Some("get,patch".to_string());

    let err = generate::generate(&args, None).unwrap_err();
    assert!(err.to_string().contains("--methods"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut args = args_in(dir.path());
    args.dry_run = true;

    let generated = generate::generate(&args, None).expect("dry run");

    assert!(generated.written.is_empty());
    assert_eq!(generated.files.len(), 6);
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_config_defaults_and_locales() {
    let dir = TempDir::new().unwrap();
    let mut args = args_in(dir.path());
    let config = dir.path().join("custom.toml");
    fs::write(
        &config,
        r#"
[defaults]
template_formats = ["json", "xml"]
authentication = "user"

[output]
locales = ["en"]
"#,
    )
    .unwrap();
    args.config = Some(config.clone());

    let generated = generate::generate(&args, None).expect("generate");

    assert_eq!(generated.config_source, Some(config));
    assert_eq!(generated.answers.template_formats, vec!["json", "xml"]);
    assert_eq!(generated.answers.format_default, "json");
    assert_eq!(generated.answers.authentication, "user");
    assert_eq!(
        names(&generated.written),
        vec![
            "user-profile.get.desc.xml",
            "user-profile.get.json.ftl",
            "user-profile.get.xml.ftl",
            "user-profile.get.properties",
            "user-profile.get.js",
        ]
    );
}
