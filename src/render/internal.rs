//! Internal implementation for the render module

use anyhow::{Context, Result};
use convert_case::{Case, Casing};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::GeneratedFile;
use crate::answers::Answers;

// =============================================================================
// Embedded Templates
// =============================================================================

mod templates {
    pub const DESC_XML: &str = include_str!("../../resources/templates/desc.xml");
    pub const CONTROLLER_JS: &str = include_str!("../../resources/templates/controller.js");
    pub const CONTROLLER_JAVA: &str =
        include_str!("../../resources/templates/DeclarativeWebScript.java");
    pub const CONTEXT_XML: &str = include_str!("../../resources/templates/webscript-context.xml");

    // Response formats
    pub const HTML_FTL: &str = include_str!("../../resources/templates/html.ftl");
    pub const JSON_FTL: &str = include_str!("../../resources/templates/json.ftl");
    pub const XML_FTL: &str = include_str!("../../resources/templates/xml.ftl");
    pub const CSV_FTL: &str = include_str!("../../resources/templates/csv.ftl");
    pub const ATOM_FTL: &str = include_str!("../../resources/templates/atom.ftl");
    pub const RSS_FTL: &str = include_str!("../../resources/templates/rss.ftl");

    // Locales
    pub const EN_PROPERTIES: &str = include_str!("../../resources/templates/en.properties");
    pub const AR_PROPERTIES: &str = include_str!("../../resources/templates/ar.properties");
    pub const FR_PROPERTIES: &str = include_str!("../../resources/templates/fr.properties");
}

const TEMPLATES: [(&str, &str); 13] = [
    ("desc.xml", templates::DESC_XML),
    ("controller.js", templates::CONTROLLER_JS),
    ("DeclarativeWebScript.java", templates::CONTROLLER_JAVA),
    ("webscript-context.xml", templates::CONTEXT_XML),
    ("html.ftl", templates::HTML_FTL),
    ("json.ftl", templates::JSON_FTL),
    ("xml.ftl", templates::XML_FTL),
    ("csv.ftl", templates::CSV_FTL),
    ("atom.ftl", templates::ATOM_FTL),
    ("rss.ftl", templates::RSS_FTL),
    ("en.properties", templates::EN_PROPERTIES),
    ("ar.properties", templates::AR_PROPERTIES),
    ("fr.properties", templates::FR_PROPERTIES),
];

/// Look up the embedded template name for a format or locale
fn template_name(file: &str) -> Result<&'static str> {
    TEMPLATES
        .iter()
        .map(|(name, _)| *name)
        .find(|name| *name == file)
        .with_context(|| format!("No template named '{}'", file))
}

fn xml_escape(value: String) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Text safe inside a `/* */` block comment, on one line
fn comment_escape(value: String) -> String {
    value.replace("*/", "*\\/").replace(['\r', '\n'], " ")
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("xml", xml_escape);
    env.add_filter("comment", comment_escape);

    for (name, source) in TEMPLATES {
        env.add_template(name, source)
            .with_context(|| format!("Invalid template {}", name))?;
    }
    Ok(env)
}

// =============================================================================
// Naming
// =============================================================================

pub fn class_name(id: &str, method: &str) -> String {
    format!("{}{}", id.to_case(Case::Pascal), method.to_case(Case::Pascal))
}

fn locale_file(id: &str, method: &str, locale: &str) -> String {
    if locale == "en" {
        format!("{}.{}.properties", id, method)
    } else {
        format!("{}.{}_{}.properties", id, method, locale)
    }
}

/// Answers plus the values derived for one method
#[derive(Serialize)]
struct MethodContext<'a> {
    #[serde(flatten)]
    answers: &'a Answers,
    method: &'a str,
    class_name: String,
    qualified_class_name: String,
    bean_id: String,
}

impl<'a> MethodContext<'a> {
    fn new(answers: &'a Answers, method: &'a str) -> Self {
        let class_name = class_name(&answers.id, method);
        Self {
            qualified_class_name: format!("{}.{}", answers.class_package, class_name),
            bean_id: format!(
                "webscript.{}.{}.{}",
                answers.class_package, answers.id, method
            ),
            class_name,
            answers,
            method,
        }
    }
}

// =============================================================================
// Plan
// =============================================================================

fn render(
    env: &Environment<'_>,
    path: String,
    template: &'static str,
    ctx: &MethodContext<'_>,
) -> Result<GeneratedFile> {
    let content = env
        .get_template(template)?
        .render(ctx)
        .with_context(|| format!("Failed to render {} from {}", path, template))?;
    debug!(path = %path, template, "rendered");
    Ok(GeneratedFile {
        path: PathBuf::from(path),
        template,
        content,
    })
}

pub fn plan(answers: &Answers, locales: &[String]) -> Result<Vec<GeneratedFile>> {
    let env = environment()?;
    let mut files = Vec::new();

    for method in &answers.methods {
        let ctx = MethodContext::new(answers, method);
        let id = &answers.id;

        files.push(render(
            &env,
            format!("{}.{}.desc.xml", id, method),
            "desc.xml",
            &ctx,
        )?);

        for format in &answers.template_formats {
            let template = template_name(&format!("{}.ftl", format))?;
            files.push(render(
                &env,
                format!("{}.{}.{}.ftl", id, method, format),
                template,
                &ctx,
            )?);
        }

        for locale in locales {
            let template = template_name(&format!("{}.properties", locale))?;
            files.push(render(&env, locale_file(id, method, locale), template, &ctx)?);
        }

        if answers.language.includes_javascript() {
            files.push(render(
                &env,
                format!("{}.{}.js", id, method),
                "controller.js",
                &ctx,
            )?);
        }

        if answers.language.includes_java() {
            files.push(render(
                &env,
                format!("{}.java", ctx.class_name),
                "DeclarativeWebScript.java",
                &ctx,
            )?);
            files.push(render(
                &env,
                format!("webscript-{}-{}-context.xml", id, method),
                "webscript-context.xml",
                &ctx,
            )?);
        }
    }

    Ok(files)
}

// =============================================================================
// Write
// =============================================================================

pub fn write(files: &[GeneratedFile], output_dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    if !overwrite {
        let existing: Vec<String> = files
            .iter()
            .map(|f| output_dir.join(&f.path))
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .collect();
        if !existing.is_empty() {
            anyhow::bail!(
                "Refusing to overwrite existing files:\n  {}\n\
                 Use --force to replace them.",
                existing.join("\n  ")
            );
        }
    }

    let blocked: Vec<String> = files
        .iter()
        .map(|f| output_dir.join(&f.path))
        .filter(|p| p.is_dir())
        .map(|p| p.display().to_string())
        .collect();
    if !blocked.is_empty() {
        anyhow::bail!(
            "Cannot write over directories:\n  {}",
            blocked.join("\n  ")
        );
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    // Stage everything next to its target, then move into place
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());
    for file in files {
        let path = output_dir.join(&file.path);
        let staging = staging_path(&path);
        if let Err(e) = stage(&staging, &file.content) {
            discard(&staged);
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        staged.push((staging, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (staging, path) in &staged {
        info!("Generating {}", path.display());
        fs::rename(staging, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path.clone());
    }

    Ok(written)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".webscript-gen.tmp");
    path.with_file_name(name)
}

fn stage(staging: &Path, content: &str) -> Result<()> {
    if let Some(parent) = staging.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(staging, content)
        .with_context(|| format!("Failed to write {}", staging.display()))
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(e) = fs::remove_file(staging) {
            debug!("Could not remove {}: {}", staging.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::Language;
    use tempfile::TempDir;

    fn answers(language: Language) -> Answers {
        Answers {
            id: "user-profile".to_string(),
            language,
            methods: vec!["get".to_string(), "put".to_string()],
            template_formats: vec!["html".to_string(), "json".to_string()],
            shortname: "User <profile>".to_string(),
            description: "Reads & updates a profile".to_string(),
            url_templates: vec!["/users/{user}".to_string(), "/me".to_string()],
            format_selector: "argument".to_string(),
            format_default: "json".to_string(),
            authentication: "user".to_string(),
            authentication_runas: String::new(),
            class_package: "com.example.ws".to_string(),
        }
    }

    fn en() -> Vec<String> {
        vec!["en".to_string()]
    }

    fn paths(files: &[GeneratedFile]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.path.display().to_string())
            .collect()
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("user-profile", "get"), "UserProfileGet");
        assert_eq!(class_name("a", "delete"), "ADelete");
        assert_eq!(class_name("v-2-api", "post"), "V2ApiPost");
    }

    #[test]
    fn test_every_template_is_registered() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_plan_for_javascript() {
        let files = plan(&answers(Language::JavaScript), &en()).unwrap();
        assert_eq!(
            paths(&files),
            vec![
                "user-profile.get.desc.xml",
                "user-profile.get.html.ftl",
                "user-profile.get.json.ftl",
                "user-profile.get.properties",
                "user-profile.get.js",
                "user-profile.put.desc.xml",
                "user-profile.put.html.ftl",
                "user-profile.put.json.ftl",
                "user-profile.put.properties",
                "user-profile.put.js",
            ]
        );
    }

    #[test]
    fn test_plan_for_java_with_locales() {
        let locales: Vec<String> = crate::render::LOCALES.iter().map(|l| l.to_string()).collect();
        let mut answers = answers(Language::Java);
        answers.methods = vec!["get".to_string()];
        answers.template_formats = vec!["xml".to_string()];

        let files = plan(&answers, &locales).unwrap();
        assert_eq!(
            paths(&files),
            vec![
                "user-profile.get.desc.xml",
                "user-profile.get.xml.ftl",
                "user-profile.get.properties",
                "user-profile.get_ar.properties",
                "user-profile.get_fr.properties",
                "UserProfileGet.java",
                "webscript-user-profile-get-context.xml",
            ]
        );
    }

    #[test]
    fn test_both_languages_generate_both_controllers() {
        let files = plan(&answers(Language::Both), &en()).unwrap();
        let names = paths(&files);
        assert!(names.contains(&"user-profile.get.js".to_string()));
        assert!(names.contains(&"UserProfilePut.java".to_string()));
        assert!(names.contains(&"webscript-user-profile-put-context.xml".to_string()));
    }

    #[test]
    fn test_descriptor_content() {
        let files = plan(&answers(Language::JavaScript), &en()).unwrap();
        let desc = &files[0].content;

        assert!(desc.contains("<shortname>User &lt;profile&gt;</shortname>"));
        assert!(desc.contains("<description>Reads &amp; updates a profile</description>"));
        assert!(desc.contains("  <url>/users/{user}</url>\n  <url>/me</url>\n"));
        assert!(desc.contains(r#"<format default="json">argument</format>"#));
        assert!(desc.contains("<authentication>user</authentication>"));
    }

    #[test]
    fn test_descriptor_runas() {
        let mut answers = answers(Language::JavaScript);
        answers.authentication_runas = "admin".to_string();
        let files = plan(&answers, &en()).unwrap();
        assert!(files[0]
            .content
            .contains(r#"<authentication runas="admin">user</authentication>"#));
    }

    #[test]
    fn test_java_controller_content() {
        let files = plan(&answers(Language::Java), &en()).unwrap();
        let java = files
            .iter()
            .find(|f| f.path == Path::new("UserProfileGet.java"))
            .unwrap();
        assert!(java.content.starts_with("package com.example.ws;\n"));
        assert!(java
            .content
            .contains("public class UserProfileGet extends DeclarativeWebScript"));

        let context = files
            .iter()
            .find(|f| f.path == Path::new("webscript-user-profile-get-context.xml"))
            .unwrap();
        assert!(context.content.contains(
            r#"<bean id="webscript.com.example.ws.user-profile.get" class="com.example.ws.UserProfileGet""#
        ));
    }

    #[test]
    fn test_controller_comments_stay_closed() {
        let mut answers = answers(Language::Both);
        answers.methods = vec!["get".to_string()];
        answers.shortname = "Ends */ early".to_string();
        answers.url_templates = vec!["/files/*/meta".to_string()];
        let files = plan(&answers, &en()).unwrap();

        for name in ["user-profile.get.js", "UserProfileGet.java"] {
            let source = &files
                .iter()
                .find(|f| f.path == Path::new(name))
                .unwrap()
                .content;
            assert_eq!(source.matches("*/").count(), 1, "{}", name);
            assert!(source.contains(" * Ends *\\/ early\n"), "{}", name);
        }
    }

    #[test]
    fn test_comment_escape() {
        assert_eq!(comment_escape("a */ b".to_string()), "a *\\/ b");
        assert_eq!(comment_escape("one\ntwo".to_string()), "one two");
        assert_eq!(comment_escape("/users/*".to_string()), "/users/*");
    }

    #[test]
    fn test_freemarker_syntax_is_left_alone() {
        let files = plan(&answers(Language::JavaScript), &en()).unwrap();
        let html = &files[1].content;
        assert!(html.contains("${msg(\"data.label\")}: ${data}"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_unknown_locale_fails() {
        let err = plan(&answers(Language::Java), &["de".to_string()]).unwrap_err();
        assert!(err.to_string().contains("de.properties"));
    }

    #[test]
    fn test_write_refuses_to_overwrite() -> Result<()> {
        let temp = TempDir::new()?;
        let files = plan(&answers(Language::JavaScript), &en())?;

        let written = write(&files, temp.path(), false)?;
        assert_eq!(written.len(), files.len());
        assert!(temp.path().join("user-profile.put.js").exists());

        let err = write(&files, temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write(&files, temp.path(), true)?;
        Ok(())
    }

    fn file(path: &str, content: &str) -> GeneratedFile {
        GeneratedFile {
            path: PathBuf::from(path),
            template: "desc.xml",
            content: content.to_string(),
        }
    }

    #[test]
    fn test_write_rejects_directory_in_the_way() -> Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir(temp.path().join("b.xml"))?;
        let files = [file("a.xml", "a"), file("b.xml", "b")];

        let err = write(&files, temp.path(), true).unwrap_err();
        assert!(err.to_string().contains("b.xml"));
        assert!(!temp.path().join("a.xml").exists());
        Ok(())
    }

    #[test]
    fn test_failed_write_keeps_existing_files() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("a.xml"), "old")?;
        // A plain file where a directory is needed
        fs::write(temp.path().join("blocker"), "")?;
        let files = [file("a.xml", "new"), file("blocker/b.xml", "b")];

        assert!(write(&files, temp.path(), true).is_err());
        assert_eq!(fs::read_to_string(temp.path().join("a.xml"))?, "old");

        let leftovers: Vec<_> = fs::read_dir(temp.path())?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        Ok(())
    }
}
