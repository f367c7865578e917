use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use rasoi_config::{RecipeLocator, category_info, registry};
use rasoi_types::Recipe;

const REQUIRED_STRING_FIELDS: &[&str] = &[
    "id",
    "category",
    "title",
    "description",
    "prepTime",
    "cookTime",
    "servings",
];
const REQUIRED_LIST_FIELDS: &[&str] = &["ingredients", "instructions"];

pub struct Report {
    pub checked: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn run(root: &Path) -> Result<()> {
    let report = validate_tree(root, &registry())?;

    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("error: {error}");
    }
    println!(
        "{} files checked, {} errors, {} warnings",
        report.checked,
        report.errors.len(),
        report.warnings.len()
    );

    if !report.errors.is_empty() {
        anyhow::bail!("validation failed");
    }
    Ok(())
}

/// Walks `{root}/recipes/*/*.json` (skipping `template.json`), checks each
/// document, and cross-checks the tree against the registry. Unregistered
/// files are warnings; everything else is an error.
pub fn validate_tree(root: &Path, registered: &[RecipeLocator]) -> Result<Report> {
    let recipes_dir = root.join("recipes");
    let entries = fs::read_dir(&recipes_dir)
        .with_context(|| format!("no recipes directory under {}", root.display()))?;

    let mut checked = 0;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut on_disk = HashSet::new();

    let mut category_dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    category_dirs.sort();

    for dir in category_dirs {
        let category = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for file in files {
            let slug = file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            if slug == "template" {
                continue;
            }

            checked += 1;
            let rel = format!("recipes/{category}/{slug}.json");
            on_disk.insert(rel.clone());
            validate_file(&file, &rel, &category, &slug, &mut errors);
        }
    }

    for locator in registered {
        let rel = locator.rel_path();
        if !on_disk.contains(&rel) {
            errors.push(format!("{rel}: registered but missing on disk"));
        }
    }
    let registered_paths: HashSet<String> = registered.iter().map(|l| l.rel_path()).collect();
    for rel in &on_disk {
        if !registered_paths.contains(rel) {
            warnings.push(format!("{rel}: on disk but not in the registry"));
        }
    }

    errors.sort();
    warnings.sort();
    Ok(Report {
        checked,
        errors,
        warnings,
    })
}

fn validate_file(path: &Path, rel: &str, category: &str, slug: &str, errors: &mut Vec<String>) {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) => {
            errors.push(format!("{rel}: unreadable: {e}"));
            return;
        }
    };
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(e) => {
            errors.push(format!("{rel}: invalid JSON: {e}"));
            return;
        }
    };

    let before = errors.len();

    for field in REQUIRED_STRING_FIELDS {
        match value.get(field) {
            None => errors.push(format!("{rel}: missing required field: {field}")),
            Some(v) if !v.is_string() => {
                errors.push(format!("{rel}: field '{field}' should be a string"));
            }
            _ => {}
        }
    }
    for field in REQUIRED_LIST_FIELDS {
        match value.get(field) {
            None => errors.push(format!("{rel}: missing required field: {field}")),
            Some(Value::Array(items)) if items.is_empty() => {
                errors.push(format!("{rel}: {field} list is empty"));
            }
            Some(Value::Array(_)) => {}
            Some(_) => errors.push(format!("{rel}: field '{field}' should be a list")),
        }
    }

    if let Some(id) = value.get("id").and_then(Value::as_str)
        && id != slug
    {
        errors.push(format!("{rel}: id '{id}' doesn't match filename '{slug}'"));
    }
    if let Some(declared) = value.get("category").and_then(Value::as_str) {
        if declared != category {
            errors.push(format!(
                "{rel}: category '{declared}' doesn't match folder '{category}'"
            ));
        }
        if category_info(declared).is_none() {
            errors.push(format!("{rel}: unknown category '{declared}'"));
        }
    }

    // deeper shape problems (bad video entries etc.) only when the
    // field-level checks came back clean, to keep the output readable
    if errors.len() == before
        && let Err(e) = serde_json::from_value::<Recipe>(value)
    {
        errors.push(format!("{rel}: does not parse as a recipe: {e}"));
    }
}
