//! `folio check`: validate document payloads without touching the network.

use crate::log;
use crate::schema::{SchemaError, validate_document};
use anyhow::{Context, bail};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

pub fn run(paths: &[PathBuf]) -> anyhow::Result<()> {
    let mut checked = 0usize;
    let mut invalid = 0usize;

    for path in paths {
        let raw = read_input(path)?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", display_name(path)))?;

        // a file may hold one document or an array of them
        let documents = match value {
            Value::Array(items) => items,
            other => vec![other],
        };

        for (i, document) in documents.iter().enumerate() {
            checked += 1;
            if let Err(err) = validate_document(document) {
                invalid += 1;
                report(path, i, documents.len(), &err);
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} of {checked} documents failed validation");
    }
    log!("check"; "{checked} documents valid");
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("could not read stdin")?;
        Ok(raw)
    } else {
        fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
    }
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

fn report(path: &Path, index: usize, total: usize, err: &SchemaError) {
    if total > 1 {
        log!("error"; "{}[{index}]:\n{err}", display_name(path));
    } else {
        log!("error"; "{}:\n{err}", display_name(path));
    }
}
