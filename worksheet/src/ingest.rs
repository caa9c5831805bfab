use crate::customer::{InputCustomer, Record};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load customers from a `.json`/`.jsonl` file, or every such file under a directory.
/// Files are read in path order so document ids are reproducible.
pub fn load_records(input: &Path) -> Result<Vec<Record>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input {} does not exist", input.display());
    }

    let mut records = Vec::new();
    for file in files {
        let before = records.len();
        if extension(&file) == Some("jsonl") {
            load_jsonl(&file, &mut records)?;
        } else {
            load_json(&file, &mut records)?;
        }
        tracing::info!(file = %file.display(), records = records.len() - before, "loaded customers");
    }
    Ok(records)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

fn load_jsonl(file: &Path, out: &mut Vec<Record>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let input: InputCustomer = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid customer", file.display(), n + 1))?;
        out.push(input.into());
    }
    Ok(())
}

fn load_json(file: &Path, out: &mut Vec<Record>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("{}: invalid json", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let input: InputCustomer = serde_json::from_value(v)
                    .with_context(|| format!("{}: invalid customer", file.display()))?;
                out.push(input.into());
            }
        }
        serde_json::Value::Object(_) => {
            let input: InputCustomer = serde_json::from_value(json)
                .with_context(|| format!("{}: invalid customer", file.display()))?;
            out.push(input.into());
        }
        _ => tracing::warn!(file = %file.display(), "expected a customer object or array, skipping"),
    }
    Ok(())
}
