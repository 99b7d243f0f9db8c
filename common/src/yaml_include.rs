use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use yaml_rust2::{Yaml, YamlEmitter, YamlLoader};

const INCLUDE_DIRECTIVE: &str = "!include";

/// Load a YAML file, expanding `!include <path>` lines first.
///
/// Included files are resolved relative to the including file and merged in
/// order; keys defined in the including file win over included ones.
pub fn load_yaml_with_includes(path: &Path) -> Result<Yaml, Box<dyn Error + Send + Sync>> {
    let mut chain = Vec::new();
    let merged = load_recursive(path, &mut chain)?;
    debug!(path = %path.display(), "Processed config includes");
    Ok(merged)
}

/// Same as [`load_yaml_with_includes`] but rendered back to a YAML string.
pub fn render_yaml_with_includes(path: &Path) -> Result<String, Box<dyn Error + Send + Sync>> {
    let yaml = load_yaml_with_includes(path)?;
    let mut out = String::new();
    YamlEmitter::new(&mut out).dump(&yaml)?;
    Ok(out)
}

fn load_recursive(
    path: &Path,
    chain: &mut Vec<PathBuf>,
) -> Result<Yaml, Box<dyn Error + Send + Sync>> {
    let canonical = fs::canonicalize(path)
        .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
    if chain.contains(&canonical) {
        return Err(format!("Include cycle detected at {}", path.display()).into());
    }
    chain.push(canonical);

    let contents = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or(Path::new(""));

    let (include_lines, body_lines): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|line| line.trim_start().starts_with(INCLUDE_DIRECTIVE));

    let mut merged: Option<Yaml> = None;
    for line in include_lines {
        let target = line
            .trim_start()
            .trim_start_matches(INCLUDE_DIRECTIVE)
            .trim();
        if target.is_empty() {
            return Err(format!("Empty include directive in {}", path.display()).into());
        }
        let included = load_recursive(&base_dir.join(target), chain)?;
        merged = Some(match merged {
            Some(acc) => merge_yaml(&acc, &included),
            None => included,
        });
    }

    let body = YamlLoader::load_from_str(&body_lines.join("\n"))?
        .into_iter()
        .reduce(|acc, doc| merge_yaml(&acc, &doc))
        .unwrap_or(Yaml::Null);

    chain.pop();

    Ok(match merged {
        Some(includes) => merge_yaml(&includes, &body),
        None => body,
    })
}

/// Deep-merge two YAML documents. Hashes merge key by key, anything else is
/// replaced by the override. A null override keeps the base.
pub fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                let merged = match base_hash.get(key) {
                    Some(base_value) => merge_yaml(base_value, value),
                    None => value.clone(),
                };
                result.insert(key.clone(), merged);
            }
            Yaml::Hash(result)
        }
        (base_value, Yaml::Null) => base_value.clone(),
        (_, override_value) => override_value.clone(),
    }
}
