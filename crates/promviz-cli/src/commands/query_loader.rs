use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use super::{CliError, Result};

/// Query text plus the name used in diagnostics.
pub struct QueryInput {
    pub name: String,
    pub text: String,
}

pub fn load_query(query_path: Option<&Path>, query_text: Option<&str>) -> Result<QueryInput> {
    if let Some(text) = query_text {
        return Ok(QueryInput {
            name: "<query>".to_string(),
            text: text.to_string(),
        });
    }

    let Some(path) = query_path else {
        return Err(CliError::MissingQuery);
    };
    let (name, content) = read_input(Some(path))?;
    // Editors end files with a newline; it is not part of the query.
    let text = content
        .strip_suffix('\n')
        .map(|t| t.strip_suffix('\r').unwrap_or(t))
        .unwrap_or(&content)
        .to_string();
    Ok(QueryInput { name, text })
}

/// Deserializes JSON from a file, or from stdin when `path` is absent or `-`.
pub fn load_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let (name, content) = read_input(path)?;
    parse_json(&name, &content)
}

pub fn parse_json<T: DeserializeOwned>(name: &str, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|source| CliError::InvalidJson {
        path: name.to_string(),
        source,
    })
}

fn read_input(path: Option<&Path>) -> Result<(String, String)> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let content = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Ok((path.display().to_string(), content))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(CliError::Stdin)?;
            Ok(("<stdin>".to_string(), buf))
        }
    }
}
