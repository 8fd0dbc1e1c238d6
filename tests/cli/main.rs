use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;

mod generate;
mod init;
mod inspect;

const BIN_NAME: &str = "dipgen";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the config search from leaving the project.
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Write a Swift source plus the SourceKitten dumps dipgen reads.
    pub fn write_swift(&self, path: &str, source: &str, declarations: Vec<Value>) -> Result<()> {
        self.write_file(path, source)?;
        self.write_file(
            &format!("{}.structure.json", path),
            &json!({ "key.substructure": declarations }).to_string(),
        )?;
        self.write_file(
            &format!("{}.syntax.json", path),
            &Value::Array(syntax_tokens(source)).to_string(),
        )?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate");
        cmd
    }

    pub fn inspect_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("inspect");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn run(mut cmd: Command) -> Result<(Output, String, String)> {
    let output = cmd.output().context("Failed to run dipgen")?;
    let stdout = String::from_utf8(output.stdout.clone())?;
    let stderr = String::from_utf8(output.stderr.clone())?;
    Ok((output, stdout, stderr))
}

// ============================================================
// SourceKit dump builders
// ============================================================

pub fn offset(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("`{}` not found in source", needle))
}

pub fn class(source: &str, name: &str, children: Vec<Value>) -> Value {
    json!({
        "key.kind": "source.lang.swift.decl.class",
        "key.name": name,
        "key.offset": offset(source, &format!("class {}", name)),
        "key.substructure": children,
    })
}

/// An instance method found at `needle`, with `(internal name, type)` parameters.
pub fn method(source: &str, needle: &str, name: &str, parameters: &[(&str, &str)]) -> Value {
    let at = offset(source, needle);
    let parameters: Vec<Value> = parameters
        .iter()
        .map(|(param, type_name)| {
            json!({
                "key.kind": "source.lang.swift.decl.var.parameter",
                "key.name": param,
                "key.offset": at,
                "key.typename": type_name,
            })
        })
        .collect();
    json!({
        "key.kind": "source.lang.swift.decl.function.method.instance",
        "key.name": name,
        "key.offset": at,
        "key.substructure": parameters,
    })
}

pub fn property(source: &str, name: &str, type_name: &str) -> Value {
    json!({
        "key.kind": "source.lang.swift.decl.var.instance",
        "key.name": name,
        "key.offset": offset(source, &format!("var {}", name)),
        "key.typename": type_name,
    })
}

/// Comment tokens, `import` keywords and one identifier per other word.
fn syntax_tokens(source: &str) -> Vec<Value> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    let token = |kind: &str, start: usize, end: usize| {
        json!({
            "type": format!("source.lang.swift.syntaxtype.{}", kind),
            "offset": start,
            "length": end - start,
        })
    };

    while i < bytes.len() {
        let rest = &source[i..];
        if rest.starts_with("/*") {
            let end = rest.find("*/").map_or(source.len(), |e| i + e + 2);
            let kind = if rest.starts_with("/**") { "doccomment" } else { "comment" };
            tokens.push(token(kind, i, end));
            i = end;
        } else if rest.starts_with("//") {
            let end = rest.find('\n').map_or(source.len(), |e| i + e);
            let kind = if rest.starts_with("///") { "doccomment" } else { "comment" };
            tokens.push(token(kind, i, end));
            i = end;
        } else if bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            let kind = if &rest[..len] == "import" { "keyword" } else { "identifier" };
            tokens.push(token(kind, i, i + len));
            i += len;
        } else {
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    tokens
}
