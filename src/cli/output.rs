//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;
use serde_json::Value as JsonValue;

use crate::credentials::{Credential, CredentialPath, FoundCredential};

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print one credential version as `key: value` lines.
pub fn print_credential(credential: &Credential) {
    for line in credential_lines(credential) {
        println!("{line}");
    }
}

/// The lines `print_credential` writes.
///
/// Object values are nested two spaces deeper; multi-line strings (PEM
/// blocks) are written as `|` blocks.
pub fn credential_lines(credential: &Credential) -> Vec<String> {
    let mut lines = vec![
        format!("id: {}", credential.id),
        format!("name: {}", credential.name),
        format!("type: {}", credential.credential_type),
    ];
    push_field(&mut lines, 0, "value", &credential.value);
    lines.push(format!(
        "version_created_at: {}",
        credential.version_created_at
    ));
    lines
}

/// Render a bare JSON value the way `--key` prints it: strings raw, the rest as JSON.
pub fn scalar_or_json(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Print a table of search matches (Name, Updated).
pub fn print_found_table(found: &[FoundCredential]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Updated"]);

    for cred in found {
        table.add_row(vec![cred.name.clone(), cred.version_created_at.clone()]);
    }

    println!("{table}");
}

/// Print a table of credential paths.
pub fn print_paths_table(paths: &[CredentialPath]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Path"]);

    for path in paths {
        table.add_row(vec![path.path.clone()]);
    }

    println!("{table}");
}

fn push_field(lines: &mut Vec<String>, depth: usize, key: &str, value: &JsonValue) {
    let indent = "  ".repeat(depth);
    match value {
        JsonValue::Object(map) if !map.is_empty() => {
            lines.push(format!("{indent}{key}:"));
            for (k, v) in map {
                push_field(lines, depth + 1, k, v);
            }
        }
        JsonValue::String(s) if s.contains('\n') => {
            lines.push(format!("{indent}{key}: |"));
            for part in s.trim_end_matches('\n').lines() {
                lines.push(format!("{indent}  {part}"));
            }
        }
        JsonValue::String(s) => lines.push(format!("{indent}{key}: {s}")),
        other => lines.push(format!("{indent}{key}: {other}")),
    }
}
