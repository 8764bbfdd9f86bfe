//! README prompt rendering.
//!
//! File contents are cut at [`MAX_FILE_CHARS`] characters before they are embedded.

use serde_json::Value;

use crate::github::models::SourceFile;

pub const MAX_FILE_CHARS: usize = 5000;
pub const TRUNCATION_MARKER: &str = "...";

/// First `MAX_FILE_CHARS` characters plus the marker; shorter content is untouched.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_FILE_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &content[..cut]),
        None => content.to_string(),
    }
}

/// `File: {path}` header and fenced content per file, files separated by a blank line.
pub fn render_files(files: &[SourceFile]) -> String {
    files
        .iter()
        .map(|file| {
            format!(
                "File: {}\n```\n{}\n```",
                file.path,
                truncate_content(&file.content)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub fn build_readme_prompt(repo: &Value, files: &[SourceFile]) -> String {
    let name = str_field(repo, "name").unwrap_or_default();
    let description = str_field(repo, "description").unwrap_or("No description provided");
    let language = str_field(repo, "language").unwrap_or("Not specified");
    let owner = repo
        .get("owner")
        .and_then(|o| str_field(o, "login"))
        .unwrap_or_default();
    let files_text = render_files(files);

    format!(
        r#"You are a technical writer specializing in creating clear, informative README.md files for GitHub projects.
Create a comprehensive README.md for this repository based on the code and files provided.

Repository information:
- Name: {name}
- Description: {description}
- Language: {language}
- Created by: {owner}

Here are some files from the repository:
{files_text}

Create a README.md in markdown format that includes:
1. Project title and description
2. Features
3. Installation instructions
4. Usage examples
5. Technologies used
6. Project structure
7. Contributing guidelines
8. License information (if available)

Make sure the README is well-formatted, professional, and provides a clear overview of the project."#
    )
}
