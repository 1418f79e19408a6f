//! Frontmatter parser and validator for command guide documents
//!
//! A command guide is a markdown file with a metadata block at the top:
//!
//! ```text
//! ---
//! id: docker-basics
//! title: Docker Basics
//! description: Intro to Docker
//! category: Tools
//! tags: docker, containers
//! ---
//! # Docker Basics
//! ...
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ValidationError, ID_PATTERN};
use crate::types::ParsedCommand;

/// Keys every document must define, in reporting order
pub const REQUIRED_FIELDS: [&str; 5] = ["id", "title", "description", "category", "tags"];

/// Leading `---` line, lazily captured metadata, closing `---` line, body
static DOCUMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\A\s*---[ \t]*\r?\n(?P<front>.*?)(?m:^)---[ \t]*\r?(?:\n|\z)(?P<body>.*)\z")
        .expect("Invalid regex")
});

static ID_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(ID_PATTERN).expect("Invalid regex"));

/// Key/value metadata from the frontmatter block, in first-seen key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    /// Parse the lines of a frontmatter block
    ///
    /// Each line is split on its first colon only. Lines without a colon or
    /// with an empty key are skipped. A repeated key overwrites the earlier
    /// value.
    pub fn parse(block: &str) -> Self {
        let mut frontmatter = Self::default();

        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            frontmatter.insert(key, value.trim());
        }

        frontmatter
    }

    /// Set a key, replacing any existing value
    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Value for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for a key if present and non-empty
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a document into its frontmatter block and trimmed body
pub fn split_document(raw: &str) -> Result<(Frontmatter, String), ValidationError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let captures = DOCUMENT_PATTERN
        .captures(raw)
        .ok_or(ValidationError::MalformedStructure)?;

    let front = captures.name("front").map(|m| m.as_str()).unwrap_or("");
    let body = captures.name("body").map(|m| m.as_str()).unwrap_or("");

    Ok((Frontmatter::parse(front), body.trim().to_string()))
}

/// Split a raw tags value into normalized tags
///
/// Comma separated, each trimmed and lowercased, empties dropped.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Whether `id` is kebab-case
pub fn is_valid_id(id: &str) -> bool {
    ID_REGEX.is_match(id)
}

/// Parse and validate a command guide document
///
/// Checks run in a fixed order and the first failure is returned:
/// structure, required fields, tags, id.
pub fn parse(raw: &str) -> Result<ParsedCommand, ValidationError> {
    let (frontmatter, content) = split_document(raw)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| frontmatter.non_empty(field).is_none())
        .map(|field| field.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    // Presence of every required field was checked above
    let field = |key: &str| frontmatter.get(key).unwrap_or_default().to_string();

    let tags = normalize_tags(&field("tags"));
    if tags.is_empty() {
        return Err(ValidationError::EmptyTags);
    }

    let id = field("id");
    if !is_valid_id(&id) {
        return Err(ValidationError::InvalidId(id));
    }

    Ok(ParsedCommand {
        id,
        title: field("title"),
        description: field("description"),
        category: field("category"),
        tags,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCKER_BASICS: &str = "---
id: docker-basics
title: Docker Basics
description: Intro to Docker
category: Tools
tags: docker, containers
---
# Docker Basics
content here
";

    fn document(fields: &[(&str, &str)], body: &str) -> String {
        let mut doc = String::from("---\n");
        for (key, value) in fields {
            doc.push_str(&format!("{}: {}\n", key, value));
        }
        doc.push_str("---\n");
        doc.push_str(body);
        doc
    }

    fn valid_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("id", "docker-basics"),
            ("title", "Docker Basics"),
            ("description", "Intro to Docker"),
            ("category", "Tools"),
            ("tags", "docker, containers"),
        ]
    }

    #[test]
    fn test_parse_docker_basics() {
        let command = parse(DOCKER_BASICS).unwrap();

        assert_eq!(
            command,
            ParsedCommand {
                id: "docker-basics".to_string(),
                title: "Docker Basics".to_string(),
                description: "Intro to Docker".to_string(),
                category: "Tools".to_string(),
                tags: vec!["docker".to_string(), "containers".to_string()],
                content: "# Docker Basics\ncontent here".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(DOCKER_BASICS), parse(DOCKER_BASICS));
    }

    #[test]
    fn test_round_trip_through_markdown() {
        let command = parse(DOCKER_BASICS).unwrap();
        let reparsed = parse(&command.to_markdown()).unwrap();
        assert_eq!(command, reparsed);
    }

    #[test]
    fn test_fields_are_normalized() {
        let doc = "---\n  id :  nginx-setup  \ntitle:   Nginx Setup \ndescription: Serve it\ncategory:  Server Setup\ntags:  Nginx , WEB,,  Linux \n---\n\n\n  body text  \n\n";
        let command = parse(doc).unwrap();

        assert_eq!(command.id, "nginx-setup");
        assert_eq!(command.title, "Nginx Setup");
        assert_eq!(command.category, "Server Setup");
        assert_eq!(command.tags, vec!["nginx", "web", "linux"]);
        assert_eq!(command.content, "body text");
    }

    #[test]
    fn test_no_delimiters_is_malformed() {
        let result = parse("# Docker Basics\nid: docker-basics\n");
        assert_eq!(result, Err(ValidationError::MalformedStructure));
    }

    #[test]
    fn test_unclosed_block_is_malformed() {
        let result = parse("---\nid: docker-basics\ntitle: Docker\n# body\n");
        assert_eq!(result, Err(ValidationError::MalformedStructure));
    }

    #[test]
    fn test_block_must_start_the_document() {
        let result = parse("intro\n---\nid: docker-basics\n---\nbody");
        assert_eq!(result, Err(ValidationError::MalformedStructure));
    }

    #[test]
    fn test_leading_whitespace_and_crlf_accepted() {
        let doc = "\n  \r\n---\r\nid: git-tips\r\ntitle: Git Tips\r\ndescription: Handy git\r\ncategory: Tools\r\ntags: git\r\n---\r\nUse rebase.\r\n";
        let command = parse(doc).unwrap();
        assert_eq!(command.id, "git-tips");
        assert_eq!(command.tags, vec!["git"]);
        assert_eq!(command.content, "Use rebase.");
    }

    #[test]
    fn test_empty_frontmatter_reports_every_field() {
        let result = parse("---\n---\nbody");
        assert_eq!(
            result,
            Err(ValidationError::MissingFields(
                REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect()
            ))
        );
    }

    #[test]
    fn test_missing_fields_exact() {
        let fields: Vec<_> = valid_fields()
            .into_iter()
            .filter(|(k, _)| *k != "title" && *k != "tags")
            .collect();

        let result = parse(&document(&fields, "body"));
        assert_eq!(
            result,
            Err(ValidationError::MissingFields(vec![
                "title".to_string(),
                "tags".to_string()
            ]))
        );
    }

    #[test]
    fn test_missing_fields_every_subset() {
        let fields = valid_fields();

        // Bit i set means REQUIRED_FIELDS[i] is removed
        for mask in 1u32..(1 << REQUIRED_FIELDS.len()) {
            let removed = |key: &str| {
                let index = REQUIRED_FIELDS.iter().position(|f| *f == key).unwrap();
                mask & (1 << index) != 0
            };

            let kept: Vec<_> = fields.iter().copied().filter(|(k, _)| !removed(k)).collect();
            let expected: Vec<String> = REQUIRED_FIELDS
                .iter()
                .filter(|f| removed(f))
                .map(|f| f.to_string())
                .collect();

            assert_eq!(
                parse(&document(&kept, "body")),
                Err(ValidationError::MissingFields(expected)),
                "mask {:05b}",
                mask
            );
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut fields = valid_fields();
        fields[2] = ("description", "   ");

        let result = parse(&document(&fields, "body"));
        assert_eq!(
            result,
            Err(ValidationError::MissingFields(vec!["description".to_string()]))
        );
    }

    #[test]
    fn test_missing_fields_checked_before_id() {
        let fields = [("id", "Not_Kebab"), ("title", "X")];
        let result = parse(&document(&fields, "body"));
        assert!(matches!(result, Err(ValidationError::MissingFields(_))));
    }

    #[test]
    fn test_comma_only_tags_rejected() {
        let mut fields = valid_fields();
        fields[4] = ("tags", " , , ");

        let result = parse(&document(&fields, "body"));
        assert_eq!(result, Err(ValidationError::EmptyTags));
    }

    #[test]
    fn test_empty_tags_checked_before_id() {
        let mut fields = valid_fields();
        fields[0] = ("id", "Bad Id");
        fields[4] = ("tags", ",");

        let result = parse(&document(&fields, "body"));
        assert_eq!(result, Err(ValidationError::EmptyTags));
    }

    #[test]
    fn test_invalid_ids_rejected() {
        for bad in ["Docker_Basics", "-bad", "bad-", "docker--basics", "docker basics", "DOCKER"] {
            let mut fields = valid_fields();
            fields[0] = ("id", bad);

            let result = parse(&document(&fields, "body"));
            assert_eq!(
                result,
                Err(ValidationError::InvalidId(bad.to_string())),
                "id {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_valid_ids_accepted() {
        for good in ["docker", "docker-basics", "k8s-101", "a-b-c-1"] {
            assert!(is_valid_id(good), "id {:?} should be accepted", good);
        }
    }

    #[test]
    fn test_value_keeps_colons_after_first() {
        let mut fields = valid_fields();
        fields[2] = ("description", "See https://example.com:8080/docs");

        let command = parse(&document(&fields, "body")).unwrap();
        assert_eq!(command.description, "See https://example.com:8080/docs");
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let doc = "---\nid: docker-basics\njust a note\ntitle: Docker Basics\ndescription: Intro\n: orphan value\ncategory: Tools\ntags: docker\n---\nbody";
        let command = parse(doc).unwrap();
        assert_eq!(command.title, "Docker Basics");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let block = "title: First\ncategory: Tools\ntitle: Second\n";
        let frontmatter = Frontmatter::parse(block);

        assert_eq!(frontmatter.get("title"), Some("Second"));
        assert_eq!(frontmatter.len(), 2);
        let keys: Vec<&str> = frontmatter.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["title", "category"]);
    }

    #[test]
    fn test_body_may_contain_rules() {
        let body = "# Title\n\n---\n\nmore text";
        let command = parse(&document(&valid_fields(), body)).unwrap();
        assert_eq!(command.content, body);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let doc = format!("\u{feff}{}", DOCKER_BASICS);
        assert!(parse(&doc).is_ok());
    }
}
