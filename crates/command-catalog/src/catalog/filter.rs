//! Search and category filtering over a listing snapshot

use crate::types::{CommandRecord, ListQuery};

/// Whether a record matches a lowercased search term
///
/// Title, description, every tag and the body are searched as plain
/// case-insensitive substrings.
pub fn matches_search(record: &CommandRecord, term: &str) -> bool {
    let command = &record.command;

    command.title.to_lowercase().contains(term)
        || command.description.to_lowercase().contains(term)
        || command.tags.iter().any(|tag| tag.to_lowercase().contains(term))
        || command.content.to_lowercase().contains(term)
}

/// Apply a listing query, keeping the input order
pub fn filter_commands<'a>(records: &'a [CommandRecord], query: &ListQuery) -> Vec<&'a CommandRecord> {
    let term = query.search_term();
    let category = query.category_filter();

    records
        .iter()
        .filter(|record| category.map_or(true, |c| record.command.category == c))
        .filter(|record| term.as_deref().map_or(true, |t| matches_search(record, t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParsedCommand;

    fn record(id: &str, title: &str, category: &str, tags: &[&str], content: &str) -> CommandRecord {
        CommandRecord::new(ParsedCommand {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("About {}", title),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: content.to_string(),
        })
    }

    fn sample() -> Vec<CommandRecord> {
        vec![
            record("deploy-django-apache", "Deploy Django with Apache", "Deployment", &["django", "apache"], "sudo apt install apache2"),
            record("postgres-backup", "PostgreSQL Backup", "Database", &["postgres", "backup"], "pg_dump mydb > dump.sql"),
            record("docker-basics", "Docker Basics", "Tools", &["docker", "containers"], "docker run hello-world"),
        ]
    }

    fn ids(records: Vec<&CommandRecord>) -> Vec<&str> {
        records.into_iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_empty_query_returns_all() {
        let records = sample();
        let result = filter_commands(&records, &ListQuery::default());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let result = filter_commands(&records, &ListQuery::new("DOCKER", "All"));
        assert_eq!(ids(result), vec!["docker-basics"]);
    }

    #[test]
    fn test_search_matches_tags_and_content() {
        let records = sample();

        let by_tag = filter_commands(&records, &ListQuery::new("backup", "All"));
        assert_eq!(ids(by_tag), vec!["postgres-backup"]);

        let by_content = filter_commands(&records, &ListQuery::new("apt install", "All"));
        assert_eq!(ids(by_content), vec!["deploy-django-apache"]);
    }

    #[test]
    fn test_category_filter() {
        let records = sample();

        let result = filter_commands(&records, &ListQuery::new("", "Database"));
        assert_eq!(ids(result), vec!["postgres-backup"]);

        // Category match is exact
        let result = filter_commands(&records, &ListQuery::new("", "database"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_and_category_combined() {
        let records = sample();
        let result = filter_commands(&records, &ListQuery::new("docker", "Database"));
        assert!(result.is_empty());
    }
}
