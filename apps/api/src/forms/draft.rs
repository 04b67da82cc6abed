//! The "add item" input behind list fields (an achievement, a technology).

/// Appends the trimmed `raw` input to `list`.
///
/// Blank input and items already in `list` are rejected and leave `list`
/// untouched; the caller keeps whatever the user typed.
pub fn commit_item(list: &mut Vec<String>, raw: &str) -> bool {
    let item = raw.trim();
    if item.is_empty() || list.iter().any(|existing| existing == item) {
        return false;
    }
    list.push(item.to_string());
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_trims_and_appends() {
        let mut list = vec!["Led migration".to_string()];
        assert!(commit_item(&mut list, "  Mentored 4 engineers "));
        assert_eq!(list, vec!["Led migration", "Mentored 4 engineers"]);
    }

    #[test]
    fn test_commit_rejects_blank_and_duplicates() {
        let mut list = vec!["Rust".to_string()];
        assert!(!commit_item(&mut list, "   "));
        assert!(!commit_item(&mut list, "\t\n"));
        assert!(!commit_item(&mut list, " Rust"));
        assert_eq!(list, vec!["Rust"]);
    }

    #[test]
    fn test_commit_is_case_sensitive() {
        let mut list = vec!["rust".to_string()];
        assert!(commit_item(&mut list, "Rust"));
        assert_eq!(list.len(), 2);
    }
}
