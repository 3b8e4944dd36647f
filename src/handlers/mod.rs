pub mod articles;
pub mod auth;
pub mod diary;
pub mod emotions;
pub mod exercises;
pub mod forum;
pub mod health;
pub mod questionnaires;
pub mod tips;

/// Resolves an optional `categoria` query parameter into an effective filter.
/// `ALL` and the legacy spelling `TODOS` are wildcards meaning "no filter";
/// so is an empty value.
pub(crate) fn category_filter(raw: Option<String>) -> Option<String> {
    raw.filter(|c| !c.is_empty() && c != "ALL" && c != "TODOS")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_disable_the_filter() {
        assert_eq!(category_filter(Some("ALL".into())), None);
        assert_eq!(category_filter(Some("TODOS".into())), None);
        assert_eq!(category_filter(Some(String::new())), None);
        assert_eq!(category_filter(None), None);
    }

    #[test]
    fn concrete_categories_pass_through() {
        assert_eq!(
            category_filter(Some("ANXIETY".into())),
            Some("ANXIETY".into())
        );
        // Not a wildcard unless it is exactly the sentinel spelling.
        assert_eq!(category_filter(Some("all".into())), Some("all".into()));
    }
}
