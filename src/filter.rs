use std::collections::HashSet;

/// Which text fields a keyword has to appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    Title,
    TitleAndDescription,
}

/// Case-insensitive substring filter over a keyword list.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
    scope: MatchScope,
}

impl KeywordFilter {
    pub fn new(keywords: &[String], scope: MatchScope) -> Self {
        let keywords = keywords
            .iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords, scope }
    }

    pub fn matches(&self, title: &str, description: &str) -> bool {
        match self.scope {
            MatchScope::Title => matches_keywords(&[title], &self.keywords),
            MatchScope::TitleAndDescription => {
                matches_keywords(&[title, description], &self.keywords)
            }
        }
    }

    /// Keep the items whose text matches, preserving order.
    pub fn apply<T, F>(&self, items: Vec<T>, text: F) -> Vec<T>
    where
        F: Fn(&T) -> (&str, &str),
    {
        items
            .into_iter()
            .filter(|item| {
                let (title, description) = text(item);
                self.matches(title, description)
            })
            .collect()
    }
}

/// True when any keyword occurs in any of `texts`, ignoring case.
/// Keywords are expected to be lowercase already.
pub fn matches_keywords(texts: &[&str], keywords: &[String]) -> bool {
    texts.iter().any(|text| {
        let text = text.to_lowercase();
        keywords.iter().any(|keyword| !keyword.is_empty() && text.contains(keyword.as_str()))
    })
}

/// Keep the first item for every id. Items without an id are dropped.
pub fn dedupe_by<T, F>(items: Vec<T>, id: F) -> Vec<T>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        let Some(key) = id(&item).filter(|key| !key.is_empty()).map(str::to_string) else {
            continue;
        };
        if seen.insert(key) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        vec!["Knife Skills".to_string(), "beginner".to_string(), " ".to_string()]
    }

    #[test]
    fn title_scope_ignores_description() {
        let filter = KeywordFilter::new(&keywords(), MatchScope::Title);
        assert!(filter.matches("BEGINNER Pasta", ""));
        assert!(filter.matches("Basic knife skills", "whatever"));
        assert!(!filter.matches("Steak night", "a beginner recipe"));
    }

    #[test]
    fn description_scope() {
        let filter = KeywordFilter::new(&keywords(), MatchScope::TitleAndDescription);
        assert!(filter.matches("Steak night", "a Beginner recipe"));
        assert!(!filter.matches("Steak night", "dinner"));
    }

    #[test]
    fn blank_keywords_never_match_everything() {
        let filter = KeywordFilter::new(&[" ".to_string()], MatchScope::Title);
        assert!(!filter.matches("anything", ""));
    }

    #[test]
    fn matches_keywords_checks_every_text() {
        let keywords = vec!["pantry".to_string()];
        assert!(matches_keywords(&["Dinner", "Stocking your PANTRY"], &keywords));
        assert!(!matches_keywords(&["Dinner", ""], &keywords));
        assert!(!matches_keywords(&[], &keywords));
    }

    #[test]
    fn apply_preserves_order() {
        let filter = KeywordFilter::new(&keywords(), MatchScope::Title);
        let titles = vec!["beginner one", "other", "knife skills two"];
        let kept = filter.apply(titles, |title| (*title, ""));
        assert_eq!(kept, vec!["beginner one", "knife skills two"]);
    }

    #[test]
    fn dedupe_keeps_first_and_drops_missing_ids() {
        let items = vec![(Some("a"), 1), (None, 2), (Some("b"), 3), (Some("a"), 4), (Some(""), 5)];
        let unique = dedupe_by(items, |(id, _)| *id);
        assert_eq!(unique, vec![(Some("a"), 1), (Some("b"), 3)]);
    }
}
