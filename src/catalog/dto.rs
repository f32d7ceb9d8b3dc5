use serde::Deserialize;

/// Shortest query worth sending to the database.
pub const MIN_QUERY_LEN: usize = 2;
pub const SEARCH_LIMIT: i64 = 20;
pub const LIST_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// What a catalog request turns into.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup {
    All,
    Search(String),
    Nothing,
}

impl SearchQuery {
    pub fn lookup(&self) -> Lookup {
        match self.q.as_deref().map(str::trim) {
            None => Lookup::All,
            Some(q) if q.chars().count() < MIN_QUERY_LEN => Lookup::Nothing,
            Some(q) => Lookup::Search(like_pattern(q)),
        }
    }
}

/// Case-insensitive substring pattern with LIKE wildcards escaped.
fn like_pattern(q: &str) -> String {
    let mut out = String::with_capacity(q.len() + 2);
    out.push('%');
    for c in q.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: Option<&str>) -> SearchQuery {
        SearchQuery {
            q: s.map(str::to_string),
        }
    }

    #[test]
    fn short_queries_find_nothing() {
        assert_eq!(q(Some("a")).lookup(), Lookup::Nothing);
        assert_eq!(q(Some(" a ")).lookup(), Lookup::Nothing);
        assert_eq!(q(Some("")).lookup(), Lookup::Nothing);
    }

    #[test]
    fn no_query_lists_all() {
        assert_eq!(q(None).lookup(), Lookup::All);
    }

    #[test]
    fn escapes_wildcards() {
        assert_eq!(q(Some("arroz")).lookup(), Lookup::Search("%arroz%".into()));
        assert_eq!(q(Some("50%_off")).lookup(), Lookup::Search("%50\\%\\_off%".into()));
    }
}
