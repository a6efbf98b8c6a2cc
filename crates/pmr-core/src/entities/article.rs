use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata for one PubMed article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Article {
    pub pmid: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub first_author: String,
    pub last_author: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub journal: String,
    pub pub_date: Option<NaiveDate>,
    pub doi: Option<String>,
    pub pmc: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub mesh_terms: Vec<String>,
    #[serde(default)]
    pub publication_types: Vec<String>,
    /// Free full text is available (the article has a PMC id).
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub affiliations: Vec<String>,
}

impl Article {
    /// Canonical PubMed page for this article.
    #[must_use]
    pub fn pubmed_url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.pmid)
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.pub_date.map(|date| date.year())
    }

    /// Fill `first_author`/`last_author` from the author list. A single
    /// author has no separate last author.
    #[must_use]
    pub fn with_author_roles(mut self) -> Self {
        self.first_author = self.authors.first().cloned().unwrap_or_default();
        self.last_author = if self.authors.len() > 1 {
            self.authors.last().cloned()
        } else {
            None
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_roles_from_list() {
        let article = Article {
            authors: vec!["Doktorova TY".into(), "Azzi P".into(), "Chesne C".into()],
            ..Article::default()
        }
        .with_author_roles();
        assert_eq!(article.first_author, "Doktorova TY");
        assert_eq!(article.last_author.as_deref(), Some("Chesne C"));

        let single = Article {
            authors: vec!["Hardy B".into()],
            ..Article::default()
        }
        .with_author_roles();
        assert_eq!(single.first_author, "Hardy B");
        assert_eq!(single.last_author, None);
    }

    #[test]
    fn abstract_field_uses_plain_name() {
        let article = Article {
            pmid: "35679121".into(),
            abstract_text: Some("text".into()),
            ..Article::default()
        };
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["abstract"], "text");
        assert_eq!(article.pubmed_url(), "https://pubmed.ncbi.nlm.nih.gov/35679121/");
    }
}
