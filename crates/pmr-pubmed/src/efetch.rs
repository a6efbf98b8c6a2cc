//! `efetch` XML (`PubmedArticleSet`) parsing.
//!
//! Only the fields `esummary` lacks are read: abstract, keywords, MeSH
//! descriptors and author affiliations.

use std::collections::HashMap;

use pmr_core::entities::Article;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::PubMedError;

/// Per-article fields only available from the full record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ArticleDetails {
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
    pub mesh_terms: Vec<String>,
    pub affiliations: Vec<String>,
}

impl ArticleDetails {
    pub fn apply_to(self, article: &mut Article) {
        article.abstract_text = self.abstract_text;
        article.keywords = self.keywords;
        article.mesh_terms = self.mesh_terms;
        article.affiliations = self.affiliations;
    }
}

#[derive(Debug)]
enum Field {
    Pmid,
    /// An `AbstractText` section and its `Label`, if any.
    Abstract(Option<String>),
    Keyword,
    Mesh,
    Affiliation,
}

struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Default)]
struct Record {
    pmid: Option<String>,
    sections: Vec<String>,
    details: ArticleDetails,
}

impl Record {
    fn accept(&mut self, field: Field, text: String) {
        match field {
            Field::Pmid => {
                if self.pmid.is_none() {
                    self.pmid = Some(text);
                }
            }
            Field::Abstract(label) => self.sections.push(match label {
                Some(label) => format!("{label}: {text}"),
                None => text,
            }),
            Field::Keyword => self.details.keywords.push(text),
            Field::Mesh => self.details.mesh_terms.push(text),
            Field::Affiliation => {
                if !self.details.affiliations.contains(&text) {
                    self.details.affiliations.push(text);
                }
            }
        }
    }

    fn finish(mut self) -> Option<(String, ArticleDetails)> {
        if !self.sections.is_empty() {
            self.details.abstract_text = Some(self.sections.join("\n"));
        }
        self.pmid.map(|pmid| (pmid, self.details))
    }
}

fn parse_error(e: impl std::fmt::Display) -> PubMedError {
    PubMedError::Parse(format!("efetch: {e}"))
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn field_for(name: &str, parent: Option<&str>, start: &BytesStart<'_>) -> Result<Option<Field>, PubMedError> {
    let field = match (name, parent) {
        ("PMID", Some("MedlineCitation")) => Field::Pmid,
        ("AbstractText", Some("Abstract")) => {
            let label = match start.try_get_attribute("Label").map_err(parse_error)? {
                Some(attr) => Some(attr.unescape_value().map_err(parse_error)?.into_owned()),
                None => None,
            };
            Field::Abstract(label.filter(|l| !l.trim().is_empty()))
        }
        ("Keyword", Some("KeywordList")) => Field::Keyword,
        ("DescriptorName", Some("MeshHeading")) => Field::Mesh,
        ("Affiliation", Some("AffiliationInfo")) => Field::Affiliation,
        _ => return Ok(None),
    };
    Ok(Some(field))
}

/// Collapse the whitespace XML indentation and inline markup leave behind.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Details keyed by PMID. Records without a `MedlineCitation/PMID` are
/// skipped.
pub(crate) fn parse_article_set(xml: &str) -> Result<HashMap<String, ArticleDetails>, PubMedError> {
    let mut reader = Reader::from_str(xml);
    let mut path: Vec<String> = Vec::new();
    let mut capture: Option<Capture> = None;
    let mut record: Option<Record> = None;
    let mut details = HashMap::new();

    loop {
        match reader.read_event().map_err(parse_error)? {
            Event::Start(start) => {
                let name = local_name(&start);
                if name == "PubmedArticle" {
                    record = Some(Record::default());
                }
                if capture.is_none()
                    && record.is_some()
                    && let Some(field) = field_for(&name, path.last().map(String::as_str), &start)?
                {
                    capture = Some(Capture {
                        field,
                        depth: path.len(),
                        text: String::new(),
                    });
                }
                path.push(name);
            }
            Event::Text(text) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&text.unescape().map_err(parse_error)?);
                }
            }
            Event::CData(data) => {
                if let Some(capture) = capture.as_mut() {
                    capture.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(end) => {
                path.pop();
                if capture.as_ref().is_some_and(|c| c.depth == path.len())
                    && let Some(Capture { field, text, .. }) = capture.take()
                    && let Some(record) = record.as_mut()
                {
                    let text = normalize(&text);
                    if !text.is_empty() {
                        record.accept(field, text);
                    }
                }
                if end.local_name().as_ref() == b"PubmedArticle"
                    && let Some((pmid, found)) = record.take().and_then(Record::finish)
                {
                    details.insert(pmid, found);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(details)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ARTICLE_SET_FIXTURE: &str = r#"<?xml version="1.0" ?>
<!DOCTYPE PubmedArticleSet PUBLIC "-//NLM//DTD PubMedArticle, 1st January 2024//EN" "https://dtd.nlm.nih.gov/ncbi/pubmed/out/pubmed_240101.dtd">
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">32976933</PMID>
      <Article PubModel="Print-Electronic">
        <ArticleTitle>Transcriptomic responses to triclosan.</ArticleTitle>
        <Abstract>
          <AbstractText Label="BACKGROUND" NlmCategory="BACKGROUND">Triclosan is an
            antimicrobial agent.</AbstractText>
          <AbstractText Label="RESULTS" NlmCategory="RESULTS">Exposure altered <i>PPAR</i> signalling &amp; lipid metabolism.</AbstractText>
        </Abstract>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Doktorova</LastName>
            <AffiliationInfo>
              <Affiliation>Edelweiss Connect GmbH, Basel, Switzerland.</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Hardy</LastName>
            <AffiliationInfo>
              <Affiliation>Edelweiss Connect GmbH, Basel, Switzerland.</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
      <MeshHeadingList>
        <MeshHeading>
          <DescriptorName UI="D014260" MajorTopicYN="N">Triclosan</DescriptorName>
          <QualifierName UI="Q000633" MajorTopicYN="Y">toxicity</QualifierName>
        </MeshHeading>
        <MeshHeading>
          <DescriptorName UI="D008099" MajorTopicYN="N">Liver</DescriptorName>
        </MeshHeading>
      </MeshHeadingList>
      <KeywordList Owner="NOTNLM">
        <Keyword MajorTopicYN="N">Hepatotoxicity</Keyword>
        <Keyword MajorTopicYN="N">Read-across</Keyword>
      </KeywordList>
      <CommentsCorrectionsList>
        <CommentsCorrections RefType="Cites">
          <RefSource>Toxicology. 2019</RefSource>
          <PMID Version="1">11111111</PMID>
        </CommentsCorrections>
      </CommentsCorrectionsList>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="PubMed-not-MEDLINE" Owner="NLM">
      <PMID Version="1">35679121</PMID>
      <Article>
        <ArticleTitle>Triclosan and liver steatosis.</ArticleTitle>
        <Abstract>
          <AbstractText>Single unlabelled section.</AbstractText>
        </Abstract>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="In-Data-Review" Owner="NLM">
      <PMID Version="1">36000000</PMID>
      <Article>
        <ArticleTitle>Letter without abstract.</ArticleTitle>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

    #[test]
    fn reads_labelled_abstract_sections() {
        let details = parse_article_set(ARTICLE_SET_FIXTURE).unwrap();
        assert_eq!(
            details["32976933"].abstract_text.as_deref(),
            Some(
                "BACKGROUND: Triclosan is an antimicrobial agent.\n\
                 RESULTS: Exposure altered PPAR signalling & lipid metabolism."
            )
        );
        assert_eq!(
            details["35679121"].abstract_text.as_deref(),
            Some("Single unlabelled section.")
        );
    }

    #[test]
    fn reads_keywords_mesh_and_affiliations() {
        let details = parse_article_set(ARTICLE_SET_FIXTURE).unwrap();
        let first = &details["32976933"];
        assert_eq!(first.keywords, vec!["Hepatotoxicity", "Read-across"]);
        assert_eq!(first.mesh_terms, vec!["Triclosan", "Liver"]);
        assert_eq!(first.affiliations, vec!["Edelweiss Connect GmbH, Basel, Switzerland."]);
    }

    #[test]
    fn cited_pmids_are_not_record_ids() {
        let details = parse_article_set(ARTICLE_SET_FIXTURE).unwrap();
        assert!(!details.contains_key("11111111"));
        assert_eq!(details.len(), 3);
    }

    #[test]
    fn missing_abstract_stays_none() {
        let details = parse_article_set(ARTICLE_SET_FIXTURE).unwrap();
        assert_eq!(details["36000000"], ArticleDetails::default());
    }

    #[test]
    fn empty_set_is_empty() {
        let details = parse_article_set("<PubmedArticleSet></PubmedArticleSet>").unwrap();
        assert!(details.is_empty());
    }

    #[test]
    fn mismatched_tags_are_parse_error() {
        let err = parse_article_set("<PubmedArticleSet><PubmedArticle></MedlineCitation></PubmedArticleSet>")
            .unwrap_err();
        assert!(matches!(err, PubMedError::Parse(_)));
    }

    #[test]
    fn apply_fills_article() {
        let mut article = Article {
            pmid: "35679121".into(),
            ..Article::default()
        };
        ArticleDetails {
            abstract_text: Some("text".into()),
            keywords: vec!["k".into()],
            mesh_terms: vec!["m".into()],
            affiliations: vec!["a".into()],
        }
        .apply_to(&mut article);
        assert_eq!(article.abstract_text.as_deref(), Some("text"));
        assert_eq!(article.keywords, vec!["k"]);
        assert_eq!(article.mesh_terms, vec!["m"]);
        assert_eq!(article.affiliations, vec!["a"]);
    }
}
