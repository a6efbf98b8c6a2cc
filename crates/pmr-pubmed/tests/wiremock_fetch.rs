use pmr_config::PubMedConfig;
use pmr_core::ports::ArticleFetcher;
use pmr_pubmed::{PubMedClient, PubMedError};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PubMedClient {
    let config = PubMedConfig {
        base_url: server.uri(),
        ..PubMedConfig::default()
    };
    PubMedClient::new(&config).unwrap()
}

fn esearch_body(ids: &[&str]) -> serde_json::Value {
    serde_json::json!({"esearchresult": {"count": ids.len().to_string(), "idlist": ids}})
}

fn esummary_body() -> serde_json::Value {
    serde_json::json!({
        "result": {
            "uids": ["111"],
            "111": {
                "uid": "111",
                "title": "Triclosan hepatotoxicity",
                "source": "Toxicology",
                "pubdate": "2021 Mar",
                "sortpubdate": "2021/03/15 00:00",
                "authors": [{"name": "Doktorova TY", "authtype": "Author"}],
                "articleids": []
            }
        }
    })
}

const EFETCH_BODY: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">111</PMID>
      <Article>
        <Abstract>
          <AbstractText>Triclosan induced hepatic steatosis in mice.</AbstractText>
        </Abstract>
        <AuthorList>
          <Author>
            <LastName>Doktorova</LastName>
            <AffiliationInfo>
              <Affiliation>Vrije Universiteit Brussel, Belgium.</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
      <MeshHeadingList>
        <MeshHeading>
          <DescriptorName UI="D014260">Triclosan</DescriptorName>
        </MeshHeading>
      </MeshHeadingList>
      <KeywordList Owner="NOTNLM">
        <Keyword>steatosis</Keyword>
      </KeywordList>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>"#;

async fn mount_efetch(server: &MockServer, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path("/efetch.fcgi"))
        .and(query_param("id", "111"))
        .and(query_param("retmode", "xml"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_runs_search_then_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "triclosan AND liver"))
        .and(query_param("retmax", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["111"])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/esummary.fcgi"))
        .and(query_param("id", "111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esummary_body()))
        .expect(1)
        .mount(&server)
        .await;
    mount_efetch(&server, 200, EFETCH_BODY).await;

    let articles = client_for(&server).fetch("triclosan AND liver", 5).await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].pmid, "111");
    assert_eq!(articles[0].title, "Triclosan hepatotoxicity");
    assert_eq!(articles[0].year(), Some(2021));
}

#[tokio::test]
async fn fetch_fills_abstract_keywords_mesh_and_affiliations() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["111"])))
        .mount(&server)
        .await;
    Mock::given(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esummary_body()))
        .mount(&server)
        .await;
    mount_efetch(&server, 200, EFETCH_BODY).await;

    let articles = client_for(&server).fetch("triclosan", 5).await.unwrap();
    let article = &articles[0];

    assert_eq!(
        article.abstract_text.as_deref(),
        Some("Triclosan induced hepatic steatosis in mice.")
    );
    assert_eq!(article.keywords, vec!["steatosis"]);
    assert_eq!(article.mesh_terms, vec!["Triclosan"]);
    assert_eq!(article.affiliations, vec!["Vrije Universiteit Brussel, Belgium."]);
    assert_eq!(article.first_author, "Doktorova TY");
}

#[tokio::test]
async fn record_missing_from_efetch_keeps_summary_fields() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["111"])))
        .mount(&server)
        .await;
    Mock::given(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esummary_body()))
        .mount(&server)
        .await;
    mount_efetch(&server, 200, "<PubmedArticleSet></PubmedArticleSet>").await;

    let articles = client_for(&server).fetch("triclosan", 5).await.unwrap();

    assert_eq!(articles[0].title, "Triclosan hepatotoxicity");
    assert_eq!(articles[0].abstract_text, None);
    assert!(articles[0].keywords.is_empty());
}

#[tokio::test]
async fn efetch_failure_fails_the_fetch() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["111"])))
        .mount(&server)
        .await;
    Mock::given(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esummary_body()))
        .mount(&server)
        .await;
    mount_efetch(&server, 503, "unavailable").await;

    let err = client_for(&server).fetch("triclosan", 5).await.unwrap_err();
    assert!(matches!(err, PubMedError::Api { status: 503, .. }));
}

#[tokio::test]
async fn no_match_is_empty_without_summary_call() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&[])))
        .mount(&server)
        .await;
    Mock::given(path("/esummary.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(path("/efetch.fcgi"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let articles = client_for(&server).fetch("zzzz-no-match", 10).await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn blank_query_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(esearch_body(&["1"])))
        .expect(0)
        .mount(&server)
        .await;

    let articles = client_for(&server).fetch("   ", 10).await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn esearch_error_is_invalid_query() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"esearchresult": {"ERROR": "Invalid query"}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("((", 10).await.unwrap_err();
    assert!(matches!(err, PubMedError::InvalidQuery(msg) if msg == "Invalid query"));
}

#[tokio::test]
async fn rate_limit_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("triclosan", 10).await.unwrap_err();
    assert!(matches!(err, PubMedError::RateLimited { retry_after_secs: 2 }));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch("triclosan", 10).await.unwrap_err();
    assert!(matches!(err, PubMedError::Parse(_)));
}
