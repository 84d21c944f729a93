//! Integration tests for the CiteULike and Scholar search engines
//!
//! Result pages are served by wiremock; the engines are pointed at the mock
//! server through their configured base URLs.

use sci_worm::config::{CiteULikeConfig, HttpConfig, ScholarConfig};
use sci_worm::matcher::{citing_articles, find_citing_articles, match_in_catalogue};
use sci_worm::scrape::{CiteULikeQuery, CiteULikeSearch, ScholarSearch};
use sci_worm::{Article, ScholarLinks, WormError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn citeulike_record(id: u32, title: &str, journal: &str, year: i32) -> String {
    format!(
        r#"<tr class="list {{article_id:{id}}}" data-article_id={id}>
<h2><a class="title" href="/article/{id}"><span class="bookmark">&#8203;</span>{title}</a></h2>
<div class="vinfo"><i>{journal}</i>, Vol. 28, No. 4. ({year}), <a href='http://dx.doi.org/10.1/{id}'>doi:10.1/{id}</a></div>
<div class="authors">by <a class="author" href="/author/Langmuir">I. Langmuir</a></div>
"#
    )
}

fn scholar_record(title: &str, byline: &str, cited_by: Option<(u32, &str)>) -> String {
    let footer = match cited_by {
        Some((count, cites)) => format!(
            r#"<div class="gs_fl"><a href="/scholar?cites={cites}&amp;hl=en">Cited by {count}</a> <a href="/scholar?q=related:{cites}">Related articles</a></div>"#
        ),
        None => String::new(),
    };
    format!(
        r#"<div class="gs_r">
  <h3><a href="http://journals.example.com/{len}">{title}</a></h3>
  <div class="gs_a">{byline}</div>
  <div class="gs_rs">Abstract of {title}.</div>
  {footer}
</div>"#,
        len = title.len()
    )
}

fn scholar_page(records: &[String]) -> String {
    format!("<html><body>{}</body></html>", records.concat())
}

fn scholar_engine(server: &MockServer) -> ScholarSearch {
    let config = ScholarConfig {
        base_url: server.uri(),
        results_limit: 10,
        page_stride: 20,
    };
    ScholarSearch::new(&config, &HttpConfig::default()).expect("Failed to build engine")
}

fn reference() -> Article {
    Article::new(
        "The Theory of Collectors in Gaseous Discharges",
        vec!["H Mott-Smith".to_string(), "I Langmuir".to_string()],
        1926,
        "Physical Review",
    )
}

#[tokio::test]
async fn test_citeulike_search_concatenates_pages() {
    let mock_server = MockServer::start().await;

    let page_one = format!(
        "<html><body><table>\n{}{}</table></body></html>",
        citeulike_record(1, "Collectors", "Physical Review", 1926),
        citeulike_record(2, "Plasma oscillations", "Physical Review", 1929),
    );
    Mock::given(method("GET"))
        .and(path("/search/all/page/1"))
        .and(query_param(
            "q",
            r#"author:"langmuir" year:[1800 TO 3000] isbn:none"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_one))
        .expect(1)
        .mount(&mock_server)
        .await;

    // A failing page does not stop the search
    Mock::given(method("GET"))
        .and(path("/search/all/page/2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page_three = format!(
        "<html><body><table>\n{}</table></body></html>",
        citeulike_record(3, "Electric discharges", "GE Review", 1923),
    );
    Mock::given(method("GET"))
        .and(path("/search/all/page/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page_three))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = CiteULikeConfig {
        base_url: mock_server.uri(),
        page_limit: 3,
    };
    let search = CiteULikeSearch::new(&config, &HttpConfig::default()).unwrap();
    let query = CiteULikeQuery::default().with_authors(vec!["langmuir".to_string()]);
    let articles = search.search(&query).await;

    let ids: Vec<i64> = articles.iter().map(|a| a.external_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(articles[0].title, "Collectors");
    assert_eq!(articles[0].year, 1926);
    assert_eq!(articles[0].volume, 28);
    assert_eq!(articles[2].journal, "GE Review");
    assert_eq!(articles[2].authors, vec!["I. Langmuir"]);
}

#[tokio::test]
async fn test_scholar_search_parses_results() {
    let mock_server = MockServer::start().await;

    let page = scholar_page(&[
        scholar_record(
            "The theory of collectors in gaseous discharges",
            "H Mott-Smith, I Langmuir - Physical Review, 1926 - APS",
            Some((1500, "42")),
        ),
        scholar_record("Plasma oscillations", "L Tonks, I Langmuir - Physical Review, 1929", None),
    ]);
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = scholar_engine(&mock_server);
    let terms = vec!["langmuir".to_string(), "collector".to_string()];
    let articles = engine.search(&terms).await.expect("Search failed");

    assert_eq!(articles.len(), 2);
    let first = &articles[0];
    assert_eq!(first.title, "The theory of collectors in gaseous discharges");
    assert_eq!(first.authors, vec!["H Mott-Smith", "I Langmuir"]);
    assert_eq!(first.journal, "Physical Review");
    assert_eq!(first.year, 1926);
    assert_eq!(first.keywords, terms);
    assert_eq!(first.citation_count(), 1500);

    let links = first.scholar_links().expect("Links are attached");
    assert_eq!(links.citing_articles_url, "/scholar?cites=42&hl=en");
    assert_eq!(links.journal_url, "APS");

    assert_eq!(articles[1].year, 1929);
    assert_eq!(articles[1].citation_count(), 0);
}

#[tokio::test]
async fn test_scholar_error_status_is_connectivity_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/scholar"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let engine = scholar_engine(&mock_server);
    let result = engine.search(&["langmuir".to_string()]).await;

    match result {
        Err(WormError::Connectivity { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected a connectivity error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scholar_unreachable_host_is_http_error() {
    // Nothing listens on the discard port
    let config = ScholarConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        results_limit: 10,
        page_stride: 20,
    };
    let engine = ScholarSearch::new(&config, &HttpConfig::default()).unwrap();
    let result = engine.search(&["langmuir".to_string()]).await;

    match result {
        Err(WormError::Http { url, .. }) => assert!(url.starts_with("http://127.0.0.1:9/scholar")),
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_citing_articles_walks_every_offset() {
    let mock_server = MockServer::start().await;

    let first_page = scholar_page(&[
        scholar_record("Collector theory revisited", "A Author - J Appl Phys, 1950", None),
        scholar_record("Langmuir collectors", "B Author - Phys Fluids, 1960", None),
    ]);
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("cites", "42"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(first_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    let second_page = scholar_page(&[scholar_record(
        "Sheath physics",
        "C Author - Plasma Sources, 1990",
        None,
    )]);
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("cites", "42"))
        .and(query_param("start", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_string(second_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut article = reference();
    article.attach_scholar_links(ScholarLinks {
        citing_articles_url: "/scholar?cites=42&hl=en".to_string(),
        citation_count: 25,
        ..Default::default()
    });

    let engine = scholar_engine(&mock_server);
    let citing = citing_articles(&engine, &article, &[article.title.clone()])
        .await
        .expect("Citing pages failed");

    let titles: Vec<&str> = citing.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Collector theory revisited", "Langmuir collectors", "Sheath physics"]
    );
}

#[tokio::test]
async fn test_citing_articles_without_link_fetches_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let engine = scholar_engine(&mock_server);

    let unlinked = reference();
    let citing = citing_articles(&engine, &unlinked, &[]).await.unwrap();
    assert!(citing.is_empty());

    let mut unavailable = reference();
    unavailable.attach_scholar_links(ScholarLinks {
        citation_count: 10,
        ..Default::default()
    });
    let citing = citing_articles(&engine, &unavailable, &[]).await.unwrap();
    assert!(citing.is_empty());
}

#[tokio::test]
async fn test_find_citing_articles_end_to_end() {
    let mock_server = MockServer::start().await;

    let results = scholar_page(&[
        // Same authors, wrong year
        scholar_record(
            "The theory of collectors in gaseous discharges (abstract)",
            "H Mott-Smith, I Langmuir - Physical Review, 1925",
            Some((3000, "7")),
        ),
        // Right year, unrelated authors, rarely cited
        scholar_record(
            "Gaseous discharges",
            "Q Zyx - Some Journal, 1926",
            Some((1, "8")),
        ),
        scholar_record(
            "The theory of collectors in gaseous discharges",
            "H Mott-Smith, I Langmuir - Physical Review, 1926 - APS",
            Some((3, "42")),
        ),
    ]);
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results))
        .expect(1)
        .mount(&mock_server)
        .await;

    let citing_page = scholar_page(&[scholar_record(
        "Collector theory revisited",
        "A Author - J Appl Phys, 1950",
        None,
    )]);
    Mock::given(method("GET"))
        .and(path("/scholar"))
        .and(query_param("cites", "42"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(citing_page))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = scholar_engine(&mock_server);
    let result = find_citing_articles(&engine, &reference())
        .await
        .expect("Lookup failed");

    let matched = result.matched.expect("A result was matched");
    assert_eq!(matched.year, 1926);
    assert_eq!(matched.authors, vec!["H Mott-Smith", "I Langmuir"]);
    assert_eq!(matched.citation_count(), 3);

    assert_eq!(result.citing.len(), 1);
    assert_eq!(result.citing[0].title, "Collector theory revisited");
    assert_eq!(result.citing[0].keywords, vec![reference().title]);
}

#[tokio::test]
async fn test_find_citing_articles_without_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/scholar"))
        .respond_with(ResponseTemplate::new(200).set_body_string(scholar_page(&[])))
        .mount(&mock_server)
        .await;

    let engine = scholar_engine(&mock_server);
    let result = find_citing_articles(&engine, &reference()).await.unwrap();

    assert!(result.matched.is_none());
    assert!(result.citing.is_empty());
}

#[tokio::test]
async fn test_citing_articles_are_paired_with_catalogue_records() {
    let mock_server = MockServer::start().await;

    let candidates = format!(
        "<html><body><table>\n{}{}</table></body></html>",
        citeulike_record(11, "Collector theory", "J Appl Phys", 1950),
        citeulike_record(12, "Collector theory revisited", "J Appl Phys", 1950),
    );
    Mock::given(method("GET"))
        .and(path("/search/all/page/1"))
        .and(query_param(
            "q",
            "title>Collector theory revisited year:[1950 TO 1950] isbn:none",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(candidates))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/all/page/1"))
        .and(query_param(
            "q",
            "title>Sheath physics year:[1990 TO 1990] isbn:none",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = CiteULikeConfig {
        base_url: mock_server.uri(),
        page_limit: 1,
    };
    let catalogue = CiteULikeSearch::new(&config, &HttpConfig::default()).unwrap();
    let citing = vec![
        Article::new("Collector theory revisited", vec![], 1950, "J Appl Phys"),
        Article::new("Sheath physics", vec![], 1990, "Plasma Sources"),
        Article::new("", vec![], 1990, "Plasma Sources"),
    ];

    let matches = match_in_catalogue(&catalogue, citing).await;

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].listed.title, "Collector theory revisited");
    let record = matches[0].record.as_ref().expect("A record was matched");
    assert_eq!(record.external_id, 12);
    assert_eq!(record.year, 1950);

    assert_eq!(matches[1].listed.title, "Sheath physics");
    assert!(matches[1].record.is_none());

    // Untitled articles are not looked up
    assert!(matches[2].record.is_none());
}
