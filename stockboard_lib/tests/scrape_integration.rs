use stockboard_lib::ScrapeClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// A row whose href is relative (no leading slash), so the resolved link
// depends on which URL the table was actually served from.
fn news_table_with_relative_link() -> String {
    r#"
    <table class="type5">
    <tr>
        <td class="title"><a href="news_read.naver?article_id=1&code=005930">실적 발표</a></td>
        <td class="info">한국경제</td>
        <td class="date">2024.01.02 16:30</td>
    </tr>
    </table>
    "#
    .to_string()
}

#[tokio::test]
async fn relative_links_resolve_against_post_redirect_url() {
    let mock_server = MockServer::start().await;

    // The requested path redirects; the table is served from /moved/.
    Mock::given(method("GET"))
        .and(path("/item/news_news.naver"))
        .respond_with(ResponseTemplate::new(302).insert_header(
            "location",
            format!("{}/moved/news_news.naver", mock_server.uri()).as_str(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/moved/news_news.naver"))
        .respond_with(ResponseTemplate::new(200).set_body_string(news_table_with_relative_link()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = ScrapeClient::with_base_url(&mock_server.uri()).unwrap();
    let items = scraper.stock_news("005930").await.unwrap();

    assert_eq!(items.len(), 1);
    // Joined against the final URL, not the one that was requested.
    assert_eq!(
        items[0].link,
        format!(
            "{}/moved/news_read.naver?article_id=1&code=005930",
            mock_server.uri()
        )
    );
}

#[tokio::test]
async fn stock_news_percent_encodes_the_symbol() {
    let mock_server = MockServer::start().await;

    // A symbol carrying query metacharacters must arrive as one `code` value.
    Mock::given(method("GET"))
        .and(path("/item/news_news.naver"))
        .and(query_param("code", "005930&page=9"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scraper = ScrapeClient::with_base_url(&mock_server.uri()).unwrap();
    let items = scraper.stock_news("005930&page=9").await.unwrap();
    assert!(items.is_empty());
}
