//! Integration tests for loading the content configuration over HTTP and
//! from local sites

use folio::content::BindingTable;
use folio::{ContentLoader, LoadState, LoaderOptions, Page, Section, Viewport};
use std::fs;
use tiny_http::{Response, Server};

const INDEX: &str = include_str!("fixtures/site/index.html");
const CONTENT: &str = include_str!("fixtures/site/config/content.json");

/// Start a test server on a free port serving the fixture site
fn start_test_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let path = request.url().to_string();
            let html = "Content-Type: text/html; charset=utf-8".parse::<tiny_http::Header>().unwrap();
            let json = "Content-Type: application/json".parse::<tiny_http::Header>().unwrap();
            let response = match path.as_str() {
                "/" | "/index.html" => Response::from_string(INDEX).with_header(html),
                "/config/content.json" => Response::from_string(CONTENT).with_header(json),
                "/config/broken.json" => Response::from_string(r#"{"header": {"#).with_header(json),
                "/config/no-social.json" => {
                    let mut value: serde_json::Value = serde_json::from_str(CONTENT).unwrap();
                    value.as_object_mut().unwrap().remove("socialLinks");
                    Response::from_string(value.to_string()).with_header(json)
                }
                "/config/private.json" => {
                    let allowed = request
                        .headers()
                        .iter()
                        .any(|h| h.field.equiv("X-Folio-Token") && h.value.as_str() == "letmein");
                    if allowed {
                        Response::from_string(CONTENT).with_header(json)
                    } else {
                        Response::from_string("Forbidden").with_status_code(403)
                    }
                }
                _ => Response::from_string("Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

async fn load_page(base: &str) -> Page {
    Page::load(&format!("{}/", base), Viewport::default(), "folio-test")
        .await
        .expect("Failed to load page")
}

fn text_of(page: &Page, css: &str) -> String {
    let node = page.document.find(css).unwrap().expect(css);
    page.document.text_content(node)
}

fn attr_of(page: &Page, css: &str, name: &str) -> Option<String> {
    let node = page.document.find(css).unwrap().expect(css);
    page.document.attr(node, name).map(str::to_string)
}

#[tokio::test]
async fn test_http_config_binds_every_section() {
    let base = start_test_server();
    let mut page = load_page(&base).await;
    let table = BindingTable::build(&page.document).unwrap();
    assert!(table.missing().is_empty(), "{:?}", table.missing());
    let mut loader = ContentLoader::new(LoaderOptions::default()).unwrap();

    loader.init(&mut page).await;
    assert_eq!(loader.state(), LoadState::Ready);
    assert_eq!(loader.bound_sections(), &Section::ORDER);

    assert_eq!(text_of(&page, ".header__heading--primary"), "Ada Lovelace");
    assert_eq!(text_of(&page, ".header__heading--secondary"), "Analyst & Programmer");
    let cta = page.document.find(".btn-transparent.btn--animated").unwrap().unwrap();
    assert_eq!(page.document.inner_html(cta), "Read <strong>more</strong>");

    assert_eq!(text_of(&page, ".card--1 .card__heading"), "About");
    assert_eq!(text_of(&page, ".card--1 .card__link"), "Who I am");
    assert_eq!(attr_of(&page, ".card--1 .card__link", "href").as_deref(), Some("#aboutme"));
    assert_eq!(attr_of(&page, ".card--1 .card__image", "alt").as_deref(), Some("About"));
    assert_eq!(text_of(&page, ".card--2 .card__heading"), "Work");
    assert_eq!(attr_of(&page, ".card--2 .card__link", "href").as_deref(), Some("#experience"));
    assert_eq!(attr_of(&page, ".card--2 .card__image", "src").as_deref(), Some("img/work.png"));

    assert_eq!(text_of(&page, ".aboutme__heading"), "About me");
    assert_eq!(text_of(&page, ".aboutme__eyebrow"), "Hello");
    assert_eq!(text_of(&page, ".aboutme__title"), "Mathematician");
    assert_eq!(text_of(&page, ".aboutme__summary"), "Wrote the first published algorithm for a machine.");
    assert!(text_of(&page, ".aboutme__facts").contains("1815"));
    assert!(text_of(&page, ".aboutme__tags").contains("Poetry"));
    assert_eq!(attr_of(&page, ".aboutme__photo", "src").as_deref(), Some("img/ada.jpg"));
    assert_eq!(attr_of(&page, ".aboutme__photo", "alt").as_deref(), Some("Portrait"));
    assert_eq!(text_of(&page, ".aboutme__map-label"), "London, UK");
    assert!(text_of(&page, ".aboutme__metrics").contains("Algorithm"));
    assert_eq!(text_of(&page, ".aboutme__subheading"), "Recognition");
    assert!(text_of(&page, ".aboutme__cert-grid").contains("Analytical Engine"));

    assert_eq!(text_of(&page, ".education__heading"), "Education");
    assert_eq!(text_of(&page, ".education__subtitle"), "Private tutoring");
    assert!(text_of(&page, ".education__timeline").contains("Augustus De Morgan"));
    assert_eq!(text_of(&page, ".experience__heading"), "Experience");
    assert_eq!(text_of(&page, ".experience__subtitle"), "Selected work");
    assert!(text_of(&page, ".experience__timeline").contains("Bernoulli numbers"));
    assert_eq!(text_of(&page, ".skills__heading-text"), "Skills");
    assert_eq!(text_of(&page, ".skills__subtitle"), "Things I know");
    assert!(text_of(&page, ".skills__main").contains("Calculus"));

    let social = [
        ("linkedin", "https://www.linkedin.com/in/ada", "LinkedIn - ada"),
        ("github", "https://github.com/ada", "GitHub - ada"),
        ("email", "mailto:ada@example.com", "Email - ada@example.com"),
    ];
    for (network, href, label) in social {
        let css = format!(r#"[data-social="{}"]"#, network);
        assert_eq!(attr_of(&page, &css, "href").as_deref(), Some(href));
        assert_eq!(attr_of(&page, &css, "aria-label").as_deref(), Some(label));
    }
}

#[tokio::test]
async fn test_missing_config_leaves_page_untouched() {
    let base = start_test_server();
    let mut page = load_page(&base).await;
    let before = page.document.to_html();
    let options = LoaderOptions { config_path: "/config/missing.json".into(), ..Default::default() };
    let mut loader = ContentLoader::new(options).unwrap();

    assert_eq!(loader.init(&mut page).await, None);
    assert_eq!(loader.state(), LoadState::Failed);
    assert_eq!(page.document.mutation_count(), 0);
    assert_eq!(page.document.to_html(), before);

    let console = page.window.console();
    assert_eq!(console.len(), 1);
    assert_eq!(console[0].level, "error");
    assert!(console[0].text.starts_with("Error loading content configuration"));
    assert!(console[0].text.contains("404"));
}

#[tokio::test]
async fn test_malformed_config_is_a_parse_failure() {
    let base = start_test_server();
    let mut page = load_page(&base).await;
    let options = LoaderOptions { config_path: "/config/broken.json".into(), ..Default::default() };
    let mut loader = ContentLoader::new(options).unwrap();

    loader.init(&mut page).await;
    assert_eq!(loader.state(), LoadState::Failed);
    assert_eq!(page.document.mutation_count(), 0);
    assert!(page.window.console()[0].text.contains("Failed to parse config"));
}

#[tokio::test]
async fn test_absent_social_links_keep_placeholders() {
    let base = start_test_server();
    let mut page = load_page(&base).await;
    let options = LoaderOptions { config_path: "/config/no-social.json".into(), ..Default::default() };
    let mut loader = ContentLoader::new(options).unwrap();

    loader.init(&mut page).await;
    assert_eq!(loader.state(), LoadState::Ready);
    assert_eq!(text_of(&page, ".header__heading--primary"), "Ada Lovelace");
    for network in ["linkedin", "github", "email"] {
        let css = format!(r#"[data-social="{}"]"#, network);
        assert_eq!(attr_of(&page, &css, "href").as_deref(), Some("#"));
        assert_eq!(attr_of(&page, &css, "aria-label"), None);
    }
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let base = start_test_server();

    let mut page = load_page(&base).await;
    let options = LoaderOptions { config_path: "/config/private.json".into(), ..Default::default() };
    let mut loader = ContentLoader::new(options.clone()).unwrap();
    loader.init(&mut page).await;
    assert_eq!(loader.state(), LoadState::Failed);
    assert!(page.window.console()[0].text.contains("403"));

    let mut page = load_page(&base).await;
    let mut options = options;
    options.headers.insert("X-Folio-Token".into(), "letmein".into());
    let mut loader = ContentLoader::new(options).unwrap();
    loader.init(&mut page).await;
    assert_eq!(loader.state(), LoadState::Ready);
}

#[tokio::test]
async fn test_file_site_resolves_under_site_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pages")).unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(dir.path().join("pages/index.html"), INDEX).unwrap();
    fs::write(dir.path().join("config/content.json"), CONTENT).unwrap();

    let index = dir.path().join("pages/index.html");
    let mut page = Page::load(index.to_str().unwrap(), Viewport::default(), "folio-test")
        .await
        .unwrap();
    let options = LoaderOptions { site_root: Some(dir.path().to_path_buf()), ..Default::default() };
    let mut loader = ContentLoader::new(options).unwrap();

    loader.init(&mut page).await;
    assert_eq!(loader.state(), LoadState::Ready);
    assert_eq!(text_of(&page, ".header__heading--primary"), "Ada Lovelace");
}

#[tokio::test]
async fn test_second_init_is_ignored() {
    let base = start_test_server();
    let mut page = load_page(&base).await;
    let mut loader = ContentLoader::new(LoaderOptions::default()).unwrap();

    loader.init(&mut page).await;
    let after_first = page.document.mutation_count();
    assert_eq!(loader.init(&mut page).await, None);
    assert_eq!(page.document.mutation_count(), after_first);
    assert_eq!(loader.bound_sections().len(), Section::ORDER.len());
}
