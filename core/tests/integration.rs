//! Full request/classify lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every expectation
//! mode over real HTTP using ureq. Validates that header assembly, CSRF
//! handling, and response classification work end-to-end with an actual
//! Rails-shaped backend.

use serde::Deserialize;

use xhr_core::{
    classify_discard, classify_json, classify_text, field_errors_decoder, json_decoder,
    ClassifiedOutcome, Client, CsrfTokenProvider, Expect, FieldMapping, HttpMethod, HttpRequest,
    RawOutcome, RequestBody, ResponseMeta, TransportError, CSRF_META_NAME, HEADER_CSRF_TOKEN,
};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
struct Article {
    id: String,
    title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    ArticleTitle,
    ArticleId,
    SessionToken,
}

fn field_mapping() -> FieldMapping<Field> {
    FieldMapping::new([
        ("article.title", Field::ArticleTitle),
        ("article.id", Field::ArticleId),
        ("session.token", Field::SessionToken),
    ])
}

/// Execute an `HttpRequest` using ureq and report the raw outcome.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// classify them. Transport-level failures collapse to `NetworkError`,
/// which is all this test suite needs.
fn execute(req: HttpRequest) -> RawOutcome {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let url = req.url.clone();
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => {
            let mut builder = agent.get(&url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (HttpMethod::Delete, _) => {
            let mut builder = agent.delete(&url);
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder.call()
        }
        (method, body) => {
            let mut builder = match method {
                HttpMethod::Post => agent.post(&url),
                HttpMethod::Put => agent.put(&url),
                HttpMethod::Patch => agent.patch(&url),
                _ => unreachable!("bodyless methods handled above"),
            };
            for (name, value) in &req.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            match body {
                Some(body) => builder
                    .content_type(body.mime.as_str())
                    .send(body.content.as_bytes()),
                None => builder.send_empty(),
            }
        }
    };

    let mut response = match result {
        Ok(response) => response,
        Err(_) => return RawOutcome::NetworkError,
    };

    let status = response.status();
    let meta = ResponseMeta {
        url,
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
        headers: response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
    };
    let body = response.body_mut().read_to_string().unwrap_or_default();

    RawOutcome::Response { meta, body }
}

fn classify_article(outcome: RawOutcome) -> ClassifiedOutcome<Vec<(Field, String)>, Article> {
    classify_json(
        outcome,
        json_decoder::<Article>(),
        field_errors_decoder(field_mapping()),
    )
}

fn classify_articles(
    outcome: RawOutcome,
) -> ClassifiedOutcome<Vec<(Field, String)>, Vec<Article>> {
    classify_json(
        outcome,
        json_decoder::<Vec<Article>>(),
        field_errors_decoder(field_mapping()),
    )
}

#[test]
fn request_classify_lifecycle() {
    // Step 1: start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let base = format!("http://{addr}");

    // The page would carry <meta name="csrf-token" content="...">; the
    // lookup closure stands in for the DOM query.
    let client = Client::new(CsrfTokenProvider::new(|name| {
        (name == CSRF_META_NAME).then(|| mock_server::CSRF_TOKEN.to_string())
    }));

    // Step 2: list — empty, decoded through the success decoder.
    let outcome = classify_articles(execute(client.get(format!("{base}/articles"), Expect::Json)));
    assert_eq!(outcome, ClassifiedOutcome::Success(Vec::new()));

    // Step 3: create — the built request carries exactly one CSRF header and
    // the backend accepts it.
    let req = client.post(
        format!("{base}/articles"),
        RequestBody::json(r#"{"title":"Integration test"}"#),
        Expect::Json,
    );
    let csrf_count = req
        .headers
        .iter()
        .filter(|(name, _)| name == HEADER_CSRF_TOKEN)
        .count();
    assert_eq!(csrf_count, 1);

    let created = match classify_article(execute(req)) {
        ClassifiedOutcome::Success(article) => article,
        other => panic!("expected Success, got {other:?}"),
    };
    assert_eq!(created.title, "Integration test");

    // Step 4: validation failure — 422 decoded into tagged field errors.
    let outcome = classify_article(execute(client.post(
        format!("{base}/articles"),
        RequestBody::json(r#"{"title":"  "}"#),
        Expect::Json,
    )));
    match outcome {
        ClassifiedOutcome::Application(meta, errors) => {
            assert_eq!(meta.status, 422);
            assert_eq!(
                errors,
                vec![(Field::ArticleTitle, "can't be blank".to_string())]
            );
        }
        other => panic!("expected Application, got {other:?}"),
    }

    // Step 5: a headless client sends no CSRF header; the backend's 403 is
    // still a decodable application error.
    let headless = Client::headless();
    let req = headless.post(
        format!("{base}/articles"),
        RequestBody::json(r#"{"title":"No token"}"#),
        Expect::Json,
    );
    assert!(req.headers.iter().all(|(name, _)| name != HEADER_CSRF_TOKEN));
    match classify_article(execute(req)) {
        ClassifiedOutcome::Application(meta, errors) => {
            assert_eq!(meta.status, 403);
            assert_eq!(
                errors,
                vec![(
                    Field::SessionToken,
                    "invalid authenticity token".to_string()
                )]
            );
        }
        other => panic!("expected Application, got {other:?}"),
    }

    // Step 6: text mode.
    let pong = classify_text(execute(client.get(format!("{base}/ping"), Expect::Text))).unwrap();
    assert_eq!(pong, "pong");

    // Step 7: delete unknown id — 404 decoded into a tagged field error.
    let outcome = classify_article(execute(client.delete(
        format!("{base}/articles/00000000-0000-0000-0000-000000000000"),
        Expect::Json,
    )));
    match outcome {
        ClassifiedOutcome::Application(meta, errors) => {
            assert_eq!(meta.status, 404);
            assert_eq!(errors, vec![(Field::ArticleId, "not found".to_string())]);
        }
        other => panic!("expected Application, got {other:?}"),
    }

    // Step 8: delete the created article — 204, body discarded.
    let outcome = classify_discard(execute(client.delete(
        format!("{base}/articles/{}", created.id),
        Expect::Nothing,
    )));
    assert_eq!(outcome, Ok(()));

    // Step 9: list — empty again.
    let outcome = classify_articles(execute(client.get(format!("{base}/articles"), Expect::Json)));
    assert_eq!(outcome, ClassifiedOutcome::Success(Vec::new()));
}

#[test]
fn unreachable_host_classifies_as_network_error() {
    let client = Client::headless();
    // Nothing listens on port 1.
    let outcome = classify_articles(execute(
        client.get("http://127.0.0.1:1/articles", Expect::Json),
    ));
    assert_eq!(
        outcome,
        ClassifiedOutcome::Transport(TransportError::NetworkUnreachable)
    );
}
