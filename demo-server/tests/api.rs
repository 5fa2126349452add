use axum::http::{self, Request, StatusCode};
use axum::Router;
use demo_server::{app, ServerConfig};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    app(&ServerConfig::default())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn role_request(role: &str) -> Request<String> {
    Request::builder()
        .method("DELETE")
        .uri("/secure/resource")
        .header("x-role", role)
        .body(String::new())
        .unwrap()
}

async fn send(request: Request<String>) -> (StatusCode, Value) {
    let resp = router().oneshot(request).await.unwrap();
    let status = resp.status();
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json",
        "every response is JSON"
    );
    (status, body_json(resp).await)
}

/// Success bodies carry `result`, failures carry `error`, never both.
fn assert_exclusive(status: StatusCode, body: &Value) {
    if status == StatusCode::OK {
        assert!(body.get("result").is_some() && body.get("error").is_none());
        assert!(body.get("input").is_some());
    } else {
        assert!(body.get("error").is_some() && body.get("result").is_none());
    }
}

// --- greet ---

#[tokio::test]
async fn greet_defaults_to_english() {
    let (status, body) = send(empty_request("GET", "/greet?name=David")).await;
    assert_eq!(status, StatusCode::OK);
    assert_exclusive(status, &body);
    assert_eq!(body["input"], json!({"name": "David", "lang": "en"}));
    assert_eq!(body["result"], "Hello, David!");
    assert_eq!(
        body["info"],
        "This endpoint demonstrates reading data from query parameters."
    );
}

#[tokio::test]
async fn greet_hebrew_and_spanish() {
    let (_, body) = send(empty_request("GET", "/greet?name=Yossi&lang=he")).await;
    assert_eq!(body["result"], "שלום, Yossi!");
    assert_eq!(body["input"]["lang"], "he");

    let (_, body) = send(empty_request("GET", "/greet?name=Yossi&lang=es")).await;
    assert_eq!(body["result"], "¡Hola, Yossi!");
}

#[tokio::test]
async fn greet_unknown_lang_echoes_input_but_uses_english() {
    let (status, body) = send(empty_request("GET", "/greet?name=Ana&lang=fr")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input"]["lang"], "fr");
    assert_eq!(body["result"], "Hello, Ana!");
}

#[tokio::test]
async fn greet_decodes_query_string() {
    let (_, body) = send(empty_request("GET", "/greet?name=Mar%C3%ADa%20Jos%C3%A9")).await;
    assert_eq!(body["result"], "Hello, María José!");
}

#[tokio::test]
async fn greet_missing_name_returns_400() {
    for uri in ["/greet", "/greet?lang=he", "/greet?name="] {
        let (status, body) = send(empty_request("GET", uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_exclusive(status, &body);
        assert_eq!(body["error"], "Missing query parameter: \"name\".");
        assert_eq!(body["example_url"], "http://localhost:3000/greet?name=David");
        assert!(body["accepted_types"]["lang"].is_string());
    }
}

// --- average ---

#[tokio::test]
async fn average_of_example_numbers() {
    let (status, body) = send(json_request(
        "POST",
        "/math/average",
        r#"{"numbers":[10,20,30,40]}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_exclusive(status, &body);
    assert_eq!(body["input"], json!({"numbers": [10, 20, 30, 40]}));
    assert_eq!(body["result"], json!({"count": 4, "sum": 100, "average": 25}));
}

#[tokio::test]
async fn average_single_element() {
    let (status, body) = send(json_request("POST", "/math/average", r#"{"numbers":[7.5]}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["count"], 1);
    assert_eq!(body["result"]["average"].as_f64(), Some(7.5));
}

#[tokio::test]
async fn average_coerces_numeric_strings_and_echoes_original() {
    let (status, body) = send(json_request(
        "POST",
        "/math/average",
        r#"{"numbers":["1","2","3","4","5"]}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["input"]["numbers"], json!(["1", "2", "3", "4", "5"]));
    assert_eq!(body["result"], json!({"count": 5, "sum": 15, "average": 3}));
}

#[tokio::test]
async fn average_fractional_result() {
    let (_, body) = send(json_request("POST", "/math/average", r#"{"numbers":[1,2]}"#)).await;
    assert_eq!(body["result"]["sum"], 3);
    assert_eq!(body["result"]["average"].as_f64(), Some(1.5));
}

#[tokio::test]
async fn average_missing_or_empty_returns_400() {
    for body in [
        r#"{"numbers":[]}"#,
        r#"{}"#,
        r#"{"numbers":"1,2,3"}"#,
        r#"{"numbers":null}"#,
        r#"[1,2,3]"#,
        r#"{"numbers":[1,2"#,
    ] {
        let (status, resp) = send(json_request("POST", "/math/average", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_exclusive(status, &resp);
        assert_eq!(resp["error"], "Missing or invalid \"numbers\" array in JSON body.");
        assert_eq!(resp["example_body"], json!({"numbers": [10, 20, 30, 40]}));
    }
}

#[tokio::test]
async fn average_without_json_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/math/average")
        .body(r#"{"numbers":[1]}"#.to_string())
        .unwrap();
    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["how_to_use"].is_string());
}

#[tokio::test]
async fn average_non_numeric_element_returns_400() {
    let (status, body) =
        send(json_request("POST", "/math/average", r#"{"numbers":["a",1]}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_exclusive(status, &body);
    assert_eq!(
        body["error"],
        "All elements in \"numbers\" must be valid numeric values."
    );
    assert_eq!(body["received"], json!(["a", 1]));
    assert_eq!(body["first_invalid"], json!({"index": 0, "value": "a"}));
    assert_eq!(body["example_valid_numbers"], json!([1, 2.5, 100]));
}

#[tokio::test]
async fn average_overflowing_sum_returns_400() {
    let (status, body) = send(json_request(
        "POST",
        "/math/average",
        r#"{"numbers":[1e308,1e308]}"#,
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_exclusive(status, &body);
    assert_eq!(
        body["error"],
        "The sum of \"numbers\" is too large to represent."
    );
    assert_eq!(body["received"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn average_rejects_loose_javascript_coercions() {
    for body in [
        r#"{"numbers":[true]}"#,
        r#"{"numbers":[null]}"#,
        r#"{"numbers":[""]}"#,
        r#"{"numbers":["0x10"]}"#,
    ] {
        let (status, resp) = send(json_request("POST", "/math/average", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(resp["first_invalid"]["index"], 0);
    }
}

// --- shout ---

#[tokio::test]
async fn shout_short_word() {
    let (status, body) = send(empty_request("PUT", "/shout/hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_exclusive(status, &body);
    assert_eq!(body["input"], json!({"word": "hello"}));
    assert_eq!(
        body["result"],
        json!({"uppercased": "HELLO", "length": 5, "is_long": false})
    );
}

#[tokio::test]
async fn shout_long_word() {
    let (_, body) = send(empty_request("PUT", "/shout/helloo")).await;
    assert_eq!(body["result"]["is_long"], true);
    assert_eq!(body["result"]["length"], 6);
}

#[tokio::test]
async fn shout_decodes_path_segment() {
    let (_, body) = send(empty_request("PUT", "/shout/big%20cat")).await;
    assert_eq!(body["input"]["word"], "big cat");
    assert_eq!(body["result"]["uppercased"], "BIG CAT");
}

// --- secure delete ---

#[tokio::test]
async fn delete_without_role_returns_400() {
    let (status, body) = send(empty_request("DELETE", "/secure/resource")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_exclusive(status, &body);
    assert_eq!(body["error"], "Missing required header: \"x-role\".");
}

#[tokio::test]
async fn delete_with_empty_role_returns_400() {
    let (status, _) = send(role_request("")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_as_viewer_returns_403() {
    let (status, body) = send(role_request("viewer")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_exclusive(status, &body);
    assert_eq!(body["your_role"], "viewer");
    assert_eq!(body["allowed_roles"], json!(["admin"]));
}

#[tokio::test]
async fn delete_role_match_is_exact() {
    let (status, body) = send(role_request("Admin")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["your_role"], "Admin");
}

#[tokio::test]
async fn delete_as_admin_returns_200() {
    let (status, body) = send(role_request("admin")).await;
    assert_eq!(status, StatusCode::OK);
    assert_exclusive(status, &body);
    assert_eq!(body["input"], json!({"role": "admin"}));
    assert_eq!(
        body["result"],
        "Resource deleted successfully (not really, this is just a demo)."
    );
}

// --- fallback ---

#[tokio::test]
async fn unknown_paths_return_directory() {
    for (method, uri) in [
        ("GET", "/"),
        ("GET", "/nope"),
        ("POST", "/greet/extra"),
        ("PUT", "/shout/"),
        ("PUT", "/shout/a/b"),
    ] {
        let (status, body) = send(empty_request(method, uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_exclusive(status, &body);
        assert_eq!(body["endpoints"].as_array().unwrap().len(), 4);
    }
}

#[tokio::test]
async fn wrong_method_on_known_path_returns_directory() {
    for (method, uri) in [
        ("POST", "/greet?name=x"),
        ("GET", "/math/average"),
        ("GET", "/shout/hello"),
        ("GET", "/secure/resource"),
    ] {
        let (status, body) = send(empty_request(method, uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
        assert_eq!(body["error"], "Route not found.");
    }
}
