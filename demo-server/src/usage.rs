//! Static usage hints returned alongside validation failures.

use serde_json::{json, Value};

use crate::numbers::InvalidElement;

pub fn greet(base: &str) -> Value {
    json!({
        "error": "Missing query parameter: \"name\".",
        "how_to_use": "Send a GET request with a \"name\" query parameter.",
        "example_url": format!("{base}/greet?name=David"),
        "accepted_types": {
            "name": "string (required)",
            "lang": "string (optional, default: \"en\", options: \"en\" | \"he\" | \"es\")"
        },
        "example_curl": format!("curl \"{base}/greet?name=David&lang=en\"")
    })
}

pub fn average(base: &str) -> Value {
    json!({
        "error": "Missing or invalid \"numbers\" array in JSON body.",
        "how_to_use": "Send a POST request with JSON body containing \"numbers\": an array of numbers.",
        "expected_body_schema": {
            "numbers": "number[] (required, non-empty)"
        },
        "example_body": {
            "numbers": [10, 20, 30, 40]
        },
        "example_curl": format!(
            "curl -X POST {base}/math/average -H \"Content-Type: application/json\" -d '{{\"numbers\":[10,20,30,40]}}'"
        )
    })
}

pub fn non_numeric(received: &[Value], invalid: &InvalidElement) -> Value {
    json!({
        "error": "All elements in \"numbers\" must be valid numeric values.",
        "received": received,
        "first_invalid": invalid,
        "example_valid_numbers": [1, 2.5, 100]
    })
}

pub fn out_of_range(received: &[Value]) -> Value {
    json!({
        "error": "The sum of \"numbers\" is too large to represent.",
        "received": received,
        "example_valid_numbers": [1, 2.5, 100]
    })
}

pub fn shout(base: &str) -> Value {
    json!({
        "error": "Missing path parameter: \"word\".",
        "how_to_use": "Send a PUT request with a word in the URL path.",
        "example_url": format!("{base}/shout/hello"),
        "accepted_types": {
            "word": "string (required)"
        },
        "example_curl": format!("curl -X PUT {base}/shout/hello")
    })
}

pub fn secure_delete(base: &str) -> Value {
    json!({
        "error": "Missing required header: \"x-role\".",
        "how_to_use": "Send a DELETE request with a header named \"x-role\".",
        "expected_header": {
            "x-role": "string (e.g. \"admin\", \"editor\", \"viewer\")"
        },
        "example_curl": format!("curl -X DELETE {base}/secure/resource -H \"x-role: admin\"")
    })
}

pub fn forbidden(role: &str) -> Value {
    json!({
        "error": "Forbidden: only role \"admin\" can delete this resource.",
        "your_role": role,
        "allowed_roles": [crate::routes::ADMIN_ROLE]
    })
}

/// Directory of every route the service exposes.
pub fn endpoint_directory() -> Value {
    json!({
        "error": "Route not found.",
        "message": "This is a demo server. Available endpoints:",
        "endpoints": [
            {
                "method": "GET",
                "path": "/greet",
                "usage": "/greet?name=YourName&lang=en"
            },
            {
                "method": "POST",
                "path": "/math/average",
                "usage": "POST JSON: { \"numbers\": [1, 2, 3] }"
            },
            {
                "method": "PUT",
                "path": "/shout/:word",
                "usage": "/shout/hello"
            },
            {
                "method": "DELETE",
                "path": "/secure/resource",
                "usage": "Header: x-role: admin"
            }
        ]
    })
}
