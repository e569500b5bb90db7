//! CORS middleware configuration for cross-origin requests.
//!
//! Builds an `actix_cors::Cors` from [`CorsConfig`]. A `*` entry in any list
//! allows everything for that list; development profiles use this, while
//! production lists the admin console origins explicitly.

use actix_cors::Cors;
use actix_web::http::{header::HeaderName, Method};

use mt_shared::config::CorsConfig;

const WILDCARD: &str = "*";

/// Creates a CORS middleware instance from configuration.
///
/// Entries that are not valid methods or header names are skipped with a
/// warning instead of failing application startup.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default().max_age(config.max_age);

    if allows_any(&config.allowed_origins) {
        tracing::debug!("CORS allows any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|o| o.trim()).filter(|o| !o.is_empty()) {
            tracing::debug!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }

    if allows_any(&config.allowed_methods) {
        cors = cors.allow_any_method();
    } else {
        cors = cors.allowed_methods(parse_methods(&config.allowed_methods));
    }

    if allows_any(&config.allowed_headers) {
        cors = cors.allow_any_header();
    } else {
        cors = cors.allowed_headers(parse_headers(&config.allowed_headers));
    }

    cors.expose_headers(vec![HeaderName::from_static("x-request-id")])
}

fn allows_any(values: &[String]) -> bool {
    values.iter().any(|v| v.trim() == WILDCARD)
}

/// Parse method names, skipping invalid entries
pub fn parse_methods(values: &[String]) -> Vec<Method> {
    values
        .iter()
        .filter_map(|value| match Method::from_bytes(value.trim().to_uppercase().as_bytes()) {
            Ok(method) => Some(method),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS method: {}", value);
                None
            }
        })
        .collect()
}

/// Parse header names, skipping invalid entries
pub fn parse_headers(values: &[String]) -> Vec<HeaderName> {
    values
        .iter()
        .filter_map(|value| match HeaderName::from_bytes(value.trim().as_bytes()) {
            Ok(name) => Some(name),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS header: {}", value);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_methods_skips_invalid() {
        let methods = parse_methods(&strings(&["get", "POST", "not a method"]));
        assert_eq!(methods, vec![Method::GET, Method::POST]);
    }

    #[test]
    fn test_parse_headers_skips_invalid() {
        let headers = parse_headers(&strings(&["content-type", "Authorization", "bad header"]));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].as_str(), "content-type");
        assert_eq!(headers[1].as_str(), "authorization");
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(allows_any(&strings(&["*"])));
        assert!(!allows_any(&strings(&["https://admin.example.com"])));
        assert!(!allows_any(&[]));
    }

    #[test]
    fn test_create_cors_from_profiles() {
        let _cors = create_cors(&CorsConfig::development());
        let _cors = create_cors(&CorsConfig {
            allowed_origins: strings(&["https://admin.example.com"]),
            ..CorsConfig::default()
        });
    }
}
