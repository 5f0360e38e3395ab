use super::*;

fn test_client(base_url: &str) -> AdminClient {
    AdminClient::with_base_url("shpat_test", base_url, 5, "sheetsync-test", 0, 0)
        .expect("client construction should not fail")
}

fn credentials(domain: &str) -> ShopifyCredentials {
    ShopifyCredentials {
        shop_domain: domain.to_owned(),
        access_token: "shpat_test".to_owned(),
        api_version: "2024-01".to_owned(),
    }
}

#[test]
fn new_builds_admin_base_url() {
    let client = AdminClient::new(&credentials("https://tires.myshopify.com/"), 5, "ua", 0, 0)
        .unwrap();
    assert_eq!(
        client.base_url.as_str(),
        "https://tires.myshopify.com/admin/api/2024-01/"
    );
    assert_eq!(client.shop_domain(), "tires.myshopify.com");
}

#[test]
fn new_rejects_empty_domain() {
    let result = AdminClient::new(&credentials("https://"), 5, "ua", 0, 0);
    assert!(matches!(result, Err(ShopifyError::InvalidShopDomain { .. })));
}

#[test]
fn normalize_shop_domain_strips_scheme_and_slash() {
    assert_eq!(normalize_shop_domain("https://tires.myshopify.com/"), "tires.myshopify.com");
    assert_eq!(normalize_shop_domain("http://tires.myshopify.com"), "tires.myshopify.com");
    assert_eq!(normalize_shop_domain("  tires.myshopify.com  "), "tires.myshopify.com");
}

#[test]
fn endpoint_appends_segments_to_base() {
    let client = test_client("https://tires.myshopify.com/admin/api/2024-01");
    let url = client.endpoint(&["products", "42", "variants.json"]);
    assert_eq!(
        url.as_str(),
        "https://tires.myshopify.com/admin/api/2024-01/products/42/variants.json"
    );
}

#[test]
fn endpoint_at_server_root() {
    let client = test_client("http://127.0.0.1:9999");
    let url = client.endpoint(&["products", "count.json"]);
    assert_eq!(url.as_str(), "http://127.0.0.1:9999/products/count.json");
}

#[test]
fn parse_retry_after_rounds_up_fractions() {
    assert_eq!(parse_retry_after("2.0"), Some(2));
    assert_eq!(parse_retry_after("1.5"), Some(2));
    assert_eq!(parse_retry_after("10"), Some(10));
    assert_eq!(parse_retry_after("soon"), None);
    assert_eq!(parse_retry_after("-1"), None);
}

#[test]
fn error_message_reads_string_errors() {
    assert_eq!(
        error_message(r#"{"errors":"[API] Invalid API key or access token"}"#),
        "[API] Invalid API key or access token"
    );
}

#[test]
fn error_message_renders_field_errors() {
    let message = error_message(r#"{"errors":{"handle":["has already been taken"]}}"#);
    assert!(message.contains("has already been taken"), "got {message}");
}

#[test]
fn error_message_falls_back_to_body() {
    assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
}
