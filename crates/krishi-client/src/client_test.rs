use super::*;

fn test_client(base_url: &str) -> BackendClient {
    BackendClient::with_base_url(base_url).expect("client construction should not fail")
}

#[test]
fn build_url_without_params() {
    let client = test_client("http://10.0.2.2:5000");
    assert_eq!(
        client.build_url("/healthy_advice", &[]),
        "http://10.0.2.2:5000/healthy_advice"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("http://10.0.2.2:5000/");
    assert_eq!(
        client.build_url("store_finder", &[("lat", "18.52"), ("lon", "73.85")]),
        "http://10.0.2.2:5000/store_finder?lat=18.52&lon=73.85"
    );
}

#[test]
fn build_url_encodes_spaces_as_percent_twenty() {
    let client = test_client("http://10.0.2.2:5000");
    assert_eq!(
        client.build_url("disease_info", &[("disease_name", "Leaf Blight")]),
        "http://10.0.2.2:5000/disease_info?disease_name=Leaf%20Blight"
    );
}

#[test]
fn build_url_encodes_reserved_characters_like_encode_uri_component() {
    let client = test_client("http://10.0.2.2:5000");
    let url = client.build_url(
        "disease_info",
        &[("disease_name", "Pepper,_bell___Bacterial_spot (a&b)")],
    );
    assert_eq!(
        url,
        "http://10.0.2.2:5000/disease_info?disease_name=Pepper%2C_bell___Bacterial_spot%20(a%26b)"
    );
}

#[test]
fn with_base_url_rejects_garbage() {
    let err = BackendClient::with_base_url("not a url").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn non_blank_trims_and_drops_empty() {
    assert_eq!(non_blank(Some("  pesticide_store ".into())).as_deref(), Some("pesticide_store"));
    assert_eq!(non_blank(Some("   ".into())), None);
    assert_eq!(non_blank(None), None);
}

#[test]
fn error_field_reads_any_string_including_empty() {
    assert_eq!(error_field(&serde_json::json!({ "error": "quota" })), Some("quota"));
    assert_eq!(error_field(&serde_json::json!({ "error": "" })), Some(""));
    assert_eq!(error_field(&serde_json::json!({ "error": null })), None);
    assert_eq!(error_field(&serde_json::json!({ "stores": [] })), None);
}
