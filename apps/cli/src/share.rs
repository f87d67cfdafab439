//! Prefilled share message for a roast, plus the external compose link.
//! Opening the link is the user's business; nothing here talks to the
//! network.

use reqwest::Url;

pub const APP_URL: &str = "https://roastmycv.app";
pub const HASHTAG: &str = "#RoastMyCV";
const COMPOSE_URL: &str = "https://twitter.com/intent/tweet";
const EXCERPT_MAX_CHARS: usize = 120;

/// Builds the share text: a trimmed 120-character excerpt of the roast in
/// quotes, the application URL, and the hashtag. A missing or blank roast
/// drops the quoted snippet entirely.
pub fn share_message(roast_text: Option<&str>) -> String {
    match roast_text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => format!(
            "My resume just got roasted: \"{}\" {APP_URL} {HASHTAG}",
            excerpt(text)
        ),
        None => format!("My resume just got roasted. {APP_URL} {HASHTAG}"),
    }
}

/// The third-party compose URL with the message URL-encoded into its `text`
/// parameter.
pub fn compose_url(message: &str) -> Url {
    Url::parse_with_params(COMPOSE_URL, &[("text", message)])
        .expect("static compose URL is valid")
}

fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_roast_is_quoted_whole() {
        let msg = share_message(Some("Your CV reads like a LinkedIn fever dream."));
        assert!(msg.contains("\"Your CV reads like a LinkedIn fever dream.\""));
        assert!(msg.contains(APP_URL));
        assert!(msg.contains(HASHTAG));
    }

    #[test]
    fn test_long_roast_truncates_to_120_chars_after_trim() {
        let long = format!("  {}  ", "x".repeat(150));
        let msg = share_message(Some(&long));
        let expected = "x".repeat(120);
        assert!(msg.contains(&format!("\"{expected}\"")));
        assert!(!msg.contains(&"x".repeat(121)));
    }

    #[test]
    fn test_exactly_120_chars_is_untouched() {
        let text = "y".repeat(120);
        let msg = share_message(Some(&text));
        assert!(msg.contains(&format!("\"{text}\"")));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let text = "é".repeat(130);
        let msg = share_message(Some(&text));
        assert!(msg.contains(&format!("\"{}\"", "é".repeat(120))));
    }

    #[test]
    fn test_absent_roast_omits_snippet() {
        let msg = share_message(None);
        assert!(!msg.contains('"'));
        assert!(msg.contains(APP_URL));
        assert!(msg.contains(HASHTAG));
    }

    #[test]
    fn test_blank_roast_treated_as_absent() {
        assert_eq!(share_message(Some("   ")), share_message(None));
    }

    #[test]
    fn test_compose_url_encodes_message() {
        let url = compose_url("roasted & burned #RoastMyCV");
        assert!(url.as_str().starts_with("https://twitter.com/intent/tweet?text="));
        assert!(url.as_str().contains("roasted+%26+burned+%23RoastMyCV"));
    }
}
