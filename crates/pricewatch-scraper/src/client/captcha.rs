//! Anti-bot challenge detection.

/// Lowercase body fragments seen on retailer challenge pages.
const CHALLENGE_MARKERS: [&str; 5] = [
    "captcha",
    "robot check",
    "enter the characters you see",
    "automated access",
    "sorry, we just need to make sure you're not a robot",
];

/// True for rate-limit statuses (429, 503) or a body carrying a challenge
/// marker, regardless of status.
#[must_use]
pub fn is_captcha_like(status: u16, body: &str) -> bool {
    if status == 429 || status == 503 {
        return true;
    }
    let lower = body.to_lowercase();
    CHALLENGE_MARKERS.iter().any(|marker| lower.contains(marker))
}
