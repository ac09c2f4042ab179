//! Bot-protection detection on fetched HTML.
//!
//! This is a heuristic. Real product pages that embed a CAPTCHA widget
//! elsewhere (newsletter forms, reviews) can be flagged, and challenge
//! pages that use unseen markup pass through. Short-body rejection errs on
//! the side of reporting bot protection: a sub-threshold page is never a
//! useful product page.
//!
//! Cloudflare injects `/cdn-cgi/challenge-platform/scripts/jsd/main.js` into
//! ordinary pages it proxies, so only the interstitial's `challenge-platform/h/`
//! orchestration path and its `_cf_chl_opt` bootstrap count as markers.

/// Lower-cased markers of challenge, CAPTCHA and block pages served by the
/// common anti-automation vendors.
const CHALLENGE_MARKERS: [&str; 17] = [
    "cf-browser-verification",
    "cf-chl-",
    "challenge-platform/h/",
    "_cf_chl_opt",
    "cf-turnstile",
    "checking your browser",
    "g-recaptcha",
    "h-captcha",
    "px-captcha",
    "captcha-delivery.com",
    "_incapsula_resource",
    "verify you are human",
    "are you a robot",
    "access denied",
    "request unsuccessful. incapsula",
    "pardon our interruption",
    "enable javascript and cookies to continue",
];

/// Returns the reason the page looks like a bot wall, or `None` if it looks
/// like real content.
#[must_use]
pub fn detect_bot_protection(html: &str, min_body_chars: usize) -> Option<String> {
    let chars = html.chars().count();
    if chars < min_body_chars {
        return Some(format!(
            "body too short ({chars} chars, expected at least {min_body_chars})"
        ));
    }

    let lower = html.to_lowercase();
    CHALLENGE_MARKERS
        .iter()
        .find(|marker| lower.contains(*marker))
        .map(|marker| format!("challenge marker '{marker}' present"))
}
