//! Field limits and fixed word lists used by the validators.

/// Maximum domain length in characters
pub const MAX_DOMAIN_LENGTH: usize = 255;
/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 500;
/// Maximum article body length in characters (1MB of text)
pub const MAX_BODY_LENGTH: usize = 1_000_000;

pub const MIN_DOMAIN_LENGTH: usize = 3;
pub const MIN_TITLE_LENGTH: usize = 3;
pub const MIN_BODY_LENGTH: usize = 50;

/// Any whitespace-delimited token longer than this is treated as a payload.
pub const MAX_WORD_LENGTH: usize = 100;

/// Share of `< > { } [ ] \ ` $` characters above which content is rejected.
pub const SUSPICIOUS_CHAR_RATIO: f64 = 0.10;

/// Known shorteners and phishing hosts, compared lowercase.
pub const SUSPICIOUS_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "clickjacking.com",
    "phishing.com",
    "malware.com",
];

pub const SPAM_PHRASES: &[&str] = &[
    "click here",
    "buy now",
    "limited time",
    "act now",
    "free money",
    "earn money fast",
    "work from home",
    "lose weight fast",
    "enlarge your",
    "nigerian prince",
    "lottery winner",
];
