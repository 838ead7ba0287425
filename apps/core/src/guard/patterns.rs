//! Dangerous-pattern table.
//!
//! Every row is plain data: a name, a threat category and a regex source.
//! The table is compiled once with case-insensitive, multi-line and
//! dot-matches-newline flags. Matching uses the `regex` crate, which runs in
//! linear time, so unbounded `[\s\S]*` spans cannot backtrack catastrophically
//! on attacker-controlled text.
//!
//! To add a rule, append a row to [`DANGEROUS_PATTERNS`]; the sanitizer and the
//! validators pick it up without any other change.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Replacement written in place of every dangerous match.
pub const FILTERED_MARKER: &str = "[FILTERED]";

/// Family a dangerous pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatCategory {
    /// Script/iframe tags, script URIs, event handlers, JS sinks
    Script,
    /// SQL keywords and stored procedures
    Sql,
    /// Shell metacharacters and exfiltration commands
    Command,
    /// `../` and `..\` sequences
    PathTraversal,
    /// Server-side template delimiters
    Template,
    /// HTML-based XSS vectors
    Xss,
}

impl fmt::Display for ThreatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ThreatCategory::Script => "script",
            ThreatCategory::Sql => "sql",
            ThreatCategory::Command => "command",
            ThreatCategory::PathTraversal => "path_traversal",
            ThreatCategory::Template => "template",
            ThreatCategory::Xss => "xss",
        };
        f.write_str(label)
    }
}

/// One row of the dangerous-pattern table
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    /// Stable identifier used in logs and tests
    pub name: &'static str,
    pub category: ThreatCategory,
    /// Regex source, compiled with `(?ims)` semantics
    pub pattern: &'static str,
}

/// Ordered table of injection/XSS/traversal constructs.
///
/// Order matters: rules are applied one after another and later rules see the
/// output of earlier ones.
pub const DANGEROUS_PATTERNS: &[PatternRule] = &[
    // Script injection
    PatternRule { name: "script_tag", category: ThreatCategory::Script, pattern: r"<script[\s\S]*?</script>" },
    PatternRule { name: "iframe_tag", category: ThreatCategory::Script, pattern: r"<iframe[\s\S]*?</iframe>" },
    PatternRule { name: "javascript_uri", category: ThreatCategory::Script, pattern: r"javascript:[\s\S]*" },
    PatternRule { name: "vbscript_uri", category: ThreatCategory::Script, pattern: r"vbscript:[\s\S]*" },
    PatternRule { name: "event_handler", category: ThreatCategory::Script, pattern: r"on\w+\s*=[\s\S]*" },
    PatternRule { name: "alert_call", category: ThreatCategory::Script, pattern: r"alert\s*\(" },
    PatternRule { name: "eval_call", category: ThreatCategory::Script, pattern: r"eval\s*\(" },
    PatternRule { name: "document_access", category: ThreatCategory::Script, pattern: r"document\." },
    // SQL injection
    PatternRule { name: "union_select", category: ThreatCategory::Sql, pattern: r"union\s+select[\s\S]*" },
    PatternRule { name: "drop_table", category: ThreatCategory::Sql, pattern: r"drop\s+table[\s\S]*" },
    PatternRule { name: "delete_from", category: ThreatCategory::Sql, pattern: r"delete\s+from[\s\S]*" },
    PatternRule { name: "insert_into", category: ThreatCategory::Sql, pattern: r"insert\s+into[\s\S]*" },
    PatternRule { name: "update_set", category: ThreatCategory::Sql, pattern: r"update\s+[\s\S]*\s+set" },
    PatternRule { name: "exec_call", category: ThreatCategory::Sql, pattern: r"exec\s*\([\s\S]*\)" },
    PatternRule { name: "execute_call", category: ThreatCategory::Sql, pattern: r"execute\s*\([\s\S]*\)" },
    PatternRule { name: "xp_cmdshell", category: ThreatCategory::Sql, pattern: r"xp_cmdshell" },
    // Command injection
    PatternRule { name: "pipe_nc", category: ThreatCategory::Command, pattern: r"\|\s*nc\s[\s\S]*" },
    PatternRule { name: "pipe_netcat", category: ThreatCategory::Command, pattern: r"\|\s*netcat\s[\s\S]*" },
    PatternRule { name: "chained_rm", category: ThreatCategory::Command, pattern: r";\s*rm\s[\s\S]*" },
    PatternRule { name: "chained_curl", category: ThreatCategory::Command, pattern: r";\s*curl\s[\s\S]*" },
    PatternRule { name: "chained_wget", category: ThreatCategory::Command, pattern: r";\s*wget\s[\s\S]*" },
    PatternRule { name: "backtick_substitution", category: ThreatCategory::Command, pattern: r"`[^`]*`" },
    PatternRule { name: "dollar_substitution", category: ThreatCategory::Command, pattern: r"\$\([^)]*\)" },
    PatternRule { name: "cat_etc", category: ThreatCategory::Command, pattern: r"cat\s+/etc/" },
    // Path traversal
    PatternRule { name: "dotdot_slash", category: ThreatCategory::PathTraversal, pattern: r"\.\./" },
    PatternRule { name: "dotdot_backslash", category: ThreatCategory::PathTraversal, pattern: r"\.\.\\" },
    // Template injection
    PatternRule { name: "mustache_expression", category: ThreatCategory::Template, pattern: r"\{\{[^}]*\}\}" },
    PatternRule { name: "jinja_statement", category: ThreatCategory::Template, pattern: r"\{%[^%]*%\}" },
    PatternRule { name: "smarty_expression", category: ThreatCategory::Template, pattern: r"\{\$[^}]*\}" },
    // XSS
    PatternRule { name: "img_onerror", category: ThreatCategory::Xss, pattern: r"<img[\s\S]*?onerror[\s\S]*?>" },
    PatternRule { name: "svg_onload", category: ThreatCategory::Xss, pattern: r"<svg[\s\S]*?onload[\s\S]*?>" },
    PatternRule { name: "data_text_html", category: ThreatCategory::Xss, pattern: r"data:text/html[\s\S]*" },
    PatternRule { name: "data_image_svg", category: ThreatCategory::Xss, pattern: r"data:image/svg\+xml[\s\S]*" },
];

/// A table row together with its compiled regex
pub struct CompiledRule {
    pub rule: PatternRule,
    pub regex: Regex,
}

/// Compile a rule source with the flags every dangerous pattern uses.
pub fn compile_rule(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(true)
        .dot_matches_new_line(true)
        .build()
}

// Compile patterns once at startup.
pub static COMPILED_PATTERNS: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    DANGEROUS_PATTERNS
        .iter()
        .map(|rule| CompiledRule {
            rule: *rule,
            regex: compile_rule(rule.pattern).expect("Invalid regex: dangerous pattern"),
        })
        .collect()
});

/// A dangerous pattern found in a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatMatch {
    pub name: &'static str,
    pub category: ThreatCategory,
}

/// Whether any dangerous pattern matches `text`.
pub fn contains_dangerous_pattern(text: &str) -> bool {
    COMPILED_PATTERNS.iter().any(|c| c.regex.is_match(text))
}

/// List every rule that matches `text`, in table order. The text is not modified.
pub fn scan_threats(text: &str) -> Vec<ThreatMatch> {
    COMPILED_PATTERNS
        .iter()
        .filter(|c| c.regex.is_match(text))
        .map(|c| ThreatMatch {
            name: c.rule.name,
            category: c.rule.category,
        })
        .collect()
}
