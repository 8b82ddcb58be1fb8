//! Canonical key normalization.
//!
//! Source files spell the same place several ways (`SproutTower1F`,
//! `SPROUT_TOWER_1F`, `Sprout Tower 1F`). Every spelling is run through one
//! ordered chain of rewrites so they all meet on a single canonical key.
//! The chain is idempotent: `normalize(normalize(s)) == normalize(s)`.


use heck::ToTitleCase;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Nouns whose trailing number is a floor, not an index. Route numbers
/// must never be turned into floors, so this list stays closed.
pub const FLOOR_NOUNS: &[&str] = &[
    "tower", "building", "floor", "level", "gym", "center", "house", "cave", "tunnel", "path",
    "mansion",
];

/// A single regex rewrite, applied until the input stops changing.
struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    fn apply(&self, input: String) -> String {
        let mut current = input;
        loop {
            match self.pattern.replace_all(&current, self.replacement) {
                Cow::Borrowed(_) => return current,
                Cow::Owned(next) => {
                    if next == current {
                        return current;
                    }
                    current = next;
                }
            }
        }
    }
}

// Step 1: word boundaries hidden in camel/Pascal case and letter/digit runs
static CASE_BOUNDARIES: LazyLock<[RewriteRule; 4]> = LazyLock::new(|| {
    [
        RewriteRule::new(r"(\p{Ll})(\p{Lu})", "${1}_${2}"),
        RewriteRule::new(r"(\p{Lu}+)(\p{Lu}\p{Ll})", "${1}_${2}"),
        RewriteRule::new(r"(\p{L})(\d)", "${1}_${2}"),
        RewriteRule::new(r"(\d)(\p{Lu})", "${1}_${2}"),
    ]
});

// Step 3 (underscores included so a stray `_ ` never leaves a double separator)
static SEPARATOR_RUNS: LazyLock<RewriteRule> =
    LazyLock::new(|| RewriteRule::new(r"[\s\-._]+", "_"));

// Steps 4-7, in order
static FLOOR_RULES: LazyLock<[RewriteRule; 4]> = LazyLock::new(|| {
    [
        // b_1_f -> b_1f
        RewriteRule::new(r"(^|_)b_(\d+)_f(_|$)", "${1}b_${2}f${3}"),
        // tower_1_f -> tower_1f
        RewriteRule::new(r"(?i)([\p{L}\p{N}]+)_(\d+)_f(_|$)", "${1}_${2}f${3}"),
        // tower_1 -> tower_1f, but route_29 stays
        RewriteRule::new(
            &format!(r"(^|_)({})_(\d+)(_|$)", FLOOR_NOUNS.join("|")),
            "${1}${2}_${3}f${4}",
        ),
        // path_2_blackthorn_side -> path_2f_blackthorn_side
        RewriteRule::new(
            r"([\p{L}\p{N}]+)_(\d+)_([\p{L}\p{N}]+)_side(_|$)",
            "${1}_${2}f_${3}_side${4}",
        ),
    ]
});

static REPEATED_UNDERSCORES: LazyLock<RewriteRule> =
    LazyLock::new(|| RewriteRule::new(r"_{2,}", "_"));

static FLOOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+f$").unwrap());

/// Canonicalize a raw location identifier.
pub fn normalize(raw: &str) -> String {
    let mut key = raw.to_string();
    for rule in CASE_BOUNDARIES.iter() {
        key = rule.apply(key);
    }
    key = key.to_lowercase();
    key = SEPARATOR_RUNS.apply(key);
    for rule in FLOOR_RULES.iter() {
        key = rule.apply(key);
    }
    key = REPEATED_UNDERSCORES.apply(key);
    key.trim_matches('_').to_string()
}

/// Key for a constant-table identifier (`UNION_CAVE_B1F` -> `union_cave_b1f`).
///
/// Constants are already upper snake case, so they are only lowercased here.
/// Consolidation later folds these onto their fully normalized spelling.
pub fn constant_key(raw: &str) -> String {
    raw.to_ascii_lowercase()
}

/// Best-effort human name for an identifier with no display text of its own.
///
/// `UNION_CAVE_B1F` -> `Union Cave B1F`, `Route29` -> `Route 29`.
pub fn display_name_guess(raw: &str) -> String {
    let key = normalize(raw);
    let tokens: Vec<&str> = key.split('_').filter(|t| !t.is_empty()).collect();

    let mut words: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let next_is_floor = tokens.get(i + 1).is_some_and(|t| FLOOR_TOKEN.is_match(t));
        if token == "b" && next_is_floor {
            words.push(format!("B{}", tokens[i + 1].to_uppercase()));
            i += 2;
            continue;
        }
        if FLOOR_TOKEN.is_match(token) {
            words.push(token.to_uppercase());
        } else {
            words.push(token.to_title_case());
        }
        i += 1;
    }
    words.join(" ")
}
