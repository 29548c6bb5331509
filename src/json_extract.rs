//! Best-effort cleanup of model output into something `serde_json` can read.
//!
//! This is a heuristic, not a parser. Known limitations:
//! - bounds are found by scanning for the first `{`/`[` and last `}`/`]`, so a
//!   brace inside prose after the payload widens the slice;
//! - trailing-comma removal and quote replacement also apply inside string
//!   literals (`"a,]"` becomes `"a]"`, a curly quote inside a value becomes a
//!   straight one and may terminate the string early).
//!
//! It never panics, and running it on its own output is a no-op.

use std::sync::LazyLock;

use regex::Regex;

static FENCE_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json").expect("fence pattern is valid"));
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"));

const FENCE: &str = "```";

pub fn extract(text: &str) -> String {
    let unfenced = strip_fences(text);
    let trimmed = unfenced.trim();

    let Some((open, close)) = payload_bounds(trimmed) else {
        return text.trim().to_string();
    };

    let sliced = trimmed[open..=close].trim();
    remove_trailing_commas(&normalize_quotes(sliced))
}

fn strip_fences(text: &str) -> String {
    let mut s = FENCE_JSON.replace_all(text, FENCE).into_owned();
    // Removing one fence can join stray backticks into another.
    while s.contains(FENCE) {
        s = s.replace(FENCE, "");
    }
    s
}

/// Byte offsets of the first opening and the last closing bracket, if the
/// closing one comes after the opening one.
fn payload_bounds(s: &str) -> Option<(usize, usize)> {
    let open = s.find(['{', '['])?;
    let close = s.rfind(['}', ']'])?;
    (close > open).then_some((open, close))
}

fn normalize_quotes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}

fn remove_trailing_commas(s: &str) -> String {
    let mut current = s.to_string();
    // `,,}` needs two passes since matches do not overlap.
    loop {
        let next = TRAILING_COMMA.replace_all(&current, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}
