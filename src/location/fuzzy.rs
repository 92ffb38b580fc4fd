//! Fuzzy string scoring on a 0–100 scale.
//!
//! Every scorer is built on normalized Levenshtein similarity. Scores are
//! rounded to whole points so that threshold comparisons are stable.

use super::text::full_process;

/// Plain similarity of two strings. Empty input scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_score(strsim::normalized_levenshtein(a, b))
}

/// Best `ratio` of the shorter string against every equal-length window of
/// the longer one. A substring match scores 100.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();
    let (short, long, short_len, long_len) = if a_len <= b_len {
        (a, b, a_len, b_len)
    } else {
        (b, a, b_len, a_len)
    };

    if short_len == 0 {
        return 0;
    }
    if short_len == long_len {
        return ratio(short, long);
    }

    let long_chars: Vec<char> = long.chars().collect();
    let mut best = 0;
    for start in 0..=(long_len - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        let score = ratio(short, &window);
        if score == 100 {
            return 100;
        }
        best = best.max(score);
    }
    best
}

/// `ratio` after sorting the processed tokens of both strings.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// `partial_ratio` after sorting the processed tokens of both strings.
pub fn partial_token_sort_ratio(a: &str, b: &str) -> u8 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compares the shared tokens against each side's shared+remaining tokens.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, ratio)
}

pub fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    token_set_with(a, b, partial_ratio)
}

/// Best-match score: picks the most favourable of the scorers above,
/// discounting the partial and token-reordering variants.
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    const UNBASE_SCALE: f64 = 0.95;

    let p1 = full_process(a);
    let p2 = full_process(b);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let base = f64::from(ratio(&p1, &p2));

    let (l1, l2) = (p1.chars().count() as f64, p2.chars().count() as f64);
    let len_ratio = l1.max(l2) / l1.min(l2);

    if len_ratio < 1.5 {
        let tsor = f64::from(token_sort_ratio(&p1, &p2)) * UNBASE_SCALE;
        let tser = f64::from(token_set_ratio(&p1, &p2)) * UNBASE_SCALE;
        return to_score(base.max(tsor).max(tser) / 100.0);
    }

    let partial_scale = if len_ratio > 8.0 { 0.6 } else { 0.9 };
    let partial = f64::from(partial_ratio(&p1, &p2)) * partial_scale;
    let ptsor = f64::from(partial_token_sort_ratio(&p1, &p2)) * UNBASE_SCALE * partial_scale;
    let ptser = f64::from(partial_token_set_ratio(&p1, &p2)) * UNBASE_SCALE * partial_scale;

    to_score(base.max(partial).max(ptsor).max(ptser) / 100.0)
}

/// Index and score of the best-scoring choice. The first maximum wins.
pub fn best_match<S, F>(query: &str, choices: &[S], scorer: F) -> Option<(usize, u8)>
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> u8,
{
    let mut best: Option<(usize, u8)> = None;
    for (idx, choice) in choices.iter().enumerate() {
        let score = scorer(query, choice.as_ref());
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

fn sorted_tokens(s: &str) -> String {
    let processed = full_process(s);
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_set_with(a: &str, b: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    use std::collections::BTreeSet;

    let pa = full_process(a);
    let pb = full_process(b);
    let ta: BTreeSet<&str> = pa.split_whitespace().collect();
    let tb: BTreeSet<&str> = pb.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0;
    }

    let join = |set: Vec<&&str>| set.into_iter().copied().collect::<Vec<_>>().join(" ");
    let common = join(ta.intersection(&tb).collect());
    let diff_ab = join(ta.difference(&tb).collect());
    let diff_ba = join(tb.difference(&ta).collect());

    let combined_a = format!("{common} {diff_ab}").trim().to_string();
    let combined_b = format!("{common} {diff_ba}").trim().to_string();

    scorer(&common, &combined_a)
        .max(scorer(&common, &combined_b))
        .max(scorer(&combined_a, &combined_b))
}
