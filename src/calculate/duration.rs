//! Duration parsing and formatting.
//!
//! The extraction gateway reports durations as free text ("2 days, 4 hours,
//! 30 minutes"). The parser is deliberately lenient: the upstream source is a
//! generative model, so unparseable input yields zero rather than an error.

use std::sync::OnceLock;

use regex::Regex;

// The leading guard keeps a fractional value like "2.5 days" from matching
// on its decimal digits ("5 days"); fractional components contribute nothing.
fn component_regexes() -> &'static [(Regex, f64); 3] {
    static REGEXES: OnceLock<[(Regex, f64); 3]> = OnceLock::new();
    REGEXES.get_or_init(|| {
        [
            (Regex::new(r"(?i)(?:^|[^\d.])(\d+)\s*day").unwrap(), 24.0),
            (Regex::new(r"(?i)(?:^|[^\d.])(\d+)\s*hour").unwrap(), 1.0),
            (
                Regex::new(r"(?i)(?:^|[^\d.])(\d+)\s*minute").unwrap(),
                1.0 / 60.0,
            ),
        ]
    })
}

/// Parse a human-readable duration string into hours.
///
/// Recognizes any subset of day/hour/minute components, in any order, using
/// the literal unit words as anchors ("2 days, 4 hours, 30 minutes" = 52.5).
/// Components are whole integers; a fractional value like "2.5 days" is not
/// a recognizable component and contributes zero, the same as any other
/// unparseable text. Text with no recognizable components yields 0.0. Never
/// fails.
pub fn parse_duration_hours(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    component_regexes()
        .iter()
        .filter_map(|(re, factor)| {
            re.captures(text)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .map(|n| n * factor)
        })
        .sum()
}

/// Format an hour count as a compact "Xd Yh Zm" string.
///
/// Zero or negative input renders as "0h 0m". Minutes that round up to 60
/// carry into hours, and hours that reach 24 carry into days. Zero-valued
/// leading components and a zero trailing minute component are omitted
/// (90.0 renders as "3d 18h", 24.0 as "1d 0h").
pub fn format_hours(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0h 0m".to_string();
    }

    let mut days = (hours / 24.0).floor() as u64;
    let mut rem_hours = (hours % 24.0).floor() as u64;
    let mut minutes = ((hours % 24.0).fract() * 60.0).round() as u64;

    if minutes == 60 {
        minutes = 0;
        rem_hours += 1;
    }
    if rem_hours == 24 {
        rem_hours = 0;
        days += 1;
    }

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if rem_hours > 0 || days > 0 {
        parts.push(format!("{}h", rem_hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }

    if parts.is_empty() {
        "0h 0m".to_string()
    } else {
        parts.join(" ")
    }
}
