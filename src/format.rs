/// How a statistic is rendered wherever it appears as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Whole numbers (strikeouts, pitches, game score, ...).
    Counting,
    /// Averages and per-nine rates at a fixed precision.
    Rate { places: usize },
    /// A fraction in [0, 1] shown scaled by 100 with a trailing `%`.
    Percentage,
}

pub const NOT_COMPUTABLE: &str = "n/a";

impl StatKind {
    pub fn places(self) -> usize {
        match self {
            StatKind::Counting => 0,
            StatKind::Rate { places } => places,
            StatKind::Percentage => 1,
        }
    }

    pub fn format(self, value: f64) -> String {
        match self {
            StatKind::Counting => counting(value),
            StatKind::Rate { places } => fixed(value, places),
            StatKind::Percentage => percent_of_fraction(value),
        }
    }

    /// Signed change. Percentage deltas are percentage points.
    pub fn format_delta(self, delta: f64) -> String {
        match self {
            StatKind::Percentage => format!("{}%", signed(delta * 100.0, 1)),
            other => signed(delta, other.places()),
        }
    }

    pub fn format_opt(self, value: Option<f64>) -> String {
        value.map_or_else(|| NOT_COMPUTABLE.to_string(), |v| self.format(v))
    }

    pub fn format_delta_opt(self, delta: Option<f64>) -> String {
        delta.map_or_else(|| NOT_COMPUTABLE.to_string(), |v| self.format_delta(v))
    }
}

pub fn counting(value: f64) -> String {
    fixed(value, 0)
}

pub fn fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return NOT_COMPUTABLE.to_string();
    }
    format!("{:.*}", places, normalize_zero(value, places))
}

pub fn signed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return NOT_COMPUTABLE.to_string();
    }
    format!("{:+.*}", places, normalize_zero(value, places))
}

/// `0.252` -> `25.2%`.
pub fn percent_of_fraction(fraction: f64) -> String {
    percent(fraction * 100.0)
}

/// `42.0` -> `42.0%`. The input is already scaled.
pub fn percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_COMPUTABLE.to_string();
    }
    format!("{}%", fixed(value, 1))
}

/// Reads back anything produced by this module. Percent strings yield the
/// scaled number (`"25.2%"` -> `25.2`).
pub fn parse_formatted(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// Values that round to zero print unsigned-positive ("+0.00", not "-0.00").
fn normalize_zero(value: f64, places: usize) -> f64 {
    let scale = 10f64.powi(places as i32);
    if (value * scale).round() == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{StatKind, fixed, signed};

    #[test]
    fn negative_zero_is_printed_positive() {
        assert_eq!(signed(-0.001, 2), "+0.00");
        assert_eq!(fixed(-0.0004, 3), "0.000");
    }

    #[test]
    fn non_finite_values_render_as_na() {
        assert_eq!(StatKind::Rate { places: 2 }.format(f64::NAN), "n/a");
        assert_eq!(StatKind::Counting.format_delta(f64::INFINITY), "n/a");
    }
}
