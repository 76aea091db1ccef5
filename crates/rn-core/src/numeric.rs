/// Floating point type used throughout the system.
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Keep a value only if it is finite; NaN and infinities become absent.
pub fn finite(v: Option<Real>) -> Option<Real> {
    v.filter(|x| x.is_finite())
}

/// Keep a value only if it is finite and non-negative.
pub fn non_negative(v: Option<Real>) -> Option<Real> {
    finite(v).filter(|x| *x >= 0.0)
}

/// Parse a real number leniently: surrounding whitespace is ignored and
/// anything unparsable or non-finite is absent.
pub fn parse_real(raw: &str) -> Option<Real> {
    raw.trim().parse::<Real>().ok().filter(|x| x.is_finite())
}

/// Parse a calendar year from its source text.
///
/// Accepts plain integers (`"1990"`) and integral floats as written by
/// spreadsheet exports (`"1990.0"`). Blank, fractional, or out-of-range input
/// is absent; a year is never guessed.
pub fn parse_year(raw: &str) -> Option<i32> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(y) = s.parse::<i32>() {
        return Some(y);
    }
    let v = parse_real(s)?;
    if v.fract() != 0.0 || v < i32::MIN as Real || v > i32::MAX as Real {
        return None;
    }
    Some(v as i32)
}
