use crate::{
    animation::interpolate::{InterpolateOpts, interpolate},
    foundation::core::FrameIndex,
    foundation::error::{ReelError, ReelResult},
};

/// Default cursor blink period in frames.
pub const CURSOR_BLINK_FRAMES: u64 = 16;

/// Denominator used when a rate is given as a decimal.
const DECIMAL_RATE_DEN: u32 = 1000;

/// Exact characters-per-frame rate (`num / den`).
///
/// Kept rational so reveal counts never depend on float rounding; decimals such as `0.7`
/// are read with three-digit precision. Rates that are not whole thousandths serialize
/// as an `"num/den"` string so they survive a JSON round trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RateRepr", into = "RateRepr")]
pub struct CharRate {
    num: u32,
    den: u32,
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl CharRate {
    /// Half a character per frame, the stock terminal speed.
    pub const HALF: Self = Self { num: 1, den: 2 };

    /// Unchecked constructor for reduced, non-zero constants.
    pub(crate) const fn exact(num: u32, den: u32) -> Self {
        Self { num, den }
    }

    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if num == 0 || den == 0 {
            return Err(ReelError::validation(
                "character rate must be a positive fraction",
            ));
        }
        let g = gcd(num, den);
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Rate from a decimal number of characters per frame.
    pub fn per_frame(rate: f64) -> ReelResult<Self> {
        let scaled = (rate * f64::from(DECIMAL_RATE_DEN)).round();
        if !scaled.is_finite() || scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(ReelError::validation(format!(
                "character rate {rate} must be in [0.001, {}]",
                u32::MAX / DECIMAL_RATE_DEN
            )));
        }
        Self::new(scaled as u32, DECIMAL_RATE_DEN)
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// `floor(max(0, relative_frame) * rate)`.
    pub fn chars_at(self, relative_frame: i64) -> u64 {
        let f = relative_frame.max(0) as u128;
        let n = f * u128::from(self.num) / u128::from(self.den);
        u64::try_from(n).unwrap_or(u64::MAX)
    }

    /// First relative frame at which `chars` characters are visible.
    pub fn frames_for(self, chars: u64) -> u64 {
        let need = u128::from(chars) * u128::from(self.den);
        let n = need.div_ceil(u128::from(self.num));
        u64::try_from(n).unwrap_or(u64::MAX)
    }
}

impl std::str::FromStr for CharRate {
    type Err = ReelError;

    /// Parses `"num/den"` or a decimal such as `"0.7"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ReelError::validation(format!("invalid character rate '{s}'"));
        match s.split_once('/') {
            Some((num, den)) => Self::new(
                num.trim().parse().map_err(|_| bad())?,
                den.trim().parse().map_err(|_| bad())?,
            ),
            None => Self::per_frame(s.trim().parse().map_err(|_| bad())?),
        }
    }
}

impl std::fmt::Display for CharRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// Wire form: a decimal when exact in thousandths, otherwise `"num/den"`.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RateRepr {
    Decimal(f64),
    Fraction(String),
}

impl TryFrom<RateRepr> for CharRate {
    type Error = ReelError;

    fn try_from(value: RateRepr) -> Result<Self, Self::Error> {
        match value {
            RateRepr::Decimal(v) => Self::per_frame(v),
            RateRepr::Fraction(s) => s.parse(),
        }
    }
}

impl From<CharRate> for RateRepr {
    fn from(value: CharRate) -> Self {
        if DECIMAL_RATE_DEN % value.den == 0 {
            RateRepr::Decimal(value.as_f64())
        } else {
            RateRepr::Fraction(value.to_string())
        }
    }
}

/// Typewriter state of one string at one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reveal<'a> {
    /// Visible prefix of the text.
    pub visible: &'a str,
    pub visible_chars: usize,
    pub total_chars: usize,
    /// `relative_frame >= 0`.
    pub has_started: bool,
}

impl Reveal<'_> {
    pub fn is_complete(&self) -> bool {
        self.visible_chars >= self.total_chars
    }

    /// The cursor shows while typing: started and not yet complete.
    pub fn shows_cursor(&self) -> bool {
        self.has_started && !self.is_complete()
    }
}

/// Reveal `text` at `relative_frame` typing `rate` characters per frame.
///
/// Counts Unicode scalar values, so the visible prefix always ends on a char boundary.
pub fn reveal(text: &str, relative_frame: i64, rate: CharRate) -> Reveal<'_> {
    let total_chars = text.chars().count();
    let want = usize::try_from(rate.chars_at(relative_frame)).unwrap_or(usize::MAX);
    let visible_chars = want.min(total_chars);
    let end = text
        .char_indices()
        .nth(visible_chars)
        .map_or(text.len(), |(i, _)| i);
    Reveal {
        visible: &text[..end],
        visible_chars,
        total_chars,
        has_started: relative_frame >= 0,
    }
}

/// Triangular cursor opacity `1 -> 0 -> 1` over `period` frames of the global clock.
pub fn cursor_opacity(frame: FrameIndex, period: u64) -> f64 {
    if period == 0 {
        return 1.0;
    }
    let phase = (frame.0 % period) as f64;
    let half = period as f64 / 2.0;
    let opts = InterpolateOpts::clamped();
    if phase < half {
        interpolate(phase, [0.0, half], [1.0, 0.0], opts)
    } else {
        interpolate(phase, [half, period as f64], [0.0, 1.0], opts)
    }
}

/// One line of a staggered multi-line terminal.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypedLine {
    pub text: String,
    /// Frames after the terminal start at which this line begins typing.
    #[serde(default)]
    pub delay: u64,
}

/// Reveal state of one [`TypedLine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineReveal<'a> {
    pub index: usize,
    pub reveal: Reveal<'a>,
}

/// Reveal every line whose own start has been reached; later lines are omitted.
pub fn reveal_lines(lines: &[TypedLine], relative_frame: i64, rate: CharRate) -> Vec<LineReveal<'_>> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_rel = relative_frame.saturating_sub(i64::try_from(line.delay).ok()?);
            (line_rel >= 0).then(|| LineReveal {
                index,
                reveal: reveal(&line.text, line_rel, rate),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/reveal.rs"]
mod tests;
