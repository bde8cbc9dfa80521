use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: i64 = 12;
const MANWON: i64 = 10_000;
const EOK: i64 = 100_000_000;

/// Korean won amount. Signed so that net outcomes can go negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Won(pub i64);

impl Won {
    pub const ZERO: Won = Won(0);

    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub fn times(self, count: u32) -> Won {
        Won(self.0.saturating_mul(i64::from(count)))
    }

    /// Twelve months of this monthly amount.
    pub fn annualized(self) -> Won {
        Won(self.0.saturating_mul(MONTHS_PER_YEAR))
    }

    /// Monthly share of an annual amount, rounded half toward positive infinity.
    pub fn monthly_share(self) -> Won {
        Won(round_div(i128::from(self.0), i128::from(MONTHS_PER_YEAR)))
    }

    /// Amount in units of 10,000 won, rounded like the registry dataset.
    pub fn manwon(self) -> i64 {
        round_div(i128::from(self.0), i128::from(MANWON))
    }

    /// `self * numerator / denominator`, rounded half toward positive infinity.
    ///
    /// A zero denominator yields zero.
    pub fn scale(self, numerator: i64, denominator: i64) -> Won {
        if denominator == 0 {
            return Won::ZERO;
        }
        let product = i128::from(self.0) * i128::from(numerator);
        Won(round_div(product, i128::from(denominator)))
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

/// Integer division with `Math.round` semantics (`floor(x + 0.5)`).
pub(crate) fn round_div(numerator: i128, denominator: i128) -> i64 {
    let (numerator, denominator) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    let rounded = (2 * numerator + denominator).div_euclid(2 * denominator);
    rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

impl Add for Won {
    type Output = Won;

    fn add(self, rhs: Won) -> Won {
        Won(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Won {
    fn add_assign(&mut self, rhs: Won) {
        *self = *self + rhs;
    }
}

impl Sub for Won {
    type Output = Won;

    fn sub(self, rhs: Won) -> Won {
        Won(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Won {
    type Output = Won;

    fn neg(self) -> Won {
        Won(self.0.saturating_neg())
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Won {
        iter.fold(Won::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Won> for Won {
    fn sum<I: Iterator<Item = &'a Won>>(iter: I) -> Won {
        iter.copied().sum()
    }
}

/// Dashboard rendering: `1.3억원`, `4,520만원`, or `9,800원`.
impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self.0;
        let magnitude = amount.unsigned_abs();
        if magnitude >= EOK as u64 {
            write!(f, "{:.1}억원", amount as f64 / EOK as f64)
        } else if magnitude >= MANWON as u64 {
            write!(f, "{}만원", group_thousands(self.manwon()))
        } else {
            write!(f, "{}원", group_thousands(amount))
        }
    }
}

pub(crate) fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Presentation period for currency figures. Stored figures stay annual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Monthly,
    #[default]
    Annual,
}

impl ViewMode {
    pub fn present(self, annual: Won) -> Won {
        match self {
            ViewMode::Monthly => annual.monthly_share(),
            ViewMode::Annual => annual,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ViewMode::Monthly => "monthly",
            ViewMode::Annual => "annual",
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(ViewMode::Monthly),
            "annual" | "year" | "yearly" | "a" => Ok(ViewMode::Annual),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}
