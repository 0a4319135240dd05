use crate::Sign;
use crate::Sign::{Negative, Positive};
use std::fmt::{Display, Formatter};
use std::ops::Not;

impl From<bool> for Sign {
    /// Polarity of a literal: `true` is a positive influence.
    fn from(value: bool) -> Self {
        if value {
            Positive
        } else {
            Negative
        }
    }
}

impl Not for Sign {
    type Output = Sign;

    fn not(self) -> Self::Output {
        match self {
            Positive => Negative,
            Negative => Positive,
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Positive => write!(f, "+"),
            Negative => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Sign;

    #[test]
    fn sign_conversions() {
        assert_eq!(Sign::Positive, Sign::from(true));
        assert_eq!(Sign::Negative, !Sign::from(true));
        assert_eq!("-", Sign::from(false).to_string());
    }
}
