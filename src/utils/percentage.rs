use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// Share of `part` in `whole`. There is no sensible value for an empty whole.
    pub fn ratio(part: u64, whole: u64) -> Option<Percentage> {
        if whole == 0 {
            None
        } else {
            Percentage::new_opt(part as f64 / whole as f64 * 100.)
        }
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Percentage;

    #[test]
    fn test_ratio_display() {
        assert_eq!(Percentage::ratio(1, 6).unwrap().to_string(), "16.7%");
        assert_eq!(Percentage::ratio(0, 6).unwrap().to_string(), "0.0%");
        assert_eq!(Percentage::ratio(3, 3).unwrap().to_string(), "100.0%");
    }

    #[test]
    fn test_ratio_of_empty_whole() {
        assert_eq!(Percentage::ratio(0, 0), None);
    }

    #[test]
    fn test_negative_is_rejected() {
        assert_eq!(Percentage::new_opt(-0.5), None);
        assert_eq!(Percentage::new_opt(12.5).map(|v| *v), Some(12.5));
    }
}
