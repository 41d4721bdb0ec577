use std::fmt;

/// Wraps a passenger identifier so it never reaches the logs in clear text.
///
/// `Debug` and `Display` print only the last two characters.
#[derive(Clone, PartialEq, Eq)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn redacted(&self) -> String {
        let value = self.0.as_ref();
        let count = value.chars().count();
        if count <= 2 {
            return "*".repeat(count.max(1));
        }
        let tail: String = value.chars().skip(count - 2).collect();
        format!("{}{}", "*".repeat(count - 2), tail)
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted())
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_only_tail() {
        let reg = Masked("REG001".to_string());
        assert_eq!(reg.to_string(), "****01");
        assert_eq!(format!("{:?}", reg), "****01");
    }

    #[test]
    fn test_short_values_fully_masked() {
        assert_eq!(Masked("A1").to_string(), "**");
        assert_eq!(Masked("").to_string(), "*");
    }

    #[test]
    fn test_into_inner_returns_value() {
        assert_eq!(Masked("REG001").into_inner(), "REG001");
    }
}
