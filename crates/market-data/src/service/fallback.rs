use std::fmt;
use std::str::FromStr;

/// What the quote service does when the provider call fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Substitute a synthetic sample around the last known price. Callers
    /// always get a sample; its origin tells them it is not real.
    #[default]
    Synthetic,
    /// Surface the provider error to the caller.
    Disabled,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "synthetic" => Ok(FallbackPolicy::Synthetic),
            "none" | "disabled" | "off" => Ok(FallbackPolicy::Disabled),
            other => Err(format!("unknown fallback policy '{}'", other)),
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackPolicy::Synthetic => write!(f, "synthetic"),
            FallbackPolicy::Disabled => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!("synthetic".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Synthetic));
        assert_eq!(" NONE ".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Disabled));
        assert_eq!("off".parse::<FallbackPolicy>(), Ok(FallbackPolicy::Disabled));
        assert!("retry".parse::<FallbackPolicy>().is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        for policy in [FallbackPolicy::Synthetic, FallbackPolicy::Disabled] {
            assert_eq!(policy.to_string().parse::<FallbackPolicy>(), Ok(policy));
        }
    }
}
