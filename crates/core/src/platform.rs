use std::fmt;
use std::str::FromStr;

/// Name of the Facebook tracking sheet.
pub const FACEBOOK_INSIGHTS_SHEET_NAME: &str = "Facebook Insights";
/// Name of the Instagram tracking sheet.
pub const INSTAGRAM_INSIGHTS_SHEET_NAME: &str = "Instagram Insights";

/// Social platform whose data a raw export section holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Facebook,
    Instagram,
}

impl Platform {
    /// Tracking sheet the platform's records are reconciled into.
    #[must_use]
    pub fn insights_sheet_name(self) -> &'static str {
        match self {
            Platform::Facebook => FACEBOOK_INSIGHTS_SHEET_NAME,
            Platform::Instagram => INSTAGRAM_INSIGHTS_SHEET_NAME,
        }
    }

    /// Display label used in user-facing messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "facebook" | "fb" => Ok(Platform::Facebook),
            "instagram" | "ig" => Ok(Platform::Instagram),
            other => Err(format!(
                "unknown platform '{other}', expected 'facebook' or 'instagram'"
            )),
        }
    }
}
