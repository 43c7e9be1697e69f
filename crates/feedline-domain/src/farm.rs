//! Farm module - the fixed set of supplier farms

use std::fmt;

/// Farm identifier
///
/// The set is closed: new farms are added as new variants, appended after the
/// existing ones so that recovery priority of the older farms is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FarmCode {
    /// Vassilakos
    Vas,

    /// Edge
    Edg,

    /// Apostolakos
    Apo,

    /// Sigma
    Sig,

    /// DFI (no alias beyond the code)
    Dfi,
}

impl FarmCode {
    /// All farms in recovery priority order
    pub const ALL: [FarmCode; 5] = [
        FarmCode::Vas,
        FarmCode::Edg,
        FarmCode::Apo,
        FarmCode::Sig,
        FarmCode::Dfi,
    ];

    /// Get the canonical farm code
    pub fn as_str(&self) -> &'static str {
        match self {
            FarmCode::Vas => "VAS",
            FarmCode::Edg => "EDG",
            FarmCode::Apo => "APO",
            FarmCode::Sig => "SIG",
            FarmCode::Dfi => "DFI",
        }
    }

    /// Uppercase terms that identify this farm in free text.
    ///
    /// The code itself comes first, followed by the aliases suppliers use.
    pub fn search_terms(&self) -> &'static [&'static str] {
        match self {
            FarmCode::Vas => &["VAS", "VASSILAKOS"],
            FarmCode::Edg => &["EDG", "EDGE"],
            FarmCode::Apo => &["APO", "APOSTOLAKOS"],
            FarmCode::Sig => &["SIG", "SIGMA"],
            FarmCode::Dfi => &["DFI"],
        }
    }

    /// Parse a farm from its code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|farm| farm.as_str() == upper)
    }
}

impl fmt::Display for FarmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FarmCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid farm code: {}", s))
    }
}
