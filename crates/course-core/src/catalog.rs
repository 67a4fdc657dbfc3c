//! Course Catalog
//!
//! The fixed set of course tiers and what each one costs. Lookups are an
//! exhaustive `match`, so adding a tier without an offering does not compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Course package a buyer can purchase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseTier {
    /// Lowest tier, also the fallback when a tier cannot be determined
    #[default]
    Basic,
    Standard,
    Vip,
}

impl CourseTier {
    /// Every tier, cheapest first
    pub const ALL: [CourseTier; 3] = [CourseTier::Basic, CourseTier::Standard, CourseTier::Vip];

    pub fn as_str(self) -> &'static str {
        match self {
            CourseTier::Basic => "basic",
            CourseTier::Standard => "standard",
            CourseTier::Vip => "vip",
        }
    }

    /// Catalog entry for this tier
    pub fn offering(self) -> &'static CourseOffering {
        match self {
            CourseTier::Basic => &BASIC,
            CourseTier::Standard => &STANDARD,
            CourseTier::Vip => &VIP,
        }
    }
}

impl FromStr for CourseTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(CourseTier::Basic),
            "standard" => Ok(CourseTier::Standard),
            "vip" => Ok(CourseTier::Vip),
            _ => Err(CoreError::InvalidTier(s.to_string())),
        }
    }
}

impl fmt::Display for CourseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchasable course package
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CourseOffering {
    pub tier: CourseTier,

    /// Line item name shown on the hosted checkout page
    pub display_name: &'static str,

    /// Name used on pricing cards and result pages
    pub short_name: &'static str,

    /// Price in minor units (cents)
    pub unit_amount: i64,

    /// ISO currency code, lowercase
    pub currency: &'static str,

    pub description: &'static str,
}

impl CourseOffering {
    /// Human-readable price, e.g. `$49` or `$49.50`
    pub fn price_label(&self) -> String {
        let dollars = self.unit_amount / 100;
        let cents = self.unit_amount % 100;
        if cents == 0 {
            format!("${dollars}")
        } else {
            format!("${dollars}.{cents:02}")
        }
    }
}

static BASIC: CourseOffering = CourseOffering {
    tier: CourseTier::Basic,
    display_name: "Course \"Self-Guided\" - Recovery After Infidelity",
    short_name: "Self-Guided",
    unit_amount: 2900,
    currency: "usd",
    description: "5 theory lessons + workbook + lifetime access",
};

static STANDARD: CourseOffering = CourseOffering {
    tier: CourseTier::Standard,
    display_name: "Course \"Standard\" - Recovery After Infidelity",
    short_name: "Standard",
    unit_amount: 4900,
    currency: "usd",
    description: "5 theory lessons + 5 practice sessions + workbook + lifetime access",
};

static VIP: CourseOffering = CourseOffering {
    tier: CourseTier::Vip,
    display_name: "Course \"VIP\" - Recovery After Infidelity",
    short_name: "VIP",
    unit_amount: 10000,
    currency: "usd",
    description: "Everything in \"Standard\" + a private consultation + personal feedback",
};
