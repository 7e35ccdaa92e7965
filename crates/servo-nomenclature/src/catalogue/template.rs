//! Template and series display names.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Ordered segment keys forming one valid part-number layout.
///
/// The first key is always the model segment (`a`).
pub type Template = Vec<String>;

/// Name of the template used when no template matches a decoded code.
pub const STANDARD_TEMPLATE: &str = "standard";

/// The fixed set of template names used by the catalogues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Standard configuration.
    Standard,
    /// Configuration with an exclusive customer code.
    ExclusiveCustomer,
    /// Exclusive customer code plus region options.
    ExclusiveCustomerWithRegionOptions,
    /// Configuration with a gearhead.
    WithGear,
    /// Gearhead plus an exclusive customer code.
    WithGearExclusiveCustomer,
    /// Gearhead, exclusive customer code and region options.
    WithGearExclusiveCustomerWithRegionOptions,
}

impl TemplateKind {
    /// All template kinds in catalogue order.
    pub const ALL: [TemplateKind; 6] = [
        Self::Standard,
        Self::ExclusiveCustomer,
        Self::ExclusiveCustomerWithRegionOptions,
        Self::WithGear,
        Self::WithGearExclusiveCustomer,
        Self::WithGearExclusiveCustomerWithRegionOptions,
    ];

    /// Key used in the catalogue documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => STANDARD_TEMPLATE,
            Self::ExclusiveCustomer => "exclusive_customer",
            Self::ExclusiveCustomerWithRegionOptions => "exclusive_customer_with_region_options",
            Self::WithGear => "with_gear",
            Self::WithGearExclusiveCustomer => "with_gear_exclusive_customer",
            Self::WithGearExclusiveCustomerWithRegionOptions => {
                "with_gear_exclusive_customer_with_region_options"
            }
        }
    }

    /// Label shown in template pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard configuration",
            Self::ExclusiveCustomer => "Exclusive customer",
            Self::ExclusiveCustomerWithRegionOptions => "Exclusive customer (region options)",
            Self::WithGear => "With gearhead",
            Self::WithGearExclusiveCustomer => "With gearhead (exclusive customer)",
            Self::WithGearExclusiveCustomerWithRegionOptions => {
                "With gearhead (exclusive customer, region options)"
            }
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownTemplateName(s.to_string()))
    }
}

/// Display name for a template key; unknown keys display as themselves.
pub fn template_display_name(name: &str) -> &str {
    name.parse::<TemplateKind>()
        .map_or(name, |kind| kind.display_name())
}

/// Product title for a series code; unknown series display as their code.
pub fn series_title(series: &str) -> &str {
    match series {
        "SGMXA" => "Sigma-X general purpose servomotor",
        "SGMXJ" => "Sigma-X low capacity servomotor",
        "SGMXG" => "Sigma-X high capacity servomotor",
        "SGMXP" => "Sigma-X flat type servomotor",
        "SGM7A" => "Sigma-7 general purpose servomotor",
        "SGM7J" => "Sigma-7 low capacity servomotor",
        "SGM7G" => "Sigma-7 high capacity servomotor",
        "SGM7P" => "Sigma-7 flat type servomotor",
        other => other,
    }
}
