//! Resource categories and their integer codes on the wire.

use serde::{Deserialize, Serialize};

/// The category that best describes a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Category {
    Uncategorized,
    #[default]
    Miscellaneous,
    AutomotiveEngineeringManufacturing,
    EnergyOilGas,
    BankingFinance,
    FraudCrime,
    Healthcare,
    PhysicalEarthLifeSciences,
    ConsumerRetail,
    SportsGames,
    DemographicsSurveys,
    AerospaceDefense,
    ChemicalPharmaceutical,
    HigherEducationScientificResearch,
    HumanResourcesPsychology,
    Insurance,
    LawOrder,
    MediaMarketingAdvertising,
    PublicSectorNonprofit,
    ProfessionalServices,
    TechnologyTelecommunications,
    TransportationLogistics,
    TravelLeisure,
    Utilities,
}

const CATEGORIES: [Category; 24] = [
    Category::Uncategorized,
    Category::Miscellaneous,
    Category::AutomotiveEngineeringManufacturing,
    Category::EnergyOilGas,
    Category::BankingFinance,
    Category::FraudCrime,
    Category::Healthcare,
    Category::PhysicalEarthLifeSciences,
    Category::ConsumerRetail,
    Category::SportsGames,
    Category::DemographicsSurveys,
    Category::AerospaceDefense,
    Category::ChemicalPharmaceutical,
    Category::HigherEducationScientificResearch,
    Category::HumanResourcesPsychology,
    Category::Insurance,
    Category::LawOrder,
    Category::MediaMarketingAdvertising,
    Category::PublicSectorNonprofit,
    Category::ProfessionalServices,
    Category::TechnologyTelecommunications,
    Category::TransportationLogistics,
    Category::TravelLeisure,
    Category::Utilities,
];

impl Category {
    /// Integer code used by the service (`Uncategorized` is -1).
    pub fn code(&self) -> i32 {
        *self as i32 - 1
    }

    pub fn from_code(code: i32) -> Option<Self> {
        code.checked_add(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| CATEGORIES.get(idx).copied())
    }
}

impl TryFrom<i32> for Category {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Category::from_code(code).ok_or_else(|| format!("unknown category code {code}"))
    }
}

impl From<Category> for i32 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Category::Uncategorized.code(), -1);
        assert_eq!(Category::Miscellaneous.code(), 0);
        assert_eq!(Category::BankingFinance.code(), 3);
        assert_eq!(Category::Utilities.code(), 22);
    }

    #[test]
    fn test_from_code_round_trips() {
        for category in CATEGORIES {
            assert_eq!(Category::from_code(category.code()), Some(category));
        }
        assert_eq!(Category::from_code(23), None);
        assert_eq!(Category::from_code(-2), None);
    }

    #[test]
    fn test_serde_as_integer() {
        assert_eq!(serde_json::to_string(&Category::Healthcare).unwrap(), "5");
        let category: Category = serde_json::from_str("14").unwrap();
        assert_eq!(category, Category::Insurance);
        assert!(serde_json::from_str::<Category>("99").is_err());
    }

    #[test]
    fn test_out_of_range_codes_are_errors() {
        assert_eq!(Category::from_code(i32::MAX), None);
        assert_eq!(Category::from_code(i32::MIN), None);
        assert!(serde_json::from_str::<Category>("2147483647").is_err());
        assert!(serde_json::from_str::<Category>("-2147483648").is_err());
    }

    #[test]
    fn test_codes_follow_declaration_order() {
        for (idx, category) in CATEGORIES.iter().enumerate() {
            assert_eq!(category.code(), idx as i32 - 1);
        }
    }
}
