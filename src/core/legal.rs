use schemars::JsonSchema;
use serde::Serialize;

pub const TAX_CODE_URL: &str = "https://taxes.gov.az/az/page/vergi-mecellesi";
pub const LICENSE_LAW_URL: &str = "https://president.az/az/documents/licenses";

/// Citation of the statutory provision behind a decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct LegalBasis {
    /// Article identifier, e.g. "218.5.9"
    pub article: String,
    pub description: String,
    pub source_url: String,
}

impl LegalBasis {
    /// Citation of a Tax Code article
    pub fn tax_code(article: &str, description: &str) -> Self {
        LegalBasis {
            article: article.to_string(),
            description: description.to_string(),
            source_url: TAX_CODE_URL.to_string(),
        }
    }

    /// Citation of the License Law annex
    pub fn license_law(article: &str, description: &str) -> Self {
        LegalBasis {
            article: article.to_string(),
            description: description.to_string(),
            source_url: LICENSE_LAW_URL.to_string(),
        }
    }
}

impl std::fmt::Display for LegalBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.article, self.description)
    }
}
