//! Licensed activity reference catalog (License Law, Annex 1)
//!
//! A representative subset of the annex. Every listed activity currently
//! disqualifies under Tax Code 218.5.13 unless the compulsory-insurance
//! carve-out applies.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LicensedActivityCode {
    PrivateMedical,
    Pharmaceutical,
    Veterinary,
    MedicalEquipment,
    Education,
    DrivingSchool,
    Communications,
    Telecom,
    Postal,
    Broadcasting,
    ConstructionSurvey,
    ConstructionInstall,
    ConstructionDesign,
    Banking,
    Insurance,
    Securities,
    Auditing,
    FireProtection,
    SecurityServices,
    Detective,
    Notary,
    LegalServices,
    CustomsBroker,
    Appraisal,
    AlcoholProduction,
    TobaccoProduction,
    Weapons,
    Explosives,
    Aviation,
    Maritime,
    DangerousGoods,
    Gambling,
    Lottery,
    Tourism,
    EmploymentAgency,
    Geological,
    Other,
}

impl LicensedActivityCode {
    /// Catalog entry for this code
    pub fn activity(self) -> &'static LicensedActivity {
        LICENSED_ACTIVITIES
            .iter()
            .find(|a| a.code == self)
            .unwrap_or(&UNLISTED_ACTIVITY)
    }

    pub fn disqualifies(self) -> bool {
        self.activity().disqualifies
    }

    /// Whether services of this kind can be rendered purely under
    /// compulsory insurance contracts
    pub fn carveout_eligible(self) -> bool {
        COMPULSORY_INSURANCE_CARVEOUT.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        self.activity().slug
    }
}

impl std::fmt::Display for LicensedActivityCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityCategory {
    Healthcare,
    Education,
    Communications,
    Construction,
    Financial,
    Security,
    Professional,
    Manufacturing,
    Transport,
    Other,
}

impl ActivityCategory {
    /// Bilingual label, Azerbaijani first
    pub fn label(self) -> &'static str {
        match self {
            ActivityCategory::Healthcare => "Səhiyyə sahəsi / Healthcare",
            ActivityCategory::Education => "Təhsil sahəsi / Education",
            ActivityCategory::Communications => "Rabitə sahəsi / Communications",
            ActivityCategory::Construction => "Tikinti sahəsi / Construction",
            ActivityCategory::Financial => "Maliyyə sahəsi / Financial",
            ActivityCategory::Security => "Təhlükəsizlik sahəsi / Security",
            ActivityCategory::Professional => "Peşəkar xidmətlər / Professional Services",
            ActivityCategory::Manufacturing => "İstehsal sahəsi / Manufacturing",
            ActivityCategory::Transport => "Nəqliyyat sahəsi / Transport",
            ActivityCategory::Other => "Digər / Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicensedActivity {
    #[serde(skip)]
    pub code: LicensedActivityCode,
    #[serde(rename = "code")]
    pub slug: &'static str,
    pub name_az: &'static str,
    pub name_en: &'static str,
    pub category: ActivityCategory,
    pub disqualifies: bool,
}

const fn activity(
    code: LicensedActivityCode,
    slug: &'static str,
    name_az: &'static str,
    name_en: &'static str,
    category: ActivityCategory,
) -> LicensedActivity {
    LicensedActivity {
        code,
        slug,
        name_az,
        name_en,
        category,
        disqualifies: true,
    }
}

use ActivityCategory as Cat;
use LicensedActivityCode as Code;

static UNLISTED_ACTIVITY: LicensedActivity = activity(
    Code::Other,
    "other",
    "Digər lisenziyalı fəaliyyət",
    "Other licensed activity",
    Cat::Other,
);

pub static LICENSED_ACTIVITIES: &[LicensedActivity] = &[
    activity(Code::PrivateMedical, "private_medical", "Özəl tibb fəaliyyəti", "Private medical activity", Cat::Healthcare),
    activity(Code::Pharmaceutical, "pharmaceutical", "Əczaçılıq fəaliyyəti", "Pharmaceutical activity", Cat::Healthcare),
    activity(Code::Veterinary, "veterinary", "Baytarlıq fəaliyyəti", "Veterinary activity", Cat::Healthcare),
    activity(Code::MedicalEquipment, "medical_equipment", "Tibbi avadanlıqların istehsalı və satışı", "Medical equipment production and sales", Cat::Healthcare),
    activity(Code::Education, "education", "Təhsil fəaliyyəti (ali, orta ixtisas, peşə)", "Education activity (higher, secondary, vocational)", Cat::Education),
    activity(Code::DrivingSchool, "driving_school", "Sürücülük kursları", "Driving schools", Cat::Education),
    activity(Code::Communications, "communications", "Rabitə xidmətləri", "Communication services", Cat::Communications),
    activity(Code::Telecom, "telecom", "Telekommunikasiya xidmətləri", "Telecommunication services", Cat::Communications),
    activity(Code::Postal, "postal", "Poçt rabitəsi xidmətləri", "Postal communication services", Cat::Communications),
    activity(Code::Broadcasting, "broadcasting", "Televiziya və radio yayımı", "Television and radio broadcasting", Cat::Communications),
    activity(Code::ConstructionSurvey, "construction_survey", "Tikintisinə icazə tələb olunan bina və qurğuların mühəndis axtarışları", "Engineering surveys for permit-required buildings", Cat::Construction),
    activity(Code::ConstructionInstall, "construction_install", "Tikintisinə icazə tələb olunan bina və qurğuların tikinti-quraşdırma işləri", "Construction-installation works for permit-required buildings", Cat::Construction),
    activity(Code::ConstructionDesign, "construction_design", "Tikintisinə icazə tələb olunan bina və qurğuların layihələndirilməsi", "Design of permit-required buildings", Cat::Construction),
    activity(Code::Banking, "banking", "Bank fəaliyyəti", "Banking activity", Cat::Financial),
    activity(Code::Insurance, "insurance", "Sığorta fəaliyyəti", "Insurance activity", Cat::Financial),
    activity(Code::Securities, "securities", "Qiymətli kağızlar bazarında peşəkar fəaliyyət", "Professional activity in securities market", Cat::Financial),
    activity(Code::Auditing, "auditing", "Audit xidməti", "Auditing services", Cat::Financial),
    activity(Code::FireProtection, "fire_protection", "Yanğından mühafizə fəaliyyəti", "Fire protection activity", Cat::Security),
    activity(Code::SecurityServices, "security_services", "Özəl mühafizə fəaliyyəti", "Private security services", Cat::Security),
    activity(Code::Detective, "detective", "Özəl detektiv fəaliyyəti", "Private detective activity", Cat::Security),
    activity(Code::Notary, "notary", "Notariat fəaliyyəti", "Notary activity", Cat::Professional),
    activity(Code::LegalServices, "legal_services", "Vəkillik fəaliyyəti", "Legal services / Advocacy", Cat::Professional),
    activity(Code::CustomsBroker, "customs_broker", "Gömrük brokeri fəaliyyəti", "Customs broker activity", Cat::Professional),
    activity(Code::Appraisal, "appraisal", "Qiymətləndirmə fəaliyyəti", "Appraisal/Valuation activity", Cat::Professional),
    activity(Code::AlcoholProduction, "alcohol_production", "Spirtli içkilərin istehsalı", "Alcoholic beverages production", Cat::Manufacturing),
    activity(Code::TobaccoProduction, "tobacco_production", "Tütün məmulatlarının istehsalı", "Tobacco products production", Cat::Manufacturing),
    activity(Code::Weapons, "weapons", "Silah və döyüş sursatının istehsalı və satışı", "Weapons and ammunition production/sales", Cat::Manufacturing),
    activity(Code::Explosives, "explosives", "Partlayıcı maddələrin istehsalı və satışı", "Explosives production and sales", Cat::Manufacturing),
    activity(Code::Aviation, "aviation", "Aviasiya fəaliyyəti", "Aviation activity", Cat::Transport),
    activity(Code::Maritime, "maritime", "Dəniz nəqliyyatı fəaliyyəti", "Maritime transport activity", Cat::Transport),
    activity(Code::DangerousGoods, "dangerous_goods", "Təhlükəli yüklərin daşınması", "Dangerous goods transportation", Cat::Transport),
    activity(Code::Gambling, "gambling", "Qumar oyunlarının təşkili", "Gambling organization", Cat::Other),
    activity(Code::Lottery, "lottery", "Lotereya fəaliyyəti", "Lottery activity", Cat::Other),
    activity(Code::Tourism, "tourism", "Turizm fəaliyyəti", "Tourism activity", Cat::Other),
    activity(Code::EmploymentAgency, "employment_agency", "Məşğulluq agentliyi fəaliyyəti", "Employment agency activity", Cat::Other),
    activity(Code::Geological, "geological", "Geoloji fəaliyyət", "Geological activity", Cat::Other),
    activity(Code::Other, "other", "Digər lisenziyalı fəaliyyət", "Other licensed activity", Cat::Other),
];

/// Activities that stay eligible when rendered only under compulsory
/// insurance contracts (icbari sığorta müqavilələri)
pub const COMPULSORY_INSURANCE_CARVEOUT: &[LicensedActivityCode] =
    &[Code::PrivateMedical, Code::Veterinary];

/// Catalog filter; unset criteria match everything
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery<'a> {
    pub search: Option<&'a str>,
    pub category: Option<ActivityCategory>,
    pub disqualifying_only: bool,
}

/// Search and filter the catalog, preserving catalog order
pub fn find_activities(query: &ActivityQuery) -> Vec<&'static LicensedActivity> {
    let needle = query.search.map(str::to_lowercase);
    LICENSED_ACTIVITIES
        .iter()
        .filter(|a| query.category.map_or(true, |c| a.category == c))
        .filter(|a| !query.disqualifying_only || a.disqualifies)
        .filter(|a| {
            needle.as_deref().map_or(true, |n| {
                a.name_az.to_lowercase().contains(n) || a.name_en.to_lowercase().contains(n)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_its_own_entry() {
        for entry in LICENSED_ACTIVITIES {
            assert_eq!(entry.code.activity().slug, entry.slug);
            let json = serde_json::to_string(&entry.code).unwrap();
            assert_eq!(json, format!("\"{}\"", entry.slug));
        }
    }

    #[test]
    fn search_matches_either_language() {
        let by_en = find_activities(&ActivityQuery {
            search: Some("NOTARY"),
            ..Default::default()
        });
        assert_eq!(by_en.len(), 1);
        assert_eq!(by_en[0].code, Code::Notary);

        let by_az = find_activities(&ActivityQuery {
            search: Some("baytarlıq"),
            ..Default::default()
        });
        assert_eq!(by_az.len(), 1);
        assert_eq!(by_az[0].code, Code::Veterinary);
    }

    #[test]
    fn category_filter() {
        let healthcare = find_activities(&ActivityQuery {
            category: Some(Cat::Healthcare),
            ..Default::default()
        });
        assert_eq!(healthcare.len(), 4);
        assert!(healthcare.iter().all(|a| a.category == Cat::Healthcare));
    }

    #[test]
    fn empty_query_returns_whole_catalog() {
        let all = find_activities(&ActivityQuery::default());
        assert_eq!(all.len(), LICENSED_ACTIVITIES.len());
    }

    #[test]
    fn carveout_allowlist() {
        assert!(Code::PrivateMedical.carveout_eligible());
        assert!(Code::Veterinary.carveout_eligible());
        assert!(!Code::Banking.carveout_eligible());
    }
}
