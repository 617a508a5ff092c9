//! Activities command - browse the licensed activity catalog

use crate::core::{find_activities, ActivityCategory, ActivityQuery, LicensedActivity};
use clap::{Args, ValueEnum};
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct ActivitiesCommand {
    /// Search names (Azerbaijani or English, case insensitive)
    #[arg(short, long)]
    search: Option<String>,

    /// Filter by category
    #[arg(short, long, value_enum)]
    category: Option<CategoryArg>,

    /// Only activities that disqualify from simplified tax
    #[arg(long)]
    disqualifying: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
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

impl From<CategoryArg> for ActivityCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Healthcare => ActivityCategory::Healthcare,
            CategoryArg::Education => ActivityCategory::Education,
            CategoryArg::Communications => ActivityCategory::Communications,
            CategoryArg::Construction => ActivityCategory::Construction,
            CategoryArg::Financial => ActivityCategory::Financial,
            CategoryArg::Security => ActivityCategory::Security,
            CategoryArg::Professional => ActivityCategory::Professional,
            CategoryArg::Manufacturing => ActivityCategory::Manufacturing,
            CategoryArg::Transport => ActivityCategory::Transport,
            CategoryArg::Other => ActivityCategory::Other,
        }
    }
}

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "Code")]
    code: &'static str,
    #[tabled(rename = "Name (AZ)")]
    name_az: &'static str,
    #[tabled(rename = "Name (EN)")]
    name_en: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Disqualifies")]
    disqualifies: &'static str,
}

impl From<&LicensedActivity> for ActivityRow {
    fn from(activity: &LicensedActivity) -> Self {
        ActivityRow {
            code: activity.slug,
            name_az: activity.name_az,
            name_en: activity.name_en,
            category: activity.category.label(),
            disqualifies: if activity.disqualifies { "yes" } else { "no" },
        }
    }
}

impl ActivitiesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let query = ActivityQuery {
            search: self.search.as_deref(),
            category: self.category.map(ActivityCategory::from),
            disqualifying_only: self.disqualifying,
        };
        let activities = find_activities(&query);
        log::debug!("{} activities match {:?}", activities.len(), query);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&activities)?);
            return Ok(());
        }

        if activities.is_empty() {
            println!("No licensed activities found matching filters");
            return Ok(());
        }

        let rows: Vec<ActivityRow> = activities.into_iter().map(ActivityRow::from).collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
        Ok(())
    }
}
