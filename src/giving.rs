//! Giving page data: platform links and the giving form.
//!
//! Platform URLs live in a JSON document served next to the site
//! (`/giving-config.json`) so they can change without a rebuild. A platform
//! without an enabled URL is shown as "coming soon" instead of failing.

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::constants::giving::MIN_FUND_AMOUNT;
use crate::error::{Error, Result};
use crate::types::PlatformId;

/// One platform's runtime settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Destination link; `null` until the account is set up.
    #[serde(default)]
    pub url: Option<String>,
    /// Whether the link may be used.
    #[serde(default)]
    pub enabled: bool,
}

/// Contents of `giving-config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivingConfig {
    /// Settings keyed by platform id.
    #[serde(default)]
    pub platforms: BTreeMap<PlatformId, PlatformConfig>,
    /// When an administrator last edited the file.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl GivingConfig {
    /// Parse a configuration document.
    pub fn from_json(json: &str, source_name: Option<&str>) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::parse(format!("Invalid giving configuration: {e}"), source_name.map(String::from))
        })
    }

    /// Read a configuration document from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs_err::read_to_string(path)?;
        Self::from_json(&json, Some(&path.display().to_string()))
    }

    /// Download the configuration document.
    pub async fn fetch(client: &Client, url: &str) -> Result<Self> {
        let resp = client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Giving configuration request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(Error::Giving(format!("Giving configuration returned {}", resp.status())));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(format!("Giving configuration body unreadable: {e}")))?;
        Self::from_json(&body, Some(url))
    }

    /// Download the configuration, falling back to an empty one.
    ///
    /// Every platform resolves to "coming soon" under the empty configuration,
    /// so a missing or broken file degrades the page instead of breaking it.
    pub async fn load_or_default(client: &Client, url: Option<&str>) -> Self {
        let Some(url) = url else {
            tracing::warn!("No giving configuration location; giving platforms disabled");
            return Self::default();
        };

        match Self::fetch(client, url).await {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load giving configuration: {e}");
                Self::default()
            }
        }
    }

    /// Settings for one platform.
    pub fn platform(&self, id: &PlatformId) -> Option<&PlatformConfig> {
        self.platforms.get(id)
    }
}

/// A giving platform shown on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Key into [`GivingConfig::platforms`].
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Supported platforms, in display order.
pub const PLATFORMS: &[Platform] = &[
    Platform { id: "givelify", name: "Givelify", description: "Give securely with the Givelify app" },
    Platform { id: "cashapp", name: "Cash App", description: "Send your gift with Cash App" },
];

/// Look up a supported platform.
pub fn platform(id: &str) -> Option<&'static Platform> {
    PLATFORMS.iter().find(|p| p.id == id)
}

/// What happens when a visitor picks a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformAction {
    /// Open this link in a new tab.
    Open(String),
    /// Show this notice instead.
    ComingSoon(String),
}

impl PlatformAction {
    /// Resolve a platform against the runtime configuration.
    pub fn resolve(id: &PlatformId, config: &GivingConfig) -> Self {
        match config.platform(id) {
            Some(PlatformConfig { enabled: true, url: Some(url) }) if !url.is_empty() => Self::Open(url.clone()),
            _ => {
                let name = platform(id.as_str()).map_or("Platform", |p| p.name);
                Self::ComingSoon(format!(
                    "{name} integration coming soon! Please contact the church office for giving options."
                ))
            }
        }
    }
}

/// A fund a gift can be directed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fund {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What the fund supports.
    pub description: &'static str,
    /// Pre-selected on a new form.
    pub is_default: bool,
}

/// Available funds, in display order.
pub const FUNDS: &[Fund] = &[
    Fund {
        id: "tithes",
        name: "Tithes & Offerings",
        description: "General church operations and ministry support",
        is_default: true,
    },
    Fund { id: "building", name: "Building Fund", description: "Facility maintenance and improvements", is_default: false },
    Fund { id: "missions", name: "Missions", description: "Supporting local and global mission work", is_default: false },
    Fund { id: "youth", name: "Youth Ministry", description: "Youth programs and activities", is_default: false },
    Fund {
        id: "benevolence",
        name: "Benevolence Fund",
        description: "Helping those in need within our community",
        is_default: false,
    },
    Fund {
        id: "special",
        name: "Special Projects",
        description: "Current church initiatives and special events",
        is_default: false,
    },
];

/// One-time or recurring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GiftType {
    /// A single gift.
    #[default]
    OneTime,
    /// Repeats on a schedule.
    Recurring,
}

impl GiftType {
    /// Button label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneTime => "Give one time",
            Self::Recurring => "Set up recurring",
        }
    }
}

/// Recurring gift schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// Every week.
    Weekly,
    /// Every two weeks.
    Biweekly,
    /// Once a month.
    Monthly,
    /// The 1st and 15th.
    SemiMonthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = FREQUENCY_OPTIONS.iter().find(|o| o.value == *self).map_or("", |o| o.label);
        f.write_str(label)
    }
}

/// A frequency choice as presented on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyOption {
    /// The schedule.
    pub value: Frequency,
    /// Short label.
    pub label: &'static str,
    /// Helper text.
    pub description: &'static str,
}

/// Frequency choices, in display order.
pub const FREQUENCY_OPTIONS: &[FrequencyOption] = &[
    FrequencyOption { value: Frequency::Weekly, label: "Every week", description: "Gives consistently each week" },
    FrequencyOption {
        value: Frequency::Biweekly,
        label: "Every 2 weeks",
        description: "Aligns with bi-weekly pay schedules",
    },
    FrequencyOption { value: Frequency::Monthly, label: "Every month", description: "Once per month on selected date" },
    FrequencyOption {
        value: Frequency::SemiMonthly,
        label: "1st & 15th monthly",
        description: "Twice per month giving",
    },
];

/// An amount directed to one fund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSelection {
    /// Fund identifier.
    pub fund_id: String,
    /// Dollars.
    pub amount: f64,
}

/// The giving form as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GivingForm {
    /// One-time or recurring.
    pub gift_type: GiftType,
    /// Required for recurring gifts.
    #[serde(default)]
    pub frequency: Option<Frequency>,
    /// First (or only) gift date.
    pub start_date: NaiveDate,
    /// At least one fund.
    pub funds: Vec<FundSelection>,
}

impl GivingForm {
    /// A fresh form: one-time gift to the default fund, no amount yet.
    pub fn new(start_date: NaiveDate) -> Self {
        let fund = FUNDS.iter().find(|f| f.is_default).map_or("tithes", |f| f.id);
        Self {
            gift_type: GiftType::OneTime,
            frequency: None,
            start_date,
            funds: vec![FundSelection { fund_id: fund.to_string(), amount: 0.0 }],
        }
    }

    /// Sum of all fund amounts.
    pub fn total(&self) -> f64 {
        self.funds.iter().map(|f| f.amount).sum()
    }

    /// Check the form, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.funds.is_empty() {
            problems.push("Please add at least one fund".to_string());
        }
        for (i, fund) in self.funds.iter().enumerate() {
            if fund.fund_id.trim().is_empty() {
                problems.push(format!("funds[{i}]: Please select a fund"));
            }
            if fund.amount.is_nan() || fund.amount < MIN_FUND_AMOUNT {
                problems.push(format!("funds[{i}]: Amount must be at least $1"));
            }
        }
        if self.gift_type == GiftType::Recurring && self.frequency.is_none() {
            problems.push("frequency: Please select a frequency for recurring gifts".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::Giving(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "platforms": {
            "givelify": { "url": "https://giv.li/ucc", "enabled": true },
            "cashapp": { "url": null, "enabled": false }
        },
        "updatedAt": "2026-01-15"
    }"#;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn resolves_enabled_platforms() {
        let config = GivingConfig::from_json(SAMPLE, None).unwrap();
        assert_eq!(config.updated_at.as_deref(), Some("2026-01-15"));
        assert_eq!(
            PlatformAction::resolve(&PlatformId::new("givelify"), &config),
            PlatformAction::Open("https://giv.li/ucc".into())
        );
        assert_eq!(
            PlatformAction::resolve(&PlatformId::new("cashapp"), &config),
            PlatformAction::ComingSoon(
                "Cash App integration coming soon! Please contact the church office for giving options.".into()
            )
        );
    }

    #[test]
    fn enabled_without_url_is_coming_soon() {
        let mut config = GivingConfig::default();
        config.platforms.insert(PlatformId::new("givelify"), PlatformConfig { url: None, enabled: true });
        assert!(matches!(
            PlatformAction::resolve(&PlatformId::new("givelify"), &config),
            PlatformAction::ComingSoon(_)
        ));
        let PlatformAction::ComingSoon(msg) = PlatformAction::resolve(&PlatformId::new("venmo"), &config) else {
            panic!("unknown platform should not open");
        };
        assert!(msg.starts_with("Platform integration"));
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let err = GivingConfig::from_json("{ not json", Some("giving-config.json")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn reads_config_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = GivingConfig::from_file(file.path()).unwrap();
        assert_eq!(config.platforms.len(), 2);
    }

    #[tokio::test]
    async fn missing_location_degrades_to_empty() {
        let config = GivingConfig::load_or_default(&Client::new(), None).await;
        assert_eq!(config, GivingConfig::default());
    }

    #[test]
    fn new_form_needs_an_amount() {
        let mut form = GivingForm::new(start());
        assert_eq!(form.funds[0].fund_id, "tithes");
        assert!(form.validate().is_err());

        form.funds[0].amount = 25.0;
        form.funds.push(FundSelection { fund_id: "missions".into(), amount: 10.5 });
        assert!(form.validate().is_ok());
        assert!((form.total() - 35.5).abs() < f64::EPSILON);
    }

    #[test]
    fn form_reports_every_problem() {
        let form = GivingForm {
            gift_type: GiftType::Recurring,
            frequency: None,
            start_date: start(),
            funds: vec![FundSelection { fund_id: String::new(), amount: 0.5 }],
        };
        let Err(Error::Giving(msg)) = form.validate() else {
            panic!("expected giving error");
        };
        assert!(msg.contains("Please select a fund"));
        assert!(msg.contains("at least $1"));
        assert!(msg.contains("frequency"));

        let empty = GivingForm { funds: Vec::new(), ..GivingForm::new(start()) };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn form_wire_format() {
        let json = r#"{"giftType":"recurring","frequency":"semi-monthly","startDate":"2026-03-01","funds":[{"fundId":"youth","amount":20}]}"#;
        let form: GivingForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.frequency, Some(Frequency::SemiMonthly));
        assert!(form.validate().is_ok());
        assert_eq!(Frequency::SemiMonthly.to_string(), "1st & 15th monthly");
        assert_eq!(GiftType::Recurring.label(), "Set up recurring");
    }
}
