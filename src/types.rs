//! Core types for the achievement ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an achievement.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementId(pub String);

impl AchievementId {
    pub fn new(id: impl Into<String>) -> Self {
        AchievementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AchievementId({})", self.0)
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AchievementId {
    fn from(s: &str) -> Self {
        AchievementId(s.to_string())
    }
}

/// Returned when a wire value names no known variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Generates `ALL`, `as_str`, `Display` and `FromStr` from a variant/wire table.
macro_rules! wire_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in display order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Wire form used in JSON and in the URL query string.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($ty::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

/// Achievement category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technical,
    Project,
    Leadership,
    Education,
    Community,
}

wire_enum!(Category, "category", {
    Technical => "technical",
    Project => "project",
    Leadership => "leadership",
    Education => "education",
    Community => "community",
});

/// Progress of an achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Completed,
    InProgress,
    Planned,
}

wire_enum!(Status, "status", {
    Completed => "completed",
    InProgress => "in-progress",
    Planned => "planned",
});

/// Technology tag attached to an achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechTag {
    #[serde(rename = "Next.js")]
    NextJs,
    TypeScript,
    Firebase,
    Flutter,
    BloC,
    #[serde(rename = "AI Integration")]
    AiIntegration,
    #[serde(rename = "Payment Systems")]
    PaymentSystems,
    #[serde(rename = "Google Analytics")]
    GoogleAnalytics,
    BigQuery,
    #[serde(rename = "React.js")]
    ReactJs,
    Bootstrap,
    #[serde(rename = ".NET Core")]
    DotNetCore,
    #[serde(rename = "GitHub Actions")]
    GitHubActions,
    #[serde(rename = "Micro Frontend")]
    MicroFrontend,
    Sentry,
    Slack,
    #[serde(rename = "Google Play")]
    GooglePlay,
    #[serde(rename = "Tailwind CSS")]
    TailwindCss,
    ZegoCloud,
    #[serde(rename = "SDK Development")]
    SdkDevelopment,
}

wire_enum!(TechTag, "tech tag", {
    NextJs => "Next.js",
    TypeScript => "TypeScript",
    Firebase => "Firebase",
    Flutter => "Flutter",
    BloC => "BloC",
    AiIntegration => "AI Integration",
    PaymentSystems => "Payment Systems",
    GoogleAnalytics => "Google Analytics",
    BigQuery => "BigQuery",
    ReactJs => "React.js",
    Bootstrap => "Bootstrap",
    DotNetCore => ".NET Core",
    GitHubActions => "GitHub Actions",
    MicroFrontend => "Micro Frontend",
    Sentry => "Sentry",
    Slack => "Slack",
    GooglePlay => "Google Play",
    TailwindCss => "Tailwind CSS",
    ZegoCloud => "ZegoCloud",
    SdkDevelopment => "SDK Development",
});

/// A single achievement record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Unique identifier (assigned by the store).
    pub id: AchievementId,

    pub title: String,

    pub description: String,

    pub category: Category,

    pub status: Status,

    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,

    pub impact: String,

    /// Ordered, duplicate-free technology tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<TechTag>,
}

impl Achievement {
    /// Build a record from creation input and an assigned id.
    pub fn from_input(id: AchievementId, input: AchievementInput) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            category: input.category,
            status: input.status,
            date: input.date,
            impact: input.impact,
            tech_stack: input.tech_stack,
        }
    }

    /// The record's fields without its id.
    pub fn to_input(&self) -> AchievementInput {
        AchievementInput {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            status: self.status,
            date: self.date,
            impact: self.impact.clone(),
            tech_stack: self.tech_stack.clone(),
        }
    }
}

/// Input for creating a new achievement (before an id is assigned).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementInput {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: Status,
    pub date: NaiveDate,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<TechTag>,
}

impl AchievementInput {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        status: Status,
        date: NaiveDate,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            status,
            date,
            impact: impact.into(),
            tech_stack: Vec::new(),
        }
    }

    /// Set the technology tags.
    pub fn with_tech_stack(mut self, tags: Vec<TechTag>) -> Self {
        self.tech_stack = tags;
        self
    }
}
