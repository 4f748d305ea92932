//! Maps each facet to its category and source, and computes the badge of every facet.

use costlens_base_schema::EventCategory;
use costlens_event_schema::AggregatedEvents;
use serde::Serialize;

use crate::{BadgeCount, FilterState, SourceSelector, count};

/// One independently toggleable filter dimension.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    /// Business events authored by users.
    CustomBusiness,
    /// Technical events authored by users.
    CustomTechnical,
    /// Events reported by the cloud provider.
    Provider,
    /// Technical events imported from GitHub repositories.
    Github,
}

impl Facet {
    /// All facets in display order.
    pub const ALL: [Self; 4] = [
        Self::CustomBusiness,
        Self::CustomTechnical,
        Self::Provider,
        Self::Github,
    ];

    /// The category whose events this facet counts.
    pub fn category(self) -> EventCategory {
        match self {
            Self::CustomBusiness => EventCategory::Business,
            Self::CustomTechnical | Self::Github => EventCategory::Technical,
            Self::Provider => EventCategory::Provider,
        }
    }

    /// The source selector whose events this facet counts.
    pub fn source(self) -> SourceSelector {
        match self {
            Self::CustomBusiness | Self::CustomTechnical => SourceSelector::Custom,
            Self::Provider => SourceSelector::Provider,
            Self::Github => SourceSelector::Github,
        }
    }

    /// Returns `true` if this facet is enabled in the given state.
    ///
    /// The GitHub facet has no switch of its own and counts as enabled once a repository is
    /// selected.
    pub fn is_enabled(self, state: &FilterState) -> bool {
        match self {
            Self::CustomBusiness => state.custom_business_enabled(),
            Self::CustomTechnical => state.custom_technical_enabled(),
            Self::Provider => state.provider_enabled(),
            Self::Github => state.github_enabled(),
        }
    }
}

/// Badge counts of every facet and of the overall filter icon.
///
/// Counts are derived from the response alone, so a facet shows its potential matches before it
/// is enabled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetBadges {
    /// All events regardless of category or source.
    pub overall: BadgeCount,
    /// Custom business events.
    pub custom_business: BadgeCount,
    /// Custom technical events.
    pub custom_technical: BadgeCount,
    /// Provider events.
    pub provider: BadgeCount,
    /// GitHub events.
    pub github: BadgeCount,
}

impl FacetBadges {
    /// Computes all badges from the given response. A missing response yields zero everywhere.
    pub fn compute(events: Option<&AggregatedEvents>) -> Self {
        let badge = |facet: Facet| count(events, Some(facet.category()), Some(facet.source()));

        Self {
            overall: count(events, None, None),
            custom_business: badge(Facet::CustomBusiness),
            custom_technical: badge(Facet::CustomTechnical),
            provider: badge(Facet::Provider),
            github: badge(Facet::Github),
        }
    }

    /// Returns the badge of a single facet.
    pub fn get(&self, facet: Facet) -> BadgeCount {
        match facet {
            Facet::CustomBusiness => self.custom_business,
            Facet::CustomTechnical => self.custom_technical,
            Facet::Provider => self.provider,
            Facet::Github => self.github,
        }
    }
}
