//! Config structs for all facets.
//!
//! A [`FilterState`] is never mutated in place. Every change is expressed as a [`FilterUpdate`]
//! that produces a new state in which exactly one field differs, so toggling a facet never
//! disturbs the last chosen configuration of another one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Configuration for a facet of user-authored events.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct CustomEventsFilterConfig {
    /// Specifies whether this facet is enabled.
    pub enabled: bool,
}

/// Configuration for the provider events facet.
///
/// The sub-flags are only meaningful while `enabled` is set, but keep their value when the facet
/// is disabled.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEventsFilterConfig {
    /// Specifies whether this facet is enabled.
    pub enabled: bool,
    /// Include commitment events (savings plans, committed use discounts).
    pub commitments: bool,
    /// Include marketplace purchases.
    pub marketplace_purchases: bool,
    /// Include reservations.
    pub reservations: bool,
}

impl ProviderEventsFilterConfig {
    /// Returns the sub-flags that currently apply.
    ///
    /// While the facet is disabled, all sub-flags are reported as unset without touching the
    /// stored values.
    pub fn effective(&self) -> Self {
        if self.enabled {
            self.clone()
        } else {
            Self::default()
        }
    }
}

/// Configuration for the GitHub events facet.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct GithubSourceFilterConfig {
    /// Identifiers of the selected repositories.
    ///
    /// The selection persists while GitHub events are effectively disabled.
    #[serde(default)]
    pub repos: BTreeSet<String>,
}

/// A partial update of a single [`FilterState`] field.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FilterUpdate {
    /// Sets `customBusinessEvents.enabled`.
    CustomBusinessEnabled(bool),
    /// Sets `customTechnicalEvents.enabled`.
    CustomTechnicalEnabled(bool),
    /// Sets `providerEvents.enabled`.
    ProviderEnabled(bool),
    /// Sets `providerEvents.commitments`.
    ProviderCommitments(bool),
    /// Sets `providerEvents.marketplacePurchases`.
    ProviderMarketplacePurchases(bool),
    /// Sets `providerEvents.reservations`.
    ProviderReservations(bool),
    /// Replaces `githubSource.repos`.
    GithubRepos(BTreeSet<String>),
}

/// The composed filter describing which events should be shown.
///
/// Created with every facet disabled and no repository selected.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    custom_business_events: CustomEventsFilterConfig,
    #[serde(default)]
    custom_technical_events: CustomEventsFilterConfig,
    #[serde(default)]
    provider_events: ProviderEventsFilterConfig,
    #[serde(default)]
    github_source: GithubSourceFilterConfig,
}

impl FilterState {
    /// Creates a state with every facet disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this state with `update` applied.
    #[must_use]
    pub fn apply(&self, update: FilterUpdate) -> Self {
        let mut state = self.clone();

        match update {
            FilterUpdate::CustomBusinessEnabled(enabled) => {
                state.custom_business_events.enabled = enabled
            }
            FilterUpdate::CustomTechnicalEnabled(enabled) => {
                state.custom_technical_events.enabled = enabled
            }
            FilterUpdate::ProviderEnabled(enabled) => state.provider_events.enabled = enabled,
            FilterUpdate::ProviderCommitments(value) => state.provider_events.commitments = value,
            FilterUpdate::ProviderMarketplacePurchases(value) => {
                state.provider_events.marketplace_purchases = value
            }
            FilterUpdate::ProviderReservations(value) => state.provider_events.reservations = value,
            FilterUpdate::GithubRepos(repos) => state.github_source.repos = repos,
        }

        state
    }

    /// Configuration of the custom business events facet.
    pub fn custom_business_events(&self) -> &CustomEventsFilterConfig {
        &self.custom_business_events
    }

    /// Configuration of the custom technical events facet.
    pub fn custom_technical_events(&self) -> &CustomEventsFilterConfig {
        &self.custom_technical_events
    }

    /// Configuration of the provider events facet.
    pub fn provider_events(&self) -> &ProviderEventsFilterConfig {
        &self.provider_events
    }

    /// Configuration of the GitHub events facet.
    pub fn github_source(&self) -> &GithubSourceFilterConfig {
        &self.github_source
    }

    /// Returns `customBusinessEvents.enabled`.
    pub fn custom_business_enabled(&self) -> bool {
        self.custom_business_events.enabled
    }

    /// Returns a copy with `customBusinessEvents.enabled` set.
    #[must_use]
    pub fn with_custom_business_enabled(&self, enabled: bool) -> Self {
        self.apply(FilterUpdate::CustomBusinessEnabled(enabled))
    }

    /// Returns `customTechnicalEvents.enabled`.
    pub fn custom_technical_enabled(&self) -> bool {
        self.custom_technical_events.enabled
    }

    /// Returns a copy with `customTechnicalEvents.enabled` set.
    #[must_use]
    pub fn with_custom_technical_enabled(&self, enabled: bool) -> Self {
        self.apply(FilterUpdate::CustomTechnicalEnabled(enabled))
    }

    /// Returns `providerEvents.enabled`.
    pub fn provider_enabled(&self) -> bool {
        self.provider_events.enabled
    }

    /// Returns a copy with `providerEvents.enabled` set. Sub-flags are kept.
    #[must_use]
    pub fn with_provider_enabled(&self, enabled: bool) -> Self {
        self.apply(FilterUpdate::ProviderEnabled(enabled))
    }

    /// Returns `providerEvents.commitments`.
    pub fn provider_commitments(&self) -> bool {
        self.provider_events.commitments
    }

    /// Returns a copy with `providerEvents.commitments` set.
    #[must_use]
    pub fn with_provider_commitments(&self, value: bool) -> Self {
        self.apply(FilterUpdate::ProviderCommitments(value))
    }

    /// Returns `providerEvents.marketplacePurchases`.
    pub fn provider_marketplace_purchases(&self) -> bool {
        self.provider_events.marketplace_purchases
    }

    /// Returns a copy with `providerEvents.marketplacePurchases` set.
    #[must_use]
    pub fn with_provider_marketplace_purchases(&self, value: bool) -> Self {
        self.apply(FilterUpdate::ProviderMarketplacePurchases(value))
    }

    /// Returns `providerEvents.reservations`.
    pub fn provider_reservations(&self) -> bool {
        self.provider_events.reservations
    }

    /// Returns a copy with `providerEvents.reservations` set.
    #[must_use]
    pub fn with_provider_reservations(&self, value: bool) -> Self {
        self.apply(FilterUpdate::ProviderReservations(value))
    }

    /// Returns `githubSource.repos`.
    pub fn github_repos(&self) -> &BTreeSet<String> {
        &self.github_source.repos
    }

    /// Returns a copy with `githubSource.repos` replaced.
    #[must_use]
    pub fn with_github_repos(&self, repos: BTreeSet<String>) -> Self {
        self.apply(FilterUpdate::GithubRepos(repos))
    }

    /// Returns `true` if GitHub events are effectively enabled, i.e. a repository is selected.
    pub fn github_enabled(&self) -> bool {
        !self.github_source.repos.is_empty()
    }

    /// Returns `true` if no facet is enabled and no repository is selected.
    pub fn is_empty(&self) -> bool {
        !self.custom_business_events.enabled
            && !self.custom_technical_events.enabled
            && !self.provider_events.enabled
            && !self.github_enabled()
    }
}
