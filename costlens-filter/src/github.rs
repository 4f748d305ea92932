//! Repository selection of the GitHub events facet.

use serde::{Deserialize, Serialize};

use crate::{FilterState, FilterUpdate};

/// A repository made available through the GitHub integration.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// The repository identifier.
    pub name: String,
}

impl Repository {
    /// Creates a repository entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A selectable repository as presented next to the GitHub facet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RepositoryChip<'a> {
    /// The repository identifier.
    pub name: &'a str,
    /// Whether the repository is part of the current selection.
    pub selected: bool,
}

/// Whether the GitHub facet can be used.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GithubAvailability {
    /// No repository is available, e.g. because the GitHub integration is not installed.
    Unavailable,
    /// At least one repository can be selected.
    Available,
}

impl GithubAvailability {
    /// Derives the availability from the repository listing.
    ///
    /// A listing that has not been loaded yet counts as empty.
    pub fn of(available: Option<&[Repository]>) -> Self {
        match available {
            Some(repositories) if !repositories.is_empty() => Self::Available,
            _ => Self::Unavailable,
        }
    }
}

impl FilterState {
    /// Returns a copy with `repo` removed from the selection if present, or added otherwise.
    ///
    /// The existing selection is never modified. A new set is built and applied as a
    /// [`FilterUpdate::GithubRepos`] replacement.
    #[must_use]
    pub fn toggle_repo(&self, repo: &str) -> Self {
        let mut repos = self.github_repos().clone();
        if !repos.remove(repo) {
            repos.insert(repo.to_owned());
        }
        self.apply(FilterUpdate::GithubRepos(repos))
    }
}

/// Crosses the available repositories with the current selection, in listing order.
///
/// Selected repositories that are no longer available are not listed, but stay selected.
pub fn repository_chips<'a>(
    available: &'a [Repository],
    state: &FilterState,
) -> Vec<RepositoryChip<'a>> {
    available
        .iter()
        .map(|repository| RepositoryChip {
            name: &repository.name,
            selected: state.github_repos().contains(&repository.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let state = FilterState::new();

        let added = state.toggle_repo("web");
        assert!(added.github_repos().contains("web"));
        assert!(state.github_repos().is_empty());

        let removed = added.toggle_repo("web");
        assert!(removed.github_repos().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let initial = FilterState::new()
            .with_custom_business_enabled(true)
            .with_github_repos(BTreeSet::from(["api".to_owned(), "web".to_owned()]));

        for repo in ["api", "web", "billing-service"] {
            assert_eq!(initial.toggle_repo(repo).toggle_repo(repo), initial);
            assert_ne!(initial.toggle_repo(repo), initial);
        }
    }

    #[test]
    fn test_toggle_leaves_other_facets() {
        let state = FilterState::new()
            .with_provider_enabled(true)
            .with_provider_reservations(true);
        let toggled = state.toggle_repo("api");

        assert_eq!(toggled.provider_events(), state.provider_events());
        assert_eq!(toggled.custom_business_events(), state.custom_business_events());
    }

    #[test]
    fn test_repository_chips() {
        let available = vec![
            Repository::new("web"),
            Repository::new("api"),
            Repository::new("infra"),
        ];
        let state = FilterState::new()
            .toggle_repo("api")
            .toggle_repo("archived");

        assert_eq!(
            repository_chips(&available, &state),
            vec![
                RepositoryChip {
                    name: "web",
                    selected: false,
                },
                RepositoryChip {
                    name: "api",
                    selected: true,
                },
                RepositoryChip {
                    name: "infra",
                    selected: false,
                },
            ]
        );
        assert!(state.github_repos().contains("archived"));
    }

    #[test]
    fn test_availability() {
        let empty: Vec<Repository> = Vec::new();
        let listed = vec![Repository::new("web")];

        assert_eq!(GithubAvailability::of(None), GithubAvailability::Unavailable);
        assert_eq!(
            GithubAvailability::of(Some(empty.as_slice())),
            GithubAvailability::Unavailable
        );
        assert_eq!(
            GithubAvailability::of(Some(listed.as_slice())),
            GithubAvailability::Available
        );
    }

    #[test]
    fn test_deserialize_listing() {
        let json = r#"[{"name": "web"}, {"name": "api"}]"#;
        let repositories: Vec<Repository> = serde_json::from_str(json).unwrap();
        assert_eq!(repositories, vec![Repository::new("web"), Repository::new("api")]);
    }
}
