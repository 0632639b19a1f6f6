use async_trait::async_trait;

use super::ProjectFilter;
use crate::platform::Project;

/// Ordered conjunction of filters.
///
/// Evaluation stops at the first rejecting filter. An empty collection accepts
/// every project.
#[derive(Default)]
pub struct FilterCollection {
    filters: Vec<Box<dyn ProjectFilter>>,
}

impl FilterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, filter: impl ProjectFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Builder form of [`FilterCollection::add_filter`].
    pub fn with_filter(mut self, filter: impl ProjectFilter + 'static) -> Self {
        self.add_filter(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[async_trait]
impl ProjectFilter for FilterCollection {
    fn name(&self) -> &'static str {
        "FilterCollection"
    }

    fn description(&self) -> String {
        self.filters
            .iter()
            .map(|f| format!("- {}", f.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    async fn is_accepted(&self, project: &Project) -> bool {
        for filter in &self.filters {
            if !filter.is_accepted(project).await {
                tracing::info!(
                    "[{}]Ignoring project {} ({})",
                    filter.name(),
                    project.name,
                    filter.description()
                );
                return false;
            }
        }
        tracing::debug!("[FilterCollection]keep project {}", project.name);
        true
    }
}
