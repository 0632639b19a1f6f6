use async_trait::async_trait;
use regex::Regex;

use super::{FilterError, ProjectFilter};
use crate::platform::Project;

fn compile(filter: &'static str, pattern: &str) -> Result<Regex, FilterError> {
    if pattern.is_empty() {
        return Err(FilterError::EmptyPattern { filter });
    }
    Ok(Regex::new(pattern)?)
}

/// Keeps projects whose name matches a pattern.
#[derive(Debug, Clone)]
pub struct IncludeRegexpFilter {
    regexp: Regex,
}

impl IncludeRegexpFilter {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        Ok(Self {
            regexp: compile("IncludeRegexpFilter", pattern)?,
        })
    }
}

#[async_trait]
impl ProjectFilter for IncludeRegexpFilter {
    fn name(&self) -> &'static str {
        "IncludeRegexpFilter"
    }

    fn description(&self) -> String {
        format!("project name should match /{}/", self.regexp.as_str())
    }

    async fn is_accepted(&self, project: &Project) -> bool {
        self.regexp.is_match(&project.name)
    }
}

/// Drops projects whose name matches a pattern.
#[derive(Debug, Clone)]
pub struct IgnoreRegexpFilter {
    regexp: Regex,
}

impl IgnoreRegexpFilter {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        Ok(Self {
            regexp: compile("IgnoreRegexpFilter", pattern)?,
        })
    }
}

#[async_trait]
impl ProjectFilter for IgnoreRegexpFilter {
    fn name(&self) -> &'static str {
        "IgnoreRegexpFilter"
    }

    fn description(&self) -> String {
        format!("project name should not match /{}/", self.regexp.as_str())
    }

    async fn is_accepted(&self, project: &Project) -> bool {
        !self.regexp.is_match(&project.name)
    }
}
