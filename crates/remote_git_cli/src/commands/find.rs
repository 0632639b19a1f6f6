use std::sync::Arc;

use clap::ValueEnum;
use remote_git::filter::{
    ComposerProjectFilter, IgnoreRegexpFilter, IncludeRegexpFilter, RequiredFileFilter,
};
use remote_git::{FilterCollection, GitClient, Project};

use crate::commands::shared::{ConnectionArgs, SelectionArgs};
use crate::config::{Config, FindConfig};

/// Output format for project listings.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
    /// One project name per line
    Names,
}

/// Client-side filters; unset flags fall back to the `[find]` config section.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct FilterArgs {
    /// Keep projects whose name matches this regular expression
    #[arg(long)]
    pub(crate) include: Option<String>,

    /// Drop projects whose name matches this regular expression
    #[arg(long)]
    pub(crate) ignore: Option<String>,

    /// Keep projects having this file on their default branch (repeatable)
    #[arg(long = "require-file")]
    pub(crate) require_file: Vec<String>,

    /// Keep projects having a composer.json
    #[arg(long)]
    pub(crate) composer: bool,

    /// Accepted composer package types, comma-separated (implies --composer)
    #[arg(long)]
    pub(crate) composer_type: Option<String>,
}

impl FilterArgs {
    pub(crate) fn build(
        &self,
        client: &Arc<dyn GitClient>,
        defaults: &FindConfig,
    ) -> Result<FilterCollection, Box<dyn std::error::Error>> {
        let mut filters = FilterCollection::new();

        if let Some(pattern) = self.include.as_ref().or(defaults.include.as_ref()) {
            filters.add_filter(IncludeRegexpFilter::new(pattern)?);
        }
        if let Some(pattern) = self.ignore.as_ref().or(defaults.ignore.as_ref()) {
            filters.add_filter(IgnoreRegexpFilter::new(pattern)?);
        }

        let required = if self.require_file.is_empty() {
            &defaults.require_file
        } else {
            &self.require_file
        };
        for file_path in required {
            filters.add_filter(RequiredFileFilter::new(Arc::clone(client), file_path.as_str()));
        }

        let composer_type = self.composer_type.as_ref().or(defaults.composer_type.as_ref());
        if self.composer || defaults.composer || composer_type.is_some() {
            let mut composer = ComposerProjectFilter::new(Arc::clone(client));
            if let Some(types) = composer_type {
                composer = composer.with_project_type(types);
            }
            filters.add_filter(composer);
        }

        Ok(filters)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FindArgs {
    #[command(flatten)]
    pub(crate) connection: ConnectionArgs,

    #[command(flatten)]
    pub(crate) selection: SelectionArgs,

    #[command(flatten)]
    pub(crate) filters: FilterArgs,

    /// Stop after this many projects
    #[arg(short = 'l', long)]
    pub(crate) limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub(crate) format: OutputFormat,
}

/// Project information for display.
#[derive(Debug, Clone, serde::Serialize, tabled::Tabled)]
pub(crate) struct ProjectRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Branch")]
    pub default_branch: String,
    #[tabled(rename = "Visibility")]
    pub visibility: String,
    #[tabled(rename = "Archived")]
    pub archived: String,
    #[tabled(rename = "URL")]
    pub http_url: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            default_branch: project.default_branch.clone().unwrap_or_else(|| "-".to_string()),
            visibility: project
                .visibility
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            archived: if project.is_archived { "yes" } else { "no" }.to_string(),
            http_url: project.http_url.clone(),
        }
    }
}

fn render(projects: &[Project], format: OutputFormat) -> Result<String, serde_json::Error> {
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<ProjectRow> = projects.iter().map(ProjectRow::from).collect();
            let mut table = tabled::Table::new(rows);
            table.with(tabled::settings::Style::rounded());
            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(projects)?,
        OutputFormat::Names => projects
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

pub(crate) async fn handle_find(
    args: FindArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.connection.connect(&config.client)?;
    let filters = args.filters.build(&client, &config.find)?;
    tracing::debug!(client = client.client_type(), filters = filters.len(), "find projects");

    let options = args.selection.find_options(&config.find).with_filter(filters);
    let stream = client.get_projects(&options)?;
    let projects = match args.limit {
        Some(limit) => stream.take(limit).await?,
        None => stream.try_collect().await?,
    };
    tracing::info!("{} project(s) found", projects.len());

    let out = render(&projects, args.format)?;
    if !out.is_empty() {
        println!("{out}");
    }
    Ok(())
}
