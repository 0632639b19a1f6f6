use remote_git::{GitClient, Project};

use crate::commands::shared::{ConnectionArgs, SelectionArgs};
use crate::config::Config;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RawArgs {
    #[command(flatten)]
    pub(crate) connection: ConnectionArgs,

    #[command(flatten)]
    pub(crate) selection: SelectionArgs,

    /// Full project name (e.g. `acme/tools/cli`)
    #[arg(short = 'p', long)]
    pub(crate) project: String,

    /// File path inside the repository
    #[arg(long)]
    pub(crate) path: String,

    /// Branch, tag or commit (defaults to the project's default branch)
    #[arg(short = 'r', long = "ref")]
    pub(crate) git_ref: Option<String>,
}

/// Pull projects until `name` shows up; later pages are never fetched.
async fn locate(
    client: &dyn GitClient,
    options: &remote_git::FindOptions,
    name: &str,
) -> Result<Option<Project>, remote_git::ClientError> {
    let mut stream = client.get_projects(options)?;
    while let Some(project) = stream.next().await {
        let project = project?;
        if project.name == name {
            return Ok(Some(project));
        }
    }
    Ok(None)
}

pub(crate) async fn handle_raw(
    args: RawArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = args.connection.connect(&config.client)?;
    let options = args.selection.find_options(&config.find);

    let project = locate(client.as_ref(), &options, &args.project)
        .await?
        .ok_or_else(|| format!("project '{}' not found", args.project))?;

    let git_ref = args
        .git_ref
        .or_else(|| project.default_branch.clone())
        .ok_or_else(|| format!("project '{}' has no default branch, use --ref", project.name))?;

    let content = client.get_raw_file(&project, &args.path, &git_ref).await?;
    print!("{content}");
    Ok(())
}
