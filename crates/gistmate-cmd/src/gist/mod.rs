//! Gist commands.
//!
//! Filename-keyed commands consult the local gist cache before any request
//! is made; id-keyed commands accept a bare id or a gist URL.

pub mod add;
pub mod create;
pub mod get;
pub mod gist_id;
pub mod id;
pub mod list;
pub mod pick;
pub mod raw;
pub mod show;
pub mod update;
pub mod url;
pub mod view;

mod shared;

use clap::Subcommand;

/// Work with gists.
#[derive(Debug, Subcommand)]
pub enum GistCommand {
    /// Download a gist into the current directory.
    Get(get::GetArgs),
    /// Pick one of your gists from a list and download it.
    Pick(pick::PickArgs),
    /// Create a gist from a file.
    Create(create::CreateArgs),
    /// Upload a tracked file to its gist.
    Update(update::UpdateArgs),
    /// Add a file to an existing gist.
    Add(add::AddArgs),
    /// Print and copy the web URL of a tracked file's gist.
    Url(url::UrlArgs),
    /// Open a tracked file's gist in the browser.
    View(view::ViewArgs),
    /// Print the gist id of a tracked file.
    Id(id::IdArgs),
    /// List a user's gists.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// Print the files of a gist.
    Show(show::ShowArgs),
    /// Print the JSON of a gist.
    Raw(raw::RawArgs),
}

impl GistCommand {
    /// Run the selected subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> anyhow::Result<()> {
        match self {
            Self::Get(args) => args.run(factory).await,
            Self::Pick(args) => args.run(factory).await,
            Self::Create(args) => args.run(factory).await,
            Self::Update(args) => args.run(factory).await,
            Self::Add(args) => args.run(factory).await,
            Self::Url(args) => args.run(factory),
            Self::View(args) => args.run(factory),
            Self::Id(args) => args.run(factory),
            Self::List(args) => args.run(factory).await,
            Self::Show(args) => args.run(factory).await,
            Self::Raw(args) => args.run(factory).await,
        }
    }
}
