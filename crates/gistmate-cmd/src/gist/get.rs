//! `gistmate get` command.

use anyhow::Result;
use clap::Args;

use super::gist_id::parse_gist_id;
use super::shared::fetch_to_work_dir;

/// Download a gist into the current directory.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Gist ID or URL.
    #[arg(value_name = "ID | URL")]
    gist: String,

    /// Open the downloaded files in the editor.
    #[arg(short, long)]
    edit: bool,
}

impl GetArgs {
    /// Run the get command.
    ///
    /// # Errors
    ///
    /// Returns an error if the gist cannot be fetched, written, or cached.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let gist_id = parse_gist_id(&self.gist)?;
        fetch_to_work_dir(factory, &gist_id, self.edit).await
    }
}

#[cfg(test)]
mod tests {
    use gistmate_api::ApiError;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_helpers::{TEST_WEB_URL, TestHarness, gist_json, mock_rest_get};

    fn args(gist: &str, edit: bool) -> GetArgs {
        GetArgs {
            gist: gist.into(),
            edit,
        }
    }

    #[tokio::test]
    async fn test_should_write_files_and_cache_gist() {
        let h = TestHarness::new().await;
        mock_rest_get(
            &h.server,
            "/gists/abc123",
            200,
            gist_json("abc123", &[("notes.md", "hi")]),
        )
        .await;

        args("abc123", false).run(&h.factory).await.unwrap();

        let written = std::fs::read_to_string(h.work_dir().join("notes.md")).unwrap();
        assert_eq!(written, "hi");
        assert_eq!(
            h.cached().filenames("abc123"),
            Some(["notes.md".to_string()].as_slice())
        );
        assert_eq!(h.stdout(), "notes.md\n");
        assert_eq!(h.clipboard(), vec![format!("{TEST_WEB_URL}/abc123")]);
        assert!(h.edited().is_empty());
    }

    #[tokio::test]
    async fn test_should_accept_gist_url() {
        let h = TestHarness::new().await;
        mock_rest_get(
            &h.server,
            "/gists/1234567",
            200,
            gist_json("1234567", &[("b.py", "print(2)"), ("a.rb", "puts 1")]),
        )
        .await;

        args("https://gist.github.com/octocat/1234567", false)
            .run(&h.factory)
            .await
            .unwrap();

        assert_eq!(h.stdout(), "a.rb\nb.py\n");
        assert_eq!(
            h.cached().filenames("1234567"),
            Some(["a.rb".to_string(), "b.py".to_string()].as_slice())
        );
    }

    #[tokio::test]
    async fn test_should_strip_server_path_components() {
        let h = TestHarness::new().await;
        mock_rest_get(
            &h.server,
            "/gists/abc123",
            200,
            gist_json("abc123", &[("../escape.txt", "nope")]),
        )
        .await;

        args("abc123", false).run(&h.factory).await.unwrap();

        assert!(h.work_dir().join("escape.txt").exists());
        assert!(!h.dir.path().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_should_open_files_in_editor() {
        let h = TestHarness::new().await;
        mock_rest_get(
            &h.server,
            "/gists/abc123",
            200,
            gist_json("abc123", &[("notes.md", "hi")]),
        )
        .await;

        args("abc123", true).run(&h.factory).await.unwrap();

        assert_eq!(h.edited(), vec![h.work_dir().join("notes.md")]);
    }

    #[tokio::test]
    async fn test_should_leave_cache_untouched_on_not_found() {
        let h = TestHarness::new().await;
        h.seed_cache("other", &["keep.txt"]);
        mock_rest_get(
            &h.server,
            "/gists/missing1",
            404,
            serde_json::json!({"message": "Not Found"}),
        )
        .await;

        let err = args("missing1", false).run(&h.factory).await.unwrap_err();

        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(api.is_not_found());
        assert_eq!(std::fs::read_dir(h.work_dir()).unwrap().count(), 0);
        assert_eq!(h.cached().len(), 1);
        assert!(!h.cached().contains("missing1"));
        assert!(h.stdout().is_empty());
        assert!(h.clipboard().is_empty());
    }

    #[tokio::test]
    async fn test_should_succeed_when_clipboard_fails() {
        let h = TestHarness::without_clipboard().await;
        mock_rest_get(
            &h.server,
            "/gists/abc123",
            200,
            gist_json("abc123", &[("notes.md", "hi")]),
        )
        .await;

        args("abc123", false).run(&h.factory).await.unwrap();

        assert_eq!(h.stdout(), "notes.md\n");
        assert!(h.stderr().contains("could not copy"));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_id_without_request() {
        let h = TestHarness::new().await;
        let err = args("not a gist", false).run(&h.factory).await.unwrap_err();
        assert!(err.to_string().contains("invalid gist id"));
        assert_eq!(h.request_count().await, 0);
    }
}
