//! `gistmate list` command.

use anyhow::{Context, Result};
use clap::Args;
use gistmate_api::client::LIST_PAGE_SIZE;
use gistmate_core::{ios_eprintln, ios_println};

/// List a user's gists as `id,file1,file2` lines.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// GitHub login; defaults to the authenticated user.
    #[arg(value_name = "USERNAME")]
    user: Option<String>,
}

impl ListArgs {
    /// Run the list command.
    ///
    /// # Errors
    ///
    /// Returns an error without credentials when no user is given, or if the
    /// gists cannot be listed.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let (client, login) = match self.user {
            Some(ref user) => (factory.api_client()?, user.clone()),
            None => {
                let client = factory.authed_api_client().await?;
                let login = client
                    .current_login()
                    .await
                    .context("failed to look up the authenticated user")?;
                (client, login)
            }
        };

        let gists = client
            .list_for_user(&login)
            .await
            .with_context(|| format!("failed to list gists for {login}"))?;

        let ios = &factory.io;
        for gist in &gists {
            ios_println!(ios, "{}", gist.to_line());
        }
        if gists.len() >= LIST_PAGE_SIZE as usize && ios.is_stdout_tty() {
            let cs = ios.color_scheme();
            ios_eprintln!(
                ios,
                "{} only the first {LIST_PAGE_SIZE} gists are shown",
                cs.warning_icon()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gistmate_core::cmdutil::NoAuthError;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::test_helpers::{TestHarness, mock_rest_get, mock_rest_get_authed};

    #[tokio::test]
    async fn test_should_print_one_line_per_gist() {
        let h = TestHarness::new().await;
        Mock::given(method("GET"))
            .and(path("/users/alice/gists"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"id": "1", "files": {"a.rb": {"filename": "a.rb"}}},
                    {"id": "2", "files": {"c.py": {"filename": "c.py"}, "b.py": {"filename": "b.py"}}}
                ]"#,
            ))
            .mount(&h.server)
            .await;

        ListArgs {
            user: Some("alice".into()),
        }
        .run(&h.factory)
        .await
        .unwrap();

        assert_eq!(h.stdout(), "1,a.rb\n2,c.py,b.py\n");
    }

    #[tokio::test]
    async fn test_should_list_named_user_without_credentials() {
        let h = TestHarness::without_credentials().await;
        mock_rest_get(
            &h.server,
            "/users/alice/gists",
            200,
            serde_json::json!([
                {"id": "1", "files": {"a.rb": {}}},
                {"id": "2", "files": {"b.py": {}, "c.py": {}}}
            ]),
        )
        .await;

        ListArgs {
            user: Some("alice".into()),
        }
        .run(&h.factory)
        .await
        .unwrap();

        assert_eq!(h.stdout(), "1,a.rb\n2,b.py,c.py\n");
    }

    #[tokio::test]
    async fn test_should_list_authenticated_user_by_default() {
        let h = TestHarness::new().await;
        mock_rest_get_authed(&h.server, "/user", serde_json::json!({"login": "octocat"})).await;
        mock_rest_get(
            &h.server,
            "/users/octocat/gists",
            200,
            serde_json::json!([{"id": "9", "files": {"z.txt": {}}}]),
        )
        .await;

        ListArgs { user: None }.run(&h.factory).await.unwrap();

        assert_eq!(h.stdout(), "9,z.txt\n");
    }

    #[tokio::test]
    async fn test_should_require_credentials_without_user() {
        let h = TestHarness::without_credentials().await;
        let err = ListArgs { user: None }.run(&h.factory).await.unwrap_err();
        assert!(err.downcast_ref::<NoAuthError>().is_some());
        assert_eq!(h.request_count().await, 0);
    }

    #[tokio::test]
    async fn test_should_print_nothing_for_empty_listing() {
        let h = TestHarness::new().await;
        mock_rest_get(&h.server, "/users/nobody/gists", 200, serde_json::json!([])).await;

        ListArgs {
            user: Some("nobody".into()),
        }
        .run(&h.factory)
        .await
        .unwrap();

        assert!(h.stdout().is_empty());
    }
}
