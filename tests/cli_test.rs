//! CLI Command Tests
//!
//! Argument parsing plus command handlers run against a mocked catalog.
//! Covers exit codes and input validation.

// =============================================================================
// CLI Argument Parsing Tests
// =============================================================================

mod cli_parsing {
    use clap::Parser;
    use podtui::cli::{Cli, Command};

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from::<_, &str>([]);
        assert!(!cli.is_cli_mode());
        assert!(cli.route.is_none());
    }

    #[test]
    fn test_list_with_every_option() {
        let cli = Cli::parse_from([
            "podtui",
            "list",
            "--search",
            "true crime",
            "--genre",
            "2",
            "--page",
            "2",
            "--page-size",
            "5",
        ]);
        match cli.command {
            Some(Command::List(cmd)) => {
                assert_eq!(cmd.search.as_deref(), Some("true crime"));
                assert_eq!(cmd.genre, Some(2));
                assert_eq!(cmd.page, 2);
                assert_eq!(cmd.page_size, Some(5));
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_command_aliases() {
        let cli = Cli::parse_from(["podtui", "ls"]);
        assert!(matches!(cli.command, Some(Command::List(_))));

        let cli = Cli::parse_from(["podtui", "s", "10716"]);
        assert!(matches!(cli.command, Some(Command::Show(_))));

        let cli = Cli::parse_from(["podtui", "g", "3"]);
        assert!(matches!(cli.command, Some(Command::Genre(_))));
    }

    #[test]
    fn test_show_requires_id() {
        assert!(Cli::try_parse_from(["podtui", "show"]).is_err());
    }

    #[test]
    fn test_genre_rejects_unknown_id() {
        assert!(Cli::try_parse_from(["podtui", "genre", "0"]).is_err());
        assert!(Cli::try_parse_from(["podtui", "genre", "12"]).is_err());
    }
}

// =============================================================================
// Command Handler Tests
// =============================================================================

mod handlers {
    use mockito::{Mock, Server, ServerGuard};
    use podtui::api::CatalogClient;
    use podtui::cli::{ExitCode, GenreCmd, ListCmd, Output, ShowCmd};
    use podtui::commands;

    fn quiet_json() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn show_list(n: usize) -> String {
        let shows: Vec<String> = (1..=n)
            .map(|i| {
                format!(
                    r#"{{"id":"{i}","title":"Show {i}","description":"","seasons":1,"genres":[1],"updated":"2022-01-01T00:00:00Z"}}"#
                )
            })
            .collect();
        format!("[{}]", shows.join(","))
    }

    /// Server plus its mock; the mock must outlive the request
    async fn catalog_server(body: String) -> (ServerGuard, Mock) {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        (server, mock)
    }

    fn list(page: u64) -> ListCmd {
        ListCmd {
            search: None,
            genre: None,
            page,
            page_size: None,
        }
    }

    #[tokio::test]
    async fn test_list_success() {
        let (server, _mock) = catalog_server(show_list(3)).await;
        let client = CatalogClient::with_base_url(server.url());

        let code = commands::list_cmd(list(1), &client, 8, &quiet_json()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_list_page_out_of_range() {
        let (server, _mock) = catalog_server(show_list(3)).await;
        let client = CatalogClient::with_base_url(server.url());

        let code = commands::list_cmd(list(5), &client, 2, &quiet_json()).await;
        assert_eq!(code, ExitCode::InvalidArgs);
    }

    #[tokio::test]
    async fn test_list_network_error() {
        let mut server = Server::new_async().await;
        let _mock = server.mock("GET", "/").with_status(500).create_async().await;
        let client = CatalogClient::with_base_url(server.url());

        let code = commands::list_cmd(list(1), &client, 8, &quiet_json()).await;
        assert_eq!(code, ExitCode::NetworkError);
    }

    #[tokio::test]
    async fn test_show_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/id/nope")
            .with_status(404)
            .create_async()
            .await;
        let client = CatalogClient::with_base_url(server.url());

        let cmd = ShowCmd {
            id: "nope".into(),
            season: None,
        };
        let code = commands::show_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_show_missing_season() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/id/7")
            .with_status(200)
            .with_body(r#"{"id":"7","title":"One Season","seasons":[{"season":1,"episodes":[]}]}"#)
            .create_async()
            .await;
        let client = CatalogClient::with_base_url(server.url());

        let cmd = ShowCmd {
            id: "7".into(),
            season: Some(3),
        };
        let code = commands::show_cmd(cmd, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_genre_success() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/genre/4")
            .with_status(200)
            .with_body(r#"{"id":4,"title":"Comedy","description":"Laughs","shows":["1"]}"#)
            .create_async()
            .await;
        let client = CatalogClient::with_base_url(server.url());

        let code = commands::genre_cmd(GenreCmd { id: 4 }, &client, &quiet_json()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[test]
    fn test_genres_needs_no_network() {
        assert_eq!(commands::genres_cmd(&quiet_json()), ExitCode::Success);
    }
}
