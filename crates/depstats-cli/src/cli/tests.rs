#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_positional_modules() {
        let cli = Cli::parse_from([
            "depstats",
            "analyze",
            "node_modules/a/index.js",
            "node_modules/b/index.js",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(
                    args.input.modules,
                    vec![
                        PathBuf::from("node_modules/a/index.js"),
                        PathBuf::from("node_modules/b/index.js")
                    ]
                );
                assert!(!args.json);
                assert!(args.out.is_none());
                assert!(args.input.base_dir.is_none());
            }
            _ => panic!("Expected analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_options() {
        let cli = Cli::parse_from([
            "depstats",
            "analyze",
            "--base-dir",
            "app",
            "--modules-file",
            "loaded.txt",
            "--json",
            "--out",
            "stats.json",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.input.base_dir, Some(PathBuf::from("app")));
                assert_eq!(args.input.modules_file, Some(PathBuf::from("loaded.txt")));
                assert!(args.json);
                assert_eq!(args.out, Some(PathBuf::from("stats.json")));
                assert!(args.input.modules.is_empty());
            }
            _ => panic!("Expected analyze command"),
        }
    }

    #[test]
    fn test_owner_file_then_modules() {
        let cli = Cli::parse_from(["depstats", "owner", "a.js", "b.js", "c.js", "-b", "/app"]);
        match cli.command {
            Command::Owner(args) => {
                assert_eq!(args.file, PathBuf::from("a.js"));
                assert_eq!(
                    args.input.modules,
                    vec![PathBuf::from("b.js"), PathBuf::from("c.js")]
                );
                assert_eq!(args.input.base_dir, Some(PathBuf::from("/app")));
            }
            _ => panic!("Expected owner command"),
        }
    }

    #[test]
    fn test_owner_requires_file() {
        assert!(Cli::try_parse_from(["depstats", "owner"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "depstats",
            "analyze",
            "x.js",
            "--verbose",
            "--no-color",
            "--config",
            "custom.json",
        ]);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["depstats", "-v", "-q", "analyze"]).is_err());
    }
}
