//! Focused unit tests covering CLI configuration and output helpers.

use super::helpers::write_utf8;
use super::*;
use crate::catalog::{DEFAULT_CATALOG_FILE, require_existing, resolve_catalog_path};
use crate::favourite::{FavouriteArgs, FavouriteConfig, ENV_FAVOURITE_BOOK_ID};
use crate::rank::{ENV_RANK_CATALOG_DB, RankConfig};
use crate::recommend::{ENV_RECOMMEND_BOOK_ID, RecommendConfig};
use crate::suggest::SuggestConfig;
use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;

fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

#[rstest]
fn catalog_path_prefers_explicit_override() {
    let path = resolve_catalog_path(
        Some(Utf8PathBuf::from("explicit.db")),
        Some(Utf8PathBuf::from("data")),
        ENV_RANK_CATALOG_DB,
    )
    .expect("path resolves");
    assert_eq!(path, Utf8PathBuf::from("explicit.db"));
}

#[rstest]
fn catalog_path_defaults_inside_data_dir() {
    let path = resolve_catalog_path(None, Some(Utf8PathBuf::from("data")), ENV_RANK_CATALOG_DB)
        .expect("path resolves");
    assert_eq!(path, Utf8PathBuf::from("data").join(DEFAULT_CATALOG_FILE));
}

#[rstest]
fn converting_rank_without_catalog_errors() {
    let err = RankConfig::try_from(RankArgs::default()).expect_err("missing catalogue");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CATALOG_DB);
            assert_eq!(env, ENV_RANK_CATALOG_DB);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn rank_defaults_to_ninetieth_percentile() {
    let args = RankArgs {
        catalog_db: Some(Utf8PathBuf::from("catalog.db")),
        ..RankArgs::default()
    };
    let config = RankConfig::try_from(args).expect("config should build");
    assert_eq!(config.vote_percentile, 90.0);
    assert_eq!(config.output, None);
}

#[rstest]
fn converting_recommend_without_book_errors() {
    let args = RecommendArgs {
        catalog_db: Some(Utf8PathBuf::from("catalog.db")),
        ..RecommendArgs::default()
    };
    let err = RecommendConfig::try_from(args).expect_err("missing book id");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_BOOK_ID);
            assert_eq!(env, ENV_RECOMMEND_BOOK_ID);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn suggest_defaults_limit_to_five() {
    let args = SuggestArgs {
        user_id: Some(3),
        data_dir: Some(Utf8PathBuf::from("data")),
        ..SuggestArgs::default()
    };
    let config = SuggestConfig::try_from(args).expect("config should build");
    assert_eq!(config.limit, 5);
    assert_eq!(config.user_id, 3);
    assert_eq!(config.catalog_db, Utf8PathBuf::from("data/catalog.db"));
}

#[rstest]
#[case(None, Some(2), ARG_USER_ID)]
#[case(Some(1), None, ARG_BOOK_ID)]
fn converting_favourite_requires_both_ids(
    #[case] user_id: Option<u64>,
    #[case] book_id: Option<u64>,
    #[case] expected: &'static str,
) {
    let args = FavouriteArgs {
        user_id,
        book_id,
        catalog_db: Some(Utf8PathBuf::from("catalog.db")),
        ..FavouriteArgs::default()
    };
    let err = FavouriteConfig::try_from(args).expect_err("missing id");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected);
            if field == ARG_BOOK_ID {
                assert_eq!(env, ENV_FAVOURITE_BOOK_ID);
            }
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn require_existing_reports_missing_and_directories() {
    let (_tmp, root) = workspace();
    let missing = root.join("missing.db");
    match require_existing(&missing, ARG_CATALOG_DB) {
        Err(CliError::MissingSourceFile { field, path }) => {
            assert_eq!(field, ARG_CATALOG_DB);
            assert_eq!(path, missing);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }

    let directory = root.join("catalog.db");
    std::fs::create_dir(directory.as_std_path()).expect("create directory");
    match require_existing(&directory, ARG_CATALOG_DB) {
        Err(CliError::SourcePathNotFile { .. }) => {}
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }

    let file = root.join("present.db");
    write_utf8(&file, b"sqlite");
    require_existing(&file, ARG_CATALOG_DB).expect("regular file accepted");
}

#[rstest]
#[case(Some("debug"), Some("info"), "debug")]
#[case(None, Some("info"), "info")]
#[case(None, None, DEFAULT_LOG_LEVEL)]
#[case(Some("  "), None, DEFAULT_LOG_LEVEL)]
fn log_directive_precedence(
    #[case] flag: Option<&str>,
    #[case] env: Option<&str>,
    #[case] expected: &str,
) {
    let directive = logging::log_directive(flag, env.map(str::to_owned));
    assert_eq!(directive, expected);
}

#[rstest]
fn invalid_log_level_is_reported() {
    let err = logging::init_logging("folio_scorer=loudest").expect_err("bad level");
    assert!(matches!(err, CliError::InvalidLogLevel { .. }));
}

#[rstest]
fn write_json_creates_parent_directories() {
    let (_tmp, root) = workspace();
    let target = root.join("nested/out/ranking.json");
    let mut stdout = Vec::new();
    output::write_json(&mut stdout, Some(&target), &vec![1_u64, 2]).expect("write output");
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(target.as_std_path()).expect("read output");
    let parsed: Vec<u64> = serde_json::from_str(&written).expect("json payload");
    assert_eq!(parsed, vec![1, 2]);
}
