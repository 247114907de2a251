use anyhow::Result;
use shelfmark_testing::assertions::{assert_json_ids, assert_json_total};
use shelfmark_testing::{TestWorld, sample_articles};

fn world() -> TestWorld {
    TestWorld::new().with_articles(&sample_articles(45))
}

#[test]
fn test_list_first_page_as_json() -> Result<()> {
    let world = world();
    let result = world.run(&["--format", "json", "list", "--data", world.articles_arg()])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    let json = result.json()?;
    assert_json_total(&json, 45)?;
    let expected: Vec<String> = (0..20).map(|i| format!("article-{:04}", i)).collect();
    let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
    assert_json_ids(&json, &expected)?;
    assert_eq!(json["has_more"], true);
    assert_eq!(json["active_filters"], 0);
    Ok(())
}

#[test]
fn test_list_pages_accumulate_until_exhausted() -> Result<()> {
    let world = world();
    let result = world.run(&[
        "--format",
        "json",
        "list",
        "--data",
        world.articles_arg(),
        "--pages",
        "5",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    let json = result.json()?;
    assert_eq!(json["items"].as_array().map(Vec::len), Some(45));
    assert_eq!(json["has_more"], false);
    Ok(())
}

#[test]
fn test_list_status_filter() -> Result<()> {
    let world = world();
    let result = world.run(&[
        "--format",
        "json",
        "list",
        "--data",
        world.articles_arg(),
        "--status",
        "archived",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    let json = result.json()?;
    assert_json_total(&json, 11)?;
    let items = json["items"].as_array().cloned().unwrap_or_default();
    assert!(items.iter().all(|item| item["status"] == "archived"));
    assert_eq!(json["active_filters"], 1);
    Ok(())
}

#[test]
fn test_list_tag_and_favorites_combine() -> Result<()> {
    let world = world();
    let result = world.run(&[
        "--format",
        "json",
        "list",
        "--data",
        world.articles_arg(),
        "--tag",
        "featured",
        "--favorites",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    assert_json_ids(&result.json()?, &["article-0000", "article-0035"])?;
    Ok(())
}

#[test]
fn test_list_title_sort_ascending_with_page_size_override() -> Result<()> {
    let world = world();
    let result = world.run(&[
        "--format",
        "json",
        "list",
        "--data",
        world.articles_arg(),
        "--sort",
        "title",
        "--page-size",
        "3",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    let json = result.json()?;
    assert_json_ids(&json, &["article-0000", "article-0001", "article-0010"])?;
    assert_eq!(json["has_more"], true);
    Ok(())
}

#[test]
fn test_list_plain_output_has_summary() -> Result<()> {
    let world = world();
    let result = world.run(&["list", "--data", world.articles_arg(), "--status", "reading"])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    assert!(result.stdout.contains("article-0001"));
    assert!(result.stdout.contains("[reading]"));
    assert!(result.stdout.contains("Showing 11 of 11"));
    Ok(())
}

#[test]
fn test_list_missing_data_file_fails() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["list", "--data", world.articles_arg()])?;

    assert!(!result.success());
    assert!(result.stderr.contains("Error:"));
    assert!(result.stderr.contains("Failed to read"));
    Ok(())
}

#[test]
fn test_list_rejects_inverted_duration_range() -> Result<()> {
    let world = world();
    let result = world.run(&[
        "list",
        "--data",
        world.articles_arg(),
        "--min-duration",
        "30",
        "--max-duration",
        "10",
    ])?;

    assert!(!result.success());
    assert!(result.stderr.contains("Error:"));
    Ok(())
}

#[test]
fn test_list_unknown_preset_fails() -> Result<()> {
    let world = world();
    let result = world.run(&["list", "--data", world.articles_arg(), "--preset", "nope"])?;

    assert!(!result.success());
    assert!(result.stderr.contains("No preset named 'nope'"));
    Ok(())
}

#[test]
fn test_logs_go_to_stderr_and_keep_json_clean() -> Result<()> {
    let world = world().with_env("RUST_LOG", "info");
    let result = world.run(&["--format", "json", "list", "--data", world.articles_arg()])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    assert!(result.stderr.contains("loaded articles"));
    assert_json_total(&result.json()?, 45)?;
    Ok(())
}

#[test]
fn test_log_level_flag_overrides_env() -> Result<()> {
    let world = world().with_env("RUST_LOG", "error");
    let result = world.run(&[
        "--log-level",
        "debug",
        "--format",
        "json",
        "list",
        "--data",
        world.articles_arg(),
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr);

    assert!(result.stderr.contains("dispatching fetch"));
    assert!(result.json().is_ok());
    Ok(())
}
