use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, class, method};

#[test]
fn test_inspect_prints_model_json() -> Result<()> {
    let source = "/**
 @dip.register
 @dip.name api
 @dip.tag \"main\"
*/
class ApiClient {
    /// @dip.arguments url
    init(url: URL) {}
}
";
    let test = CliTest::new()?;
    test.write_swift(
        "ApiClient.swift",
        source,
        vec![class(
            source,
            "ApiClient",
            vec![method(source, "init(url", "init(url:)", &[("url", "URL")])],
        )],
    )?;

    assert_cmd_snapshot!(test.inspect_command());

    // Nothing is written.
    assert!(!test.root().join("Dip.generated.swift").exists());

    Ok(())
}

#[test]
fn test_inspect_empty_project() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.inspect_command());

    Ok(())
}
