use anyhow::Result;
use insta::assert_snapshot;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, class, method, property, run};

const API_CLIENT: &str = "import UIKit

/** @dip.register */
class ApiClient {
    init() {}
}
";

fn with_api_client() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_swift(
        "App/ApiClient.swift",
        API_CLIENT,
        vec![class(
            API_CLIENT,
            "ApiClient",
            vec![method(API_CLIENT, "init()", "init()", &[])],
        )],
    )?;
    Ok(test)
}

#[test]
fn test_generate_combined_output() -> Result<()> {
    let test = with_api_client()?;

    assert_cmd_snapshot!(test.generate_command());
    assert_snapshot!("combined_output_swift", test.read_file("Dip.generated.swift")?);

    Ok(())
}

#[test]
fn test_generate_is_stable_across_runs() -> Result<()> {
    let test = with_api_client()?;

    let (first, _, _) = run(test.generate_command())?;
    assert!(first.status.success());
    let before = test.read_file("Dip.generated.swift")?;

    // The generated file is skipped by the scanner, so it has no sidecars
    // and must not fail the second run.
    let (second, stdout, _) = run(test.generate_command())?;
    assert!(second.status.success());
    assert!(!stdout.contains("Wrote"));
    assert_eq!(test.read_file("Dip.generated.swift")?, before);

    Ok(())
}

#[test]
fn test_check_detects_stale_output() -> Result<()> {
    let test = with_api_client()?;

    assert_cmd_snapshot!(test.generate_command().arg("--check"));
    assert!(!test.root().join("Dip.generated.swift").exists());

    run(test.generate_command())?;

    assert_cmd_snapshot!(test.generate_command().arg("--check"));

    Ok(())
}

#[test]
fn test_property_injection_and_implements() -> Result<()> {
    let source = "/**
 @dip.register
 @dip.scope Singleton
 @dip.implements Fetching
*/
class Repository {
    /// @dip.inject
    var client: ApiClient!

    init(session: Session) {}
}
";
    let test = CliTest::new()?;
    test.write_swift(
        "Repository.swift",
        source,
        vec![class(
            source,
            "Repository",
            vec![
                property(source, "client", "ApiClient!"),
                method(source, "init(session", "init(session:)", &[("session", "Session")]),
            ],
        )],
    )?;

    let (output, _, _) = run(test.generate_command())?;
    assert!(output.status.success());

    assert_snapshot!(
        "property_injection_swift",
        test.read_file("Dip.generated.swift")?
    );

    Ok(())
}

#[test]
fn test_ambiguous_constructor_is_skipped_with_warning() -> Result<()> {
    let source = "/** @dip.register */
class Service {
    init() {}
    init(name: String) {}
}
";
    let test = CliTest::new()?;
    test.write_swift(
        "Service.swift",
        source,
        vec![class(
            source,
            "Service",
            vec![
                method(source, "init()", "init()", &[]),
                method(source, "init(name", "init(name:)", &[("name", "String")]),
            ],
        )],
    )?;

    assert_cmd_snapshot!(test.generate_command());
    assert_cmd_snapshot!(test.generate_command().arg("-v"));

    Ok(())
}

#[test]
fn test_runtime_arguments_and_strict_mode() -> Result<()> {
    let source = "/**
 @dip.register
 @dip.arguments url, port
*/
class Server {
    init(url: URL, logger: Logger) {}
}
";
    let test = CliTest::new()?;
    test.write_swift(
        "Server.swift",
        source,
        vec![class(
            source,
            "Server",
            vec![method(
                source,
                "init(url",
                "init(url:logger:)",
                &[("url", "URL"), ("logger", "Logger")],
            )],
        )],
    )?;

    let (lenient, _, stderr) = run(test.generate_command())?;
    assert!(lenient.status.success());
    assert!(stderr.contains("warning: 1 runtime argument(s) dropped"));
    assert_snapshot!("runtime_arguments_swift", test.read_file("Dip.generated.swift")?);

    assert_cmd_snapshot!(test.generate_command().arg("--strict-arguments"));

    Ok(())
}

#[test]
fn test_missing_sidecar_is_an_error() -> Result<()> {
    let test = with_api_client()?;
    test.write_file("App/Broken.swift", "class Broken {}\n")?;

    let (output, _, stderr) = run(test.generate_command())?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("failed to read the structure of"));
    assert!(stderr.contains("Broken.swift"));
    assert!(!test.root().join("Dip.generated.swift").exists());

    Ok(())
}

#[test]
fn test_per_container_mode_with_config() -> Result<()> {
    let source = "/**
 @dip.register
 @dip.container list module
 @dip.storyboard-instantiatable
*/
class ListViewController {
    init() {}
}
";
    let test = with_api_client()?;
    test.write_swift(
        "App/ListViewController.swift",
        source,
        vec![class(
            source,
            "ListViewController",
            vec![method(source, "init()", "init()", &[])],
        )],
    )?;
    test.write_file(
        ".dipgenrc.json",
        r#"{ "output": "Generated", "mode": "per-container", "ignores": ["**/Scripts/**"] }"#,
    )?;
    test.write_file("Scripts/Tool.swift", "print(1)\n")?;

    assert_cmd_snapshot!(test.generate_command());

    assert_snapshot!(
        "per_container_base_swift",
        test.read_file("Generated/BaseContainer.generated.swift")?
    );
    assert_snapshot!(
        "per_container_list_module_swift",
        test.read_file("Generated/ListModuleContainer.generated.swift")?
    );
    assert_snapshot!(
        "per_container_index_swift",
        test.read_file("Generated/Dip.generated.swift")?
    );

    Ok(())
}

#[test]
fn test_template_override() -> Result<()> {
    let test = with_api_client()?;
    test.write_file(
        "Templates/partials/header.swift",
        "// Custom header\n{% for module in imports %}\nimport {{ module }}\n{% endfor %}\n",
    )?;

    let (output, _, stderr) = run({
        let mut cmd = test.generate_command();
        cmd.args(["--templates-dir", "Templates"]);
        cmd
    })?;
    assert!(output.status.success(), "{stderr}");

    let generated = test.read_file("Dip.generated.swift")?;
    assert!(generated.starts_with("// Custom header\nimport Dip\n"));
    assert!(generated.contains("container.register(.shared) { ApiClient.init() }"));

    Ok(())
}
