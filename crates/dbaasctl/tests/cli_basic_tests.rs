use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command
fn dbaasctl() -> Command {
    let mut cmd = Command::cargo_bin("dbaasctl").unwrap();
    // Keep the host environment out of the tests
    cmd.env_remove("DBAAS_API_KEY")
        .env_remove("DBAAS_API_SECRET")
        .env_remove("DBAAS_API_URL")
        .env_remove("DBAAS_SERVICE")
        .env_remove("DBAASCTL_PROFILE");
    cmd
}

#[test]
fn test_help_flag() {
    dbaasctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage cloud database service"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    dbaasctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbaasctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    dbaasctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    dbaasctl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_profile_help() {
    dbaasctl()
        .arg("profile")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage configuration profiles"));
}

#[test]
fn test_database_help() {
    dbaasctl()
        .arg("database")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage database service clusters"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_database_alias() {
    dbaasctl()
        .arg("db")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage database service clusters"));
}

#[test]
fn test_user_help() {
    dbaasctl()
        .arg("user")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage service users"));
}

#[test]
fn test_completions_help() {
    dbaasctl()
        .arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completions"))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"));
}

#[test]
fn test_completions_bash_output() {
    dbaasctl()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("dbaasctl"));
}

#[test]
fn test_version_command() {
    dbaasctl()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_json() {
    dbaasctl()
        .arg("-o")
        .arg("json")
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"dbaasctl\""));
}

#[test]
fn test_invalid_output_format() {
    dbaasctl()
        .arg("profile")
        .arg("list")
        .arg("-o")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_verbose_flags_accepted() {
    dbaasctl().arg("-vvv").arg("version").assert().success();
}

#[test]
fn test_profile_list_with_empty_config() {
    let dir = tempfile::TempDir::new().unwrap();
    dbaasctl()
        .arg("--config-file")
        .arg(dir.path().join("config.toml"))
        .arg("profile")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles configured"));
}

#[test]
fn test_profile_set_and_show_roundtrip() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    dbaasctl()
        .arg("--config-file")
        .arg(&config)
        .arg("profile")
        .arg("set")
        .arg("prod")
        .arg("--api-key")
        .arg("key")
        .arg("--api-secret")
        .arg("secret")
        .arg("--service")
        .arg("my-project")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' saved"));

    dbaasctl()
        .arg("--config-file")
        .arg(&config)
        .arg("-o")
        .arg("json")
        .arg("profile")
        .arg("show")
        .arg("prod")
        .assert()
        .success()
        .stdout(predicate::str::contains("my-project"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_profile_remove_unknown_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    dbaasctl()
        .arg("--config-file")
        .arg(dir.path().join("config.toml"))
        .arg("profile")
        .arg("remove")
        .arg("ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_profile_set_missing_required_args() {
    dbaasctl()
        .arg("profile")
        .arg("set")
        .arg("test-profile")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_database_list_requires_engine() {
    dbaasctl()
        .arg("database")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--engine"));
}

#[test]
fn test_database_create_requires_plan_and_version() {
    dbaasctl()
        .arg("database")
        .arg("create")
        .arg("--engine")
        .arg("redis")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_database_create_flavor_requires_region() {
    dbaasctl()
        .arg("database")
        .arg("create")
        .arg("--engine")
        .arg("redis")
        .arg("--plan")
        .arg("essential")
        .arg("--version")
        .arg("7.2")
        .arg("--flavor")
        .arg("db1-4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--region"));
}

#[test]
fn test_wait_flags_documented() {
    dbaasctl()
        .arg("database")
        .arg("create")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--wait"))
        .stdout(predicate::str::contains("--wait-timeout"))
        .stdout(predicate::str::contains("--wait-interval"));
}

#[test]
fn test_wait_timeout_requires_wait() {
    dbaasctl()
        .arg("database")
        .arg("delete")
        .arg("--engine")
        .arg("redis")
        .arg("c1")
        .arg("--wait-timeout")
        .arg("60")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--wait"));
}

#[test]
fn test_user_create_requires_cluster() {
    dbaasctl()
        .arg("user")
        .arg("create")
        .arg("--engine")
        .arg("redis")
        .arg("app")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cluster"));
}

#[test]
fn test_user_create_documents_acl_flags() {
    dbaasctl()
        .arg("user")
        .arg("create")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--categories"))
        .stdout(predicate::str::contains("--commands"))
        .stdout(predicate::str::contains("--keys"))
        .stdout(predicate::str::contains("--channels"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_without_wait_prints_status_hint() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cloud/project/proj/database/redis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "c1",
            "status": "PENDING",
            "plan": "essential",
            "version": "7.2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        format!(
            "default_profile = \"test\"\n\n[profiles.test]\napi_url = \"{}\"\napi_key = \"k\"\napi_secret = \"s\"\n",
            server.uri()
        ),
    )
    .unwrap();

    dbaasctl()
        .arg("--config-file")
        .arg(&config)
        .arg("database")
        .arg("create")
        .arg("--service")
        .arg("proj")
        .arg("--engine")
        .arg("redis")
        .arg("--plan")
        .arg("essential")
        .arg("--version")
        .arg("7.2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster c1 is PENDING"))
        .stdout(predicate::str::contains(
            "Check its status: dbaasctl database get --engine redis c1",
        ));
}

#[test]
fn test_missing_service_reports_guidance() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.toml");

    dbaasctl()
        .arg("--config-file")
        .arg(&config)
        .arg("profile")
        .arg("set")
        .arg("prod")
        .arg("--api-key")
        .arg("key")
        .arg("--api-secret")
        .arg("secret")
        .assert()
        .success();

    dbaasctl()
        .arg("--config-file")
        .arg(&config)
        .arg("database")
        .arg("list")
        .arg("--engine")
        .arg("redis")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--service"));
}

#[test]
fn test_no_profile_reports_guidance() {
    let dir = tempfile::TempDir::new().unwrap();
    dbaasctl()
        .arg("--config-file")
        .arg(dir.path().join("config.toml"))
        .arg("database")
        .arg("list")
        .arg("--engine")
        .arg("redis")
        .arg("--service")
        .arg("proj")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dbaasctl profile set"));
}
