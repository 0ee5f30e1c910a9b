use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Isolated project directory for one CLI run.
struct RuleCraftTestEnv {
    tmp: TempDir,
}

impl RuleCraftTestEnv {
    fn new() -> Result<Self> {
        Ok(Self {
            tmp: tempfile::tempdir()?,
        })
    }

    fn with_config(yaml: &str) -> Result<Self> {
        let env = Self::new()?;
        std::fs::write(env.root().join("rulecraft.yaml"), yaml)?;
        Ok(env)
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn rulecraft(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rulecraft"));
        cmd.current_dir(self.root())
            .env_remove("RUST_LOG")
            .env_remove("RULECRAFT_PASS_RATIO")
            .env_remove("RULECRAFT_TEXT_EDIT_CLEARS_SQL")
            .env_remove("RULECRAFT_PROJECT_DIR");
        cmd
    }
}

#[test]
fn test_tables_lists_builtin_fixture() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("meter_data"))
        .stdout(predicate::str::contains("Meter reading data"));
    Ok(())
}

#[test]
fn test_inspect_shows_profile_and_rows() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["inspect", "--table", "meter_data", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("customer_type"))
        .stdout(predicate::str::contains("MTR_0003"))
        .stdout(predicate::str::contains("MTR_0004").not());
    Ok(())
}

#[test]
fn test_inspect_unknown_table_fails() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["inspect", "--table", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("💥"))
        .stderr(predicate::str::contains("ghost"));
    Ok(())
}

#[test]
fn test_rules_filtered_by_category() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["rules", "--table", "all", "--category", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rule(s)"))
        .stdout(predicate::str::contains("Consumption should be between 0 and 1000"))
        .stdout(predicate::str::contains("Customer type should be valid"))
        .stdout(predicate::str::contains("Pincode should not be null").not());
    Ok(())
}

#[test]
fn test_rules_rejects_unknown_category() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["rules", "--category", "critical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("critical"));
    Ok(())
}

#[test]
fn test_rules_export_writes_yaml() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["rules", "--column", "pincode", "--export", "out.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 rule(s)"));

    let exported = std::fs::read_to_string(env.root().join("out.yaml"))?;
    assert!(exported.contains("Pincode should not be null"));
    assert!(!exported.contains("consumption"));
    Ok(())
}

#[test]
fn test_rules_import_adds_exported_rules() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["rules", "--column", "pincode", "--export", "pincode.yaml"])
        .assert()
        .success();

    env.rulecraft()
        .args(["rules", "--column", "pincode", "--import", "pincode.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 rule(s)"))
        .stdout(predicate::str::contains("Rules Imported"))
        .stdout(predicate::str::contains("2 rule(s)"));
    Ok(())
}

#[test]
fn test_rules_import_missing_file_fails() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args(["rules", "--import", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("💥"));
    Ok(())
}

#[test]
fn test_author_end_to_end() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args([
            "author",
            "--table",
            "meter_data",
            "--column",
            "consumption",
            "--rule",
            "Consumption should be between 0 and 1000",
            "--category",
            "warning",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SELECT * FROM meter_data WHERE consumption BETWEEN 0 AND 1000",
        ))
        .stdout(predicate::str::contains("47/50 rows pass (94.0%)"))
        .stdout(predicate::str::contains("Rule Submitted"));
    Ok(())
}

#[test]
fn test_author_invalid_column_fails() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args([
            "author", "-t", "meter_data", "-c", "nonexistent", "-r", "anything",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid Column"))
        .stderr(predicate::str::contains("💥").not());
    Ok(())
}

#[test]
fn test_author_unrecognised_rule_reports_conversion_failure() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    env.rulecraft()
        .args([
            "author",
            "-t",
            "meter_data",
            "-c",
            "status",
            "-r",
            "make the data nice",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conversion Failed"))
        .stderr(predicate::str::contains("💥").not());
    Ok(())
}

#[test]
fn test_config_pass_ratio_is_used() -> Result<()> {
    let env = RuleCraftTestEnv::with_config("name: demo\nvalidation:\n  pass-ratio: 0.5\n")?;
    env.rulecraft()
        .args([
            "author", "-t", "meter_data", "-c", "pincode", "-r", "pincode should not be null",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("25/50 rows pass (50.0%)"));
    Ok(())
}

#[test]
fn test_env_overrides_config() -> Result<()> {
    let env = RuleCraftTestEnv::with_config("name: demo\nvalidation:\n  pass-ratio: 0.5\n")?;
    env.rulecraft()
        .env("RULECRAFT_PASS_RATIO", "0.2")
        .args([
            "author", "-t", "meter_data", "-c", "pincode", "-r", "pincode should not be null",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("10/50 rows pass (20.0%)"));
    Ok(())
}

#[test]
fn test_invalid_config_exits_with_code_2() -> Result<()> {
    let env = RuleCraftTestEnv::with_config("name: demo\nvalidation:\n  pass-ratio: 4\n")?;
    env.rulecraft().arg("tables").assert().code(2);
    Ok(())
}

#[test]
fn test_shell_session() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    let script = "\
table meter_data
column consumption
submit
rule Consumption should be positive
convert
validate
rule Consumption should be positive.
submit
convert
validate
submit
rules column=consumption
ask what else should I check?
apply 1
state
quit
";
    assert_cmd::Command::from_std(env.rulecraft())
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Column Selected"))
        .stdout(predicate::str::contains("consumption > 0"))
        .stdout(predicate::str::contains("Rule Submitted"))
        .stdout(predicate::str::contains("2 rule(s)"))
        .stdout(predicate::str::contains("Here are some suggestions for the consumption column:"))
        .stdout(predicate::str::contains("rule:     consumption should not be null"))
        .stderr(predicate::str::contains("Incomplete Information"));
    Ok(())
}

#[test]
fn test_shell_edit_and_delete() -> Result<()> {
    let env = RuleCraftTestEnv::new()?;
    let script = "\
edit 2
state
delete 3
delete 3
rules
options
bogus
quit
";
    assert_cmd::Command::from_std(env.rulecraft())
        .arg("shell")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Editing rule #2"))
        .stdout(predicate::str::contains("SqlGenerated"))
        .stdout(predicate::str::contains("Rule Deleted"))
        .stdout(predicate::str::contains("2 rule(s)"))
        .stderr(predicate::str::contains("Delete Failed"))
        .stderr(predicate::str::contains("Unknown command 'bogus'"));
    Ok(())
}
