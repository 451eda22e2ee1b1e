//! Integration tests for the ormforge binary.
//!
//! None of these reach the package manager: `build` only generates code.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SHOP: &str = "\
entities:
  - name: Categories
    properties:
      - name: id
        type: integer
    relations:
      - name: products
        type: manyToOne
        entity: Products
  - name: Products
    properties:
      - name: id
        type: integer
      - name: name
        type: string
    relations:
      - name: category
        type: oneToMany
        entity: Categories
sources:
  - name: shop
    dialect: SQLjs
    connection: data/shop.db
stages:
  - name: default
";

/// A command isolated from the developer's own configuration.
fn ormforge(temp: &TempDir) -> Command {
    let config = temp.path().join("config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("ormforge").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

fn workspace_with(temp: &TempDir, document: &str) -> std::path::PathBuf {
    let workspace = temp.path().join("shop");
    fs::create_dir_all(&workspace).unwrap();
    fs::write(workspace.join("ormforge.yaml"), document).unwrap();
    workspace
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("ormforge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("build"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("ormforge")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_build_generates_model_and_repositories() {
    let temp = TempDir::new().unwrap();
    let workspace = workspace_with(&temp, SHOP);

    ormforge(&temp)
        .args(["build", "-w", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model.ts"));

    let model = read(workspace.join("src/model/model.ts"));
    assert!(model.contains("export class Category {"));
    assert!(model.contains("\t\tthis.products = []"));
    assert!(model.contains("\tcategory?: Category"));
    assert!(model.contains("export let Products: Queryable<QryProduct>"));

    let repository = read(workspace.join("src/model/repositoryProduct.ts"));
    assert!(repository.contains("export class ProductRepository extends Repository<Product, QryProduct>"));
    assert!(repository.contains("super('Products', stage, orm)"));
}

#[test]
fn test_build_keeps_edited_repositories_and_document() {
    let temp = TempDir::new().unwrap();
    let workspace = workspace_with(&temp, SHOP);

    ormforge(&temp).args(["build", "-w", "shop"]).assert().success();
    let repository = workspace.join("src/model/repositoryCategory.ts");
    fs::write(&repository, "// mine\n").unwrap();

    ormforge(&temp).args(["build", "-w", "shop"]).assert().success();

    assert_eq!(read(&repository), "// mine\n");
    assert_eq!(read(workspace.join("ormforge.yaml")), SHOP);
}

#[test]
fn test_build_model_only() {
    let temp = TempDir::new().unwrap();
    let workspace = workspace_with(&temp, SHOP);

    ormforge(&temp)
        .args(["build", "-w", "shop", "--model"])
        .assert()
        .success();

    assert!(workspace.join("src/model/model.ts").exists());
    assert!(!workspace.join("src/model/repositoryProduct.ts").exists());
}

#[test]
fn test_runtime_package_comes_from_config() {
    let temp = TempDir::new().unwrap();
    let workspace = workspace_with(&temp, SHOP);
    fs::write(
        temp.path().join("config.toml"),
        "[defaults]\nruntime_package = \"@acme/orm\"\n",
    )
    .unwrap();

    ormforge(&temp).args(["build", "-w", "shop"]).assert().success();

    let model = read(workspace.join("src/model/model.ts"));
    assert!(model.contains("import { Queryable } from '@acme/orm'"));
}

#[test]
fn test_quiet_flag() {
    let temp = TempDir::new().unwrap();
    workspace_with(&temp, SHOP);

    ormforge(&temp)
        .args(["-q", "build", "-w", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_verbose_flag() {
    let temp = TempDir::new().unwrap();
    workspace_with(&temp, SHOP);

    ormforge(&temp)
        .args(["-v", "build", "-w", "shop"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

#[test]
fn test_config_get_and_env_override() {
    let temp = TempDir::new().unwrap();

    ormforge(&temp)
        .args(["config", "get", "defaults.dialect"])
        .assert()
        .success()
        .stdout(predicate::str::diff("sqljs\n"));

    ormforge(&temp)
        .env("ORMFORGE__DEFAULTS__DIALECT", "postgresql")
        .args(["config", "get", "defaults.dialect"])
        .assert()
        .success()
        .stdout(predicate::str::diff("postgresql\n"));
}

#[test]
fn test_config_list_and_path() {
    let temp = TempDir::new().unwrap();

    ormforge(&temp)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("runtime_package = \"lambdaorm\""));

    ormforge(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_shell_completions() {
    Command::cargo_bin("ormforge")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}
