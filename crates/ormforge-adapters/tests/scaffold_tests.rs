//! End-to-end workflows over the in-memory filesystem and a scripted npm.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ormforge_adapters::{MemoryFilesystem, NpmPackageManager, TypeScriptBackend, YamlSchemaStore};
use ormforge_core::{
    application::{
        ApplicationError, BuildTargets, Filesystem, ProcessOutput, ProcessRunner, ScaffoldService,
    },
    domain::{CompletionDefaults, DomainError, Overrides},
    error::{ForgeError, ForgeResult},
};

const WORKSPACE: &str = "/projects/shop";

/// Answers `npm list` from its package table and records every install.
#[derive(Default)]
struct FakeNpm {
    packages: Mutex<BTreeMap<String, String>>,
    installs: Mutex<Vec<String>>,
}

impl FakeNpm {
    fn with_package(self, name: &str, version: &str) -> Self {
        self.packages
            .lock()
            .unwrap()
            .insert(name.to_string(), version.to_string());
        self
    }

    fn installs(&self) -> Vec<String> {
        self.installs.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeNpm {
    fn run(&self, _program: &str, args: &[&str], _cwd: &Path) -> ForgeResult<ProcessOutput> {
        let mut packages = self.packages.lock().unwrap();
        let stdout = match args.first() {
            Some(&"install") => {
                let name = args[1].to_string();
                self.installs.lock().unwrap().push(args.join(" "));
                packages.insert(name, "1.0.0".to_string());
                String::new()
            }
            _ => {
                let mut listing = String::from("shop@1.0.0 /projects/shop\n");
                for (name, version) in packages.iter() {
                    listing.push_str(&format!("├── {name}@{version}\n"));
                }
                listing
            }
        };
        Ok(ProcessOutput {
            success: true,
            code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}

struct Harness {
    fs: MemoryFilesystem,
    npm: Arc<FakeNpm>,
    service: ScaffoldService,
}

impl Harness {
    fn new(npm: FakeNpm) -> Self {
        let fs = MemoryFilesystem::new();
        let npm = Arc::new(npm);
        let filesystem: Arc<dyn Filesystem> = Arc::new(fs.clone());
        let service = ScaffoldService::new(
            Arc::new(YamlSchemaStore::new(Arc::clone(&filesystem))),
            filesystem,
            Arc::new(NpmPackageManager::new(npm.clone())),
            Arc::new(TypeScriptBackend::new()),
            CompletionDefaults::default(),
        );
        Self { fs, npm, service }
    }

    fn with_document(self, document: &str) -> Self {
        self.fs.create_dir_all(Path::new(WORKSPACE)).unwrap();
        self.fs
            .write_file(&Path::new(WORKSPACE).join("ormforge.yaml"), document)
            .unwrap();
        self
    }

    fn file(&self, relative: &str) -> String {
        self.fs
            .contents(Path::new(WORKSPACE).join(relative))
            .unwrap_or_else(|| panic!("{relative} was not written"))
    }
}

const CATALOG: &str = r#"
entities:
  - name: Categories
    properties:
      - name: id
        type: integer
      - name: name
        type: string
    relations:
      - name: products
        type: manyToOne
        entity: Products
  - name: Products
    properties:
      - name: id
        type: integer
      - name: categoryId
        type: integer
    relations:
      - name: category
        type: oneToMany
        entity: Categories
"#;

#[test]
fn init_without_document_creates_a_complete_workspace() {
    let harness = Harness::new(FakeNpm::default());

    let report = harness
        .service
        .create(Path::new(WORKSPACE), &Overrides::default())
        .unwrap();

    let config = harness.file("ormforge.yaml");
    assert!(config.contains("name: shop"));
    assert!(config.contains("dialect: SQLjs"));
    assert!(config.contains("connection: data/shop.db"));
    assert!(harness.fs.exists(&Path::new(WORKSPACE).join("data")));
    harness.file("src/sintaxis.d.ts");
    harness.file("package.json");
    harness.file("tsconfig.json");
    harness.file("src/model/model.ts");

    assert_eq!(
        harness.npm.installs(),
        vec!["install typescript -D", "install lambdaorm", "install sql.js"]
    );
    assert_eq!(report.installed().count(), 3);
}

#[test]
fn single_entity_gets_one_root() {
    let harness = Harness::new(FakeNpm::default()).with_document(
        "entities:\n  - name: Products\n    properties:\n      - name: id\n        type: integer\n      - name: name\n        type: string\n",
    );

    harness
        .service
        .create(Path::new(WORKSPACE), &Overrides::default())
        .unwrap();

    let model = harness.file("src/model/model.ts");
    assert_eq!(model.matches("export class ").count(), 1);
    assert_eq!(model.matches("export interface ").count(), 1);
    assert_eq!(model.matches("Queryable<").count(), 1);
    assert!(model.contains("export let Products: Queryable<QryProduct>"));
    harness.file("src/model/repositoryProduct.ts");
}

#[test]
fn collection_side_is_initialized_and_reference_side_is_optional() {
    let harness = Harness::new(FakeNpm::default()).with_document(CATALOG);

    harness
        .service
        .create(Path::new(WORKSPACE), &Overrides::default())
        .unwrap();

    let model = harness.file("src/model/model.ts");
    assert!(model.contains("\t\tthis.products = []"));
    assert!(model.contains("\tproducts: Product[]"));
    assert!(model.contains("\tcategory?: Category"));
}

#[test]
fn driver_is_installed_once_then_left_alone() {
    let harness = Harness::new(
        FakeNpm::default()
            .with_package("typescript", "5.3.3")
            .with_package("lambdaorm", "1.4.2"),
    );

    harness
        .service
        .create(
            Path::new(WORKSPACE),
            &Overrides::default()
                .dialect("postgresql")
                .connection("$CNN_POSTGRES"),
        )
        .unwrap();
    assert_eq!(harness.npm.installs(), vec!["install pg"]);

    harness.service.update(Path::new(WORKSPACE), false).unwrap();
    assert_eq!(harness.npm.installs(), vec!["install pg"]);
}

#[test]
fn unsupported_dialect_touches_nothing() {
    let harness = Harness::new(FakeNpm::default());

    let err = harness
        .service
        .create(Path::new(WORKSPACE), &Overrides::default().dialect("foo"))
        .unwrap_err();

    assert_eq!(
        err,
        ForgeError::Domain(DomainError::UnsupportedDialect {
            dialect: "foo".into()
        })
    );
    assert!(harness.fs.is_empty());
    assert!(harness.npm.installs().is_empty());
}

#[test]
fn server_dialect_without_connection_fails_before_installing_drivers() {
    let harness = Harness::new(FakeNpm::default());

    let err = harness
        .service
        .create(Path::new(WORKSPACE), &Overrides::default().dialect("mysql"))
        .unwrap_err();

    assert!(matches!(
        err,
        ForgeError::Domain(DomainError::MissingConnection { .. })
    ));
    assert!(!harness.npm.installs().contains(&"install mysql2".to_string()));
    harness.file("ormforge.yaml");
}

#[test]
fn dangling_relation_writes_no_model() {
    let harness = Harness::new(FakeNpm::default()).with_document(
        "entities:\n  - name: Orders\n    relations:\n      - name: customer\n        type: oneToOne\n        entity: Customers\n",
    );

    let err = harness
        .service
        .create(Path::new(WORKSPACE), &Overrides::default())
        .unwrap_err();

    assert!(matches!(err, ForgeError::Domain(_)));
    assert!(!harness.fs.exists(&Path::new(WORKSPACE).join("src/model/model.ts")));
    assert_eq!(harness.fs.write_count(), 1);
}

#[test]
fn user_owned_files_survive_regeneration() {
    let harness = Harness::new(FakeNpm::default()).with_document(CATALOG);
    let workspace = Path::new(WORKSPACE);
    harness
        .fs
        .write_file(&workspace.join("package.json"), "{\"name\":\"shop\"}")
        .unwrap();

    harness
        .service
        .create(workspace, &Overrides::default())
        .unwrap();

    let repository = workspace.join("src/model/repositoryProduct.ts");
    harness
        .fs
        .write_file(&repository, "// hand written\n")
        .unwrap();

    let report = harness.service.update(workspace, false).unwrap();

    assert_eq!(harness.file("package.json"), "{\"name\":\"shop\"}");
    assert_eq!(harness.file("src/model/repositoryProduct.ts"), "// hand written\n");
    assert!(report.files.created.is_empty());
    assert!(report.files.kept.contains(&repository));
}

#[test]
fn build_can_target_the_model_alone() {
    let harness = Harness::new(FakeNpm::default()).with_document(CATALOG);
    let workspace = Path::new(WORKSPACE);

    let report = harness
        .service
        .build(
            workspace,
            BuildTargets {
                model: true,
                repositories: false,
            },
        )
        .unwrap();

    assert_eq!(report.model, Some(workspace.join("src/model/model.ts")));
    assert!(!harness.fs.exists(&workspace.join("src/model/repositoryProduct.ts")));
    assert!(harness.npm.installs().is_empty());
}

#[test]
fn update_without_document_is_a_configuration_error() {
    let harness = Harness::new(FakeNpm::default());

    let err = harness
        .service
        .update(Path::new(WORKSPACE), true)
        .unwrap_err();

    assert!(matches!(err, ForgeError::Configuration { .. }));
}

#[test]
fn install_failure_surfaces_as_install_error() {
    struct Offline;
    impl ProcessRunner for Offline {
        fn run(&self, _: &str, args: &[&str], _: &Path) -> ForgeResult<ProcessOutput> {
            Ok(ProcessOutput {
                success: args.first() == Some(&"list"),
                code: Some(if args.first() == Some(&"list") { 0 } else { 1 }),
                stdout: String::new(),
                stderr: "npm ERR! network request failed".into(),
            })
        }
    }

    let fs = MemoryFilesystem::new();
    let filesystem: Arc<dyn Filesystem> = Arc::new(fs.clone());
    let service = ScaffoldService::new(
        Arc::new(YamlSchemaStore::new(Arc::clone(&filesystem))),
        filesystem,
        Arc::new(NpmPackageManager::new(Arc::new(Offline))),
        Arc::new(TypeScriptBackend::new()),
        CompletionDefaults::default(),
    );

    let err = service
        .create(Path::new(WORKSPACE), &Overrides::default())
        .unwrap_err();

    assert_eq!(
        err,
        ForgeError::Application(ApplicationError::InstallError {
            package: "typescript".into(),
            reason: "npm ERR! network request failed".into(),
        })
    );
    assert!(err.is_retryable());
}
