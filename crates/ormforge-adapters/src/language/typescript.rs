//! TypeScript backend.
//!
//! Prints the declaration model as a single `model.ts`, repositories as
//! `repository<Type>.ts`, and provisions a Node project skeleton.

use std::path::PathBuf;

use ormforge_core::{
    application::ports::{BaselineFile, LanguageBackend, TypeMapper},
    domain::{
        Cardinality, EnumDeclaration, EnumLiteral, FieldType, ModelDeclaration, PackageRequirement,
        Paths, ProjectionType, PropertyType, RepositoryDeclaration, TypeDeclaration,
    },
};
use serde_json::json;

/// Package providing `Queryable`, `Repository` and the ORM runtime.
pub const DEFAULT_RUNTIME_PACKAGE: &str = "lambdaorm";

const COMPILER_PACKAGE: &str = "typescript";
const SYNTAX_FILE_NAME: &str = "sintaxis.d.ts";
const SYNTAX_DECLARATIONS: &str = include_str!("templates/sintaxis.d.ts");

#[derive(Debug, Clone)]
pub struct TypeScriptBackend {
    runtime_package: String,
}

impl Default for TypeScriptBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScriptBackend {
    pub fn new() -> Self {
        Self::with_runtime_package(DEFAULT_RUNTIME_PACKAGE)
    }

    /// Import the runtime from a different package.
    pub fn with_runtime_package(package: impl Into<String>) -> Self {
        Self {
            runtime_package: package.into(),
        }
    }

    pub fn runtime_package(&self) -> &str {
        &self.runtime_package
    }

    fn push_enum(lines: &mut Vec<String>, declaration: &EnumDeclaration) {
        lines.push(format!("export enum {}{{", declaration.name));
        let last = declaration.members.len().saturating_sub(1);
        for (i, (name, value)) in declaration.members.iter().enumerate() {
            let separator = if i < last { "," } else { "" };
            lines.push(format!("\t{name} = {}{separator}", literal(value)));
        }
        lines.push("}".to_string());
    }

    fn push_class(lines: &mut Vec<String>, declaration: &TypeDeclaration) {
        let modifier = if declaration.is_abstract {
            " abstract "
        } else {
            " "
        };
        let extends = declaration
            .parent
            .as_ref()
            .map(|parent| format!(" extends {parent} "))
            .unwrap_or_else(|| " ".to_string());
        lines.push(format!(
            "export{modifier}class {}{extends}{{",
            declaration.name
        ));

        let collections: Vec<_> = declaration.collections().collect();
        if !collections.is_empty() {
            lines.push("\tconstructor () {".to_string());
            if declaration.parent.is_some() {
                lines.push("\t\tsuper()".to_string());
            }
            for field in collections {
                lines.push(format!("\t\tthis.{} = []", field.name));
            }
            lines.push("\t}".to_string());
            lines.push(String::new());
        }

        for field in &declaration.fields {
            let marker = if field.optional { "?" } else { "" };
            let line = match &field.field_type {
                FieldType::Scalar(name) | FieldType::Reference(name) => {
                    format!("\t{}{marker}: {name}", field.name)
                }
                FieldType::Collection(name) => format!("\t{}{marker}: {name}[]", field.name),
            };
            lines.push(line);
        }
        lines.push("}".to_string());
    }

    fn push_projection(lines: &mut Vec<String>, declaration: &TypeDeclaration) {
        let projection = &declaration.projection;
        let extends = projection
            .parent
            .as_ref()
            .map(|parent| format!(" extends Qry{parent} "))
            .unwrap_or_else(|| " ".to_string());
        lines.push(format!("export interface Qry{}{extends}{{", projection.of));

        for field in &projection.fields {
            let rendered = match &field.field_type {
                ProjectionType::Scalar(name) => name.clone(),
                ProjectionType::Relation {
                    cardinality: Cardinality::OneToMany,
                    target,
                } => format!("Qry{target} & OneToMany<Qry{target}> & {target}"),
                ProjectionType::Relation {
                    cardinality: Cardinality::OneToOne,
                    target,
                } => format!("Qry{target} & OneToOne<Qry{target}> & {target}"),
                ProjectionType::Relation {
                    cardinality: Cardinality::ManyToOne,
                    target,
                } => format!("ManyToOne<Qry{target}> & {target}[]"),
            };
            lines.push(format!("\t{}: {rendered}", field.name));
        }
        lines.push("}".to_string());
    }
}

impl TypeMapper for TypeScriptBackend {
    fn map_type(&self, property_type: &PropertyType) -> String {
        match property_type {
            PropertyType::Integer | PropertyType::Decimal => "number".to_string(),
            PropertyType::DateTime | PropertyType::Date | PropertyType::Time => "Date".to_string(),
            PropertyType::Text => "string".to_string(),
            PropertyType::Boolean => "boolean".to_string(),
            PropertyType::Other(name) => name.clone(),
        }
    }
}

impl LanguageBackend for TypeScriptBackend {
    fn name(&self) -> &str {
        "typescript"
    }

    fn extension(&self) -> &str {
        "ts"
    }

    fn render_model(&self, model: &ModelDeclaration) -> String {
        let mut lines = vec![
            "/* eslint-disable no-use-before-define */".to_string(),
            "// THIS FILE IS NOT EDITABLE, IS MANAGED BY ORMFORGE".to_string(),
            format!("import {{ Queryable }} from '{}'", self.runtime_package),
        ];

        for declaration in &model.enums {
            Self::push_enum(&mut lines, declaration);
        }
        for declaration in &model.types {
            Self::push_class(&mut lines, declaration);
            Self::push_projection(&mut lines, declaration);
        }
        for root in &model.roots {
            lines.push(format!(
                "export let {}: Queryable<Qry{}>",
                root.name, root.projection_of
            ));
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }

    fn render_repository(&self, repository: &RepositoryDeclaration) -> String {
        let type_name = &repository.type_name;
        [
            format!("import {{ Repository, IOrm }} from '{}'", self.runtime_package),
            format!("import {{ {type_name}, Qry{type_name} }} from './model'"),
            format!("export class {type_name}Repository extends Repository<{type_name}, Qry{type_name}> {{"),
            "\tconstructor (stage?: string, orm?:IOrm) {".to_string(),
            format!("\t\tsuper('{}', stage, orm)", repository.entity_name),
            "\t}".to_string(),
            "\t// Add your code here".to_string(),
            "}".to_string(),
            String::new(),
        ]
        .join("\n")
    }

    fn baseline_files(&self, paths: &Paths) -> Vec<BaselineFile> {
        let package = json!({ "dependencies": {} });
        let tsconfig = json!({
            "compilerOptions": {
                "experimentalDecorators": true,
                "emitDecoratorMetadata": true,
                "resolveJsonModule": true,
                "esModuleInterop": true,
                "strict": true,
                "declaration": true,
                "moduleResolution": "node",
                "sourceMap": true,
                "target": "ES6",
                "module": "commonjs",
                "outDir": "./build",
                "baseUrl": format!("./{}", paths.src()),
                "typeRoots": ["node_modules/@types"]
            },
            "include": [format!("{}/**/*", paths.src())],
            "exclude": ["node_modules"]
        });

        vec![
            BaselineFile {
                path: PathBuf::from(paths.src()).join(SYNTAX_FILE_NAME),
                content: SYNTAX_DECLARATIONS.to_string(),
            },
            BaselineFile {
                path: PathBuf::from("package.json"),
                content: format!("{package:#}"),
            },
            BaselineFile {
                path: PathBuf::from("tsconfig.json"),
                content: format!("{tsconfig:#}"),
            },
        ]
    }

    fn toolchain_packages(&self) -> Vec<PackageRequirement> {
        vec![
            PackageRequirement::development(COMPILER_PACKAGE),
            PackageRequirement::runtime(self.runtime_package.clone()),
        ]
    }
}

fn literal(value: &EnumLiteral) -> String {
    match value {
        EnumLiteral::Number(number) => number.to_string(),
        EnumLiteral::Text(text) => format!("'{}'", escape_text(text)),
    }
}

/// Single-quoted string body that reads back as `text`.
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}
