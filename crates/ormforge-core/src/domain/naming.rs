//! Name resolution over a schema.
//!
//! Entities reference each other by name only. [`SchemaIndex::build`] runs a
//! single resolution pass before anything is rendered: it checks uniqueness,
//! every relation target, every `extends` parent, every enum reference, and
//! walks each parent chain for cycles. Generators then use the index for
//! lookups and never see a dangling name.

use std::collections::{HashMap, HashSet};

use crate::domain::{
    entities::schema::{Entity, Relation, Schema},
    error::DomainError,
};

/// Singular display name of an entity: the configured one, else derived.
pub fn singular_of(entity: &Entity) -> String {
    entity
        .singular
        .clone()
        .unwrap_or_else(|| singularize(&entity.name))
}

/// Deterministic plural-to-singular rule.
///
/// `Categories → Category`, `Addresses → Address`, `Boxes → Box`,
/// `Products → Product`. Words ending in `ss` and words not ending in `s`
/// are returned unchanged.
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if name.ends_with(suffix) {
            return name[..name.len() - 2].to_string();
        }
    }
    if name.ends_with("ss") {
        return name.to_string();
    }
    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name.to_string(),
    }
}

/// Resolve the target entity of a relation declared on `entity`.
pub fn resolve_relation_target<'a>(
    schema: &'a Schema,
    entity: &Entity,
    relation: &Relation,
) -> Result<&'a Entity, DomainError> {
    schema
        .entity(&relation.target)
        .ok_or_else(|| DomainError::DanglingRelation {
            entity: entity.name.clone(),
            relation: relation.name.clone(),
            target: relation.target.clone(),
        })
}

/// Validated name index over a schema.
#[derive(Debug)]
pub struct SchemaIndex<'a> {
    schema: &'a Schema,
    entities: HashMap<&'a str, &'a Entity>,
}

impl<'a> SchemaIndex<'a> {
    /// Run the resolution pass.
    ///
    /// Fails on the first problem found, in author order.
    pub fn build(schema: &'a Schema) -> Result<Self, DomainError> {
        let mut entities = HashMap::with_capacity(schema.entities.len());
        for entity in &schema.entities {
            if entity.name.trim().is_empty() {
                return Err(DomainError::InvalidSchema(
                    "entity with empty name".into(),
                ));
            }
            if entities.insert(entity.name.as_str(), entity).is_some() {
                return Err(DomainError::DuplicateName {
                    kind: "entity",
                    name: entity.name.clone(),
                });
            }
        }

        // Generated type and repository names come from the singular.
        let mut singulars = HashSet::with_capacity(schema.entities.len());
        for entity in &schema.entities {
            let singular = singular_of(entity);
            if !singulars.insert(singular.clone()) {
                return Err(DomainError::DuplicateName {
                    kind: "singular",
                    name: singular,
                });
            }
        }

        let mut enums = HashSet::with_capacity(schema.enums.len());
        for enum_def in &schema.enums {
            if !enums.insert(enum_def.name.as_str()) {
                return Err(DomainError::DuplicateName {
                    kind: "enum",
                    name: enum_def.name.clone(),
                });
            }
        }

        for entity in &schema.entities {
            if let Some(parent) = &entity.extends {
                if !entities.contains_key(parent.as_str()) {
                    return Err(DomainError::DanglingExtends {
                        entity: entity.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
            for property in &entity.properties {
                if let Some(enum_name) = &property.enum_name {
                    if !enums.contains(enum_name.as_str()) {
                        return Err(DomainError::DanglingEnum {
                            entity: entity.name.clone(),
                            property: property.name.clone(),
                            enum_name: enum_name.clone(),
                        });
                    }
                }
            }
            for relation in &entity.relations {
                resolve_relation_target(schema, entity, relation)?;
            }
        }

        let index = Self { schema, entities };
        for entity in &schema.entities {
            index.parent_chain(entity)?;
        }
        Ok(index)
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn entity(&self, name: &str) -> Option<&'a Entity> {
        self.entities.get(name).copied()
    }

    /// Target entity of a relation. Infallible for relations of the indexed
    /// schema; the error path covers foreign relations.
    pub fn target_of(&self, entity: &Entity, relation: &Relation) -> Result<&'a Entity, DomainError> {
        resolve_relation_target(self.schema, entity, relation)
    }

    /// Direct parent of an entity.
    pub fn parent_of(&self, entity: &Entity) -> Result<Option<&'a Entity>, DomainError> {
        match &entity.extends {
            None => Ok(None),
            Some(parent) => self
                .entity(parent)
                .map(Some)
                .ok_or_else(|| DomainError::DanglingExtends {
                    entity: entity.name.clone(),
                    parent: parent.clone(),
                }),
        }
    }

    /// Ancestors of an entity, nearest first.
    ///
    /// Fails with [`DomainError::CyclicExtends`] when the chain loops back.
    pub fn parent_chain(&self, entity: &Entity) -> Result<Vec<&'a Entity>, DomainError> {
        let mut chain = Vec::new();
        let mut seen = vec![entity.name.as_str()];
        let mut current = self.parent_of(entity)?;

        while let Some(parent) = current {
            if seen.contains(&parent.name.as_str()) {
                let mut names: Vec<String> = seen.iter().map(|s| s.to_string()).collect();
                names.push(parent.name.clone());
                return Err(DomainError::CyclicExtends { chain: names });
            }
            seen.push(parent.name.as_str());
            chain.push(parent);
            current = self.parent_of(parent)?;
        }

        Ok(chain)
    }
}
