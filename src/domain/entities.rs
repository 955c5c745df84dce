//! Domain entities: family aggregate, member nodes, and validated input types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Aggregate root: a family owns its forest of member nodes exclusively.
///
/// The whole record is the unit of persistence; every mutation replaces
/// the document as one write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Root-level nodes; order is meaningful
    #[serde(default)]
    pub sons: Vec<FamilyNode>,
    pub created_at: DateTime<Utc>,
}

/// One member of a family tree.
///
/// `sons` nests children structurally (no separate node table), mirroring
/// the persisted document layout. The `sons` relation must stay a rooted
/// forest: no cycles, no id appearing twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyNode {
    /// Unique across the entire forest, immutable after creation
    pub id: String,
    /// Personal identifier; positive, but uniqueness is not enforced here
    pub dni: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User-defined attributes, carried but never interpreted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    /// Direct children, in display order
    #[serde(default)]
    pub sons: Vec<FamilyNode>,
    pub birthdate: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// User-defined attribute attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub value: String,
}

/// Value kind of a custom field. Opaque to the tree core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Color,
    Range,
    Date,
}

/// Input for creating a family. Validated before any document is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Optional initial forest (already well-formed nodes)
    #[serde(default)]
    pub sons: Vec<FamilyNode>,
}

impl FamilyDraft {
    /// Check the draft against the input rules: non-empty trimmed name.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(())
    }

    /// Turn the draft into a family record with a fresh id.
    pub fn into_family(self) -> Family {
        Family {
            id: Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            description: normalize_description(self.description),
            sons: self.sons,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a family. Fields left `None` are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sons: Option<Vec<FamilyNode>>,
}

impl FamilyPatch {
    /// At least one field must be set, and a set name must be non-empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_none() && self.description.is_none() && self.sons.is_none() {
            return Err(DomainError::EmptyPatch);
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::EmptyName);
            }
        }
        Ok(())
    }

    /// Merge the patch into an existing family record.
    pub fn apply(self, family: &mut Family) {
        if let Some(name) = self.name {
            family.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            family.description = normalize_description(Some(description));
        }
        if let Some(sons) = self.sons {
            family.sons = sons;
        }
    }
}

/// Input for creating a node. Validated before the core ever sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub name: String,
    pub dni: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub birthdate: Option<DateTime<Utc>>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

impl NodeDraft {
    /// Input rules: non-empty trimmed name, positive dni, well-formed
    /// custom fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.dni == 0 {
            return Err(DomainError::NonPositiveDni);
        }
        validate_custom_fields(&self.custom_fields)?;
        Ok(())
    }

    /// Turn the draft into a node with a fresh id and empty children.
    pub fn into_node(self) -> FamilyNode {
        let now = Utc::now();
        FamilyNode {
            id: Uuid::new_v4().to_string(),
            dni: self.dni,
            name: self.name.trim().to_string(),
            description: normalize_description(self.description),
            custom_fields: self.custom_fields,
            sons: Vec::new(),
            birthdate: self.birthdate.unwrap_or(now),
            created_at: now,
        }
    }
}

/// Partial update for a node. Fields left `None` are unchanged;
/// `id`, `sons` and `createdAt` are never touched by a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    pub name: Option<String>,
    pub dni: Option<u32>,
    pub description: Option<String>,
    pub birthdate: Option<DateTime<Utc>>,
    pub custom_fields: Option<Vec<CustomField>>,
}

impl NodePatch {
    /// At least one field must be set; set fields obey the draft rules.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_none()
            && self.dni.is_none()
            && self.description.is_none()
            && self.birthdate.is_none()
            && self.custom_fields.is_none()
        {
            return Err(DomainError::EmptyPatch);
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::EmptyName);
            }
        }
        if self.dni == Some(0) {
            return Err(DomainError::NonPositiveDni);
        }
        if let Some(fields) = &self.custom_fields {
            validate_custom_fields(fields)?;
        }
        Ok(())
    }

    /// Merge the patch into an existing node.
    pub fn apply(&self, node: &mut FamilyNode) {
        if let Some(name) = &self.name {
            node.name = name.trim().to_string();
        }
        if let Some(dni) = self.dni {
            node.dni = dni;
        }
        if let Some(description) = &self.description {
            node.description = normalize_description(Some(description.clone()));
        }
        if let Some(birthdate) = self.birthdate {
            node.birthdate = birthdate;
        }
        if let Some(fields) = &self.custom_fields {
            node.custom_fields = fields.clone();
        }
    }
}

fn validate_custom_fields(fields: &[CustomField]) -> Result<(), DomainError> {
    for field in fields {
        if field.id.trim().is_empty() || field.label.trim().is_empty() {
            return Err(DomainError::InvalidCustomField {
                field_id: field.id.clone(),
            });
        }
    }
    Ok(())
}

/// Trim a description; empty descriptions collapse to `None`.
fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_draft_rejects_blank_name() {
        let draft = NodeDraft {
            name: "   ".to_string(),
            dni: 7,
            ..Default::default()
        };
        assert!(matches!(draft.validate(), Err(DomainError::EmptyName)));
    }

    #[test]
    fn node_draft_rejects_zero_dni() {
        let draft = NodeDraft {
            name: "Ana".to_string(),
            dni: 0,
            ..Default::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(DomainError::NonPositiveDni)
        ));
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(matches!(
            NodePatch::default().validate(),
            Err(DomainError::EmptyPatch)
        ));
        assert!(matches!(
            FamilyPatch::default().validate(),
            Err(DomainError::EmptyPatch)
        ));
    }

    #[test]
    fn draft_becomes_node_with_fresh_id_and_no_children() {
        let node = NodeDraft {
            name: "  Ana  ".to_string(),
            dni: 42,
            description: Some("".to_string()),
            ..Default::default()
        }
        .into_node();

        assert_eq!(node.name, "Ana");
        assert!(node.sons.is_empty());
        assert!(node.description.is_none());
        assert!(!node.id.is_empty());
    }
}
