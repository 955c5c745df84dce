//! Command dispatch: maps parsed arguments onto family service calls

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use termtree::Tree;
use tracing::instrument;

use crate::application::services::NodeParent;
use crate::cli::args::{Cli, Commands, FamilyCommands, NodeCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::domain::{Family, FamilyDraft, FamilyNode, FamilyPatch, NodeDraft, NodePatch};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Family { command }) => execute_family_command(command, container),
        Some(Commands::Node { command }) => execute_node_command(command, container),
        Some(Commands::Tree { family_id }) => _tree(container, family_id),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

fn execute_family_command(command: &FamilyCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        FamilyCommands::Create { name, description } => {
            _family_create(container, name, description.as_deref())
        }
        FamilyCommands::List => _family_list(container),
        FamilyCommands::Show { family_id } => _family_show(container, family_id),
        FamilyCommands::Update {
            family_id,
            name,
            description,
        } => _family_update(container, family_id, name.clone(), description.clone()),
        FamilyCommands::Delete { family_id } => _family_delete(container, family_id),
    }
}

fn execute_node_command(command: &NodeCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        NodeCommands::Add {
            family_id,
            parent,
            name,
            dni,
            description,
            birthdate,
        } => _node_add(
            container,
            family_id,
            parent.as_deref(),
            NodeDraft {
                name: name.clone(),
                dni: *dni,
                description: description.clone(),
                birthdate: *birthdate,
                custom_fields: Vec::new(),
            },
        ),
        NodeCommands::Show { family_id, node_id } => _node_show(container, family_id, node_id),
        NodeCommands::Parent { family_id, node_id } => _node_parent(container, family_id, node_id),
        NodeCommands::Update {
            family_id,
            node_id,
            name,
            dni,
            description,
            birthdate,
        } => _node_update(
            container,
            family_id,
            node_id,
            NodePatch {
                name: name.clone(),
                dni: *dni,
                description: description.clone(),
                birthdate: *birthdate,
                custom_fields: None,
            },
        ),
        NodeCommands::Delete { family_id, node_id } => _node_delete(container, family_id, node_id),
        NodeCommands::Move {
            family_id,
            active_id,
            over_id,
        } => _node_move(container, family_id, active_id, over_id),
        NodeCommands::Count { family_id } => _node_count(container, family_id),
        NodeCommands::Ids { family_id } => _node_ids(container, family_id),
    }
}

#[instrument(skip(container))]
fn _family_create(
    container: &ServiceContainer,
    name: &str,
    description: Option<&str>,
) -> CliResult<()> {
    let id = container.families.create_family(FamilyDraft {
        name: name.to_string(),
        description: description.map(|d| d.to_string()),
        sons: Vec::new(),
    })?;
    output::action("created", &id);
    Ok(())
}

#[instrument(skip(container))]
fn _family_list(container: &ServiceContainer) -> CliResult<()> {
    let families = container.families.list_families()?;
    for family in &families {
        let members = crate::domain::forest::count_nodes(&family.sons);
        output::info(&format!("{}  {} ({} members)", family.id, family.name, members));
    }
    Ok(())
}

#[instrument(skip(container))]
fn _family_show(container: &ServiceContainer, family_id: &str) -> CliResult<()> {
    let family = container.families.get_family(family_id)?;
    output::header(&family.name);
    output::detail(&format!("id:          {}", family.id));
    if let Some(description) = &family.description {
        output::detail(&format!("description: {}", description));
    }
    output::detail(&format!("created:     {}", family.created_at.to_rfc3339()));
    output::detail(&format!(
        "members:     {}",
        crate::domain::forest::count_nodes(&family.sons)
    ));
    Ok(())
}

#[instrument(skip(container))]
fn _family_update(
    container: &ServiceContainer,
    family_id: &str,
    name: Option<String>,
    description: Option<String>,
) -> CliResult<()> {
    container.families.update_family(
        family_id,
        FamilyPatch {
            name,
            description,
            sons: None,
        },
    )?;
    output::success(&format!("updated family {}", family_id));
    Ok(())
}

#[instrument(skip(container))]
fn _family_delete(container: &ServiceContainer, family_id: &str) -> CliResult<()> {
    container.families.delete_family(family_id)?;
    output::success(&format!("deleted family {}", family_id));
    Ok(())
}

#[instrument(skip(container, draft))]
fn _node_add(
    container: &ServiceContainer,
    family_id: &str,
    parent: Option<&str>,
    draft: NodeDraft,
) -> CliResult<()> {
    let id = match parent {
        Some(parent_id) => container
            .families
            .add_child_node(family_id, parent_id, draft)?,
        None => container.families.add_root_node(family_id, draft)?,
    };
    output::action("created", &id);
    Ok(())
}

#[instrument(skip(container))]
fn _node_show(container: &ServiceContainer, family_id: &str, node_id: &str) -> CliResult<()> {
    let node = container.families.get_node(family_id, node_id)?;
    print_node_summary(&node);
    Ok(())
}

#[instrument(skip(container))]
fn _node_parent(container: &ServiceContainer, family_id: &str, node_id: &str) -> CliResult<()> {
    match container.families.parent_of(family_id, node_id)? {
        NodeParent::Root => output::info("root (direct member of the family)"),
        NodeParent::Node(parent) => print_node_summary(&parent),
    }
    Ok(())
}

#[instrument(skip(container, patch))]
fn _node_update(
    container: &ServiceContainer,
    family_id: &str,
    node_id: &str,
    patch: NodePatch,
) -> CliResult<()> {
    container.families.update_node(family_id, node_id, patch)?;
    output::success(&format!("updated node {}", node_id));
    Ok(())
}

#[instrument(skip(container))]
fn _node_delete(container: &ServiceContainer, family_id: &str, node_id: &str) -> CliResult<()> {
    container.families.delete_node(family_id, node_id)?;
    output::success(&format!("deleted node {} (with its subtree)", node_id));
    Ok(())
}

#[instrument(skip(container))]
fn _node_move(
    container: &ServiceContainer,
    family_id: &str,
    active_id: &str,
    over_id: &str,
) -> CliResult<()> {
    container.families.move_node(family_id, active_id, over_id)?;
    output::success(&format!("moved node {} after {}", active_id, over_id));
    Ok(())
}

#[instrument(skip(container))]
fn _node_count(container: &ServiceContainer, family_id: &str) -> CliResult<()> {
    let count = container.families.count_members(family_id)?;
    output::info(&count);
    Ok(())
}

#[instrument(skip(container))]
fn _node_ids(container: &ServiceContainer, family_id: &str) -> CliResult<()> {
    for id in container.families.member_ids(family_id)? {
        output::info(&id);
    }
    Ok(())
}

#[instrument(skip(container))]
fn _tree(container: &ServiceContainer, family_id: &str) -> CliResult<()> {
    let family = container.families.get_family(family_id)?;
    output::info(&family_tree(&family));
    Ok(())
}

#[instrument]
fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn print_node_summary(node: &FamilyNode) {
    output::header(&node.name);
    output::detail(&format!("id:        {}", node.id));
    output::detail(&format!("dni:       {}", node.dni));
    if let Some(description) = &node.description {
        output::detail(&format!("desc:      {}", description));
    }
    output::detail(&format!("birthdate: {}", node.birthdate.to_rfc3339()));
    output::detail(&format!("children:  {}", node.sons.len()));
    for field in &node.custom_fields {
        output::detail(&format!("{}: {}", field.label, field.value));
    }
}

/// Render a family's forest with the family name as the tree root.
fn family_tree(family: &Family) -> Tree<String> {
    let leaves: Vec<_> = family.sons.iter().map(node_tree).collect();
    Tree::new(family.name.clone()).with_leaves(leaves)
}

fn node_tree(node: &FamilyNode) -> Tree<String> {
    let label = format!("{} (dni {})", node.name, node.dni);
    let leaves: Vec<_> = node.sons.iter().map(node_tree).collect();
    Tree::new(label).with_leaves(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn leaf(name: &str, dni: u32) -> FamilyNode {
        let now = Utc::now();
        FamilyNode {
            id: name.to_string(),
            dni,
            name: name.to_string(),
            description: None,
            custom_fields: Vec::new(),
            sons: Vec::new(),
            birthdate: now,
            created_at: now,
        }
    }

    #[test]
    fn family_tree_renders_nested_members() {
        let mut parent = leaf("Carmen", 1);
        parent.sons.push(leaf("Diego", 2));
        let family = Family {
            id: "f1".to_string(),
            name: "García".to_string(),
            description: None,
            sons: vec![parent],
            created_at: Utc::now(),
        };

        let rendered = family_tree(&family).to_string();
        assert!(rendered.contains("García"));
        assert!(rendered.contains("Carmen (dni 1)"));
        assert!(rendered.contains("Diego (dni 2)"));
    }
}
