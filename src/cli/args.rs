//! CLI argument definitions using clap

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, Subcommand};

/// Hierarchical family-tree record manager
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase debug output (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding family documents (overrides config)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage family records
    Family {
        #[command(subcommand)]
        command: FamilyCommands,
    },

    /// Manage member nodes inside a family
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },

    /// Show a family's forest as a tree
    Tree {
        /// Family id
        family_id: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum FamilyCommands {
    /// Create a family
    Create {
        /// Family name
        #[arg(short, long)]
        name: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },

    /// List all families
    List,

    /// Show one family document
    Show {
        /// Family id
        family_id: String,
    },

    /// Update family name/description
    Update {
        /// Family id
        family_id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a family and its whole forest
    Delete {
        /// Family id
        family_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NodeCommands {
    /// Add a member (root-level, or under --parent)
    Add {
        /// Family id
        family_id: String,
        /// Parent node id (omit to add a root member)
        #[arg(short, long)]
        parent: Option<String>,
        /// Member name
        #[arg(short, long)]
        name: String,
        /// Personal identifier (positive integer)
        #[arg(long)]
        dni: u32,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Birthdate (RFC 3339, e.g. 1990-05-01T00:00:00Z)
        #[arg(long)]
        birthdate: Option<DateTime<Utc>>,
    },

    /// Show one member node
    Show {
        /// Family id
        family_id: String,
        /// Node id
        node_id: String,
    },

    /// Show a member's immediate parent
    Parent {
        /// Family id
        family_id: String,
        /// Node id
        node_id: String,
    },

    /// Update member fields
    Update {
        /// Family id
        family_id: String,
        /// Node id
        node_id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New dni
        #[arg(long)]
        dni: Option<u32>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New birthdate (RFC 3339)
        #[arg(long)]
        birthdate: Option<DateTime<Utc>>,
    },

    /// Delete a member and its entire subtree
    Delete {
        /// Family id
        family_id: String,
        /// Node id
        node_id: String,
    },

    /// Move a member (with subtree) right after another member
    Move {
        /// Family id
        family_id: String,
        /// Node being moved
        active_id: String,
        /// Node after which it should land
        over_id: String,
    },

    /// Count members across all depths
    Count {
        /// Family id
        family_id: String,
    },

    /// List all member ids in pre-order
    Ids {
        /// Family id
        family_id: String,
    },
}
