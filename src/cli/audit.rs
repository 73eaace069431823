//! Audit log CLI command

use clap::{Args, ValueEnum};

use crate::audit::EntityType;
use crate::error::SetAsideResult;
use crate::storage::Storage;

/// Entity filter for the audit log
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AuditEntity {
    Transaction,
    Category,
    Future,
    Fixed,
    Profile,
    Settings,
}

impl From<AuditEntity> for EntityType {
    fn from(entity: AuditEntity) -> Self {
        match entity {
            AuditEntity::Transaction => EntityType::Transaction,
            AuditEntity::Category => EntityType::Category,
            AuditEntity::Future => EntityType::FutureExpense,
            AuditEntity::Fixed => EntityType::FixedExpense,
            AuditEntity::Profile => EntityType::Profile,
            AuditEntity::Settings => EntityType::Settings,
        }
    }
}

/// Audit log arguments
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Only show changes to one kind of record
    #[arg(short, long, value_enum)]
    pub entity: Option<AuditEntity>,
}

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, args: AuditArgs) -> SetAsideResult<()> {
    let entries = storage
        .audit()
        .read_recent(args.count, args.entity.map(EntityType::from))?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
