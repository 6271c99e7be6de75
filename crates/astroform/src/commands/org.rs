use super::{load_context, load_unscoped_context, print_model};
use crate::GlobalArgs;
use anyhow::Context;
use astroform_provider::OrganizationDataSource;
use colored::Colorize;

pub async fn handle_get(global: &GlobalArgs, id: Option<&str>) -> anyhow::Result<()> {
    // An explicit id does not need a configured organization
    let context = match id {
        Some(_) => load_unscoped_context(global)?,
        None => load_context(global)?,
    };
    let organization = OrganizationDataSource::new(&context)
        .read(id)
        .await
        .context("Failed to read organization")?;
    print_model(&organization)
}

pub async fn handle_list(global: &GlobalArgs) -> anyhow::Result<()> {
    let context = load_unscoped_context(global)?;
    let organizations = OrganizationDataSource::new(&context)
        .list()
        .await
        .context("Failed to list organizations")?;

    eprintln!(
        "{} organization(s) visible",
        organizations.len().to_string().cyan()
    );
    print_model(&organizations)
}
