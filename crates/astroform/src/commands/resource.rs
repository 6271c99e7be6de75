use super::{cancel_on_interrupt, load_context, print_model, read_model};
use crate::{Action, GlobalArgs, Kind};
use anyhow::Context;
use astroform_provider::{ClusterResource, DeploymentResource, ManagedResource, WorkspaceResource};
use colored::Colorize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

pub async fn handle(
    global: &GlobalArgs,
    kind: Kind,
    action: Action,
    file: &Path,
) -> anyhow::Result<()> {
    let context = load_context(global)?;
    match kind {
        Kind::Cluster => run(ClusterResource::new(&context), action, file).await,
        Kind::Deployment => run(DeploymentResource::new(&context), action, file).await,
        Kind::Workspace => run(WorkspaceResource::new(&context), action, file).await,
    }
}

pub async fn handle_import(global: &GlobalArgs, kind: Kind, id: &str) -> anyhow::Result<()> {
    let context = load_context(global)?;
    match kind {
        Kind::Cluster => import(ClusterResource::new(&context), id).await,
        Kind::Deployment => import(DeploymentResource::new(&context), id).await,
        Kind::Workspace => import(WorkspaceResource::new(&context), id).await,
    }
}

async fn run<R>(resource: R, action: Action, file: &Path) -> anyhow::Result<()>
where
    R: ManagedResource,
    R::Model: Serialize + DeserializeOwned,
{
    let kind = resource.kind();
    let model: R::Model = read_model(file)?;

    match action {
        Action::Create => {
            let created = resource
                .create(&model, &cancel_on_interrupt())
                .await
                .with_context(|| format!("Failed to create {}", kind))?;
            eprintln!("{} {} created", "✓".green(), kind);
            print_model(&created)?;
        }
        Action::Read => {
            match resource
                .read(&model)
                .await
                .with_context(|| format!("Failed to read {}", kind))?
            {
                Some(current) => print_model(&current)?,
                None => {
                    eprintln!("{} {} no longer exists", "!".yellow(), kind);
                    print_model(&serde_json::Value::Null)?;
                }
            }
        }
        Action::Update => {
            let updated = resource
                .update(&model, &cancel_on_interrupt())
                .await
                .with_context(|| format!("Failed to update {}", kind))?;
            eprintln!("{} {} updated", "✓".green(), kind);
            print_model(&updated)?;
        }
        Action::Delete => {
            resource
                .delete(&model)
                .await
                .with_context(|| format!("Failed to delete {}", kind))?;
            eprintln!("{} {} deleted", "✓".green(), kind);
        }
    }

    Ok(())
}

async fn import<R>(resource: R, id: &str) -> anyhow::Result<()>
where
    R: ManagedResource,
    R::Model: Serialize,
{
    let kind = resource.kind();
    let model = resource
        .import(id)
        .await
        .with_context(|| format!("Failed to import {} {}", kind, id))?;
    eprintln!("{} {} {} imported", "✓".green(), kind, id.cyan());
    print_model(&model)
}
