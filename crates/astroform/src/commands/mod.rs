pub mod org;
pub mod resource;

use crate::GlobalArgs;
use anyhow::Context;
use astroform_cloud::CancellationToken;
use astroform_config::Overrides;
use astroform_provider::ProviderContext;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Resolve settings and build the provider context
pub fn load_context(global: &GlobalArgs) -> anyhow::Result<ProviderContext> {
    let settings = astroform_config::load_settings()?;
    let resolved = astroform_config::resolve(overrides(global), settings)?;
    Ok(ProviderContext::from_settings(&resolved)?)
}

/// Context for calls that need a token but no organization
pub fn load_unscoped_context(global: &GlobalArgs) -> anyhow::Result<ProviderContext> {
    let settings = astroform_config::load_settings()?;
    let resolved = astroform_config::resolve_unscoped(overrides(global), settings)?;
    Ok(ProviderContext::from_settings(&resolved)?)
}

fn overrides(global: &GlobalArgs) -> Overrides {
    Overrides {
        token: global.token.clone(),
        organization_id: global.organization.clone(),
        api_url: global.api_url.clone(),
    }
}

/// Read a JSON model from a file, or stdin for `-`
pub fn read_model<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Unable to read model from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read model file {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid model in {}", path.display()))
}

pub fn print_model<T: Serialize>(model: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(model)?);
    Ok(())
}

/// Token cancelled on Ctrl-C, so a pending wait stops cleanly
pub fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, abandoning wait");
            trigger.cancel();
        }
    });
    cancel
}
