// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use sw_core::{CategorySet, TransactionType};

use super::{detect_online, print_json, runtime, Context};
use crate::categories::{CategoryCache, CategoryOrigin};
use crate::cli::OutputFormat;
use crate::config;
use crate::display::format_categories;
use crate::error::Result;
use crate::sync::RemoteSubmitter;

/// JSON shape of `sw categories -o json`.
#[derive(Debug, Serialize)]
struct CategoriesJson<'a> {
    #[serde(flatten)]
    categories: &'a CategorySet,
    source: CategoryOrigin,
}

pub fn run(kind: Option<String>, refresh: bool, output: OutputFormat) -> Result<()> {
    let ctx = Context::open()?;
    let kind = kind
        .as_deref()
        .map(str::parse::<TransactionType>)
        .transpose()?;

    let (categories, origin) = runtime()?.block_on(async {
        let online = detect_online(ctx.config.remote.as_ref()).await;
        resolve(&ctx, refresh, online).await
    })?;

    match output {
        OutputFormat::Text => {
            for line in format_categories(&categories, kind, origin) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let filtered = match kind {
                Some(TransactionType::Expense) => CategorySet {
                    income_types: Vec::new(),
                    ..categories
                },
                Some(TransactionType::Income) => CategorySet {
                    expense_types: Vec::new(),
                    ..categories
                },
                None => categories,
            };
            print_json(&CategoriesJson {
                categories: &filtered,
                source: origin,
            })?;
        }
    }
    Ok(())
}

/// Load categories from the cache, asking the remote when `online`.
pub(crate) async fn resolve(
    ctx: &Context,
    refresh: bool,
    online: bool,
) -> Result<(CategorySet, CategoryOrigin)> {
    let cache = CategoryCache::new(&config::categories_path(&ctx.data_dir));
    if !online {
        return cache.resolve(None::<&RemoteSubmitter>, refresh).await;
    }

    let submitter = RemoteSubmitter::new(ctx.submitter_config());
    let resolved = cache.resolve(Some(&submitter), refresh).await;
    submitter.disconnect().await;
    resolved
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
