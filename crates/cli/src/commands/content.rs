//! Landing-page content commands.
//!
//! # Usage
//!
//! ```bash
//! craftpage-cli content seed [--force]
//! craftpage-cli content show
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_URL`, `BACKEND_ANON_KEY`, `BACKEND_SERVICE_ROLE_KEY`

use craftpage_backend::Order;
use craftpage_core::content::{ContentRow, ContentSet, ContentSlot, SlotContent};

use super::{CommandError, service_client};

/// Write the editor skeleton for each slot.
///
/// Slots that already hold a document are left alone unless `force` is
/// set.
///
/// # Errors
///
/// Returns an error if the backend is unreachable or rejects a write.
pub async fn seed(force: bool) -> Result<(), CommandError> {
    let backend = service_client()?;

    let rows: Vec<ContentRow> = backend.from("site_content").select("*").fetch().await?;
    let stored: ContentSet = rows.into_iter().collect();

    for slot in ContentSlot::ALL {
        if !force && stored.get(slot).is_some() {
            tracing::info!(slot = %slot, "Slot has content, skipping");
            continue;
        }
        let row = ContentRow::from_content(&SlotContent::seed(slot));
        backend
            .from("site_content")
            .upsert(&row, "section,content_key")
            .await?;
        tracing::info!(slot = %slot, "Seeded slot");
    }

    Ok(())
}

/// Print every stored document.
///
/// # Errors
///
/// Returns an error if the backend is unreachable.
pub async fn show() -> Result<(), CommandError> {
    let backend = service_client()?;

    let rows: Vec<ContentRow> = backend
        .from("site_content")
        .select("*")
        .order("section", Order::Asc)
        .fetch()
        .await?;

    #[allow(clippy::print_stdout)]
    for row in &rows {
        let known = if ContentSlot::from_keys(&row.section, &row.content_key).is_some() {
            ""
        } else {
            " (unknown slot)"
        };
        println!("{}/{}{known}", row.section, row.content_key);
        println!(
            "{}",
            serde_json::to_string_pretty(&row.content_value).unwrap_or_default()
        );
    }
    tracing::info!(rows = rows.len(), "Listed content rows");

    Ok(())
}
