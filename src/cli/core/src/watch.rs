/* src/cli/core/src/watch.rs */

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use storefront_server_axum::LiveReload;
use tracing::{debug, info};

const DEBOUNCE: Duration = Duration::from_millis(150);

fn is_content_change(kind: &EventKind) -> bool {
  matches!(kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_))
}

/// Watch `dir` recursively and fire `reload` after each burst of changes.
/// Must be called inside a tokio runtime. Dropping the returned watcher stops it.
pub fn watch_public_dir(dir: &Path, reload: LiveReload) -> Result<RecommendedWatcher> {
  let (tx, mut rx) = tokio::sync::mpsc::channel(16);
  let mut watcher = RecommendedWatcher::new(
    move |res: notify::Result<notify::Event>| {
      if let Ok(event) = res
        && is_content_change(&event.kind)
      {
        // Full channel means a reload is already pending
        let _ = tx.try_send(());
      }
    },
    notify::Config::default(),
  )?;
  watcher.watch(dir, RecursiveMode::Recursive).with_context(|| format!("failed to watch {}", dir.display()))?;

  tokio::spawn(async move {
    while rx.recv().await.is_some() {
      tokio::time::sleep(DEBOUNCE).await;
      while rx.try_recv().is_ok() {}
      let clients = reload.trigger();
      if clients == 0 {
        debug!("public assets changed, no browsers connected");
      } else {
        info!(clients, "public assets changed, reloading browsers");
      }
    }
  });
  Ok(watcher)
}

#[cfg(test)]
mod tests {
  use notify::event::{AccessKind, CreateKind, ModifyKind};

  use super::*;

  #[test]
  fn only_content_changes_trigger_reload() {
    assert!(is_content_change(&EventKind::Create(CreateKind::File)));
    assert!(is_content_change(&EventKind::Modify(ModifyKind::Any)));
    assert!(!is_content_change(&EventKind::Access(AccessKind::Any)));
    assert!(!is_content_change(&EventKind::Other));
  }

  #[tokio::test]
  async fn file_write_fires_reload() {
    let dir = tempfile::tempdir().unwrap();
    let reload = LiveReload::new();
    let mut rx = reload.subscribe();
    let _watcher = watch_public_dir(dir.path(), reload).unwrap();

    std::fs::write(dir.path().join("app.css"), "body{}").unwrap();
    let fired = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(matches!(fired, Ok(Ok(()))));
  }
}
