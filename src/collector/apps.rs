use super::resource::{Resource, ResourceCollector};
use anyhow::Result;
use futures::future::BoxFuture;
use koyeb_api::{App, PlatformApi};

/// Koyeb Apps
pub struct Apps;

impl Resource for Apps {
    type Record = App;

    const KIND: &'static str = "Apps";
    const SUBSYSTEM: &'static str = "apps";
    const HELP: &'static str = "1 if the App is up, 0 otherwise";
    const LABELS: &'static [&'static str] = &["id", "name", "organization", "status"];

    fn list(api: &dyn PlatformApi) -> BoxFuture<'_, Result<Vec<App>>> {
        api.list_apps()
    }

    fn labels(app: &App) -> Vec<String> {
        vec![
            app.id.clone(),
            app.name.clone(),
            app.organization_id.clone(),
            app.status.clone(),
        ]
    }
}

pub type AppsCollector = ResourceCollector<Apps>;
