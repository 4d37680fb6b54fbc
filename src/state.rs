use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::clients::twilio::TwilioClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{ReminderService, SmsGateway};

/// Explicit application context threaded through handlers and commands.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    /// Present only when the Twilio credentials are fully configured.
    pub sms: Option<Arc<TwilioClient>>,

    /// Installed once at startup when metrics are enabled; absent in tests.
    pub prometheus: Option<PrometheusHandle>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let sms = if config.sms.is_configured() {
            Some(Arc::new(TwilioClient::new(config.sms.clone())?))
        } else {
            None
        };

        Ok(Self {
            config,
            store,
            sms,
            prometheus: None,
        })
    }

    #[must_use]
    pub fn with_prometheus(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.prometheus = handle;
        self
    }

    #[must_use]
    pub fn reminder_service(&self) -> ReminderService {
        let gateway = self
            .sms
            .clone()
            .map(|client| client as Arc<dyn SmsGateway>);
        ReminderService::new(self.store.clone(), gateway)
    }
}
