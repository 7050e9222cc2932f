use std::sync::Arc;
use crate::{
    config::Settings,
    payments::MollieClient,
    service::ServiceContext,
};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub mollie_client: Option<Arc<MollieClient>>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        mollie_client: Option<Arc<MollieClient>>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            service_context,
            mollie_client,
            settings,
        }
    }
}
