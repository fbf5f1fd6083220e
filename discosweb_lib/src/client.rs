//! Rate-limit-aware wrapper around the API client.

use discosweb_api::types::{
    LaunchAttributes, ObjectAttributes, Record, StageAttributes, VehicleAttributes,
};
use discosweb_api::{Client, LaunchQuery, ObjectQuery, StageQuery};

use crate::config::Config;
use crate::error::DiscosError;
use crate::governor::Governor;

/// API client wrapper that routes every request through the [`Governor`].
///
/// Each method issues exactly one logical request; throttled attempts are
/// re-issued by the governor until they succeed or are rejected.
pub struct ThrottledClient {
    inner: Client,
    governor: Governor,
}

impl ThrottledClient {
    pub fn new(inner: Client, governor: Governor) -> Self {
        Self { inner, governor }
    }

    /// Builds the API client from the loaded configuration.
    pub fn from_config(config: &Config, governor: Governor) -> Result<Self, DiscosError> {
        let inner = Client::with_base_url(&config.base_url, config.token())?
            .with_api_version(&config.api_version);
        let governor = governor.with_fallback_wait(config.fallback_wait);
        Ok(Self::new(inner, governor))
    }

    pub fn governor(&self) -> &Governor {
        &self.governor
    }

    /// Fetches one page of launches.
    pub async fn launches_page(
        &self,
        query: &LaunchQuery,
        context: &str,
    ) -> Result<Vec<Record<LaunchAttributes>>, DiscosError> {
        let resp = self
            .governor
            .run(context, || self.inner.get_launches(query))
            .await?;
        Ok(resp.data)
    }

    /// Fetches one page of a launch's objects.
    pub async fn launch_objects_page(
        &self,
        launch_id: &str,
        query: &ObjectQuery,
        context: &str,
    ) -> Result<Vec<Record<ObjectAttributes>>, DiscosError> {
        let resp = self
            .governor
            .run(context, || self.inner.get_launch_objects(launch_id, query))
            .await?;
        Ok(resp.data)
    }

    /// Fetches a launch's vehicle, `None` when the registry has none.
    pub async fn launch_vehicle(
        &self,
        launch_id: &str,
        context: &str,
    ) -> Result<Option<Record<VehicleAttributes>>, DiscosError> {
        let resp = self
            .governor
            .run(context, || self.inner.get_launch_vehicle(launch_id))
            .await?;
        Ok(resp.data)
    }

    /// Fetches one page of a vehicle's stages.
    pub async fn vehicle_stages_page(
        &self,
        vehicle_id: &str,
        query: &StageQuery,
        context: &str,
    ) -> Result<Vec<Record<StageAttributes>>, DiscosError> {
        let resp = self
            .governor
            .run(context, || self.inner.get_vehicle_stages(vehicle_id, query))
            .await?;
        Ok(resp.data)
    }
}
