//! Hops from a launch to its related resources.

use discosweb_api::types::{
    LaunchAttributes, ObjectAttributes, ObjectClass, Record, StageAttributes,
};
use discosweb_api::{LaunchQuery, ObjectQuery, StageQuery};

use crate::client::ThrottledClient;
use crate::error::DiscosError;
use crate::paginate::{fetch_all_pages, PAGE_SIZE};

/// Walks launch -> objects and launch -> vehicle -> stages, paging each
/// collection to completion.
pub struct GraphWalker<'a> {
    client: &'a ThrottledClient,
    page_size: usize,
}

impl<'a> GraphWalker<'a> {
    pub fn new(client: &'a ThrottledClient) -> Self {
        Self {
            client,
            page_size: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// All launches matching `query`, in epoch order.
    pub async fn launches(
        &self,
        query: LaunchQuery,
        label: &str,
    ) -> Result<Vec<Record<LaunchAttributes>>, DiscosError> {
        let client = self.client;
        fetch_all_pages(query, self.page_size, move |q: LaunchQuery, page| {
            let context = format!("{} launches page {}", label, page);
            async move {
                let records = client.launches_page(&q, &context).await?;
                client
                    .governor()
                    .observer()
                    .page_fetched(&context, page, records.len());
                Ok(records)
            }
        })
        .await
    }

    /// Objects of one class attached to a launch.
    pub async fn objects(
        &self,
        launch_id: &str,
        class: &ObjectClass,
    ) -> Result<Vec<Record<ObjectAttributes>>, DiscosError> {
        let client = self.client;
        let query = ObjectQuery::default().with_object_class(class);
        fetch_all_pages(query, self.page_size, move |q: ObjectQuery, page| {
            let context = format!("launch {} objects page {}", launch_id, page);
            async move {
                let records = client.launch_objects_page(launch_id, &q, &context).await?;
                client
                    .governor()
                    .observer()
                    .page_fetched(&context, page, records.len());
                Ok(records)
            }
        })
        .await
    }

    pub async fn payloads(
        &self,
        launch_id: &str,
    ) -> Result<Vec<Record<ObjectAttributes>>, DiscosError> {
        self.objects(launch_id, &ObjectClass::Payload).await
    }

    /// Stages of the launch's vehicle. A launch without a recorded vehicle
    /// has no stages.
    pub async fn stages(
        &self,
        launch_id: &str,
    ) -> Result<Vec<Record<StageAttributes>>, DiscosError> {
        let client = self.client;
        let context = format!("launch {} vehicle", launch_id);
        let Some(vehicle) = client.launch_vehicle(launch_id, &context).await? else {
            tracing::debug!("Launch {} has no vehicle", launch_id);
            return Ok(Vec::new());
        };

        let vehicle_id = vehicle.id.as_str();
        fetch_all_pages(
            StageQuery::default(),
            self.page_size,
            move |q: StageQuery, page| {
                let context = format!("vehicle {} stages page {}", vehicle_id, page);
                async move {
                    let records = client.vehicle_stages_page(vehicle_id, &q, &context).await?;
                    client
                        .governor()
                        .observer()
                        .page_fetched(&context, page, records.len());
                    Ok(records)
                }
            },
        )
        .await
    }
}
