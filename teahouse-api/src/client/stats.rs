use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::stats::AdminStats;

pub struct RetrieveStatistics {}

impl RetrieveStatistics {
    pub fn new() -> Self {
        RetrieveStatistics {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<AdminStats, RequestError> {
        client.send_json(client.get("/admin/statistics")?).await
    }
}
