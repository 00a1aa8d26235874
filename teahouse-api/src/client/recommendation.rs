use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::recommendation::{RecommendationRequest, RecommendationResponse};

pub struct Recommend {
    body: RecommendationRequest,
}

impl Recommend {
    pub fn new() -> Self {
        Recommend {
            body: RecommendationRequest::default()
        }
    }

    pub fn preference<P>(&mut self, preference: P) -> &mut Self
    where
        P: Into<String>
    {
        self.body.user_preference = Some(preference.into());
        self
    }

    pub fn weather<W>(&mut self, weather: W) -> &mut Self
    where
        W: Into<String>
    {
        self.body.weather = Some(weather.into());
        self
    }

    pub fn mood<M>(&mut self, mood: M) -> &mut Self
    where
        M: Into<String>
    {
        self.body.mood = Some(mood.into());
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<RecommendationResponse, RequestError> {
        client.send_json(client.post("/recommendation")?.json(&self.body)).await
    }
}
