//! Spark application resource.

use std::sync::Arc;

use http::Method;

use crate::client::AnalyticsEngineClient;
use crate::error::AnalyticsEngineError;
use crate::http_client::HttpClient;
use crate::models::{
    ApplicationCollection, ApplicationGetResponse, ApplicationGetStateResponse,
    ApplicationRequest, ApplicationResponse, ListApplicationsParams,
};
use crate::pagination::{ListRequest, Pager};

/// Pager over the Spark applications of an instance.
pub type ApplicationsPager<C> = Pager<C, ApplicationCollection>;

/// Operations on the Spark applications of a serverless instance.
pub struct ApplicationsResource<'c, C: HttpClient> {
    client: &'c AnalyticsEngineClient<C>,
    instance_id: String,
}

impl<'c, C: HttpClient> ApplicationsResource<'c, C> {
    pub(crate) fn new(client: &'c AnalyticsEngineClient<C>, instance_id: String) -> Self {
        Self {
            client,
            instance_id,
        }
    }

    fn segments<'a>(&'a self, rest: &[&'a str]) -> Vec<&'a str> {
        let mut segments = vec![
            "v3",
            "analytics_engines",
            self.instance_id.as_str(),
            "spark_applications",
        ];
        segments.extend_from_slice(rest);
        segments
    }

    /// Submit a Spark application.
    pub async fn create(
        &self,
        req: &ApplicationRequest,
    ) -> Result<ApplicationResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(Method::POST, &self.segments(&[]), &[], Some(req))
            .await
    }

    /// Fetch a single page of applications.
    pub async fn list(
        &self,
        params: &ListApplicationsParams,
    ) -> Result<ApplicationCollection, AnalyticsEngineError> {
        let mut query = params.filter_query();
        if let Some(start) = params.start.as_deref().filter(|s| !s.is_empty()) {
            query.push(("start".to_owned(), start.to_owned()));
        }
        let query: Vec<(&str, &str)> = query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        self.client
            .inner
            .request(Method::GET, &self.segments(&[]), &query, None::<&()>)
            .await
    }

    /// Return a [`Pager`] over every application matching `params`.
    ///
    /// No request is sent until the pager is polled.
    #[must_use]
    pub fn list_all(&self, params: &ListApplicationsParams) -> ApplicationsPager<C> {
        self.list_all_with(self.list_request(params))
    }

    /// Like [`Self::list_all`], starting from a prepared [`ListRequest`],
    /// e.g. one carrying header overrides.
    #[must_use]
    pub fn list_all_with(&self, request: ListRequest) -> ApplicationsPager<C> {
        Pager::new(Arc::clone(&self.client.inner), request)
    }

    /// The request [`Self::list_all`] would page through, for further tweaking.
    #[must_use]
    pub fn list_request(&self, params: &ListApplicationsParams) -> ListRequest {
        ListRequest::new(self.segments(&[]))
            .with_query(params.filter_query())
            .with_start(params.start.clone())
    }

    /// Get the details of one application.
    pub async fn get(
        &self,
        application_id: &str,
    ) -> Result<ApplicationGetResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&[application_id]),
                &[],
                None::<&()>,
            )
            .await
    }

    /// Get the state of one application.
    pub async fn get_state(
        &self,
        application_id: &str,
    ) -> Result<ApplicationGetStateResponse, AnalyticsEngineError> {
        self.client
            .inner
            .request(
                Method::GET,
                &self.segments(&[application_id, "state"]),
                &[],
                None::<&()>,
            )
            .await
    }

    /// Stop a running application. The service answers 204 with no body.
    pub async fn delete(&self, application_id: &str) -> Result<(), AnalyticsEngineError> {
        self.client
            .inner
            .request_no_content(
                Method::DELETE,
                &self.segments(&[application_id]),
                None::<&()>,
            )
            .await
    }
}
