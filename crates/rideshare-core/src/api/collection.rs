use std::borrow::Cow;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiError, ApiResult, MarketplaceApi};
use crate::http_client::HttpMethod;
use crate::{
    BookingRequest, Parcel, ParcelRequest, ResourceId, ResourceKind, ResourceStatus, Ride,
    RideRequest, SearchQuery, MAX_SEATS, MIN_SEATS,
};

/// A backend-managed entity reachable under `/{collection}`.
pub trait Resource: DeserializeOwned + Send {
    /// Validated creation payload, sent verbatim as the `create` body.
    type Draft: Serialize + Sync;

    const KIND: ResourceKind;
}

impl Resource for Ride {
    type Draft = RideRequest;

    const KIND: ResourceKind = ResourceKind::Ride;
}

impl Resource for Parcel {
    type Draft = ParcelRequest;

    const KIND: ResourceKind = ResourceKind::Parcel;
}

#[derive(Serialize)]
struct StatusUpdate {
    status: ResourceStatus,
}

/// Typed operations on one resource collection.
#[derive(Debug)]
pub struct Collection<'a, R> {
    api: &'a MarketplaceApi,
    resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> Collection<'a, R> {
    pub(super) fn new(api: &'a MarketplaceApi) -> Self {
        Self {
            api,
            resource: PhantomData,
        }
    }

    /// `POST /{collection}` with the draft as JSON body.
    pub async fn create(&self, draft: &R::Draft) -> ApiResult<R> {
        let request = self
            .api
            .json_request(HttpMethod::Post, &[R::KIND.collection()], draft)?;
        self.api.send(request).await
    }

    /// `GET /{collection}`. An empty list is a success.
    pub async fn list(&self) -> ApiResult<Vec<R>> {
        let request = self.api.request(HttpMethod::Get, &[R::KIND.collection()]);
        self.api.send(request).await
    }

    /// `GET /{collection}/search?...` with the set filters.
    ///
    /// A seat filter outside the schema range or a non-positive weight limit
    /// fails with kind `invalid` and never reaches the network.
    pub async fn search(&self, query: &SearchQuery) -> ApiResult<Vec<R>> {
        if let Some(seats) = query.seats {
            check_seats(seats)?;
        }
        if let Some(max_weight) = query.max_weight {
            if !max_weight.is_finite() || max_weight <= 0.0 {
                return Err(ApiError::invalid(format!(
                    "max weight must be a positive number, got {max_weight}"
                )));
            }
        }

        let mut request = self
            .api
            .request(HttpMethod::Get, &[R::KIND.collection(), "search"]);
        let query = query.to_query_string();
        if !query.is_empty() {
            request.url.push('?');
            request.url.push_str(&query);
        }
        self.api.send(request).await
    }

    /// `GET /{collection}/{id}`. A missing resource fails with status 404.
    pub async fn get_by_id(&self, id: &ResourceId) -> ApiResult<R> {
        let id = encode_segment(id);
        let request = self
            .api
            .request(HttpMethod::Get, &[R::KIND.collection(), &*id]);
        self.api.send(request).await
    }

    /// `POST /{collection}/{id}/cancel` with no body.
    pub async fn cancel(&self, id: &ResourceId) -> ApiResult<R> {
        self.action(id, "cancel").await
    }

    /// `PUT /{collection}/{id}/status` with `{"status": ...}`.
    pub async fn update_status(&self, id: &ResourceId, status: ResourceStatus) -> ApiResult<R> {
        let id = encode_segment(id);
        let request = self.api.json_request(
            HttpMethod::Put,
            &[R::KIND.collection(), &*id, "status"],
            &StatusUpdate { status },
        )?;
        self.api.send(request).await
    }

    async fn action(&self, id: &ResourceId, action: &str) -> ApiResult<R> {
        let id = encode_segment(id);
        let request = self
            .api
            .request(HttpMethod::Post, &[R::KIND.collection(), &*id, action]);
        self.api.send(request).await
    }
}

impl Collection<'_, Ride> {
    /// `POST /rides/{id}/book` with `{"seats": n}`.
    ///
    /// A seat count outside the schema range fails with kind `invalid` and
    /// never reaches the network.
    pub async fn book(&self, id: &ResourceId, seats: u8) -> ApiResult<Ride> {
        check_seats(seats)?;

        let id = encode_segment(id);
        let request = self.api.json_request(
            HttpMethod::Post,
            &[ResourceKind::Ride.collection(), &*id, "book"],
            &BookingRequest { seats },
        )?;
        self.api.send(request).await
    }
}

impl Collection<'_, Parcel> {
    /// `POST /parcels/{id}/accept` with no body.
    pub async fn accept(&self, id: &ResourceId) -> ApiResult<Parcel> {
        self.action(id, "accept").await
    }
}

fn check_seats(seats: u8) -> ApiResult<()> {
    if (MIN_SEATS..=MAX_SEATS).contains(&seats) {
        Ok(())
    } else {
        Err(ApiError::invalid(format!(
            "seats must be between {MIN_SEATS} and {MAX_SEATS}, got {seats}"
        )))
    }
}

fn encode_segment(id: &ResourceId) -> Cow<'_, str> {
    urlencoding::encode(id.as_str())
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Arc;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    use serde_json::json;

    use super::*;
    use crate::api::test_support::RecordingHttpClient;
    use crate::api::ApiErrorKind;
    use crate::config::ClientConfig;
    use crate::http_client::HttpError;

    const RIDE_JSON: &str = r#"{
        "id": 7,
        "from": "A",
        "to": "B",
        "departureTime": "2030-01-08T10:00:00Z",
        "seats": 4,
        "seatsAvailable": 2,
        "price": 50,
        "status": "accepted",
        "driverId": "d-1"
    }"#;

    const PARCEL_JSON: &str = r#"{
        "id": "p-1",
        "from": { "address": "Depot", "latitude": 48.1, "longitude": 11.5 },
        "to": "Office 3",
        "deadline": "2030-01-03T17:30:00Z",
        "size": "small",
        "weight": 1.5,
        "reward": 12,
        "status": "accepted"
    }"#;

    fn api(client: &Arc<RecordingHttpClient>) -> MarketplaceApi {
        let config = ClientConfig::new("http://api.test/v1").expect("valid base url");
        MarketplaceApi::with_http_client(config, client.clone())
    }

    fn id(value: &str) -> ResourceId {
        ResourceId::parse(value).expect("valid id")
    }

    #[test]
    fn get_by_id_percent_encodes_the_identifier() {
        let client = Arc::new(RecordingHttpClient::responding(200, RIDE_JSON));
        let api = api(&client);

        let ride = block_on(api.rides().get_by_id(&id("a b/c"))).expect("ride");

        assert_eq!(ride.id.as_str(), "7");
        assert_eq!(ride.seats_available, Some(2));
        assert_eq!(ride.status, ResourceStatus::Accepted);
        assert_eq!(ride.extra.get("driverId"), Some(&json!("d-1")));

        let requests = client.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://api.test/v1/rides/a%20b%2Fc");
        assert_eq!(requests[0].body, None);
    }

    #[test]
    fn book_sends_seat_count() {
        let client = Arc::new(RecordingHttpClient::responding(200, RIDE_JSON));
        let api = api(&client);

        block_on(api.rides().book(&id("7"), 2)).expect("booked");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://api.test/v1/rides/7/book");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"seats":2}"#));
    }

    #[test]
    fn book_rejects_out_of_range_seats_without_calling_transport() {
        let client = Arc::new(RecordingHttpClient::responding(200, RIDE_JSON));
        let api = api(&client);

        for seats in [0, 9] {
            let error = block_on(api.rides().book(&id("7"), seats)).expect_err("invalid seats");
            assert_eq!(error.status, 0);
            assert_eq!(error.kind, ApiErrorKind::Invalid);
        }
        assert!(client.recorded_requests().is_empty());
    }

    #[test]
    fn accept_and_cancel_post_without_body() {
        let client = Arc::new(RecordingHttpClient::responding(200, PARCEL_JSON));
        let api = api(&client);

        let parcel = block_on(api.parcels().accept(&id("p-1"))).expect("accepted");
        assert_eq!(parcel.status, ResourceStatus::Accepted);
        block_on(api.parcels().cancel(&id("p-1"))).expect("cancelled");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].url, "http://api.test/v1/parcels/p-1/accept");
        assert_eq!(requests[1].url, "http://api.test/v1/parcels/p-1/cancel");
        assert!(requests.iter().all(|request| request.method == HttpMethod::Post));
        assert!(requests.iter().all(|request| request.body.is_none()));
    }

    #[test]
    fn update_status_puts_camel_case_status() {
        let client = Arc::new(RecordingHttpClient::responding(200, RIDE_JSON));
        let api = api(&client);

        block_on(api.rides().update_status(&id("7"), ResourceStatus::InProgress))
            .expect("status updated");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].url, "http://api.test/v1/rides/7/status");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"status":"inProgress"}"#));
    }

    #[test]
    fn search_appends_filters_to_the_search_path() {
        let client = Arc::new(RecordingHttpClient::responding(200, &format!("[{PARCEL_JSON}]")));
        let api = api(&client);
        let query = SearchQuery::new()
            .with_size(crate::ParcelSize::Small)
            .with_max_weight(2.0);

        let parcels = block_on(api.parcels().search(&query)).expect("matches");
        assert_eq!(parcels.len(), 1);
        block_on(api.parcels().search(&SearchQuery::new())).expect("unfiltered");

        let requests = client.recorded_requests();
        assert_eq!(
            requests[0].url,
            "http://api.test/v1/parcels/search?parcelSize=small&maxWeight=2"
        );
        assert_eq!(requests[1].url, "http://api.test/v1/parcels/search");
        assert!(requests.iter().all(|request| request.method == HttpMethod::Get));
    }

    #[test]
    fn search_rejects_out_of_range_filters_without_calling_transport() {
        let client = Arc::new(RecordingHttpClient::responding(200, "[]"));
        let api = api(&client);

        let error = block_on(api.rides().search(&SearchQuery::new().with_seats(9)))
            .expect_err("too many seats");
        assert_eq!((error.status, error.kind), (0, ApiErrorKind::Invalid));

        let error = block_on(api.parcels().search(&SearchQuery::new().with_max_weight(0.0)))
            .expect_err("weight limit");
        assert_eq!((error.status, error.kind), (0, ApiErrorKind::Invalid));

        assert!(client.recorded_requests().is_empty());
    }

    #[test]
    fn transport_and_decode_failures_are_normalized() {
        let client = Arc::new(RecordingHttpClient::with_outcome(Err(HttpError::timeout(
            "request timeout",
        ))));
        let error = block_on(api(&client).parcels().list()).expect_err("timeout");
        assert_eq!((error.status, error.kind), (0, ApiErrorKind::Network));
        assert_eq!(error.message, "request timeout");

        let client = Arc::new(RecordingHttpClient::responding(200, r#"{"rides":[]}"#));
        let error = block_on(api(&client).rides().list()).expect_err("wrong shape");
        assert_eq!((error.status, error.kind), (200, ApiErrorKind::Decode));
        assert!(error.message.starts_with("failed to decode response: "));
    }

    fn block_on<F>(future: F) -> F::Output
    where
        F: Future,
    {
        let waker = noop_waker();
        let mut context = Context::from_waker(&waker);
        let mut future = std::pin::pin!(future);

        loop {
            match future.as_mut().poll(&mut context) {
                Poll::Ready(output) => return output,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        // SAFETY: the vtable functions never dereference the data pointer.
        unsafe { Waker::from_raw(noop_raw_waker()) }
    }

    fn noop_raw_waker() -> RawWaker {
        RawWaker::new(std::ptr::null(), &NOOP_WAKER_VTABLE)
    }

    unsafe fn noop_clone(_: *const ()) -> RawWaker {
        noop_raw_waker()
    }

    unsafe fn noop(_: *const ()) {}

    static NOOP_WAKER_VTABLE: RawWakerVTable =
        RawWakerVTable::new(noop_clone, noop, noop, noop);
}
