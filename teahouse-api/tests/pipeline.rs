use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::get;
use serde_json::{json, Value};

use teahouse_api::client::ApiClient;
use teahouse_api::client::error::RequestError;
use teahouse_api::client::auth::{Login, Register, Logout, RetrieveMe, CheckUsername, Health};
use teahouse_api::client::users::{QueryUsers, UpdateRole, DeleteUser};
use teahouse_api::client::products::{
    QueryProducts,
    RetrieveProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
};
use teahouse_api::client::categories::{
    QueryCategories,
    RetrieveCategory,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
};
use teahouse_api::client::cart::{RetrieveCart, AddToCart, UpdateCartItem, RemoveFromCart, ClearCart};
use teahouse_api::client::orders::{
    QueryOrders,
    RetrieveOrder,
    CreateOrder,
    UpdateOrderStatus,
    CancelOrder,
    DeleteOrder,
};
use teahouse_api::client::stats::RetrieveStatistics;
use teahouse_api::client::recommendation::Recommend;
use teahouse_api::client::regions::{
    QueryRegions,
    RetrieveRegion,
    RecommendRegion,
    QueryRegionProducts,
    SearchRegionProducts,
};
use teahouse_api::products::ProductBody;
use teahouse_api::categories::CategoryBody;
use teahouse_lib::{Navigator, Role, Session, SessionStore};

type Seen = Arc<Mutex<Vec<(&'static str, Option<String>)>>>;

#[derive(Default)]
struct Recorder {
    location: Mutex<Option<String>>,
    visited: Mutex<Vec<String>>,
}

impl Recorder {
    fn at(path: &str) -> Arc<Self> {
        Arc::new(Recorder {
            location: Mutex::new(Some(path.to_owned())),
            visited: Mutex::new(Vec::new()),
        })
    }

    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for Recorder {
    fn location(&self) -> Option<String> {
        self.location.lock().unwrap().clone()
    }

    fn navigate(&self, path: &str) {
        *self.location.lock().unwrap() = Some(path.to_owned());
        self.visited.lock().unwrap().push(path.to_owned());
    }
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers.get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_owned())
}

async fn orders(State(seen): State<Seen>, headers: HeaderMap) -> (StatusCode, &'static str) {
    seen.lock().unwrap().push(("/orders", auth_header(&headers)));

    (StatusCode::UNAUTHORIZED, "token expired")
}

async fn products(State(seen): State<Seen>, headers: HeaderMap) -> (StatusCode, &'static str) {
    seen.lock().unwrap().push(("/products", auth_header(&headers)));

    (StatusCode::OK, "[]")
}

async fn cart(State(seen): State<Seen>, headers: HeaderMap) -> (StatusCode, &'static str) {
    seen.lock().unwrap().push(("/cart", auth_header(&headers)));

    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn serve() -> (SocketAddr, Seen) {
    let seen = Seen::default();
    let app = axum::Router::new()
        .route("/api/orders", get(orders))
        .route("/api/products", get(products))
        .route("/api/cart", get(cart))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, seen)
}

fn signed_in(token: &str) -> Arc<SessionStore> {
    let store = SessionStore::memory();
    store.establish(&Session {
        token: Some(token.to_owned()),
        user_id: Some("7".into()),
        username: Some("mei".into()),
        role: Some(Role::User),
        current_user: Some(r#"{"userId":7,"username":"mei","role":"user"}"#.into()),
    }).unwrap();

    Arc::new(store)
}

fn client(addr: SocketAddr, session: Arc<SessionStore>, navigator: Arc<Recorder>) -> ApiClient {
    let mut builder = ApiClient::builder();
    builder.base_url(format!("http://{}/api", addr))
        .session(session)
        .navigator(navigator);

    builder.build().unwrap()
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_to_login() {
    let (addr, seen) = serve().await;
    let session = signed_in("abc");
    let navigator = Recorder::at("/customer");
    let client = client(addr, session.clone(), navigator.clone());

    let err = QueryOrders::new().send(&client).await.unwrap_err();

    match err {
        RequestError::AuthExpired { body } => assert_eq!(body, "token expired"),
        other => panic!("unexpected error: {:?}", other),
    }

    assert_eq!(
        *seen.lock().unwrap(),
        vec![("/orders", Some("Bearer abc".to_owned()))]
    );
    assert!(session.current().is_empty());
    assert_eq!(navigator.visited(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn anonymous_requests_carry_no_authorization() {
    let (addr, seen) = serve().await;
    let navigator = Recorder::at("/login");
    let client = client(addr, Arc::new(SessionStore::memory()), navigator.clone());

    let list = QueryProducts::new().send(&client).await.unwrap();

    assert!(list.is_empty());
    assert_eq!(*seen.lock().unwrap(), vec![("/products", None)]);
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn unauthorized_at_login_stays_put() {
    let (addr, _seen) = serve().await;
    let session = signed_in("abc");
    let navigator = Recorder::at("/login");
    let client = client(addr, session.clone(), navigator.clone());

    let err = QueryOrders::new().send(&client).await.unwrap_err();

    assert!(err.is_auth_expired());
    assert!(session.current().is_empty());
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn server_errors_keep_the_session() {
    let (addr, _seen) = serve().await;
    let session = signed_in("abc");
    let navigator = Recorder::at("/customer");
    let client = client(addr, session.clone(), navigator.clone());

    let err = RetrieveCart::new().send(&client).await.unwrap_err();

    match err {
        RequestError::Http { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "boom");
        },
        other => panic!("unexpected error: {:?}", other),
    }

    assert_eq!(session.token().as_deref(), Some("abc"));
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = signed_in("abc");
    let navigator = Recorder::at("/customer");
    let client = client(addr, session.clone(), navigator.clone());

    let err = QueryProducts::new().send(&client).await.unwrap_err();

    assert!(matches!(err, RequestError::Network(_)));
    assert_eq!(session.token().as_deref(), Some("abc"));
    assert!(navigator.visited().is_empty());
}

type Calls = Arc<Mutex<Vec<(String, String, Value)>>>;

const LISTS: [&str; 8] = [
    "/api/admin/users",
    "/api/products",
    "/api/categories",
    "/api/orders",
    "/api/regions",
    "/api/regions/search",
    "/api/regions/jiangnan/products",
    "/api/regions/jiangnan/featured-products",
];

// decodes as every single record payload
const RECORD: &str = r#"{"id":1,"name":"oolong","code":"jiangnan","success":true}"#;

async fn record(State(calls): State<Calls>, method: Method, uri: Uri, body: String) -> (StatusCode, &'static str) {
    let path = uri.path_and_query()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_default();
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);

    let reply = if uri.path().starts_with("/api/auth/check-user/") {
        "true"
    } else if method == Method::GET && LISTS.contains(&uri.path()) {
        "[]"
    } else {
        RECORD
    };

    calls.lock().unwrap().push((method.to_string(), path, body));

    (StatusCode::OK, reply)
}

async fn recorder() -> (ApiClient, Calls) {
    let calls = Calls::default();
    let app = axum::Router::new()
        .fallback(record)
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = client(addr, Arc::new(SessionStore::memory()), Recorder::at("/customer"));

    (client, calls)
}

fn call(method: &str, path: &str, body: Value) -> (String, String, Value) {
    (method.to_owned(), path.to_owned(), body)
}

#[tokio::test]
async fn every_operation_hits_its_endpoint() {
    let (client, calls) = recorder().await;

    Login::new("mei", "pw").send(&client).await.unwrap();
    Login::new("root", "pw").admin(true).send(&client).await.unwrap();

    let mut register = Register::new("mei", "pw");
    register.email("mei@tea.house");
    register.send(&client).await.unwrap();

    Logout::new().send(&client).await.unwrap();
    RetrieveMe::new().send(&client).await.unwrap();
    assert!(CheckUsername::new("mei lin").send(&client).await.unwrap());
    Health::new().send(&client).await.unwrap();

    QueryUsers::new().send(&client).await.unwrap();
    UpdateRole::new(4, "ADMIN").send(&client).await.unwrap();
    DeleteUser::id(4).send(&client).await.unwrap();

    QueryProducts::new().send(&client).await.unwrap();
    RetrieveProduct::id(5).send(&client).await.unwrap();
    CreateProduct::new(ProductBody {
        name: Some("oolong".into()),
        price: Some(12.5),
        ..ProductBody::default()
    }).send(&client).await.unwrap();
    UpdateProduct::new(5, ProductBody {
        available: Some(false),
        ..ProductBody::default()
    }).send(&client).await.unwrap();
    DeleteProduct::id(5).send(&client).await.unwrap();

    QueryCategories::new().send(&client).await.unwrap();
    RetrieveCategory::id(2).send(&client).await.unwrap();
    CreateCategory::new(CategoryBody {
        name: Some("green".into()),
        description: None,
    }).send(&client).await.unwrap();
    UpdateCategory::new(2, CategoryBody {
        name: None,
        description: Some("leafy".into()),
    }).send(&client).await.unwrap();
    DeleteCategory::id(2).send(&client).await.unwrap();

    RetrieveCart::new().send(&client).await.unwrap();
    let mut add = AddToCart::new(5);
    add.quantity(2);
    add.send(&client).await.unwrap();
    UpdateCartItem::new(9, 3).send(&client).await.unwrap();
    RemoveFromCart::item(9).send(&client).await.unwrap();
    ClearCart::new().send(&client).await.unwrap();

    QueryOrders::new().send(&client).await.unwrap();
    RetrieveOrder::id(7).send(&client).await.unwrap();
    let mut order = CreateOrder::new();
    order.notes("no sugar");
    order.send(&client).await.unwrap();
    UpdateOrderStatus::new(7, "COMPLETED").send(&client).await.unwrap();
    CancelOrder::id(7).send(&client).await.unwrap();
    DeleteOrder::id(7).send(&client).await.unwrap();

    RetrieveStatistics::new().send(&client).await.unwrap();

    let mut recommend = Recommend::new();
    recommend.mood("calm");
    recommend.send(&client).await.unwrap();

    QueryRegions::new().send(&client).await.unwrap();
    RetrieveRegion::code("jiangnan").send(&client).await.unwrap();
    RecommendRegion::mock("jiangnan").send(&client).await.unwrap();
    QueryRegionProducts::code("jiangnan").send(&client).await.unwrap();
    let mut featured = QueryRegionProducts::code("jiangnan");
    featured.featured(true);
    featured.send(&client).await.unwrap();
    let mut search = SearchRegionProducts::keyword("green");
    search.region("jiangnan");
    search.send(&client).await.unwrap();

    let expected = vec![
        call("POST", "/api/auth/login", json!({"username": "mei", "password": "pw"})),
        call("POST", "/api/auth/admin/login", json!({"username": "root", "password": "pw"})),
        call("POST", "/api/auth/register", json!({"username": "mei", "password": "pw", "email": "mei@tea.house"})),
        call("POST", "/api/auth/logout", Value::Null),
        call("GET", "/api/auth/me", Value::Null),
        call("GET", "/api/auth/check-user/mei%20lin", Value::Null),
        call("GET", "/api/auth/health", Value::Null),
        call("GET", "/api/admin/users", Value::Null),
        call("PUT", "/api/admin/users/4/role", json!({"role": "ADMIN"})),
        call("DELETE", "/api/admin/users/4", Value::Null),
        call("GET", "/api/products", Value::Null),
        call("GET", "/api/products/5", Value::Null),
        call("POST", "/api/products", json!({"name": "oolong", "price": 12.5})),
        call("PUT", "/api/products/5", json!({"available": false})),
        call("DELETE", "/api/products/5", Value::Null),
        call("GET", "/api/categories", Value::Null),
        call("GET", "/api/categories/2", Value::Null),
        call("POST", "/api/categories", json!({"name": "green"})),
        call("PUT", "/api/categories/2", json!({"description": "leafy"})),
        call("DELETE", "/api/categories/2", Value::Null),
        call("GET", "/api/cart", Value::Null),
        call("POST", "/api/cart/add", json!({"productId": 5, "quantity": 2})),
        call("PUT", "/api/cart/items/9", json!({"quantity": 3})),
        call("DELETE", "/api/cart/items/9", Value::Null),
        call("POST", "/api/cart/clear", Value::Null),
        call("GET", "/api/orders", Value::Null),
        call("GET", "/api/orders/7", Value::Null),
        call("POST", "/api/orders", json!({"customerNotes": "no sugar"})),
        call("PUT", "/api/orders/7/status", json!({"status": "COMPLETED"})),
        call("PUT", "/api/orders/7/cancel", Value::Null),
        call("DELETE", "/api/orders/7", Value::Null),
        call("GET", "/api/admin/statistics", Value::Null),
        call("POST", "/api/recommendation", json!({"mood": "calm"})),
        call("GET", "/api/regions", Value::Null),
        call("GET", "/api/regions/jiangnan", Value::Null),
        call("POST", "/api/regions/recommendation", json!({"useMock": true, "mockRegionCode": "jiangnan"})),
        call("GET", "/api/regions/jiangnan/products", Value::Null),
        call("GET", "/api/regions/jiangnan/featured-products", Value::Null),
        call("GET", "/api/regions/search?keyword=green&regionCode=jiangnan", Value::Null),
    ];

    let seen = calls.lock().unwrap().clone();

    assert_eq!(seen.len(), expected.len());

    for (seen, expected) in seen.iter().zip(expected.iter()) {
        assert_eq!(seen, expected);
    }
}

#[tokio::test]
async fn dot_segments_never_leave_the_client() {
    let (client, calls) = recorder().await;

    for username in [".", ".."] {
        match CheckUsername::new(username).send(&client).await {
            Err(RequestError::PathSegment(value)) => assert_eq!(value, username),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    assert!(matches!(
        RetrieveRegion::code("..").send(&client).await,
        Err(RequestError::PathSegment(_))
    ));
    assert!(calls.lock().unwrap().is_empty());

    CheckUsername::new("mei.lin").send(&client).await.unwrap();
    CheckUsername::new("../admin").send(&client).await.unwrap();

    let paths: Vec<String> = calls.lock().unwrap()
        .iter()
        .map(|(_, path, _)| path.clone())
        .collect();

    assert_eq!(paths, vec![
        "/api/auth/check-user/mei.lin".to_owned(),
        "/api/auth/check-user/..%2Fadmin".to_owned(),
    ]);
}

#[tokio::test]
async fn slow_server_times_out_as_a_network_error() {
    let app = axum::Router::new()
        .route("/api/products", get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;

            "[]"
        }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let session = signed_in("abc");
    let navigator = Recorder::at("/customer");
    let mut builder = ApiClient::builder();
    builder.base_url(format!("http://{}/api", addr))
        .timeout(Duration::from_millis(200))
        .session(session.clone())
        .navigator(navigator.clone());

    let client = builder.build().unwrap();

    match QueryProducts::new().send(&client).await {
        Err(RequestError::Network(err)) => assert!(err.is_timeout()),
        other => panic!("unexpected result: {:?}", other),
    }

    assert_eq!(session.token().as_deref(), Some("abc"));
    assert!(navigator.visited().is_empty());
}

async fn echo_agent(headers: HeaderMap) -> String {
    headers.get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

#[tokio::test]
async fn user_agent_is_sent_with_every_request() {
    let app = axum::Router::new()
        .route("/api/auth/health", get(echo_agent));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = client(addr, Arc::new(SessionStore::memory()), Recorder::at("/"));
    let agent = Health::new().send(&client).await.unwrap();

    match agent {
        Some(Value::String(agent)) => assert!(agent.starts_with("teahouse-api-client/")),
        other => panic!("unexpected agent: {:?}", other),
    }

    let mut builder = ApiClient::builder();
    builder.base_url(format!("http://{}/api", addr))
        .user_agent("teahouse/9.9.9");

    let client = builder.build().unwrap();

    assert_eq!(
        Health::new().send(&client).await.unwrap(),
        Some(Value::String("teahouse/9.9.9".into()))
    );
}
