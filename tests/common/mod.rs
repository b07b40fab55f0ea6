#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::{TimeZone, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use order_desk::api::auth::{AdminUser, Claims, Session};
use order_desk::api::orders::OrderApi;
use order_desk::error::DeskError;
use order_desk::types::order::{
    Order, OrderItem, OrderStatus, OrderUpdate, OrderUser, PaymentDetails, PaymentStatus,
    ProductRef, ShippingAddress,
};
use reqwest::StatusCode as ClientStatus;
use serde_json::Value;

const TEST_SECRET: &[u8] = b"test-jwt-secret";

pub fn create_token(role: Option<&str>, exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: Some("admin-1".to_string()),
        exp: Some(now + exp_offset_secs),
        iat: Some(now),
        role: role.map(str::to_string),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET)).unwrap()
}

pub fn admin_user() -> AdminUser {
    AdminUser {
        id: "admin-1".to_string(),
        name: "Desk Admin".to_string(),
        email: "admin@musshk.com".to_string(),
        role: "admin".to_string(),
    }
}

pub fn admin_session() -> Session {
    Session::new(create_token(Some("admin"), 3600), Some(admin_user()))
}

pub fn item(name: &str, quantity: u32, price: f64) -> OrderItem {
    OrderItem {
        product: Some(ProductRef {
            name: name.to_string(),
            images: vec![format!("/uploads/{}.jpg", name.to_lowercase().replace(' ', "-"))],
        }),
        name: name.to_string(),
        size: Some("50ml".to_string()),
        quantity,
        price,
    }
}

pub fn order(id: &str, number: &str, customer: &str, items: Vec<OrderItem>) -> Order {
    let created = Utc.with_ymd_and_hms(2025, 6, 4, 10, 0, 0).unwrap();
    let total: f64 = items.iter().map(|i| i.price * f64::from(i.quantity)).sum();
    Order {
        id: id.to_string(),
        order_number: number.to_string(),
        user: Some(OrderUser {
            name: customer.to_string(),
            email: format!("{}@example.com", customer.to_lowercase()),
        }),
        items,
        total_amount: total,
        order_status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: "razorpay".to_string(),
        payment_details: Some(PaymentDetails {
            razorpay_order_id: Some("order_Nd1".to_string()),
            razorpay_payment_id: Some("pay_NdX81bq2KQ7a1z".to_string()),
            razorpay_signature: None,
        }),
        shipping_address: Some(ShippingAddress {
            name: customer.to_string(),
            address: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            pincode: "411001".to_string(),
            country: "India".to_string(),
            phone: "9999999999".to_string(),
        }),
        tracking_number: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn sample_orders() -> Vec<Order> {
    let mut a = order("665f00000000000000000001", "ORD-1001", "Asha", vec![item("Oud Noir", 2, 1499.0)]);
    a.order_status = OrderStatus::Processing;
    a.payment_status = PaymentStatus::Paid;

    let mut b = order(
        "665f00000000000000000002",
        "ORD-1002",
        "Rahul",
        vec![item("Amber Musk", 1, 899.0), item("Rose Attar", 1, 650.0), item("Sandal", 3, 300.0)],
    );
    b.order_status = OrderStatus::Shipped;
    b.tracking_number = Some("AWB900".to_string());

    let mut c = order("665f00000000000000000003", "ORD-1003", "Meera", vec![item("Rose Attar", 1, 650.0)]);
    c.order_status = OrderStatus::Delivered;
    c.payment_status = PaymentStatus::Failed;

    vec![a, b, c]
}

/// In-memory `OrderApi` that applies updates and records every call.
#[derive(Default)]
pub struct RecordingApi {
    pub orders: Mutex<Vec<Order>>,
    pub updates: Mutex<Vec<(String, OrderUpdate, String)>>,
    pub list_calls: Mutex<usize>,
    pub fail_reads: AtomicBool,
    pub fail_updates: AtomicBool,
}

impl RecordingApi {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
            ..Self::default()
        }
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

pub fn apply_update(order: &mut Order, update: &OrderUpdate) {
    match update {
        OrderUpdate::OrderStatus(s) => order.order_status = *s,
        OrderUpdate::PaymentStatus(s) => order.payment_status = *s,
        OrderUpdate::TrackingNumber(t) => order.tracking_number = Some(t.clone()),
    }
}

#[async_trait]
impl OrderApi for RecordingApi {
    async fn list_orders(&self) -> Result<Vec<Order>, DeskError> {
        *self.list_calls.lock().unwrap() += 1;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DeskError::Status {
                status: ClientStatus::INTERNAL_SERVER_ERROR,
            });
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn update_order(
        &self,
        order_id: &str,
        update: &OrderUpdate,
        token: &str,
    ) -> Result<(), DeskError> {
        self.updates
            .lock()
            .unwrap()
            .push((order_id.to_string(), update.clone(), token.to_string()));
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DeskError::Status {
                status: ClientStatus::BAD_GATEWAY,
            });
        }
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| DeskError::Status {
                status: ClientStatus::NOT_FOUND,
            })?;
        apply_update(order, update);
        Ok(())
    }
}

/// State behind the fake order API served over HTTP.
#[derive(Clone, Default)]
pub struct FakeServer {
    pub orders: Arc<Mutex<Vec<Order>>>,
    pub requests: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
    pub fail_reads: Arc<AtomicBool>,
    pub fail_updates: Arc<AtomicBool>,
    pub null_listing: Arc<AtomicBool>,
    pub raw_listing: Arc<Mutex<Option<Value>>>,
}

impl FakeServer {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(Mutex::new(orders)),
            ..Self::default()
        }
    }
}

async fn list_handler(State(state): State<FakeServer>) -> Response {
    if state.fail_reads.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if state.null_listing.load(Ordering::SeqCst) {
        return Json(Value::Null).into_response();
    }
    if let Some(raw) = state.raw_listing.lock().unwrap().clone() {
        return Json(raw).into_response();
    }
    let orders = state.orders.lock().unwrap().clone();
    Json(orders).into_response()
}

async fn update_handler(
    State(state): State<FakeServer>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .requests
        .lock()
        .unwrap()
        .push((id.clone(), auth.clone(), body.clone()));

    if !auth.as_deref().is_some_and(|a| a.starts_with("Bearer ")) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.fail_updates.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let Ok(update) = serde_json::from_value::<OrderUpdate>(body) else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut orders = state.orders.lock().unwrap();
    match orders.iter_mut().find(|o| o.id == id) {
        Some(order) => {
            apply_update(order, &update);
            order.updated_at = Utc::now();
            Json(order.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Spawn the fake API on a random port and return (base_url, handle).
pub async fn spawn_api(state: FakeServer) -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/api", addr);
    let app = Router::new()
        .route("/api/orders", get(list_handler))
        .route("/api/orders/{id}", put(update_handler))
        .with_state(state);
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (base_url, handle)
}
