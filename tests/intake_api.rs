//! HTTP-level tests for the order intake endpoint, driven against an
//! in-memory store double so no database is needed.

use std::sync::{Arc, Mutex};

use actix_web::{test, web, App};
use serde_json::{json, Value};
use uuid::Uuid;

use order_intake::application::intake::OrderIntakeService;
use order_intake::config::{PricingConfig, RateLimitConfig};
use order_intake::domain::errors::IntakeError;
use order_intake::domain::order::{
    CreatedOrder, MenuCatalogEntry, NewOrderRecord, PricedLine, TableRecord,
};
use order_intake::domain::ports::OrderRepository;
use order_intake::handlers;
use order_intake::json_config;

#[derive(Default)]
struct StubRepo {
    menu: Vec<MenuCatalogEntry>,
    tables: Vec<TableRecord>,
    orders: Mutex<Vec<Uuid>>,
    fail_items_insert: bool,
}

impl StubRepo {
    fn with_naan(price: f64) -> Self {
        Self {
            menu: vec![MenuCatalogEntry {
                name: "Butter Naan".to_string(),
                price,
                is_available: true,
            }],
            ..Default::default()
        }
    }
}

impl OrderRepository for StubRepo {
    fn menu_entries(&self, names: &[String]) -> Result<Vec<MenuCatalogEntry>, IntakeError> {
        Ok(self
            .menu
            .iter()
            .filter(|e| names.contains(&e.name))
            .cloned()
            .collect())
    }

    fn find_table(&self, table_number: i32) -> Result<Option<TableRecord>, IntakeError> {
        Ok(self
            .tables
            .iter()
            .find(|t| t.table_number == table_number)
            .cloned())
    }

    fn find_or_create_customer(&self, _phone: &str) -> Result<Uuid, IntakeError> {
        Ok(Uuid::new_v4())
    }

    fn insert_order(&self, _record: &NewOrderRecord) -> Result<CreatedOrder, IntakeError> {
        let id = Uuid::new_v4();
        self.orders.lock().unwrap().push(id);
        Ok(CreatedOrder {
            id,
            order_number: format!("ORD-{id}"),
        })
    }

    fn insert_items(&self, _order_id: Uuid, _items: &[PricedLine]) -> Result<(), IntakeError> {
        if self.fail_items_insert {
            return Err(IntakeError::Storage("items insert failed".to_string()));
        }
        Ok(())
    }

    fn delete_order(&self, order_id: Uuid) -> Result<(), IntakeError> {
        self.orders.lock().unwrap().retain(|id| *id != order_id);
        Ok(())
    }
}

fn intake_service(repo: Arc<StubRepo>) -> Arc<OrderIntakeService> {
    Arc::new(OrderIntakeService::new(
        repo,
        PricingConfig::default(),
        RateLimitConfig::default(),
    ))
}

macro_rules! test_app {
    ($service:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($service))
                .app_data(json_config())
                .service(
                    web::scope("/orders")
                        .route("", web::post().to(handlers::orders::create_order)),
                ),
        )
        .await
    };
}

fn naan_payload(phone: &str) -> Value {
    json!({
        "phone": phone,
        "deliveryType": "takeaway",
        "tableNumber": null,
        "address": null,
        "specialRequests": null,
        "items": [
            { "name": "Butter Naan", "price": 60.0, "quantity": 2, "specialInstructions": null }
        ],
        "subtotal": 120.0,
        "tax": 6.0,
        "deliveryFee": 0.0,
        "total": 126.0
    })
}

#[actix_web::test]
async fn valid_takeaway_order_returns_200_with_receipt() {
    let service = intake_service(Arc::new(StubRepo::with_naan(60.0)));
    let app = test_app!(service);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(naan_payload("+919876543210"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["order"]["total"], json!(126.0));
    assert!(body["order"]["orderNumber"]
        .as_str()
        .unwrap()
        .starts_with("ORD-"));
}

#[actix_web::test]
async fn stale_price_returns_400_without_persisting() {
    let repo = Arc::new(StubRepo::with_naan(70.0));
    let service = intake_service(repo.clone());
    let app = test_app!(service);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(naan_payload("+919876543210"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        json!("Price verification failed. Please refresh and try again.")
    );
    assert!(repo.orders.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn nine_char_delivery_address_fails_validation() {
    let repo = Arc::new(StubRepo::with_naan(60.0));
    let service = intake_service(repo.clone());
    let app = test_app!(service);

    let mut payload = naan_payload("+919876543210");
    payload["deliveryType"] = json!("delivery");
    payload["address"] = json!("short st.");
    payload["deliveryFee"] = json!(50.0);
    payload["total"] = json!(176.0);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    // Rejected at shape validation; the store was never touched.
    assert!(repo.orders.lock().unwrap().is_empty());
}

#[actix_web::test]
async fn inactive_table_is_rejected_with_its_own_message() {
    let mut repo = StubRepo::with_naan(60.0);
    repo.tables.push(TableRecord {
        id: Uuid::new_v4(),
        table_number: 7,
        is_active: false,
    });
    let service = intake_service(Arc::new(repo));
    let app = test_app!(service);

    let mut payload = naan_payload("+919876543210");
    payload["deliveryType"] = json!("dine_in");
    payload["tableNumber"] = json!("7");

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("This table is not currently active"));
}

#[actix_web::test]
async fn eleventh_order_from_one_phone_returns_429() {
    let service = intake_service(Arc::new(StubRepo::with_naan(60.0)));
    let app = test_app!(service);

    for i in 1..=10 {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(naan_payload("+911234567890"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200, "order {i} should be accepted");
    }

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(naan_payload("+911234567890"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);
}

#[actix_web::test]
async fn items_insert_failure_returns_500_and_compensates() {
    let mut repo = StubRepo::with_naan(60.0);
    repo.fail_items_insert = true;
    let repo = Arc::new(repo);
    let service = intake_service(repo.clone());
    let app = test_app!(service);

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(naan_payload("+919876543210"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Failed to create order items"));
    assert!(
        repo.orders.lock().unwrap().is_empty(),
        "the compensating delete must remove the order row"
    );
}

#[actix_web::test]
async fn malformed_json_body_returns_structured_400() {
    let service = intake_service(Arc::new(StubRepo::with_naan(60.0)));
    let app = test_app!(service);

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Invalid request body"));
}

#[actix_web::test]
async fn resubmitting_the_same_cart_creates_two_orders() {
    let repo = Arc::new(StubRepo::with_naan(60.0));
    let service = intake_service(repo.clone());
    let app = test_app!(service);

    let mut numbers = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(naan_payload("+919876543210"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        numbers.push(body["order"]["orderNumber"].as_str().unwrap().to_string());
    }

    assert_ne!(numbers[0], numbers[1]);
    assert_eq!(repo.orders.lock().unwrap().len(), 2);
}
