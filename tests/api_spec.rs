use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use flockbook::api::{create_router, AppState};
use flockbook::db::Database;
use flockbook::models::*;
use flockbook::store::SheepStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn herd() -> Vec<Sheep> {
    let sheep = |id: &str, tag: &str, breed: &str, status: SheepStatus| Sheep {
        id: id.to_string(),
        tag: tag.to_string(),
        breed: breed.to_string(),
        dob: date(2022, 8, 14),
        gender: Gender::Female,
        status,
        notes: None,
    };
    vec![
        sheep("1", "A101", "Dorper", SheepStatus::Healthy),
        sheep("2", "A102", "Dorper", SheepStatus::Sick),
        sheep("3", "B201", "Merino", SheepStatus::Sold),
        sheep("4", "B202", "Merino", SheepStatus::Dead),
    ]
}

fn setup_with(sheep: Vec<Sheep>) -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let store = SheepStore::new(db);
    store.adopt_fixture(sheep);
    let state = AppState::new(
        store,
        vec![FeedStockLevel {
            category: "Lambs".to_string(),
            stock_kg: 40.0,
        }],
    );
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn setup() -> TestServer {
    setup_with(herd())
}

fn new_sheep(tag: &str) -> NewSheep {
    NewSheep {
        tag: tag.to_string(),
        breed: "Damara".to_string(),
        dob: date(2023, 7, 18),
        gender: Gender::Male,
        status: SheepStatus::Healthy,
        notes: None,
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!({ "status": "ok" }));
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn counts_statuses_and_lists_feed_stock() {
        let server = setup();

        let summary: DashboardSummary = server.get("/api/v1/dashboard").await.json();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.counts.healthy, 1);
        assert_eq!(summary.counts.sick, 1);
        assert_eq!(summary.counts.sold, 1);
        assert_eq!(summary.counts.dead, 1);
        assert_eq!(summary.feed_stock.len(), 1);
        assert!(summary.load_error.is_none());
    }

    #[tokio::test]
    async fn surfaces_fixture_load_error() {
        let db = Database::open_memory().expect("Failed to create database");
        db.migrate().expect("Failed to migrate");
        let store = SheepStore::new(db);
        store.record_load_error("Failed to load sheep data: connection refused");
        let server = TestServer::new(create_router(AppState::new(store, vec![])))
            .expect("Failed to create test server");

        let summary: DashboardSummary = server.get("/api/v1/dashboard").await.json();
        assert_eq!(summary.total, 0);
        assert_eq!(
            summary.load_error.as_deref(),
            Some("Failed to load sheep data: connection refused")
        );
    }
}

mod sheep_records {
    use super::*;

    #[tokio::test]
    async fn lists_records_in_order() {
        let server = setup();
        let response = server.get("/api/v1/sheep").await;
        response.assert_status_ok();

        let sheep: Vec<Sheep> = response.json();
        let ids: Vec<_> = sheep.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn creates_a_record_with_a_new_id() {
        let server = setup();

        let response = server.post("/api/v1/sheep").json(&new_sheep("C301")).await;
        response.assert_status(StatusCode::CREATED);
        let created: Sheep = response.json();
        assert_eq!(created.tag, "C301");
        assert!(!["1", "2", "3", "4"].contains(&created.id.as_str()));

        let all: Vec<Sheep> = server.get("/api/v1/sheep").await.json();
        assert_eq!(all.len(), 5);
        assert_eq!(all.last(), Some(&created));
    }

    #[tokio::test]
    async fn status_defaults_to_healthy() {
        let server = setup();

        let response = server
            .post("/api/v1/sheep")
            .json(&serde_json::json!({
                "tag": "C302",
                "breed": "Dorper",
                "dob": "2024-02-01",
                "gender": "Female"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Sheep>().status, SheepStatus::Healthy);
    }

    #[tokio::test]
    async fn rejects_unknown_status_values() {
        let server = setup();

        let response = server
            .post("/api/v1/sheep")
            .json(&serde_json::json!({
                "tag": "C303",
                "breed": "Dorper",
                "dob": "2024-02-01",
                "gender": "Female",
                "status": "Missing"
            }))
            .await;

        assert!(response.status_code().is_client_error());
    }

    #[tokio::test]
    async fn requires_a_date_of_birth() {
        let server = setup();

        let response = server
            .post("/api/v1/sheep")
            .json(&serde_json::json!({
                "tag": "C304",
                "breed": "Dorper",
                "dob": "",
                "gender": "Male"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let all: Vec<Sheep> = server.get("/api/v1/sheep").await.json();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn gets_a_record_by_id() {
        let server = setup();
        let sheep: Sheep = server.get("/api/v1/sheep/2").await.json();
        assert_eq!(sheep.tag, "A102");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let server = setup();
        let response = server.get("/api/v1/sheep/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_text("Sheep not found with ID: nope");
    }

    #[tokio::test]
    async fn update_replaces_fields_but_keeps_id() {
        let server = setup();

        let response = server
            .put("/api/v1/sheep/1")
            .json(&UpdateSheepInput {
                tag: "A101-R".to_string(),
                breed: "Dorper".to_string(),
                dob: date(2022, 8, 14),
                gender: Gender::Female,
                status: SheepStatus::Sick,
                notes: Some("Off her feed".to_string()),
            })
            .await;

        response.assert_status_ok();
        let updated: Sheep = response.json();
        assert_eq!(updated.id, "1");
        assert_eq!(updated.status, SheepStatus::Sick);

        let all: Vec<Sheep> = server.get("/api/v1/sheep").await.json();
        assert_eq!(all[0], updated);
        assert_eq!(&all[1..], &herd()[1..]);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let server = setup();

        let response = server
            .put("/api/v1/sheep/nope")
            .json(&UpdateSheepInput {
                tag: "X".to_string(),
                breed: "Dorper".to_string(),
                dob: date(2022, 8, 14),
                gender: Gender::Female,
                status: SheepStatus::Healthy,
                notes: None,
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let all: Vec<Sheep> = server.get("/api/v1/sheep").await.json();
        assert_eq!(all, herd());
    }

    #[tokio::test]
    async fn delete_removes_only_that_record() {
        let server = setup();

        server
            .delete("/api/v1/sheep/2")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let all: Vec<Sheep> = server.get("/api/v1/sheep").await.json();
        let ids: Vec<_> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);

        server
            .delete("/api/v1/sheep/2")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod herd_health {
    use super::*;

    #[tokio::test]
    async fn filters_by_status() {
        let server = setup();

        let overview: HealthOverview = server
            .get("/api/v1/herd/health")
            .add_query_param("status", "Sick")
            .await
            .json();

        let tags: Vec<_> = overview.sheep.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["A102"]);
        assert_eq!(overview.counts.total(), 4);
    }

    #[tokio::test]
    async fn searches_tags_case_insensitively() {
        let server = setup();

        let overview: HealthOverview = server
            .get("/api/v1/herd/health")
            .add_query_param("search", "b2")
            .await
            .json();

        let tags: Vec<_> = overview.sheep.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["B201", "B202"]);
    }

    #[tokio::test]
    async fn empty_result_is_not_an_error() {
        let server = setup();

        let response = server
            .get("/api/v1/herd/health")
            .add_query_param("status", "Healthy")
            .add_query_param("search", "zzz")
            .await;

        response.assert_status_ok();
        assert!(response.json::<HealthOverview>().sheep.is_empty());
    }
}

mod feed_plan {
    use super::*;

    fn rams(stock_kg: f64) -> FeedEntry {
        FeedEntry {
            category: FeedCategory::Rams,
            feed_type: "Oat Hay".to_string(),
            ration_per_animal_kg: 2.0,
            frequency: FeedFrequency::OnceDaily,
            head_count: 4,
            stock_kg,
            cost_per_kg: 3.0,
        }
    }

    #[tokio::test]
    async fn starts_with_default_entries_and_derived_figures() {
        let server = setup();

        let entries: Vec<FeedEntryView> = server.get("/api/v1/feed").await.json();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].entry.feed_type, "Starter Pellets");
        assert_eq!(entries[0].daily_usage_kg, 15.0);
        assert_eq!(entries[0].days_remaining, 2);
        assert_eq!(entries[0].refill_cost, 315.0);
    }

    #[tokio::test]
    async fn frequency_uses_display_names_on_the_wire() {
        let server = setup();

        let entries: serde_json::Value = server.get("/api/v1/feed").await.json();
        assert_eq!(entries[0]["frequency"], "Twice Daily");
        assert_eq!(entries[2]["frequency"], "Every 2 Days");
    }

    #[tokio::test]
    async fn adds_an_entry() {
        let server = setup();

        let response = server.post("/api/v1/feed").json(&rams(80.0)).await;
        response.assert_status(StatusCode::CREATED);

        let view: FeedEntryView = response.json();
        assert_eq!(view.index, 3);
        assert_eq!(view.daily_usage_kg, 8.0);
        assert_eq!(view.days_remaining, 10);
    }

    #[tokio::test]
    async fn rejects_entries_without_animals() {
        let server = setup();

        let response = server
            .post("/api/v1/feed")
            .json(&FeedEntry {
                head_count: 0,
                ..rams(80.0)
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let entries: Vec<FeedEntryView> = server.get("/api/v1/feed").await.json();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn rejects_negative_stock() {
        let server = setup();

        let response = server.put("/api/v1/feed/0").json(&rams(-1.0)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Invalid stock_kg: must not be negative");
    }

    #[tokio::test]
    async fn edits_and_deletes_by_position() {
        let server = setup();

        let edited: FeedEntryView = server.put("/api/v1/feed/1").json(&rams(12.0)).await.json();
        assert_eq!(edited.index, 1);
        assert_eq!(edited.entry.category, FeedCategory::Rams);

        server
            .delete("/api/v1/feed/0")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let entries: Vec<FeedEntryView> = server.get("/api/v1/feed").await.json();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry.feed_type, "Oat Hay");
        assert_eq!(entries[0].index, 0);
    }

    #[tokio::test]
    async fn out_of_range_index_is_not_found() {
        let server = setup();

        server
            .put("/api/v1/feed/7")
            .json(&rams(1.0))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/api/v1/feed/7")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/v1/feed/7/projection")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn projects_fourteen_days() {
        let server = setup();

        let projection: FeedProjection = server.get("/api/v1/feed/0/projection").await.json();

        assert_eq!(projection.labels.len(), 14);
        assert_eq!(projection.labels[0], "Day 1");
        assert_eq!(projection.values.len(), 14);
        assert_eq!(&projection.values[..3], &[25.0, 10.0, 0.0]);
        assert!(projection.values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[tokio::test]
    async fn renders_a_text_chart() {
        let server = setup();

        let response = server.get("/api/v1/feed/2/chart").await;
        response.assert_status_ok();
        let chart = response.text();
        assert!(chart.starts_with("Rams - Feed Stock Projection\n"));
        assert_eq!(chart.lines().count(), 15);
    }
}

mod sale_calculator {
    use super::*;

    #[tokio::test]
    async fn offers_only_sellable_records() {
        let server = setup();

        let available: Vec<Sheep> = server.get("/api/v1/sale/available").await.json();
        let ids: Vec<_> = available.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn quotes_without_changing_status() {
        let server = setup();

        let quote: SaleQuote = server
            .post("/api/v1/sale/quote")
            .json(&SaleInput {
                sheep_id: "1".to_string(),
                weight_kg: 45.0,
                price_per_kg: Some(80.0),
            })
            .await
            .json();

        assert_eq!(quote.value, 3600.0);
        assert_eq!(quote.value_display, "3600.00");

        let sheep: Sheep = server.get("/api/v1/sheep/1").await.json();
        assert_eq!(sheep.status, SheepStatus::Healthy);
    }

    #[tokio::test]
    async fn quote_uses_default_rate() {
        let server = setup();

        let quote: SaleQuote = server
            .post("/api/v1/sale/quote")
            .json(&SaleInput {
                sheep_id: "2".to_string(),
                weight_kg: 10.0,
                price_per_kg: None,
            })
            .await
            .json();

        assert_eq!(quote.price_per_kg, 80.0);
        assert_eq!(quote.value, 800.0);
    }

    #[tokio::test]
    async fn confirm_marks_sold_and_returns_invoice() {
        let server = setup();

        let response = server
            .post("/api/v1/sale/confirm")
            .json(&SaleInput {
                sheep_id: "1".to_string(),
                weight_kg: 45.0,
                price_per_kg: Some(80.0),
            })
            .await;

        response.assert_status_ok();
        let confirmation: SaleConfirmation = response.json();
        assert_eq!(confirmation.invoice.tag, "A101");
        assert_eq!(confirmation.invoice.breed, "Dorper");
        assert_eq!(confirmation.invoice.total_display, "3600.00");
        assert!(confirmation.printable.contains("Total:     R3600.00"));

        let all: Vec<Sheep> = server.get("/api/v1/sheep").await.json();
        assert_eq!(all[0].status, SheepStatus::Sold);
        assert_eq!(&all[1..], &herd()[1..]);

        let available: Vec<Sheep> = server.get("/api/v1/sale/available").await.json();
        assert!(available.iter().all(|s| s.id != "1"));
    }

    #[tokio::test]
    async fn cannot_sell_a_sold_record_twice() {
        let server = setup();

        let response = server
            .post("/api/v1/sale/confirm")
            .json(&SaleInput {
                sheep_id: "3".to_string(),
                weight_kg: 45.0,
                price_per_kg: None,
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn rejects_negative_weight() {
        let server = setup();

        let response = server
            .post("/api/v1/sale/quote")
            .json(&SaleInput {
                sheep_id: "1".to_string(),
                weight_kg: -3.0,
                price_per_kg: None,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_text("Invalid weight_kg: must not be negative");
    }

    #[tokio::test]
    async fn unknown_sheep_is_not_found() {
        let server = setup();

        server
            .post("/api/v1/sale/confirm")
            .json(&SaleInput {
                sheep_id: "nope".to_string(),
                weight_kg: 45.0,
                price_per_kg: None,
            })
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
