use meal_finder::database::{CacheMode, MealCache};
use meal_finder::food::api::spoonacular::SpoonacularClient;
use meal_finder::food::api::translation::MyMemoryTranslator;
use meal_finder::food::config::{SpoonacularConfig, TranslationConfig};
use meal_finder::food::{FindOutcome, MealFinder, MealSource, NutrientValue};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    server: MockServer,
    dir: TempDir,
    client: SpoonacularClient,
    translator: MyMemoryTranslator,
}

impl Fixture {
    async fn new() -> Self {
        let server = MockServer::start().await;
        let client = SpoonacularClient::new(SpoonacularConfig::new("test-key").with_base_url(server.uri()));
        let translator = MyMemoryTranslator::new(TranslationConfig {
            base_url: server.uri(),
            ..TranslationConfig::default()
        });
        Self {
            server,
            dir: TempDir::new().unwrap(),
            client,
            translator,
        }
    }

    async fn cache(&self, mode: CacheMode) -> MealCache {
        let cache = MealCache::new(self.dir.path().join("meals.db"), mode);
        cache.initialize().await.unwrap();
        cache
    }

    async fn mount_translation(&self) {
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("q", "eggplant"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseData": {"translatedText": "bakłażan"},
                "responseStatus": 200
            })))
            .mount(&self.server)
            .await;
    }

    async fn mount_search(&self, results: serde_json::Value, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/recipes/complexSearch"))
            .and(query_param("number", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
            .expect(expected_calls)
            .mount(&self.server)
            .await;
    }

    async fn mount_detail(&self, id: i64, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/recipes/{}/information", id)))
            .and(query_param("includeNutrition", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

fn feta_detail() -> serde_json::Value {
    json!({
        "id": 1,
        "title": "Test Meal",
        "image": "test.jpg",
        "extendedIngredients": [{"name": "feta"}, {"name": "eggplant"}],
        "nutrition": {"nutrients": [
            {"name": "Protein", "amount": 10, "unit": "g"},
            {"name": "Carbohydrates", "amount": 20, "unit": "g"},
            {"name": "Calories", "amount": 200, "unit": "kcal"}
        ]}
    })
}

#[tokio::test]
async fn test_find_enriches_and_renders_page() {
    let fixture = Fixture::new().await;
    fixture.mount_translation().await;
    fixture.mount_search(json!([{"id": 1, "title": "Test Meal"}]), 1).await;
    fixture.mount_detail(1, feta_detail()).await;

    let cache = fixture.cache(CacheMode::ReadWrite).await;
    let finder = MealFinder::new(&fixture.client, &fixture.translator, &cache, fixture.dir.path());

    let outcome = finder.find(["feta"], ["potato"]).await;
    let FindOutcome::Rendered { page, meals, source, written } = outcome else {
        panic!("expected a rendered page");
    };

    assert_eq!(source, MealSource::Api);
    assert!(written);
    assert_eq!(page, fixture.dir.path().join("feta.html"));
    assert_eq!(meals.len(), 1);
    assert_eq!(meals[0].ingredients_present, vec!["feta"]);
    assert_eq!(meals[0].missing_ingredients, vec!["bakłażan (eggplant)"]);
    assert_eq!(meals[0].nutrition.carbs, NutrientValue::Amount(20.0));
    assert_eq!(meals[0].nutrition.proteins, NutrientValue::Amount(10.0));
    assert_eq!(meals[0].nutrition.calories, NutrientValue::Amount(200.0));

    let html = std::fs::read_to_string(&page).unwrap();
    assert!(html.contains("<h2>Test Meal</h2>"));
    assert!(html.contains("bakłażan (eggplant)"));
}

#[tokio::test]
async fn test_second_run_is_served_from_cache() {
    let fixture = Fixture::new().await;
    fixture.mount_translation().await;
    // Only the first run may reach the search endpoint
    fixture.mount_search(json!([{"id": 1}]), 1).await;
    fixture.mount_detail(1, feta_detail()).await;

    let cache = fixture.cache(CacheMode::ReadWrite).await;
    let finder = MealFinder::new(&fixture.client, &fixture.translator, &cache, fixture.dir.path());

    let first = finder.find(["feta"], ["potato"]).await;
    let second = finder.find(["Feta"], ["potato"]).await;

    match (first, second) {
        (
            FindOutcome::Rendered { meals: fetched, source: MealSource::Api, .. },
            FindOutcome::Rendered { meals: cached, source: MealSource::Cache, .. },
        ) => assert_eq!(fetched, cached),
        other => panic!("unexpected outcomes: {:?}", other),
    }
}

#[tokio::test]
async fn test_read_only_cache_refetches_every_run() {
    let fixture = Fixture::new().await;
    fixture.mount_translation().await;
    fixture.mount_search(json!([{"id": 1}]), 2).await;
    fixture.mount_detail(1, feta_detail()).await;

    let cache = fixture.cache(CacheMode::ReadOnly).await;
    let finder = MealFinder::new(&fixture.client, &fixture.translator, &cache, fixture.dir.path());

    for _ in 0..2 {
        let outcome = finder.find(["feta"], ["potato"]).await;
        assert!(matches!(outcome, FindOutcome::Rendered { source: MealSource::Api, .. }));
    }
}

#[tokio::test]
async fn test_conflicting_query_does_nothing() {
    let fixture = Fixture::new().await;
    fixture.mount_search(json!([]), 0).await;

    let cache = fixture.cache(CacheMode::ReadWrite).await;
    let finder = MealFinder::new(&fixture.client, &fixture.translator, &cache, fixture.dir.path());

    let outcome = finder.find(["ham", "potato"], ["potato"]).await;
    assert_eq!(
        outcome,
        FindOutcome::Rejected {
            conflicts: vec!["potato".to_string()]
        }
    );
    assert!(!fixture.dir.path().join("ham_potato.html").exists());
}

#[tokio::test]
async fn test_meals_without_image_are_dropped() {
    let fixture = Fixture::new().await;
    fixture.mount_translation().await;
    fixture.mount_search(json!([{"id": 1}, {"id": 2}, {"id": 3}]), 1).await;
    fixture.mount_detail(1, feta_detail()).await;
    fixture
        .mount_detail(2, json!({"id": 2, "title": "No Picture", "extendedIngredients": [{"name": "feta"}]}))
        .await;
    // id 3 has no mock, so its detail request fails with 404

    let cache = fixture.cache(CacheMode::ReadWrite).await;
    let finder = MealFinder::new(&fixture.client, &fixture.translator, &cache, fixture.dir.path());

    match finder.find(["feta"], Vec::<String>::new()).await {
        FindOutcome::Rendered { meals, .. } => {
            assert_eq!(meals.len(), 1);
            assert_eq!(meals[0].title, "Test Meal");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_api_renders_empty_page() {
    let dir = TempDir::new().unwrap();
    let client = SpoonacularClient::new(
        SpoonacularConfig::new("test-key").with_base_url("http://127.0.0.1:9"),
    );
    let translator = MyMemoryTranslator::new(TranslationConfig::default());
    let cache = MealCache::new(dir.path().join("meals.db"), CacheMode::ReadWrite);
    cache.initialize().await.unwrap();
    let finder = MealFinder::new(&client, &translator, &cache, dir.path());

    match finder.find(["ham", "chicken", "onion"], ["potato"]).await {
        FindOutcome::Rendered { page, meals, source, written } => {
            assert!(meals.is_empty());
            assert_eq!(source, MealSource::Api);
            assert!(written);
            assert_eq!(page, dir.path().join("chicken_ham_onion.html"));
            let html = std::fs::read_to_string(page).unwrap();
            assert!(html.ends_with("<body></body></html>"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}
