// 目录服务集成测试
//
// 使用临时 SQLite 数据库验证仓库、缓存与服务层的协作

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use tv_tantrum_backend::database::{CatalogRepository, Database};
use tv_tantrum_backend::models::{
    CategoryFilterConfig, CreateCategoryRequest, CreateResearchRequest, CreateShowRequest, FilterSpec,
    StimulationScoreRange, UpdateCategoryRequest, UpdateShowRequest, ValidationError,
};
use tv_tantrum_backend::services::{CatalogService, QueryCacheConfig};

async fn setup() -> (TempDir, Database, CatalogService) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("catalog.db");
    let database = Database::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
        .await
        .unwrap();

    let config = QueryCacheConfig {
        ttl: Duration::from_secs(60),
        max_capacity: 32,
        retry_count: 0,
        retry_backoff: Duration::from_millis(1),
    };
    let service = CatalogService::new(Arc::new(database.repository().clone()), config, 4);
    (temp_dir, database, service)
}

fn show_request(name: &str, score: i32) -> CreateShowRequest {
    CreateShowRequest {
        name: name.to_string(),
        stimulation_score: score,
        ..Default::default()
    }
}

async fn seed(service: &CatalogService) {
    let mut bluey = show_request("Bluey", 2);
    bluey.age_range = Some("3-7".to_string());
    bluey.themes = Some(vec!["Family".to_string(), "Imagination".to_string()]);
    bluey.interactivity_level = Some("moderate_low".to_string());
    service.create_show(bluey).await.unwrap();

    let mut clues = show_request("Blue's Clues (1996)", 1);
    clues.age_range = Some("2-5".to_string());
    clues.themes = Some(vec!["Problem Solving".to_string()]);
    clues.interactivity_level = Some("High".to_string());
    service.create_show(clues).await.unwrap();

    let mut cocomelon = show_request("Cocomelon", 5);
    cocomelon.age_range = Some("0-3".to_string());
    cocomelon.themes = Some(vec!["Music".to_string(), "Family".to_string()]);
    service.create_show(cocomelon).await.unwrap();
}

#[tokio::test]
async fn test_browse_filters_and_sorts() {
    let (_dir, _db, service) = setup().await;
    seed(&service).await;

    let all = service.list_shows(&FilterSpec::default(), Some("name")).await.unwrap();
    let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Blue's Clues (1996)", "Bluey", "Cocomelon"]);

    let calm = FilterSpec {
        stimulation_score_range: Some(StimulationScoreRange::new(1, 2)),
        themes: vec!["family".to_string()],
        ..Default::default()
    };
    let result = service.list_shows(&calm, None).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Bluey");

    let search = FilterSpec {
        search: Some("blues clues".to_string()),
        ..Default::default()
    };
    let result = service.list_shows(&search, None).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Blue's Clues (1996)");

    let tantrum = FilterSpec {
        tantrum_factor: Some("high".to_string()),
        ..Default::default()
    };
    let result = service.list_shows(&tantrum, None).await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].name, "Cocomelon");
}

#[tokio::test]
async fn test_browse_paginates_after_filtering() {
    let (_dir, _db, service) = setup().await;
    seed(&service).await;

    let page = service
        .browse_shows(&FilterSpec::default(), Some("stimulation-score"), Some(2), 2)
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.shows.len(), 1);
    assert_eq!(page.shows[0].name, "Cocomelon");
}

#[tokio::test]
async fn test_levels_are_canonicalized_on_write() {
    let (_dir, _db, service) = setup().await;
    let mut request = show_request("Puffin Rock", 1);
    request.interactivity_level = Some("medium low".to_string());
    request.dialogue_intensity = Some("Something Else".to_string());
    let show = service.create_show(request).await.unwrap();

    let stored = service.get_show(&show.id).await.unwrap().unwrap();
    assert_eq!(stored.interactivity_level.as_deref(), Some("Moderate-Low"));
    assert_eq!(stored.dialogue_intensity.as_deref(), Some("Something Else"));

    let updated = service
        .update_show(
            &show.id,
            UpdateShowRequest {
                sound_effects_level: Some("HIGH".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.sound_effects_level.as_deref(), Some("High"));
}

#[tokio::test]
async fn test_writes_invalidate_cached_lists() {
    let (_dir, _db, service) = setup().await;
    service.create_show(show_request("Arthur", 2)).await.unwrap();

    let before = service.list_shows(&FilterSpec::default(), None).await.unwrap();
    assert_eq!(before.len(), 1);

    let second = service.create_show(show_request("Daniel Tiger", 1)).await.unwrap();
    let after = service.list_shows(&FilterSpec::default(), None).await.unwrap();
    assert_eq!(after.len(), 2);

    assert!(service.delete_show(&second.id).await.unwrap());
    assert!(!service.delete_show(&second.id).await.unwrap());
    let after_delete = service.list_shows(&FilterSpec::default(), None).await.unwrap();
    assert_eq!(after_delete.len(), 1);
}

#[tokio::test]
async fn test_invalid_show_is_rejected() {
    let (_dir, _db, service) = setup().await;
    let err = service.create_show(show_request("Too Loud", 9)).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::InvalidStimulationScore(9))
    ));
}

#[tokio::test]
async fn test_detail_and_search_hits_track_popularity() {
    let (_dir, _db, service) = setup().await;
    let show = service.create_show(show_request("Bluey", 2)).await.unwrap();

    let detail = service.get_show_detail(&show.id).await.unwrap().unwrap();
    assert_eq!(detail.view_count, Some(1));

    assert!(service.record_search_hit(&show.id).await.unwrap());
    assert!(service.record_view(&show.id).await.unwrap());
    let stored = service.get_show(&show.id).await.unwrap().unwrap();
    assert_eq!(stored.popularity_score(), 2 * 2 + 1);

    assert!(service.get_show_detail("missing").await.unwrap().is_none());
    assert!(!service.record_search_hit("missing").await.unwrap());
}

#[tokio::test]
async fn test_compare_picks_calmest_and_reports_missing() {
    let (_dir, _db, service) = setup().await;
    let loud = service.create_show(show_request("Cocomelon", 5)).await.unwrap();
    let calm = service.create_show(show_request("Puffin Rock", 1)).await.unwrap();

    let ids = vec![loud.id.clone(), calm.id.clone(), "nope".to_string(), loud.id.clone()];
    let comparison = service.compare_shows(&ids).await.unwrap();
    assert_eq!(comparison.shows.len(), 2);
    assert_eq!(comparison.missing_ids, vec!["nope".to_string()]);
    assert_eq!(comparison.calmest_id, Some(calm.id));

    let too_many: Vec<String> = (0..5).map(|i| format!("id-{}", i)).collect();
    let err = service.compare_shows(&too_many).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::TooManyComparedShows(5, 4))
    ));
}

#[tokio::test]
async fn test_themes_are_distinct_and_sorted() {
    let (_dir, _db, service) = setup().await;
    seed(&service).await;

    let themes = service.get_themes().await.unwrap();
    assert_eq!(themes, vec!["Family", "Imagination", "Music", "Problem Solving"]);
}

#[tokio::test]
async fn test_category_resolves_shows_with_saved_filter() {
    let (_dir, _db, service) = setup().await;
    seed(&service).await;

    let category = service
        .create_category(CreateCategoryRequest {
            name: "Calm Picks".to_string(),
            display_order: Some(1),
            filter_config: CategoryFilterConfig {
                filters: FilterSpec {
                    stimulation_score_range: Some(StimulationScoreRange::new(1, 2)),
                    ..Default::default()
                },
                sort_by: Some("stimulation-score".to_string()),
            },
            ..Default::default()
        })
        .await
        .unwrap();

    let shows = service.get_category_shows(&category.id).await.unwrap().unwrap();
    let names: Vec<&str> = shows.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Blue's Clues (1996)", "Bluey"]);

    service
        .update_category(
            &category.id,
            UpdateCategoryRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(service.list_categories(false).await.unwrap().is_empty());
    assert_eq!(service.list_categories(true).await.unwrap().len(), 1);

    assert!(service.get_category_shows("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_research_filtered_by_category() {
    let (_dir, _db, service) = setup().await;
    for (title, category) in [("Pacing study", "Attention"), ("Sleep study", "Sleep")] {
        service
            .create_research(CreateResearchRequest {
                title: title.to_string(),
                category: category.to_string(),
                summary: "summary".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    assert_eq!(service.list_research(None).await.unwrap().len(), 2);
    let attention = service.list_research(Some("attention")).await.unwrap();
    assert_eq!(attention.len(), 1);
    assert_eq!(attention[0].title, "Pacing study");
}

#[tokio::test]
async fn test_statistics_and_repository_counts() {
    let (_dir, database, service) = setup().await;
    seed(&service).await;

    let stats = service.get_statistics().await.unwrap();
    assert_eq!(stats.total_shows, 3);
    assert_eq!(stats.featured_shows, 0);
    let scores: Vec<i32> = stats.score_distribution.iter().map(|b| b.stimulation_score).collect();
    assert_eq!(scores, vec![1, 2, 5]);

    let repository = database.repository();
    assert_eq!(repository.get_show_count().await.unwrap(), 3);
    database.verify_integrity().await.unwrap();
}

#[tokio::test]
async fn test_startup_schema_and_storage_stats() {
    let (_dir, database, service) = setup().await;
    seed(&service).await;

    database.verify_integrity().await.unwrap();
    let storage = database.get_storage_stats().await.unwrap();
    assert!(storage.page_size > 0);
    assert_eq!(storage.size_bytes(), storage.page_count * storage.page_size);
    assert_eq!(database.repository().get_show_count().await.unwrap(), 3);
}
