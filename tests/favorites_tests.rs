use pantry_chef::favorites::{FavoriteStore, JsonFileStore, StoreError};
use pantry_chef::recipe::{Difficulty, RecipeSuggestion};
use tempfile::tempdir;

fn omelette() -> RecipeSuggestion {
    RecipeSuggestion {
        why_it_fits: "Uses eggs".to_string(),
        difficulty: Some(Difficulty::Easy),
        estimated_time_minutes: 10,
        steps: vec!["Whisk".to_string(), "Fry".to_string()],
        ..RecipeSuggestion::new("Omelette")
    }
}

#[tokio::test]
async fn save_then_list_returns_recipe_with_id() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("favorites.json"));

    let saved = store.save("alice", omelette()).await.unwrap();
    assert_eq!(saved.id, 1);
    assert_eq!(saved.owner, "alice");

    let listed = store.list("alice").await.unwrap();
    assert_eq!(listed, vec![saved]);
}

#[tokio::test]
async fn favorites_survive_a_new_store_instance() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favorites.json");

    {
        let store = JsonFileStore::new(&path);
        store.save("alice", omelette()).await.unwrap();
        store.save("alice", RecipeSuggestion::new("Pancakes")).await.unwrap();
    }

    let reopened = JsonFileStore::new(&path);
    let titles: Vec<String> = reopened
        .list("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|saved| saved.recipe.title)
        .collect();
    assert_eq!(titles, ["Omelette", "Pancakes"]);

    let next = reopened.save("alice", RecipeSuggestion::new("Toast")).await.unwrap();
    assert_eq!(next.id, 3);
}

#[tokio::test]
async fn owners_cannot_see_or_remove_each_others_recipes() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("favorites.json"));

    let alices = store.save("alice", omelette()).await.unwrap();
    store.save("bob", RecipeSuggestion::new("Chili")).await.unwrap();

    assert_eq!(store.list("bob").await.unwrap().len(), 1);
    assert!(!store.remove("bob", alices.id).await.unwrap());
    assert_eq!(store.list("alice").await.unwrap().len(), 1);

    assert!(store.remove("alice", alices.id).await.unwrap());
    assert!(store.list("alice").await.unwrap().is_empty());
    assert!(!store.remove("alice", alices.id).await.unwrap());
}

#[tokio::test]
async fn invalid_recipe_or_owner_is_rejected_before_writing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let store = JsonFileStore::new(&path);

    let err = store.save("alice", RecipeSuggestion::new("   ")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecipe(_)));

    let err = store.save("  ", omelette()).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingOwner));

    assert!(!path.exists());
}

#[tokio::test]
async fn missing_file_lists_empty() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nothing-here.json"));
    assert!(store.list("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFileStore::new(&path);
    let err = store.list("alice").await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization(_)));
}

#[tokio::test]
async fn saved_recipe_json_round_trips_through_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let store = JsonFileStore::new(&path);
    store.save("alice", omelette()).await.unwrap();

    let on_disk: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let recipe = &on_disk["recipes"][0]["recipe"];
    assert_eq!(recipe["title"], "Omelette");
    assert_eq!(recipe["difficulty"], "Easy");
    assert_eq!(recipe["steps"], serde_json::json!(["Whisk", "Fry"]));
}

fn block_with_directory(path: &std::path::Path) {
    if path.exists() {
        std::fs::remove_file(path).unwrap();
    }
    std::fs::create_dir(path).unwrap();
    std::fs::write(path.join("occupied"), "x").unwrap();
}

#[tokio::test]
async fn failed_save_leaves_no_trace() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let store = JsonFileStore::new(&path);
    assert!(store.list("sam").await.unwrap().is_empty());

    block_with_directory(&path);
    let err = store.save("sam", RecipeSuggestion::new("Ghost")).await.unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));

    assert!(store.list("sam").await.unwrap().is_empty());
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn failed_remove_keeps_the_recipe() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("favorites.json");
    let store = JsonFileStore::new(&path);
    let saved = store.save("sam", omelette()).await.unwrap();

    block_with_directory(&path);
    let err = store.remove("sam", saved.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));

    assert_eq!(store.list("sam").await.unwrap(), vec![saved]);
    assert!(!path.with_extension("json.tmp").exists());
}
