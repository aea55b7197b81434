use quiz_core::model::{AiProvider, AppSettingsDraft, Chunk};
use quiz_core::time::fixed_now;
use storage::repository::{AppSettingsRepository, ChunkRepository, NewChunk, StorageError};
use storage::sqlite::SqliteRepository;

fn new_chunk(source: &str, page: u32, text: &str, embedding: Vec<f32>) -> NewChunk {
    NewChunk {
        chunk: Chunk {
            source: source.into(),
            page,
            text: text.into(),
        },
        embedding,
    }
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_collection_roundtrip_and_search() {
    let repo = connect("memdb_collection_roundtrip").await;

    let chunks = vec![
        new_chunk("bio.pdf", 1, "Chlorophyll absorbs light.", vec![0.9, 0.1, 0.0]),
        new_chunk("bio.pdf", 2, "Mitochondria make ATP.", vec![0.0, 1.0, 0.0]),
        new_chunk("bio.pdf", 3, "Leaves are green.", vec![0.7, 0.3, 0.1]),
    ];
    let info = repo
        .replace_collection("biology", &chunks, fixed_now())
        .await
        .expect("replace");
    assert_eq!(info.chunk_count, 3);
    assert_eq!(info.dimensions, 3);

    let stored = repo
        .collection_info("biology")
        .await
        .expect("info")
        .expect("collection exists");
    assert_eq!(stored.chunk_count, 3);
    assert_eq!(stored.created_at, fixed_now());

    let hits = repo.search("biology", &[1.0, 0.0, 0.0], 2).await.expect("search");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].chunk.text, "Chlorophyll absorbs light.");
    assert_eq!(hits[1].chunk.text, "Leaves are green.");
    assert_eq!(hits[1].chunk.page, 3);
    assert!(hits[0].score >= hits[1].score);
}

#[tokio::test]
async fn sqlite_replace_swaps_contents() {
    let repo = connect("memdb_collection_replace").await;

    repo.replace_collection("docs", &[new_chunk("a.pdf", 1, "old", vec![1.0, 0.0])], fixed_now())
        .await
        .expect("first replace");
    repo.replace_collection(
        "docs",
        &[
            new_chunk("b.pdf", 1, "new one", vec![1.0, 0.0]),
            new_chunk("b.pdf", 2, "new two", vec![0.0, 1.0]),
        ],
        fixed_now(),
    )
    .await
    .expect("second replace");

    let hits = repo.search("docs", &[1.0, 0.0], 10).await.expect("search");
    let texts: Vec<_> = hits.iter().map(|h| h.chunk.text.as_str()).collect();
    assert_eq!(texts, ["new one", "new two"]);
}

#[tokio::test]
async fn sqlite_search_rejects_wrong_query_length() {
    let repo = connect("memdb_collection_dims").await;
    repo.replace_collection("docs", &[new_chunk("a.pdf", 1, "x", vec![1.0, 0.0])], fixed_now())
        .await
        .expect("replace");

    let err = repo.search("docs", &[1.0, 0.0, 0.0], 1).await.unwrap_err();
    assert!(matches!(
        err,
        StorageError::DimensionMismatch { expected: 2, got: 3 }
    ));
    assert!(matches!(
        repo.search("missing", &[1.0], 1).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn sqlite_settings_roundtrip() {
    let repo = connect("memdb_settings_roundtrip").await;
    assert!(repo.get_settings().await.expect("get").is_none());

    let settings = AppSettingsDraft {
        provider: Some("vertex-ai".into()),
        project: Some("quizify-demo".into()),
        location: Some("europe-west2".into()),
        embedding_model: Some("textembedding-gecko@003".into()),
        chat_model: None,
        api_key: Some("token".into()),
        api_base_url: None,
    }
    .validate()
    .expect("valid settings");
    repo.save_settings(&settings).await.expect("save");

    let loaded = repo.get_settings().await.expect("get").expect("present");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.provider(), Some(AiProvider::VertexAi));

    let updated = AppSettingsDraft {
        provider: Some("openai".into()),
        ..AppSettingsDraft::default()
    }
    .validate()
    .expect("valid settings");
    repo.save_settings(&updated).await.expect("save again");
    let loaded = repo.get_settings().await.expect("get").expect("present");
    assert_eq!(loaded.project(), None);
    assert_eq!(loaded.provider(), Some(AiProvider::OpenAi));
}
