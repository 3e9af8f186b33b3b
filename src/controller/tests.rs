use super::*;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::model::{
    Artist, ContentView, ListChange, ListQuery, ListState, Location, Page, PageSize, Pagination,
    RawArtist, RawTrack, Track, ViewKind,
};

fn track(id: usize, title: &str, favorite: bool) -> Track {
    Track::normalize(RawTrack {
        id: Some(format!("t{id}")),
        title: Some(title.to_string()),
        artist: Some("Nina Simone".into()),
        album: Some("Pastel Blues".into()),
        duration: Some(200),
        favorite: Some(favorite),
        ..Default::default()
    })
}

fn window(items: &[Track], query: &ListQuery) -> Page<Track> {
    let start = query.window.offset() as usize;
    let end = (start + query.window.page_size.get() as usize).min(items.len());
    Page {
        items: items.get(start..end).map(<[Track]>::to_vec).unwrap_or_default(),
        pagination: Pagination {
            total: items.len() as u64,
            ..query.window
        },
    }
}

#[derive(Default)]
struct FakeCatalog {
    library: StdMutex<Vec<Track>>,
    favorites: StdMutex<Vec<Track>>,
    artists: Vec<Artist>,
    /// Responses for these searches are held back
    delays: HashMap<String, Duration>,
    fail_loads: AtomicBool,
    fail_mutations: AtomicBool,
    favorite_calls: StdMutex<Vec<(String, bool)>>,
}

impl FakeCatalog {
    fn with_tracks(count: usize) -> Self {
        Self {
            library: StdMutex::new((1..=count).map(|i| track(i, &format!("song {i}"), false)).collect()),
            ..Default::default()
        }
    }

    fn with_favorites(count: usize) -> Self {
        Self {
            favorites: StdMutex::new((1..=count).map(|i| track(i, &format!("fav {i}"), true)).collect()),
            ..Default::default()
        }
    }

    async fn load(&self, items: Vec<Track>, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        if let Some(delay) = self.delays.get(&query.search) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 500,
                message: "boom".into(),
            });
        }
        let matching: Vec<Track> = items
            .into_iter()
            .filter(|t| t.title.contains(&query.search))
            .filter(|t| query.filters.artist.as_ref().is_none_or(|a| &t.artist == a))
            .collect();
        Ok(window(&matching, query))
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn tracks(&self, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        let items = self.library.lock().unwrap().clone();
        self.load(items, query).await
    }

    async fn favorites(&self, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        let items = self.favorites.lock().unwrap().clone();
        self.load(items, query).await
    }

    async fn recently_played(&self, query: &ListQuery) -> Result<Page<Track>, ApiError> {
        let items = self.library.lock().unwrap().clone();
        self.load(items, query).await
    }

    async fn artists(&self, query: &ListQuery) -> Result<Page<Artist>, ApiError> {
        Ok(Page {
            items: self.artists.clone(),
            pagination: Pagination {
                total: self.artists.len() as u64,
                ..query.window
            },
        })
    }

    async fn set_favorite(&self, track_id: &str, favorite: bool) -> Result<(), ApiError> {
        self.favorite_calls
            .lock()
            .unwrap()
            .push((track_id.to_string(), favorite));
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ApiError::Unsuccessful("database offline".into()));
        }
        if !favorite {
            self.favorites.lock().unwrap().retain(|t| t.id != track_id);
        }
        Ok(())
    }

    async fn record_play(&self, _track_id: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

#[derive(Default)]
struct FakePlayer {
    played: StdMutex<Vec<String>>,
}

#[async_trait]
impl Player for FakePlayer {
    async fn play_track(&self, track: &Track) -> anyhow::Result<()> {
        self.played.lock().unwrap().push(track.id.clone());
        Ok(())
    }

    async fn add_to_playlist(&self, _track: &Track) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn playback_info(&self) -> PlaybackInfo {
        PlaybackInfo::default()
    }
}

fn controller(catalog: Arc<FakeCatalog>, player: Arc<FakePlayer>) -> AppController {
    let model = AppModel::new(PageSize::Ten, Duration::from_secs(5));
    AppController::new(Arc::new(Mutex::new(model)), catalog, player)
}

async fn go(controller: &AppController, location: &str) {
    let handle = controller.navigate(location.parse().unwrap()).await;
    handle.unwrap().await.unwrap();
}

async fn track_list(controller: &AppController) -> ListState<Track> {
    match controller.model.lock().await.get_content_state().await.view {
        ContentView::Tracks(list) => list,
        other => panic!("expected a track list, got {other:?}"),
    }
}

#[tokio::test]
async fn navigate_loads_first_page() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(95)), Arc::default());

    go(&controller, "/tracks").await;

    let list = track_list(&controller).await;
    assert_eq!(list.items.len(), 10);
    assert_eq!(list.pagination.total, 95);
    assert_eq!(list.pagination.pages(), 10);
    assert!(!list.loading);
}

#[tokio::test]
async fn page_beyond_last_is_not_requested() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(95)), Arc::default());
    go(&controller, "/tracks").await;

    assert!(controller.apply_change(ListChange::Page(11)).await.is_none());
    assert_eq!(track_list(&controller).await.pagination.page, 1);

    controller
        .apply_change(ListChange::Page(10))
        .await
        .unwrap()
        .await
        .unwrap();
    let list = track_list(&controller).await;
    assert_eq!(list.pagination.page, 10);
    assert_eq!(list.items.len(), 5);
    assert_eq!(list.item_number(0), 91);
}

#[tokio::test]
async fn slower_older_response_is_discarded() {
    let mut catalog = FakeCatalog::with_tracks(0);
    *catalog.library.get_mut().unwrap() = vec![
        track(1, "slow song", false),
        track(2, "fast song", false),
        track(3, "fast tune", false),
    ];
    catalog.delays.insert("slow".into(), Duration::from_millis(100));
    let controller = controller(Arc::new(catalog), Arc::default());
    go(&controller, "/tracks").await;

    let older = controller
        .apply_change(ListChange::Search("slow".into()))
        .await
        .unwrap();
    let newer = controller
        .apply_change(ListChange::Search("fast".into()))
        .await
        .unwrap();
    newer.await.unwrap();
    older.await.unwrap();

    let list = track_list(&controller).await;
    assert_eq!(list.search, "fast");
    assert_eq!(list.items.len(), 2);
    assert!(list.items.iter().all(|t| t.title.starts_with("fast")));
}

#[tokio::test]
async fn failed_load_keeps_previous_items() {
    let catalog = Arc::new(FakeCatalog::with_tracks(30));
    let controller = controller(catalog.clone(), Arc::default());
    go(&controller, "/tracks").await;
    let before = track_list(&controller).await.items;

    catalog.fail_loads.store(true, Ordering::SeqCst);
    controller
        .apply_change(ListChange::NextPage)
        .await
        .unwrap()
        .await
        .unwrap();

    let list = track_list(&controller).await;
    assert_eq!(list.items, before);
    assert!(!list.loading);
    assert_eq!(
        list.error.as_deref(),
        Some("The server failed to handle the request (500).")
    );
}

#[tokio::test]
async fn shrunken_list_moves_back_and_reloads() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(45)), Arc::default());

    go(&controller, "/tracks?page=9").await;

    let list = track_list(&controller).await;
    assert_eq!(list.pagination.page, 5);
    assert_eq!(list.items.len(), 5);
}

#[tokio::test]
async fn unfavorite_on_favorites_view_removes_and_decrements() {
    let catalog = Arc::new(FakeCatalog::with_favorites(25));
    let controller = controller(catalog.clone(), Arc::default());
    go(&controller, "/favorites").await;

    assert!(controller.toggle_favorite_selected().await.is_none());

    assert_eq!(
        *catalog.favorite_calls.lock().unwrap(),
        vec![("t1".to_string(), false)]
    );
    let list = track_list(&controller).await;
    assert_eq!(list.items.len(), 9);
    assert_eq!(list.pagination.total, 24);
    assert!(list.items.iter().all(|t| t.id != "t1"));
}

#[tokio::test]
async fn unfavoriting_last_item_of_a_page_steps_back() {
    let catalog = Arc::new(FakeCatalog::with_favorites(21));
    let controller = controller(catalog, Arc::default());
    go(&controller, "/favorites?page=3").await;
    assert_eq!(track_list(&controller).await.items.len(), 1);

    controller
        .toggle_favorite_selected()
        .await
        .unwrap()
        .await
        .unwrap();

    let list = track_list(&controller).await;
    assert_eq!(list.pagination.page, 2);
    assert_eq!(list.pagination.total, 20);
    assert_eq!(list.items.len(), 10);
}

#[tokio::test]
async fn favorite_waits_for_acknowledgement() {
    let catalog = Arc::new(FakeCatalog::with_tracks(3));
    catalog.fail_mutations.store(true, Ordering::SeqCst);
    let controller = controller(catalog, Arc::default());
    go(&controller, "/tracks").await;

    controller.toggle_favorite_selected().await;

    let list = track_list(&controller).await;
    assert!(!list.items[0].favorite);
    let ui = controller.model.lock().await.get_ui_state().await;
    assert_eq!(ui.error_message.as_deref(), Some("database offline"));
}

#[tokio::test]
async fn favorite_on_music_list_updates_in_place() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(3)), Arc::default());
    go(&controller, "/tracks").await;

    controller.toggle_favorite_selected().await;

    let list = track_list(&controller).await;
    assert!(list.items[0].favorite);
    assert_eq!(list.pagination.total, 3);
}

#[tokio::test]
async fn playing_refreshes_recently_played() {
    let player = Arc::new(FakePlayer::default());
    let controller = controller(Arc::new(FakeCatalog::with_tracks(3)), player.clone());

    go(&controller, "/tracks").await;
    assert!(controller.activate_selected().await.is_none());

    go(&controller, "/recently-played").await;
    controller.model.lock().await.content_move_down().await;
    let refresh = controller.activate_selected().await;

    assert!(refresh.is_some());
    assert_eq!(
        *player.played.lock().unwrap(),
        vec!["t1".to_string(), "t2".to_string()]
    );
}

#[tokio::test]
async fn opening_an_artist_filters_the_music_list() {
    let mut catalog = FakeCatalog::with_tracks(4);
    catalog.artists = vec![Artist::normalize(RawArtist {
        name: Some("Nina Simone".into()),
        track_count: Some(4),
        ..Default::default()
    })];
    let controller = controller(Arc::new(catalog), Arc::default());
    go(&controller, "/artists").await;

    controller.activate_selected().await.unwrap().await.unwrap();

    let list = track_list(&controller).await;
    assert_eq!(list.kind, ViewKind::Tracks);
    assert_eq!(list.filters.artist.as_deref(), Some("Nina Simone"));
    assert_eq!(list.items.len(), 4);

    controller.go_back().await.unwrap().await.unwrap();
    assert_eq!(
        controller.model.lock().await.current_kind().await,
        Some(ViewKind::Artists)
    );
}

#[tokio::test]
async fn sidebar_opens_do_not_pile_up_history() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(30)), Arc::default());
    go(&controller, "/tracks?genre=Jazz").await;

    for _ in 0..3 {
        controller.model.lock().await.library_move_down().await;
        controller.open_library_item().await.unwrap().await.unwrap();
    }

    let model = controller.model.lock().await;
    assert_eq!(model.current_kind().await, Some(ViewKind::Artists));
    assert!(model.get_content_state().await.navigation_stack.is_empty());
    drop(model);
    assert!(controller.go_back().await.is_none());
}

#[tokio::test]
async fn open_album_uses_album_filter() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(2)), Arc::default());
    go(&controller, "/tracks").await;

    controller.open_selected_album().await.unwrap().await.unwrap();

    let location = controller.model.lock().await.current_location().await.unwrap();
    assert_eq!(location.param("album"), Some("Pastel Blues"));
}

#[tokio::test]
async fn sort_on_unsortable_view_does_not_reload() {
    let controller = controller(Arc::new(FakeCatalog::with_tracks(3)), Arc::default());
    go(&controller, "/recently-played").await;

    assert!(
        controller
            .apply_change(ListChange::Sort(crate::model::SortKey::Year))
            .await
            .is_none()
    );
}

#[test]
fn format_error_uses_api_messages() {
    let err = anyhow::Error::new(ApiError::Status {
        status: 404,
        message: String::new(),
    });
    assert_eq!(AppController::format_error(&err), "Not found on the server.");

    let err = anyhow::anyhow!("player went away");
    assert_eq!(AppController::format_error(&err), "Error: player went away");
}

#[test]
fn location_for_artist_is_encoded() {
    let location = Location::new(ViewKind::Tracks).with_param("artist", "Nina Simone");
    assert_eq!(location.to_string(), "/tracks?artist=Nina%20Simone");
}
